use std::collections::BTreeMap;

/// A value in a material option store.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Float(f32),
    Vec4([f32; 4]),
    /// Texture or cubemap reference, resolved by name against the texture catalog.
    Text(String),
}

impl OptionValue {
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(number) => number.as_f64().map(|v| Self::Float(v as f32)),
            serde_json::Value::String(text) => Some(Self::Text(text.clone())),
            serde_json::Value::Array(items) if items.len() == 4 => {
                let mut out = [0.0f32; 4];
                for (slot, item) in out.iter_mut().zip(items) {
                    *slot = item.as_f64()? as f32;
                }
                Some(Self::Vec4(out))
            }
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<[f32; 4]> {
        match self {
            Self::Vec4(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Generic key → value store read by a template's shader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialOptions {
    values: BTreeMap<String, OptionValue>,
}

impl MaterialOptions {
    pub fn set(&mut self, key: &str, value: OptionValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn float(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(OptionValue::as_float)
    }

    pub fn vec4(&self, key: &str) -> Option<[f32; 4]> {
        self.get(key).and_then(OptionValue::as_vec4)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_text)
    }
}

/// Texture-reference keys. Values under these keys must name a catalog texture.
pub fn is_texture_key(key: &str) -> bool {
    key.ends_with("Texture")
}
