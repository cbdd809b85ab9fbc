mod fetch;
mod loader;

pub use fetch::{fetcher_for_root, AssetFetcher};
pub use loader::AssetLoader;

#[cfg(test)]
pub(crate) use loader::tests as loader_tests;

use crate::render::OptionValue;
use std::collections::BTreeMap;

/// The four descriptor files the rendering library is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Shaders,
    Textures,
    Models,
    Materials,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Shaders,
        AssetKind::Textures,
        AssetKind::Models,
        AssetKind::Materials,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Shaders => "shader.json",
            AssetKind::Textures => "textures.json",
            AssetKind::Models => "models.json",
            AssetKind::Materials => "materials.json",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read asset at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {message}")]
    Http { url: String, message: String },
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("material '{material}' references unknown shader '{shader}'")]
    UnknownShader { material: String, shader: String },
    #[error("asset loading timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("asset worker for {0} exited without a result")]
    WorkerLost(&'static str),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShaderDescriptor {
    #[serde(default)]
    pub vertex: String,
    #[serde(default)]
    pub fragment: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextureDescriptor {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub cubemap: bool,
    /// Average color of the image, used by the preview painter.
    #[serde(default)]
    pub tint: Option<[f32; 3]>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelDescriptor {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialDescriptor {
    pub shader: String,
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl MaterialDescriptor {
    /// Catalog options that map onto a material option value. Others are skipped.
    pub fn option_values(&self) -> Vec<(String, OptionValue)> {
        self.options
            .iter()
            .filter_map(|(key, value)| {
                let converted = OptionValue::from_json(value);
                if converted.is_none() {
                    log::debug!("Skipping unsupported material option '{}'", key);
                }
                converted.map(|value| (key.clone(), value))
            })
            .collect()
    }
}

pub type ShaderCatalog = BTreeMap<String, ShaderDescriptor>;
pub type TextureCatalog = BTreeMap<String, TextureDescriptor>;
pub type ModelCatalog = BTreeMap<String, ModelDescriptor>;
pub type MaterialCatalog = BTreeMap<String, MaterialDescriptor>;

/// Parsed descriptors, complete only once all four files have arrived.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    pub shaders: ShaderCatalog,
    pub textures: TextureCatalog,
    pub models: ModelCatalog,
    pub materials: MaterialCatalog,
}

impl AssetBundle {
    pub fn parse(
        shaders: &str,
        textures: &str,
        models: &str,
        materials: &str,
    ) -> Result<Self, AssetError> {
        let bundle = Self {
            shaders: parse_catalog(AssetKind::Shaders, shaders)?,
            textures: parse_catalog(AssetKind::Textures, textures)?,
            models: parse_catalog(AssetKind::Models, models)?,
            materials: parse_catalog(AssetKind::Materials, materials)?,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    fn validate(&self) -> Result<(), AssetError> {
        for (name, material) in &self.materials {
            if !self.shaders.contains_key(&material.shader) {
                return Err(AssetError::UnknownShader {
                    material: name.clone(),
                    shader: material.shader.clone(),
                });
            }
        }
        Ok(())
    }
}

fn parse_catalog<T>(kind: AssetKind, text: &str) -> Result<T, AssetError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(text).map_err(|source| AssetError::Parse {
        file: kind.file_name(),
        source,
    })
}
