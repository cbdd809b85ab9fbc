mod panel;
mod range;
mod select;

pub use panel::Panel;
pub use range::Range;
pub use select::Select;

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a known {kind}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// Texture sets offered by the panel. Each names `{set}/Color`, `{set}/Normal` and `{set}/AO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSet {
    PavingStones,
    Tiles,
    Metal,
    Leather,
    Marble,
}

impl TextureSet {
    pub const ALL: [TextureSet; 5] = [
        TextureSet::PavingStones,
        TextureSet::Tiles,
        TextureSet::Metal,
        TextureSet::Leather,
        TextureSet::Marble,
    ];
    pub const NAMES: [&'static str; 5] = ["PavingStones", "Tiles", "Metal", "Leather", "Marble"];

    pub fn as_str(self) -> &'static str {
        match self {
            TextureSet::PavingStones => "PavingStones",
            TextureSet::Tiles => "Tiles",
            TextureSet::Metal => "Metal",
            TextureSet::Leather => "Leather",
            TextureSet::Marble => "Marble",
        }
    }

    pub fn color_texture(self) -> String {
        format!("{}/Color", self.as_str())
    }

    pub fn normal_texture(self) -> String {
        format!("{}/Normal", self.as_str())
    }

    pub fn ao_texture(self) -> String {
        format!("{}/AO", self.as_str())
    }
}

impl FromStr for TextureSet {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|set| set.as_str() == value)
            .ok_or_else(|| UnknownOption {
                kind: "texture set",
                value: value.to_string(),
            })
    }
}

impl fmt::Display for TextureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skybox {
    Yokohama,
    Chapel,
    Cloud,
}

impl Skybox {
    pub const ALL: [Skybox; 3] = [Skybox::Yokohama, Skybox::Chapel, Skybox::Cloud];
    pub const NAMES: [&'static str; 3] = ["Yokohama", "Chapel", "Cloud"];

    pub fn as_str(self) -> &'static str {
        match self {
            Skybox::Yokohama => "Yokohama",
            Skybox::Chapel => "Chapel",
            Skybox::Cloud => "Cloud",
        }
    }

    pub fn cubemap_texture(self) -> String {
        format!("Cubemap/{}", self.as_str())
    }
}

impl FromStr for Skybox {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skybox| skybox.as_str() == value)
            .ok_or_else(|| UnknownOption {
                kind: "skybox",
                value: value.to_string(),
            })
    }
}

impl fmt::Display for Skybox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The panel's editable parameters. Readiness lives in [`LoadState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub color: [f32; 3],
    pub main_tex: TextureSet,
    pub skybox: Skybox,
    pub metallic: f32,
    pub normal_magnification: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            main_tex: TextureSet::Tiles,
            skybox: Skybox::Chapel,
            metallic: 0.0,
            normal_magnification: 1.0,
        }
    }
}

/// `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}
