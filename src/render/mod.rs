mod camera;
mod drag;
mod material;
mod preview;
mod scene;
mod transform;

#[cfg(test)]
pub mod recording;

pub use camera::{view_projection, CameraId, CameraRegistry, OrbitController};
pub use drag::MouseDrag;
pub use material::{is_texture_key, MaterialOptions, OptionValue};
pub use preview::paint_preview;
pub use scene::SceneEngine;
pub use transform::Transform;

use crate::assets::AssetBundle;
use glam::Vec3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
    #[error("unknown camera '{0}'")]
    UnknownCamera(String),
    #[error("unknown template id {0}")]
    UnknownTemplate(usize),
    #[error("option '{key}' references unknown texture '{texture}'")]
    UnknownTexture { key: String, texture: String },
}

/// Fixed-size drawing area the library renders into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubstanceId(pub usize);

/// An instantiated renderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Substance {
    pub template: TemplateId,
    pub transform: Transform,
    /// Degrees per frame at 60 fps, applied while the loop is playing.
    pub angular_velocity: Vec3,
}

impl Substance {
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            transform: Transform::default(),
            angular_velocity: Vec3::ZERO,
        }
    }
}

/// Capabilities the panel needs from a rendering library.
pub trait RenderLibrary: Sized {
    /// Builds the library once all asset catalogs are available.
    fn create(surface: Surface, assets: AssetBundle) -> Result<Self, RenderError>;

    fn create_camera(&mut self, name: &str) -> CameraId;

    fn activate_camera(&mut self, name: &str) -> Result<CameraId, RenderError>;

    fn camera_transform_mut(&mut self, camera: CameraId) -> Option<&mut Transform>;

    fn set_aspect(&mut self, aspect: f32);

    /// Binds a model to a material. The template owns the material option store.
    fn add_template(&mut self, model: &str, material: &str) -> Result<TemplateId, RenderError>;

    fn instantiate(&mut self, template: TemplateId) -> Option<SubstanceId>;

    fn substance_mut(&mut self, substance: SubstanceId) -> Option<&mut Substance>;

    fn set_option(
        &mut self,
        template: TemplateId,
        key: &str,
        value: OptionValue,
    ) -> Result<(), RenderError>;

    /// Starts the render loop.
    fn play(&mut self);
}
