use super::{
    is_texture_key, CameraId, CameraRegistry, MaterialOptions, OptionValue, RenderError,
    RenderLibrary, Substance, SubstanceId, Surface, TemplateId, Transform,
};
use crate::assets::{AssetBundle, TextureDescriptor};

const FRAMES_PER_SECOND: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Template {
    pub model: String,
    pub material: String,
    pub shader: String,
    pub options: MaterialOptions,
}

/// In-process rendering library: templates, substances and cameras kept in
/// memory, animated by [`SceneEngine::tick`] and drawn by the preview painter.
pub struct SceneEngine {
    assets: AssetBundle,
    cameras: CameraRegistry,
    templates: Vec<Template>,
    substances: Vec<Substance>,
    playing: bool,
}

impl SceneEngine {
    pub fn cameras(&self) -> &CameraRegistry {
        &self.cameras
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(id.0)
    }

    pub fn substances(&self) -> &[Substance] {
        &self.substances
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn texture(&self, name: &str) -> Option<&TextureDescriptor> {
        self.assets.textures.get(name)
    }

    /// Advances every substance by its angular velocity. No-op until `play`.
    pub fn tick(&mut self, dt_seconds: f32) {
        if !self.playing {
            return;
        }
        let frames = dt_seconds.max(0.0) * FRAMES_PER_SECOND;
        for substance in &mut self.substances {
            substance.transform.rotate += substance.angular_velocity * frames;
            substance.transform.rotate.x = substance.transform.rotate.x.rem_euclid(360.0);
            substance.transform.rotate.y = substance.transform.rotate.y.rem_euclid(360.0);
            substance.transform.rotate.z = substance.transform.rotate.z.rem_euclid(360.0);
        }
    }

    fn check_texture(&self, key: &str, value: &OptionValue) -> Result<(), RenderError> {
        if !is_texture_key(key) {
            return Ok(());
        }
        if let Some(texture) = value.as_text() {
            if !self.assets.textures.contains_key(texture) {
                return Err(RenderError::UnknownTexture {
                    key: key.to_string(),
                    texture: texture.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl RenderLibrary for SceneEngine {
    fn create(surface: Surface, assets: AssetBundle) -> Result<Self, RenderError> {
        log::info!(
            "Scene engine created for {}x{} surface ({} shaders, {} textures, {} models, {} materials)",
            surface.width,
            surface.height,
            assets.shaders.len(),
            assets.textures.len(),
            assets.models.len(),
            assets.materials.len()
        );
        Ok(Self {
            assets,
            cameras: CameraRegistry::default(),
            templates: Vec::new(),
            substances: Vec::new(),
            playing: false,
        })
    }

    fn create_camera(&mut self, name: &str) -> CameraId {
        self.cameras.create(name)
    }

    fn activate_camera(&mut self, name: &str) -> Result<CameraId, RenderError> {
        self.cameras.activate(name)
    }

    fn camera_transform_mut(&mut self, camera: CameraId) -> Option<&mut Transform> {
        self.cameras.get_mut(camera).map(|camera| &mut camera.transform)
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.cameras.set_aspect(aspect);
    }

    fn add_template(&mut self, model: &str, material: &str) -> Result<TemplateId, RenderError> {
        if !self.assets.models.contains_key(model) {
            return Err(RenderError::UnknownModel(model.to_string()));
        }
        let descriptor = self
            .assets
            .materials
            .get(material)
            .ok_or_else(|| RenderError::UnknownMaterial(material.to_string()))?;

        let mut options = MaterialOptions::default();
        for (key, value) in descriptor.option_values() {
            options.set(&key, value);
        }
        let template = Template {
            model: model.to_string(),
            material: material.to_string(),
            shader: descriptor.shader.clone(),
            options,
        };
        log::debug!(
            "Registered template {} ({} + {})",
            self.templates.len(),
            model,
            material
        );
        self.templates.push(template);
        Ok(TemplateId(self.templates.len() - 1))
    }

    fn instantiate(&mut self, template: TemplateId) -> Option<SubstanceId> {
        self.templates.get(template.0)?;
        self.substances.push(Substance::new(template));
        Some(SubstanceId(self.substances.len() - 1))
    }

    fn substance_mut(&mut self, substance: SubstanceId) -> Option<&mut Substance> {
        self.substances.get_mut(substance.0)
    }

    fn set_option(
        &mut self,
        template: TemplateId,
        key: &str,
        value: OptionValue,
    ) -> Result<(), RenderError> {
        self.check_texture(key, &value)?;
        let entry = self
            .templates
            .get_mut(template.0)
            .ok_or(RenderError::UnknownTemplate(template.0))?;
        entry.options.set(key, value);
        Ok(())
    }

    fn play(&mut self) {
        if !self.playing {
            log::info!("Render loop started");
        }
        self.playing = true;
    }
}
