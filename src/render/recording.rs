//! Rendering library stand-in that records every call, for panel tests.

use super::{
    CameraId, CameraRegistry, OptionValue, RenderError, RenderLibrary, Substance, SubstanceId,
    Surface, TemplateId, Transform,
};
use crate::assets::AssetBundle;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { surface: Surface },
    CreateCamera(String),
    ActivateCamera(String),
    SetAspect(f32),
    AddTemplate { model: String, material: String },
    Instantiate(TemplateId),
    SetOption { template: TemplateId, key: String, value: OptionValue },
    Play,
}

pub struct RecordingLibrary {
    pub calls: Vec<Call>,
    pub cameras: CameraRegistry,
    pub templates: Vec<(String, String)>,
    pub substances: Vec<Substance>,
    pub aspect: Option<f32>,
}

impl RecordingLibrary {
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// `set_option` calls, in order, as (template, key, value).
    pub fn options(&self) -> Vec<(TemplateId, String, OptionValue)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetOption {
                    template,
                    key,
                    value,
                } => Some((*template, key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn active_camera(&self) -> Transform {
        self.cameras
            .active()
            .map(|camera| camera.transform)
            .unwrap_or_default()
    }
}

impl RenderLibrary for RecordingLibrary {
    fn create(surface: Surface, _assets: AssetBundle) -> Result<Self, RenderError> {
        Ok(Self {
            calls: vec![Call::Create { surface }],
            cameras: CameraRegistry::default(),
            templates: Vec::new(),
            substances: Vec::new(),
            aspect: None,
        })
    }

    fn create_camera(&mut self, name: &str) -> CameraId {
        self.calls.push(Call::CreateCamera(name.to_string()));
        self.cameras.create(name)
    }

    fn activate_camera(&mut self, name: &str) -> Result<CameraId, RenderError> {
        self.calls.push(Call::ActivateCamera(name.to_string()));
        self.cameras.activate(name)
    }

    fn camera_transform_mut(&mut self, camera: CameraId) -> Option<&mut Transform> {
        self.cameras.get_mut(camera).map(|camera| &mut camera.transform)
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.calls.push(Call::SetAspect(aspect));
        self.aspect = Some(aspect);
    }

    fn add_template(&mut self, model: &str, material: &str) -> Result<TemplateId, RenderError> {
        self.calls.push(Call::AddTemplate {
            model: model.to_string(),
            material: material.to_string(),
        });
        self.templates.push((model.to_string(), material.to_string()));
        Ok(TemplateId(self.templates.len() - 1))
    }

    fn instantiate(&mut self, template: TemplateId) -> Option<SubstanceId> {
        self.calls.push(Call::Instantiate(template));
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
        self.calls.push(Call::SetOption {
            template,
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }
}
