use super::{LoadState, Range, Select, Skybox, TextureSet, ViewState};
use crate::assets::{AssetBundle, AssetError, AssetFetcher, AssetLoader};
use crate::config::AppConfig;
use crate::render::{
    CameraId, MouseDrag, OptionValue, OrbitController, RenderError, RenderLibrary, Surface,
    TemplateId, Transform,
};
use glam::Vec3;
use std::sync::Arc;
use std::time::Duration;

const MAIN_CAMERA: &str = "MainCamera";
const PRIMARY_MODEL: &str = "smoothsphere";
const PRIMARY_MATERIAL: &str = "standard/tiles";
const SKYBOX_MODEL: &str = "skybox";
const SKYBOX_MATERIAL: &str = "skybox";

const COLOR_STEP: f32 = 0.01;
const METALLIC_STEP: f32 = 0.01;
const NORMAL_MIN: f32 = 0.00001;
const NORMAL_MAX: f32 = 3.0;
const NORMAL_STEP: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
enum Target {
    Primary,
    Skybox,
}

/// The ViewState fields, each forwarded to the library as one group of keys.
#[derive(Debug, Clone, Copy)]
enum Field {
    Color,
    MainTex,
    Skybox,
    Metallic,
    NormalMagnification,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::Color,
        Field::MainTex,
        Field::Skybox,
        Field::Metallic,
        Field::NormalMagnification,
    ];

    fn options(self, state: &ViewState) -> Vec<(Target, &'static str, OptionValue)> {
        match self {
            Field::Color => {
                let [r, g, b] = state.color;
                vec![(Target::Primary, "color", OptionValue::Vec4([r, g, b, 1.0]))]
            }
            Field::MainTex => {
                let set = state.main_tex;
                vec![
                    (Target::Primary, "mainTexture", OptionValue::Text(set.color_texture())),
                    (Target::Primary, "normalTexture", OptionValue::Text(set.normal_texture())),
                    (Target::Primary, "aoTexture", OptionValue::Text(set.ao_texture())),
                ]
            }
            Field::Skybox => {
                let cubemap = OptionValue::Text(state.skybox.cubemap_texture());
                vec![
                    (Target::Primary, "cubemapTexture", cubemap.clone()),
                    (Target::Skybox, "cubemapTexture", cubemap),
                ]
            }
            Field::Metallic => {
                vec![(Target::Primary, "metallic", OptionValue::Float(state.metallic))]
            }
            Field::NormalMagnification => vec![(
                Target::Primary,
                "normalMagnification",
                OptionValue::Float(state.normal_magnification),
            )],
        }
    }

    /// `into` with this field taken from `from`.
    fn copy(self, from: &ViewState, mut into: ViewState) -> ViewState {
        match self {
            Field::Color => into.color = from.color,
            Field::MainTex => into.main_tex = from.main_tex,
            Field::Skybox => into.skybox = from.skybox,
            Field::Metallic => into.metallic = from.metallic,
            Field::NormalMagnification => into.normal_magnification = from.normal_magnification,
        }
        into
    }
}

/// Library handles that exist only once loading succeeded.
struct Bound<R> {
    library: R,
    primary: TemplateId,
    skybox: TemplateId,
    camera: CameraId,
    drag: MouseDrag,
}

/// Owns the [`ViewState`] and keeps the rendering library's materials in step with it.
///
/// Every setter forwards its keys to the library and writes the state only once
/// all of them were accepted, so the state always matches what the library
/// holds. Before the library exists only the state is written; the whole state
/// is pushed once when the library comes up.
pub struct Panel<R: RenderLibrary> {
    state: ViewState,
    load: LoadState,
    surface: Surface,
    orbit: OrbitController,
    load_timeout: Duration,
    loader: Option<AssetLoader>,
    bound: Option<Bound<R>>,
    viewport: Option<(f32, f32)>,
}

impl<R: RenderLibrary> Panel<R> {
    pub fn new(config: &AppConfig) -> Self {
        let surface = Surface::new(config.surface_width, config.surface_height);
        log::info!("Drawing surface {}x{}", surface.width, surface.height);
        Self {
            state: ViewState::default(),
            load: LoadState::Loading,
            surface,
            orbit: OrbitController::new(config.orbit_sensitivity, config.orbit_radius),
            load_timeout: config.load_timeout(),
            loader: None,
            bound: None,
            viewport: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn library(&self) -> Option<&R> {
        self.bound.as_ref().map(|bound| &bound.library)
    }

    pub fn library_mut(&mut self) -> Option<&mut R> {
        self.bound.as_mut().map(|bound| &mut bound.library)
    }

    /// Starts the one-shot catalog fetch. Later calls are ignored.
    pub fn begin_loading(&mut self, fetcher: Arc<dyn AssetFetcher>) {
        if self.loader.is_some() || self.load != LoadState::Loading {
            return;
        }
        self.loader = Some(AssetLoader::spawn(fetcher, self.load_timeout));
    }

    /// Non-blocking; call once per frame.
    pub fn poll(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if let Some(result) = loader.poll() {
            self.loader = None;
            self.finish_loading(result);
        }
    }

    pub fn finish_loading(&mut self, result: Result<AssetBundle, AssetError>) {
        if self.load != LoadState::Loading {
            log::debug!("Ignoring asset result; panel already {:?}", self.load);
            return;
        }
        let outcome = result
            .map_err(|err| err.to_string())
            .and_then(|bundle| self.bind(bundle).map_err(|err| err.to_string()));
        match outcome {
            Ok(()) => {
                log::info!("Panel ready");
                self.load = LoadState::Ready;
            }
            Err(message) => {
                log::error!("Panel setup failed: {}", message);
                self.load = LoadState::Failed(message);
            }
        }
    }

    fn bind(&mut self, bundle: AssetBundle) -> Result<(), RenderError> {
        let mut library = R::create(self.surface, bundle)?;

        let camera = library.create_camera(MAIN_CAMERA);
        library.activate_camera(MAIN_CAMERA)?;
        if let Some(transform) = library.camera_transform_mut(camera) {
            *transform = Transform::new(
                Vec3::new(0.0, 0.0, -self.orbit.radius),
                Vec3::new(0.0, 180.0, 0.0),
                Vec3::ONE,
            );
        }

        let primary = library.add_template(PRIMARY_MODEL, PRIMARY_MATERIAL)?;
        if let Some(id) = library.instantiate(primary) {
            if let Some(substance) = library.substance_mut(id) {
                substance.angular_velocity = Vec3::new(1.0, 0.0, 1.0);
                substance.transform = Transform::new(
                    Vec3::ZERO,
                    Vec3::new(0.0, 0.0, 45.0),
                    Vec3::splat(2.0),
                );
            }
        }

        let skybox = library.add_template(SKYBOX_MODEL, SKYBOX_MATERIAL)?;
        if let Some(id) = library.instantiate(skybox) {
            if let Some(substance) = library.substance_mut(id) {
                substance.transform = Transform::new(Vec3::ZERO, Vec3::ZERO, Vec3::splat(50.0));
            }
        }

        if let Some((width, height)) = self.viewport {
            library.set_aspect(width / height);
        }

        self.bound = Some(Bound {
            library,
            primary,
            skybox,
            camera,
            drag: MouseDrag::new(egui::PointerButton::Primary),
        });
        for field in Field::ALL {
            self.push_initial(field);
        }

        if let Some(bound) = self.bound.as_mut() {
            bound.library.play();
        }
        Ok(())
    }

    /// A field the library refuses at setup falls back to its default value.
    fn push_initial(&mut self, field: Field) {
        let Err(err) = self.apply(&field.options(&self.state)) else {
            return;
        };
        log::warn!("Initial {:?} rejected, using default: {}", field, err);
        let fallback = field.copy(&ViewState::default(), self.state);
        match self.apply(&field.options(&fallback)) {
            Ok(()) => self.state = fallback,
            Err(err) => log::warn!("Default {:?} rejected as well: {}", field, err),
        }
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        let next = ViewState {
            color: [r, g, b],
            ..self.state
        };
        self.update(Field::Color, next);
    }

    /// Replaces one of the three color channels, keeping the other two.
    pub fn set_color_channel(&mut self, channel: usize, value: f32) {
        let mut color = self.state.color;
        let Some(slot) = color.get_mut(channel) else {
            log::warn!("No color channel {}", channel);
            return;
        };
        *slot = value;
        let [r, g, b] = color;
        self.set_color(r, g, b);
    }

    pub fn set_main_tex(&mut self, set: TextureSet) {
        let next = ViewState {
            main_tex: set,
            ..self.state
        };
        self.update(Field::MainTex, next);
    }

    pub fn set_skybox(&mut self, skybox: Skybox) {
        let next = ViewState {
            skybox,
            ..self.state
        };
        self.update(Field::Skybox, next);
    }

    pub fn set_metallic(&mut self, value: f32) {
        let next = ViewState {
            metallic: value,
            ..self.state
        };
        self.update(Field::Metallic, next);
    }

    pub fn set_normal_magnification(&mut self, value: f32) {
        let next = ViewState {
            normal_magnification: value,
            ..self.state
        };
        self.update(Field::NormalMagnification, next);
    }

    /// Dropdown entry point. Unknown names leave state and library untouched.
    pub fn select_main_tex(&mut self, name: &str) {
        match name.parse::<TextureSet>() {
            Ok(set) => self.set_main_tex(set),
            Err(err) => log::warn!("{}", err),
        }
    }

    pub fn select_skybox(&mut self, name: &str) {
        match name.parse::<Skybox>() {
            Ok(skybox) => self.set_skybox(skybox),
            Err(err) => log::warn!("{}", err),
        }
    }

    /// Commits `next` only once the library accepted every key of `field`.
    /// A partial failure re-applies the current values.
    fn update(&mut self, field: Field, next: ViewState) {
        match self.apply(&field.options(&next)) {
            Ok(()) => self.state = next,
            Err(err) => {
                log::warn!("Keeping previous {:?}: {}", field, err);
                if let Err(err) = self.apply(&field.options(&self.state)) {
                    log::warn!("Restoring {:?} failed: {}", field, err);
                }
            }
        }
    }

    /// No-op before the library exists.
    fn apply(
        &mut self,
        options: &[(Target, &'static str, OptionValue)],
    ) -> Result<(), RenderError> {
        let Some(bound) = self.bound.as_mut() else {
            return Ok(());
        };
        for (target, key, value) in options {
            let template = match target {
                Target::Primary => bound.primary,
                Target::Skybox => bound.skybox,
            };
            bound.library.set_option(template, key, value.clone())?;
        }
        Ok(())
    }

    /// Orbits the main camera around the origin. Only the horizontal delta is used.
    pub fn drag(&mut self, dx: f32, _dy: f32) {
        let orbit = self.orbit;
        let Some(bound) = self.bound.as_mut() else {
            return;
        };
        if let Some(transform) = bound.library.camera_transform_mut(bound.camera) {
            orbit.apply_drag(transform, dx);
        }
    }

    pub fn handle_pointer(&mut self, input: &egui::InputState, surface_rect: egui::Rect) {
        let delta = self
            .bound
            .as_mut()
            .and_then(|bound| bound.drag.update(input, surface_rect));
        if let Some(delta) = delta {
            self.drag(delta.x, delta.y);
        }
    }

    /// Window created or resized. Independent of the view state.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) || self.viewport == Some((width, height)) {
            return;
        }
        self.viewport = Some((width, height));
        if let Some(bound) = self.bound.as_mut() {
            bound.library.set_aspect(width / height);
        }
    }

    /// Hidden while loading, the control grid once ready, an error window on failure.
    pub fn show(&mut self, ctx: &egui::Context) {
        match &self.load {
            LoadState::Loading => {}
            LoadState::Failed(message) => {
                let message = message.clone();
                egui::Window::new("Asset loading failed")
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.colored_label(ui.visuals().error_fg_color, message);
                    });
            }
            LoadState::Ready => {
                egui::Window::new("Material")
                    .resizable(false)
                    .show(ctx, |ui| self.controls(ui));
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("material_controls")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Color");
                ui.vertical(|ui| self.color_controls(ui));
                ui.end_row();

                ui.label("Texture");
                let current = self.state.main_tex.as_str();
                if let Some(name) = Select::new("main_tex", current, &TextureSet::NAMES).show(ui) {
                    self.select_main_tex(&name);
                }
                ui.end_row();

                ui.label("Skybox");
                let current = self.state.skybox.as_str();
                if let Some(name) = Select::new("skybox", current, &Skybox::NAMES).show(ui) {
                    self.select_skybox(&name);
                }
                ui.end_row();

                ui.label("Metallic");
                let metallic = self.state.metallic;
                if let Some(value) = Range::new(metallic, 0.0, 1.0, METALLIC_STEP).show(ui) {
                    self.set_metallic(value);
                }
                ui.end_row();

                ui.label("Normal");
                let normal = self.state.normal_magnification;
                if let Some(value) = Range::new(normal, NORMAL_MIN, NORMAL_MAX, NORMAL_STEP).show(ui)
                {
                    self.set_normal_magnification(value);
                }
                ui.end_row();
            });
    }

    /// One slider per channel, stacked r, g, b.
    fn color_controls(&mut self, ui: &mut egui::Ui) {
        for channel in 0..3 {
            let current = self.state.color[channel];
            if let Some(value) = Range::new(current, 0.0, 1.0, COLOR_STEP).show(ui) {
                self.set_color_channel(channel, value);
            }
        }
    }
}
