mod timing;

use crate::assets::fetcher_for_root;
use crate::config::{AppConfig, ConfigError};
use crate::render::{paint_preview, SceneEngine};
use crate::ui::Panel;
use timing::FrameTiming;

use std::time::Instant;

const TITLE: &str = "Material Panel";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("window system error: {0}")]
    Ui(#[from] eframe::Error),
}

pub struct App {
    panel: Panel<SceneEngine>,
    timing: FrameTiming,
}

impl App {
    fn new(config: &AppConfig) -> Self {
        let mut panel = Panel::new(config);
        panel.begin_loading(fetcher_for_root(&config.asset_root, config.load_timeout()));
        Self {
            panel,
            timing: FrameTiming::new(TITLE.to_string()),
        }
    }

    fn draw_surface(&mut self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());
        self.panel.resize(rect.width(), rect.height());

        // A drag may only begin over the bare surface, not under a window.
        let start_area = if response.hovered() {
            rect
        } else {
            egui::Rect::NOTHING
        };
        let panel = &mut self.panel;
        ui.input(|input| panel.handle_pointer(input, start_area));

        let dt = self.timing.frame_dt;
        if let Some(engine) = self.panel.library_mut() {
            engine.tick(dt);
        }
        match self.panel.library() {
            Some(engine) => paint_preview(engine, ui.painter(), rect),
            None => {
                ui.painter().rect_filled(rect, 0.0, egui::Color32::from_gray(16));
                if self.panel.load_state() == &crate::ui::LoadState::Loading {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Loading assets...",
                        egui::FontId::proportional(18.0),
                        egui::Color32::GRAY,
                    );
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(title) = self.timing.update(Instant::now()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
        self.panel.poll();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_surface(ui));
        self.panel.show(ctx);

        ctx.request_repaint();
    }
}

pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("{} starting", TITLE);

    let config = AppConfig::from_args_and_env()?;
    let surface = crate::render::Surface::new(config.surface_width, config.surface_height);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(surface.size())
            .with_title(TITLE),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(&config)))),
    )?;

    log::info!("Goodbye");
    Ok(())
}
