//! Material Panel
//!
//! A single 3D surface showing one lit, slowly rotating object inside a
//! skybox, plus a small control panel editing the object's material live.
//! Asset catalogs are fetched on worker threads; the panel stays hidden
//! until all of them arrive.

mod app;
mod assets;
mod config;
mod render;
mod ui;

fn main() {
    if let Err(err) = app::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
