//! Application entry point for the geotechnical scene viewer.
//!
//! This binary sets up eframe/egui and delegates the animation loop,
//! input handling and rendering to [`Viewer`] from the `viewer` module.

mod panels;
mod render;
mod stats;
mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("starting geoscene viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Geotech Neural Scene",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}
