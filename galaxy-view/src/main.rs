//! Application entry point for the galaxy viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging is configured through `RUST_LOG` (e.g. `RUST_LOG=debug` to see
/// per-generation timings). The window is titled `"Galaxy Generator"`.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    log::info!("starting galaxy viewer");
    eframe::run_native(
        "Galaxy Generator",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
