mod app;
mod io;
mod model;
mod telemetry;

use app::{configure_fonts, DesktopApp};

fn main() -> eframe::Result<()> {
    if let Err(err) = telemetry::init() {
        eprintln!("{err:#}");
    }

    let config = io::load_config(io::config_override_path().as_deref());
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "FAI Inspection Checklist",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new(config))
        }),
    )
}
