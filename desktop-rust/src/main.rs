mod app;
mod io;
mod pins;

use app::DesktopApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let records = match io::bundled_record_set() {
        Ok(records) => records,
        Err(err) => {
            tracing::error!("{err:#}");
            Default::default()
        }
    };

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Property Map",
        options,
        Box::new(|cc| Box::new(DesktopApp::new(records, &cc.egui_ctx))),
    )
}
