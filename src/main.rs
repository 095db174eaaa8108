//! Interactive Time-Series Chart
//!
//! A GUI application for exploring a time series with bucketed aggregation,
//! year drill-down, and PNG export.

use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use timechart::app::{App, AppWrapper};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Initialize the Tokio runtime; UI callbacks spawn fetches onto it
    let rt = Runtime::new()?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 700.0])
                .with_min_inner_size([700.0, 500.0])
                .with_title("Interactive Chart"),
            ..Default::default()
        };

        if let Err(e) = eframe::run_native(
            "Interactive Chart",
            options,
            Box::new(|cc| {
                let fonts = egui::FontDefinitions::default();
                cc.egui_ctx.set_fonts(fonts);

                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::default()));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        ) {
            eprintln!("Error running application: {}", e);
        }
    });
    Ok(())
}
