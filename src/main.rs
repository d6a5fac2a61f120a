mod app;
mod color;
mod data;
mod figure;
mod state;
mod ui;

use std::path::PathBuf;

use app::LaunchboardApp;
use eframe::egui;
use state::AppState;

/// Dataset loaded when no path is given on the command line.
const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

    let dataset = match data::loader::load_file(&path) {
        Ok(dataset) => dataset,
        Err(err) => {
            log::error!("failed to load {}: {err:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} launches from {} sites (payload {:.0}..{:.0} kg, booster column {:?})",
        dataset.len(),
        dataset.sites.len(),
        dataset.payload_bounds.0,
        dataset.payload_bounds.1,
        dataset.booster_column
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchboardApp::new(AppState::new(dataset))))),
    )
}
