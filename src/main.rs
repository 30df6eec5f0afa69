mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::BikeDashApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Interactive dashboard over daily and hourly bike rental counts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Day-level rentals CSV.
    #[arg(long, default_value = "dashboard/day_data.csv")]
    day_csv: PathBuf,

    /// Hour-level rentals CSV.
    #[arg(long, default_value = "dashboard/hour_data.csv")]
    hour_csv: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    for path in [&args.day_csv, &args.hour_csv] {
        if !path.exists() {
            log::warn!("{} not found, use File → Open to pick it", path.display());
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let state = AppState::new(args.day_csv, args.hour_csv);
    eframe::run_native(
        "Bike Rentals Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BikeDashApp::new(state)))),
    )
}
