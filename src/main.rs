mod app;
mod color;
mod data;
mod state;
mod ui;

use app::ScoreDashboardApp;
use data::loader::{DATA_URL, SHEET_NAME};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Evaluation Result",
        options,
        Box::new(|_cc| {
            let mut state = AppState::new(DATA_URL, SHEET_NAME);
            state.reload();
            Ok(Box::new(ScoreDashboardApp::new(state)))
        }),
    )
}
