mod app;
mod color;
mod state;
mod ui;

use app::RingResonatorApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let state = AppState::from_args_or_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Photonic Ring Resonator",
        options,
        Box::new(|_cc| Ok(Box::new(RingResonatorApp::new(state)))),
    )
}
