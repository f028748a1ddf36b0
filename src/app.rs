use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RingResonatorApp {
    pub state: AppState,
}

impl RingResonatorApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RingResonatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: schematic and equations ----
        egui::SidePanel::left("device_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Right side panel: summary ----
        egui::SidePanel::right("summary_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::summary_panel(ui, &self.state);
            });

        // ---- Central panel: spectra ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectrum_plots(ui, &self.state);
        });

        // The schematic animates continuously.
        ctx.request_repaint();
    }
}
