use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use ring_resonator::physics::CouplingRegime;

use crate::state::AppState;
use crate::ui::schematic;

// ---------------------------------------------------------------------------
// Left side panel – device, equations, on/off resonance
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    let Some(scene) = &state.scene else {
        ui.label("No scene loaded.");
        return;
    };
    let params = &scene.config.resonator;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Photonic Ring Resonator");
            ui.separator();

            schematic::device_schematic(
                ui,
                &scene.metrics,
                scene.config.display.circulation_period_s,
            );
            ui.label(
                RichText::new("At resonance: light builds up in the ring")
                    .color(Color32::from_rgb(240, 210, 60)),
            );
            ui.separator();

            ui.strong("Resonance Condition & Transmission");
            ui.monospace("φ = 2π·n_eff·L / λ = 2πm");
            ui.monospace("T = (a² − 2ar·cos φ + r²) / (1 − 2ar·cos φ + (ar)²)");
            ui.add_space(4.0);
            egui::Grid::new("parameter_grid")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    let rows = [
                        ("r", "self-coupling", format!("{}", params.self_coupling)),
                        ("a", "round-trip amplitude", format!("{}", params.round_trip_amplitude)),
                        ("n_eff", "effective index", format!("{}", params.effective_index)),
                        ("L", "round-trip length", format!("{:.3} µm", params.round_trip_length * 1e6)),
                        ("λ₀", "centre wavelength", format!("{:.1} nm", params.center_wavelength * 1e9)),
                    ];
                    for (symbol, meaning, value) in rows {
                        ui.monospace(symbol);
                        ui.label(meaning);
                        ui.label(value);
                        ui.end_row();
                    }
                });
            ui.separator();

            ui.strong("On vs Off Resonance");
            schematic::resonance_comparison(ui, &scene.metrics);
            ui.separator();

            ui.strong("Resonance conditions");
            ui.label("• φ = 2πm (constructive interference in the ring)");
            ui.label("• Critical coupling: r = a");
            ui.label("• Q-factor ∝ 1 / (1 − ar)");
            let regime_color = match scene.metrics.regime {
                CouplingRegime::Critical => Color32::from_rgb(110, 220, 120),
                _ => Color32::LIGHT_GRAY,
            };
            ui.label(
                RichText::new(format!("This ring is {}", scene.metrics.regime))
                    .color(regime_color),
            );
        });
}

// ---------------------------------------------------------------------------
// Right side panel – summary tables
// ---------------------------------------------------------------------------

/// Render the figures of merit and the detected resonances.
pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Ring Resonator Summary");
    ui.separator();

    let Some(scene) = &state.scene else {
        ui.label("No scene loaded.");
        return;
    };
    let m = &scene.metrics;
    let optional = |v: Option<f64>, scale: f64, unit: &str| match v {
        Some(v) => format!("{:.3}{unit}", v * scale),
        None => "—".to_string(),
    };

    let rows: Vec<(&str, String)> = vec![
        ("Resonance order m", m.resonance_order.to_string()),
        ("λ_m = n_eff·L / m", format!("{:.3} nm", m.resonance_wavelength * 1e9)),
        ("FSR = λ² / (n_g·L)", format!("{:.3} nm", m.free_spectral_range * 1e9)),
        (
            "FSR (measured)",
            optional(scene.mean_free_spectral_range, 1e9, " nm"),
        ),
        ("Δλ_FWHM", optional(m.fwhm, 1e9, " nm")),
        ("Q = λ / Δλ_FWHM", optional(m.quality_factor, 1.0, "")),
        ("Finesse = FSR / Δλ_FWHM", optional(m.finesse, 1.0, "")),
        ("Extinction ratio", format!("{:.2} dB", m.extinction_ratio_db)),
    ];

    ui.push_id("metrics_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Quantity");
                });
                header.col(|ui| {
                    ui.strong("Value");
                });
            })
            .body(|mut body| {
                for (name, value) in &rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(*name);
                        });
                        row.col(|ui| {
                            ui.monospace(value);
                        });
                    });
                }
            });
    });

    ui.add_space(8.0);
    ui.strong(format!("Resonances in band ({})", scene.resonances.len()));
    ui.push_id("resonance_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["λ (nm)", "T", "Depth (dB)"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for peak in &scene.resonances {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.monospace(format!("{:.3}", peak.wavelength * 1e9));
                        });
                        row.col(|ui| {
                            ui.monospace(format!("{:.4}", peak.transmission));
                        });
                        row.col(|ui| {
                            ui.monospace(format!("{:.2}", peak.depth_db));
                        });
                    });
                }
            });
    });

    ui.add_space(8.0);
    ui.strong("Applications");
    for line in [
        "Optical filters & wavelength multiplexers",
        "Optical modulators & switches",
        "Biosensors & chemical sensors",
        "Optical delay lines",
    ] {
        ui.label(format!("• {line}"));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_export = state.scene.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export spectrum…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(scene) = &state.scene {
            ui.label(format!(
                "{} samples, {} resonances  –  {}",
                scene.spectrum.len(),
                scene.resonances.len(),
                state.source
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export spectrum")
        .set_file_name("spectrum.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
