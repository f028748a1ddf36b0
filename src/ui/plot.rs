use eframe::egui::{Align2, Color32, Ui};
use egui_plot::{Arrows, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text, VLine};

use ring_resonator::physics::{CouplingRegime, Spectrum};
use ring_resonator::scene::Scene;

use crate::state::AppState;

const CURVE: Color32 = Color32::from_rgb(90, 160, 255);
const MARKER: Color32 = Color32::from_rgb(255, 90, 90);
const FSR: Color32 = Color32::from_rgb(110, 220, 120);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// dB values clipped to the display range. Presentation only.
fn clip_db(values: &[f64], floor: f64, ceiling: f64) -> Vec<f64> {
    values.iter().map(|v| v.clamp(floor, ceiling)).collect()
}

fn db_points(spectrum: &Spectrum, floor: f64, ceiling: f64) -> PlotPoints {
    let db = clip_db(&spectrum.transmission_db(), floor, ceiling);
    spectrum
        .points()
        .iter()
        .zip(db)
        .map(|(p, y)| [p.wavelength * 1e9, y])
        .collect()
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the transmission spectrum and the coupling comparison.
pub fn spectrum_plots(ui: &mut Ui, state: &AppState) {
    let scene = match &state.scene {
        Some(scene) => scene,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No scene loaded  (see the error above)");
            });
            return;
        }
    };

    let total = ui.available_height();
    ui.heading("Transmission Spectrum");
    transmission_plot(ui, scene, total * 0.55);
    ui.separator();
    ui.heading("Coupling Regimes");
    coupling_plot(ui, scene, state);
}

/// Through-port spectrum with resonance markers and the FSR annotation.
fn transmission_plot(ui: &mut Ui, scene: &Scene, height: f32) {
    let display = &scene.config.display;
    let (floor, ceiling) = (display.db_floor, display.db_ceiling);
    let db = scene.spectrum.transmission_db();

    Plot::new("transmission_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("λ (nm)")
        .y_axis_label("T (dB)")
        .include_y(floor)
        .include_y(ceiling)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(db_points(&scene.spectrum, floor, ceiling))
                    .name("T(λ)")
                    .color(CURVE)
                    .width(2.5),
            );

            // Exact resonance nearest the centre wavelength.
            let exact_nm = scene.metrics.resonance_wavelength * 1e9;
            let band = &scene.config.sweep;
            if (band.start_nm..=band.stop_nm).contains(&exact_nm) {
                plot_ui.vline(
                    VLine::new(exact_nm)
                        .name(format!("λ_m, m = {}", scene.metrics.resonance_order))
                        .color(Color32::from_rgba_unmultiplied(200, 200, 200, 90))
                        .style(LineStyle::Dashed { length: 5.0 }),
                );
            }

            // Resonance markers
            for peak in scene.resonances.iter().take(display.annotated_peaks) {
                let x = peak.wavelength * 1e9;
                let y = db[peak.index].clamp(floor, ceiling);
                let point: PlotPoints = vec![[x, y]].into();
                plot_ui.points(
                    Points::new(point)
                        .name("resonance")
                        .color(MARKER)
                        .radius(5.0)
                        .shape(MarkerShape::Circle),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y - 1.5), format!("{x:.2} nm"))
                        .color(MARKER)
                        .anchor(Align2::CENTER_TOP),
                );
            }

            // FSR double arrow between the first two resonances
            if let (Some(first), Some(second), Some(fsr)) = (
                scene.resonances.first(),
                scene.resonances.get(1),
                scene.free_spectral_ranges.first(),
            ) {
                let y = floor + 5.0;
                let (x1, x2) = (first.wavelength * 1e9, second.wavelength * 1e9);
                let origins: PlotPoints = vec![[x1, y], [x2, y]].into();
                let tips: PlotPoints = vec![[x2, y], [x1, y]].into();
                plot_ui.arrows(Arrows::new(origins, tips).color(FSR).name("FSR"));
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.5 * (x1 + x2), y + 1.0),
                        format!("Δλ_FSR ≈ {:.2} nm", fsr * 1e9),
                    )
                    .color(FSR)
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// The same ring at several self-couplings.
fn coupling_plot(ui: &mut Ui, scene: &Scene, state: &AppState) {
    let display = &scene.config.display;
    let (floor, ceiling) = (display.db_floor, display.db_ceiling);
    let a = scene.config.resonator.round_trip_amplitude;

    Plot::new("coupling_plot")
        .legend(Legend::default())
        .x_axis_label("λ (nm)")
        .y_axis_label("T (dB)")
        .include_y(floor)
        .include_y(ceiling)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in &scene.coupling_curves {
                let r = curve.self_coupling;
                let color = state
                    .coupling_colors
                    .as_ref()
                    .map(|c| c.color_for(r))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let regime = match CouplingRegime::classify(r, a) {
                    CouplingRegime::Under => "under",
                    CouplingRegime::Critical => "critical",
                    CouplingRegime::Over => "over",
                };
                plot_ui.line(
                    Line::new(db_points(&curve.spectrum, floor, ceiling))
                        .name(format!("r = {r} ({regime})"))
                        .color(color)
                        .width(1.5),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipping_only_touches_out_of_range_values() {
        let clipped = clip_db(&[-100.0, -12.5, 0.0, 8.0], -30.0, 5.0);
        assert_eq!(clipped, vec![-30.0, -12.5, 0.0, 5.0]);
    }
}
