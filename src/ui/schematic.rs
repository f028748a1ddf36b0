use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2, pos2};

use ring_resonator::physics::ResonatorMetrics;

const WAVEGUIDE: Color32 = Color32::from_rgb(70, 130, 220);
const INPUT: Color32 = Color32::from_rgb(90, 200, 110);
const THROUGH: Color32 = Color32::from_rgb(230, 80, 80);
const RING_LIGHT: Color32 = Color32::from_rgb(240, 210, 60);

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Fraction of a lap completed at `time`, shifted by `offset` laps, in [0, 1).
fn lap_fraction(time: f64, period: f64, offset: f32) -> f32 {
    let laps = if period > 0.0 { time / period } else { 0.0 };
    (laps as f32 + offset).rem_euclid(1.0)
}

/// Point on a circle, counter-clockwise on screen from the bottom.
fn orbit_position(center: Pos2, radius: f32, fraction: f32) -> Pos2 {
    let angle = TAU * fraction + TAU / 4.0;
    pos2(center.x - radius * angle.cos(), center.y + radius * angle.sin())
}

// ---------------------------------------------------------------------------
// Device schematic with circulating light
// ---------------------------------------------------------------------------

/// Ring above a bus waveguide, light entering, circulating and leaving.
pub fn device_schematic(ui: &mut Ui, metrics: &ResonatorMetrics, period: f64) {
    let width = ui.available_width();
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, 240.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let time = ui.input(|i| i.time);

    let radius = (rect.height() * 0.32).min(width * 0.25);
    let center = pos2(rect.center().x, rect.top() + 30.0 + radius);
    let bus_y = center.y + radius + 14.0;
    let bus_left = rect.left() + 50.0;
    let bus_right = rect.right() - 60.0;
    let coupler = pos2(center.x, bus_y);

    let guide = Stroke::new(6.0, WAVEGUIDE);
    painter.circle_stroke(center, radius, guide);
    painter.line_segment([pos2(bus_left, bus_y), pos2(bus_right, bus_y)], guide);

    // Coupling region
    let gap_y = center.y + radius + 7.0;
    painter.extend(Shape::dashed_line(
        &[pos2(center.x - radius * 0.8, gap_y), pos2(center.x + radius * 0.8, gap_y)],
        Stroke::new(1.5, RING_LIGHT),
        4.0,
        3.0,
    ));

    let font = FontId::proportional(13.0);
    painter.text(
        pos2(bus_left - 6.0, bus_y),
        Align2::RIGHT_CENTER,
        "Input",
        font.clone(),
        INPUT,
    );
    painter.text(
        pos2(bus_right + 6.0, bus_y),
        Align2::LEFT_CENTER,
        "Through",
        font.clone(),
        THROUGH,
    );
    painter.text(
        pos2(center.x, center.y - radius - 10.0),
        Align2::CENTER_BOTTOM,
        "Ring Resonator",
        font.clone(),
        RING_LIGHT,
    );
    painter.text(
        pos2(center.x, bus_y + 10.0),
        Align2::CENTER_TOP,
        "Coupling Region",
        FontId::proportional(11.0),
        RING_LIGHT,
    );

    // Input light travelling towards the coupler.
    for i in 0..8 {
        let f = lap_fraction(time, period, i as f32 / 8.0);
        let x = bus_left + f * (coupler.x - bus_left);
        painter.circle_filled(pos2(x, bus_y), 3.5, INPUT);
    }

    // Light circulating in the ring.
    for i in 0..12 {
        let f = lap_fraction(time, period, i as f32 / 12.0);
        painter.circle_filled(orbit_position(center, radius, f), 3.5, RING_LIGHT);
    }

    // Through-port light, dimmed by the on-resonance transmission.
    let alpha = (metrics.on_resonance_transmission.sqrt() as f32).clamp(0.15, 1.0);
    let through = THROUGH.gamma_multiply(alpha);
    for i in 0..8 {
        let f = lap_fraction(time, period, i as f32 / 8.0);
        let x = coupler.x + f * (bus_right - coupler.x);
        painter.circle_filled(pos2(x, bus_y), 3.5, through);
    }
}

// ---------------------------------------------------------------------------
// On vs off resonance
// ---------------------------------------------------------------------------

/// Two rings side by side, glow width following the intracavity build-up.
pub fn resonance_comparison(ui: &mut Ui, metrics: &ResonatorMetrics) {
    let width = ui.available_width();
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(width, 170.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let time = ui.input(|i| i.time) as f32;

    let halves = [
        Rect::from_min_max(rect.min, pos2(rect.center().x, rect.bottom())),
        Rect::from_min_max(pos2(rect.center().x, rect.top()), rect.max),
    ];
    let cases = [
        (
            "On Resonance",
            INPUT,
            metrics.on_resonance_buildup,
            metrics.on_resonance_transmission,
        ),
        (
            "Off Resonance",
            THROUGH,
            metrics.off_resonance_buildup,
            metrics.off_resonance_transmission,
        ),
    ];

    for (half, (title, color, buildup, transmission)) in halves.iter().zip(cases) {
        let center = pos2(half.center().x, half.top() + 70.0);
        let radius = (half.width() * 0.22).min(40.0);

        painter.text(
            pos2(center.x, half.top() + 4.0),
            Align2::CENTER_TOP,
            title,
            FontId::proportional(13.0),
            color,
        );

        // Glow pulses only where light actually builds up.
        let base = (2.0 + 2.0 * buildup as f32).min(24.0);
        let pulse = if buildup > 1.0 {
            1.0 + 0.25 * (TAU * time / 0.8).sin()
        } else {
            1.0
        };
        let opacity = (0.25 + 0.08 * buildup as f32).min(0.9);
        painter.circle_stroke(
            center,
            radius,
            Stroke::new(base * pulse, RING_LIGHT.gamma_multiply(opacity)),
        );
        painter.circle_stroke(center, radius, Stroke::new(3.0, WAVEGUIDE));

        painter.text(
            pos2(center.x, center.y + radius + 14.0),
            Align2::CENTER_TOP,
            format!("build-up ×{buildup:.2}\nT = {transmission:.3}"),
            FontId::proportional(12.0),
            Color32::LIGHT_GRAY,
        );
    }
}
