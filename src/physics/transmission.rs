//! All-pass ring transfer function.
//!
//! With self-coupling r, round-trip amplitude a and round-trip phase φ the
//! through-port power transmission is
//!
//! ```text
//!        a² − 2ar·cos φ + r²
//! T(φ) = ───────────────────────
//!        1 − 2ar·cos φ + (ar)²
//! ```
//!
//! Both numerator and denominator are evaluated in the equivalent forms
//! `(a − r)² + 4ar·sin²(φ/2)` and `(1 − ar)² + 4ar·sin²(φ/2)`, which are
//! non-negative by construction and keep their precision near resonance.

use std::f64::consts::PI;

use crate::error::{Result, ensure_positive, ensure_unit_interval};

/// Offset added before taking the logarithm so that T = 0 maps to −100 dB.
pub const DB_OFFSET: f64 = 1e-10;

/// Round-trip phase φ = 2π n_eff L / λ.
#[inline]
pub fn round_trip_phase(wavelength: f64, effective_index: f64, round_trip_length: f64) -> f64 {
    2.0 * PI * effective_index * round_trip_length / wavelength
}

/// Shared detuning term 4ar·sin²(φ/2), equal to 2ar(1 − cos φ).
#[inline]
fn detuning(phase: f64, r: f64, a: f64) -> f64 {
    let s = (0.5 * phase).sin();
    4.0 * a * r * s * s
}

/// Transmission for a known round-trip phase. No range checks.
///
/// The denominator vanishes only for a·r = 1 at φ ≡ 0 (mod 2π); that
/// point returns 0.
#[inline]
pub fn transmission_at_phase(phase: f64, r: f64, a: f64) -> f64 {
    let d = detuning(phase, r, a);
    let denominator = (1.0 - a * r).powi(2) + d;
    if denominator <= f64::MIN_POSITIVE {
        return 0.0;
    }
    let numerator = (a - r).powi(2) + d;
    (numerator / denominator).clamp(0.0, 1.0)
}

/// Through-port transmission of a ring resonator at `wavelength`.
///
/// Returns [`crate::ResonatorError::InvalidParameter`] for a non-positive
/// wavelength, index or length, or for r / a outside [0, 1].
pub fn transmission(
    wavelength: f64,
    effective_index: f64,
    round_trip_length: f64,
    self_coupling: f64,
    round_trip_amplitude: f64,
) -> Result<f64> {
    ensure_positive("wavelength", wavelength)?;
    ensure_positive("effective_index", effective_index)?;
    ensure_positive("round_trip_length", round_trip_length)?;
    ensure_unit_interval("self_coupling", self_coupling)?;
    ensure_unit_interval("round_trip_amplitude", round_trip_amplitude)?;

    let phase = round_trip_phase(wavelength, effective_index, round_trip_length);
    Ok(transmission_at_phase(phase, self_coupling, round_trip_amplitude))
}

/// Circulating power inside the ring relative to the input power,
/// a²(1 − r²) / (1 − 2ar·cos φ + (ar)²).
///
/// Large on resonance, below one far from it. Same degenerate point as
/// [`transmission_at_phase`], which also returns 0.
pub fn intracavity_enhancement(phase: f64, r: f64, a: f64) -> f64 {
    let denominator = (1.0 - a * r).powi(2) + detuning(phase, r, a);
    if denominator <= f64::MIN_POSITIVE {
        return 0.0;
    }
    a * a * (1.0 - r * r) / denominator
}

/// Linear power ratio to decibels.
#[inline]
pub fn to_db(transmission: f64) -> f64 {
    10.0 * (transmission + DB_OFFSET).log10()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ResonatorError;

    const N_EFF: f64 = 2.4;
    const LENGTH: f64 = 2.0 * PI * 10e-6;

    fn couplings() -> Vec<f64> {
        vec![0.0, 0.1, 0.5, 0.8, 0.9, 0.95, 0.99, 0.999]
    }

    #[test]
    fn bounded_between_zero_and_one() {
        for &r in &couplings() {
            for &a in &couplings() {
                for i in 0..400 {
                    let wl = 1500e-9 + i as f64 * 0.25e-9;
                    let t = transmission(wl, N_EFF, LENGTH, r, a).unwrap();
                    assert!((0.0..=1.0).contains(&t), "T={t} for r={r} a={a}");
                }
            }
        }
    }

    #[test]
    fn matches_textbook_formula() {
        let (r, a) = (0.9, 0.95);
        for i in 0..50 {
            let phi = 0.137 * i as f64;
            let expected = (a * a - 2.0 * a * r * phi.cos() + r * r)
                / (1.0 - 2.0 * a * r * phi.cos() + (a * r).powi(2));
            assert_relative_eq!(transmission_at_phase(phi, r, a), expected, max_relative = 1e-10);
        }
    }

    #[test]
    fn periodic_in_phase() {
        let (r, a) = (0.9, 0.95);
        for i in 0..100 {
            let phi = 0.0731 * i as f64;
            assert_relative_eq!(
                transmission_at_phase(phi, r, a),
                transmission_at_phase(phi + 2.0 * PI, r, a),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn minimum_sits_on_resonance() {
        let (r, a) = (0.9, 0.95);
        // λ_m = n_eff L / m puts φ exactly on 2πm.
        let m = 97.0;
        let wl_res = N_EFF * LENGTH / m;
        assert_relative_eq!(
            round_trip_phase(wl_res, N_EFF, LENGTH),
            2.0 * PI * m,
            max_relative = 1e-12
        );
        let t_res = transmission(wl_res, N_EFF, LENGTH, r, a).unwrap();
        for k in 1..=50 {
            let dl = k as f64 * 0.01e-9;
            assert!(transmission(wl_res + dl, N_EFF, LENGTH, r, a).unwrap() > t_res);
            assert!(transmission(wl_res - dl, N_EFF, LENGTH, r, a).unwrap() > t_res);
        }
    }

    #[test]
    fn critical_coupling_extinguishes_resonance() {
        for &x in &[0.5, 0.9, 0.95, 0.99] {
            assert_relative_eq!(transmission_at_phase(0.0, x, x), 0.0, epsilon = 1e-12);
            assert_relative_eq!(transmission_at_phase(2.0 * PI * 42.0, x, x), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn off_resonance_approaches_unity_when_lossless_and_weakly_coupled() {
        let mut previous = 0.0;
        for &x in &[0.9, 0.99, 0.999, 0.9999] {
            let t = transmission_at_phase(PI, x, x);
            assert!(t > previous);
            previous = t;
        }
        assert_relative_eq!(previous, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn lossless_ring_is_all_pass() {
        for i in 1..20 {
            let phi = 0.3 * i as f64;
            assert_relative_eq!(transmission_at_phase(phi, 0.9, 1.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_point_returns_zero() {
        assert_eq!(transmission_at_phase(0.0, 1.0, 1.0), 0.0);
        assert_eq!(intracavity_enhancement(0.0, 1.0, 1.0), 0.0);
        assert!(transmission(1550e-9, N_EFF, LENGTH, 1.0, 1.0).unwrap().is_finite());
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let bad = [
            transmission(-1550e-9, N_EFF, LENGTH, 0.9, 0.95),
            transmission(0.0, N_EFF, LENGTH, 0.9, 0.95),
            transmission(1550e-9, -N_EFF, LENGTH, 0.9, 0.95),
            transmission(1550e-9, N_EFF, 0.0, 0.9, 0.95),
            transmission(1550e-9, N_EFF, LENGTH, 1.1, 0.95),
            transmission(1550e-9, N_EFF, LENGTH, 0.9, -0.05),
        ];
        for result in bad {
            assert!(matches!(result, Err(ResonatorError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn enhancement_builds_up_on_resonance() {
        let (r, a) = (0.9, 0.95);
        let on = intracavity_enhancement(0.0, r, a);
        let off = intracavity_enhancement(PI, r, a);
        assert!(on > 1.0);
        assert!(off < 1.0);
        let expected_on = a * a * (1.0 - r * r) / (1.0 - a * r).powi(2);
        assert_relative_eq!(on, expected_on, max_relative = 1e-12);
    }

    #[test]
    fn db_conversion() {
        assert_relative_eq!(to_db(1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(to_db(0.1), -10.0, epsilon = 1e-8);
        assert_relative_eq!(to_db(0.0), -100.0, epsilon = 1e-9);
    }
}
