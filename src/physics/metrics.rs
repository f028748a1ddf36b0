//! Figures of merit derived from the ring parameters.
//!
//! Group index is approximated by the effective index (n_g ≈ n_eff), which
//! is also what the spacing of the modelled resonances obeys since the
//! model has no dispersion.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::error::{ResonatorError, Result, ensure_positive};

use super::params::ResonatorParameters;
use super::transmission::{intracavity_enhancement, to_db, transmission_at_phase};

/// |r − a| below which the ring counts as critically coupled.
pub const CRITICAL_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Coupling regime
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CouplingRegime {
    /// Coupler weaker than the loss (r > a).
    Under,
    /// r = a, resonance fully extinguished.
    Critical,
    /// Coupler stronger than the loss (r < a).
    Over,
}

impl CouplingRegime {
    pub fn classify(self_coupling: f64, round_trip_amplitude: f64) -> Self {
        let diff = self_coupling - round_trip_amplitude;
        if diff.abs() <= CRITICAL_TOLERANCE {
            CouplingRegime::Critical
        } else if diff > 0.0 {
            CouplingRegime::Under
        } else {
            CouplingRegime::Over
        }
    }
}

impl fmt::Display for CouplingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouplingRegime::Under => write!(f, "under-coupled (r > a)"),
            CouplingRegime::Critical => write!(f, "critically coupled (r = a)"),
            CouplingRegime::Over => write!(f, "over-coupled (r < a)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Closed-form quantities
// ---------------------------------------------------------------------------

/// Integer order m whose resonance λ_m = n_eff L / m lies closest to `wavelength`.
pub fn resonance_order(params: &ResonatorParameters, wavelength: f64) -> Result<u32> {
    ensure_positive("wavelength", wavelength)?;
    let m = (params.optical_path_length() / wavelength).round().max(1.0);
    Ok(m as u32)
}

/// Exact resonance wavelength of order `m`.
pub fn resonance_wavelength(params: &ResonatorParameters, order: u32) -> Result<f64> {
    if order == 0 {
        return Err(ResonatorError::invalid(
            "order",
            0.0,
            "resonance order starts at 1",
        ));
    }
    Ok(params.optical_path_length() / order as f64)
}

/// FSR ≈ λ² / (n_g L).
pub fn analytic_fsr(params: &ResonatorParameters, wavelength: f64) -> f64 {
    wavelength * wavelength / (params.effective_index * params.round_trip_length)
}

/// Resonance full width at half depth, (1 − ra) λ² / (π n_g L √(ra)).
///
/// `None` when the width is undefined (ra = 0) or zero (ra = 1).
pub fn fwhm(params: &ResonatorParameters, wavelength: f64) -> Option<f64> {
    let ra = params.self_coupling * params.round_trip_amplitude;
    if ra <= 0.0 || ra >= 1.0 {
        return None;
    }
    Some(
        (1.0 - ra) * wavelength * wavelength
            / (PI * params.effective_index * params.round_trip_length * ra.sqrt()),
    )
}

// ---------------------------------------------------------------------------
// ResonatorMetrics – everything the summary shows
// ---------------------------------------------------------------------------

/// Figures of merit evaluated at the resonance nearest the centre wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResonatorMetrics {
    pub regime: CouplingRegime,
    pub resonance_order: u32,
    /// Exact resonance wavelength, metres.
    pub resonance_wavelength: f64,
    /// Free spectral range, metres.
    pub free_spectral_range: f64,
    pub fwhm: Option<f64>,
    /// λ / FWHM.
    pub quality_factor: Option<f64>,
    /// FSR / FWHM.
    pub finesse: Option<f64>,
    pub on_resonance_transmission: f64,
    pub off_resonance_transmission: f64,
    pub extinction_ratio_db: f64,
    /// Circulating / input power on resonance.
    pub on_resonance_buildup: f64,
    /// Circulating / input power half an FSR away.
    pub off_resonance_buildup: f64,
}

impl ResonatorMetrics {
    pub fn compute(params: &ResonatorParameters) -> Result<Self> {
        params.validate()?;
        let (r, a) = (params.self_coupling, params.round_trip_amplitude);

        let order = resonance_order(params, params.center_wavelength)?;
        let wavelength = resonance_wavelength(params, order)?;
        let free_spectral_range = analytic_fsr(params, wavelength);
        let width = fwhm(params, wavelength);

        let on = transmission_at_phase(0.0, r, a);
        let off = transmission_at_phase(PI, r, a);

        Ok(Self {
            regime: CouplingRegime::classify(r, a),
            resonance_order: order,
            resonance_wavelength: wavelength,
            free_spectral_range,
            fwhm: width,
            quality_factor: width.map(|w| wavelength / w),
            finesse: width.map(|w| free_spectral_range / w),
            on_resonance_transmission: on,
            off_resonance_transmission: off,
            extinction_ratio_db: to_db(off) - to_db(on),
            on_resonance_buildup: intracavity_enhancement(0.0, r, a),
            off_resonance_buildup: intracavity_enhancement(PI, r, a),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::physics::spectrum::{Spectrum, WavelengthBand};

    #[test]
    fn regimes() {
        assert_eq!(CouplingRegime::classify(0.9, 0.95), CouplingRegime::Over);
        assert_eq!(CouplingRegime::classify(0.97, 0.95), CouplingRegime::Under);
        assert_eq!(CouplingRegime::classify(0.95, 0.95), CouplingRegime::Critical);
        assert_eq!(
            CouplingRegime::classify(0.95 + 1e-12, 0.95),
            CouplingRegime::Critical
        );
    }

    #[test]
    fn nearest_order_to_c_band_centre() {
        let params = ResonatorParameters::default();
        assert_eq!(resonance_order(&params, 1550e-9).unwrap(), 97);
        let wl = resonance_wavelength(&params, 97).unwrap();
        assert_relative_eq!(wl, 1554.6e-9, max_relative = 1e-4);
        assert!(resonance_wavelength(&params, 0).is_err());
        assert!(resonance_order(&params, 0.0).is_err());
    }

    #[test]
    fn finesse_depends_only_on_round_trip_product() {
        let params = ResonatorParameters::default();
        let metrics = ResonatorMetrics::compute(&params).unwrap();
        let ra: f64 = 0.9 * 0.95;
        let expected = PI * ra.sqrt() / (1.0 - ra);
        assert_relative_eq!(metrics.finesse.unwrap(), expected, max_relative = 1e-9);
        assert_relative_eq!(
            metrics.quality_factor.unwrap(),
            metrics.resonance_wavelength / metrics.fwhm.unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn fwhm_matches_sampled_dip() {
        let params = ResonatorParameters::default();
        let metrics = ResonatorMetrics::compute(&params).unwrap();
        let centre = metrics.resonance_wavelength;
        let band = WavelengthBand::new(centre - 3e-9, centre + 3e-9, 60001).unwrap();
        let spectrum = Spectrum::sample(&params, &band).unwrap();

        let half = 0.5 * (1.0 + metrics.on_resonance_transmission);
        let inside: Vec<f64> = spectrum
            .points()
            .iter()
            .filter(|p| p.transmission <= half)
            .map(|p| p.wavelength)
            .collect();
        let measured = inside.last().unwrap() - inside.first().unwrap();
        assert_relative_eq!(measured, metrics.fwhm.unwrap(), max_relative = 0.02);
    }

    #[test]
    fn critical_coupling_has_infinite_extinction() {
        let params = ResonatorParameters::default().with_self_coupling(0.95).unwrap();
        let metrics = ResonatorMetrics::compute(&params).unwrap();
        assert_eq!(metrics.regime, CouplingRegime::Critical);
        assert!(metrics.on_resonance_transmission < 1e-12);
        assert!(metrics.extinction_ratio_db > 90.0);
    }

    #[test]
    fn buildup_contrasts_on_and_off_resonance() {
        let metrics = ResonatorMetrics::compute(&ResonatorParameters::default()).unwrap();
        assert!(metrics.on_resonance_buildup > 5.0);
        assert!(metrics.off_resonance_buildup < 0.2);
        assert!(metrics.extinction_ratio_db > 9.0);
    }

    #[test]
    fn lossless_critical_ring_has_no_width() {
        let params = ResonatorParameters {
            self_coupling: 1.0,
            round_trip_amplitude: 1.0,
            ..Default::default()
        };
        let metrics = ResonatorMetrics::compute(&params).unwrap();
        assert_eq!(metrics.fwhm, None);
        assert_eq!(metrics.quality_factor, None);
        assert_eq!(metrics.on_resonance_transmission, 0.0);
    }
}
