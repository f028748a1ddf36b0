use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_positive, ensure_unit_interval};

use super::metrics::CouplingRegime;
use super::transmission::{round_trip_phase, transmission_at_phase};

// ---------------------------------------------------------------------------
// ResonatorParameters – the physical description of one ring
// ---------------------------------------------------------------------------

/// Physical parameters of an all-pass ring resonator. SI units throughout.
///
/// The record is built once (from defaults or a scene file) and never
/// mutated; variants for comparison plots are derived with
/// [`ResonatorParameters::with_self_coupling`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonatorParameters {
    /// Modal effective index n_eff.
    pub effective_index: f64,
    /// Physical length of one trip around the ring, in metres.
    pub round_trip_length: f64,
    /// Amplitude left in the bus waveguide after the coupler (r).
    pub self_coupling: f64,
    /// Amplitude retained after one loop (a), 1 means lossless.
    pub round_trip_amplitude: f64,
    /// Wavelength the scene is centred on, in metres.
    pub center_wavelength: f64,
}

impl Default for ResonatorParameters {
    /// Silicon ring, 10 µm radius, slightly under-coupled, C-band.
    fn default() -> Self {
        Self {
            effective_index: 2.4,
            round_trip_length: 2.0 * PI * 10e-6,
            self_coupling: 0.9,
            round_trip_amplitude: 0.95,
            center_wavelength: 1550e-9,
        }
    }
}

impl ResonatorParameters {
    /// Build and validate a parameter record.
    pub fn new(
        effective_index: f64,
        round_trip_length: f64,
        self_coupling: f64,
        round_trip_amplitude: f64,
        center_wavelength: f64,
    ) -> Result<Self> {
        let params = Self {
            effective_index,
            round_trip_length,
            self_coupling,
            round_trip_amplitude,
            center_wavelength,
        };
        params.validate()?;
        Ok(params)
    }

    /// Circular ring of the given radius (L = 2πR).
    pub fn from_ring_radius(
        effective_index: f64,
        radius: f64,
        self_coupling: f64,
        round_trip_amplitude: f64,
        center_wavelength: f64,
    ) -> Result<Self> {
        ensure_positive("radius", radius)?;
        Self::new(
            effective_index,
            2.0 * PI * radius,
            self_coupling,
            round_trip_amplitude,
            center_wavelength,
        )
    }

    /// Check every field against its physical domain.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("effective_index", self.effective_index)?;
        ensure_positive("round_trip_length", self.round_trip_length)?;
        ensure_unit_interval("self_coupling", self.self_coupling)?;
        ensure_unit_interval("round_trip_amplitude", self.round_trip_amplitude)?;
        ensure_positive("center_wavelength", self.center_wavelength)?;
        Ok(())
    }

    /// Same ring with a different coupler.
    pub fn with_self_coupling(&self, self_coupling: f64) -> Result<Self> {
        let params = Self {
            self_coupling,
            ..*self
        };
        params.validate()?;
        Ok(params)
    }

    /// Radius of the equivalent circular ring.
    pub fn ring_radius(&self) -> f64 {
        self.round_trip_length / (2.0 * PI)
    }

    /// Optical path length n_eff · L.
    pub fn optical_path_length(&self) -> f64 {
        self.effective_index * self.round_trip_length
    }

    /// Round-trip phase φ = 2π n_eff L / λ.
    pub fn round_trip_phase(&self, wavelength: f64) -> f64 {
        round_trip_phase(wavelength, self.effective_index, self.round_trip_length)
    }

    /// Through-port transmission at `wavelength`, validated.
    pub fn transmission(&self, wavelength: f64) -> Result<f64> {
        self.validate()?;
        ensure_positive("wavelength", wavelength)?;
        Ok(self.transmission_unchecked(wavelength))
    }

    /// Through-port transmission for an already validated record.
    pub(crate) fn transmission_unchecked(&self, wavelength: f64) -> f64 {
        transmission_at_phase(
            self.round_trip_phase(wavelength),
            self.self_coupling,
            self.round_trip_amplitude,
        )
    }

    pub fn coupling_regime(&self) -> CouplingRegime {
        CouplingRegime::classify(self.self_coupling, self.round_trip_amplitude)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ResonatorError;

    #[test]
    fn defaults_describe_ten_micron_ring() {
        let p = ResonatorParameters::default();
        assert!(p.validate().is_ok());
        assert_relative_eq!(p.ring_radius(), 10e-6, max_relative = 1e-12);
        assert_relative_eq!(p.optical_path_length(), 2.4 * 2.0 * PI * 10e-6, max_relative = 1e-12);
    }

    #[test]
    fn from_ring_radius_matches_defaults() {
        let p = ResonatorParameters::from_ring_radius(2.4, 10e-6, 0.9, 0.95, 1550e-9).unwrap();
        assert_eq!(p, ResonatorParameters::default());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let cases = [
            ResonatorParameters::new(0.0, 1e-5, 0.9, 0.9, 1.55e-6),
            ResonatorParameters::new(2.4, -1e-5, 0.9, 0.9, 1.55e-6),
            ResonatorParameters::new(2.4, 1e-5, 1.2, 0.9, 1.55e-6),
            ResonatorParameters::new(2.4, 1e-5, 0.9, -0.1, 1.55e-6),
            ResonatorParameters::new(2.4, 1e-5, 0.9, 0.9, 0.0),
        ];
        for case in cases {
            assert!(matches!(case, Err(ResonatorError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn with_self_coupling_keeps_the_rest() {
        let base = ResonatorParameters::default();
        let critical = base.with_self_coupling(0.95).unwrap();
        assert_eq!(critical.round_trip_amplitude, base.round_trip_amplitude);
        assert_eq!(critical.round_trip_length, base.round_trip_length);
        assert_eq!(critical.coupling_regime(), CouplingRegime::Critical);
        assert!(base.with_self_coupling(1.01).is_err());
    }

    #[test]
    fn transmission_rejects_negative_wavelength() {
        let p = ResonatorParameters::default();
        assert!(p.transmission(-1550e-9).is_err());
        assert!(p.transmission(1550e-9).is_ok());
    }
}
