use serde::{Deserialize, Serialize};

use crate::error::{ResonatorError, Result, ensure_positive};

use super::params::ResonatorParameters;
use super::transmission::to_db;

// ---------------------------------------------------------------------------
// Sweep grid
// ---------------------------------------------------------------------------

/// Generates `n` linearly spaced samples in [start, stop].
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// A uniformly sampled wavelength range, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavelengthBand {
    pub start: f64,
    pub stop: f64,
    pub samples: usize,
}

impl Default for WavelengthBand {
    fn default() -> Self {
        Self {
            start: 1540e-9,
            stop: 1560e-9,
            samples: 1000,
        }
    }
}

impl WavelengthBand {
    pub fn new(start: f64, stop: f64, samples: usize) -> Result<Self> {
        let band = Self {
            start,
            stop,
            samples,
        };
        band.validate()?;
        Ok(band)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("band.start", self.start)?;
        ensure_positive("band.stop", self.stop)?;
        if self.stop <= self.start {
            return Err(ResonatorError::invalid(
                "band.stop",
                self.stop,
                "must be greater than band.start",
            ));
        }
        if self.samples < 2 {
            return Err(ResonatorError::invalid(
                "band.samples",
                self.samples as f64,
                "need at least two samples",
            ));
        }
        Ok(())
    }

    /// Spacing between adjacent samples.
    pub fn step(&self) -> f64 {
        (self.stop - self.start) / (self.samples as f64 - 1.0)
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.samples)
    }
}

// ---------------------------------------------------------------------------
// Spectrum – sampled transmission
// ---------------------------------------------------------------------------

/// One sample of the transmission spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Wavelength in metres.
    pub wavelength: f64,
    /// Linear through-port power transmission, in [0, 1].
    pub transmission: f64,
}

/// Transmission sampled over a band, ordered by wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    points: Vec<SpectrumPoint>,
}

impl Spectrum {
    /// Evaluate the model of `params` at every wavelength of `band`.
    pub fn sample(params: &ResonatorParameters, band: &WavelengthBand) -> Result<Self> {
        params.validate()?;
        band.validate()?;

        let points = band
            .wavelengths()
            .into_iter()
            .map(|wavelength| SpectrumPoint {
                wavelength,
                transmission: params.transmission_unchecked(wavelength),
            })
            .collect();
        Ok(Self { points })
    }

    /// Wrap externally produced samples. Callers keep them ordered.
    pub fn from_points(points: Vec<SpectrumPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.wavelength).collect()
    }

    pub fn transmissions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.transmission).collect()
    }

    /// Transmission in dB, 10·log10(T + 1e-10). No floor is applied.
    pub fn transmission_db(&self) -> Vec<f64> {
        self.points.iter().map(|p| to_db(p.transmission)).collect()
    }

    /// Lowest sample, by transmission.
    pub fn min_transmission(&self) -> Option<SpectrumPoint> {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| a.transmission.total_cmp(&b.transmission))
    }

    /// Highest sample, by transmission.
    pub fn max_transmission(&self) -> Option<SpectrumPoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.transmission.total_cmp(&b.transmission))
    }
}
