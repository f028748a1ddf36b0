//! Resonance detection on a sampled spectrum.
//!
//! Resonances of the all-pass ring are dips in the through-port
//! transmission. The detector works on the depth `−T_dB`, so a dip becomes
//! a local maximum:
//!
//! 1. scan for local maxima (flat tops collapse to their earliest index);
//! 2. drop maxima shallower than `min_depth_db`;
//! 3. walk the survivors deepest first and suppress every other survivor
//!    closer than `min_distance` samples;
//! 4. report what is left ordered by wavelength.

use serde::{Deserialize, Serialize};

use super::spectrum::Spectrum;

// ---------------------------------------------------------------------------
// Detector settings and result type
// ---------------------------------------------------------------------------

/// Thresholds for [`find_resonances`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakDetection {
    /// Minimum dip depth below 0 dB.
    pub min_depth_db: f64,
    /// Minimum separation between reported dips, in samples.
    pub min_distance: usize,
}

impl Default for PeakDetection {
    fn default() -> Self {
        Self {
            min_depth_db: 5.0,
            min_distance: 20,
        }
    }
}

/// A transmission dip found in a [`Spectrum`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonancePeak {
    /// Index of the sample inside the spectrum.
    pub index: usize,
    /// Wavelength in metres.
    pub wavelength: f64,
    /// Linear transmission at the dip.
    pub transmission: f64,
    /// Dip depth, −T in dB.
    pub depth_db: f64,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Find resonance dips, sorted by wavelength ascending.
pub fn find_resonances(spectrum: &Spectrum, detection: &PeakDetection) -> Vec<ResonancePeak> {
    let depth: Vec<f64> = spectrum.transmission_db().iter().map(|db| -db).collect();

    let mut candidates: Vec<usize> = local_maxima(&depth)
        .into_iter()
        .filter(|&i| depth[i] >= detection.min_depth_db)
        .collect();

    if detection.min_distance > 1 {
        candidates = enforce_distance(&candidates, &depth, detection.min_distance);
    }

    let points = spectrum.points();
    let mut peaks: Vec<ResonancePeak> = candidates
        .into_iter()
        .map(|i| ResonancePeak {
            index: i,
            wavelength: points[i].wavelength,
            transmission: points[i].transmission,
            depth_db: depth[i],
        })
        .collect();
    peaks.sort_by(|a, b| a.wavelength.total_cmp(&b.wavelength).then(a.index.cmp(&b.index)));

    for peak in &peaks {
        log::debug!(
            "resonance at {:.4} nm, T = {:.4} ({:.2} dB deep)",
            peak.wavelength * 1e9,
            peak.transmission,
            peak.depth_db
        );
    }
    peaks
}

/// Indices of strict local maxima. The first and last samples never
/// qualify; a flat top counts once, at its first index, and only if the
/// signal falls after it.
fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if x.len() < 3 {
        return maxima;
    }
    let last = x.len() - 1;

    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                maxima.push(i);
            }
            i = ahead;
        } else {
            i += 1;
        }
    }
    maxima
}

/// Keep the deepest candidates, suppressing neighbours closer than
/// `min_distance`. Candidates arrive in index order; equal depths resolve
/// to the earliest index. Output is in index order.
fn enforce_distance(candidates: &[usize], depth: &[f64], min_distance: usize) -> Vec<usize> {
    let mut by_depth: Vec<usize> = (0..candidates.len()).collect();
    // Stable sort keeps index order among equal depths.
    by_depth.sort_by(|&a, &b| depth[candidates[b]].total_cmp(&depth[candidates[a]]));

    let mut suppressed = vec![false; candidates.len()];
    let mut kept = Vec::new();
    for &slot in &by_depth {
        if suppressed[slot] {
            continue;
        }
        let centre = candidates[slot];
        kept.push(centre);
        for (other, &idx) in candidates.iter().enumerate() {
            if other != slot && idx.abs_diff(centre) < min_distance {
                suppressed[other] = true;
            }
        }
    }
    kept.sort_unstable();
    kept
}

// ---------------------------------------------------------------------------
// Free Spectral Range
// ---------------------------------------------------------------------------

/// Spacing between consecutive resonances, in metres.
pub fn free_spectral_ranges(peaks: &[ResonancePeak]) -> Vec<f64> {
    peaks
        .windows(2)
        .map(|pair| pair[1].wavelength - pair[0].wavelength)
        .collect()
}

/// Average spacing between consecutive resonances, if at least two exist.
pub fn mean_free_spectral_range(peaks: &[ResonancePeak]) -> Option<f64> {
    let fsr = free_spectral_ranges(peaks);
    if fsr.is_empty() {
        None
    } else {
        Some(fsr.iter().sum::<f64>() / fsr.len() as f64)
    }
}
