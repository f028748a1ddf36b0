use crate::config::SceneConfig;
use crate::error::Result;
use crate::physics::peaks::mean_free_spectral_range;
use crate::physics::{
    ResonancePeak, ResonatorMetrics, Spectrum, find_resonances, free_spectral_ranges,
};

// ---------------------------------------------------------------------------
// Scene – all numbers the viewer and exporter show, computed once
// ---------------------------------------------------------------------------

/// Spectrum of the same ring with a different self-coupling.
#[derive(Debug, Clone)]
pub struct CouplingCurve {
    pub self_coupling: f64,
    pub spectrum: Spectrum,
}

/// Results derived from a [`SceneConfig`]. Immutable once built.
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: SceneConfig,
    pub spectrum: Spectrum,
    /// Resonances ordered by wavelength.
    pub resonances: Vec<ResonancePeak>,
    /// Consecutive resonance spacings, metres.
    pub free_spectral_ranges: Vec<f64>,
    pub mean_free_spectral_range: Option<f64>,
    pub metrics: ResonatorMetrics,
    pub coupling_curves: Vec<CouplingCurve>,
}

impl Scene {
    pub fn build(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let band = config.sweep.band()?;
        let params = &config.resonator;

        let spectrum = Spectrum::sample(params, &band)?;
        let resonances = find_resonances(&spectrum, &config.detection);
        let fsr = free_spectral_ranges(&resonances);
        let mean_fsr = mean_free_spectral_range(&resonances);
        let metrics = ResonatorMetrics::compute(params)?;

        let coupling_curves = config
            .display
            .comparison_couplings
            .iter()
            .map(|&r| -> Result<CouplingCurve> {
                let variant = params.with_self_coupling(r)?;
                Ok(CouplingCurve {
                    self_coupling: r,
                    spectrum: Spectrum::sample(&variant, &band)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Scene: n_eff = {}, L = {:.3} µm, r = {}, a = {} ({})",
            params.effective_index,
            params.round_trip_length * 1e6,
            params.self_coupling,
            params.round_trip_amplitude,
            metrics.regime
        );
        log::info!(
            "{} samples over {:.1}–{:.1} nm, {} resonances",
            spectrum.len(),
            band.start * 1e9,
            band.stop * 1e9,
            resonances.len()
        );
        match mean_fsr {
            Some(fsr) => log::info!("Measured FSR {:.3} nm", fsr * 1e9),
            None => log::warn!(
                "Fewer than two resonances in band, FSR not measurable (analytic {:.3} nm)",
                metrics.free_spectral_range * 1e9
            ),
        }

        Ok(Self {
            config,
            spectrum,
            resonances,
            free_spectral_ranges: fsr,
            mean_free_spectral_range: mean_fsr,
            metrics,
            coupling_curves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SweepConfig;

    #[test]
    fn default_scene_matches_original_layout() {
        let scene = Scene::build(SceneConfig::default()).unwrap();
        assert_eq!(scene.spectrum.len(), 1000);
        assert_eq!(scene.resonances.len(), 1);
        assert!(scene.mean_free_spectral_range.is_none());
        assert_eq!(scene.coupling_curves.len(), 3);
        assert_eq!(scene.metrics.resonance_order, 97);
    }

    #[test]
    fn wide_sweep_measures_fsr() {
        let config = SceneConfig {
            sweep: SweepConfig {
                start_nm: 1500.0,
                stop_nm: 1620.0,
                samples: 6001,
            },
            ..Default::default()
        };
        let scene = Scene::build(config).unwrap();
        assert_eq!(scene.free_spectral_ranges.len(), scene.resonances.len() - 1);
        let measured = scene.mean_free_spectral_range.unwrap();
        let analytic = scene.metrics.free_spectral_range;
        assert!((measured - analytic).abs() / analytic < 0.05);
    }

    #[test]
    fn invalid_comparison_coupling_fails() {
        let mut config = SceneConfig::default();
        config.display.comparison_couplings = vec![-0.5];
        assert!(Scene::build(config).is_err());
    }
}
