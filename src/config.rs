use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{self, ResonatorError, ensure_unit_interval};
use crate::physics::{PeakDetection, ResonatorParameters, WavelengthBand};

/// Environment variable consulted when no config path is given on the command line.
pub const CONFIG_ENV: &str = "RING_RESONATOR_CONFIG";

// ---------------------------------------------------------------------------
// Scene configuration – everything the viewer and exporter render
// ---------------------------------------------------------------------------

/// A complete scene description. Every section falls back to its defaults,
/// so a file only needs the values it changes:
///
/// ```json
/// {
///   "resonator": { "self_coupling": 0.95 },
///   "sweep": { "start_nm": 1500.0, "stop_nm": 1620.0, "samples": 6001 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub resonator: ResonatorParameters,
    pub sweep: SweepConfig,
    pub detection: PeakDetection,
    pub display: DisplayConfig,
}

/// Wavelength sweep, in nanometres for readability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub start_nm: f64,
    pub stop_nm: f64,
    pub samples: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_nm: 1540.0,
            stop_nm: 1560.0,
            samples: 1000,
        }
    }
}

impl SweepConfig {
    /// The sweep as a band in metres, validated.
    pub fn band(&self) -> error::Result<WavelengthBand> {
        WavelengthBand::new(self.start_nm * 1e-9, self.stop_nm * 1e-9, self.samples)
    }
}

/// Presentation-only settings. None of these change the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Lower clip of the dB plot.
    pub db_floor: f64,
    /// Upper clip of the dB plot.
    pub db_ceiling: f64,
    /// How many resonances get a marker.
    pub annotated_peaks: usize,
    /// Self-coupling values overlaid in the coupling comparison plot.
    pub comparison_couplings: Vec<f64>,
    /// Seconds per lap of the light circulating in the schematic.
    pub circulation_period_s: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            db_floor: -30.0,
            db_ceiling: 5.0,
            annotated_peaks: 3,
            comparison_couplings: vec![0.8, 0.95, 0.99],
            circulation_period_s: 1.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl SceneConfig {
    /// Read and validate a JSON scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene file {}", path.display()))?;
        let config: SceneConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing scene file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating scene file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the scene source: first CLI argument, then
    /// [`CONFIG_ENV`], then built-in defaults.
    ///
    /// Returns the config together with a short description of where it
    /// came from, for the status line.
    pub fn from_args_or_env() -> Result<(Self, String)> {
        Self::resolve(std::env::args_os().nth(1).map(PathBuf::from))
    }

    /// Like [`SceneConfig::from_args_or_env`] with an explicit path in place
    /// of the first CLI argument.
    pub fn resolve(path: Option<PathBuf>) -> Result<(Self, String)> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                let config = Self::load(&path)?;
                log::info!("Loaded scene from {}", path.display());
                Ok((config, path.display().to_string()))
            }
            None => {
                log::info!("No scene file given, using built-in defaults");
                Ok((Self::default(), "built-in defaults".to_string()))
            }
        }
    }

    /// Check the model inputs and the display settings.
    pub fn validate(&self) -> error::Result<()> {
        self.resonator.validate()?;
        self.sweep.band()?;
        for &r in &self.display.comparison_couplings {
            ensure_unit_interval("display.comparison_couplings", r)?;
        }
        if self.display.db_floor >= self.display.db_ceiling {
            return Err(ResonatorError::invalid(
                "display.db_floor",
                self.display.db_floor,
                "must be below display.db_ceiling",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: SceneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let json = r#"{
            "resonator": { "self_coupling": 0.95 },
            "sweep": { "samples": 6001 },
            "detection": { "min_distance": 5 }
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.resonator.self_coupling, 0.95);
        assert_eq!(config.resonator.round_trip_amplitude, 0.95);
        assert_eq!(config.resonator.effective_index, 2.4);
        assert_eq!(config.sweep.samples, 6001);
        assert_eq!(config.sweep.start_nm, 1540.0);
        assert_eq!(config.detection.min_distance, 5);
        assert_eq!(config.detection.min_depth_db, 5.0);
    }

    #[test]
    fn bundled_scenes_are_valid() {
        for text in [
            include_str!("../scenes/fsr_survey.json"),
            include_str!("../scenes/critical_coupling.json"),
        ] {
            let config: SceneConfig = serde_json::from_str(text).unwrap();
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn sweep_converts_to_metres() {
        let band = SweepConfig::default().band().unwrap();
        assert_relative_eq!(band.start, 1540e-9, max_relative = 1e-12);
        assert_relative_eq!(band.stop, 1560e-9, max_relative = 1e-12);
        assert_eq!(band.samples, 1000);
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut config = SceneConfig::default();
        config.display.comparison_couplings.push(1.2);
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.display.db_floor = 10.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.sweep.stop_nm = 1500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_file_and_reports_errors() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("scene.json");
        let mut file = std::fs::File::create(&good).unwrap();
        write!(file, r#"{{ "resonator": {{ "round_trip_amplitude": 0.99 }} }}"#).unwrap();
        let config = SceneConfig::load(&good).unwrap();
        assert_eq!(config.resonator.round_trip_amplitude, 0.99);

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{ "resonator": { "self_coupling": 2.0 } }"#).unwrap();
        let err = SceneConfig::load(&invalid).unwrap_err();
        assert!(format!("{err:#}").contains("self_coupling"));

        let missing = dir.path().join("missing.json");
        assert!(SceneConfig::load(&missing).is_err());
        assert!(SceneConfig::resolve(Some(missing)).is_err());

        let (resolved, source) = SceneConfig::resolve(Some(good.clone())).unwrap();
        assert_eq!(resolved, config);
        assert_eq!(source, good.display().to_string());

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "not json").unwrap();
        assert!(SceneConfig::load(&garbage).is_err());
    }
}
