/// Numeric core: the ring resonator model and everything derived from it.
///
/// Architecture:
/// ```text
///  ResonatorParameters
///        │
///        ▼
///   ┌──────────────┐
///   │ transmission  │  λ → φ → T(φ), pure kernel
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ spectrum  │  uniform band sweep → Vec<SpectrumPoint>
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  peaks    │   │ metrics   │  FSR, FWHM, Q, finesse
///   └──────────┘   └──────────┘
/// ```

pub mod metrics;
pub mod params;
pub mod peaks;
pub mod spectrum;
pub mod transmission;

pub use metrics::{CouplingRegime, ResonatorMetrics};
pub use params::ResonatorParameters;
pub use peaks::{PeakDetection, ResonancePeak, find_resonances, free_spectral_ranges};
pub use spectrum::{Spectrum, SpectrumPoint, WavelengthBand};
pub use transmission::transmission;
