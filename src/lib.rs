//! Photonic ring resonator: transmission model, resonance detection and
//! spectrum export.
//!
//! The numeric core lives in [`physics`]; [`config`] describes a scene and
//! [`export`] writes the spectrum artifact. The `ring-resonator` binary
//! renders the scene with eframe, `export_spectrum` writes it headless.

pub mod config;
pub mod error;
pub mod export;
pub mod physics;
pub mod scene;

pub use error::{ResonatorError, Result};
