//! Headless export of the ring resonator spectrum.
//!
//! Usage: `export_spectrum [OUTPUT] [SCENE.json]`
//!
//! OUTPUT defaults to `spectrum.csv`; its extension picks the format
//! (`csv`, `json`, `parquet`). The scene file falls back to
//! `RING_RESONATOR_CONFIG`, then to the built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};

use ring_resonator::config::SceneConfig;
use ring_resonator::export::export_spectrum;
use ring_resonator::scene::Scene;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("spectrum.csv"));
    let scene_path = args.next().map(PathBuf::from);

    let (config, source) = SceneConfig::resolve(scene_path)?;
    let scene = Scene::build(config).with_context(|| format!("building scene from {source}"))?;
    export_spectrum(&output, &scene)
        .with_context(|| format!("exporting to {}", output.display()))?;

    let metrics = &scene.metrics;
    println!(
        "Wrote {} samples ({} resonances) to {}",
        scene.spectrum.len(),
        scene.resonances.len(),
        output.display()
    );
    println!(
        "m = {}, λ_m = {:.3} nm, FSR = {:.3} nm, {}",
        metrics.resonance_order,
        metrics.resonance_wavelength * 1e9,
        metrics.free_spectral_range * 1e9,
        metrics.regime
    );
    if let (Some(q), Some(f)) = (metrics.quality_factor, metrics.finesse) {
        println!("Q = {q:.0}, finesse = {f:.1}");
    }
    Ok(())
}
