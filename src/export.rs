use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use crate::error::ResonatorError;
use crate::physics::transmission::to_db;
use crate::physics::{ResonancePeak, ResonatorMetrics, ResonatorParameters};
use crate::scene::Scene;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write the scene's spectrum to a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – `wavelength_nm,transmission,transmission_db`, one row per sample
/// * `.json`    – parameters, samples, resonances and figures of merit
/// * `.parquet` – three Float64 columns, same names as the CSV header
pub fn export_spectrum(path: &Path, scene: &Scene) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(path, scene),
        "json" => write_json(path, scene),
        "parquet" | "pq" => write_parquet(path, scene),
        other => Err(ResonatorError::UnsupportedFormat(other.to_string()).into()),
    }?;

    log::info!(
        "Exported {} samples to {}",
        scene.spectrum.len(),
        path.display()
    );
    Ok(())
}

/// One exported sample.
#[derive(Debug, Serialize)]
struct SampleRow {
    wavelength_nm: f64,
    transmission: f64,
    transmission_db: f64,
}

fn rows(scene: &Scene) -> Vec<SampleRow> {
    scene
        .spectrum
        .points()
        .iter()
        .map(|p| SampleRow {
            wavelength_nm: p.wavelength * 1e9,
            transmission: p.transmission,
            transmission_db: to_db(p.transmission),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, scene: &Scene) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows(scene) {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON writer
// ---------------------------------------------------------------------------

/// Layout of the JSON artifact.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    parameters: &'a ResonatorParameters,
    points: Vec<SampleRow>,
    resonances: &'a [ResonancePeak],
    free_spectral_ranges_nm: Vec<f64>,
    metrics: &'a ResonatorMetrics,
}

fn write_json(path: &Path, scene: &Scene) -> Result<()> {
    let report = JsonReport {
        parameters: &scene.config.resonator,
        points: rows(scene),
        resonances: &scene.resonances,
        free_spectral_ranges_nm: scene.free_spectral_ranges.iter().map(|f| f * 1e9).collect(),
        metrics: &scene.metrics,
    };
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, &report).context("writing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

fn write_parquet(path: &Path, scene: &Scene) -> Result<()> {
    let rows = rows(scene);

    let schema = Arc::new(Schema::new(vec![
        Field::new("wavelength_nm", DataType::Float64, false),
        Field::new("transmission", DataType::Float64, false),
        Field::new("transmission_db", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.wavelength_nm))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.transmission))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.transmission_db))),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
