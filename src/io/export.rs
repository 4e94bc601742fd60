//! CSV export for the combined load series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::peak::CombinedLoadPoint;

/// Column header for the combined-load CSV export.
const HEADER: &str = "timestamp,building_kw,hp_kw,combined_kw,exceedance,exceedance_kw";

/// Exports the combined load series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(points: &[CombinedLoadPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(points, buf)
}

/// Writes the combined load series as CSV to any writer.
///
/// One row per hour in series order; deterministic output for identical
/// inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(points: &[CombinedLoadPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for p in points {
        wtr.write_record(&[
            p.timestamp.format("%Y-%m-%dT%H:%M").to_string(),
            format!("{:.4}", p.building_kw),
            format!("{:.4}", p.hp_kw),
            format!("{:.4}", p.combined_kw),
            p.exceedance.to_string(),
            format!("{:.4}", p.exceedance_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
