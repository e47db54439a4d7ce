//! Two-column CSV persistence for the series
//!
//! Format: a header line `X,Y`, then one `timestamp,value` line per point,
//! both fields written with exactly two decimals. Import is lenient: lines
//! that do not hold two numeric fields are skipped and parsing continues.

use crate::error::{Result, ResultExt};
use crate::types::Point;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Header line written on export
pub const CSV_HEADER: &str = "X,Y";

/// Serialize points to CSV text
pub fn export(points: &[Point]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + points.len() * 24);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for p in points {
        out.push_str(&format_row(p));
        out.push('\n');
    }
    out
}

/// Parse CSV text into points, skipping the header and malformed lines
pub fn import(text: &str) -> Vec<Point> {
    let mut points = Vec::new();
    for (line_no, line) in text.lines().enumerate().skip(1) {
        if let Some(p) = parse_row(line, line_no + 1) {
            points.push(p);
        }
    }
    points
}

/// Write points to a CSV file
pub fn save(path: impl AsRef<Path>, points: &[Point]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", CSV_HEADER)?;
    for p in points {
        writeln!(writer, "{}", format_row(p))?;
    }
    writer.flush()?;

    tracing::info!("Saved {} points to {:?}", points.len(), path);
    Ok(())
}

/// Read points from a CSV file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reader = BufReader::new(file);

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for (line_no, line) in reader.lines().enumerate().skip(1) {
        let line = line.with_context(|| format!("Failed to read {:?}", path))?;
        match parse_row(&line, line_no + 1) {
            Some(p) => points.push(p),
            None => skipped += 1,
        }
    }

    tracing::info!(
        "Loaded {} points from {:?} ({} lines skipped)",
        points.len(),
        path,
        skipped
    );
    Ok(points)
}

fn format_row(p: &Point) -> String {
    format!("{:.2},{:.2}", p.timestamp_ms, p.value)
}

fn parse_row(line: &str, line_no: usize) -> Option<Point> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }

    let mut fields = line.split(',');
    let parsed = match (fields.next(), fields.next()) {
        (Some(x), Some(y)) => x
            .trim()
            .parse::<f64>()
            .ok()
            .zip(y.trim().parse::<f64>().ok())
            .filter(|(x, y)| x.is_finite() && y.is_finite()),
        _ => None,
    };

    match parsed {
        Some((x, y)) => Some(Point::new(x, y)),
        None => {
            tracing::debug!("Skipping malformed CSV line {}: {:?}", line_no, line);
            None
        }
    }
}
