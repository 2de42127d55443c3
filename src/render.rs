//! Presentation of a [`GreenTable`].
//!
//! - [`render_text`]: aligned plain text.
//! - [`render_ansi`]: the same layout, painting each cell with its intensity color in 24-bit
//!   ANSI escape sequences.
//! - [`write_csv`]: one record per BPM row (`csv` feature).
//! - [`render_json`]: the whole table including intensities (`json` feature).

use itertools::Itertools;
use thiserror::Error;

use crate::table::{GreenTable, ResultCell};

const BPM_WIDTH: usize = 5;
const CELL_WIDTH: usize = 6;
const SUD_REMOVED_LABEL: &str = "noSUD";

/// An error occurred while writing a table out.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to write to the destination.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to write a CSV record.
    #[cfg(feature = "csv")]
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    /// Failed to serialize the table.
    #[cfg(feature = "json")]
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Line describing the inputs and the derived highspeed.
#[must_use]
pub fn summary(table: &GreenTable) -> String {
    let inputs = &table.inputs;
    format!(
        "green {} / SUD+ {} / LIFT {} / BPM {} => HS {}",
        inputs.green_number(),
        inputs.sud_plus(),
        inputs.lift(),
        inputs.initial_bpm(),
        table.highspeed
    )
}

fn header(table: &GreenTable) -> String {
    let columns = table
        .columns
        .iter()
        .map(|offset| format!("{:>CELL_WIDTH$}", offset.to_string()))
        .join("");
    format!("{:>BPM_WIDTH$} |{columns} |{SUD_REMOVED_LABEL:>CELL_WIDTH$}", "BPM")
}

fn render_with(table: &GreenTable, paint: impl Fn(&ResultCell) -> String) -> String {
    let rows = table.iter_rows().map(|row| {
        let cells = row.cells.iter().map(&paint).join("");
        format!("{:>BPM_WIDTH$} |{cells} |{}", row.bpm, paint(row.sud_removed))
    });
    [summary(table), header(table)]
        .into_iter()
        .chain(rows)
        .map(|line| line + "\n")
        .collect()
}

/// Renders the table as aligned plain text.
#[must_use]
pub fn render_text(table: &GreenTable) -> String {
    render_with(table, |cell| format!("{:>CELL_WIDTH$}", cell.projected_green))
}

/// Renders the table with each cell's background painted by its intensity.
#[must_use]
pub fn render_ansi(table: &GreenTable) -> String {
    render_with(table, |cell| {
        let color = cell.color();
        format!(
            "\x1b[48;2;{};{};{}m\x1b[30m{:>CELL_WIDTH$}\x1b[0m",
            color.r, color.g, color.b, cell.projected_green
        )
    })
}

/// Writes the table as CSV, with a header of gear offsets.
///
/// # Errors
///
/// Returns [`RenderError`] when writing to `writer` fails.
#[cfg(feature = "csv")]
pub fn write_csv<W: std::io::Write>(table: &GreenTable, writer: W) -> Result<(), RenderError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let header = std::iter::once("bpm".to_owned())
        .chain(table.columns.iter().map(ToString::to_string))
        .chain(std::iter::once("sud_removed".to_owned()));
    csv_writer.write_record(header)?;
    for row in table.iter_rows() {
        let record = std::iter::once(row.bpm)
            .chain(row.cells.iter().map(|cell| cell.projected_green))
            .chain(std::iter::once(row.sud_removed.projected_green))
            .map(|value| value.to_string());
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serializes the whole table as pretty JSON.
///
/// # Errors
///
/// Returns [`RenderError::Json`] when serialization fails.
#[cfg(feature = "json")]
pub fn render_json(table: &GreenTable) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(table)?)
}
