//! The table of projected green numbers.
//!
//! Rows are BPMs from [`TempoAxis`], columns are gear offsets from [`GearAxis`], and every row
//! carries one more cell projecting the green number after taking SUD+ off.

use itertools::Itertools;

use crate::{
    axis::{GearAxis, TempoAxis},
    formula::{GearOffset, Highspeed, VisibleWindow},
    input::Inputs,
    intensity::{Rgb, visual_intensity},
};

/// A projected green number in the table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResultCell {
    /// BPM of the row.
    pub bpm: u32,
    /// Gear offset of the column. Always zero in the SUD+ removed column.
    pub gear_offset: GearOffset,
    /// Green number shown at `bpm` after the gear change.
    pub projected_green: u32,
    /// Closeness to the input green number, see [`visual_intensity`].
    pub intensity: f64,
}

impl ResultCell {
    fn project(
        inputs: &Inputs,
        hs: Highspeed,
        window: VisibleWindow,
        bpm: u32,
        gear_offset: GearOffset,
    ) -> Self {
        let projected_green = window.green_number(bpm, hs.shifted(gear_offset));
        Self {
            bpm,
            gear_offset,
            projected_green,
            intensity: visual_intensity(projected_green, inputs.green_number()),
        }
    }

    /// Background color of the cell.
    #[must_use]
    pub fn color(&self) -> Rgb {
        Rgb::for_intensity(self.intensity)
    }
}

/// Projected green numbers for every BPM row and gear column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreenTable {
    /// Inputs the table was calculated from.
    pub inputs: Inputs,
    /// Highspeed derived from the inputs.
    pub highspeed: Highspeed,
    /// BPM of each row, ascending.
    pub rows: Vec<u32>,
    /// Gear offset of each column, ascending.
    pub columns: Vec<GearOffset>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<ResultCell>>,
    /// One cell per row, projected without SUD+ at gear offset 0.
    pub sud_removed_column: Vec<ResultCell>,
}

/// A borrowed row of a [`GreenTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow<'a> {
    /// BPM of the row.
    pub bpm: u32,
    /// Cells in column order.
    pub cells: &'a [ResultCell],
    /// Cell of the SUD+ removed column.
    pub sud_removed: &'a ResultCell,
}

impl TableRow<'_> {
    /// Cell at the gear offset.
    #[must_use]
    pub fn cell(&self, offset: GearOffset) -> Option<&ResultCell> {
        self.cells.get(GearAxis::index_of(offset))
    }
}

impl GreenTable {
    /// Iterates rows from the lowest BPM.
    pub fn iter_rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows
            .iter()
            .zip(&self.cells)
            .zip(&self.sud_removed_column)
            .map(|((&bpm, cells), sud_removed)| TableRow {
                bpm,
                cells,
                sud_removed,
            })
    }

    /// Row of the BPM, if the table has one.
    #[must_use]
    pub fn row_of(&self, bpm: u32) -> Option<TableRow<'_>> {
        self.iter_rows().find(|row| row.bpm == bpm)
    }

    /// Iterates every cell of the gear columns in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &ResultCell> {
        self.cells.iter().flatten()
    }
}

/// Calculates the whole table for the inputs.
#[must_use]
pub fn build_table(inputs: &Inputs) -> GreenTable {
    let hs = inputs.highspeed();
    let window = VisibleWindow::of(inputs);
    let window_without_sud = VisibleWindow::without_sud(inputs);
    let rows = TempoAxis::new(inputs.initial_bpm()).iter().collect_vec();
    let columns = GearAxis.iter().collect_vec();

    let cells = rows
        .iter()
        .map(|&bpm| {
            columns
                .iter()
                .map(|&offset| ResultCell::project(inputs, hs, window, bpm, offset))
                .collect_vec()
        })
        .collect_vec();
    let sud_removed_column = rows
        .iter()
        .map(|&bpm| ResultCell::project(inputs, hs, window_without_sud, bpm, GearOffset::ZERO))
        .collect_vec();

    log::debug!(
        "built {}x{} table at highspeed {hs} for {inputs:?}",
        rows.len(),
        columns.len()
    );
    GreenTable {
        inputs: *inputs,
        highspeed: hs,
        rows,
        columns,
        cells,
        sud_removed_column,
    }
}
