//! Rows and columns of the result table.

use std::iter::StepBy;
use std::ops::RangeInclusive;

use crate::formula::{GearOffset, TEMPO_CEILING, TEMPO_FLOOR_OFFSET};

/// Interval between BPM rows.
pub const TEMPO_STEP: u32 = 10;

/// BPM rows of the table, sharing the last digit with the initial BPM.
///
/// Starts at `initial_bpm % 10 + TEMPO_FLOOR_OFFSET` and counts up by [`TEMPO_STEP`] to
/// [`TEMPO_CEILING`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempoAxis {
    first: u32,
}

impl TempoAxis {
    /// Creates the axis for the initial BPM.
    #[must_use]
    pub const fn new(initial_bpm: u32) -> Self {
        Self {
            first: initial_bpm % TEMPO_STEP + TEMPO_FLOOR_OFFSET,
        }
    }

    /// BPM of the first row.
    #[must_use]
    pub const fn first(self) -> u32 {
        self.first
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(self) -> usize {
        if self.first > TEMPO_CEILING {
            0
        } else {
            ((TEMPO_CEILING - self.first) / TEMPO_STEP + 1) as usize
        }
    }

    /// Whether the axis has no rows.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Iterates BPMs of the rows in ascending order.
    pub fn iter(self) -> StepBy<RangeInclusive<u32>> {
        (self.first..=TEMPO_CEILING).step_by(TEMPO_STEP as usize)
    }
}

impl IntoIterator for TempoAxis {
    type Item = u32;
    type IntoIter = StepBy<RangeInclusive<u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Gear offset columns of the table, `-8..=8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GearAxis;

impl GearAxis {
    /// Number of columns.
    pub const LEN: usize = (GearOffset::MAX.get() - GearOffset::MIN.get()) as usize + 1;

    /// Iterates offsets from the lowest gear to the highest.
    pub fn iter(self) -> impl DoubleEndedIterator<Item = GearOffset> + Clone {
        (GearOffset::MIN.get()..=GearOffset::MAX.get()).filter_map(GearOffset::new)
    }

    /// Column index of the offset.
    #[must_use]
    pub const fn index_of(offset: GearOffset) -> usize {
        (offset.get() - GearOffset::MIN.get()) as usize
    }
}
