//! The display formula of green numbers and its inverse.
//!
//! The green number tells how long a note stays in the visible window. It is proportional to the
//! window width and inversely proportional to the scroll speed, which is BPM times highspeed:
//!
//! ```text
//! green = GREEN_NUMBER_COEFFICIENT * window / (bpm * hs)
//! window = WINDOW_BASE - sud - lift
//! ```
//!
//! Older calculators disagree on the coefficient and on whether the window is measured from 999
//! or 1000. This module fixes one variant, the constants below, and nothing else in the crate
//! hard-codes them.

use std::fmt;

use crate::input::{self, Inputs};

/// Coefficient `A` of the display formula.
pub const GREEN_NUMBER_COEFFICIENT: f64 = 174.728;

/// Width of the visible window without any lane cover.
pub const WINDOW_BASE: u32 = 999;

/// Added to the last digit of the initial BPM to get the first row of the table.
pub const TEMPO_FLOOR_OFFSET: u32 = 60;

/// Highest BPM in the table.
pub const TEMPO_CEILING: u32 = 500;

/// Highspeed change per gear step.
pub const GEAR_STEP: f64 = 0.5;

/// Highspeed multiplier of note scrolling, always within [`Highspeed::MIN`]`..=`[`Highspeed::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Highspeed(f64);

impl Highspeed {
    /// Slowest highspeed selectable in game.
    pub const MIN: Self = Self(0.5);
    /// Fastest highspeed selectable in game.
    pub const MAX: Self = Self(10.0);

    /// Creates a highspeed, clamping the value into the selectable range.
    ///
    /// `NaN` is treated as the slowest highspeed.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(num::clamp(value, Self::MIN.0, Self::MAX.0))
    }

    /// Derives the highspeed a player runs from the green number shown at `bpm`.
    ///
    /// This is the inverse of [`VisibleWindow::green_number`].
    #[must_use]
    pub fn derive(green_number: u32, window: VisibleWindow, bpm: u32) -> Self {
        Self::clamped(
            GREEN_NUMBER_COEFFICIENT * window.width() as f64
                / green_number as f64
                / bpm as f64,
        )
    }

    /// The highspeed after shifting the gear by `offset` steps.
    #[must_use]
    pub fn shifted(self, offset: GearOffset) -> Self {
        Self::clamped(self.0 + GEAR_STEP * offset.get() as f64)
    }

    /// Raw multiplier.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Highspeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Steps of gear change from the derived highspeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i8", into = "i8"))]
pub struct GearOffset(i8);

impl GearOffset {
    /// Largest downward shift.
    pub const MIN: Self = Self(-8);
    /// No shift.
    pub const ZERO: Self = Self(0);
    /// Largest upward shift.
    pub const MAX: Self = Self(8);

    /// Creates a gear offset, or returns `None` if out of range.
    #[must_use]
    pub const fn new(offset: i8) -> Option<Self> {
        if Self::MIN.0 <= offset && offset <= Self::MAX.0 {
            Some(Self(offset))
        } else {
            None
        }
    }

    /// Number of steps.
    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }
}

impl TryFrom<i8> for GearOffset {
    type Error = GearOutOfRange;

    fn try_from(offset: i8) -> Result<Self, Self::Error> {
        Self::new(offset).ok_or(GearOutOfRange(offset))
    }
}

impl From<GearOffset> for i8 {
    fn from(offset: GearOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for GearOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// A gear offset beyond `-8..=8` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("gear offset must be between -8 and 8, but got {0}")]
pub struct GearOutOfRange(pub i8);

/// Width of the lane not covered by SUD+ and LIFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VisibleWindow(u32);

impl VisibleWindow {
    /// The window left by the lane covers. Covers exceeding the lane close the window entirely.
    #[must_use]
    pub const fn new(sud_plus: u32, lift: u32) -> Self {
        Self(WINDOW_BASE.saturating_sub(sud_plus.saturating_add(lift)))
    }

    /// The window of the inputs.
    #[must_use]
    pub const fn of(inputs: &Inputs) -> Self {
        Self::new(inputs.sud_plus(), inputs.lift())
    }

    /// The window of the inputs after taking SUD+ off.
    #[must_use]
    pub const fn without_sud(inputs: &Inputs) -> Self {
        Self::new(0, inputs.lift())
    }

    /// Width in lane units.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.0
    }

    /// Green number shown for scrolling at `bpm` with `hs`, before rounding.
    ///
    /// `bpm` must be positive.
    #[must_use]
    pub fn exact_green_number(self, bpm: u32, hs: Highspeed) -> f64 {
        debug_assert!(bpm > 0);
        GREEN_NUMBER_COEFFICIENT * self.0 as f64 / (bpm as f64 * hs.as_f64())
    }

    /// Green number shown for scrolling at `bpm` with `hs`, rounded half away from zero.
    ///
    /// `bpm` must be positive.
    #[must_use]
    pub fn green_number(self, bpm: u32, hs: Highspeed) -> u32 {
        self.exact_green_number(bpm, hs).round() as u32
    }
}

/// Derives the highspeed a player runs from the raw fields.
///
/// The result is within `0.5..=10.0`.
///
/// # Errors
///
/// Returns [`input::InvalidInput`] when a field is out of range or `sud + lift >= 1000`.
pub fn derive_highspeed(green: u32, sud: u32, lift: u32, bpm: u32) -> input::Result<f64> {
    let inputs = Inputs::new(green, sud, lift, bpm)?;
    Ok(inputs.highspeed().as_f64())
}

/// Projects the green number for scrolling at `bpm` after shifting `hs` by `gear_offset`.
///
/// With `remove_sud`, the window is measured without SUD+ and the gear offset is ignored, which
/// is the view when SUD+ is taken off mid-chart. Offsets are clamped into `-8..=8` and `hs` into
/// the selectable range. A zero `bpm` is treated as 1.
#[must_use]
pub fn project_green(
    hs: f64,
    gear_offset: i8,
    bpm: u32,
    sud: u32,
    lift: u32,
    remove_sud: bool,
) -> u32 {
    let hs = Highspeed::clamped(hs);
    let bpm = bpm.max(1);
    if remove_sud {
        return VisibleWindow::new(0, lift).green_number(bpm, hs);
    }
    let offset = GearOffset(gear_offset.clamp(GearOffset::MIN.0, GearOffset::MAX.0));
    VisibleWindow::new(sud, lift).green_number(bpm, hs.shifted(offset))
}

impl Inputs {
    /// Highspeed the player runs, derived at the initial BPM.
    #[must_use]
    pub fn highspeed(&self) -> Highspeed {
        let hs = Highspeed::derive(
            self.green_number(),
            VisibleWindow::of(self),
            self.initial_bpm(),
        );
        log::trace!("derived highspeed {hs} from {:?}", self);
        hs
    }
}
