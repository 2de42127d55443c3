//! Input fields of the calculator and their validation.
//!
//! Everything entered by a player passes through here before any arithmetic happens. A value of
//! [`Inputs`] always satisfies the ranges of [`Field`] and keeps the visible window open, so the
//! rest of the crate never divides by zero.

use std::{fmt, num::IntErrorKind, str::FromStr};

use thiserror::Error;

/// Upper bound (exclusive) of `sud_plus + lift`. The lane is fully covered at this point.
pub const LANE_COVER_LIMIT: u32 = 1000;

/// One of the four input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    /// Green number at the initial BPM.
    GreenNumber,
    /// Length of the SUD+ lane cover.
    SudPlus,
    /// Height of the LIFT lane cover.
    Lift,
    /// BPM at the start of the chart.
    InitialBpm,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::GreenNumber, Self::SudPlus, Self::Lift, Self::InitialBpm];

    /// Inclusive range of values accepted for the field.
    #[must_use]
    pub const fn range(self) -> (u32, u32) {
        match self {
            Self::GreenNumber => (1, 9999),
            Self::SudPlus | Self::Lift => (0, 999),
            Self::InitialBpm => (1, 999),
        }
    }

    /// Key of the field in a query string.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::GreenNumber => "green",
            Self::SudPlus => "sud",
            Self::Lift => "lift",
            Self::InitialBpm => "bpm",
        }
    }

    /// Finds the field having the query key.
    #[must_use]
    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.query_key() == key)
    }

    fn check(self, value: u32) -> Result<u32> {
        let (min, max) = self.range();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(InvalidInput::OutOfRange {
                field: self,
                value: value as i64,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GreenNumber => "green number",
            Self::SudPlus => "SUD+ length",
            Self::Lift => "LIFT height",
            Self::InitialBpm => "initial BPM",
        })
    }
}

/// The input could not be used for calculation.
///
/// Correcting the reported field always recovers from this error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidInput {
    /// A required field was left empty.
    #[error("{field} is required")]
    Missing {
        /// The empty field.
        field: Field,
    },
    /// A field was not an integer.
    #[error("{field} must be an integer, but got {value:?}")]
    NotANumber {
        /// The offending field.
        field: Field,
        /// The text entered.
        value: String,
    },
    /// A field was outside of its range.
    #[error("{field} must be between {min} and {max}, but got {value}")]
    OutOfRange {
        /// The offending field.
        field: Field,
        /// The value entered.
        value: i64,
        /// Minimum accepted value.
        min: u32,
        /// Maximum accepted value.
        max: u32,
    },
    /// SUD+ and LIFT cover the whole lane.
    #[error("SUD+ length and LIFT height must sum to less than 1000, but got {sud} + {lift}")]
    WindowClosed {
        /// SUD+ length entered.
        sud: u32,
        /// LIFT height entered.
        lift: u32,
    },
}

/// Result type for input validation.
pub type Result<T, E = InvalidInput> = std::result::Result<T, E>;

/// Validated input of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Inputs {
    green_number: u32,
    sud_plus: u32,
    lift: u32,
    initial_bpm: u32,
}

impl Inputs {
    /// Validates the fields into inputs.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::OutOfRange`] when a field is outside of [`Field::range`], or
    /// [`InvalidInput::WindowClosed`] when `sud_plus + lift` reaches [`LANE_COVER_LIMIT`].
    pub fn new(green_number: u32, sud_plus: u32, lift: u32, initial_bpm: u32) -> Result<Self> {
        let inputs = Self {
            green_number: Field::GreenNumber.check(green_number)?,
            sud_plus: Field::SudPlus.check(sud_plus)?,
            lift: Field::Lift.check(lift)?,
            initial_bpm: Field::InitialBpm.check(initial_bpm)?,
        };
        if inputs.sud_plus + inputs.lift >= LANE_COVER_LIMIT {
            log::debug!("rejected lane cover {} + {}", inputs.sud_plus, inputs.lift);
            return Err(InvalidInput::WindowClosed {
                sud: inputs.sud_plus,
                lift: inputs.lift,
            });
        }
        Ok(inputs)
    }

    /// Green number at the initial BPM.
    #[must_use]
    pub const fn green_number(&self) -> u32 {
        self.green_number
    }

    /// Length of SUD+.
    #[must_use]
    pub const fn sud_plus(&self) -> u32 {
        self.sud_plus
    }

    /// Height of LIFT.
    #[must_use]
    pub const fn lift(&self) -> u32 {
        self.lift
    }

    /// BPM at the start of the chart.
    #[must_use]
    pub const fn initial_bpm(&self) -> u32 {
        self.initial_bpm
    }

    /// Value of the field.
    #[must_use]
    pub const fn get(&self, field: Field) -> u32 {
        match field {
            Field::GreenNumber => self.green_number,
            Field::SudPlus => self.sud_plus,
            Field::Lift => self.lift,
            Field::InitialBpm => self.initial_bpm,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Inputs {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Unchecked {
            green_number: u32,
            sud_plus: u32,
            lift: u32,
            initial_bpm: u32,
        }
        let raw = Unchecked::deserialize(deserializer)?;
        Self::new(raw.green_number, raw.sud_plus, raw.lift, raw.initial_bpm)
            .map_err(serde::de::Error::custom)
    }
}

/// Unvalidated text of the four fields, as typed into a form or read from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawInputs {
    /// Text of the green number field.
    pub green_number: Option<String>,
    /// Text of the SUD+ field.
    pub sud_plus: Option<String>,
    /// Text of the LIFT field.
    pub lift: Option<String>,
    /// Text of the initial BPM field.
    pub initial_bpm: Option<String>,
}

impl RawInputs {
    /// Text of the field, if entered.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::GreenNumber => self.green_number.as_deref(),
            Field::SudPlus => self.sud_plus.as_deref(),
            Field::Lift => self.lift.as_deref(),
            Field::InitialBpm => self.initial_bpm.as_deref(),
        }
    }

    /// Mutable slot of the field.
    pub fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::GreenNumber => &mut self.green_number,
            Field::SudPlus => &mut self.sud_plus,
            Field::Lift => &mut self.lift,
            Field::InitialBpm => &mut self.initial_bpm,
        }
    }

    /// Validates the text of all fields.
    ///
    /// Blank fields count as missing. Fields are checked in form order and the first problem
    /// found is reported.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] describing the first invalid field.
    pub fn validate(&self) -> Result<Inputs> {
        let parse = |field| parse_field(field, self.get(field));
        Inputs::new(
            parse(Field::GreenNumber)?,
            parse(Field::SudPlus)?,
            parse(Field::Lift)?,
            parse(Field::InitialBpm)?,
        )
    }
}

impl From<Inputs> for RawInputs {
    fn from(inputs: Inputs) -> Self {
        let text = |field| Some(inputs.get(field).to_string());
        Self {
            green_number: text(Field::GreenNumber),
            sud_plus: text(Field::SudPlus),
            lift: text(Field::Lift),
            initial_bpm: text(Field::InitialBpm),
        }
    }
}

impl TryFrom<&RawInputs> for Inputs {
    type Error = InvalidInput;

    fn try_from(raw: &RawInputs) -> Result<Self> {
        raw.validate()
    }
}

fn parse_field(field: Field, text: Option<&str>) -> Result<u32> {
    let text = text.map(str::trim).filter(|text| !text.is_empty());
    let Some(text) = text else {
        return Err(InvalidInput::Missing { field });
    };
    let value = match i64::from_str(text) {
        Ok(value) => value,
        // Still an integer, but too long for any field.
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow) => i64::MAX,
        Err(err) if matches!(err.kind(), IntErrorKind::NegOverflow) => i64::MIN,
        Err(_) => {
            return Err(InvalidInput::NotANumber {
                field,
                value: text.to_owned(),
            });
        }
    };
    let (min, max) = field.range();
    u32::try_from(value)
        .ok()
        .filter(|value| (min..=max).contains(value))
        .ok_or(InvalidInput::OutOfRange {
            field,
            value,
            min,
            max,
        })
}
