//! Green number and gear change calculator.
//!
//! Given the green number a player is comfortable with at a chart's initial BPM, along with the
//! SUD+ length and LIFT height they play with, this crate derives the highspeed the player is
//! running and projects what the green number turns into on every other BPM and every gear
//! change of the highspeed (steps of 0.5).
//!
//! The computation is split into phases:
//!
//! - [`input`] validates the four input fields into [`input::Inputs`].
//! - [`formula`] holds the display formula and its inverse.
//! - [`axis`] generates the BPM rows and gear columns of the result table.
//! - [`table`] projects every cell and attaches [`intensity`] of its color.
//! - [`query`] and [`render`] are the presentation boundary: bookmarkable query strings and
//!   text/CSV/JSON output.
//!
//! # Example
//!
//! ```
//! use gearchange::prelude::*;
//!
//! let inputs = Inputs::new(270, 100, 50, 120).unwrap();
//! let table = build_table(&inputs);
//!
//! assert_eq!(table.rows.first(), Some(&60));
//! assert_eq!(table.columns.len(), 17);
//! // Gear offset 0 on the initial BPM reproduces the input green number.
//! let row = table.row_of(120).unwrap();
//! assert_eq!(row.cell(GearOffset::ZERO).unwrap().projected_green, 270);
//! ```
//!
//! # Formula
//!
//! Only one variant of the display formula is implemented:
//!
//! ```text
//! green = 174.728 * (999 - sud - lift) / (bpm * hs)
//! ```
//!
//! See [`formula`] for the constants.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod axis;
pub mod formula;
pub mod input;
pub mod intensity;
pub mod prelude;
pub mod query;
pub mod render;
pub mod table;
