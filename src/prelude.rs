//! Prelude module for the calculator.
//!
//! You can use `use gearchange::prelude::*;` to import all commonly used items at once.

pub use crate::{
    axis::{GearAxis, TEMPO_STEP, TempoAxis},
    formula::{
        GEAR_STEP, GREEN_NUMBER_COEFFICIENT, GearOffset, GearOutOfRange, Highspeed,
        TEMPO_CEILING, TEMPO_FLOOR_OFFSET, VisibleWindow, WINDOW_BASE, derive_highspeed,
        project_green,
    },
    input::{Field, Inputs, InvalidInput, LANE_COVER_LIMIT, RawInputs},
    intensity::{Rgb, visual_intensity},
    query::{MemoryQueryStore, QueryStore},
    render::{RenderError, render_ansi, render_text, summary},
    table::{GreenTable, ResultCell, TableRow, build_table},
};

#[cfg(feature = "json")]
pub use crate::render::render_json;

#[cfg(feature = "csv")]
pub use crate::render::write_csv;
