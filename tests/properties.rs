//! Properties holding over many inputs.

use gearchange::prelude::*;
use pretty_assertions::assert_eq;

/// A spread of valid inputs, including clamped highspeeds and a closed window.
fn sample_inputs() -> Vec<Inputs> {
    let mut samples = Vec::new();
    for green in [1, 150, 270, 310, 999, 9999] {
        for (sud, lift) in [(0, 0), (100, 50), (300, 0), (0, 250), (500, 499)] {
            for bpm in [1, 75, 120, 155, 200, 999] {
                samples.push(Inputs::new(green, sud, lift, bpm).expect("sample should be valid"));
            }
        }
    }
    samples
}

#[test]
fn test_highspeed_stays_selectable() {
    for inputs in sample_inputs() {
        let hs = derive_highspeed(
            inputs.green_number(),
            inputs.sud_plus(),
            inputs.lift(),
            inputs.initial_bpm(),
        )
        .expect("sample should be valid");
        assert!((0.5..=10.0).contains(&hs), "{hs} out of range for {inputs:?}");
    }
}

#[test]
fn test_round_trip_without_gear_change() {
    for inputs in sample_inputs() {
        let hs = inputs.highspeed();
        if hs == Highspeed::MIN || hs == Highspeed::MAX {
            continue;
        }
        let projected = project_green(
            hs.as_f64(),
            0,
            inputs.initial_bpm(),
            inputs.sud_plus(),
            inputs.lift(),
            false,
        );
        assert!(
            projected.abs_diff(inputs.green_number()) <= 1,
            "{projected} does not reproduce {inputs:?}"
        );
    }
}

#[test]
fn test_faster_scroll_lowers_green_number() {
    let (sud, lift) = (0, 0);
    let hs = 1.0;
    for bpm in 100..200 {
        assert!(
            project_green(hs, 0, bpm + 1, sud, lift, false)
                < project_green(hs, 0, bpm, sud, lift, false)
        );
    }
    for offset in -1..8 {
        assert!(
            project_green(hs, offset + 1, 150, sud, lift, false)
                < project_green(hs, offset, 150, sud, lift, false)
        );
    }
}

#[test]
fn test_table_is_monotonic() {
    for inputs in sample_inputs() {
        let table = build_table(&inputs);
        for pair in table.cells.windows(2) {
            for (upper, lower) in pair[0].iter().zip(&pair[1]) {
                assert!(lower.projected_green <= upper.projected_green);
            }
        }
        for row in &table.cells {
            for pair in row.windows(2) {
                assert!(pair[1].projected_green <= pair[0].projected_green);
            }
        }
    }
}

#[test]
fn test_table_strictly_decreases_while_unclamped() {
    let unclamped = |hs: Highspeed| Highspeed::MIN < hs && hs < Highspeed::MAX;
    for inputs in sample_inputs() {
        let window = VisibleWindow::of(&inputs);
        if window.width() == 0 {
            continue;
        }
        let table = build_table(&inputs);
        let hs = table.highspeed;
        let exact = |cell: &ResultCell| {
            let shifted = hs.shifted(cell.gear_offset);
            unclamped(shifted).then(|| window.exact_green_number(cell.bpm, shifted))
        };
        let assert_strict = |slower: &ResultCell, faster: &ResultCell| {
            let (Some(slow), Some(fast)) = (exact(slower), exact(faster)) else {
                return;
            };
            assert!(fast < slow, "{faster:?} is not below {slower:?} for {inputs:?}");
            if slow - fast >= 1.0 {
                assert!(faster.projected_green < slower.projected_green);
            }
        };
        for pair in table.cells.windows(2) {
            for (slower, faster) in pair[0].iter().zip(&pair[1]) {
                assert_strict(slower, faster);
            }
        }
        for row in &table.cells {
            for pair in row.windows(2) {
                assert_strict(&pair[0], &pair[1]);
            }
        }
    }
}

#[test]
fn test_golden_inputs_strictly_decrease_along_gears() {
    let table = build_table(&Inputs::new(270, 100, 50, 120).expect("inputs should be valid"));
    for row in &table.cells {
        for pair in row.windows(2) {
            assert!(pair[1].projected_green < pair[0].projected_green, "{pair:?}");
        }
    }
}

#[test]
fn test_intensity_properties() {
    for green in [1, 270, 9999] {
        assert_eq!(visual_intensity(green, green), 1.0);
    }
    let x = 300;
    assert!((visual_intensity(2 * x, x) - visual_intensity(x / 2, x)).abs() < 1e-12);
    for inputs in sample_inputs() {
        let table = build_table(&inputs);
        for cell in table.iter_cells().chain(&table.sud_removed_column) {
            assert!((0.0..=1.0).contains(&cell.intensity));
        }
    }
}

#[test]
fn test_lane_cover_boundary() {
    assert!(derive_highspeed(270, 999, 0, 120).is_ok());
    assert!(derive_highspeed(270, 0, 999, 120).is_ok());
    assert_eq!(
        derive_highspeed(270, 999, 1, 120),
        Err(InvalidInput::WindowClosed { sud: 999, lift: 1 })
    );
    assert_eq!(
        Inputs::from_query("green=270&sud=600&lift=400&bpm=120"),
        Err(InvalidInput::WindowClosed {
            sud: 600,
            lift: 400
        })
    );
}

#[test]
fn test_tempo_axis_follows_initial_bpm() {
    let table = build_table(&Inputs::new(270, 100, 50, 125).expect("inputs should be valid"));
    assert_eq!(table.rows.first(), Some(&65));
    assert_eq!(table.rows.last(), Some(&495));
    assert_eq!(TempoAxis::new(999).first(), 69);
    assert_eq!(TempoAxis::new(1).iter().next(), Some(61));
}
