//! Toggle scenarios on the stage calendar
//!
//! Each scenario starts from a set of ranges, applies a sequence of toggles, and checks which stages are active on every day of February and March 2026

use std::collections::HashSet;

use chrono::NaiveDate;

use roadmap_calendar::calendar::{DateRange, DaySpan, ToggleOutcome};
use roadmap_calendar::{StageCalendar, StageId};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

/// Days (of 2026) in `(month, from, to)` form
type Days = &'static [(u32, u32, u32)];

pub struct ToggleScenario {
    name: &'static str,
    stage: &'static str,
    /// Ranges of `stage` before any toggle
    initial: Days,
    toggles: Vec<(DaySpan, ToggleOutcome)>,
    /// Days where `stage` must be active once every toggle is applied
    expected_active: Days,
}

fn expand(days: Days) -> HashSet<NaiveDate> {
    days.iter()
        .flat_map(|&(m, from, to)| DaySpan::new(day(m, from), day(m, to)).days())
        .collect()
}

pub fn scenarii() -> Vec<ToggleScenario> {
    vec![
        ToggleScenario {
            name: "add a dragged range on an empty calendar",
            stage: "1",
            initial: &[],
            toggles: vec![(DaySpan::new(day(2, 3), day(2, 6)), ToggleOutcome::Added)],
            expected_active: &[(2, 3, 6)],
        },
        ToggleScenario {
            name: "remove a single day in the middle",
            stage: "1",
            initial: &[(2, 3, 6)],
            toggles: vec![(DaySpan::single(day(2, 5)), ToggleOutcome::Removed)],
            expected_active: &[(2, 3, 4), (2, 6, 6)],
        },
        ToggleScenario {
            name: "remove the first day",
            stage: "2",
            initial: &[(2, 9, 24)],
            toggles: vec![(DaySpan::single(day(2, 9)), ToggleOutcome::Removed)],
            expected_active: &[(2, 10, 24)],
        },
        ToggleScenario {
            name: "remove the last day",
            stage: "2",
            initial: &[(2, 9, 24)],
            toggles: vec![(DaySpan::single(day(2, 24)), ToggleOutcome::Removed)],
            expected_active: &[(2, 9, 23)],
        },
        ToggleScenario {
            name: "remove a whole range exactly",
            stage: "3",
            initial: &[(2, 25, 28), (3, 1, 4)],
            toggles: vec![(DaySpan::new(day(2, 25), day(3, 4)), ToggleOutcome::Removed)],
            expected_active: &[],
        },
        ToggleScenario {
            name: "remove across a month boundary",
            stage: "3",
            initial: &[(2, 20, 28), (3, 1, 10)],
            toggles: vec![(DaySpan::new(day(2, 27), day(3, 2)), ToggleOutcome::Removed)],
            expected_active: &[(2, 20, 26), (3, 3, 10)],
        },
        ToggleScenario {
            name: "add over a partially active span, then remove it",
            stage: "4",
            initial: &[(3, 5, 6)],
            toggles: vec![
                (DaySpan::new(day(3, 5), day(3, 13)), ToggleOutcome::Added),
                (DaySpan::new(day(3, 10), day(3, 11)), ToggleOutcome::Removed),
            ],
            expected_active: &[(3, 5, 9), (3, 12, 13)],
        },
        ToggleScenario {
            name: "single day on, single day off",
            stage: "1",
            initial: &[],
            toggles: vec![
                (DaySpan::single(day(3, 20)), ToggleOutcome::Added),
                (DaySpan::single(day(3, 20)), ToggleOutcome::Removed),
            ],
            expected_active: &[],
        },
    ]
}

#[test]
fn toggle_scenarii() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Another stage is always active everywhere. It must never be affected
    let bystander = StageId::from("other");

    for scenario in scenarii() {
        let stage = StageId::from(scenario.stage);

        let mut calendar = StageCalendar::new();
        calendar.add_range(DateRange::new(day(1, 1), day(12, 31), bystander.clone()));
        for &(m, from, to) in scenario.initial {
            calendar.add_range(DateRange::new(day(m, from), day(m, to), stage.clone()));
        }

        for (span, expected_outcome) in &scenario.toggles {
            assert_eq!(calendar.toggle_stage(&stage, *span), *expected_outcome, "in scenario '{}', toggling {}", scenario.name, span);
        }

        let expected = expand(scenario.expected_active);
        for date in DaySpan::new(day(2, 1), day(3, 31)).days() {
            assert_eq!(calendar.is_active(&stage, date), expected.contains(&date), "in scenario '{}', on {}", scenario.name, date);
            assert!(calendar.is_active(&bystander, date));
        }
    }
}
