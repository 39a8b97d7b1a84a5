//! The stage calendar: which stages are active on which days
//!
//! Activity is stored as a set of inclusive [`DateRange`]s, each owned by a stage.
//! The [`grid`] module derives month views from it, the [`selection`] module models the drag gesture that picks days to toggle.

pub mod exclusions;
pub mod grid;
pub mod selection;

pub use exclusions::{DayExclusions, ExclusionPolicy};
pub use grid::{CalendarDay, YearMonth};

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::stage::StageId;


/// An inclusive span of days. A single day is a span whose `start` equals its `end`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DaySpan {
    /// Create a span between two days, in whatever order they are given
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate   { self.end   }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates over every day of the span
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl Display for DaySpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}


/// A contiguous span during which a stage is active
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    stage_id: StageId,
}

impl DateRange {
    /// Create a range. Reversed bounds are swapped, so that `start <= end` always holds
    pub fn new(start: NaiveDate, end: NaiveDate, stage_id: StageId) -> Self {
        let span = DaySpan::new(start, end);
        Self { start: span.start, end: span.end, stage_id }
    }

    fn from_span(span: DaySpan, stage_id: StageId) -> Self {
        Self { start: span.start, end: span.end, stage_id }
    }

    pub fn start(&self) -> NaiveDate     { self.start     }
    pub fn end(&self) -> NaiveDate       { self.end       }
    pub fn stage_id(&self) -> &StageId   { &self.stage_id }

    pub fn span(&self) -> DaySpan {
        DaySpan { start: self.start, end: self.end }
    }

    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, span: &DaySpan) -> bool {
        self.start <= span.end && span.start <= self.end
    }
}


/// A [`DateRange`] as it is stored, before its bounds are put in order
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDateRange {
    start: NaiveDate,
    end: NaiveDate,
    stage_id: StageId,
}

impl From<StoredDateRange> for DateRange {
    fn from(stored: StoredDateRange) -> Self {
        DateRange::new(stored.start, stored.end, stored.stage_id)
    }
}


/// What [`StageCalendar::toggle_stage`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The stage was not active on the whole span, and a range covering it has been added
    Added,
    /// The stage was active on the whole span, and it has been removed from it
    Removed,
}


/// The set of [`DateRange`]s of a roadmap
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCalendar {
    ranges: Vec<DateRange>,
}

impl StageCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges(ranges: Vec<DateRange>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[DateRange] {
        &self.ranges
    }

    pub fn ranges_for<'a>(&'a self, stage_id: &'a StageId) -> impl Iterator<Item = &'a DateRange> + 'a {
        self.ranges.iter().filter(move |r| &r.stage_id == stage_id)
    }

    pub fn add_range(&mut self, range: DateRange) {
        self.ranges.push(range);
    }

    /// Returns the ranges that contain `date`
    pub fn compute_day(&self, date: NaiveDate) -> Vec<&DateRange> {
        self.ranges.iter()
            .filter(|r| r.contains(date))
            .collect()
    }

    /// Returns the ids of the stages that are active on `date`, each once, in range order
    pub fn active_stages(&self, date: NaiveDate) -> Vec<StageId> {
        let mut ids: Vec<StageId> = Vec::new();
        for range in self.compute_day(date) {
            if ids.contains(&range.stage_id) == false {
                ids.push(range.stage_id.clone());
            }
        }
        ids
    }

    pub fn is_active(&self, stage_id: &StageId, date: NaiveDate) -> bool {
        self.ranges_for(stage_id).any(|r| r.contains(date))
    }

    /// Flips the membership of a stage over a span.
    ///
    /// If the stage is active on every day of the span, it is removed from the whole span, existing ranges being deleted, trimmed or split as needed.
    /// Otherwise, a new range covering the full span is added. It is not merged with the existing ranges of this stage.
    pub fn toggle_stage(&mut self, stage_id: &StageId, span: DaySpan) -> ToggleOutcome {
        let fully_active = span.days().all(|day| self.is_active(stage_id, day));

        if fully_active == false {
            log::debug!("Adding stage {} over {}", stage_id, span);
            self.ranges.push(DateRange::from_span(span, stage_id.clone()));
            return ToggleOutcome::Added;
        }

        log::debug!("Removing stage {} from {}", stage_id, span);
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for range in self.ranges.drain(..) {
            if &range.stage_id != stage_id || range.overlaps(&span) == false {
                kept.push(range);
                continue;
            }

            let starts_before = range.start < span.start;
            let ends_after = range.end > span.end;
            match (starts_before, ends_after) {
                (false, false) => {
                    // Fully contained in the span
                },
                (true, false) => {
                    kept.push(DateRange { end: span.start - Duration::days(1), ..range });
                },
                (false, true) => {
                    kept.push(DateRange { start: span.end + Duration::days(1), ..range });
                },
                (true, true) => {
                    kept.push(DateRange { start: range.start, end: span.start - Duration::days(1), stage_id: range.stage_id.clone() });
                    kept.push(DateRange { start: span.end + Duration::days(1), end: range.end, stage_id: range.stage_id });
                },
            }
        }
        self.ranges = kept;
        ToggleOutcome::Removed
    }

    /// Drops every range whose stage is not in `existing_ids`.
    /// Returns how many ranges have been dropped
    pub fn prune_for_stages(&mut self, existing_ids: &HashSet<StageId>) -> usize {
        let before = self.ranges.len();
        self.ranges.retain(|r| existing_ids.contains(&r.stage_id));
        let pruned = before - self.ranges.len();
        if pruned > 0 {
            log::debug!("Pruned {} ranges of deleted stages", pruned);
        }
        pruned
    }
}
