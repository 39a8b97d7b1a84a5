//! Month grids, as displayed by a calendar
//!
//! A grid always has 6 weeks of 7 days, weeks starting on Monday.
//! Days of the adjacent months pad the grid and never carry any stage.

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::{ExclusionPolicy, StageCalendar};
use crate::stage::StageId;

/// How many cells a grid contains
pub const GRID_CELLS: usize = 42;

/// A valid (year, month) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1-based
    month: u32,
    first_day: NaiveDate,
}

impl YearMonth {
    /// Returns `None` if `month` is not in `1..=12` or the year is out of the supported range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month, first_day })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month(), first_day: date.with_day(1).unwrap_or(date) }
    }

    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    pub fn first_day(&self) -> NaiveDate { self.first_day }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first_day.format("%B %Y"))
    }
}


/// One cell of a month grid
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarDay {
    date: NaiveDate,
    is_current_month: bool,
    stages: Vec<StageId>,
}

impl CalendarDay {
    pub fn date(&self) -> NaiveDate          { self.date }
    /// Day of the month, 1-based
    pub fn day(&self) -> u32                 { self.date.day() }
    /// Month, 1-based
    pub fn month(&self) -> u32               { self.date.month() }
    pub fn year(&self) -> i32                { self.date.year() }
    pub fn is_current_month(&self) -> bool   { self.is_current_month }
    pub fn stages(&self) -> &[StageId]       { &self.stages }
}


/// Generates the 42-cell grid of a month.
///
/// Current-month cells carry the stages active on their date, unless `exclusions` rules the date out.
pub fn generate(year_month: YearMonth, calendar: &StageCalendar, exclusions: &ExclusionPolicy) -> Vec<CalendarDay> {
    let first = year_month.first_day();
    let leading_days = first.weekday().num_days_from_monday();
    let grid_start = first - Duration::days(i64::from(leading_days));

    grid_start.iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let is_current_month = year_month.contains(date);
            let stages = if is_current_month && exclusions.is_excluded(date) == false {
                calendar.active_stages(date)
            } else {
                Vec::new()
            };
            CalendarDay { date, is_current_month, stages }
        })
        .collect()
}
