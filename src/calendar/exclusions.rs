//! Days that never display any stage in the read-only calendar

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use bitflags::bitflags;

bitflags! {
    #[derive(Serialize, Deserialize)]
    pub struct DayExclusions: u8 {
        /// Saturdays and Sundays
        const WEEKENDS = 1;
        /// The days listed in [`ExclusionPolicy::holidays`]
        const HOLIDAYS = 2;
    }
}

impl Default for DayExclusions {
    fn default() -> Self {
        Self::empty()
    }
}


/// Which days are kept free of stage assignments when a grid is generated
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    exclusions: DayExclusions,
    holidays: Vec<NaiveDate>,
}

impl ExclusionPolicy {
    pub fn new(exclusions: DayExclusions, holidays: Vec<NaiveDate>) -> Self {
        Self { exclusions, holidays }
    }

    /// A policy that excludes nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        if self.exclusions.contains(DayExclusions::WEEKENDS) {
            if let Weekday::Sat | Weekday::Sun = date.weekday() {
                return true;
            }
        }
        self.exclusions.contains(DayExclusions::HOLIDAYS) && self.holidays.contains(&date)
    }
}
