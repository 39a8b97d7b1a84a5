//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

use crate::calendar::YearMonth;

/// The password that unlocks the edit mode.
/// Feel free to override it when initing this library.
pub static EDIT_PASSWORD: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("sapphire".to_string())));

/// The display name used when no name has been stored yet.
/// Feel free to override it when initing this library.
pub static DEFAULT_COMPANY_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("САПФИР".to_string())));

/// The word that prefixes stage numbers in labels ("Этап 2: ...").
/// Feel free to override it when initing this library.
pub static STAGE_LABEL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Этап".to_string())));

/// Storage key of the display name (stored as a plain string)
pub const COMPANY_NAME_KEY: &str = "roadmap.company_name";
/// Storage key of the stage list (stored as JSON)
pub const STAGES_KEY: &str = "roadmap.stages";
/// Storage key of the date ranges (stored as JSON)
pub const CALENDAR_KEY: &str = "roadmap.calendar";

/// The (year, month) pairs the calendar displays
pub const DISPLAYED_MONTHS: [(i32, u32); 2] = [(2026, 2), (2026, 3)];

/// Returns the displayed months as validated [`YearMonth`]s
pub fn displayed_months() -> Vec<YearMonth> {
    DISPLAYED_MONTHS.iter()
        .filter_map(|&(year, month)| YearMonth::new(year, month))
        .collect()
}

/// Returns whether `candidate` matches the configured [`EDIT_PASSWORD`]
pub fn check_password(candidate: &str) -> bool {
    match EDIT_PASSWORD.lock() {
        Ok(password) => *password == candidate,
        Err(err) => {
            log::warn!("Unable to read the edit password: {}", err);
            false
        }
    }
}

/// Returns a copy of the configured [`DEFAULT_COMPANY_NAME`]
pub fn default_company_name() -> String {
    match DEFAULT_COMPANY_NAME.lock() {
        Ok(name) => name.clone(),
        Err(err) => err.into_inner().clone(),
    }
}

/// Returns a copy of the configured [`STAGE_LABEL`]
pub fn stage_label() -> String {
    match STAGE_LABEL.lock() {
        Ok(label) => label.clone(),
        Err(err) => err.into_inner().clone(),
    }
}
