//! This module provides the roadmap store: stages, display name and stage calendar, backed by a [`Storage`]
//!
//! Edits are applied to a working copy. They become durable (and visible to read-only viewers) only once [`RoadmapStore::commit`] succeeds,
//! and can be abandoned with [`RoadmapStore::discard`].

use std::collections::HashSet;
use std::error::Error;

use serde::de::DeserializeOwned;

use crate::calendar::{DaySpan, StageCalendar, ToggleOutcome};
use crate::defaults;
use crate::settings::{self, CALENDAR_KEY, COMPANY_NAME_KEY, STAGES_KEY};
use crate::stage::{Stage, StageId};
use crate::traits::Storage;


/// Everything a roadmap is made of
#[derive(Clone, Debug, PartialEq)]
pub struct RoadmapData {
    company_name: String,
    stages: Vec<Stage>,
    calendar: StageCalendar,
}

impl RoadmapData {
    pub fn new(company_name: String, stages: Vec<Stage>, calendar: StageCalendar) -> Self {
        let mut data = Self { company_name, stages, calendar };
        data.prune_calendar();
        data
    }

    pub fn company_name(&self) -> &str         { &self.company_name }
    pub fn stages(&self) -> &[Stage]           { &self.stages }
    pub fn calendar(&self) -> &StageCalendar   { &self.calendar }

    pub fn stage(&self, id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id() == id)
    }

    /// The 0-based position of a stage in the roadmap
    pub fn stage_index(&self, id: &StageId) -> Option<usize> {
        self.stages.iter().position(|s| s.id() == id)
    }

    fn stage_ids(&self) -> HashSet<StageId> {
        self.stages.iter().map(|s| s.id().clone()).collect()
    }

    fn prune_calendar(&mut self) -> usize {
        let ids = self.stage_ids();
        self.calendar.prune_for_stages(&ids)
    }
}

impl Default for RoadmapData {
    fn default() -> Self {
        Self::new(settings::default_company_name(), defaults::default_stages(), defaults::default_calendar())
    }
}


/// The roadmap, with its committed state and its working copy
#[derive(Debug)]
pub struct RoadmapStore<S: Storage> {
    storage: S,
    committed: RoadmapData,
    working: RoadmapData,
}

impl<S: Storage> RoadmapStore<S> {
    /// Load the roadmap from `storage`.
    ///
    /// Every record that is missing or invalid is replaced by its built-in default. This never fails, errors are only logged.
    pub fn load(storage: S) -> Self {
        let company_name = match storage.get(COMPANY_NAME_KEY) {
            Ok(Some(name)) => name,
            Ok(None) => settings::default_company_name(),
            Err(err) => {
                log::warn!("Unable to read the company name: {}. Using the default one", err);
                settings::default_company_name()
            },
        };
        let stages = load_record(&storage, STAGES_KEY).unwrap_or_else(defaults::default_stages);
        let calendar = load_record(&storage, CALENDAR_KEY).unwrap_or_else(defaults::default_calendar);

        let mut data = RoadmapData { company_name, stages, calendar };
        let pruned = data.prune_calendar();
        if pruned > 0 {
            log::warn!("{} stored date ranges referenced unknown stages and have been dropped", pruned);
        }

        Self {
            storage,
            committed: data.clone(),
            working: data,
        }
    }

    /// Start from `data`, ignoring what `storage` contains. Nothing is written until the first commit
    pub fn with_data(storage: S, data: RoadmapData) -> Self {
        Self { storage, committed: data.clone(), working: data }
    }

    pub fn storage(&self) -> &S { &self.storage }
    pub fn storage_mut(&mut self) -> &mut S { &mut self.storage }

    /// The last committed state
    pub fn committed(&self) -> &RoadmapData { &self.committed }
    /// The state being edited
    pub fn working(&self) -> &RoadmapData { &self.working }

    pub fn has_unsaved_changes(&self) -> bool {
        self.working != self.committed
    }

    pub fn set_company_name(&mut self, name: String) {
        self.working.company_name = name;
    }

    /// Append a stage with placeholder content, and return its (new) id
    pub fn create_stage(&mut self) -> StageId {
        let stage = Stage::new();
        let id = stage.id().clone();
        log::debug!("Creating stage {}", id);
        self.working.stages.push(stage);
        id
    }

    /// Replace the content of a stage. The stage keeps its id, whatever the id of `replacement` is.
    /// Returns false if there is no such stage
    pub fn update_stage(&mut self, id: &StageId, mut replacement: Stage) -> bool {
        match self.working.stages.iter_mut().find(|s| s.id() == id) {
            None => false,
            Some(stage) => {
                replacement.id = id.clone();
                *stage = replacement;
                true
            },
        }
    }

    /// Edit a stage in place
    pub fn stage_mut(&mut self, id: &StageId) -> Option<&mut Stage> {
        self.working.stages.iter_mut().find(|s| s.id() == id)
    }

    /// Remove a stage and every date range it owns. Returns false if there is no such stage
    pub fn delete_stage(&mut self, id: &StageId) -> bool {
        let before = self.working.stages.len();
        self.working.stages.retain(|s| s.id() != id);
        if self.working.stages.len() == before {
            return false;
        }
        let pruned = self.working.prune_calendar();
        log::debug!("Deleted stage {} and {} of its date ranges", id, pruned);
        true
    }

    /// Flip the membership of a stage over a span in the working copy.
    /// Returns `None` (and does nothing) if the stage does not exist
    pub fn toggle_stage(&mut self, id: &StageId, span: DaySpan) -> Option<ToggleOutcome> {
        if self.working.stage(id).is_none() {
            log::warn!("Ignoring a toggle of unknown stage {}", id);
            return None;
        }
        Some(self.working.calendar.toggle_stage(id, span))
    }

    /// Persist the working copy. It becomes the committed state if (and only if) every record could be written.
    ///
    /// In case of an error, the records written so far are restored to their committed value, and the working copy is left untouched,
    /// so that the commit can be retried.
    pub fn commit(&mut self) -> Result<(), Box<dyn Error>> {
        let updated = records(&self.working)?;
        let previous = records(&self.committed)?;

        for (written, (key, value)) in updated.iter().enumerate() {
            if let Err(err) = self.storage.set(key, value) {
                log::warn!("Unable to write {}: {}. Restoring the {} records already written", key, err, written);
                for (key, value) in &previous[..written] {
                    if let Err(restore_err) = self.storage.set(key, value) {
                        log::warn!("Unable to restore {}: {}. Stored records may be inconsistent", key, restore_err);
                    }
                }
                return Err(err);
            }
        }

        self.committed = self.working.clone();
        log::info!("Roadmap saved ({} stages, {} date ranges)", self.committed.stages.len(), self.committed.calendar.ranges().len());
        Ok(())
    }

    /// Abandon every edit made since the last commit
    pub fn discard(&mut self) {
        if self.has_unsaved_changes() {
            log::info!("Discarding unsaved roadmap changes");
        }
        self.working = self.committed.clone();
    }
}

/// The stored form of a roadmap, in write order
fn records(data: &RoadmapData) -> Result<[(&'static str, String); 3], serde_json::Error> {
    Ok([
        (COMPANY_NAME_KEY, data.company_name.clone()),
        (STAGES_KEY, serde_json::to_string(&data.stages)?),
        (CALENDAR_KEY, serde_json::to_string(&data.calendar)?),
    ])
}

/// Read and deserialize a JSON record, or return `None` (after logging why) if that is not possible
fn load_record<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("No stored value for {}, using the default one", key);
            return None;
        },
        Err(err) => {
            log::warn!("Unable to read {}: {}. Using the default value", key, err);
            return None;
        },
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Invalid stored value for {}: {}. Using the default value", key, err);
            None
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use crate::storage::MemoryStorage;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn empty_storage_loads_defaults() {
        let store = RoadmapStore::load(MemoryStorage::new());
        assert_eq!(store.working(), &RoadmapData::default());
        assert_eq!(store.committed().stages().len(), 4);
        assert!(store.has_unsaved_changes() == false);
    }

    #[test]
    fn malformed_records_fall_back_independently() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut storage = MemoryStorage::new();
        storage.insert_raw(COMPANY_NAME_KEY, "ACME");
        storage.insert_raw(STAGES_KEY, "{ this is not json");
        storage.insert_raw(CALENDAR_KEY, r#"[{"start":"2026-02-03","end":"2026-02-04","stageId":"2"}]"#);

        let store = RoadmapStore::load(storage);
        assert_eq!(store.working().company_name(), "ACME");
        assert_eq!(store.working().stages(), defaults::default_stages().as_slice());
        assert_eq!(store.working().calendar().ranges().len(), 1);
    }

    #[test]
    fn orphan_ranges_are_dropped_on_load() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw(STAGES_KEY, r#"[{"id":"a","title":"A","tasks":[],"results":[],"duration":""}]"#);
        storage.insert_raw(CALENDAR_KEY, r#"[{"start":"2026-02-03","end":"2026-02-04","stageId":"a"},{"start":"2026-02-05","end":"2026-02-06","stageId":"gone"}]"#);

        let store = RoadmapStore::load(storage);
        assert_eq!(store.working().calendar().ranges().len(), 1);
        assert_eq!(store.working().calendar().ranges()[0].stage_id(), &StageId::from("a"));
    }

    #[test]
    fn edits_stay_in_the_working_copy_until_commit() {
        let mut store = RoadmapStore::load(MemoryStorage::new());
        let id = store.create_stage();
        store.set_company_name("ACME".to_string());

        assert!(store.has_unsaved_changes());
        assert!(store.committed().stage(&id).is_none());
        assert!(store.storage().is_empty());

        store.commit().unwrap();
        assert!(store.has_unsaved_changes() == false);
        assert_eq!(store.committed().stage_index(&id), Some(4));

        let reloaded = RoadmapStore::load(store.storage().clone());
        assert_eq!(reloaded.committed(), store.committed());
    }

    #[test]
    fn discard_reverts() {
        let mut store = RoadmapStore::load(MemoryStorage::new());
        let one = StageId::from("1");
        assert!(store.delete_stage(&one));
        assert!(store.working().calendar().ranges_for(&one).next().is_none());

        store.discard();
        assert!(store.working().stage(&one).is_some());
        assert_eq!(store.working().calendar().ranges_for(&one).count(), 1);
    }

    #[test]
    fn update_keeps_the_id() {
        let mut store = RoadmapStore::load(MemoryStorage::new());
        let two = StageId::from("2");
        let replacement = Stage::new_with_parameters("other".into(), "Style".to_string(), vec![], vec![], "".to_string());
        assert!(store.update_stage(&two, replacement));
        assert_eq!(store.working().stage(&two).map(|s| s.title()), Some("Style"));
        assert!(store.working().stage(&StageId::from("other")).is_none());

        assert!(store.update_stage(&StageId::from("nope"), Stage::new()) == false);

        if let Some(stage) = store.stage_mut(&two) {
            stage.add_task("one more".to_string());
        }
        assert_eq!(store.working().stage(&two).map(|s| s.tasks().len()), Some(1));
    }

    #[test]
    fn toggling_an_unknown_stage_does_nothing() {
        let mut store = RoadmapStore::load(MemoryStorage::new());
        assert_eq!(store.toggle_stage(&StageId::from("nope"), DaySpan::single(day(2, 3))), None);
        assert!(store.has_unsaved_changes() == false);
    }

    #[test]
    fn failed_commit_keeps_edits() {
        let mut storage = MemoryStorage::new();
        storage.set_read_only(true);
        let mut store = RoadmapStore::load(storage);

        let one = StageId::from("1");
        assert_eq!(store.toggle_stage(&one, DaySpan::single(day(2, 4))), Some(ToggleOutcome::Removed));
        assert!(store.commit().is_err());
        assert!(store.has_unsaved_changes());
        assert!(store.working().calendar().is_active(&one, day(2, 4)) == false);
        assert!(store.committed().calendar().is_active(&one, day(2, 4)));

        store.storage_mut().set_read_only(false);
        store.commit().unwrap();
        assert!(store.committed().calendar().is_active(&one, day(2, 4)) == false);
    }

    /// Refuses to write the calendar record, and only that one
    #[derive(Clone, Debug, Default)]
    struct CalendarWriteFails {
        inner: MemoryStorage,
    }

    impl Storage for CalendarWriteFails {
        fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
            if key == CALENDAR_KEY {
                return Err("calendar record is not writable".into());
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn partial_commit_is_rolled_back() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut store = RoadmapStore::load(CalendarWriteFails::default());
        let id = store.create_stage();
        store.set_company_name("ACME".to_string());
        assert_eq!(store.toggle_stage(&id, DaySpan::new(day(3, 16), day(3, 18))), Some(ToggleOutcome::Added));

        assert!(store.commit().is_err());
        store.discard();
        assert_eq!(store.working().stages().len(), 4);

        let reloaded = RoadmapStore::load(store.storage().clone());
        assert_eq!(reloaded.committed().stages().len(), 4);
        assert_eq!(reloaded.committed(), store.committed());
        assert!(reloaded.committed().stage(&id).is_none());
    }
}
