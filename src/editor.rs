//! The roadmap as seen by a user: read-only by default, editable once unlocked by a password
//!
//! The editor never redraws anything by itself. After each mutation, the front-end is expected to call [`RoadmapEditor::grid`] again.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::calendar::selection::{DragSelection, PendingSelection};
use crate::calendar::{grid, CalendarDay, DaySpan, ExclusionPolicy, ToggleOutcome, YearMonth};
use crate::defaults;
use crate::settings;
use crate::stage::{Stage, StageId};
use crate::store::{RoadmapData, RoadmapStore};
use crate::traits::Storage;

/// Why an editor action was refused
#[derive(Debug)]
pub enum EditError {
    /// The action requires the edit mode
    ReadOnly,
    /// The password did not match
    WrongPassword,
    /// The action refers to a stage that does not exist
    UnknownStage(StageId),
    /// A stage has been picked while no selection was pending
    NoSelection,
    /// The roadmap could not be saved. Edits are still in the working copy
    Storage(Box<dyn Error>),
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::ReadOnly => write!(f, "This action requires the edit mode"),
            EditError::WrongPassword => write!(f, "Wrong password"),
            EditError::UnknownStage(id) => write!(f, "No stage with id {}", id),
            EditError::NoSelection => write!(f, "No day is selected"),
            EditError::Storage(err) => write!(f, "Unable to save the roadmap: {}", err),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EditError::Storage(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}


/// Whether the roadmap can be modified
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    ReadOnly,
    Edit,
}


pub struct RoadmapEditor<S: Storage> {
    store: RoadmapStore<S>,
    selection: DragSelection,
    mode: Mode,
    read_only_exclusions: ExclusionPolicy,
}

impl<S: Storage> RoadmapEditor<S> {
    /// Load the roadmap from `storage`, in read-only mode
    pub fn new(storage: S) -> Self {
        Self::from_store(RoadmapStore::load(storage))
    }

    pub fn from_store(store: RoadmapStore<S>) -> Self {
        Self {
            store,
            selection: DragSelection::new(),
            mode: Mode::ReadOnly,
            read_only_exclusions: defaults::default_exclusions(),
        }
    }

    /// Change the days that never show a stage in read-only mode
    pub fn set_read_only_exclusions(&mut self, policy: ExclusionPolicy) {
        self.read_only_exclusions = policy;
    }

    pub fn mode(&self) -> Mode { self.mode }
    pub fn is_edit_mode(&self) -> bool { self.mode == Mode::Edit }
    pub fn store(&self) -> &RoadmapStore<S> { &self.store }
    pub fn selection(&self) -> &DragSelection { &self.selection }

    /// The data to display: the working copy in edit mode, the committed state otherwise
    pub fn roadmap(&self) -> &RoadmapData {
        match self.mode {
            Mode::Edit => self.store.working(),
            Mode::ReadOnly => self.store.committed(),
        }
    }

    pub fn displayed_months(&self) -> Vec<YearMonth> {
        settings::displayed_months()
    }

    /// The grid of a month, as it should currently be displayed
    pub fn grid(&self, year_month: YearMonth) -> Vec<CalendarDay> {
        match self.mode {
            Mode::Edit => grid::generate(year_month, self.store.working().calendar(), &ExclusionPolicy::none()),
            Mode::ReadOnly => grid::generate(year_month, self.store.committed().calendar(), &self.read_only_exclusions),
        }
    }

    pub fn enter_edit_mode(&mut self, password: &str) -> Result<(), EditError> {
        if self.is_edit_mode() {
            return Ok(());
        }
        if settings::check_password(password) == false {
            log::info!("Edit mode refused: wrong password");
            return Err(EditError::WrongPassword);
        }
        log::info!("Entering edit mode");
        self.mode = Mode::Edit;
        Ok(())
    }

    /// Leave the edit mode, abandoning whatever has not been saved
    pub fn exit_edit_mode(&mut self) {
        if self.is_edit_mode() == false {
            return;
        }
        log::info!("Leaving edit mode");
        self.selection.cancel();
        self.store.discard();
        self.mode = Mode::ReadOnly;
    }

    /// Commit the working copy. In case of failure, the edits are kept so that saving can be retried
    pub fn save(&mut self) -> Result<(), EditError> {
        self.require_edit_mode()?;
        self.store.commit().map_err(|err| {
            log::warn!("Unable to save the roadmap: {}", err);
            EditError::Storage(err)
        })
    }

    fn require_edit_mode(&self) -> Result<(), EditError> {
        match self.mode {
            Mode::Edit => Ok(()),
            Mode::ReadOnly => Err(EditError::ReadOnly),
        }
    }

    pub fn set_company_name(&mut self, name: String) -> Result<(), EditError> {
        self.require_edit_mode()?;
        self.store.set_company_name(name);
        Ok(())
    }

    pub fn create_stage(&mut self) -> Result<StageId, EditError> {
        self.require_edit_mode()?;
        Ok(self.store.create_stage())
    }

    pub fn update_stage(&mut self, id: &StageId, replacement: Stage) -> Result<(), EditError> {
        self.require_edit_mode()?;
        match self.store.update_stage(id, replacement) {
            true => Ok(()),
            false => Err(EditError::UnknownStage(id.clone())),
        }
    }

    pub fn stage_mut(&mut self, id: &StageId) -> Result<&mut Stage, EditError> {
        self.require_edit_mode()?;
        self.store.stage_mut(id).ok_or_else(|| EditError::UnknownStage(id.clone()))
    }

    pub fn delete_stage(&mut self, id: &StageId) -> Result<(), EditError> {
        self.require_edit_mode()?;
        match self.store.delete_stage(id) {
            true => Ok(()),
            false => Err(EditError::UnknownStage(id.clone())),
        }
    }

    pub fn toggle_stage(&mut self, id: &StageId, span: DaySpan) -> Result<ToggleOutcome, EditError> {
        self.require_edit_mode()?;
        self.store.toggle_stage(id, span).ok_or_else(|| EditError::UnknownStage(id.clone()))
    }

    /// The pointer has been pressed on a cell. Ignored in read-only mode
    pub fn pointer_down(&mut self, cell: &CalendarDay) -> bool {
        self.is_edit_mode() && self.selection.pointer_down(cell)
    }

    pub fn pointer_enter(&mut self, cell: Option<&CalendarDay>) {
        self.selection.pointer_enter(cell);
    }

    /// The pointer has been released. Returns the selection the stage picker should be opened for
    pub fn pointer_up(&mut self, cell: Option<&CalendarDay>) -> Option<PendingSelection> {
        self.selection.pointer_up(cell)
    }

    /// A stage has been picked for the pending selection: toggle it over the selected span and close the picker.
    ///
    /// The picker stays open if the stage does not exist.
    pub fn pick_stage(&mut self, id: &StageId) -> Result<ToggleOutcome, EditError> {
        self.require_edit_mode()?;
        let span = match self.selection.pending() {
            Some(pending) => pending.span(),
            None => return Err(EditError::NoSelection),
        };
        let outcome = self.toggle_stage(id, span)?;
        self.selection.confirm();
        Ok(outcome)
    }

    /// Close the stage picker (or abort a drag) without changing anything
    pub fn cancel_selection(&mut self) {
        self.selection.cancel();
    }
}
