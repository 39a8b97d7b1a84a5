//! The drag gesture that selects the days to toggle
//!
//! This is independent from any input or rendering technology: the front-end translates its pointer events into
//! [`DragSelection::pointer_down`], [`DragSelection::pointer_enter`] and [`DragSelection::pointer_up`] calls,
//! giving the grid cell under the pointer (if any).

use chrono::NaiveDate;

use crate::calendar::{CalendarDay, DaySpan};

/// A selection that waits for the user to pick a stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingSelection {
    /// The pointer has been released on the cell it was pressed on
    Day(NaiveDate),
    /// The pointer has been dragged over several cells
    Range(DaySpan),
}

impl PendingSelection {
    pub fn span(&self) -> DaySpan {
        match self {
            PendingSelection::Day(day) => DaySpan::single(*day),
            PendingSelection::Range(span) => *span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Dragging { anchor: NaiveDate, candidate: NaiveDate },
    /// The stage picker is open
    Picking(PendingSelection),
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState::Idle
    }
}


/// Tracks a pointer drag over calendar cells
#[derive(Clone, Debug, Default)]
pub struct DragSelection {
    state: SelectionState,
}

impl DragSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SelectionState::Idle
    }

    /// The selection waiting for a stage, if the picker is open
    pub fn pending(&self) -> Option<PendingSelection> {
        match self.state {
            SelectionState::Picking(pending) => Some(pending),
            _ => None,
        }
    }

    /// Starts a drag. Only current-month cells can start one, and only when nothing else is in progress.
    /// Returns whether a drag has started
    pub fn pointer_down(&mut self, cell: &CalendarDay) -> bool {
        if self.is_idle() == false || cell.is_current_month() == false {
            return false;
        }
        let date = cell.date();
        self.state = SelectionState::Dragging { anchor: date, candidate: date };
        true
    }

    /// The pointer moved over `cell` (or outside of any cell, in case `cell` is `None`)
    pub fn pointer_enter(&mut self, cell: Option<&CalendarDay>) {
        if let SelectionState::Dragging { candidate, .. } = &mut self.state {
            match cell {
                Some(cell) if cell.is_current_month() => *candidate = cell.date(),
                // Keep the last valid candidate
                _ => (),
            }
        }
    }

    /// Ends a drag, and opens the stage picker.
    /// Returns the pending selection, or `None` if no drag was in progress
    pub fn pointer_up(&mut self, cell: Option<&CalendarDay>) -> Option<PendingSelection> {
        let (anchor, candidate) = match self.state {
            SelectionState::Dragging { anchor, candidate } => (anchor, candidate),
            _ => return None,
        };

        let end = match cell {
            Some(cell) if cell.is_current_month() => cell.date(),
            _ => candidate,
        };

        let pending = if anchor == end {
            PendingSelection::Day(anchor)
        } else {
            PendingSelection::Range(DaySpan::new(anchor, end))
        };
        log::debug!("Selection released: {:?}", pending);
        self.state = SelectionState::Picking(pending);
        Some(pending)
    }

    /// The span currently highlighted, while dragging or while the picker is open
    pub fn candidate_span(&self) -> Option<DaySpan> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { anchor, candidate } => Some(DaySpan::new(anchor, candidate)),
            SelectionState::Picking(pending) => Some(pending.span()),
        }
    }

    pub fn is_highlighted(&self, date: NaiveDate) -> bool {
        self.candidate_span().map_or(false, |span| span.contains(date))
    }

    /// A stage has been picked: closes the picker and returns the span to toggle
    pub fn confirm(&mut self) -> Option<DaySpan> {
        let pending = self.pending()?;
        self.state = SelectionState::Idle;
        Some(pending.span())
    }

    /// Discards whatever is in progress
    pub fn cancel(&mut self) {
        if self.is_idle() == false {
            log::debug!("Selection cancelled");
        }
        self.state = SelectionState::Idle;
    }
}
