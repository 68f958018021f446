// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! The inline-edit core.
//!
//! One edit session may be open at a time. Session values merge into a
//! deduplicated change-set when the editor blurs, dirty cells remember
//! their pre-edit baseline for the cancel path, and save validates the
//! most recent edit before handing the whole batch to the record source.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{CellKey, Field, RecordId};
use crate::remote::RecordSource;

pub mod changeset;
pub mod dirty;
pub mod rules;

pub use changeset::{ChangeEntry, ChangeSet};
pub use dirty::{DirtyCell, DirtyMarker};
pub use rules::{Rule, RuleSet, ValidationError};

/// Toast body used for any failed commit; the remote reason is not shown
/// to the user.
pub const COMMIT_FAILED_MESSAGE: &str = "Something went wrong!";

/// Opaque handle to one editable cell's visual region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// Visual operations the controller drives on the rendering layer.
///
/// The controller never inspects the rendered tree; it addresses regions
/// through the map populated via [`InlineEditController::register_cell`].
pub trait EditSurface {
    fn show_editor(&mut self, region: RegionId);
    fn hide_editor(&mut self, region: RegionId);
    fn focus_editor(&mut self, region: RegionId);
    fn set_cell_text(&mut self, region: RegionId, text: &str);
    fn set_dirty_background(&mut self, region: RegionId, dirty: bool);
}

/// The one field currently open for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    record_id: RecordId,
    field: Field,
    region: RegionId,
    original_value: String,
    current_value: String,
    changed: bool,
}

impl EditSession {
    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    pub fn current_value(&self) -> &str {
        &self.current_value
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Validation rejected the most recent edit. The pending batch was
    /// discarded exactly as if the user had cancelled.
    Rejected { message: String },
    /// The batch was committed and all pending state cleared.
    Committed,
    /// The remote call failed. Pending state is kept so save can be
    /// retried without re-entering the edits.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// No region was registered for the addressed cell.
    UnknownCell { cell: CellKey },
    /// A cell was addressed through a row index that is not rendered.
    UnknownRow { row: usize },
    /// A session operation arrived with no editor open.
    NoOpenSession,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCell { cell } => write!(f, "no region registered for cell '{cell}'"),
            Self::UnknownRow { row } => write!(f, "no rendered row at index {row}"),
            Self::NoOpenSession => f.write_str("no edit session is open"),
        }
    }
}

impl std::error::Error for EditError {}

/// Orchestrates edit sessions, the change-set, and dirty-cell bookkeeping.
///
/// Exclusively owns all pending-edit state; the canonical record list
/// belongs to the coordinator and is only read for lookups.
#[derive(Debug, Default)]
pub struct InlineEditController {
    regions: BTreeMap<CellKey, RegionId>,
    session: Option<EditSession>,
    changes: ChangeSet,
    dirty: DirtyMarker,
    rules: RuleSet,
    editing: bool,
    any_change: bool,
    last_edit: Option<(Field, String)>,
}

impl InlineEditController {
    pub fn new() -> Self {
        Self::with_rules(RuleSet::standard())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Registers the visual region backing a cell. Called by the rendering
    /// layer whenever rows are (re)bound.
    pub fn register_cell(&mut self, cell: CellKey, region: RegionId) {
        self.regions.insert(cell, region);
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
    }

    pub fn region_for(&self, cell: &CellKey) -> Option<RegionId> {
        self.regions.get(cell).copied()
    }

    /// True from the first opened session until save or cancel; drives the
    /// save/cancel affordances in the UI.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// True once any session concluded with a changed value.
    pub fn has_pending_changes(&self) -> bool {
        self.any_change
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn dirty(&self) -> &DirtyMarker {
        &self.dirty
    }

    /// The merged-but-uncommitted value for a cell, if any. Lets the
    /// rendering layer show pending values when a cell is reopened.
    pub fn pending_value(&self, record_id: &RecordId, field: Field) -> Option<&str> {
        self.changes.value(record_id, field)
    }

    /// Opens an edit session on a cell, hiding any currently visible
    /// editor first.
    ///
    /// Callers normally blur the previous session via
    /// [`close_session`](Self::close_session) before opening the next one;
    /// if they do not, the previous editor is hidden here and its unmerged
    /// input discarded (merged changes are unaffected, merging happens at
    /// blur).
    pub fn open_session(
        &mut self,
        surface: &mut impl EditSurface,
        cell: CellKey,
        initial_value: &str,
    ) -> Result<(), EditError> {
        let Some(region) = self.region_for(&cell) else {
            return Err(EditError::UnknownCell { cell });
        };
        if let Some(previous) = self.session.take() {
            surface.hide_editor(previous.region);
        }
        surface.show_editor(region);
        surface.focus_editor(region);

        let (field, record_id) = cell.into_parts();
        self.last_edit = Some((field, initial_value.to_owned()));
        self.session = Some(EditSession {
            record_id,
            field,
            region,
            original_value: initial_value.to_owned(),
            current_value: initial_value.to_owned(),
            changed: false,
        });
        self.editing = true;
        Ok(())
    }

    /// Records the editor's in-progress value. The change-set is not
    /// touched until the session blurs.
    pub fn update_session_value(&mut self, value: &str) -> Result<(), EditError> {
        let Some(session) = self.session.as_mut() else {
            return Err(EditError::NoOpenSession);
        };
        session.current_value = value.to_owned();
        session.changed = true;
        self.any_change = true;
        self.last_edit = Some((session.field, value.to_owned()));
        Ok(())
    }

    /// Blur: hides the editor and, if the session's value changed, merges
    /// it into the change-set and marks the cell dirty.
    pub fn close_session(&mut self, surface: &mut impl EditSurface) {
        let Some(session) = self.session.take() else {
            return;
        };
        surface.hide_editor(session.region);
        if !session.changed {
            return;
        }
        self.changes
            .merge(session.record_id, session.field, session.current_value.clone());
        surface.set_cell_text(session.region, &session.current_value);
        surface.set_dirty_background(session.region, true);
        self.dirty.record(session.region, session.original_value);
    }

    /// Full abort: every dirty cell is restored to its baseline and all
    /// pending state is dropped.
    pub fn cancel(&mut self, surface: &mut impl EditSurface) {
        if let Some(session) = self.session.take() {
            surface.hide_editor(session.region);
        }
        for cell in self.dirty.cells() {
            surface.set_cell_text(cell.region(), cell.baseline());
            surface.set_dirty_background(cell.region(), false);
        }
        self.reset();
    }

    /// Validates the most recent edit and commits the accumulated batch.
    ///
    /// The editor is hidden and editing mode exited before anything else,
    /// so no further input can arrive while the commit is outstanding.
    pub fn save(
        &mut self,
        surface: &mut impl EditSurface,
        remote: &mut impl RecordSource,
    ) -> SaveOutcome {
        if let Some(session) = self.session.take() {
            surface.hide_editor(session.region);
        }
        self.editing = false;

        if let Some((field, value)) = self.last_edit.clone() {
            if let Err(rejection) = self.rules.check(field, &value) {
                self.cancel(surface);
                return SaveOutcome::Rejected {
                    message: rejection.message,
                };
            }
        }

        match remote.commit_changes(&self.changes) {
            Ok(()) => {
                for cell in self.dirty.cells() {
                    surface.set_dirty_background(cell.region(), false);
                }
                self.reset();
                SaveOutcome::Committed
            }
            Err(_) => SaveOutcome::Failed {
                message: COMMIT_FAILED_MESSAGE.to_owned(),
            },
        }
    }

    fn reset(&mut self) {
        self.session = None;
        self.changes.clear();
        self.dirty.clear();
        self.editing = false;
        self.any_change = false;
        self.last_edit = None;
    }
}

#[cfg(test)]
mod tests;
