// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Child component: the rendered contact rows and their interaction flows.
//!
//! Owns the inline-edit controller and a queue of signals raised upward to
//! the list coordinator. Never mutates the canonical record list; it works
//! on cloned rows and leaves list ownership to the parent.

use crate::edit::{EditError, EditSurface, InlineEditController, RegionId, SaveOutcome};
use crate::model::{CellKey, Field, ParentId, Record, RecordId};
use crate::remote::{
    ConfirmDialog, ConfirmOutcome, CreateEditDialog, DialogMode, DialogOutcome, DialogRequest,
    Notifier, PicklistOption, PicklistSource,
};
use crate::remote::RecordSource;

/// Signals the table raises to the list coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The user confirmed deletion; the parent owns the remote call.
    DeleteRequested { record_id: RecordId },
    /// The edit dialog already persisted changes; the parent only needs to
    /// refresh and notify.
    EditCommitted { record: Record },
    RefreshRequested,
    Error { message: String },
}

/// One rendered row: the cloned record plus its synthetic cell keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    record: Record,
    cells: Vec<CellKey>,
}

impl TableRow {
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Cell keys in [`Field::ALL`] order.
    pub fn cells(&self) -> &[CellKey] {
        &self.cells
    }
}

#[derive(Debug, Default)]
pub struct ContactTable {
    parent_id: Option<ParentId>,
    parent_name: String,
    rows: Vec<TableRow>,
    lead_sources: Vec<PicklistOption>,
    controller: InlineEditController,
    signals: Vec<Signal>,
}

impl ContactTable {
    pub fn new(parent_id: ParentId) -> Self {
        Self {
            parent_id: Some(parent_id),
            controller: InlineEditController::new(),
            ..Self::default()
        }
    }

    /// Rebuilds the rows from the canonical list, cloning each record and
    /// rebinding the controller's region map: region ids run row-major
    /// over [`Field::ALL`].
    pub fn set_records(&mut self, parent_name: &str, records: &[Record]) {
        self.parent_name = parent_name.to_owned();
        self.rows = records
            .iter()
            .map(|record| TableRow {
                record: record.clone(),
                cells: Field::ALL
                    .into_iter()
                    .map(|field| CellKey::new(field, record.record_id().clone()))
                    .collect(),
            })
            .collect();

        self.controller.clear_regions();
        for (row, table_row) in self.rows.iter().enumerate() {
            for (col, cell) in table_row.cells.iter().enumerate() {
                self.controller
                    .register_cell(cell.clone(), Self::region_at(row, col));
            }
        }
    }

    pub fn region_at(row: usize, col: usize) -> RegionId {
        RegionId(row * Field::ALL.len() + col)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn controller(&self) -> &InlineEditController {
        &self.controller
    }

    pub fn lead_sources(&self) -> &[PicklistOption] {
        &self.lead_sources
    }

    pub fn record(&self, record_id: &RecordId) -> Option<&Record> {
        self.rows
            .iter()
            .map(TableRow::record)
            .find(|record| record.record_id() == record_id)
    }

    /// The value a cell currently shows: the pending edit if one exists,
    /// otherwise the record value.
    pub fn display_value(&self, row: usize, field: Field) -> &str {
        let Some(table_row) = self.rows.get(row) else {
            return "";
        };
        self.controller
            .pending_value(table_row.record.record_id(), field)
            .unwrap_or_else(|| table_row.record.get(field))
    }

    pub fn open_cell(
        &mut self,
        surface: &mut impl EditSurface,
        row: usize,
        field: Field,
    ) -> Result<(), EditError> {
        let Some(table_row) = self.rows.get(row) else {
            return Err(EditError::UnknownRow { row });
        };
        let cell = table_row.cells[field.index()].clone();
        let initial = self.display_value(row, field).to_owned();
        self.controller.open_session(surface, cell, &initial)
    }

    pub fn edit_value(&mut self, value: &str) -> Result<(), EditError> {
        self.controller.update_session_value(value)
    }

    pub fn blur(&mut self, surface: &mut impl EditSurface) {
        self.controller.close_session(surface);
    }

    pub fn cancel(&mut self, surface: &mut impl EditSurface) {
        self.controller.cancel(surface);
    }

    /// Saves the accumulated batch. Success toasts here (the child owns
    /// the commit) and asks the parent for a refresh; a validation
    /// rejection is raised as an error signal for the parent to surface.
    pub fn save(
        &mut self,
        surface: &mut impl EditSurface,
        remote: &mut impl RecordSource,
        notifier: &mut impl Notifier,
    ) {
        match self.controller.save(surface, remote) {
            SaveOutcome::Committed => {
                notifier.success("Success", "Contacts updated!");
                self.signals.push(Signal::RefreshRequested);
            }
            SaveOutcome::Rejected { message } => {
                self.signals.push(Signal::Error { message });
            }
            SaveOutcome::Failed { message } => {
                notifier.error("Error", &message);
            }
        }
    }

    /// Confirmation-gated delete; only raises the signal when the user
    /// proceeds.
    pub fn request_delete(&mut self, dialog: &mut impl ConfirmDialog, record_id: &RecordId) {
        let record = self.record(record_id);
        if dialog.confirm_delete(record) == ConfirmOutcome::Proceed {
            self.signals.push(Signal::DeleteRequested {
                record_id: record_id.clone(),
            });
        }
    }

    /// Full-form edit through the record dialog; the dialog persists the
    /// record itself, so a save here only notifies the parent.
    pub fn request_edit(&mut self, dialog: &mut impl CreateEditDialog, record_id: &RecordId) {
        let Some(record) = self.record(record_id).cloned() else {
            self.signals.push(Signal::Error {
                message: format!("No contact with id '{record_id}'."),
            });
            return;
        };
        let Some(parent_id) = self.parent_id.as_ref() else {
            return;
        };
        let request = DialogRequest {
            parent_id,
            parent_name: &self.parent_name,
            record: Some(&record),
            mode: DialogMode::Edit,
        };
        if dialog.open(request) == DialogOutcome::Saved {
            self.signals.push(Signal::EditCommitted { record });
        }
    }

    /// Fetches the picklist options once per table lifetime; a failed
    /// fetch leaves the options empty.
    pub fn load_picklist(&mut self, source: &mut impl PicklistSource) {
        match source.fetch(Field::LeadSource) {
            Ok(options) => self.lead_sources = options,
            Err(_) => self.lead_sources.clear(),
        }
    }

    /// Navigation target for a row's detail view; navigation itself is an
    /// external concern.
    pub fn detail_target(&self, row: usize) -> Option<&RecordId> {
        self.rows.get(row).map(|table_row| table_row.record.record_id())
    }

    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactTable, Signal};
    use crate::edit::{EditSurface, RegionId};
    use crate::model::{fixtures, Field, RecordId};
    use crate::model::Record;
    use crate::remote::{
        ConfirmDialog, ConfirmOutcome, CreateEditDialog, DialogMode, DialogOutcome, DialogRequest,
        Notifier,
    };

    #[derive(Debug, Default)]
    struct NullSurface;

    impl EditSurface for NullSurface {
        fn show_editor(&mut self, _region: RegionId) {}
        fn hide_editor(&mut self, _region: RegionId) {}
        fn focus_editor(&mut self, _region: RegionId) {}
        fn set_cell_text(&mut self, _region: RegionId, _text: &str) {}
        fn set_dirty_background(&mut self, _region: RegionId, _dirty: bool) {}
    }

    #[derive(Debug, Default)]
    struct RecordingNotifier {
        toasts: Vec<(String, String, String)>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&mut self, title: &str, message: &str) {
            self.toasts.push(("success".into(), title.into(), message.into()));
        }

        fn error(&mut self, title: &str, message: &str) {
            self.toasts.push(("error".into(), title.into(), message.into()));
        }
    }

    struct ScriptedConfirm(ConfirmOutcome);

    impl ConfirmDialog for ScriptedConfirm {
        fn confirm_delete(&mut self, _record: Option<&Record>) -> ConfirmOutcome {
            self.0
        }
    }

    struct ScriptedDialog {
        outcome: DialogOutcome,
        seen_mode: Option<DialogMode>,
    }

    impl CreateEditDialog for ScriptedDialog {
        fn open(&mut self, request: DialogRequest<'_>) -> DialogOutcome {
            self.seen_mode = Some(request.mode);
            self.outcome
        }
    }

    fn demo_table() -> ContactTable {
        let mut table = ContactTable::new(fixtures::demo_parent_id());
        table.set_records(fixtures::DEMO_PARENT_NAME, &fixtures::demo_records());
        table
    }

    fn rid(value: &str) -> RecordId {
        RecordId::new(value).expect("record id")
    }

    #[test]
    fn set_records_binds_one_region_per_cell() {
        let table = demo_table();
        let rows = table.rows();
        assert_eq!(rows.len(), fixtures::demo_records().len());
        for (row, table_row) in rows.iter().enumerate() {
            for (col, cell) in table_row.cells().iter().enumerate() {
                assert_eq!(
                    table.controller().region_for(cell),
                    Some(ContactTable::region_at(row, col))
                );
            }
        }
    }

    #[test]
    fn display_value_prefers_the_pending_edit() {
        let mut table = demo_table();
        let mut surface = NullSurface;

        assert_eq!(table.display_value(0, Field::LastName), "Okafor");
        table.open_cell(&mut surface, 0, Field::LastName).expect("open");
        table.edit_value("Smith").expect("edit");
        table.blur(&mut surface);

        assert_eq!(table.display_value(0, Field::LastName), "Smith");
        // and the pending value is what a reopened editor starts from
        table.open_cell(&mut surface, 0, Field::LastName).expect("reopen");
        let session = table.controller().session().expect("session");
        assert_eq!(session.original_value(), "Smith");
    }

    #[test]
    fn delete_is_gated_on_confirmation() {
        let mut table = demo_table();

        table.request_delete(&mut ScriptedConfirm(ConfirmOutcome::Dismissed), &rid("0035g00001"));
        assert!(table.drain_signals().is_empty());

        table.request_delete(&mut ScriptedConfirm(ConfirmOutcome::Proceed), &rid("0035g00001"));
        assert_eq!(
            table.drain_signals(),
            vec![Signal::DeleteRequested {
                record_id: rid("0035g00001")
            }]
        );
    }

    #[test]
    fn edit_dialog_save_raises_edit_committed() {
        let mut table = demo_table();
        let mut dialog = ScriptedDialog {
            outcome: DialogOutcome::Saved,
            seen_mode: None,
        };

        table.request_edit(&mut dialog, &rid("0035g00002"));

        assert_eq!(dialog.seen_mode, Some(DialogMode::Edit));
        let signals = table.drain_signals();
        assert_eq!(signals.len(), 1);
        let Signal::EditCommitted { record } = &signals[0] else {
            panic!("expected EditCommitted, got {signals:?}");
        };
        assert_eq!(record.record_id(), &rid("0035g00002"));
    }

    #[test]
    fn edit_of_unknown_record_surfaces_an_error_signal() {
        let mut table = demo_table();
        let mut dialog = ScriptedDialog {
            outcome: DialogOutcome::Saved,
            seen_mode: None,
        };

        table.request_edit(&mut dialog, &rid("missing"));

        assert!(dialog.seen_mode.is_none());
        assert_eq!(
            table.drain_signals(),
            vec![Signal::Error {
                message: "No contact with id 'missing'.".to_owned()
            }]
        );
    }

    #[test]
    fn save_toasts_success_and_requests_a_refresh() {
        let mut table = demo_table();
        let mut surface = NullSurface;
        let mut notifier = RecordingNotifier::default();
        let mut remote = crate::remote::InMemorySource::demo();

        table.open_cell(&mut surface, 0, Field::LastName).expect("open");
        table.edit_value("Smith").expect("edit");
        table.blur(&mut surface);
        table.save(&mut surface, &mut remote, &mut notifier);

        assert_eq!(
            notifier.toasts,
            vec![("success".into(), "Success".into(), "Contacts updated!".into())]
        );
        assert_eq!(table.drain_signals(), vec![Signal::RefreshRequested]);
    }

    #[test]
    fn rejected_save_raises_an_error_signal_instead_of_toasting() {
        let mut table = demo_table();
        let mut surface = NullSurface;
        let mut notifier = RecordingNotifier::default();
        let mut remote = crate::remote::InMemorySource::demo();

        table.open_cell(&mut surface, 0, Field::LastName).expect("open");
        table.edit_value("  ").expect("edit");
        table.blur(&mut surface);
        table.save(&mut surface, &mut remote, &mut notifier);

        assert!(notifier.toasts.is_empty());
        assert_eq!(
            table.drain_signals(),
            vec![Signal::Error {
                message: "Last Name value cannot be blank.".to_owned()
            }]
        );
    }
}
