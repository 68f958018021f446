// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde_json::json;

use super::{EditError, EditSurface, InlineEditController, RegionId, SaveOutcome};
use crate::model::{CellKey, Field, ParentId, ParentRecords, RecordId};
use crate::remote::{RecordSource, RemoteError};

#[derive(Debug, Default)]
struct FakeSurface {
    shown: Vec<RegionId>,
    hidden: Vec<RegionId>,
    focused: Vec<RegionId>,
    texts: BTreeMap<RegionId, String>,
    dirty: BTreeMap<RegionId, bool>,
}

impl EditSurface for FakeSurface {
    fn show_editor(&mut self, region: RegionId) {
        self.shown.push(region);
    }

    fn hide_editor(&mut self, region: RegionId) {
        self.hidden.push(region);
    }

    fn focus_editor(&mut self, region: RegionId) {
        self.focused.push(region);
    }

    fn set_cell_text(&mut self, region: RegionId, text: &str) {
        self.texts.insert(region, text.to_owned());
    }

    fn set_dirty_background(&mut self, region: RegionId, dirty: bool) {
        self.dirty.insert(region, dirty);
    }
}

impl FakeSurface {
    fn text(&self, region: RegionId) -> &str {
        self.texts.get(&region).map(String::as_str).unwrap_or("")
    }

    fn is_dirty(&self, region: RegionId) -> bool {
        self.dirty.get(&region).copied().unwrap_or(false)
    }
}

#[derive(Debug, Default)]
struct FakeRemote {
    fail_remaining: usize,
    payloads: Vec<serde_json::Value>,
}

impl FakeRemote {
    fn failing(times: usize) -> Self {
        Self {
            fail_remaining: times,
            payloads: Vec::new(),
        }
    }
}

impl RecordSource for FakeRemote {
    fn fetch_associated(&mut self, _parent_id: &ParentId) -> Result<ParentRecords, RemoteError> {
        Ok(ParentRecords::default())
    }

    fn commit_changes(&mut self, changes: &super::ChangeSet) -> Result<(), RemoteError> {
        self.payloads.push(serde_json::to_value(changes).expect("serialize"));
        if self.fail_remaining > 0 {
            self.fail_remaining -= 1;
            return Err(RemoteError::new("storage offline"));
        }
        Ok(())
    }

    fn delete_record(&mut self, _record_id: &RecordId) -> Result<(), RemoteError> {
        Ok(())
    }
}

fn rid(value: &str) -> RecordId {
    RecordId::new(value).expect("record id")
}

fn cell(field: Field, id: &str) -> CellKey {
    CellKey::new(field, rid(id))
}

fn region(row: usize, field: Field) -> RegionId {
    RegionId(row * Field::ALL.len() + field.index())
}

/// Controller with regions registered for the given record ids, one region
/// per (row, field) in row-major order.
fn controller_for(ids: &[&str]) -> InlineEditController {
    let mut controller = InlineEditController::new();
    for (row, id) in ids.iter().enumerate() {
        for field in Field::ALL {
            controller.register_cell(cell(field, id), region(row, field));
        }
    }
    controller
}

fn edit(
    controller: &mut InlineEditController,
    surface: &mut FakeSurface,
    field: Field,
    id: &str,
    from: &str,
    to: &str,
) {
    controller
        .open_session(surface, cell(field, id), from)
        .expect("open session");
    controller.update_session_value(to).expect("update value");
    controller.close_session(surface);
}

#[test]
fn distinct_records_accumulate_one_entry_each() {
    let mut controller = controller_for(&["A-1", "A-2", "A-3"]);
    let mut surface = FakeSurface::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    edit(&mut controller, &mut surface, Field::Email, "A-2", "", "x@y.com");
    edit(&mut controller, &mut surface, Field::FirstName, "A-2", "Jonas", "Jon");

    let changes = controller.changes();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes.value(&rid("A-1"), Field::LastName), Some("Smith"));
    assert_eq!(changes.value(&rid("A-2"), Field::Email), Some("x@y.com"));
    assert_eq!(changes.value(&rid("A-2"), Field::FirstName), Some("Jon"));
    assert_eq!(changes.value(&rid("A-1"), Field::Email), None);
    assert_eq!(changes.value(&rid("A-3"), Field::LastName), None);
}

#[test]
fn editing_the_same_field_twice_keeps_one_entry_with_latest_value() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Smith", "Smythe");

    assert_eq!(controller.changes().len(), 1);
    assert_eq!(controller.changes().value(&rid("A-1"), Field::LastName), Some("Smythe"));
    assert_eq!(controller.dirty().len(), 1);
}

#[test]
fn closing_an_unchanged_session_merges_nothing() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();

    controller
        .open_session(&mut surface, cell(Field::Email, "A-1"), "x@y.com")
        .expect("open session");
    controller.close_session(&mut surface);

    assert!(controller.changes().is_empty());
    assert!(controller.dirty().is_empty());
    assert!(controller.is_editing());
    assert!(!controller.has_pending_changes());
}

#[test]
fn open_unregistered_cell_is_a_hard_error() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();

    let missing = cell(Field::Email, "A-9");
    let err = controller
        .open_session(&mut surface, missing.clone(), "")
        .expect_err("unknown cell");
    assert_eq!(err, EditError::UnknownCell { cell: missing });
    assert!(surface.shown.is_empty());
}

#[test]
fn update_without_open_session_is_a_hard_error() {
    let mut controller = controller_for(&["A-1"]);
    assert_eq!(controller.update_session_value("x"), Err(EditError::NoOpenSession));
}

#[test]
fn opening_a_new_session_hides_the_previous_editor() {
    let mut controller = controller_for(&["A-1", "A-2"]);
    let mut surface = FakeSurface::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    controller
        .open_session(&mut surface, cell(Field::Email, "A-2"), "")
        .expect("open second session");

    // merged change from the first session survives
    assert_eq!(controller.changes().value(&rid("A-1"), Field::LastName), Some("Smith"));
    assert_eq!(surface.shown, vec![region(0, Field::LastName), region(1, Field::Email)]);
    assert_eq!(surface.focused.last(), Some(&region(1, Field::Email)));
}

#[test]
fn merge_happens_at_blur_and_updates_the_displayed_cell() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();

    controller
        .open_session(&mut surface, cell(Field::LastName, "A-1"), "Okafor")
        .expect("open session");
    controller.update_session_value("Smith").expect("update value");

    // nothing merged while the editor is still open
    assert!(controller.changes().is_empty());

    controller.close_session(&mut surface);
    let target = region(0, Field::LastName);
    assert_eq!(surface.text(target), "Smith");
    assert!(surface.is_dirty(target));
    assert_eq!(controller.pending_value(&rid("A-1"), Field::LastName), Some("Smith"));
}

#[test]
fn cancel_restores_baselines_and_clears_everything() {
    let mut controller = controller_for(&["A-1", "A-2"]);
    let mut surface = FakeSurface::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Smith", "Smythe");
    edit(&mut controller, &mut surface, Field::Email, "A-2", "old@y.com", "new@y.com");

    controller.cancel(&mut surface);

    // twice-edited cell reverts to its first baseline, not the midpoint
    assert_eq!(surface.text(region(0, Field::LastName)), "Okafor");
    assert_eq!(surface.text(region(1, Field::Email)), "old@y.com");
    assert!(!surface.is_dirty(region(0, Field::LastName)));
    assert!(!surface.is_dirty(region(1, Field::Email)));
    assert!(controller.changes().is_empty());
    assert!(controller.dirty().is_empty());
    assert!(!controller.is_editing());
    assert!(!controller.has_pending_changes());
}

#[test]
fn save_with_blank_required_field_never_reaches_the_remote() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();
    let mut remote = FakeRemote::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "   ");

    let outcome = controller.save(&mut surface, &mut remote);
    assert_eq!(
        outcome,
        SaveOutcome::Rejected {
            message: "Last Name value cannot be blank.".to_owned()
        }
    );
    assert!(remote.payloads.is_empty());
    // behaves exactly like cancel
    assert_eq!(surface.text(region(0, Field::LastName)), "Okafor");
    assert!(controller.changes().is_empty());
    assert!(controller.dirty().is_empty());
    assert!(!controller.is_editing());
}

#[test]
fn save_serializes_the_batch_in_first_touch_order() {
    let mut controller = controller_for(&["A-1", "A-2"]);
    let mut surface = FakeSurface::default();
    let mut remote = FakeRemote::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    edit(&mut controller, &mut surface, Field::Email, "A-2", "", "x@y.com");

    let outcome = controller.save(&mut surface, &mut remote);
    assert_eq!(outcome, SaveOutcome::Committed);
    assert_eq!(
        remote.payloads,
        vec![json!([
            { "Id": "A-1", "LastName": "Smith" },
            { "Id": "A-2", "Email": "x@y.com" },
        ])]
    );
}

#[test]
fn successful_save_clears_state_but_keeps_new_cell_text() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();
    let mut remote = FakeRemote::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    assert_eq!(controller.save(&mut surface, &mut remote), SaveOutcome::Committed);

    let target = region(0, Field::LastName);
    assert_eq!(surface.text(target), "Smith");
    assert!(!surface.is_dirty(target));
    assert!(controller.changes().is_empty());
    assert!(controller.dirty().is_empty());
    assert!(!controller.is_editing());
    assert!(!controller.has_pending_changes());
}

#[test]
fn failed_save_keeps_state_and_retry_resends_identical_contents() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();
    let mut remote = FakeRemote::failing(1);

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");

    let outcome = controller.save(&mut surface, &mut remote);
    assert_eq!(
        outcome,
        SaveOutcome::Failed {
            message: super::COMMIT_FAILED_MESSAGE.to_owned()
        }
    );
    // state preserved for retry
    assert_eq!(controller.changes().len(), 1);
    assert_eq!(controller.dirty().len(), 1);
    assert!(surface.is_dirty(region(0, Field::LastName)));

    assert_eq!(controller.save(&mut surface, &mut remote), SaveOutcome::Committed);
    assert_eq!(remote.payloads.len(), 2);
    assert_eq!(remote.payloads[0], remote.payloads[1]);
}

#[test]
fn save_exits_editing_mode_before_the_commit_even_on_failure() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();
    let mut remote = FakeRemote::failing(1);

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    controller.save(&mut surface, &mut remote);

    assert!(!controller.is_editing());
    assert!(controller.session().is_none());
}

#[test]
fn typed_but_unblurred_input_is_validated_but_never_committed() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();

    // blank surname typed into a still-open editor blocks the save
    edit(&mut controller, &mut surface, Field::Email, "A-1", "", "x@y.com");
    controller
        .open_session(&mut surface, cell(Field::LastName, "A-1"), "Okafor")
        .expect("open session");
    controller.update_session_value("  ").expect("update value");

    let mut remote = FakeRemote::default();
    let outcome = controller.save(&mut surface, &mut remote);
    assert!(matches!(outcome, SaveOutcome::Rejected { .. }));
    assert!(remote.payloads.is_empty());
}

#[test]
fn unblurred_valid_input_is_left_out_of_the_committed_batch() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();
    let mut remote = FakeRemote::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    controller
        .open_session(&mut surface, cell(Field::Email, "A-1"), "")
        .expect("open session");
    controller.update_session_value("typed@but.lost").expect("update value");

    assert_eq!(controller.save(&mut surface, &mut remote), SaveOutcome::Committed);
    assert_eq!(remote.payloads, vec![json!([{ "Id": "A-1", "LastName": "Smith" }])]);
}

#[test]
fn reopened_cell_sees_the_pending_value() {
    let mut controller = controller_for(&["A-1"]);
    let mut surface = FakeSurface::default();

    edit(&mut controller, &mut surface, Field::LastName, "A-1", "Okafor", "Smith");
    assert_eq!(controller.pending_value(&rid("A-1"), Field::LastName), Some("Smith"));
    assert_eq!(controller.pending_value(&rid("A-1"), Field::Email), None);
}
