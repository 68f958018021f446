// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Parent component: owns the canonical record list and mediates
//! create/delete/refresh side effects raised by the child table.

use crate::model::{ParentId, Record};
use crate::remote::{
    CreateEditDialog, DialogMode, DialogOutcome, DialogRequest, Notifier, RecordSource,
    RemoteError,
};
use crate::table::Signal;

/// Refresh phase marker. Refreshes are idempotent pull-based reads, so an
/// overlapping refresh is tolerated, not prevented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Refreshing,
}

#[derive(Debug)]
pub struct RecordListCoordinator {
    parent_id: ParentId,
    parent_name: String,
    records: Vec<Record>,
    card_title: String,
    phase: Phase,
    last_error: Option<String>,
}

impl RecordListCoordinator {
    pub fn new(parent_id: ParentId) -> Self {
        Self {
            parent_id,
            parent_name: String::new(),
            records: Vec::new(),
            card_title: card_title(0),
            phase: Phase::Idle,
            last_error: None,
        }
    }

    pub fn parent_id(&self) -> &ParentId {
        &self.parent_id
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn card_title(&self) -> &str {
        &self.card_title
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Re-reads the associated records. On failure the stale list is kept
    /// and the error recorded.
    pub fn refresh(&mut self, remote: &mut impl RecordSource) -> Result<(), RemoteError> {
        self.phase = Phase::Refreshing;
        let result = remote.fetch_associated(&self.parent_id);
        self.phase = Phase::Idle;
        match result {
            Ok(fetched) => {
                self.parent_name = fetched.parent_name;
                self.records = fetched.records;
                self.card_title = card_title(self.records.len());
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.user_message().to_owned());
                Err(err)
            }
        }
    }

    /// Reacts to one child-raised signal. Every failure surfaces as
    /// exactly one notification; none propagate.
    pub fn handle_signal(
        &mut self,
        signal: Signal,
        remote: &mut impl RecordSource,
        notifier: &mut impl Notifier,
    ) {
        match signal {
            Signal::DeleteRequested { record_id } => match remote.delete_record(&record_id) {
                Ok(()) => {
                    notifier.success("Success", "Contact deleted!");
                    self.refresh_notifying(remote, notifier);
                }
                Err(err) => notifier.error("Error deleting record", err.user_message()),
            },
            Signal::EditCommitted { .. } => {
                // the child already persisted; refresh and notify only
                notifier.success("Success", "Contact details were updated successfully!");
                self.refresh_notifying(remote, notifier);
            }
            Signal::RefreshRequested => self.refresh_notifying(remote, notifier),
            Signal::Error { message } => notifier.error("Error", &message),
        }
    }

    /// Opens the creation dialog; the dialog persists the record itself,
    /// so acceptance only needs a toast and a refresh.
    pub fn request_create(
        &mut self,
        dialog: &mut impl CreateEditDialog,
        remote: &mut impl RecordSource,
        notifier: &mut impl Notifier,
    ) {
        let request = DialogRequest {
            parent_id: &self.parent_id,
            parent_name: &self.parent_name,
            record: None,
            mode: DialogMode::Create,
        };
        if dialog.open(request) == DialogOutcome::Saved {
            notifier.success("Success", "Contact added!");
            self.refresh_notifying(remote, notifier);
        }
    }

    fn refresh_notifying(&mut self, remote: &mut impl RecordSource, notifier: &mut impl Notifier) {
        if let Err(err) = self.refresh(remote) {
            notifier.error("Error", err.user_message());
        }
    }
}

fn card_title(count: usize) -> String {
    format!("Contacts ({count})")
}
