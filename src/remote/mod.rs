// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Contracts for the remote collaborators the table and coordinator call.
//!
//! All state transitions in this crate run on one event-processing thread,
//! and every remote completion is handled before the next event, so these
//! contracts are plain synchronous calls; implementations may block.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edit::ChangeSet;
use crate::model::{Field, ParentId, ParentRecords, Record, RecordId};

pub mod memory;

pub use memory::{InMemorySource, SharedSource};

/// Failure reported by a remote collaborator.
///
/// The server-supplied message is optional; absent or malformed payloads
/// fall back to [`RemoteError::FALLBACK_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    message: Option<String>,
}

impl RemoteError {
    pub const FALLBACK_MESSAGE: &'static str = "The server did not say what went wrong.";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }

    /// The message to surface to the user.
    pub fn user_message(&self) -> &str {
        self.message.as_deref().unwrap_or(Self::FALLBACK_MESSAGE)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for RemoteError {}

/// The remote system of record.
pub trait RecordSource {
    /// Pull-based read of the records associated with one parent account;
    /// re-invoked on demand whenever the list must refresh.
    fn fetch_associated(&mut self, parent_id: &ParentId) -> Result<ParentRecords, RemoteError>;

    /// Persists the whole accumulated batch in one call.
    fn commit_changes(&mut self, changes: &ChangeSet) -> Result<(), RemoteError>;

    fn delete_record(&mut self, record_id: &RecordId) -> Result<(), RemoteError>;
}

/// Read-only reference data for picklist fields.
pub trait PicklistSource {
    fn fetch(&mut self, field: Field) -> Result<Vec<PicklistOption>, RemoteError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    pub label: String,
    pub value: String,
}

impl PicklistOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit,
}

/// Inputs for the create/edit record dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest<'a> {
    pub parent_id: &'a ParentId,
    pub parent_name: &'a str,
    pub record: Option<&'a Record>,
    pub mode: DialogMode,
}

/// `Saved` means the dialog already persisted the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Saved,
    Dismissed,
}

pub trait CreateEditDialog {
    fn open(&mut self, request: DialogRequest<'_>) -> DialogOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Proceed,
    Dismissed,
}

pub trait ConfirmDialog {
    fn confirm_delete(&mut self, record: Option<&Record>) -> ConfirmOutcome;
}

/// Toast-style notification sink; exactly one notification per failed or
/// completed operation.
pub trait Notifier {
    fn success(&mut self, title: &str, message: &str);
    fn error(&mut self, title: &str, message: &str);
}
