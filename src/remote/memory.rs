// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Fixture-backed record source for the demo binary and integration tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::edit::ChangeSet;
use crate::model::{fixtures, Field, ParentId, ParentRecords, Record, RecordId};

use super::{PicklistOption, PicklistSource, RecordSource, RemoteError};

const DEFAULT_LEAD_SOURCES: [&str; 5] = [
    "Web",
    "Phone Inquiry",
    "Partner Referral",
    "Purchased List",
    "Other",
];

#[derive(Debug, Default)]
struct StoredParent {
    name: String,
    records: Vec<Record>,
}

/// In-memory system of record.
///
/// Applies committed change entries to its store, keeps the serialized
/// payload of every commit attempt, and can be armed to fail the next
/// commit or delete.
#[derive(Debug, Default)]
pub struct InMemorySource {
    parents: BTreeMap<ParentId, StoredParent>,
    lead_sources: Vec<PicklistOption>,
    fail_next_commit: Option<RemoteError>,
    fail_next_delete: Option<RemoteError>,
    commit_payloads: Vec<serde_json::Value>,
    next_created: u32,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in demo account with its sample contacts.
    pub fn demo() -> Self {
        let mut source = Self::new();
        source.insert_parent(fixtures::demo_parent_id(), fixtures::DEMO_PARENT_NAME);
        for record in fixtures::demo_records() {
            source.push_record(&fixtures::demo_parent_id(), record);
        }
        source.lead_sources = DEFAULT_LEAD_SOURCES
            .into_iter()
            .map(|name| PicklistOption::new(name, name))
            .collect();
        source
    }

    pub fn insert_parent(&mut self, parent_id: ParentId, name: impl Into<String>) {
        self.parents.insert(
            parent_id,
            StoredParent {
                name: name.into(),
                records: Vec::new(),
            },
        );
    }

    pub fn push_record(&mut self, parent_id: &ParentId, record: Record) {
        self.parents.entry(parent_id.clone()).or_default().records.push(record);
    }

    pub fn set_lead_sources(&mut self, options: Vec<PicklistOption>) {
        self.lead_sources = options;
    }

    /// Arms the source so the next `commit_changes` call fails.
    pub fn fail_next_commit(&mut self, error: RemoteError) {
        self.fail_next_commit = Some(error);
    }

    /// Arms the source so the next `delete_record` call fails.
    pub fn fail_next_delete(&mut self, error: RemoteError) {
        self.fail_next_delete = Some(error);
    }

    /// Serialized payload of the most recent commit attempt.
    pub fn last_commit_payload(&self) -> Option<&serde_json::Value> {
        self.commit_payloads.last()
    }

    pub fn commit_payloads(&self) -> &[serde_json::Value] {
        &self.commit_payloads
    }

    pub fn record(&self, record_id: &RecordId) -> Option<&Record> {
        self.parents
            .values()
            .flat_map(|parent| parent.records.iter())
            .find(|record| record.record_id() == record_id)
    }

    /// Creates a record under a parent, allocating a fresh id.
    pub fn create_record(
        &mut self,
        parent_id: &ParentId,
        fields: &[(Field, String)],
    ) -> Result<RecordId, RemoteError> {
        if !self.parents.contains_key(parent_id) {
            return Err(RemoteError::new(format!("no account with id '{parent_id}'")));
        }
        self.next_created += 1;
        let record_id = RecordId::new(format!("0035gNew{:04}", self.next_created))
            .map_err(|err| RemoteError::new(err.to_string()))?;
        let mut record = Record::new(record_id.clone());
        for (field, value) in fields {
            record.set(*field, value.clone());
        }
        self.push_record(parent_id, record);
        Ok(record_id)
    }

    pub fn update_record(
        &mut self,
        record_id: &RecordId,
        fields: &[(Field, String)],
    ) -> Result<(), RemoteError> {
        let Some(record) = self
            .parents
            .values_mut()
            .flat_map(|parent| parent.records.iter_mut())
            .find(|record| record.record_id() == record_id)
        else {
            return Err(RemoteError::new(format!("no record with id '{record_id}'")));
        };
        for (field, value) in fields {
            record.set(*field, value.clone());
        }
        Ok(())
    }
}

impl RecordSource for InMemorySource {
    fn fetch_associated(&mut self, parent_id: &ParentId) -> Result<ParentRecords, RemoteError> {
        let Some(parent) = self.parents.get(parent_id) else {
            return Err(RemoteError::new(format!("no account with id '{parent_id}'")));
        };
        Ok(ParentRecords {
            parent_name: parent.name.clone(),
            records: parent.records.clone(),
        })
    }

    fn commit_changes(&mut self, changes: &ChangeSet) -> Result<(), RemoteError> {
        let payload =
            serde_json::to_value(changes).map_err(|err| RemoteError::new(err.to_string()))?;
        self.commit_payloads.push(payload);

        if let Some(error) = self.fail_next_commit.take() {
            return Err(error);
        }

        // Validate the whole batch before applying any of it.
        for entry in changes.entries() {
            if self.record(entry.record_id()).is_none() {
                return Err(RemoteError::new(format!(
                    "no record with id '{}'",
                    entry.record_id()
                )));
            }
        }
        for entry in changes.entries() {
            let fields: Vec<(Field, String)> = entry
                .fields()
                .iter()
                .map(|(field, value)| (*field, value.clone()))
                .collect();
            self.update_record(entry.record_id(), &fields)?;
        }
        Ok(())
    }

    fn delete_record(&mut self, record_id: &RecordId) -> Result<(), RemoteError> {
        if let Some(error) = self.fail_next_delete.take() {
            return Err(error);
        }
        for parent in self.parents.values_mut() {
            let before = parent.records.len();
            parent.records.retain(|record| record.record_id() != record_id);
            if parent.records.len() < before {
                return Ok(());
            }
        }
        Err(RemoteError::new(format!("no record with id '{record_id}'")))
    }
}

impl PicklistSource for InMemorySource {
    fn fetch(&mut self, field: Field) -> Result<Vec<PicklistOption>, RemoteError> {
        if field.is_picklist() {
            Ok(self.lead_sources.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

/// Clonable handle so a dialog implementation and the record source can
/// point at the same in-memory store on the single UI thread.
#[derive(Debug, Clone, Default)]
pub struct SharedSource {
    inner: Rc<RefCell<InMemorySource>>,
}

impl SharedSource {
    pub fn new(source: InMemorySource) -> Self {
        Self {
            inner: Rc::new(RefCell::new(source)),
        }
    }

    pub fn demo() -> Self {
        Self::new(InMemorySource::demo())
    }

    pub fn with<R>(&self, f: impl FnOnce(&InMemorySource) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut InMemorySource) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

impl RecordSource for SharedSource {
    fn fetch_associated(&mut self, parent_id: &ParentId) -> Result<ParentRecords, RemoteError> {
        self.inner.borrow_mut().fetch_associated(parent_id)
    }

    fn commit_changes(&mut self, changes: &ChangeSet) -> Result<(), RemoteError> {
        self.inner.borrow_mut().commit_changes(changes)
    }

    fn delete_record(&mut self, record_id: &RecordId) -> Result<(), RemoteError> {
        self.inner.borrow_mut().delete_record(record_id)
    }
}

impl PicklistSource for SharedSource {
    fn fetch(&mut self, field: Field) -> Result<Vec<PicklistOption>, RemoteError> {
        self.inner.borrow_mut().fetch(field)
    }
}
