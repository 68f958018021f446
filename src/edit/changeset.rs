// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::model::{Field, RecordId};

/// Accumulated per-record partial updates pending commit.
///
/// At most one entry exists per record id; merging an edit for a record
/// that already has an entry updates it in place. Entry order is
/// first-touch order, which is also the order of the serialized commit
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<ChangeEntry>,
}

/// One record's pending changes: only the fields actually touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    record_id: RecordId,
    fields: BTreeMap<Field, String>,
}

impl ChangeEntry {
    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    pub fn fields(&self) -> &BTreeMap<Field, String> {
        &self.fields
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

impl ChangeSet {
    pub fn merge(&mut self, record_id: RecordId, field: Field, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.record_id == record_id) {
            entry.fields.insert(field, value);
            return;
        }
        let mut fields = BTreeMap::new();
        fields.insert(field, value);
        self.entries.push(ChangeEntry { record_id, fields });
    }

    pub fn entry(&self, record_id: &RecordId) -> Option<&ChangeEntry> {
        self.entries.iter().find(|entry| &entry.record_id == record_id)
    }

    pub fn value(&self, record_id: &RecordId, field: Field) -> Option<&str> {
        self.entry(record_id).and_then(|entry| entry.get(field))
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for ChangeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl Serialize for ChangeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("Id", self.record_id.as_str())?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.api_name(), value)?;
        }
        map.end()
    }
}
