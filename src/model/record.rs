// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use super::field::Field;
use super::ids::RecordId;

/// One contact record as supplied by the record source.
///
/// Treated as immutable once received: the editing layers clone working
/// copies and keep pending values in the change-set instead of mutating
/// the canonical list in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    record_id: RecordId,
    fields: BTreeMap<Field, String>,
}

impl Record {
    pub fn new(record_id: RecordId) -> Self {
        Self {
            record_id,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// The stored value for a field; unset fields read as empty.
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn fields(&self) -> &BTreeMap<Field, String> {
        &self.fields
    }

    pub fn display_name(&self) -> String {
        let mut name = String::new();
        for part in [self.get(Field::FirstName), self.get(Field::LastName)] {
            if part.is_empty() {
                continue;
            }
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(part);
        }
        name
    }
}

/// Result of fetching the records associated with one parent account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRecords {
    pub parent_name: String,
    pub records: Vec<Record>,
}
