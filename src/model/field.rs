// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use super::ids::{IdError, RecordId};

/// The editable contact fields, in table column order.
///
/// The API name of a field appears verbatim as the key in the serialized
/// commit payload, so variant names must match what the record source
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Birthdate,
    LeadSource,
    Email,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Birthdate,
        Field::LeadSource,
        Field::Email,
    ];

    pub fn api_name(self) -> &'static str {
        match self {
            Self::FirstName => "FirstName",
            Self::LastName => "LastName",
            Self::Birthdate => "Birthdate",
            Self::LeadSource => "LeadSource",
            Self::Email => "Email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Birthdate => "Birthdate",
            Self::LeadSource => "Lead Source",
            Self::Email => "Email",
        }
    }

    /// Column index within [`Field::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::FirstName => 0,
            Self::LastName => 1,
            Self::Birthdate => 2,
            Self::LeadSource => 3,
            Self::Email => 4,
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::LastName)
    }

    /// Whether values come from a fixed picklist rather than free text.
    pub fn is_picklist(self) -> bool {
        matches!(self, Self::LeadSource)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    raw: String,
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.raw)
    }
}

impl std::error::Error for ParseFieldError {}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.api_name() == s)
            .ok_or_else(|| ParseFieldError { raw: s.to_owned() })
    }
}

/// Synthetic addressing key for one editable cell, rendered `<Field>-<id>`.
///
/// The field name comes first and never contains `-`, so parsing splits at
/// the first `-` and the record id may contain anything. Keys are unique
/// across a rendered set as long as record ids are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    field: Field,
    record_id: RecordId,
}

impl CellKey {
    pub fn new(field: Field, record_id: RecordId) -> Self {
        Self { field, record_id }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    pub fn into_parts(self) -> (Field, RecordId) {
        (self.field, self.record_id)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field, self.record_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCellKeyError {
    MissingSeparator { raw: String },
    Field(ParseFieldError),
    Id(IdError),
}

impl fmt::Display for ParseCellKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { raw } => {
                write!(f, "cell key '{raw}' has no '-' separator")
            }
            Self::Field(err) => err.fmt(f),
            Self::Id(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseCellKeyError {}

impl FromStr for CellKey {
    type Err = ParseCellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((field, id)) = s.split_once('-') else {
            return Err(ParseCellKeyError::MissingSeparator { raw: s.to_owned() });
        };
        let field = field.parse().map_err(ParseCellKeyError::Field)?;
        let record_id = RecordId::new(id).map_err(ParseCellKeyError::Id)?;
        Ok(Self { field, record_id })
    }
}
