// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Core data model.
//!
//! Typed record/parent ids, the editable field vocabulary, per-cell
//! addressing keys, and the contact records handed down by the record
//! source.

pub mod field;
pub mod fixtures;
pub mod ids;
pub mod record;

pub use field::{CellKey, Field, ParseCellKeyError, ParseFieldError};
pub use ids::{Id, IdError, ParentId, RecordId};
pub use record::{ParentRecords, Record};
