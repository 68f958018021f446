// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Rolodex: terminal contact table with batched inline editing.
//!
//! A parent coordinator owns the canonical contact list for one account; a
//! child table owns the inline-edit interaction, accumulates per-record
//! partial updates across edit sessions, and commits them as a single
//! batched remote call (or discards them on cancel).

pub mod coordinator;
pub mod edit;
pub mod model;
pub mod remote;
pub mod table;
pub mod tui;
