/*
 * store.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Mail Trail, a mail interception and audit library.
 *
 * Mail Trail is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mail Trail is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mail Trail.  If not, see <http://www.gnu.org/licenses/>.
 */

//! MessageStore capability: record persistence as the host provides it
//! (CMS entries, a database table, or the bundled TrailDir).

use std::fmt;

use crate::audit::record::RecordStatus;

/// Identifier of a persisted record.
pub type RecordId = u64;

/// Errors from record persistence.
#[derive(Debug)]
pub enum AuditError {
    /// The named field already exists on the record; the caller should fall
    /// back to an update-in-place.
    DuplicateField(String),
    /// Underlying storage failure.
    Storage(String),
}

impl AuditError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::DuplicateField(name) => write!(f, "field {} already present", name),
            AuditError::Storage(m) => write!(f, "{}", m),
        }
    }
}

impl std::error::Error for AuditError {}

/// Core fields of a new record entry.
#[derive(Debug, Clone, Copy)]
pub struct NewRecord<'a> {
    pub subject: &'a str,
    pub body: &'a str,
    pub status: RecordStatus,
}

pub trait MessageStore: Send + Sync {
    /// Create the base record and return its id.
    fn create_record(&self, record: &NewRecord<'_>) -> Result<RecordId, AuditError>;

    /// Insert a named field once. DuplicateField when the field exists.
    fn write_field(&self, id: RecordId, name: &str, value: &str) -> Result<(), AuditError>;

    /// Overwrite a named field, creating it if missing.
    fn update_field(&self, id: RecordId, name: &str, value: &str) -> Result<(), AuditError>;
}
