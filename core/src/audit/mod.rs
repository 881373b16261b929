/*
 * mod.rs
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

//! Audit trail: immutable records of send attempts, the MessageStore
//! capability they are persisted through, and a file-backed store.

mod record;
mod recorder;
mod store;
mod traildir;

pub use record::{RecordStatus, SendAttemptRecord};
pub use recorder::AuditRecorder;
pub use store::{AuditError, MessageStore, NewRecord, RecordId};
pub use traildir::{StoredRecord, TrailDir};

pub use recorder::{
    FIELD_ATTACHMENTS, FIELD_BCC, FIELD_CC, FIELD_CONTENT_TYPE, FIELD_CREATED, FIELD_HEADERS,
    FIELD_TO,
};
