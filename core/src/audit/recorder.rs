/*
 * recorder.rs
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

//! Audit recorder: turns a message plus its delivery outcome into one
//! persisted record. Field insert conflicts fall back to update-in-place so
//! a partially written record is completed rather than abandoned.

use crate::audit::record::SendAttemptRecord;
use crate::audit::store::{AuditError, MessageStore, NewRecord, RecordId};
use crate::send::OutboundMessage;

pub const FIELD_TO: &str = "_to";
pub const FIELD_CC: &str = "_cc";
pub const FIELD_BCC: &str = "_bcc";
pub const FIELD_HEADERS: &str = "_headers";
pub const FIELD_ATTACHMENTS: &str = "_attachments";
pub const FIELD_CREATED: &str = "_created";
pub const FIELD_CONTENT_TYPE: &str = "_content_type";

pub struct AuditRecorder {
    store: Box<dyn MessageStore>,
}

impl AuditRecorder {
    pub fn new(store: Box<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Persist one attempt. Empty cc/bcc are omitted, matching the legacy
    /// trail layout.
    pub fn record(
        &self,
        message: &OutboundMessage,
        delivered: bool,
    ) -> Result<RecordId, AuditError> {
        let record = SendAttemptRecord::from_message(message, delivered);
        let id = self.store.create_record(&NewRecord {
            subject: &record.subject,
            body: &record.body,
            status: record.status(),
        })?;

        let created = record.created_at.to_string();
        let mut fields: Vec<(&str, &str)> = vec![(FIELD_TO, record.to.as_str())];
        if !record.cc.is_empty() {
            fields.push((FIELD_CC, &record.cc));
        }
        if !record.bcc.is_empty() {
            fields.push((FIELD_BCC, &record.bcc));
        }
        fields.push((FIELD_HEADERS, &record.headers));
        fields.push((FIELD_ATTACHMENTS, &record.attachments));
        fields.push((FIELD_CREATED, &created));
        fields.push((FIELD_CONTENT_TYPE, &record.content_type));

        for (name, value) in fields {
            match self.store.write_field(id, name, value) {
                Ok(()) => {}
                Err(AuditError::DuplicateField(_)) => {
                    self.store.update_field(id, name, value)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(id)
    }
}
