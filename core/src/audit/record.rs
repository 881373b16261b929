/*
 * record.rs
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

//! The audit entity: a snapshot of one send attempt and its outcome, in the
//! legacy trail serialization (comma-joined strings).

use std::fmt;

use chrono::Utc;

use crate::mail::address::Address;
use crate::send::OutboundMessage;

/// Legacy two-state visibility label for a recorded attempt: delivered mail
/// is kept private, failed mail stays a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Private,
    Draft,
}

impl RecordStatus {
    pub fn from_delivered(delivered: bool) -> Self {
        if delivered {
            Self::Private
        } else {
            Self::Draft
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Draft => "draft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Self::Private),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One send attempt. Created only after the attempt completes; never mutated
/// afterwards. Retention is the host's concern, never this library's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAttemptRecord {
    pub subject: String,
    pub body: String,
    /// Comma-joined recipient emails; display names are dropped at this layer.
    pub to: String,
    pub cc: String,
    pub bcc: String,
    /// Custom header values joined with ','. Lossy when a value itself
    /// contains a comma; kept as-is for compatibility with the legacy trail.
    pub headers: String,
    pub attachments: String,
    /// Unix timestamp of record creation.
    pub created_at: i64,
    pub content_type: String,
    pub delivered: bool,
}

impl SendAttemptRecord {
    /// Snapshot a message and its delivery outcome, timestamped now.
    pub fn from_message(message: &OutboundMessage, delivered: bool) -> Self {
        Self {
            subject: message.subject().to_string(),
            body: message.body().to_string(),
            to: join_emails(message.to()),
            cc: join_emails(message.cc()),
            bcc: join_emails(message.bcc()),
            headers: message
                .custom_headers()
                .iter()
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>()
                .join(","),
            attachments: message.attachments().join(","),
            created_at: Utc::now().timestamp(),
            content_type: message.content_type().to_string(),
            delivered,
        }
    }

    pub fn status(&self) -> RecordStatus {
        RecordStatus::from_delivered(self.delivered)
    }
}

fn join_emails(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(|a| a.email.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::send::{build_message, Hooks, MailRequest, Policy};

    fn message() -> OutboundMessage {
        let mut request = MailRequest::new("Jane <j@x.com>, k@y.com", "subject", "body");
        request.headers = "X-A: one\nX-B: two,three".into();
        build_message(&request, &Policy::default(), &Hooks::new()).unwrap()
    }

    #[test]
    fn addresses_joined_without_display_names() {
        let record = SendAttemptRecord::from_message(&message(), true);
        assert_eq!(record.to, "j@x.com,k@y.com");
        assert_eq!(record.cc, "");
    }

    #[test]
    fn header_values_joined_with_commas() {
        let record = SendAttemptRecord::from_message(&message(), true);
        assert_eq!(record.headers, "one,two,three");
    }

    #[test]
    fn status_follows_delivery() {
        assert_eq!(
            SendAttemptRecord::from_message(&message(), true).status(),
            RecordStatus::Private
        );
        assert_eq!(
            SendAttemptRecord::from_message(&message(), false).status(),
            RecordStatus::Draft
        );
    }

    #[test]
    fn status_label_roundtrip() {
        assert_eq!(RecordStatus::parse("private"), Some(RecordStatus::Private));
        assert_eq!(RecordStatus::parse("draft"), Some(RecordStatus::Draft));
        assert_eq!(RecordStatus::parse("other"), None);
    }
}
