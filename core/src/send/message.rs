/*
 * message.rs
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

//! Raw request inputs and the resolved outbound message.

use crate::mail::address::Address;

/// Recipient list input: a comma-joined string or pre-split tokens.
#[derive(Debug, Clone)]
pub enum RecipientInput {
    Text(String),
    List(Vec<String>),
}

impl Default for RecipientInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for RecipientInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecipientInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for RecipientInput {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// Header input: absent, a newline-separated blob, pre-split lines, or an
/// already-structured name/value mapping.
#[derive(Debug, Clone, Default)]
pub enum HeaderInput {
    #[default]
    None,
    Text(String),
    Lines(Vec<String>),
    Map(Vec<(String, String)>),
}

impl From<&str> for HeaderInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Attachment references: a newline-separated string or a list.
#[derive(Debug, Clone)]
pub enum AttachmentInput {
    Text(String),
    List(Vec<String>),
}

impl Default for AttachmentInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<&str> for AttachmentInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttachmentInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for AttachmentInput {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// The loosely structured legacy send surface: recipients, subject, body,
/// optional headers and attachments, in whatever shape the caller has them.
#[derive(Debug, Clone, Default)]
pub struct MailRequest {
    pub to: RecipientInput,
    pub subject: String,
    pub body: String,
    pub headers: HeaderInput,
    pub attachments: AttachmentInput,
}

impl MailRequest {
    pub fn new(
        to: impl Into<RecipientInput>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            headers: HeaderInput::None,
            attachments: AttachmentInput::default(),
        }
    }
}

/// Fully resolved message, ready for delivery. Immutable once built; only the
/// builder constructs it. Two builds from the same request and policy are
/// structurally equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub(crate) to: Vec<Address>,
    pub(crate) cc: Vec<Address>,
    pub(crate) bcc: Vec<Address>,
    pub(crate) from: Address,
    pub(crate) subject: String,
    pub(crate) body: String,
    pub(crate) content_type: String,
    pub(crate) charset: String,
    pub(crate) boundary: Option<String>,
    pub(crate) custom_headers: Vec<(String, String)>,
    pub(crate) attachments: Vec<String>,
}

impl OutboundMessage {
    pub fn to(&self) -> &[Address] {
        &self.to
    }

    pub fn cc(&self) -> &[Address] {
        &self.cc
    }

    pub fn bcc(&self) -> &[Address] {
        &self.bcc
    }

    pub fn from(&self) -> &Address {
        &self.from
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }

    pub fn custom_headers(&self) -> &[(String, String)] {
        &self.custom_headers
    }

    /// Attachment references (paths or identifiers); content is never
    /// inspected here.
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("multipart")
    }
}
