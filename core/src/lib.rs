/*
 * lib.rs
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

//! Mail Trail core: parses loosely structured mail parameters into a
//! normalized outbound message, applies administrative CC/BCC policy,
//! dispatches through an injected Mailer capability, and persists an
//! immutable audit record of every send attempt.

pub mod audit;
pub mod config;
pub mod mail;
pub mod send;

pub use audit::{
    AuditError, AuditRecorder, MessageStore, NewRecord, RecordId, RecordStatus, SendAttemptRecord,
    StoredRecord, TrailDir,
};
pub use config::{ConfigStore, MemoryConfig, XmlConfigStore};
pub use mail::{Address, HeaderSet};
pub use send::{
    build_message, AttachmentInput, Delivery, HeaderInput, HostContext, Hooks, MailRequest, Mailer,
    OutboundMessage, Policy, RecipientInput, SendCoordinator, SendError,
};
