/*
 * mailer.rs
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

//! Mailer capability: per-send delivery sessions (e.g. SMTP submission, a
//! local sendmail pipe). The library never implements the wire client; the
//! host injects it.

use crate::mail::address::Address;
use crate::send::error::SendError;

/// Produces delivery handles. One fresh handle per send attempt; handles are
/// never reused across calls.
pub trait Mailer: Send + Sync {
    fn open(&self) -> Result<Box<dyn Delivery>, SendError>;
}

/// One in-flight delivery. The coordinator registers envelope data stepwise
/// and then consumes the session with `send()`. A rejection from one of the
/// add_* methods concerns only that item; the message as a whole proceeds.
pub trait Delivery: Send + Sync {
    fn set_from(&mut self, from: &Address) -> Result<(), SendError>;

    fn add_to(&mut self, recipient: &Address) -> Result<(), SendError>;

    fn add_cc(&mut self, recipient: &Address) -> Result<(), SendError>;

    fn add_bcc(&mut self, recipient: &Address) -> Result<(), SendError>;

    fn set_content(&mut self, subject: &str, body: &str) -> Result<(), SendError>;

    fn set_content_type(&mut self, content_type: &str, charset: &str) -> Result<(), SendError>;

    fn add_header(&mut self, name: &str, value: &str) -> Result<(), SendError>;

    /// Register an attachment reference (path or identifier).
    fn attach(&mut self, reference: &str) -> Result<(), SendError>;

    /// Perform the delivery. One best-effort attempt; no retries.
    fn send(self: Box<Self>) -> Result<(), SendError>;
}
