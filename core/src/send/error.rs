/*
 * error.rs
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

//! Send pipeline errors. Only InvalidRequest crosses the public send
//! boundary; transport failures collapse into the boolean result and
//! persistence failures are logged and swallowed.

use std::fmt;

/// Errors from building or delivering an outbound message.
#[derive(Debug)]
pub enum SendError {
    /// The request could not produce a deliverable message (no usable
    /// recipients). Fatal to the call; nothing is sent or recorded.
    InvalidRequest(String),
    /// Delivery attempt failed. Never raised to the caller.
    Transport(String),
}

impl SendError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::InvalidRequest(m) => write!(f, "invalid request: {}", m),
            SendError::Transport(m) => write!(f, "transport: {}", m),
        }
    }
}

impl std::error::Error for SendError {}
