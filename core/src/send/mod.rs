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

//! Send pipeline: request types, message building, policy, hooks, the Mailer
//! capability, and the coordinator that ties them together.

mod builder;
mod coordinator;
mod error;
mod hooks;
mod mailer;
mod message;
mod policy;

pub use builder::build_message;
pub use coordinator::SendCoordinator;
pub use error::SendError;
pub use hooks::Hooks;
pub use mailer::{Delivery, Mailer};
pub use message::{AttachmentInput, HeaderInput, MailRequest, OutboundMessage, RecipientInput};
pub use policy::{HostContext, Policy};
