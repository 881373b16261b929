/*
 * builder.rs
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

//! Message assembly: parse recipients and headers, apply defaults, policy
//! and hooks, and produce the immutable outbound message. Building never
//! touches the Mailer. The only failure is an empty recipient list; all
//! other malformed input degrades to skip-or-default.

use crate::mail::address::{parse_address, parse_address_list, parse_address_slice, Address};
use crate::mail::headers::{parse_header_lines, parse_header_map, parse_header_slice, HeaderSet};
use crate::mail::normalize_newlines;
use crate::send::error::SendError;
use crate::send::hooks::Hooks;
use crate::send::message::{AttachmentInput, HeaderInput, MailRequest, OutboundMessage, RecipientInput};
use crate::send::policy::Policy;

/// Build an OutboundMessage from the raw request. Pure over its inputs: the
/// same request, policy and hooks always yield a structurally equal message.
pub fn build_message(
    request: &MailRequest,
    policy: &Policy,
    hooks: &Hooks,
) -> Result<OutboundMessage, SendError> {
    let to = match &request.to {
        RecipientInput::Text(raw) => parse_address_list(raw),
        RecipientInput::List(tokens) => parse_address_slice(tokens),
    };
    if to.is_empty() {
        return Err(SendError::invalid("no usable To recipient"));
    }

    let headers = match &request.headers {
        HeaderInput::None => HeaderSet::default(),
        HeaderInput::Text(raw) => parse_header_lines(raw),
        HeaderInput::Lines(lines) => parse_header_slice(lines),
        HeaderInput::Map(entries) => parse_header_map(entries),
    };

    let from = resolve_from(&headers, policy, hooks);

    let content_type = hooks.apply_content_type(
        headers
            .content_type
            .clone()
            .unwrap_or_else(|| "text/plain".to_string()),
    );
    let charset = hooks.apply_charset(
        headers
            .charset
            .clone()
            .unwrap_or_else(|| policy.default_charset.clone()),
    );

    let mut cc = parse_address_slice(&headers.cc);
    if !policy.additional_admin_emails.is_empty() {
        for token in policy.additional_admin_emails.split(',') {
            if let Some(addr) = parse_address(token) {
                cc.push(addr);
            }
        }
    }

    let mut bcc = parse_address_slice(&headers.bcc);
    if policy.always_bcc_admin && !policy.admin_email.is_empty() {
        bcc.push(Address::new(policy.admin_email.clone()));
    }

    let attachments = match &request.attachments {
        AttachmentInput::Text(raw) => normalize_newlines(raw)
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        AttachmentInput::List(items) => items.clone(),
    };

    Ok(OutboundMessage {
        to,
        cc,
        bcc,
        from,
        subject: request.subject.clone(),
        body: request.body.clone(),
        content_type,
        charset,
        boundary: headers.boundary.clone(),
        custom_headers: headers.other,
        attachments,
    })
}

/// Resolve the From address: header values when present, site defaults
/// otherwise, both passed through the from-email/from-name hooks.
fn resolve_from(headers: &HeaderSet, policy: &Policy, hooks: &Hooks) -> Address {
    let mut name = headers
        .from
        .as_ref()
        .map(|a| a.display_name.clone())
        .unwrap_or_default();
    if name.is_empty() {
        name = policy.default_from_name.clone();
    }
    let email = match &headers.from {
        Some(addr) if !addr.email.is_empty() => addr.email.clone(),
        _ => format!("{}@{}", policy.default_from_mailbox, policy.derived_domain()),
    };
    Address {
        email: hooks.apply_from_email(email),
        display_name: hooks.apply_from_name(name),
    }
}
