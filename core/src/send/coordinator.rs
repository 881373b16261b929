/*
 * coordinator.rs
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

//! Send orchestration: build, deliver, record. The delivery result is the
//! caller-visible contract; auditing is a side channel that never changes it.

use crate::audit::AuditRecorder;
use crate::send::builder::build_message;
use crate::send::error::SendError;
use crate::send::hooks::Hooks;
use crate::send::mailer::Mailer;
use crate::send::message::{MailRequest, OutboundMessage};
use crate::send::policy::Policy;

pub struct SendCoordinator {
    mailer: Box<dyn Mailer>,
    recorder: Option<AuditRecorder>,
    hooks: Hooks,
}

impl SendCoordinator {
    pub fn new(mailer: Box<dyn Mailer>) -> Self {
        Self {
            mailer,
            recorder: None,
            hooks: Hooks::new(),
        }
    }

    /// Attach the audit recorder. Without one, enabling audit in the policy
    /// has no effect.
    pub fn with_recorder(mut self, recorder: AuditRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// Build, deliver once, and record the attempt. Returns whether delivery
    /// succeeded. Only an invalid request (no usable recipients) surfaces as
    /// an error; transport and persistence failures are absorbed.
    pub fn send(&self, request: &MailRequest, policy: &Policy) -> Result<bool, SendError> {
        let message = build_message(request, policy, &self.hooks)?;
        let delivered = self.deliver(&message);
        if policy.audit_enabled {
            if let Some(recorder) = &self.recorder {
                if let Err(e) = recorder.record(&message, delivered) {
                    eprintln!("[audit] failed to record send attempt: {}", e);
                }
            }
        }
        Ok(delivered)
    }

    /// One best-effort delivery attempt over a fresh handle. Per-address and
    /// per-attachment rejections skip only that item; everything else
    /// collapses to false.
    fn deliver(&self, message: &OutboundMessage) -> bool {
        let mut delivery = match self.mailer.open() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("[send] could not open delivery session: {}", e);
                return false;
            }
        };
        if let Err(e) = delivery.set_from(message.from()) {
            eprintln!("[send] from address {} rejected: {}", message.from(), e);
            return false;
        }
        for addr in message.to() {
            if let Err(e) = delivery.add_to(addr) {
                eprintln!("[send] recipient {} rejected: {}", addr, e);
            }
        }
        for addr in message.cc() {
            if let Err(e) = delivery.add_cc(addr) {
                eprintln!("[send] cc recipient {} rejected: {}", addr, e);
            }
        }
        for addr in message.bcc() {
            if let Err(e) = delivery.add_bcc(addr) {
                eprintln!("[send] bcc recipient {} rejected: {}", addr, e);
            }
        }
        if let Err(e) = delivery.set_content(message.subject(), message.body()) {
            eprintln!("[send] content rejected: {}", e);
            return false;
        }
        if let Err(e) = delivery.set_content_type(message.content_type(), message.charset()) {
            eprintln!("[send] content type rejected: {}", e);
            return false;
        }
        for (name, value) in message.custom_headers() {
            if let Err(e) = delivery.add_header(name, value) {
                eprintln!("[send] header {} rejected: {}", name, e);
            }
        }
        if !message.custom_headers().is_empty() && message.is_multipart() {
            if let Some(boundary) = message.boundary() {
                let combined = format!("{};\n\t boundary=\"{}\"", message.content_type(), boundary);
                if let Err(e) = delivery.add_header("Content-Type", &combined) {
                    eprintln!("[send] multipart content type header rejected: {}", e);
                }
            }
        }
        for reference in message.attachments() {
            if let Err(e) = delivery.attach(reference) {
                eprintln!("[send] attachment {} rejected: {}", reference, e);
            }
        }
        self.hooks.apply_pre_send(delivery.as_mut());
        match delivery.send() {
            Ok(()) => true,
            Err(e) => {
                eprintln!("[send] delivery failed: {}", e);
                false
            }
        }
    }
}
