/*
 * hooks.rs
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

//! Named extension hooks. Each hook is an explicit ordered list of injected
//! functions applied in registration order: from-email, from-name,
//! content-type and charset transform the resolved value; pre-send receives
//! the mutable delivery handle for last-second customization.

use crate::send::mailer::Delivery;

type ValueHook = Box<dyn Fn(String) -> String + Send + Sync>;
type PreSendHook = Box<dyn Fn(&mut dyn Delivery) + Send + Sync>;

#[derive(Default)]
pub struct Hooks {
    from_email: Vec<ValueHook>,
    from_name: Vec<ValueHook>,
    content_type: Vec<ValueHook>,
    charset: Vec<ValueHook>,
    pre_send: Vec<PreSendHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_from_email(
        &mut self,
        f: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.from_email.push(Box::new(f));
        self
    }

    pub fn on_from_name(
        &mut self,
        f: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.from_name.push(Box::new(f));
        self
    }

    pub fn on_content_type(
        &mut self,
        f: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.content_type.push(Box::new(f));
        self
    }

    pub fn on_charset(&mut self, f: impl Fn(String) -> String + Send + Sync + 'static) -> &mut Self {
        self.charset.push(Box::new(f));
        self
    }

    pub fn on_pre_send(&mut self, f: impl Fn(&mut dyn Delivery) + Send + Sync + 'static) -> &mut Self {
        self.pre_send.push(Box::new(f));
        self
    }

    pub(crate) fn apply_from_email(&self, value: String) -> String {
        Self::apply(&self.from_email, value)
    }

    pub(crate) fn apply_from_name(&self, value: String) -> String {
        Self::apply(&self.from_name, value)
    }

    pub(crate) fn apply_content_type(&self, value: String) -> String {
        Self::apply(&self.content_type, value)
    }

    pub(crate) fn apply_charset(&self, value: String) -> String {
        Self::apply(&self.charset, value)
    }

    pub(crate) fn apply_pre_send(&self, delivery: &mut dyn Delivery) {
        for hook in &self.pre_send {
            hook(delivery);
        }
    }

    fn apply(hooks: &[ValueHook], mut value: String) -> String {
        for hook in hooks {
            value = hook(value);
        }
        value
    }
}
