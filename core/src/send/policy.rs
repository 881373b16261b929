/*
 * policy.rs
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

//! Site policy for outbound mail, and the host context capability.

use crate::config::{self, ConfigStore};

/// Originating host information supplied by the embedding application.
pub trait HostContext: Send + Sync {
    /// Domain mail appears to originate from (e.g. "www.example.com").
    fn originating_domain(&self) -> String;
}

/// Configuration values governing message building and the send lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Persist an audit record for every send attempt.
    pub audit_enabled: bool,
    /// Always BCC the site administrator, independent of caller BCCs.
    pub always_bcc_admin: bool,
    /// Comma-joined additional administrative CC addresses; empty disables.
    pub additional_admin_emails: String,
    pub admin_email: String,
    /// Charset used when the headers carry none.
    pub default_charset: String,
    /// Display name used when no From header is supplied.
    pub default_from_name: String,
    /// Mailbox (local part) of the default From address.
    pub default_from_mailbox: String,
    /// Originating domain; `derived_domain` strips a leading "www.".
    pub origin_domain: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            audit_enabled: false,
            always_bcc_admin: false,
            additional_admin_emails: String::new(),
            admin_email: String::new(),
            default_charset: "UTF-8".to_string(),
            default_from_name: "Mail Trail".to_string(),
            default_from_mailbox: "mailtrail".to_string(),
            origin_domain: "localhost".to_string(),
        }
    }
}

impl Policy {
    /// Read the policy from host-supplied configuration and context.
    pub fn from_config(config: &dyn ConfigStore, host: &dyn HostContext) -> Self {
        let defaults = Policy::default();
        Self {
            audit_enabled: config.get_bool(config::OPT_ENABLE_MAIL_SAVE, false),
            always_bcc_admin: config.get_bool(config::OPT_ALWAYS_BCC_ADMIN, false),
            additional_admin_emails: config.get_str(config::OPT_ADDITIONAL_ADMIN_EMAILS, ""),
            admin_email: config.get_str(config::OPT_ADMIN_EMAIL, ""),
            default_charset: config.get_str(config::OPT_DEFAULT_CHARSET, &defaults.default_charset),
            default_from_name: config.get_str(config::OPT_SITE_NAME, &defaults.default_from_name),
            default_from_mailbox: config
                .get_str(config::OPT_FROM_MAILBOX, &defaults.default_from_mailbox),
            origin_domain: host.originating_domain(),
        }
    }

    /// Site domain for the default From address: lower-cased, leading "www."
    /// stripped.
    pub fn derived_domain(&self) -> String {
        let domain = self.origin_domain.to_ascii_lowercase();
        match domain.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfig;

    struct FixedHost(&'static str);

    impl HostContext for FixedHost {
        fn originating_domain(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn derived_domain_strips_www_and_lowercases() {
        let mut p = Policy::default();
        p.origin_domain = "WWW.Example.COM".to_string();
        assert_eq!(p.derived_domain(), "example.com");
        p.origin_domain = "mail.example.com".to_string();
        assert_eq!(p.derived_domain(), "mail.example.com");
    }

    #[test]
    fn from_config_reads_options() {
        let mut cfg = MemoryConfig::new();
        cfg.set(config::OPT_ENABLE_MAIL_SAVE, "1");
        cfg.set(config::OPT_ADMIN_EMAIL, "admin@site.com");
        cfg.set(config::OPT_ADDITIONAL_ADMIN_EMAILS, "a@x.com, b@y.com");
        let policy = Policy::from_config(&cfg, &FixedHost("www.site.com"));
        assert!(policy.audit_enabled);
        assert!(!policy.always_bcc_admin);
        assert_eq!(policy.admin_email, "admin@site.com");
        assert_eq!(policy.derived_domain(), "site.com");
        assert_eq!(policy.default_charset, "UTF-8");
    }
}
