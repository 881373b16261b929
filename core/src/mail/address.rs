/*
 * address.rs
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

//! Recipient address extraction: "Name <addr>" and bare addresses, comma lists.
//! Best effort only; malformed tokens are skipped, never errors. Syntax
//! validation beyond bracket extraction is the Mailer's job at delivery time.

use std::fmt;

/// A single recipient or sender. `email` never contains `<` or `>`;
/// `display_name` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub email: String,
    pub display_name: String,
}

impl Address {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: String::new(),
        }
    }

    pub fn with_name(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.display_name, self.email)
        }
    }
}

/// Extract one address from a token. Text before the first `<` (with any `"`
/// removed) is the display name; text between the brackets is the email. A
/// token without brackets is a bare email. Returns None for tokens that are
/// empty after trimming or have brackets around an empty email.
pub fn parse_address(token: &str) -> Option<Address> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let open = match token.find('<') {
        Some(i) => i,
        None => return Some(Address::new(token)),
    };
    let display_name = token[..open].replace('"', "").trim().to_string();
    let after = &token[open + 1..];
    let inner = match after.find('>') {
        Some(close) => &after[..close],
        None => after,
    };
    let email: String = inner.chars().filter(|&c| c != '<' && c != '>').collect();
    let email = email.trim().to_string();
    if email.is_empty() {
        return None;
    }
    Some(Address {
        email,
        display_name,
    })
}

/// Parse a comma-joined recipient list. One Address per non-empty segment,
/// order preserved; unparseable segments are dropped so the remaining
/// recipients still get their mail.
pub fn parse_address_list(raw: &str) -> Vec<Address> {
    raw.split(',').filter_map(parse_address).collect()
}

/// Parse pre-split recipient tokens. Each token goes through bracket
/// extraction as-is, without further comma splitting.
pub fn parse_address_slice<S: AsRef<str>>(tokens: &[S]) -> Vec<Address> {
    tokens
        .iter()
        .filter_map(|t| parse_address(t.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address() {
        let a = parse_address(" bob@y.com ").unwrap();
        assert_eq!(a.email, "bob@y.com");
        assert_eq!(a.display_name, "");
    }

    #[test]
    fn named_address() {
        let a = parse_address("Jane Doe <jane@x.com>").unwrap();
        assert_eq!(a.display_name, "Jane Doe");
        assert_eq!(a.email, "jane@x.com");
    }

    #[test]
    fn quoted_display_name() {
        let a = parse_address("\"Jane Doe\" <jane@x.com>").unwrap();
        assert_eq!(a.display_name, "Jane Doe");
    }

    #[test]
    fn comma_list_order_preserved() {
        let list = parse_address_list("Jane Doe <jane@x.com>, bob@y.com");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Address::with_name("Jane Doe", "jane@x.com"));
        assert_eq!(list[1], Address::new("bob@y.com"));
    }

    #[test]
    fn malformed_segments_skipped() {
        let list = parse_address_list("a@x.com,, ,<>,b@y.com");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].email, "a@x.com");
        assert_eq!(list[1].email, "b@y.com");
    }

    #[test]
    fn email_never_contains_brackets() {
        let a = parse_address("X <<a@b>").unwrap();
        assert!(!a.email.contains('<'));
        assert!(!a.email.contains('>'));
        assert_eq!(a.email, "a@b");
    }

    #[test]
    fn missing_close_bracket_still_extracts() {
        let a = parse_address("Jane <jane@x.com").unwrap();
        assert_eq!(a.email, "jane@x.com");
        assert_eq!(a.display_name, "Jane");
    }

    #[test]
    fn slice_tokens_not_comma_split() {
        let tokens = vec!["Jane <jane@x.com>".to_string(), "bob@y.com".to_string()];
        let list = parse_address_slice(&tokens);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].email, "jane@x.com");
    }

    #[test]
    fn display_formats_name_and_email() {
        assert_eq!(
            Address::with_name("Jane", "j@x.com").to_string(),
            "Jane <j@x.com>"
        );
        assert_eq!(Address::new("j@x.com").to_string(), "j@x.com");
    }
}
