/*
 * headers.rs
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

//! Raw header blob classification. From, Content-Type, Cc and Bcc are routed
//! to dedicated fields; everything else lands in the ordered custom header
//! list. Lines that do not parse are ignored silently.

use crate::mail::address::{parse_address, Address};
use crate::mail::normalize_newlines;

/// Structured result of header parsing. Recognized header names never appear
/// in `other`. `cc`/`bcc` hold raw comma-split tokens; final Address
/// extraction happens during message assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSet {
    pub from: Option<Address>,
    pub content_type: Option<String>,
    pub charset: Option<String>,
    pub boundary: Option<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    /// Custom headers in insertion order; a duplicate name overwrites the
    /// value at its first position.
    pub other: Vec<(String, String)>,
}

impl HeaderSet {
    /// Exact-name lookup in the custom headers.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.other
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_other(&mut self, name: &str, content: &str) {
        if let Some(entry) = self.other.iter_mut().find(|(n, _)| n == name) {
            entry.1 = content.to_string();
        } else {
            self.other.push((name.to_string(), content.to_string()));
        }
    }

    fn classify_line(&mut self, line: &str) {
        match line.split_once(':') {
            // Not a structured header; only a stray boundary= parameter is meaningful.
            None => {
                if let Some(b) = extract_param(line, "boundary=") {
                    self.boundary = Some(b);
                }
            }
            Some((name, content)) => self.classify(name.trim(), content.trim()),
        }
    }

    fn classify(&mut self, name: &str, content: &str) {
        match name.to_ascii_lowercase().as_str() {
            "from" => {
                if let Some(addr) = parse_address(content) {
                    self.from = Some(addr);
                }
            }
            "content-type" => match content.split_once(';') {
                Some((ty, rest)) => {
                    self.content_type = Some(ty.trim().to_string());
                    // Only the first parameter after the type is inspected.
                    let param = rest.split(';').next().unwrap_or("");
                    if let Some(cs) = extract_param(param, "charset=") {
                        self.charset = Some(cs);
                    } else if let Some(b) = extract_param(param, "boundary=") {
                        self.boundary = Some(b);
                        self.charset = None;
                    }
                }
                None => self.content_type = Some(content.to_string()),
            },
            "cc" => self.cc.extend(content.split(',').map(str::to_string)),
            "bcc" => self.bcc.extend(content.split(',').map(str::to_string)),
            _ => self.set_other(name, content),
        }
    }
}

/// Case-insensitive search for `key` (e.g. "boundary="); returns the text
/// after it with quotes removed and trimmed, or None when the key is absent.
fn extract_param(s: &str, key: &str) -> Option<String> {
    let idx = s.to_ascii_lowercase().find(key)?;
    let value: String = s[idx + key.len()..]
        .chars()
        .filter(|&c| c != '"' && c != '\'')
        .collect();
    Some(value.trim().to_string())
}

/// Parse a raw header blob: CRLF is normalized, then each newline-separated
/// line is classified.
pub fn parse_header_lines(raw: &str) -> HeaderSet {
    let mut set = HeaderSet::default();
    for line in normalize_newlines(raw).split('\n') {
        set.classify_line(line.trim());
    }
    set
}

/// Parse pre-split header lines ("Name: value" each).
pub fn parse_header_slice<S: AsRef<str>>(lines: &[S]) -> HeaderSet {
    let mut set = HeaderSet::default();
    for line in lines {
        set.classify_line(line.as_ref().trim());
    }
    set
}

/// Parse an already-structured name/value mapping; each entry is classified
/// as one header, preserving entry order for custom headers.
pub fn parse_header_map<S: AsRef<str>>(entries: &[(S, S)]) -> HeaderSet {
    let mut set = HeaderSet::default();
    for (name, content) in entries {
        set.classify(name.as_ref().trim(), content.as_ref().trim());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_recognized_and_custom_headers() {
        let set = parse_header_lines(
            "From: Admin <admin@site.com>\nContent-Type: text/html; charset=UTF-8\nX-Custom: value",
        );
        let from = set.from.unwrap();
        assert_eq!(from.display_name, "Admin");
        assert_eq!(from.email, "admin@site.com");
        assert_eq!(set.content_type.as_deref(), Some("text/html"));
        assert_eq!(set.charset.as_deref(), Some("UTF-8"));
        assert_eq!(set.other, vec![("X-Custom".to_string(), "value".to_string())]);
    }

    #[test]
    fn boundary_parameter_clears_charset() {
        let set = parse_header_lines("Content-Type: multipart/mixed; boundary=abc");
        assert_eq!(set.content_type.as_deref(), Some("multipart/mixed"));
        assert_eq!(set.boundary.as_deref(), Some("abc"));
        assert!(set.charset.is_none());
    }

    #[test]
    fn quoted_boundary_is_stripped() {
        let set = parse_header_lines("Content-Type: multipart/alternative; boundary=\"=_b1\"");
        assert_eq!(set.boundary.as_deref(), Some("=_b1"));
    }

    #[test]
    fn only_first_colon_splits() {
        let set = parse_header_lines("X-Link: https://example.com/path");
        assert_eq!(set.get("X-Link"), Some("https://example.com/path"));
    }

    #[test]
    fn bare_boundary_line_without_colon() {
        let set = parse_header_lines("boundary=\"frontier\"");
        assert_eq!(set.boundary.as_deref(), Some("frontier"));
    }

    #[test]
    fn unstructured_lines_ignored() {
        let set = parse_header_lines("this is not a header\n\n");
        assert_eq!(set, HeaderSet::default());
    }

    #[test]
    fn cc_and_bcc_accumulate_raw_tokens() {
        let set = parse_header_lines("Cc: a@x.com, Jane <j@x.com>\nBcc: b@y.com\nCc: c@z.com");
        assert_eq!(set.cc, vec!["a@x.com", " Jane <j@x.com>", "c@z.com"]);
        assert_eq!(set.bcc, vec!["b@y.com"]);
        assert!(set.other.is_empty());
    }

    #[test]
    fn duplicate_custom_header_last_write_wins_in_place() {
        let set = parse_header_lines("X-A: one\nX-B: two\nX-A: three");
        assert_eq!(
            set.other,
            vec![
                ("X-A".to_string(), "three".to_string()),
                ("X-B".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn recognized_names_are_case_insensitive() {
        let set = parse_header_lines("FROM: a@x.com\nCONTENT-TYPE: text/html\nCC: c@x.com");
        assert_eq!(set.from.unwrap().email, "a@x.com");
        assert_eq!(set.content_type.as_deref(), Some("text/html"));
        assert_eq!(set.cc, vec!["c@x.com"]);
    }

    #[test]
    fn crlf_normalized() {
        let set = parse_header_lines("X-A: one\r\nX-B: two");
        assert_eq!(set.other.len(), 2);
    }

    #[test]
    fn map_entries_classified() {
        let entries = vec![
            ("From".to_string(), "a@x.com".to_string()),
            ("X-Tag".to_string(), "t".to_string()),
        ];
        let set = parse_header_map(&entries);
        assert_eq!(set.get("X-Tag"), Some("t"));
        assert_eq!(set.from.unwrap().email, "a@x.com");
    }

    #[test]
    fn content_type_without_parameters() {
        let set = parse_header_lines("Content-Type: text/plain");
        assert_eq!(set.content_type.as_deref(), Some("text/plain"));
        assert!(set.charset.is_none());
        assert!(set.boundary.is_none());
    }
}
