/*
 * config.rs
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

//! Option storage: the ConfigStore capability the host application supplies,
//! plus an XML-file-backed implementation (root <options>, one <option> with
//! <name> and <value> per entry). All XML read/write uses the quick_xml
//! parser/writer; no regex or hand parsing.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

pub const OPT_ENABLE_MAIL_SAVE: &str = "enable_mail_save";
pub const OPT_ALWAYS_BCC_ADMIN: &str = "always_bcc_admin";
pub const OPT_ADDITIONAL_ADMIN_EMAILS: &str = "additional_admin_emails";
pub const OPT_ADMIN_EMAIL: &str = "admin_email";
pub const OPT_DEFAULT_CHARSET: &str = "default_charset";
pub const OPT_SITE_NAME: &str = "site_name";
pub const OPT_FROM_MAILBOX: &str = "from_mailbox";

/// Option lookup supplied by the host application.
pub trait ConfigStore: Send + Sync {
    /// Raw option value; None when the key is not present.
    fn get(&self, key: &str) -> Option<String>;

    fn get_str(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Boolean option: "1", "true", "yes" or "on" (case-insensitive) are
    /// true; any other present value is false; absent yields the default.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(v) => matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            None => default,
        }
    }
}

/// In-memory options, for tests and hosts with their own option source.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfig {
    options: HashMap<String, String>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.options.get(key).cloned()
    }
}

/// Options loaded from an XML file. A missing file yields an empty store so
/// first runs work without setup.
#[derive(Debug, Clone, Default)]
pub struct XmlConfigStore {
    options: HashMap<String, String>,
}

impl XmlConfigStore {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e.to_string()),
        };
        let options = parse_options_xml(&content)?;
        Ok(Self { options })
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Write the options file atomically (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let bytes = options_xml_to_bytes(&self.options)?;
        let tmp = path.with_extension("tmp");
        let mut f = fs::File::create(&tmp).map_err(|e| e.to_string())?;
        f.write_all(&bytes).map_err(|e| e.to_string())?;
        f.flush().map_err(|e| e.to_string())?;
        drop(f);
        fs::rename(&tmp, path).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl ConfigStore for XmlConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.options.get(key).cloned()
    }
}

/// Parse options XML: <options><option><name>k</name><value>v</value></option>...</options>.
fn parse_options_xml(content: &str) -> Result<HashMap<String, String>, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut out = HashMap::new();
    let mut current_name = String::new();
    let mut current_value = String::new();
    let mut in_option = false;
    let mut element_name = Vec::<u8>::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(format!("XML parse error: {}", e)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if name == b"option" {
                    in_option = true;
                    current_name.clear();
                    current_value.clear();
                } else if in_option && (name == b"name" || name == b"value") {
                    element_name.clear();
                    element_name.extend_from_slice(name);
                }
            }
            Ok(Event::Text(e)) => {
                if !in_option || element_name.is_empty() {
                    continue;
                }
                let text = e.unescape().map_err(|e| e.to_string())?.trim().to_string();
                if element_name == b"name" {
                    current_name = text;
                } else if element_name == b"value" {
                    current_value = text;
                }
                element_name.clear();
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"option" && !current_name.is_empty() {
                    out.insert(
                        std::mem::take(&mut current_name),
                        std::mem::take(&mut current_value),
                    );
                    in_option = false;
                }
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

/// Build options XML into a byte vector (UTF-8).
fn options_xml_to_bytes(options: &HashMap<String, String>) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| e.to_string())?;
    writer
        .write_event(Event::Start(BytesStart::new("options")))
        .map_err(|e| e.to_string())?;
    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();
    for key in keys {
        let value = &options[key];
        writer
            .write_event(Event::Start(BytesStart::new("option")))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::Start(BytesStart::new("name")))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::Text(BytesText::new(key)))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new("name")))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::Start(BytesStart::new("value")))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new("value")))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new("option")))
            .map_err(|e| e.to_string())?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("options")))
        .map_err(|e| e.to_string())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mailtrail-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn bool_option_parsing() {
        let mut cfg = MemoryConfig::new();
        cfg.set(OPT_ALWAYS_BCC_ADMIN, "1");
        cfg.set(OPT_ENABLE_MAIL_SAVE, "off");
        assert!(cfg.get_bool(OPT_ALWAYS_BCC_ADMIN, false));
        assert!(!cfg.get_bool(OPT_ENABLE_MAIL_SAVE, true));
        assert!(cfg.get_bool("missing", true));
    }

    #[test]
    fn missing_file_is_empty() {
        let store = XmlConfigStore::load(&temp_path("missing.xml")).unwrap();
        assert_eq!(store.get(OPT_ADMIN_EMAIL), None);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let path = temp_path("roundtrip.xml");
        let mut store = XmlConfigStore::default();
        store.set(OPT_ADMIN_EMAIL, "admin@site.com");
        store.set(OPT_SITE_NAME, "My <Site> & Co");
        store.save(&path).unwrap();
        let loaded = XmlConfigStore::load(&path).unwrap();
        assert_eq!(loaded.get(OPT_ADMIN_EMAIL).as_deref(), Some("admin@site.com"));
        assert_eq!(loaded.get(OPT_SITE_NAME).as_deref(), Some("My <Site> & Co"));
        let _ = fs::remove_file(&path);
    }
}
