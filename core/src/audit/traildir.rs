/*
 * traildir.rs
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

//! File-backed MessageStore: one XML record file per send attempt in a trail
//! directory, with a plain-text .idlist counter for id allocation. All writes
//! go through a temp file and rename.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::audit::record::RecordStatus;
use crate::audit::store::{AuditError, MessageStore, NewRecord, RecordId};

const IDLIST_HEADER: &str = "# mailtrail-idlist v1";

/// A record read back from the trail directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub subject: String,
    pub body: String,
    pub status: Option<RecordStatus>,
    pub fields: Vec<(String, String)>,
}

/// Trail directory store. Record ids are monotonically increasing and stable
/// across reopen; records are never deleted here.
pub struct TrailDir {
    dir: PathBuf,
    next_id: Mutex<RecordId>,
}

impl TrailDir {
    /// Open or create a trail directory and load the id counter.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| AuditError::storage(e.to_string()))?;
        let next_id = load_next_id(&dir)?;
        Ok(Self {
            dir,
            next_id: Mutex::new(next_id),
        })
    }

    /// All record ids present, ascending.
    pub fn record_ids(&self) -> Result<Vec<RecordId>, AuditError> {
        let mut ids = Vec::new();
        let entries = fs::read_dir(&self.dir).map_err(|e| AuditError::storage(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| AuditError::storage(e.to_string()))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".xml") {
                if let Ok(id) = stem.parse::<RecordId>() {
                    ids.push(id);
                }
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Read one record back.
    pub fn load_record(&self, id: RecordId) -> Result<StoredRecord, AuditError> {
        load_record_file(&self.record_path(id))
    }

    fn record_path(&self, id: RecordId) -> PathBuf {
        self.dir.join(format!("{}.xml", id))
    }
}

impl MessageStore for TrailDir {
    fn create_record(&self, record: &NewRecord<'_>) -> Result<RecordId, AuditError> {
        let mut guard = self
            .next_id
            .lock()
            .map_err(|_| AuditError::storage("id counter lock poisoned"))?;
        let id = *guard;
        let doc = StoredRecord {
            subject: record.subject.to_string(),
            body: record.body.to_string(),
            status: Some(record.status),
            fields: Vec::new(),
        };
        write_record_file(&self.record_path(id), &doc)?;
        *guard = id + 1;
        save_next_id(&self.dir, *guard)?;
        Ok(id)
    }

    fn write_field(&self, id: RecordId, name: &str, value: &str) -> Result<(), AuditError> {
        let path = self.record_path(id);
        let mut doc = load_record_file(&path)?;
        if doc.fields.iter().any(|(n, _)| n == name) {
            return Err(AuditError::DuplicateField(name.to_string()));
        }
        doc.fields.push((name.to_string(), value.to_string()));
        write_record_file(&path, &doc)
    }

    fn update_field(&self, id: RecordId, name: &str, value: &str) -> Result<(), AuditError> {
        let path = self.record_path(id);
        let mut doc = load_record_file(&path)?;
        match doc.fields.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => doc.fields.push((name.to_string(), value.to_string())),
        }
        write_record_file(&path, &doc)
    }
}

/// Load the id counter from .idlist, or derive it from the record files when
/// the list is missing or unreadable (never reuse an existing id).
fn load_next_id(dir: &Path) -> Result<RecordId, AuditError> {
    let path = dir.join(".idlist");
    let f = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return next_id_from_files(dir),
        Err(e) => return Err(AuditError::storage(e.to_string())),
    };
    let r = BufReader::new(f);
    let mut lines = r.lines();
    let first = lines
        .next()
        .transpose()
        .map_err(|e| AuditError::storage(e.to_string()))?
        .unwrap_or_default();
    if first != IDLIST_HEADER {
        return next_id_from_files(dir);
    }
    for line in lines {
        let line = line.map_err(|e| AuditError::storage(e.to_string()))?;
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("next ") {
            if let Ok(n) = rest.trim().parse::<RecordId>() {
                return Ok(n.max(1));
            }
        }
    }
    next_id_from_files(dir)
}

fn next_id_from_files(dir: &Path) -> Result<RecordId, AuditError> {
    let mut max_id = 0;
    let entries = fs::read_dir(dir).map_err(|e| AuditError::storage(e.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|e| AuditError::storage(e.to_string()))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if let Some(stem) = name.strip_suffix(".xml") {
            if let Ok(id) = stem.parse::<RecordId>() {
                max_id = max_id.max(id);
            }
        }
    }
    Ok(max_id + 1)
}

fn save_next_id(dir: &Path, next: RecordId) -> Result<(), AuditError> {
    let path = dir.join(".idlist");
    let tmp = dir.join(".idlist.tmp");
    let f = File::create(&tmp).map_err(|e| AuditError::storage(e.to_string()))?;
    let mut w = BufWriter::new(f);
    writeln!(w, "{}", IDLIST_HEADER).map_err(|e| AuditError::storage(e.to_string()))?;
    writeln!(w, "next {}", next).map_err(|e| AuditError::storage(e.to_string()))?;
    w.flush().map_err(|e| AuditError::storage(e.to_string()))?;
    drop(w);
    fs::rename(tmp, path).map_err(|e| AuditError::storage(e.to_string()))?;
    Ok(())
}

/// Parse a record file: <record> with <subject>, <body>, <status> and zero or
/// more <field><name>/<value> entries.
fn load_record_file(path: &Path) -> Result<StoredRecord, AuditError> {
    let content = fs::read_to_string(path).map_err(|e| AuditError::storage(e.to_string()))?;
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut doc = StoredRecord {
        subject: String::new(),
        body: String::new(),
        status: None,
        fields: Vec::new(),
    };
    let mut in_field = false;
    let mut field_name = String::new();
    let mut field_value = String::new();
    let mut element_name = Vec::<u8>::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(AuditError::storage(format!("XML parse error: {}", e))),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if name == b"field" {
                    in_field = true;
                    field_name.clear();
                    field_value.clear();
                } else {
                    element_name.clear();
                    element_name.extend_from_slice(name);
                }
            }
            Ok(Event::Text(e)) => {
                if element_name.is_empty() {
                    continue;
                }
                let text = e
                    .unescape()
                    .map_err(|e| AuditError::storage(e.to_string()))?
                    .to_string();
                if in_field {
                    if element_name == b"name" {
                        field_name = text;
                    } else if element_name == b"value" {
                        field_value = text;
                    }
                } else if element_name == b"subject" {
                    doc.subject = text;
                } else if element_name == b"body" {
                    doc.body = text;
                } else if element_name == b"status" {
                    doc.status = RecordStatus::parse(&text);
                }
                element_name.clear();
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"field" && in_field {
                    doc.fields.push((
                        std::mem::take(&mut field_name),
                        std::mem::take(&mut field_value),
                    ));
                    in_field = false;
                }
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(doc)
}

fn write_record_file(path: &Path, doc: &StoredRecord) -> Result<(), AuditError> {
    let bytes = record_xml_to_bytes(doc).map_err(AuditError::storage)?;
    let tmp = path.with_extension("xml.tmp");
    let mut f = File::create(&tmp).map_err(|e| AuditError::storage(e.to_string()))?;
    f.write_all(&bytes)
        .map_err(|e| AuditError::storage(e.to_string()))?;
    f.flush().map_err(|e| AuditError::storage(e.to_string()))?;
    drop(f);
    fs::rename(tmp, path).map_err(|e| AuditError::storage(e.to_string()))?;
    Ok(())
}

fn record_xml_to_bytes(doc: &StoredRecord) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| e.to_string())?;
    writer
        .write_event(Event::Start(BytesStart::new("record")))
        .map_err(|e| e.to_string())?;
    write_text_element(&mut writer, "subject", &doc.subject)?;
    write_text_element(&mut writer, "body", &doc.body)?;
    if let Some(status) = doc.status {
        write_text_element(&mut writer, "status", status.as_str())?;
    }
    for (name, value) in &doc.fields {
        writer
            .write_event(Event::Start(BytesStart::new("field")))
            .map_err(|e| e.to_string())?;
        write_text_element(&mut writer, "name", name)?;
        write_text_element(&mut writer, "value", value)?;
        writer
            .write_event(Event::End(BytesEnd::new("field")))
            .map_err(|e| e.to_string())?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("record")))
        .map_err(|e| e.to_string())?;
    Ok(out)
}

fn write_text_element(
    writer: &mut Writer<&mut Vec<u8>>,
    name: &'static str,
    text: &str,
) -> Result<(), String> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| e.to_string())?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| e.to_string())?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_trail(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mailtrail-trail-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn new_record() -> NewRecord<'static> {
        NewRecord {
            subject: "hello",
            body: "body text",
            status: RecordStatus::Private,
        }
    }

    #[test]
    fn create_and_load_roundtrip() {
        let dir = temp_trail("roundtrip");
        let store = TrailDir::open(&dir).unwrap();
        let id = store.create_record(&new_record()).unwrap();
        store.write_field(id, "_to", "a@x.com,b@y.com").unwrap();
        let doc = store.load_record(id).unwrap();
        assert_eq!(doc.subject, "hello");
        assert_eq!(doc.body, "body text");
        assert_eq!(doc.status, Some(RecordStatus::Private));
        assert_eq!(
            doc.fields,
            vec![("_to".to_string(), "a@x.com,b@y.com".to_string())]
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn duplicate_field_is_rejected_then_updatable() {
        let dir = temp_trail("dup");
        let store = TrailDir::open(&dir).unwrap();
        let id = store.create_record(&new_record()).unwrap();
        store.write_field(id, "_to", "a@x.com").unwrap();
        let err = store.write_field(id, "_to", "other").unwrap_err();
        assert!(matches!(err, AuditError::DuplicateField(_)));
        store.update_field(id, "_to", "other").unwrap();
        let doc = store.load_record(id).unwrap();
        assert_eq!(doc.fields, vec![("_to".to_string(), "other".to_string())]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ids_monotonic_across_reopen() {
        let dir = temp_trail("reopen");
        let first;
        {
            let store = TrailDir::open(&dir).unwrap();
            first = store.create_record(&new_record()).unwrap();
        }
        let store = TrailDir::open(&dir).unwrap();
        let second = store.create_record(&new_record()).unwrap();
        assert!(second > first);
        assert_eq!(store.record_ids().unwrap(), vec![first, second]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_idlist_derives_counter_from_files() {
        let dir = temp_trail("derive");
        let id;
        {
            let store = TrailDir::open(&dir).unwrap();
            id = store.create_record(&new_record()).unwrap();
        }
        fs::remove_file(dir.join(".idlist")).unwrap();
        let store = TrailDir::open(&dir).unwrap();
        let next = store.create_record(&new_record()).unwrap();
        assert_eq!(next, id + 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn xml_content_escaped() {
        let dir = temp_trail("escape");
        let store = TrailDir::open(&dir).unwrap();
        let record = NewRecord {
            subject: "a < b & c",
            body: "<html>",
            status: RecordStatus::Draft,
        };
        let id = store.create_record(&record).unwrap();
        let doc = store.load_record(id).unwrap();
        assert_eq!(doc.subject, "a < b & c");
        assert_eq!(doc.body, "<html>");
        assert_eq!(doc.status, Some(RecordStatus::Draft));
        let _ = fs::remove_dir_all(&dir);
    }
}
