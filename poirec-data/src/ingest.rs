//! Streaming reader for JSON-lines business dumps.
//!
//! Each non-blank line holds one JSON object. The five fields the ranker
//! needs are copied into a [`RawRecord`] as text, whatever their JSON type;
//! other fields are ignored. Validation happens later, in the feature
//! builder, so a record with missing or malformed fields is still yielded.

use std::io::{self, BufRead, BufReader};
use std::str::Utf8Error;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8;
use log::warn;
use poirec_core::{CATEGORY_SEPARATOR, RawRecord, RecordField};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::fs::open_utf8_file;

/// Errors that stop ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be opened.
    #[error("failed to open business dump at {path}")]
    Open {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// Reading a line failed.
    #[error("failed to read business dump at line {line}")]
    ReadLine {
        /// One-based number of the line being read.
        line: usize,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
}

/// Reasons a single line was skipped.
#[derive(Debug, Error)]
pub enum LineError {
    /// The line is not valid JSON.
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),
    /// The line is valid JSON but not an object.
    #[error("expected a JSON object")]
    NotAnObject,
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    Encoding(#[from] Utf8Error),
}

/// Parse one JSON line into a [`RawRecord`].
///
/// Strings are taken verbatim, numbers and booleans in their JSON spelling,
/// and arrays of strings are joined with `", "`. `null` counts as absent.
///
/// # Errors
/// Returns [`LineError`] when the line is not a JSON object.
///
/// # Examples
/// ```
/// use poirec_core::RecordField;
/// use poirec_data::parse_business_line;
///
/// let raw = parse_business_line(r#"{"business_id":"b1","stars":4.5,"latitude":null}"#)?;
/// assert_eq!(raw.get(RecordField::Stars), Some("4.5"));
/// assert_eq!(raw.get(RecordField::Latitude), None);
/// # Ok::<(), poirec_data::LineError>(())
/// ```
pub fn parse_business_line(line: &str) -> Result<RawRecord, LineError> {
    let Value::Object(object) = serde_json::from_str::<Value>(line)? else {
        return Err(LineError::NotAnObject);
    };
    Ok(record_from_object(&object))
}

fn record_from_object(object: &Map<String, Value>) -> RawRecord {
    let mut record = RawRecord::new();
    for field in RecordField::ALL {
        if let Some(text) = object.get(field.as_str()).and_then(field_text) {
            record.set(field, text);
        }
    }
    record
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => Some(join_labels(items).unwrap_or_else(|| value.to_string())),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn join_labels(items: &[Value]) -> Option<String> {
    let labels: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
    labels.map(|found| found.join(CATEGORY_SEPARATOR))
}

/// Iterator over the businesses in a JSON-lines stream.
///
/// Blank lines are ignored. Lines that are not UTF-8 JSON objects are logged
/// at `warn` with their line number and skipped. The iterator stops after the
/// first read error.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use poirec_data::BusinessReader;
///
/// let input = "{\"business_id\":\"a\"}\nnot json\n\n{\"business_id\":\"b\"}\n";
/// let mut reader = BusinessReader::new(Cursor::new(input));
/// let records: Vec<_> = reader.by_ref().collect::<Result<_, _>>()?;
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(reader.skipped(), 1);
/// # Ok::<(), poirec_data::IngestError>(())
/// ```
#[derive(Debug)]
pub struct BusinessReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    skipped: u64,
    failed: bool,
}

impl<R: BufRead> BusinessReader<R> {
    /// Wrap a buffered reader.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
            skipped: 0,
            failed: false,
        }
    }

    /// Number of non-blank lines skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl BusinessReader<BufReader<fs_utf8::File>> {
    /// Open a JSON-lines file.
    ///
    /// # Errors
    /// Returns [`IngestError::Open`] when the file cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, IngestError> {
        let file = open_utf8_file(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for BusinessReader<R> {
    type Item = Result<RawRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.line_number = self.line_number.saturating_add(1),
                Err(source) => {
                    self.failed = true;
                    return Some(Err(IngestError::ReadLine {
                        line: self.line_number.saturating_add(1),
                        source,
                    }));
                }
            }
            let parsed = std::str::from_utf8(&self.buffer)
                .map_err(LineError::from)
                .and_then(|text| {
                    let line = text.trim();
                    if line.is_empty() {
                        Ok(None)
                    } else {
                        parse_business_line(line).map(Some)
                    }
                });
            match parsed {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(err) => {
                    warn!("skipping line {}: {err}", self.line_number);
                    self.skipped = self.skipped.saturating_add(1);
                }
            }
        }
    }
}
