//! JSON file persistence for the series.
//!
//! File shape:
//!
//! ```json
//! { "data": [ { "date": "2023-01-01T12:00:00.000Z", "value": 10, "dateDisplay": "01.01" } ] }
//! ```
//!
//! The file is read once at startup and rewritten in full after every
//! upsert. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write leaves the previous file intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calendar::{display_short, parse_calendar_date};
use crate::error::{CoreError, Result, SeriesError};
use crate::series::RawRecord;

/// Where a [`SeriesStore`](crate::store::SeriesStore) reads and writes records.
pub trait SeriesPersistence: Send + Sync {
    /// All stored records, in file order. Missing storage is an empty list.
    fn load_records(&self) -> Result<Vec<RawRecord>>;

    /// Replace the stored series with `records`.
    fn write_records(&self, records: &[RawRecord]) -> Result<()>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

#[derive(Debug, Serialize)]
struct StoredRecord<'a> {
    date: &'a str,
    value: f64,
    #[serde(rename = "dateDisplay")]
    date_display: String,
}

#[derive(Debug, Deserialize)]
struct LoadedRecord {
    date: String,
    value: f64,
}

#[derive(Debug, Serialize)]
struct OutDocument<'a> {
    data: Vec<StoredRecord<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InDocument {
    Wrapped { data: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

/// Series stored as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persistence_failed(&self, message: impl ToString) -> CoreError {
        CoreError::PersistenceFailed {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

impl SeriesPersistence for JsonFileStore {
    fn load_records(&self) -> Result<Vec<RawRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let items = match serde_json::from_str::<InDocument>(&content)? {
            InDocument::Wrapped { data } | InDocument::Bare(data) => data,
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let record: LoadedRecord =
                    serde_json::from_value(item).map_err(|e| SeriesError::MalformedRecord {
                        index,
                        message: e.to_string(),
                    })?;
                Ok(RawRecord {
                    date: record.date,
                    value: record.value,
                })
            })
            .collect()
    }

    fn write_records(&self, records: &[RawRecord]) -> Result<()> {
        let data = records
            .iter()
            .map(|r| {
                let date = parse_calendar_date(&r.date).map_err(|e| self.persistence_failed(e))?;
                Ok(StoredRecord {
                    date: &r.date,
                    value: r.value,
                    date_display: display_short(date),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let json = serde_json::to_string(&OutDocument { data })
            .map_err(|e| self.persistence_failed(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.persistence_failed(e))?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| self.persistence_failed(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.persistence_failed(e))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
