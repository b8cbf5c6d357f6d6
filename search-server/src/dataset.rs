//! User records and the providers that supply them.
//!
//! # Design
//! The server keeps no records between requests. Every search asks its
//! `RecordProvider` for a fresh `Vec<Record>` and works on that copy, so
//! concurrent requests share nothing mutable.

use std::fs;
use std::io;
use std::path::PathBuf;

use search_core::User;
use serde::Deserialize;
use thiserror::Error;

/// A user row as loaded from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// `first_name + " " + last_name`, derived at load time.
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

impl Record {
    pub fn new(
        id: i64,
        first_name: &str,
        last_name: &str,
        age: i64,
        about: &str,
        gender: &str,
    ) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            name: format!("{first_name} {last_name}"),
            age,
            about: about.to_string(),
            gender: gender.to_string(),
        }
    }
}

impl From<Record> for User {
    fn from(record: Record) -> Self {
        User {
            id: record.id,
            name: record.name,
            age: record.age,
            about: record.about,
            gender: record.gender,
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse dataset {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

/// Supplies the ordered record sequence a search runs against.
pub trait RecordProvider: Send + Sync {
    fn records(&self) -> Result<Vec<Record>, DatasetError>;
}

/// Re-reads an XML dataset file on every call.
#[derive(Debug, Clone)]
pub struct XmlFileProvider {
    path: PathBuf,
}

impl XmlFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordProvider for XmlFileProvider {
    fn records(&self) -> Result<Vec<Record>, DatasetError> {
        let xml = fs::read_to_string(&self.path).map_err(|source| DatasetError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_dataset(&xml).map_err(|source| DatasetError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// A fixed record set held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: Vec<Record>,
}

impl MemoryProvider {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordProvider for MemoryProvider {
    fn records(&self) -> Result<Vec<Record>, DatasetError> {
        Ok(self.records.clone())
    }
}

#[derive(Deserialize)]
struct Root {
    #[serde(rename = "row", default)]
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    id: i64,
    first_name: String,
    last_name: String,
    age: i64,
    about: String,
    gender: String,
}

/// Parse `<root><row>...</row></root>` into records, keeping document order.
pub fn parse_dataset(xml: &str) -> Result<Vec<Record>, quick_xml::DeError> {
    let root: Root = quick_xml::de::from_str(xml)?;
    Ok(root
        .rows
        .into_iter()
        .map(|row| {
            Record::new(
                row.id,
                &row.first_name,
                &row.last_name,
                row.age,
                &row.about,
                &row.gender,
            )
        })
        .collect())
}
