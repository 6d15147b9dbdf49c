use std::num::ParseIntError;
use std::path::PathBuf;
use config::ConfigError;
use thiserror::Error;

/// Errors surfaced by opening and persisting record stores.
///
/// Both store kinds are recoverable at the call site that triggered the load or the flush,
/// nothing in this crate retries them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Malformed record in {} at line {line_no} ({line}): {source}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line_no: usize,
        line: String,
        #[source]
        source: DecodeError,
    },

    #[error("Storage error on {}: {source}", .path.display())]
    StorageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::StorageIo { path: path.into(), source }
    }
}

/// Why a single line could not be turned into a record.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid number `{value}` in field {field}: {source}")]
    Number {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid date `{value}` in field {field}: {source}")]
    Date {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("value `{value}` out of range for field {field}")]
    OutOfRange { field: &'static str, value: String },
}

/// A symbolic field name that the record type does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);
