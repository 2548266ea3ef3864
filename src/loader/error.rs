use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a load run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open warehouse store: {0:#}")]
    Connection(#[source] anyhow::Error),

    #[error("Malformed data in {}:{line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Store rejected data from {}: {source:#}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Cannot read {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single field of a JSON object that could not be turned into a record value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("field `{field}`: {problem}")]
pub struct FieldError {
    pub field: &'static str,
    pub problem: String,
}

impl FieldError {
    pub fn new(field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            field,
            problem: problem.into(),
        }
    }
}
