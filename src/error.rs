use std::io;

use thiserror::Error;

// Errors raised by the persisted key-value store layer. Every variant names
// the backing file so a broken store can be found on disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write store file {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("store file {file} is not a JSON object: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize store file {file}: {source}")]
    Serialize {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for key {key} in {file}: {source}")]
    Encode {
        file: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for key {key} in {file} does not match its expected shape: {source}")]
    Decode {
        file: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// Errors raised by the vault indexer. Failures inside one subtree are
// absorbed during the scan and never surface here; only the root going
// missing or unreadable is a hard failure.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no vault is configured")]
    NotConfigured,

    #[error("vault path {path} is not a directory")]
    NotADirectory { path: String },

    #[error("failed to read vault root {path}: {source}")]
    RootUnreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

// Error surface of the command layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::TaskFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_offending_file() {
        let err = StoreError::Read {
            file: "user.json".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("user.json"));

        let err = ScanError::NotConfigured;
        assert!(err.to_string().contains("not configured"));
    }
}
