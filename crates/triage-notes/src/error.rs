use thiserror::Error;

/// Errors from reading golden datasets. Note parsing itself has no error
/// type.
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed golden record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
