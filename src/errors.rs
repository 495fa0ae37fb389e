use thiserror::Error;

/// Errors that can occur while building the documentation model.
#[derive(Error, Debug)]
pub enum DocGraphError {
    /// A structural member has no derivable namespace. This is a fatal input
    /// error: a member that belongs nowhere cannot be placed in the forest.
    #[error("no namespace found for {member}")]
    MissingNamespace { member: String },

    /// An identifier resolved to a node of an incompatible kind. This
    /// indicates a broken identifier derivation, not missing documentation.
    #[error("identifier '{identifier}' resolved to a {actual} where a {expected} was expected")]
    KindMismatch {
        identifier: String,
        expected: String,
        actual: String,
    },

    #[error("metadata error: {message} (path: {path})")]
    Metadata { message: String, path: String },

    #[error("xml error: {message}")]
    Xml { message: String },

    #[error("argument error: {message}")]
    Argument { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `DocGraphError`.
pub type Result<T> = std::result::Result<T, DocGraphError>;
