use std::fmt;

/// Errors that abort a render. Recoverable conditions (missing letterhead,
/// malformed dates in lenient mode) are logged and worked around instead.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// A required joined entity (exporter, manufacturer, …) is absent from
    /// the record. Raised before any drawing happens.
    MissingEntity(&'static str),
    /// A field failed to parse and strict mode is on.
    MalformedField { field: &'static str, value: String },
    /// A single block is taller than an empty page can hold.
    LayoutOverflow(String),
    /// Declared column widths do not sum to the declared table width.
    BadTableSpec(String),
    /// The input record is not valid JSON for any known document type.
    InvalidRecord(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::MissingEntity(name) => write!(f, "missing required entity: {name}"),
            Error::MalformedField { field, value } => {
                write!(f, "malformed value for {field}: {value:?}")
            }
            Error::LayoutOverflow(what) => {
                write!(f, "block does not fit on an empty page: {what}")
            }
            Error::BadTableSpec(msg) => write!(f, "bad table spec: {msg}"),
            Error::InvalidRecord(msg) => write!(f, "invalid document record: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidRecord(e.to_string())
    }
}
