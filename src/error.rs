use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Destination or database file I/O failed.
    Io(std::io::Error),
    /// The record store could not be opened or queried.
    Store(rusqlite::Error),
    /// The report query violates a precondition (empty category set).
    InvalidQuery(String),
    /// A record offered for insertion violates a store invariant.
    InvalidRecord(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Store(e) => write!(f, "record store error: {e}"),
            Error::InvalidQuery(msg) => write!(f, "invalid report query: {msg}"),
            Error::InvalidRecord(msg) => write!(f, "invalid record: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Store(e)
    }
}
