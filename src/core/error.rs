use std::fmt;

/// Why a page could not be loaded
///
/// The store never returns this to the caller of an operation; it is kept in
/// the list state so the view can tell "no data" apart from "couldn't load".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Network-level failure (connection refused, timeout, ...)
    Transport(String),
    /// The API answered with a non-success status
    Status { code: u16, message: String },
    /// The response could not be decoded into a page
    Decode(String),
    /// The request was abandoned before it produced a response
    Cancelled,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Transport(message) => write!(f, "transport error: {message}"),
            LoadError::Status { code, message } => write!(f, "status {code}: {message}"),
            LoadError::Decode(message) => write!(f, "decode error: {message}"),
            LoadError::Cancelled => f.write_str("request cancelled"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Errors returned by create/edit/delete calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudError {
    /// The injected API has no implementation for this operation
    Unsupported(&'static str),
    /// The API refused the request (validation, permissions, ...)
    Rejected(String),
    /// The target entity does not exist upstream
    NotFound(String),
    /// Network-level failure
    Transport(String),
}

impl fmt::Display for CrudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrudError::Unsupported(operation) => write!(f, "{operation} is not supported"),
            CrudError::Rejected(message) => write!(f, "request rejected: {message}"),
            CrudError::NotFound(id) => write!(f, "entity {id} not found"),
            CrudError::Transport(message) => write!(f, "transport error: {message}"),
        }
    }
}

impl std::error::Error for CrudError {}
