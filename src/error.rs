//! Load-time error types.
//!
//! Every failure in this crate happens while loading a level: a malformed map
//! document, an asset the resource loader never registered, or an object name
//! that resolves to no entity factory. Nothing here is retried; the caller
//! logs the diagnostic and aborts the load.

use std::{error, fmt, io};

/// Error raised while parsing or assembling a level.
#[derive(Debug)]
pub enum MapError {
    /// The map document is structurally invalid (missing `layers`, missing
    /// `head`, malformed records). Carries the parser diagnostic.
    Parse(String),
    /// An item references a sprite the resource loader never registered.
    MissingSprite(String),
    /// An object-layer item names an entity with no registered factory.
    UnknownEntity(String),
    /// The map or modpaths file could not be read.
    Io(io::Error),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Parse(msg) => write!(f, "invalid map document: {}", msg),
            MapError::MissingSprite(name) => write!(f, "unknown sprite: {}", name),
            MapError::UnknownEntity(name) => write!(f, "unknown entity: {}", name),
            MapError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl From<io::Error> for MapError {
    fn from(err: io::Error) -> Self {
        MapError::Io(err)
    }
}

impl error::Error for MapError {}
