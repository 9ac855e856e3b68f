//! Error types for gdxframe

use gdxframe_core::FormatError;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, editing or writing containers
#[derive(Error, Debug)]
pub enum Error {
    /// The codec refused to open the container
    #[error("Could not open {path}: {reason}")]
    Open { path: String, reason: String },

    /// The container reports a version the session cannot handle
    #[error("Version error: {0}")]
    Version(String),

    /// A symbol with the same name (ignoring case) already exists
    #[error("Symbol name collision: {0}")]
    NameCollision(String),

    /// Key cannot address the requested operation
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// No symbol matches the key
    #[error("Not found: {0}")]
    NotFound(String),

    /// Load requested on a symbol that has no backing container
    #[error("Symbol {0} has no backing container to load from")]
    MissingContainer(String),

    /// Load requested on a symbol that has no container index
    #[error("Symbol {0} has no container index to load from")]
    MissingIndex(String),

    /// Write requested while some symbols are still unloaded
    #[error("Cannot write while symbols are unloaded: {}", .0.join(", "))]
    IncompleteData(Vec<String>),

    /// A cell cannot be translated into a container value
    #[error("Bad value: {0}")]
    BadValue(String),

    /// A symbol failed while being streamed to the codec
    #[error("Failed to write symbol {symbol}: {source}")]
    Write {
        symbol: String,
        #[source]
        source: Box<Error>,
    },

    /// Read requested on a session that already holds symbols
    #[error("Session already holds {0} symbols")]
    AlreadyPopulated(usize),

    /// Table width or dims length does not match the symbol
    #[error("Dimension mismatch for {symbol}: expected {expected} columns, found {found}")]
    DimensionMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    /// Kind cannot change once a symbol holds records
    #[error("Cannot change the kind of {0} while it holds records")]
    KindLocked(String),

    /// Operation needs the symbol's records in memory
    #[error("Symbol {0} is not loaded")]
    NotLoaded(String),

    /// The codec handle could not be initialized
    #[error("Codec initialization failed: {0}")]
    CodecInit(String),

    /// No usable special value table
    #[error("Special values unavailable: {0}")]
    Sentinel(String),

    /// A codec call failed
    #[error("Codec error: {0}")]
    Codec(String),

    /// Format rule violation
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from the reference codec
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an open error
    pub fn open(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Open {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a version error
    pub fn version(msg: impl Into<String>) -> Self {
        Error::Version(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an invalid key error
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Error::InvalidKey(msg.into())
    }

    /// Create a bad value error
    pub fn bad_value(msg: impl Into<String>) -> Self {
        Error::BadValue(msg.into())
    }

    /// Create a codec error
    pub fn codec(msg: impl Into<String>) -> Self {
        Error::Codec(msg.into())
    }

    /// Wrap a failure with the name of the symbol being written
    pub fn write(symbol: impl Into<String>, source: Error) -> Self {
        Error::Write {
            symbol: symbol.into(),
            source: Box::new(source),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(symbol: impl Into<String>, expected: usize, found: usize) -> Self {
        Error::DimensionMismatch {
            symbol: symbol.into(),
            expected,
            found,
        }
    }
}
