use std::fmt;
use std::path::PathBuf;

/// Coarse error category, mirrored onto the CLI exit-code/message contract.
#[derive(Debug)]
pub enum ErrorKind {
    /// Directory/file create, open, read, write, or lock failure.
    Io,
    /// The sled-backed key-value substrate reported an error.
    Store,
    /// A varint or posting byte stream was malformed.
    Decode,
    /// Deflate/inflate failure.
    Compress,
    /// An attribute name has no id in the registry.
    AttrUnknown,
    /// `get` was called with an unknown doc id.
    DocMissing,
    /// Bad CLI arguments or query string.
    InvalidArgument,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }

    pub fn attr_unknown(name: &str) -> Self {
        Error::new(ErrorKind::AttrUnknown, format!("unknown attribute '{name}'"))
    }

    pub fn doc_missing(doc_id: u32) -> Self {
        Error::new(ErrorKind::DocMissing, format!("no document with id {doc_id}"))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Io, err.to_string())
    }
}

impl From<sled::Error> for Error {
    fn from(err: sled::Error) -> Self {
        Error::new(ErrorKind::Store, err.to_string())
    }
}

/// Path-carrying IO error, used where the failing path is useful to the caller.
pub fn io_error(context: &str, path: &PathBuf, err: impl fmt::Display) -> Error {
    Error::new(ErrorKind::Io, format!("{context} ({}) - {err}", path.display()))
}

pub type Result<T> = std::result::Result<T, Error>;
