use core::fmt;

/// The error type for strict decoding of packet text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A value was recognized but is not in its canonical form.
    ///
    /// Examples: a payload byte with three hex digits; two spaces between payload bytes; an empty
    /// payload.
    Malformed,
}

/// The result type for strict decoding.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Malformed => write!(f, "malformed value"),
        }
    }
}

impl std::error::Error for Error {}
