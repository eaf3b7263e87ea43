use std::io;
use std::string;

use thiserror::Error;

/// Errors that can occur while turning a value into a querystring.
///
/// Only the top level of the input is ever validated. Anything deeper in
/// the tree that cannot be represented is silently left out of the output
/// instead of producing an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The top-level input is not a record (or a present reference to one).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A `Serialize` implementation reported an error.
    #[error("{0}")]
    Custom(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Utf8(#[from] string::FromUtf8Error),
}

impl Error {
    pub(crate) fn invalid_input<T: std::fmt::Display>(msg: T) -> Self {
        Error::InvalidInput(msg.to_string())
    }

    /// Returns `true` if the error was caused by an unusable top-level value.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
