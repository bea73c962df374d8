//! Error handling.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::borrow::Cow;
use std::io;
use thiserror::Error;
use crate::decode::Pos;


//------------ Error ---------------------------------------------------------

/// An error happened while decoding or encoding EmBER data.
///
/// The variants fall into the categories returned by [`Error::kind`]. Data
/// that doesn’t conform to the encoding rules produces a
/// [`Content`][Self::Content] error, data that ends in the middle of a value
/// an [`UnexpectedEnd`][Self::UnexpectedEnd]. Both carry the position in
/// the stream where the problem was detected. Misuse of a reader or writer
/// is reported through [`InvalidState`][Self::InvalidState],
/// [`InvalidArgument`][Self::InvalidArgument], and
/// [`Disposed`][Self::Disposed]. Failures of the underlying source or sink
/// are passed on as [`Io`][Self::Io].
///
/// Apart from usage errors, an error leaves the reader or writer in an
/// undefined state. It should be disposed of.
#[derive(Debug, Error)]
pub enum Error {
    /// The data violates the encoding rules.
    #[error("{msg} at position {pos}")]
    Content {
        /// A description of the problem.
        msg: Cow<'static, str>,

        /// The position in the stream the problem was detected at.
        pos: Pos,
    },

    /// The data ended in the middle of a value.
    #[error("unexpected end of stream at position {pos}")]
    UnexpectedEnd {
        /// The position of the read that ran out of data.
        pos: Pos,
    },

    /// The operation isn’t available for the current value.
    #[error("invalid operation: {0}")]
    InvalidState(&'static str),

    /// An argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// The reader or writer has been disposed of.
    #[error("reader or writer has been disposed")]
    Disposed,

    /// The underlying source or sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates a content error at the given position.
    pub(crate) fn content(
        msg: impl Into<Cow<'static, str>>, pos: impl Into<Pos>
    ) -> Self {
        Error::Content { msg: msg.into(), pos: pos.into() }
    }

    /// Creates an unexpected end-of-stream error at the given position.
    pub(crate) fn unexpected_end(pos: impl Into<Pos>) -> Self {
        Error::UnexpectedEnd { pos: pos.into() }
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Content { .. } => ErrorKind::Content,
            Error::UnexpectedEnd { .. } => ErrorKind::UnexpectedEnd,
            Error::InvalidState(_)
            | Error::InvalidArgument(_)
            | Error::Disposed => ErrorKind::Usage,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns the stream position of a data error.
    pub fn pos(&self) -> Option<Pos> {
        match *self {
            Error::Content { pos, .. } | Error::UnexpectedEnd { pos } => {
                Some(pos)
            }
            _ => None
        }
    }
}


//------------ ErrorKind -----------------------------------------------------

/// The category of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The data is malformed.
    Content,

    /// The data ended prematurely.
    UnexpectedEnd,

    /// The reader or writer was used incorrectly.
    ///
    /// This indicates a bug in the calling code rather than bad data.
    Usage,

    /// The source or sink failed.
    Io,
}


//============ Tests =========================================================
