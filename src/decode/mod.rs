//! Decoding EmBER data.
//!
//! The central type of this module is [`StreamReader`], a pull parser that
//! walks through an EmBER stream one data value at a time. It reads its
//! data from a [`Source`] through an internal [`ReadBuffer`].
//!
//! Sources are provided for data in memory ([`SliceSource`]), for anything
//! implementing `std::io::Read` ([`IoSource`]), and for closures
//! ([`FnSource`]). With the `tokio` feature enabled, `TokioSource` wraps
//! a Tokio `AsyncRead`.
//!
//! For an introduction to decoding, see the [decode section of the
//! guide].
//!
//! [decode section of the guide]: crate::guide::decode

pub use self::buffer::ReadBuffer;
pub use self::reader::StreamReader;
pub use self::source::{FnSource, IoSource, Pos, SliceSource, Source};
#[cfg(feature = "tokio")]
pub use self::source::TokioSource;

mod buffer;
mod reader;
mod source;
mod stack;
