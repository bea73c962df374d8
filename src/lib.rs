//! Streaming encoder and decoder for EmBER.
//!
//! EmBER is the profile of the Basic Encoding Rules (BER) of ASN.1 used by
//! the Ember+ control protocol. It restricts BER to a handful of primitive
//! types and wraps every value in a context-specific or application tag,
//! the _outer identifier,_ that names the field the value belongs to. The
//! universal or application tag of the value itself, the _inner
//! identifier,_ follows right after.
//!
//! This crate provides a pull parser, [`StreamReader`], and an encoder,
//! [`StreamWriter`], that work on streams of such data. Neither builds a
//! tree of the data. Instead, the reader reports one data value at a time
//! and the writer produces one value per call. Both can be used with
//! blocking as well as asynchronous input and output.
//!
//! The crate is organized as follows:
//!
//! * the [`decode`] module contains the reader and the [sources] it reads
//!   from,
//! * the [`encode`] module contains the writer and the [sinks] it writes
//!   to,
//! * [`EmberId`], [`Ident`], and [`InnerNumber`] describe identifiers,
//! * [`Value`] holds the contents of a primitive value of any type,
//! * the modules [`int`], [`real`], and [`reloid`] provide the codecs for
//!   the contents of primitive values,
//! * the [`guide`] explains the encoding and shows how to use the crate.
//!
//! [sources]: decode::Source
//! [sinks]: encode::Sink

pub use self::config::{ReaderConfig, WriterConfig};
pub use self::decode::StreamReader;
pub use self::encode::StreamWriter;
pub use self::error::{Error, ErrorKind};
pub use self::ident::{Class, EmberId, Ident, InnerNumber, ParseEmberIdError};
pub use self::length::Length;
pub use self::value::Value;

pub mod decode;
pub mod encode;
pub mod int;
pub mod real;
pub mod reloid;

pub mod guide;

mod async_support;
mod config;
mod error;
mod ident;
mod length;
mod value;
