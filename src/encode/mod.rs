//! Encoding EmBER data.
//!
//! Data is encoded through a [`StreamWriter`]. Each call to one of its
//! `write_*` methods produces one complete data value or the start or end
//! of a container. The encoded data is collected in a [`WriteBuffer`] and
//! pushed to a [`Sink`].
//!
//! Sinks are provided for vectors, for anything implementing
//! `std::io::Write` ([`IoSink`]), and for closures ([`FnSink`]). With the
//! `tokio` feature enabled, `TokioSink` wraps a Tokio `AsyncWrite`.
//!
//! For an introduction to encoding, see the [encode section of the
//! guide].
//!
//! [encode section of the guide]: crate::guide::encode

pub use self::buffer::WriteBuffer;
pub use self::target::{FnSink, IoSink, Sink};
#[cfg(feature = "tokio")]
pub use self::target::TokioSink;
pub use self::writer::StreamWriter;

mod buffer;
mod target;
mod writer;
