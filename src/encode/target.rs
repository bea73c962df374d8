//! Sinks for encoded data.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::io;
use std::future::Future;


//------------ Sink ----------------------------------------------------------

/// A sink for encoded data.
///
/// The [`StreamWriter`] collects encoded data in a buffer and pushes it to
/// its sink whenever the buffer is full or it is asked to flush. A sink
/// thus doesn’t need to buffer itself.
///
/// The methods are asynchronous so that sinks can wait for the underlying
/// transport. Sinks used through the blocking methods of the writer must
/// not suspend.
///
/// [`StreamWriter`]: super::StreamWriter
pub trait Sink {
    /// Pushes all of `data` to the sink.
    fn push(
        &mut self, data: &[u8]
    ) -> impl Future<Output = Result<(), io::Error>>;

    /// Flushes whatever the sink may be buffering itself.
    ///
    /// The default implementation does nothing.
    fn flush(&mut self) -> impl Future<Output = Result<(), io::Error>> {
        async { Ok(()) }
    }
}

impl<T: Sink> Sink for &mut T {
    fn push(
        &mut self, data: &[u8]
    ) -> impl Future<Output = Result<(), io::Error>> {
        (**self).push(data)
    }

    fn flush(&mut self) -> impl Future<Output = Result<(), io::Error>> {
        (**self).flush()
    }
}

impl Sink for Vec<u8> {
    async fn push(&mut self, data: &[u8]) -> Result<(), io::Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}


//------------ IoSink --------------------------------------------------------

/// A wrapper around an `io::Write` type providing it as a sink.
#[derive(Clone, Debug)]
pub struct IoSink<W>(W);

impl<W> IoSink<W> {
    /// Creates a new sink from an IO writer.
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Converts the sink back into its underlying writer.
    pub fn into_writer(self) -> W {
        self.0
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    async fn push(&mut self, data: &[u8]) -> Result<(), io::Error> {
        self.0.write_all(data)
    }

    async fn flush(&mut self) -> Result<(), io::Error> {
        self.0.flush()
    }
}


//------------ FnSink --------------------------------------------------------

/// A sink handing data to a closure.
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where F: FnMut(&[u8]) -> Result<(), io::Error> {
    /// Creates a new sink from the closure.
    pub fn new(op: F) -> Self {
        Self(op)
    }
}

impl<F> Sink for FnSink<F>
where F: FnMut(&[u8]) -> Result<(), io::Error> {
    async fn push(&mut self, data: &[u8]) -> Result<(), io::Error> {
        (self.0)(data)
    }
}


//------------ TokioSink -----------------------------------------------------

/// A sink writing to a Tokio `AsyncWrite`.
#[cfg(feature = "tokio")]
#[derive(Debug)]
pub struct TokioSink<W>(W);

#[cfg(feature = "tokio")]
impl<W> TokioSink<W> {
    /// Creates a sink from an async writer.
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Converts the sink back into the underlying writer.
    pub fn into_writer(self) -> W {
        self.0
    }
}

#[cfg(feature = "tokio")]
impl<W: tokio::io::AsyncWrite + Unpin> Sink for TokioSink<W> {
    async fn push(&mut self, data: &[u8]) -> Result<(), io::Error> {
        tokio::io::AsyncWriteExt::write_all(&mut self.0, data).await
    }

    fn flush(&mut self) -> impl Future<Output = Result<(), io::Error>> {
        tokio::io::AsyncWriteExt::flush(&mut self.0)
    }
}


//============ Tests =========================================================
