//! Sources of encoded data.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::{cmp, fmt, io, ops};
use std::future::Future;


//------------ Source --------------------------------------------------------

/// A source of encoded data.
///
/// A source hands out octets in chunks of whatever size it has available.
/// The [`StreamReader`] pulls from its source only when its buffer runs dry,
/// so a source doesn’t need to do any buffering of its own.
///
/// The method is asynchronous so that sources can wait for data. Sources
/// used through the blocking methods of the reader must not suspend.
///
/// [`StreamReader`]: super::StreamReader
pub trait Source {
    /// Pulls octets into `buf`.
    ///
    /// Returns the number of octets placed at the start of `buf`. A return
    /// value of zero means that the end of data has been reached. It must
    /// not be returned for any other reason while `buf` is not empty.
    fn pull(
        &mut self, buf: &mut [u8]
    ) -> impl Future<Output = Result<usize, io::Error>>;
}

impl<S: Source> Source for &mut S {
    fn pull(
        &mut self, buf: &mut [u8]
    ) -> impl Future<Output = Result<usize, io::Error>> {
        (**self).pull(buf)
    }
}


//------------ SliceSource ---------------------------------------------------

/// A source atop a bytes slice.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'s> {
    data: &'s [u8],
}

impl<'s> SliceSource<'s> {
    /// Creates a new source for the given slice.
    pub fn new(data: &'s [u8]) -> Self {
        Self { data }
    }

    /// Returns the data not yet pulled from the source.
    pub fn remaining(&self) -> &'s [u8] {
        self.data
    }
}

impl<'s> From<&'s [u8]> for SliceSource<'s> {
    fn from(data: &'s [u8]) -> Self {
        Self::new(data)
    }
}

impl Source for SliceSource<'_> {
    async fn pull(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        let len = cmp::min(buf.len(), self.data.len());
        let (head, tail) = self.data.split_at(len);
        buf[..len].copy_from_slice(head);
        self.data = tail;
        Ok(len)
    }
}


//------------ IoSource ------------------------------------------------------

/// A source reading from a blocking `io::Read`.
///
/// Reads are retried when they are interrupted.
#[derive(Clone, Debug)]
pub struct IoSource<R>(R);

impl<R> IoSource<R> {
    /// Creates a source from an IO reader.
    pub fn new(reader: R) -> Self {
        Self(reader)
    }

    /// Converts the source back into the underlying reader.
    pub fn into_reader(self) -> R {
        self.0
    }
}

impl<R: io::Read> Source for IoSource<R> {
    async fn pull(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        loop {
            match self.0.read(buf) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => { }
                res => return res
            }
        }
    }
}


//------------ FnSource ------------------------------------------------------

/// A source calling a closure for data.
///
/// The closure receives the buffer to fill and returns the number of octets
/// it placed there, with zero signaling the end of data.
pub struct FnSource<F>(F);

impl<F> FnSource<F>
where F: FnMut(&mut [u8]) -> Result<usize, io::Error> {
    /// Creates a new source from the closure.
    pub fn new(op: F) -> Self {
        Self(op)
    }
}

impl<F> Source for FnSource<F>
where F: FnMut(&mut [u8]) -> Result<usize, io::Error> {
    async fn pull(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        (self.0)(buf)
    }
}


//------------ TokioSource ---------------------------------------------------

/// A source reading from a Tokio `AsyncRead`.
#[cfg(feature = "tokio")]
#[derive(Debug)]
pub struct TokioSource<R>(R);

#[cfg(feature = "tokio")]
impl<R> TokioSource<R> {
    /// Creates a source from an async reader.
    pub fn new(reader: R) -> Self {
        Self(reader)
    }

    /// Converts the source back into the underlying reader.
    pub fn into_reader(self) -> R {
        self.0
    }
}

#[cfg(feature = "tokio")]
impl<R: tokio::io::AsyncRead + Unpin> Source for TokioSource<R> {
    async fn pull(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        tokio::io::AsyncReadExt::read(&mut self.0, buf).await
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// The position counts the octets consumed since the start of decoding.
/// Values of this type are provided for diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(usize);

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl From<Pos> for usize {
    fn from(pos: Pos) -> usize {
        pos.0
    }
}

impl ops::Add<usize> for Pos {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        Pos(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//============ Tests =========================================================
