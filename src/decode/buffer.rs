//! The read buffer.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::{cmp, mem};
use bytes::{Buf, Bytes, BytesMut};
use crate::error::Error;
use super::source::{Pos, Source};


//------------ ReadBuffer ----------------------------------------------------

/// A read-ahead buffer atop a source.
///
/// The buffer pulls data from its source whenever it is asked for more
/// octets than it currently holds. It keeps track of the number of octets
/// consumed so far which serves as the position for error reporting and for
/// finding the end of definite-length values.
///
/// The capacity given when creating the buffer is the amount of data pulled
/// at once. The buffer grows beyond it only when asked to hold more than
/// that many octets at a time via [`ensure`][Self::ensure].
#[derive(Debug)]
pub struct ReadBuffer<S> {
    /// The source to pull data from.
    source: S,

    /// The buffered data that hasn’t been consumed yet.
    buf: BytesMut,

    /// The preferred size of the buffer.
    capacity: usize,

    /// The number of octets consumed since the start.
    pos: usize,
}

impl<S> ReadBuffer<S> {
    /// Creates a new buffer with the given capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(source: S, capacity: usize) -> Self {
        let capacity = cmp::max(capacity, 1);
        ReadBuffer {
            source,
            buf: BytesMut::with_capacity(capacity),
            capacity,
            pos: 0,
        }
    }

    /// Returns the absolute position in the stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the position in the stream for diagnostics.
    pub fn pos(&self) -> Pos {
        self.pos.into()
    }

    /// Returns the number of buffered octets.
    pub fn available(&self) -> usize {
        self.buf.len()
    }

    /// Returns the buffered octets.
    pub fn chunk(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// Marks `len` buffered octets as consumed.
    ///
    /// # Panics
    ///
    /// The method panics if less than `len` octets are buffered.
    pub fn consume(&mut self, len: usize) {
        self.buf.advance(len);
        self.pos += len;
    }

    /// Converts the buffer into the underlying source.
    ///
    /// Any buffered data is lost.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: Source> ReadBuffer<S> {
    /// Pulls from the source once.
    ///
    /// Returns whether any data was received.
    pub async fn read_one(&mut self) -> Result<bool, Error> {
        self.read_toward(0).await
    }

    /// Pulls from the source once, aiming for `target` buffered octets.
    ///
    /// The buffer is filled up to its capacity. If `target` is larger, it
    /// grows toward it, but by no more than it already holds or its
    /// capacity, whichever is more. A declared length thus never causes
    /// more allocation than the data actually received.
    async fn read_toward(&mut self, target: usize) -> Result<bool, Error> {
        let len = self.buf.len();
        let growth = cmp::min(
            target.saturating_sub(len), cmp::max(self.capacity, len)
        );
        let free = cmp::max(
            cmp::max(self.capacity.saturating_sub(len), growth), 1
        );

        // Reserving reclaims the space of consumed octets if it can.
        self.buf.reserve(free);
        self.buf.resize(len + free, 0);
        let res = self.source.pull(&mut self.buf[len..]).await;
        let read = match res {
            Ok(read) => cmp::min(read, free),
            Err(err) => {
                self.buf.truncate(len);
                return Err(err.into())
            }
        };
        self.buf.truncate(len + read);
        Ok(read > 0)
    }

    /// Makes sure at least `len` octets are buffered.
    ///
    /// Returns an unexpected end-of-stream error if the source ends before
    /// that many octets could be gathered.
    pub async fn ensure(&mut self, len: usize) -> Result<(), Error> {
        while self.buf.len() < len {
            if !self.read_toward(len).await? {
                return Err(Error::unexpected_end(self.pos))
            }
        }
        Ok(())
    }

    /// Takes a single octet if there is one.
    ///
    /// Returns `Ok(None)` if the source has reached its end.
    pub async fn take_opt_u8(&mut self) -> Result<Option<u8>, Error> {
        if self.buf.is_empty() && !self.read_one().await? {
            return Ok(None)
        }
        let res = self.buf[0];
        self.consume(1);
        Ok(Some(res))
    }

    /// Takes a single octet.
    pub async fn take_u8(&mut self) -> Result<u8, Error> {
        match self.take_opt_u8().await? {
            Some(res) => Ok(res),
            None => Err(Error::unexpected_end(self.pos))
        }
    }

    /// Fills all of `dst` with the next octets.
    ///
    /// Buffered data is used first. Whatever is still missing after that
    /// is pulled from the source straight into `dst`.
    pub async fn fill_into(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        let buffered = cmp::min(dst.len(), self.buf.len());
        let (head, mut tail) = dst.split_at_mut(buffered);
        head.copy_from_slice(&self.buf[..buffered]);
        self.consume(buffered);
        while !tail.is_empty() {
            let read = self.source.pull(tail).await?;
            if read == 0 {
                return Err(Error::unexpected_end(self.pos))
            }
            let read = cmp::min(read, tail.len());
            self.pos += read;
            tail = &mut mem::take(&mut tail)[read..];
        }
        Ok(())
    }

    /// Takes the next `len` octets.
    ///
    /// The result grows as data arrives, so a source that ends early only
    /// costs what it delivered.
    pub async fn take_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        let mut res = BytesMut::new();
        while res.len() < len {
            let done = res.len();
            let chunk = cmp::min(len - done, cmp::max(self.capacity, done));
            res.resize(done + chunk, 0);
            self.fill_into(&mut res[done..]).await?;
        }
        Ok(res.freeze())
    }

    /// Skips over the next `len` octets.
    pub async fn skip(&mut self, mut len: usize) -> Result<(), Error> {
        loop {
            let buffered = cmp::min(len, self.buf.len());
            self.consume(buffered);
            len -= buffered;
            if len == 0 {
                return Ok(())
            }
            if !self.read_one().await? {
                return Err(Error::unexpected_end(self.pos))
            }
        }
    }

    /// Reads `len` octets as a UTF-8 string.
    ///
    /// Invalid sequences are replaced with the replacement character.
    pub async fn read_utf8(&mut self, len: usize) -> Result<String, Error> {
        self.ensure(len).await?;
        let res = String::from_utf8_lossy(&self.buf[..len]).into_owned();
        self.consume(len);
        Ok(res)
    }
}


//============ Tests =========================================================
