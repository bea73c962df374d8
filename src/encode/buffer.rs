//! The write buffer.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::cmp;
use crate::error::Error;
use super::target::Sink;


//------------ WriteBuffer ---------------------------------------------------

/// A buffer collecting encoded data before pushing it to a sink.
///
/// Data is collected until the buffer has reached its capacity. Larger
/// chunks of data bypass the buffer and go to the sink directly.
#[derive(Debug)]
pub struct WriteBuffer<K> {
    /// The sink to push data to.
    sink: K,

    /// The data not yet pushed to the sink.
    buf: Vec<u8>,

    /// The preferred size of the buffer.
    capacity: usize,
}

impl<K> WriteBuffer<K> {
    /// Creates a new buffer with the given capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(sink: K, capacity: usize) -> Self {
        let capacity = cmp::max(capacity, 1);
        WriteBuffer {
            sink,
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the number of buffered octets.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Returns a reference to the sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Converts the buffer into its sink.
    ///
    /// Any data not yet flushed is lost.
    pub fn into_sink(self) -> K {
        self.sink
    }
}

impl<K: Sink> WriteBuffer<K> {
    /// Makes room for `len` octets in the buffer.
    ///
    /// If the octets don’t fit into the remaining capacity, the buffer is
    /// flushed first. If they don’t fit into the buffer at all, it grows.
    pub async fn reserve(&mut self, len: usize) -> Result<(), Error> {
        if self.buf.len() + len > self.capacity {
            self.flush().await?;
        }
        if len > self.capacity {
            self.buf.reserve(len);
        }
        Ok(())
    }

    /// Writes all of `data`.
    ///
    /// Data larger than the capacity is pushed to the sink directly after
    /// flushing the buffer.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.len() > self.capacity {
            self.flush().await?;
            self.sink.push(data).await?;
        }
        else {
            self.reserve(data.len()).await?;
            self.buf.extend_from_slice(data);
        }
        Ok(())
    }

    /// Writes a header and the contents following it.
    ///
    /// The header is never split. If both fit into the buffer, they are
    /// kept together, too.
    pub async fn write_unit(
        &mut self, header: &[u8], contents: &[u8]
    ) -> Result<(), Error> {
        let len = header.len() + contents.len();
        if len <= self.capacity {
            self.reserve(len).await?;
            self.buf.extend_from_slice(header);
            self.buf.extend_from_slice(contents);
            Ok(())
        }
        else {
            self.reserve(header.len()).await?;
            self.buf.extend_from_slice(header);
            self.write_all(contents).await
        }
    }

    /// Pushes all buffered data to the sink.
    ///
    /// Does nothing if the buffer is empty.
    pub async fn flush(&mut self) -> Result<(), Error> {
        if !self.buf.is_empty() {
            self.sink.push(&self.buf).await?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Flushes the buffer and then the sink itself.
    pub async fn flush_all(&mut self) -> Result<(), Error> {
        self.flush().await?;
        self.sink.flush().await?;
        Ok(())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::io;
    use crate::async_support::complete;
    use crate::error::ErrorKind;
    use super::*;
    use super::super::target::FnSink;

    /// A sink that keeps every push separately.
    #[derive(Debug, Default)]
    struct Recorder(Vec<Vec<u8>>);

    impl Sink for Recorder {
        async fn push(&mut self, data: &[u8]) -> Result<(), io::Error> {
            self.0.push(data.to_vec());
            Ok(())
        }
    }

    /// Returns a buffer that records every push to the sink.
    fn recording(capacity: usize) -> WriteBuffer<Recorder> {
        WriteBuffer::new(Recorder::default(), capacity)
    }

    #[test]
    fn buffering() {
        let mut buf = recording(4);
        complete(buf.write_all(b"ab")).unwrap();
        complete(buf.write_all(b"cd")).unwrap();
        assert!(buf.sink().0.is_empty());
        assert_eq!(buf.buffered(), 4);

        // Doesn’t fit anymore, flushes first.
        complete(buf.write_all(b"e")).unwrap();
        assert_eq!(buf.sink().0, [b"abcd".to_vec()]);

        // Larger than the capacity, bypasses the buffer.
        complete(buf.write_all(b"fghij")).unwrap();
        assert_eq!(
            buf.sink().0,
            [b"abcd".to_vec(), b"e".to_vec(), b"fghij".to_vec()]
        );
        assert_eq!(buf.buffered(), 0);

        // Flushing an empty buffer is a no-op.
        complete(buf.flush()).unwrap();
        assert_eq!(buf.sink().0.len(), 3);
    }

    #[test]
    fn units() {
        let mut buf = recording(6);
        complete(buf.write_all(b"x")).unwrap();
        complete(buf.write_unit(b"ab", b"cdef")).unwrap();
        complete(buf.flush()).unwrap();
        assert_eq!(buf.sink().0, [b"x".to_vec(), b"abcdef".to_vec()]);

        let mut buf = recording(4);
        complete(buf.write_unit(b"abc", b"defgh")).unwrap();
        complete(buf.flush()).unwrap();
        assert_eq!(buf.sink().0, [b"abc".to_vec(), b"defgh".to_vec()]);
    }

    #[test]
    fn reserve_grows() {
        let mut buf = recording(2);
        complete(buf.write_all(b"a")).unwrap();
        complete(buf.reserve(8)).unwrap();
        assert_eq!(buf.sink().0, [b"a".to_vec()]);
        assert_eq!(buf.buffered(), 0);
    }

    #[test]
    fn sink_errors_propagate() {
        let mut buf = WriteBuffer::new(
            FnSink::new(|_: &[u8]| Err(io::Error::other("full"))), 4
        );
        complete(buf.write_all(b"ab")).unwrap();
        assert_eq!(
            complete(buf.flush()).unwrap_err().kind(), ErrorKind::Io
        );
    }
}
