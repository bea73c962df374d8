//! Configuration of readers and writers.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use crate::error::Error;


//------------ ReaderConfig --------------------------------------------------

/// Configuration for a [`StreamReader`][crate::StreamReader].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    /// The number of octets pulled from the source at once.
    ///
    /// Must not be zero.
    pub buffer_size: usize,

    /// The largest acceptable content length of a primitive value.
    ///
    /// Primitive content is buffered in full before decoding. If this is
    /// `Some(_)`, the reader rejects values announcing a longer content
    /// before allocating anything for them. If it is `None`, any length is
    /// accepted.
    pub max_contents_len: Option<usize>,
}

impl ReaderConfig {
    /// The default buffer size.
    pub const DEFAULT_BUFFER_SIZE: usize = 1024;

    /// Sets the buffer size.
    pub fn with_buffer_size(self, buffer_size: usize) -> Self {
        ReaderConfig { buffer_size, ..self }
    }

    /// Limits the content length of primitive values.
    pub fn with_max_contents_len(self, max: usize) -> Self {
        ReaderConfig { max_contents_len: Some(max), ..self }
    }

    /// Checks that the configuration is usable.
    pub(crate) fn check(&self) -> Result<(), Error> {
        check_buffer_size(self.buffer_size)
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
            max_contents_len: None,
        }
    }
}


//------------ WriterConfig --------------------------------------------------

/// Configuration for a [`StreamWriter`][crate::StreamWriter].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WriterConfig {
    /// The number of octets collected before pushing them to the sink.
    ///
    /// Must not be zero.
    pub buffer_size: usize,
}

impl WriterConfig {
    /// The default buffer size.
    pub const DEFAULT_BUFFER_SIZE: usize = 1024;

    /// Sets the buffer size.
    pub fn with_buffer_size(self, buffer_size: usize) -> Self {
        WriterConfig { buffer_size }
    }

    /// Checks that the configuration is usable.
    pub(crate) fn check(&self) -> Result<(), Error> {
        check_buffer_size(self.buffer_size)
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig { buffer_size: Self::DEFAULT_BUFFER_SIZE }
    }
}


//------------ Helpers -------------------------------------------------------

fn check_buffer_size(buffer_size: usize) -> Result<(), Error> {
    if buffer_size == 0 {
        Err(Error::InvalidArgument("buffer size must not be zero".into()))
    }
    else {
        Ok(())
    }
}


//============ Tests =========================================================
