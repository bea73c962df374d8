//! The stream reader.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use bytes::Bytes;
use crate::async_support::complete;
use crate::config::ReaderConfig;
use crate::encode::{Sink, StreamWriter};
use crate::error::{Error, ErrorKind};
use crate::ident::{Class, EmberId, Ident, InnerNumber};
use crate::length::Length;
use crate::value::Value;
use crate::{int, real, reloid};
use super::buffer::ReadBuffer;
use super::source::{Pos, SliceSource, Source};
use super::stack::{Frame, Stack};


//------------ StreamReader --------------------------------------------------

/// A pull parser for EmBER data.
///
/// The reader walks through the data values of an EmBER stream one at a
/// time. Each call to [`read`][Self::read] advances to the next value and
/// returns `true` or returns `false` if the stream has ended cleanly.
/// After advancing, [`inner_number`][Self::inner_number] tells the type of
/// the value and [`outer_id`][Self::outer_id] its field identifier.
///
/// Containers, i.e., SEQUENCE, SET, and application-defined types, are
/// reported when they are opened. Their content follows as further values
/// until a pseudo value with an inner number of
/// [`InnerNumber::END_CONTAINER`] marks their end.
///
/// The contents of primitive values can be read once through one of the
/// `read_contents_as_*` methods matching their type or through
/// [`read_contents`][Self::read_contents]. Contents that aren’t read are
/// skipped when advancing.
///
/// Every operation is available both as an `async` method with an `_async`
/// suffix and as a blocking method. The blocking methods can only be used
/// with sources that never suspend.
///
/// A reader is unusable after any error other than a usage error.
///
/// # Example
///
/// ```
/// use ember_ber::{EmberId, InnerNumber, StreamReader};
///
/// let mut reader = StreamReader::from_slice(b"\x60\x03\x01\x01\xff");
/// assert!(reader.read()?);
/// assert_eq!(reader.outer_id()?, EmberId::application(0));
/// assert_eq!(reader.inner_number()?, InnerNumber::BOOLEAN);
/// assert!(reader.read_contents_as_boolean()?);
/// assert!(!reader.read()?);
/// # Ok::<(), ember_ber::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamReader<S> {
    /// The buffer atop the source.
    ///
    /// This is `None` once the reader has been disposed of.
    buf: Option<ReadBuffer<S>>,

    /// The values we are currently inside of.
    stack: Stack,

    /// The value we are currently positioned on.
    current: Option<Current>,

    /// The configuration.
    config: ReaderConfig,
}

impl<S> StreamReader<S> {
    /// Creates a new reader with the default configuration.
    pub fn new(source: S) -> Self {
        Self::from_parts(source, ReaderConfig::default())
    }

    /// Creates a new reader with the given configuration.
    pub fn with_config(
        source: S, config: ReaderConfig
    ) -> Result<Self, Error> {
        config.check()?;
        Ok(Self::from_parts(source, config))
    }

    fn from_parts(source: S, config: ReaderConfig) -> Self {
        StreamReader {
            buf: Some(ReadBuffer::new(source, config.buffer_size)),
            stack: Stack::default(),
            current: None,
            config,
        }
    }

    /// Returns the inner number of the current value.
    ///
    /// This is [`InnerNumber::END_CONTAINER`] at the end of a container.
    pub fn inner_number(&self) -> Result<InnerNumber, Error> {
        Ok(self.current()?.inner_number)
    }

    /// Returns the outer identifier of the current value.
    ///
    /// Fails at the end of a container.
    pub fn outer_id(&self) -> Result<EmberId, Error> {
        self.current()?.outer_id.ok_or(
            Error::InvalidState("end of container has no outer identifier")
        )
    }

    /// Returns whether the current value is a data value.
    ///
    /// This is true for all values but the end of a container.
    pub fn is_data_value(&self) -> Result<bool, Error> {
        Ok(self.current()?.inner_number != InnerNumber::END_CONTAINER)
    }

    /// Returns whether the contents of the current value can be read.
    ///
    /// This is `false` once the reader has been disposed of.
    pub fn can_read_contents(&self) -> bool {
        matches!(self.current, Some(Current { pending: Some(_), .. }))
    }

    /// Returns the number of containers the reader is currently inside of.
    ///
    /// A disposed reader is outside of all containers.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Returns the current position in the stream.
    ///
    /// The position is only used for diagnostics. A disposed reader
    /// reports position zero.
    pub fn pos(&self) -> Pos {
        self.buf.as_ref().map(ReadBuffer::pos).unwrap_or_default()
    }

    /// Disposes of the reader.
    ///
    /// This drops the source. Every later operation fails with
    /// [`Error::Disposed`]. Disposing more than once is fine.
    pub fn dispose(&mut self) {
        if let Some(buf) = self.buf.take() {
            log::trace!("disposing reader at position {}", buf.pos());
        }
        self.stack.clear();
        self.current = None;
    }

    /// Converts the reader into its source.
    ///
    /// Returns `None` if the reader has been disposed of. Any data buffered
    /// by the reader is lost.
    pub fn into_inner(self) -> Option<S> {
        self.buf.map(ReadBuffer::into_source)
    }

    fn current(&self) -> Result<&Current, Error> {
        if self.buf.is_none() {
            return Err(Error::Disposed)
        }
        self.current.as_ref().ok_or(
            Error::InvalidState("reader is not positioned on a value")
        )
    }

    fn buffer(&mut self) -> Result<&mut ReadBuffer<S>, Error> {
        self.buf.as_mut().ok_or(Error::Disposed)
    }

    /// Marks the pending contents of the current value as taken.
    ///
    /// Returns the length and position of the contents.
    fn take_pending(
        &mut self, expected: InnerNumber
    ) -> Result<(usize, Pos), Error> {
        if self.buf.is_none() {
            return Err(Error::Disposed)
        }
        let current = self.current.as_mut().ok_or(
            Error::InvalidState("reader is not positioned on a value")
        )?;
        if current.inner_number != expected {
            return Err(Error::InvalidState(
                "contents requested as wrong type"
            ))
        }
        match current.pending.take() {
            Some(len) => Ok((len, current.contents_pos)),
            None => Err(Error::InvalidState("contents are not available"))
        }
    }
}

impl<'a> StreamReader<SliceSource<'a>> {
    /// Creates a new reader for a bytes slice.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(SliceSource::new(data))
    }
}

/// # Advancing
///
impl<S: Source> StreamReader<S> {
    /// Advances to the next value.
    ///
    /// Returns `Ok(false)` if the stream has ended between two top-level
    /// values. If it ends anywhere else, returns an error.
    pub async fn read_async(&mut self) -> Result<bool, Error> {
        let res = self.advance().await;
        if let Err(ref err) = res {
            if err.kind() == ErrorKind::Content {
                log::debug!("rejecting EmBER data: {}", err);
            }
        }
        res
    }

    /// Advances to the next value, blocking.
    pub fn read(&mut self) -> Result<bool, Error> {
        complete(self.read_async())
    }

    async fn advance(&mut self) -> Result<bool, Error> {
        let buf = self.buf.as_mut().ok_or(Error::Disposed)?;

        if let Some(Current { pending: Some(len), .. }) = self.current.take() {
            buf.skip(len).await?;
        }

        loop {
            // Close all values whose end we have reached.
            while let Some(end) = self.stack.top().and_then(Frame::end) {
                let pos = buf.position();
                if pos < end {
                    break
                }
                let frame = match self.stack.pop() {
                    Some(frame) => frame,
                    None => break
                };
                if pos > end {
                    return Err(Error::content(
                        "incorrect length", frame.length_pos()
                    ))
                }
                if let Frame::Container { number, .. } = frame {
                    log::trace!("end of {} at position {}", number, pos);
                    self.current = Some(Current::end_container(pos));
                    return Ok(true)
                }
            }

            let start = buf.pos();
            let outer = match Ident::take_opt_from(buf).await? {
                Some(ident) => ident,
                None => {
                    if self.stack.is_empty() {
                        return Ok(false)
                    }
                    return Err(Error::unexpected_end(start))
                }
            };

            if outer == Ident::END_OF_CONTENTS {
                if !Length::take_from(buf).await?.is_zero() {
                    return Err(Error::content(
                        "unexpected length for End-of-contents", start
                    ))
                }
                let frame = self.stack.pop().ok_or_else(|| {
                    Error::content("unexpected excess End-of-contents", start)
                })?;
                if frame.end().is_some() {
                    return Err(Error::content(
                        format!(
                            "End-of-contents identifier at position {} \
                             for definite length",
                            start
                        ),
                        frame.length_pos()
                    ))
                }
                if let Frame::Container { number, .. } = frame {
                    log::trace!("end of {} at position {}", number, start);
                    self.current = Some(
                        Current::end_container(buf.position())
                    );
                    return Ok(true)
                }
                continue
            }

            // The outer identifier wraps exactly one inner value.
            let length_pos = buf.position();
            let length = Length::take_from(buf).await?;
            self.stack.push(Frame::Outer {
                end: end_of(length, buf.position(), length_pos)?,
                length_pos
            });
            if outer.class() == Class::Universal {
                return Err(Error::content(
                    "unexpected Universal class for outer identifier", start
                ))
            }

            let inner_start = buf.pos();
            let inner = Ident::take_from(buf).await?;
            let length_pos = buf.position();
            let length = Length::take_from(buf).await?;
            let number = match inner.class() {
                Class::Universal => InnerNumber::new(inner.number()),
                Class::Application => {
                    InnerNumber::application(inner.number()).ok_or_else(|| {
                        Error::content(
                            "number or subidentifier exceeds expected range",
                            inner_start
                        )
                    })?
                }
                Class::Context | Class::Private => {
                    return Err(Error::content(
                        "unexpected context-specific or private identifier",
                        inner_start
                    ))
                }
            };

            let pending = if number.is_primitive() {
                if inner.is_constructed() {
                    return Err(Error::content(
                        "unexpected constructed encoding", inner_start
                    ))
                }
                let len = length.definite().ok_or_else(|| {
                    Error::content(
                        "unexpected indefinite length for primitive data \
                         value",
                        inner_start
                    )
                })?;
                if let Some(max) = self.config.max_contents_len {
                    if len > max {
                        return Err(Error::content(
                            "length exceeds configured maximum", length_pos
                        ))
                    }
                }
                Some(len)
            }
            else if number.is_container() {
                self.stack.push(Frame::Container {
                    end: end_of(length, buf.position(), length_pos)?,
                    number,
                    length_pos,
                });
                log::trace!(
                    "start of {} {} at position {}", outer.id(), number, start
                );
                None
            }
            else {
                return Err(Error::content(
                    "unexpected number in universal identifier", inner_start
                ))
            };

            self.current = Some(Current {
                inner_number: number,
                outer_id: Some(outer.id()),
                pending,
                contents_pos: buf.pos(),
            });
            return Ok(true)
        }
    }
}

/// # Reading Contents
///
impl<S: Source> StreamReader<S> {
    /// Reads the contents of the current BOOLEAN value.
    pub async fn read_contents_as_boolean_async(
        &mut self
    ) -> Result<bool, Error> {
        let (len, pos) = self.take_pending(InnerNumber::BOOLEAN)?;
        if len != 1 {
            self.buffer()?.skip(len).await?;
            return Err(Error::content("incorrect length", pos))
        }
        Ok(self.buffer()?.take_u8().await? != 0)
    }

    /// Reads the contents of the current BOOLEAN value, blocking.
    pub fn read_contents_as_boolean(&mut self) -> Result<bool, Error> {
        complete(self.read_contents_as_boolean_async())
    }

    /// Reads the contents of the current INTEGER value.
    pub async fn read_contents_as_integer_async(
        &mut self
    ) -> Result<i64, Error> {
        self.decode_contents(InnerNumber::INTEGER, int::decode_signed).await
    }

    /// Reads the contents of the current INTEGER value, blocking.
    pub fn read_contents_as_integer(&mut self) -> Result<i64, Error> {
        complete(self.read_contents_as_integer_async())
    }

    /// Reads the contents of the current OCTET STRING value.
    pub async fn read_contents_as_octetstring_async(
        &mut self
    ) -> Result<Bytes, Error> {
        let (len, _) = self.take_pending(InnerNumber::OCTETSTRING)?;
        self.buffer()?.take_bytes(len).await
    }

    /// Reads the contents of the current OCTET STRING value, blocking.
    pub fn read_contents_as_octetstring(&mut self) -> Result<Bytes, Error> {
        complete(self.read_contents_as_octetstring_async())
    }

    /// Reads the contents of the current REAL value.
    pub async fn read_contents_as_real_async(
        &mut self
    ) -> Result<f64, Error> {
        self.decode_contents(InnerNumber::REAL, real::decode).await
    }

    /// Reads the contents of the current REAL value, blocking.
    pub fn read_contents_as_real(&mut self) -> Result<f64, Error> {
        complete(self.read_contents_as_real_async())
    }

    /// Reads the contents of the current UTF8String value.
    ///
    /// Invalid UTF-8 sequences are replaced by the replacement character.
    pub async fn read_contents_as_utf8_string_async(
        &mut self
    ) -> Result<String, Error> {
        let (len, _) = self.take_pending(InnerNumber::UTF8_STRING)?;
        self.buffer()?.read_utf8(len).await
    }

    /// Reads the contents of the current UTF8String value, blocking.
    pub fn read_contents_as_utf8_string(&mut self) -> Result<String, Error> {
        complete(self.read_contents_as_utf8_string_async())
    }

    /// Reads the contents of the current RELATIVE-OID value.
    pub async fn read_contents_as_relative_object_identifier_async(
        &mut self
    ) -> Result<Vec<u32>, Error> {
        self.decode_contents(
            InnerNumber::RELATIVE_OBJECT_IDENTIFIER, reloid::decode
        ).await
    }

    /// Reads the contents of the current RELATIVE-OID value, blocking.
    pub fn read_contents_as_relative_object_identifier(
        &mut self
    ) -> Result<Vec<u32>, Error> {
        complete(self.read_contents_as_relative_object_identifier_async())
    }

    /// Reads the contents of the current value whatever its type.
    ///
    /// Fails with a usage error if the current value doesn’t have primitive
    /// contents or the contents have been read already.
    pub async fn read_contents_async(&mut self) -> Result<Value, Error> {
        let number = self.current()?.inner_number;
        match number {
            InnerNumber::BOOLEAN => {
                self.read_contents_as_boolean_async().await.map(Value::Boolean)
            }
            InnerNumber::INTEGER => {
                self.read_contents_as_integer_async().await.map(Value::Integer)
            }
            InnerNumber::OCTETSTRING => {
                self.read_contents_as_octetstring_async().await.map(
                    Value::Octetstring
                )
            }
            InnerNumber::REAL => {
                self.read_contents_as_real_async().await.map(Value::Real)
            }
            InnerNumber::UTF8_STRING => {
                self.read_contents_as_utf8_string_async().await.map(
                    Value::Utf8String
                )
            }
            InnerNumber::RELATIVE_OBJECT_IDENTIFIER => {
                self.read_contents_as_relative_object_identifier_async()
                    .await.map(Value::RelativeObjectIdentifier)
            }
            _ => Err(Error::InvalidState("value has no primitive contents"))
        }
    }

    /// Reads the contents of the current value, blocking.
    pub fn read_contents(&mut self) -> Result<Value, Error> {
        complete(self.read_contents_async())
    }

    /// Decodes the complete contents via a closure.
    async fn decode_contents<T>(
        &mut self,
        expected: InnerNumber,
        op: impl FnOnce(&[u8], Pos) -> Result<T, Error>
    ) -> Result<T, Error> {
        let (len, pos) = self.take_pending(expected)?;
        let buf = self.buffer()?;
        buf.ensure(len).await?;
        let res = op(&buf.chunk()[..len], pos);
        buf.consume(len);
        res
    }
}

/// # Skipping and Copying
///
impl<S: Source> StreamReader<S> {
    /// Skips over the content of the current container.
    ///
    /// If the current value opens a container, reads until the end of that
    /// container, leaving the reader positioned on the end-of-container.
    /// Does nothing for any other value.
    pub async fn skip_async(&mut self) -> Result<(), Error> {
        if !self.inner_number()?.is_container() {
            return Ok(())
        }
        let mut depth = 1usize;
        while depth > 0 {
            if !self.read_async().await? {
                return Err(Error::unexpected_end(self.pos()))
            }
            let number = self.inner_number()?;
            if number == InnerNumber::END_CONTAINER {
                depth -= 1;
            }
            else if number.is_container() {
                depth += 1;
            }
        }
        Ok(())
    }

    /// Skips over the content of the current container, blocking.
    pub fn skip(&mut self) -> Result<(), Error> {
        complete(self.skip_async())
    }

    /// Skips to the end of the container the reader currently is in.
    ///
    /// Nested containers are skipped in full. Returns when reaching the
    /// end-of-container for the current level or the end of the stream.
    pub async fn skip_to_end_container_async(
        &mut self
    ) -> Result<(), Error> {
        while self.read_async().await? {
            if self.inner_number()? == InnerNumber::END_CONTAINER {
                break
            }
            self.skip_async().await?;
        }
        Ok(())
    }

    /// Skips to the end of the current container, blocking.
    pub fn skip_to_end_container(&mut self) -> Result<(), Error> {
        complete(self.skip_to_end_container_async())
    }

    /// Copies the rest of the current container to a writer.
    ///
    /// Reads all remaining values of the container the reader is currently
    /// in and writes them to `writer`, including the end of the container.
    /// If `field` is given, returns the contents of the first primitive
    /// value directly inside the container with that outer identifier.
    pub async fn copy_to_end_container_async<K: Sink>(
        &mut self,
        writer: &mut StreamWriter<K>,
        field: Option<EmberId>,
    ) -> Result<Option<Value>, Error> {
        let mut depth = 0usize;
        let mut res = None;
        while self.read_async().await? {
            let number = self.inner_number()?;
            if number == InnerNumber::END_CONTAINER {
                writer.write_end_container_async().await?;
                if depth == 0 {
                    break
                }
                depth -= 1;
                continue
            }
            let outer = self.outer_id()?;
            if number.is_container() {
                writer.write_start_container_async(outer, number).await?;
                depth += 1;
            }
            else {
                let value = self.read_contents_async().await?;
                writer.write_value_async(outer, &value).await?;
                if depth == 0 && res.is_none() && field == Some(outer) {
                    res = Some(value)
                }
            }
        }
        Ok(res)
    }

    /// Copies the rest of the current container to a writer, blocking.
    pub fn copy_to_end_container<K: Sink>(
        &mut self,
        writer: &mut StreamWriter<K>,
        field: Option<EmberId>,
    ) -> Result<Option<Value>, Error> {
        complete(self.copy_to_end_container_async(writer, field))
    }
}


//------------ Current -------------------------------------------------------

/// The value the reader is positioned on.
#[derive(Clone, Copy, Debug)]
struct Current {
    /// The type of the value.
    inner_number: InnerNumber,

    /// The outer identifier or `None` for the end of a container.
    outer_id: Option<EmberId>,

    /// The length of the contents if they haven’t been read yet.
    pending: Option<usize>,

    /// The start of the contents.
    contents_pos: Pos,
}

impl Current {
    fn end_container(pos: usize) -> Self {
        Current {
            inner_number: InnerNumber::END_CONTAINER,
            outer_id: None,
            pending: None,
            contents_pos: pos.into(),
        }
    }
}


//------------ Helpers -------------------------------------------------------

/// Returns the end position of a value with the given length.
fn end_of(
    length: Length, start: usize, length_pos: usize
) -> Result<Option<usize>, Error> {
    match length.definite() {
        Some(len) => match start.checked_add(len) {
            Some(end) => Ok(Some(end)),
            None => Err(Error::content(
                "length exceeds expected range", length_pos
            ))
        }
        None => Ok(None)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::io;
    use super::*;
    use super::super::source::FnSource;

    /// Reads all events from the data as short descriptions.
    fn events(data: &[u8]) -> Result<Vec<String>, Error> {
        let mut reader = StreamReader::from_slice(data);
        let mut res = Vec::new();
        while reader.read()? {
            if !reader.is_data_value()? {
                res.push(String::from("end"));
            }
            else if reader.can_read_contents() {
                res.push(format!(
                    "{} {}", reader.outer_id()?, reader.read_contents()?
                ));
            }
            else {
                res.push(format!(
                    "{} {}", reader.outer_id()?, reader.inner_number()?
                ));
            }
        }
        assert_eq!(reader.depth(), 0);
        Ok(res)
    }

    fn content_err(data: &[u8]) -> String {
        let err = events(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Content, "{}", err);
        err.to_string()
    }

    #[test]
    fn primitive_values() {
        assert_eq!(events(b"\x60\x03\x01\x01\xff").unwrap(), ["A-0 true"]);
        assert_eq!(events(b"\x60\x03\x01\x01\x01").unwrap(), ["A-0 true"]);
        assert_eq!(events(b"\x60\x03\x01\x01\x00").unwrap(), ["A-0 false"]);
        assert_eq!(events(b"\x60\x04\x02\x02\x00\x80").unwrap(), ["A-0 128"]);
        assert_eq!(events(b"\x60\x04\x02\x02\xff\x7f").unwrap(), ["A-0 -129"]);
        assert_eq!(events(b"\x60\x02\x09\x00").unwrap(), ["A-0 0"]);
        assert_eq!(
            events(b"\x60\x05\x09\x03\x80\x00\x01").unwrap(), ["A-0 1"]
        );
        assert_eq!(events(b"\x64\x03\x0c\x01\x41").unwrap(), ["A-4 \"A\""]);
        assert_eq!(
            events(b"\xa1\x04\x04\x02\xde\xad").unwrap(), ["C-1 DEAD"]
        );
        assert_eq!(
            events(b"\x7f\x20\x05\x0d\x03\x01\x81\x00").unwrap(),
            ["A-32 1.128"]
        );
    }

    #[test]
    fn containers() {
        assert_eq!(
            events(b"\x60\x02\x30\x00").unwrap(), ["A-0 Sequence", "end"]
        );
        assert_eq!(
            events(b"\x60\x80\x30\x80\x00\x00\x00\x00").unwrap(),
            ["A-0 Sequence", "end"]
        );
        assert_eq!(
            events(b"\x60\x80\x6a\x80\x00\x00\x00\x00").unwrap(),
            ["A-0 A-10", "end"]
        );
        assert_eq!(
            events(
                b"\x60\x80\x30\x80\
                  \xa0\x03\x02\x01\x01\
                  \xa1\x80\x31\x80\x00\x00\x00\x00\
                  \x00\x00\x00\x00\
                  \x61\x03\x01\x01\xff"
            ).unwrap(),
            ["A-0 Sequence", "C-0 1", "C-1 Set", "end", "end", "A-1 true"]
        );

        // Definite length containers.
        assert_eq!(
            events(
                b"\x60\x0b\x30\x09\
                  \xa0\x03\x02\x01\x01\
                  \xa1\x02\x31\x00"
            ).unwrap(),
            ["A-0 Sequence", "C-0 1", "C-1 Set", "end", "end"]
        );
    }

    #[test]
    fn unread_contents_are_skipped() {
        let mut reader = StreamReader::from_slice(
            b"\x60\x03\x01\x01\xff\x61\x03\x02\x01\x05"
        );
        assert!(reader.read().unwrap());
        assert_eq!(reader.inner_number().unwrap(), InnerNumber::BOOLEAN);
        assert!(reader.read().unwrap());
        assert_eq!(reader.outer_id().unwrap(), EmberId::application(1));
        assert_eq!(reader.read_contents_as_integer().unwrap(), 5);
        assert!(!reader.read().unwrap());
        assert_eq!(reader.pos(), Pos::from(10usize));
    }

    #[test]
    fn format_errors() {
        assert_eq!(
            content_err(b"\x01\x03\x01\x01\xff"),
            "unexpected Universal class for outer identifier at position 0"
        );
        assert_eq!(
            content_err(b"\x00\x00"),
            "unexpected excess End-of-contents at position 0"
        );
        assert_eq!(
            content_err(b"\x60\x80\x30\x80\x00\x01"),
            "unexpected length for End-of-contents at position 4"
        );
        assert_eq!(
            content_err(b"\x60\x04\x30\x02\x00\x00"),
            "End-of-contents identifier at position 4 for definite length \
             at position 3"
        );
        assert_eq!(
            content_err(b"\x60\x02\x02\x01\x05"),
            "incorrect length at position 1"
        );
        assert_eq!(
            content_err(b"\x60\x03\x80\x01\x00"),
            "unexpected context-specific or private identifier at position 2"
        );
        assert_eq!(
            content_err(b"\x60\x03\xc1\x01\x00"),
            "unexpected context-specific or private identifier at position 2"
        );
        assert_eq!(
            content_err(b"\x60\x03\x21\x01\xff"),
            "unexpected constructed encoding at position 2"
        );
        assert_eq!(
            content_err(b"\x60\x80\x01\x80\x00\x00"),
            "unexpected indefinite length for primitive data value at \
             position 2"
        );
        assert_eq!(
            content_err(b"\x60\x03\x03\x01\x00"),
            "unexpected number in universal identifier at position 2"
        );
        assert_eq!(
            content_err(b"\x60\x02\x00\x00"),
            "unexpected number in universal identifier at position 2"
        );
        assert_eq!(
            content_err(b"\x60\x04\x01\x02\xff\xff"),
            "incorrect length at position 4"
        );
        assert_eq!(
            content_err(b"\x60\x08\x7f\x8f\xff\xff\xff\x7f\x80\x00"),
            "number or subidentifier exceeds expected range at position 2"
        );
    }

    #[test]
    fn unexpected_end() {
        for data in [
            &b"\x60"[..], &b"\x60\x83\x00"[..], &b"\x60\x03\x01\x01"[..],
            &b"\x60\x80\x30\x80"[..], &b"\x60\x80\x30\x80\x00\x00"[..],
            &b"\x60\x05\x30\x03\xa0\x03\x02"[..],
        ] {
            let err = events(data).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedEnd, "{:?}", data);
        }
    }

    #[test]
    fn usage_errors() {
        let mut reader = StreamReader::from_slice(
            b"\x60\x03\x01\x01\xff\x61\x02\x30\x00"
        );
        assert_eq!(
            reader.inner_number().unwrap_err().kind(), ErrorKind::Usage
        );
        assert!(!reader.can_read_contents());

        assert!(reader.read().unwrap());
        assert_eq!(
            reader.read_contents_as_integer().unwrap_err().kind(),
            ErrorKind::Usage
        );
        assert!(reader.read_contents_as_boolean().unwrap());
        assert_eq!(
            reader.read_contents_as_boolean().unwrap_err().kind(),
            ErrorKind::Usage
        );

        assert!(reader.read().unwrap());
        assert_eq!(reader.inner_number().unwrap(), InnerNumber::SEQUENCE);
        assert_eq!(
            reader.read_contents().unwrap_err().kind(), ErrorKind::Usage
        );

        assert!(reader.read().unwrap());
        assert!(!reader.is_data_value().unwrap());
        assert_eq!(reader.outer_id().unwrap_err().kind(), ErrorKind::Usage);

        assert!(!reader.read().unwrap());
        assert_eq!(
            reader.inner_number().unwrap_err().kind(), ErrorKind::Usage
        );

        reader.dispose();
        assert!(matches!(reader.read(), Err(Error::Disposed)));
        assert!(matches!(reader.inner_number(), Err(Error::Disposed)));
        assert!(!reader.can_read_contents());
        assert_eq!(reader.depth(), 0);
        assert_eq!(reader.pos(), Pos::default());
        assert!(reader.into_inner().is_none());
    }

    #[test]
    fn boolean_with_wrong_length_is_consumed() {
        let mut reader = StreamReader::from_slice(
            b"\x60\x04\x01\x02\xff\xff\x61\x03\x01\x01\x00"
        );
        assert!(reader.read().unwrap());
        assert_eq!(
            reader.read_contents_as_boolean().unwrap_err().to_string(),
            "incorrect length at position 4"
        );
        assert_eq!(reader.pos(), Pos::from(6usize));
        assert!(reader.read().unwrap());
        assert_eq!(reader.outer_id().unwrap(), EmberId::application(1));
        assert!(!reader.read_contents_as_boolean().unwrap());
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn overlong_declared_length() {
        // The octet string claims 2^46 octets but the stream ends.
        let data = b"\x60\x88\0\0\x40\0\0\0\0\x06\
            \x04\x86\x40\0\0\0\0\0";
        let mut reader = StreamReader::from_slice(data);
        assert!(reader.read().unwrap());
        assert_eq!(
            reader.read_contents_as_octetstring().unwrap_err().kind(),
            ErrorKind::UnexpectedEnd
        );

        // Same for types decoded from the buffer.
        for inner in [0x02u8, 0x0c] {
            let mut data = data.to_vec();
            data[10] = inner;
            let mut reader = StreamReader::from_slice(&data);
            assert!(reader.read().unwrap());
            assert_eq!(
                reader.read_contents().unwrap_err().kind(),
                ErrorKind::UnexpectedEnd
            );
        }
    }

    #[test]
    fn max_contents_len() {
        let data = b"\x60\x05\x04\x03\x01\x02\x03";
        let config = ReaderConfig::default().with_max_contents_len(2);
        let mut reader = StreamReader::with_config(
            SliceSource::new(data), config
        ).unwrap();
        let err = reader.read().unwrap_err();
        assert_eq!(
            err.to_string(), "length exceeds configured maximum at position 3"
        );

        let config = ReaderConfig::default().with_max_contents_len(3);
        let mut reader = StreamReader::with_config(
            SliceSource::new(data), config
        ).unwrap();
        assert!(reader.read().unwrap());
        assert_eq!(
            reader.read_contents_as_octetstring().unwrap().as_ref(),
            b"\x01\x02\x03"
        );

        assert_eq!(
            StreamReader::with_config(
                SliceSource::new(data),
                ReaderConfig::default().with_buffer_size(0)
            ).unwrap_err().kind(),
            ErrorKind::Usage
        );
    }

    #[test]
    fn small_buffer() {
        let data = b"\x60\x80\x30\x80\
            \xa0\x0a\x0c\x08abcdefgh\
            \xa1\x0a\x04\x08ABCDEFGH\
            \x00\x00\x00\x00";
        let config = ReaderConfig::default().with_buffer_size(3);
        let mut reader = StreamReader::with_config(
            SliceSource::new(data), config
        ).unwrap();
        assert!(reader.read().unwrap());
        assert!(reader.read().unwrap());
        assert_eq!(
            reader.read_contents_as_utf8_string().unwrap(), "abcdefgh"
        );
        assert!(reader.read().unwrap());
        assert_eq!(
            reader.read_contents_as_octetstring().unwrap().as_ref(),
            b"ABCDEFGH"
        );
        assert!(reader.read().unwrap());
        assert!(!reader.is_data_value().unwrap());
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn skip() {
        let mut reader = StreamReader::from_slice(
            b"\x60\x80\x30\x80\
              \xa0\x80\x30\x80\
              \xa0\x03\x02\x01\x01\
              \x00\x00\x00\x00\
              \x00\x00\x00\x00\
              \x61\x03\x01\x01\xff"
        );
        assert!(reader.read().unwrap());
        reader.skip().unwrap();
        assert_eq!(
            reader.inner_number().unwrap(), InnerNumber::END_CONTAINER
        );
        assert!(reader.read().unwrap());
        assert_eq!(reader.outer_id().unwrap(), EmberId::application(1));

        // Skipping a primitive value does nothing.
        reader.skip().unwrap();
        assert!(reader.read_contents_as_boolean().unwrap());
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn skip_to_end_container() {
        let mut reader = StreamReader::from_slice(
            b"\x60\x80\x30\x80\
              \xa0\x03\x02\x01\x01\
              \xa1\x80\x31\x80\xa0\x03\x01\x01\x00\x00\x00\x00\x00\
              \xa2\x03\x0c\x01\x41\
              \x00\x00\x00\x00"
        );
        assert!(reader.read().unwrap());
        assert!(reader.read().unwrap());
        reader.skip_to_end_container().unwrap();
        assert_eq!(
            reader.inner_number().unwrap(), InnerNumber::END_CONTAINER
        );
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn copy_to_end_container() {
        let mut reader = StreamReader::from_slice(
            b"\x60\x80\x30\x80\
              \xa0\x03\x02\x01\x05\
              \xa1\x80\x31\x80\xa1\x03\x0c\x01\x79\x00\x00\x00\x00\
              \xa1\x03\x0c\x01\x78\
              \x00\x00\x00\x00"
        );
        assert!(reader.read().unwrap());
        let mut writer = StreamWriter::new(Vec::new());
        let found = reader.copy_to_end_container(
            &mut writer, Some(EmberId::ctx(1))
        ).unwrap();
        assert_eq!(found, Some(Value::Utf8String("x".into())));
        assert_eq!(
            writer.into_inner().unwrap(),
            b"\xa0\x03\x02\x01\x05\
              \xa1\x80\x31\x80\xa1\x03\x0c\x01\x79\x00\x00\x00\x00\
              \xa1\x03\x0c\x01\x78\
              \x00\x00\x00\x00"
        );
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn source_errors() {
        let mut reader = StreamReader::new(FnSource::new(|_: &mut [u8]| {
            Err(io::Error::other("broken"))
        }));
        assert_eq!(reader.read().unwrap_err().kind(), ErrorKind::Io);
    }
}
