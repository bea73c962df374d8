//! The stream writer.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use smallvec::SmallVec;
use crate::async_support::complete;
use crate::config::WriterConfig;
use crate::error::Error;
use crate::ident::{EmberId, Ident, InnerNumber};
use crate::length::Length;
use crate::value::Value;
use crate::{int, real, reloid};
use super::buffer::WriteBuffer;
use super::target::Sink;


//------------ StreamWriter --------------------------------------------------

/// An encoder for EmBER data.
///
/// Each data value is written with a single call that produces the outer
/// identifier given by the caller, the inner identifier for the type of the
/// value, and the contents. Primitive values always use definite length.
/// Containers use indefinite length and need to be closed by a call to
/// [`write_end_container`][Self::write_end_container].
///
/// The writer doesn’t check that containers are balanced or that outer
/// identifiers are of the application or context-specific class.
///
/// Encoded data is collected in a buffer. It is pushed to the sink when the
/// buffer is full, when [`flush`][Self::flush] is called, or when the writer
/// is disposed of. Dropping the writer loses any data still in the buffer.
///
/// As with the reader, every operation is available as an `async` method
/// with an `_async` suffix and as a blocking method.
///
/// # Example
///
/// ```
/// use ember_ber::{EmberId, StreamWriter};
///
/// let mut writer = StreamWriter::new(Vec::new());
/// writer.write_start_sequence(EmberId::application(0))?;
/// writer.write_boolean(EmberId::ctx(0), true)?;
/// writer.write_end_container()?;
/// assert_eq!(
///     writer.into_inner()?,
///     b"\x60\x80\x30\x80\xa0\x03\x01\x01\xff\x00\x00\x00\x00"
/// );
/// # Ok::<(), ember_ber::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamWriter<K> {
    /// The buffer atop the sink.
    ///
    /// This is `None` once the writer has been disposed of.
    buf: Option<WriteBuffer<K>>,
}

impl<K> StreamWriter<K> {
    /// Creates a new writer with the default configuration.
    pub fn new(sink: K) -> Self {
        Self::from_parts(sink, WriterConfig::default())
    }

    /// Creates a new writer with the given configuration.
    pub fn with_config(
        sink: K, config: WriterConfig
    ) -> Result<Self, Error> {
        config.check()?;
        Ok(Self::from_parts(sink, config))
    }

    fn from_parts(sink: K, config: WriterConfig) -> Self {
        StreamWriter {
            buf: Some(WriteBuffer::new(sink, config.buffer_size)),
        }
    }

    /// Returns whether the writer has been disposed of.
    pub fn is_disposed(&self) -> bool {
        self.buf.is_none()
    }

    fn buffer(&mut self) -> Result<&mut WriteBuffer<K>, Error> {
        self.buf.as_mut().ok_or(Error::Disposed)
    }
}

/// # Primitive Values
///
impl<K: Sink> StreamWriter<K> {
    /// Writes a BOOLEAN value.
    pub async fn write_boolean_async(
        &mut self, outer: EmberId, value: bool
    ) -> Result<(), Error> {
        self.write_primitive(
            outer, InnerNumber::BOOLEAN, &[if value { 0xFF } else { 0x00 }]
        ).await
    }

    /// Writes a BOOLEAN value, blocking.
    pub fn write_boolean(
        &mut self, outer: EmberId, value: bool
    ) -> Result<(), Error> {
        complete(self.write_boolean_async(outer, value))
    }

    /// Writes an INTEGER value.
    pub async fn write_integer_async(
        &mut self, outer: EmberId, value: i64
    ) -> Result<(), Error> {
        let mut contents = SmallVec::<[u8; 8]>::new();
        int::append_signed(value, &mut contents);
        self.write_primitive(outer, InnerNumber::INTEGER, &contents).await
    }

    /// Writes an INTEGER value, blocking.
    pub fn write_integer(
        &mut self, outer: EmberId, value: i64
    ) -> Result<(), Error> {
        complete(self.write_integer_async(outer, value))
    }

    /// Writes an OCTET STRING value.
    pub async fn write_octetstring_async(
        &mut self, outer: EmberId, value: &[u8]
    ) -> Result<(), Error> {
        self.write_primitive(outer, InnerNumber::OCTETSTRING, value).await
    }

    /// Writes an OCTET STRING value, blocking.
    pub fn write_octetstring(
        &mut self, outer: EmberId, value: &[u8]
    ) -> Result<(), Error> {
        complete(self.write_octetstring_async(outer, value))
    }

    /// Writes a REAL value.
    pub async fn write_real_async(
        &mut self, outer: EmberId, value: f64
    ) -> Result<(), Error> {
        let contents = real::encode(value);
        self.write_primitive(outer, InnerNumber::REAL, &contents).await
    }

    /// Writes a REAL value, blocking.
    pub fn write_real(
        &mut self, outer: EmberId, value: f64
    ) -> Result<(), Error> {
        complete(self.write_real_async(outer, value))
    }

    /// Writes a UTF8String value.
    pub async fn write_utf8_string_async(
        &mut self, outer: EmberId, value: &str
    ) -> Result<(), Error> {
        self.write_primitive(
            outer, InnerNumber::UTF8_STRING, value.as_bytes()
        ).await
    }

    /// Writes a UTF8String value, blocking.
    pub fn write_utf8_string(
        &mut self, outer: EmberId, value: &str
    ) -> Result<(), Error> {
        complete(self.write_utf8_string_async(outer, value))
    }

    /// Writes a RELATIVE-OID value.
    pub async fn write_relative_object_identifier_async(
        &mut self, outer: EmberId, value: &[u32]
    ) -> Result<(), Error> {
        let mut contents = SmallVec::<[u8; 32]>::new();
        reloid::append_encoded(value, &mut contents);
        self.write_primitive(
            outer, InnerNumber::RELATIVE_OBJECT_IDENTIFIER, &contents
        ).await
    }

    /// Writes a RELATIVE-OID value, blocking.
    pub fn write_relative_object_identifier(
        &mut self, outer: EmberId, value: &[u32]
    ) -> Result<(), Error> {
        complete(self.write_relative_object_identifier_async(outer, value))
    }

    /// Writes a primitive value of any type.
    pub async fn write_value_async(
        &mut self, outer: EmberId, value: &Value
    ) -> Result<(), Error> {
        match *value {
            Value::Boolean(value) => {
                self.write_boolean_async(outer, value).await
            }
            Value::Integer(value) => {
                self.write_integer_async(outer, value).await
            }
            Value::Octetstring(ref value) => {
                self.write_octetstring_async(outer, value).await
            }
            Value::Real(value) => self.write_real_async(outer, value).await,
            Value::Utf8String(ref value) => {
                self.write_utf8_string_async(outer, value).await
            }
            Value::RelativeObjectIdentifier(ref value) => {
                self.write_relative_object_identifier_async(
                    outer, value
                ).await
            }
        }
    }

    /// Writes a primitive value of any type, blocking.
    pub fn write_value(
        &mut self, outer: EmberId, value: &Value
    ) -> Result<(), Error> {
        complete(self.write_value_async(outer, value))
    }

    /// Writes a primitive value with its complete contents.
    async fn write_primitive(
        &mut self, outer: EmberId, number: InnerNumber, contents: &[u8]
    ) -> Result<(), Error> {
        let inner = Ident::new(EmberId::universal(number.into_u32()), false);
        let inner_len = Length::Definite(contents.len());
        let outer_len = Length::Definite(
            inner.encoded_len() + inner_len.encoded_len() + contents.len()
        );

        let mut header = SmallVec::<[u8; 32]>::new();
        Ident::new(outer, true).append_encoded(&mut header);
        outer_len.append_encoded(&mut header);
        inner.append_encoded(&mut header);
        inner_len.append_encoded(&mut header);
        self.buffer()?.write_unit(&header, contents).await
    }
}

/// # Containers
///
impl<K: Sink> StreamWriter<K> {
    /// Starts a SEQUENCE.
    pub async fn write_start_sequence_async(
        &mut self, outer: EmberId
    ) -> Result<(), Error> {
        self.write_start_container_async(outer, InnerNumber::SEQUENCE).await
    }

    /// Starts a SEQUENCE, blocking.
    pub fn write_start_sequence(
        &mut self, outer: EmberId
    ) -> Result<(), Error> {
        complete(self.write_start_sequence_async(outer))
    }

    /// Starts a SET.
    pub async fn write_start_set_async(
        &mut self, outer: EmberId
    ) -> Result<(), Error> {
        self.write_start_container_async(outer, InnerNumber::SET).await
    }

    /// Starts a SET, blocking.
    pub fn write_start_set(&mut self, outer: EmberId) -> Result<(), Error> {
        complete(self.write_start_set_async(outer))
    }

    /// Starts an application-defined type.
    ///
    /// The inner number must be at least
    /// [`InnerNumber::FIRST_APPLICATION`]. Use [`InnerNumber::application`]
    /// to create it from the application tag number.
    pub async fn write_start_application_defined_type_async(
        &mut self, outer: EmberId, inner: InnerNumber
    ) -> Result<(), Error> {
        if !inner.is_application() {
            return Err(Error::InvalidArgument(format!(
                "inner number {} is not an application-defined type",
                inner.into_u32()
            ).into()))
        }
        self.write_start_container_async(outer, inner).await
    }

    /// Starts an application-defined type, blocking.
    pub fn write_start_application_defined_type(
        &mut self, outer: EmberId, inner: InnerNumber
    ) -> Result<(), Error> {
        complete(self.write_start_application_defined_type_async(outer, inner))
    }

    /// Starts a container of any type.
    ///
    /// The inner number must be either that of SEQUENCE, SET, or an
    /// application-defined type.
    pub async fn write_start_container_async(
        &mut self, outer: EmberId, inner: InnerNumber
    ) -> Result<(), Error> {
        let inner_ident = match inner.inner_ident() {
            Some(ident) if inner.is_container() => ident,
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "inner number {} is not a container type",
                    inner.into_u32()
                ).into()))
            }
        };
        let mut header = SmallVec::<[u8; 16]>::new();
        Ident::new(outer, true).append_encoded(&mut header);
        Length::Indefinite.append_encoded(&mut header);
        inner_ident.append_encoded(&mut header);
        Length::Indefinite.append_encoded(&mut header);
        self.buffer()?.write_unit(&header, b"").await?;
        log::trace!("started {} {}", outer, inner);
        Ok(())
    }

    /// Starts a container of any type, blocking.
    pub fn write_start_container(
        &mut self, outer: EmberId, inner: InnerNumber
    ) -> Result<(), Error> {
        complete(self.write_start_container_async(outer, inner))
    }

    /// Ends the most recently started container.
    ///
    /// This writes the end-of-contents for both the inner and the outer
    /// identifier.
    pub async fn write_end_container_async(&mut self) -> Result<(), Error> {
        self.buffer()?.write_unit(&[0; 4], b"").await?;
        log::trace!("ended container");
        Ok(())
    }

    /// Ends the most recently started container, blocking.
    pub fn write_end_container(&mut self) -> Result<(), Error> {
        complete(self.write_end_container_async())
    }
}

/// # Flushing and Disposal
///
impl<K: Sink> StreamWriter<K> {
    /// Pushes all buffered data to the sink and flushes the sink.
    pub async fn flush_async(&mut self) -> Result<(), Error> {
        self.buffer()?.flush_all().await
    }

    /// Pushes all buffered data to the sink, blocking.
    pub fn flush(&mut self) -> Result<(), Error> {
        complete(self.flush_async())
    }

    /// Disposes of the writer.
    ///
    /// Flushes buffered data to the sink and drops the sink. Failing to
    /// flush is logged but otherwise ignored. Every later operation fails
    /// with [`Error::Disposed`]. Disposing more than once is fine.
    pub async fn dispose_async(&mut self) {
        if let Some(mut buf) = self.buf.take() {
            if let Err(err) = buf.flush_all().await {
                log::warn!("failed to flush EmBER writer on dispose: {}", err);
            }
            log::trace!("disposed writer");
        }
    }

    /// Disposes of the writer, blocking.
    pub fn dispose(&mut self) {
        let res = complete(async {
            self.dispose_async().await;
            Ok(())
        });
        if let Err(err) = res {
            log::warn!("failed to flush EmBER writer on dispose: {}", err);
        }
    }

    /// Flushes the writer and returns its sink.
    pub async fn into_inner_async(mut self) -> Result<K, Error> {
        let mut buf = self.buf.take().ok_or(Error::Disposed)?;
        buf.flush_all().await?;
        Ok(buf.into_sink())
    }

    /// Flushes the writer and returns its sink, blocking.
    pub fn into_inner(self) -> Result<K, Error> {
        complete(self.into_inner_async())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::io;
    use crate::decode::StreamReader;
    use crate::encode::FnSink;
    use crate::error::ErrorKind;
    use super::*;

    fn written(op: impl FnOnce(&mut StreamWriter<Vec<u8>>)) -> Vec<u8> {
        let mut writer = StreamWriter::new(Vec::new());
        op(&mut writer);
        writer.into_inner().unwrap()
    }

    const A0: EmberId = EmberId::application(0);

    #[test]
    fn primitive_vectors() {
        assert_eq!(
            written(|w| w.write_boolean(A0, true).unwrap()),
            b"\x60\x03\x01\x01\xff"
        );
        assert_eq!(
            written(|w| w.write_boolean(A0, false).unwrap()),
            b"\x60\x03\x01\x01\x00"
        );
        assert_eq!(
            written(|w| w.write_real(A0, 0.0).unwrap()),
            b"\x60\x02\x09\x00"
        );
        assert_eq!(
            written(|w| w.write_real(A0, 1.0).unwrap()),
            b"\x60\x05\x09\x03\x80\x00\x01"
        );
        assert_eq!(
            written(|w| {
                w.write_utf8_string(EmberId::application(4), "A").unwrap()
            }),
            b"\x64\x03\x0c\x01\x41"
        );
        assert_eq!(
            written(|w| w.write_integer(A0, 1).unwrap()),
            b"\x60\x03\x02\x01\x01"
        );
        assert_eq!(
            written(|w| w.write_integer(A0, 128).unwrap()),
            b"\x60\x04\x02\x02\x00\x80"
        );
        assert_eq!(
            written(|w| w.write_integer(A0, -129).unwrap()),
            b"\x60\x04\x02\x02\xff\x7f"
        );
        assert_eq!(
            written(|w| {
                w.write_relative_object_identifier(
                    EmberId::ctx(1), &[1, 128]
                ).unwrap()
            }),
            b"\xa1\x05\x0d\x03\x01\x81\x00"
        );
        assert_eq!(
            written(|w| w.write_octetstring(EmberId::ctx(31), b"").unwrap()),
            b"\xbf\x1f\x02\x04\x00"
        );
    }

    #[test]
    fn long_contents() {
        let data = [0x5a; 200];
        let encoded = written(|w| w.write_octetstring(A0, &data).unwrap());
        assert_eq!(&encoded[..6], b"\x60\x81\xcb\x04\x81\xc8");
        assert_eq!(&encoded[6..], &data[..]);
    }

    #[test]
    fn containers() {
        assert_eq!(
            written(|w| {
                w.write_start_sequence(A0).unwrap();
                w.write_end_container().unwrap();
            }),
            b"\x60\x80\x30\x80\x00\x00\x00\x00"
        );
        assert_eq!(
            written(|w| {
                w.write_start_set(EmberId::ctx(1)).unwrap();
                w.write_start_application_defined_type(
                    EmberId::ctx(2), InnerNumber::application(5).unwrap()
                ).unwrap();
                w.write_end_container().unwrap();
                w.write_end_container().unwrap();
            }),
            b"\xa1\x80\x31\x80\xa2\x80\x65\x80\
              \x00\x00\x00\x00\x00\x00\x00\x00"
        );
    }

    #[test]
    fn invalid_container_types() {
        let mut writer = StreamWriter::new(Vec::new());
        let err = writer.write_start_application_defined_type(
            A0, InnerNumber::SEQUENCE
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(
            writer.write_start_container(A0, InnerNumber::INTEGER).is_err()
        );
        assert!(
            writer.write_start_container(
                A0, InnerNumber::END_CONTAINER
            ).is_err()
        );
        assert_eq!(writer.into_inner().unwrap(), b"");
    }

    #[test]
    fn round_trip() {
        let values = [
            Value::Boolean(true),
            Value::Integer(i64::MIN),
            Value::Integer(0),
            Value::Octetstring(vec![0u8; 300].into()),
            Value::Real(-1e-10),
            Value::Utf8String("Grüße".into()),
            Value::RelativeObjectIdentifier(vec![0, u32::MAX]),
        ];
        let mut writer = StreamWriter::with_config(
            Vec::new(), WriterConfig::default().with_buffer_size(16)
        ).unwrap();
        writer.write_start_sequence(A0).unwrap();
        for (idx, value) in values.iter().enumerate() {
            writer.write_value(EmberId::ctx(idx as u32), value).unwrap();
        }
        writer.write_end_container().unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = StreamReader::from_slice(&data);
        assert!(reader.read().unwrap());
        assert_eq!(reader.inner_number().unwrap(), InnerNumber::SEQUENCE);
        for (idx, value) in values.iter().enumerate() {
            assert!(reader.read().unwrap());
            assert_eq!(reader.outer_id().unwrap(), EmberId::ctx(idx as u32));
            assert_eq!(&reader.read_contents().unwrap(), value);
        }
        assert!(reader.read().unwrap());
        assert!(!reader.is_data_value().unwrap());
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn headers_are_not_split() {
        let mut pushes = Vec::new();
        let mut writer = StreamWriter::with_config(
            FnSink::new(|data: &[u8]| {
                pushes.push(data.to_vec());
                Ok(())
            }),
            WriterConfig::default().with_buffer_size(8)
        ).unwrap();
        writer.write_boolean(A0, true).unwrap();
        writer.write_utf8_string(A0, "abcdef").unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(
            pushes,
            [
                b"\x60\x03\x01\x01\xff".to_vec(),
                b"\x60\x08\x0c\x06".to_vec(),
                b"abcdef".to_vec(),
            ]
        );
    }

    #[test]
    fn dispose() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_boolean(A0, true).unwrap();
        writer.dispose();
        assert!(writer.is_disposed());
        assert!(matches!(
            writer.write_boolean(A0, true), Err(Error::Disposed)
        ));
        assert!(matches!(writer.flush(), Err(Error::Disposed)));
        writer.dispose();
        assert!(matches!(writer.into_inner(), Err(Error::Disposed)));

        // A failing flush is swallowed.
        let mut writer = StreamWriter::new(FnSink::new(|_: &[u8]| {
            Err(io::Error::other("broken"))
        }));
        writer.write_boolean(A0, true).unwrap();
        writer.dispose();
        assert!(writer.is_disposed());
    }

    #[tokio::test]
    async fn async_round_trip() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_start_set_async(A0).await.unwrap();
        writer.write_real_async(EmberId::ctx(0), -2.5).await.unwrap();
        writer.write_end_container_async().await.unwrap();
        let data = writer.into_inner_async().await.unwrap();

        let mut reader = StreamReader::from_slice(&data);
        assert!(reader.read_async().await.unwrap());
        assert_eq!(reader.inner_number().unwrap(), InnerNumber::SET);
        assert!(reader.read_async().await.unwrap());
        assert_eq!(
            reader.read_contents_as_real_async().await.unwrap(), -2.5
        );
        assert!(reader.read_async().await.unwrap());
        assert!(!reader.read_async().await.unwrap());
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn tokio_pipe() {
        use crate::decode::TokioSource;
        use crate::encode::TokioSink;

        // The pipe is much smaller than the data, so both sides have to
        // wait for each other.
        let (tx, rx) = tokio::io::duplex(8);
        let producer = async move {
            let mut writer = StreamWriter::with_config(
                TokioSink::new(tx), WriterConfig::default().with_buffer_size(5)
            ).unwrap();
            writer.write_start_sequence_async(A0).await.unwrap();
            for i in 0..50 {
                writer.write_integer_async(EmberId::ctx(1), i).await.unwrap();
            }
            writer.write_end_container_async().await.unwrap();
            writer.dispose_async().await;
        };
        let consumer = async move {
            let mut reader = StreamReader::new(TokioSource::new(rx));
            let mut sum = 0;
            while reader.read_async().await.unwrap() {
                if reader.can_read_contents() {
                    sum += reader.read_contents_as_integer_async()
                        .await.unwrap();
                }
            }
            sum
        };
        let ((), sum) = tokio::join!(producer, consumer);
        assert_eq!(sum, (0..50).sum::<i64>());
    }
}
