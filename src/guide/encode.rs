//! Encoding EmBER data.
//!
//! Data is encoded with a [`StreamWriter`]. Each primitive value is
//! written with a single call to the method for its type which takes the
//! outer identifier and the value. Containers are started with one of
//! [`write_start_sequence`], [`write_start_set`], or
//! [`write_start_application_defined_type`], followed by their content,
//! and closed with [`write_end_container`]. It is up to the caller to keep
//! containers balanced.
//!
//! Here is how the data from the [decoding guide] is produced:
//!
//! ```
//! use ember_ber::{EmberId, InnerNumber, StreamWriter};
//!
//! let mut writer = StreamWriter::new(Vec::new());
//! writer.write_start_application_defined_type(
//!     EmberId::application(0), InnerNumber::application(3).unwrap()
//! )?;
//! writer.write_integer(EmberId::ctx(0), 5)?;
//! writer.write_utf8_string(EmberId::ctx(1), "gain")?;
//! writer.write_end_container()?;
//!
//! assert_eq!(
//!     writer.into_inner()?,
//!     b"\x60\x80\x63\x80\
//!       \xa0\x03\x02\x01\x05\
//!       \xa1\x06\x0c\x04gain\
//!       \x00\x00\x00\x00"
//! );
//! # Ok::<(), ember_ber::Error>(())
//! ```
//!
//! Primitive values are always written with definite length, containers
//! always with indefinite length.
//!
//!
//! # Sinks and Flushing
//!
//! The writer collects the encoded data in a buffer and passes it on to
//! its [`Sink`] whenever the buffer is full. Apart from vectors, there are
//! sinks for types implementing `std::io::Write` and for closures. The
//! buffer size can be changed through a [`WriterConfig`].
//!
//! Buffered data only reaches the sink when calling [`flush`], when
//! turning the writer back into its sink via [`into_inner`], or when
//! disposing of the writer via [`dispose`]. Dropping a writer loses any
//! buffered data.
//!
//! ```
//! use std::io;
//! use ember_ber::{EmberId, StreamWriter, WriterConfig};
//! use ember_ber::encode::IoSink;
//!
//! let mut writer = StreamWriter::with_config(
//!     IoSink::new(io::Cursor::new(Vec::new())),
//!     WriterConfig::default().with_buffer_size(64),
//! )?;
//! writer.write_real(EmberId::ctx(2), 1.0)?;
//! writer.flush()?;
//! let data = writer.into_inner()?.into_writer().into_inner();
//! assert_eq!(data, b"\xa2\x05\x09\x03\x80\x00\x01");
//! # Ok::<(), ember_ber::Error>(())
//! ```
//!
//! As with the reader, every method has an `async` twin with an `_async`
//! suffix for use with sinks that may need to wait.
//!
//! [decoding guide]: super::decode
//! [`StreamWriter`]: crate::StreamWriter
//! [`write_start_sequence`]: crate::StreamWriter::write_start_sequence
//! [`write_start_set`]: crate::StreamWriter::write_start_set
//! [`write_start_application_defined_type`]: crate::StreamWriter::write_start_application_defined_type
//! [`write_end_container`]: crate::StreamWriter::write_end_container
//! [`flush`]: crate::StreamWriter::flush
//! [`into_inner`]: crate::StreamWriter::into_inner
//! [`dispose`]: crate::StreamWriter::dispose
//! [`Sink`]: crate::encode::Sink
//! [`WriterConfig`]: crate::WriterConfig
