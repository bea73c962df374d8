//! Decoding EmBER data.
//!
//! Data is decoded with a [`StreamReader`]. It is a pull parser: each call
//! to [`read`] moves it to the next data value of the stream and returns
//! `true`, or returns `false` if the stream has ended after a complete
//! value. The reader never builds a tree of the data. Instead, it is up to
//! the caller to keep track of where they are.
//!
//! Let’s say we want to decode a container of application-defined type 3
//! that has an integer in field `C-0` and a string in field `C-1`:
//!
//! ```text
//! 60 80 63 80                       A-0, application type 3
//!    A0 03 02 01 05                 C-0, INTEGER 5
//!    A1 06 0C 04 67 61 69 6E        C-1, UTF8String "gain"
//! 00 00 00 00                       end of container
//! ```
//!
//! After each successful `read`, the type of the value is available via
//! [`inner_number`] and the field it belongs to via [`outer_id`]. The
//! end of a container is reported as a value of its own. It has the inner
//! number [`InnerNumber::END_CONTAINER`] and no outer identifier. The
//! method [`is_data_value`] can be used to tell it apart from real values.
//!
//! The contents of a primitive value are read with the method for its
//! type, e.g., [`read_contents_as_integer`]. Values we aren’t interested in
//! can just be ignored, the reader skips their content when advancing.
//! Containers we don’t know are skipped with [`skip`].
//!
//! ```
//! use ember_ber::{EmberId, InnerNumber, StreamReader};
//!
//! let data = b"\x60\x80\x63\x80\
//!              \xa0\x03\x02\x01\x05\
//!              \xa1\x06\x0c\x04gain\
//!              \x00\x00\x00\x00";
//!
//! let mut reader = StreamReader::from_slice(data);
//! assert!(reader.read()?);
//! assert_eq!(
//!     reader.inner_number()?, InnerNumber::application(3).unwrap()
//! );
//!
//! let mut number = None;
//! let mut identifier = None;
//! while reader.read()? {
//!     if !reader.is_data_value()? {
//!         break
//!     }
//!     let field = reader.outer_id()?;
//!     if field == EmberId::ctx(0) {
//!         number = Some(reader.read_contents_as_integer()?);
//!     }
//!     else if field == EmberId::ctx(1) {
//!         identifier = Some(reader.read_contents_as_utf8_string()?);
//!     }
//!     else {
//!         reader.skip()?;
//!     }
//! }
//! assert!(!reader.read()?);
//!
//! assert_eq!(number, Some(5));
//! assert_eq!(identifier.as_deref(), Some("gain"));
//! # Ok::<(), ember_ber::Error>(())
//! ```
//!
//! If the type of a value isn’t known in advance,
//! [`read_contents`] returns the contents as a [`Value`].
//!
//!
//! # Errors
//!
//! Data that violates the encoding results in an error of kind
//! [`ErrorKind::Content`] that includes the position in the stream where
//! the problem was found. Data that ends in the middle of a value results
//! in an [`ErrorKind::UnexpectedEnd`]. After such errors, the reader
//! can’t be used any more.
//!
//! ```
//! use ember_ber::{ErrorKind, StreamReader};
//!
//! // A universal outer identifier isn’t allowed.
//! let mut reader = StreamReader::from_slice(b"\x01\x03\x01\x01\xff");
//! let err = reader.read().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Content);
//! assert_eq!(err.pos().map(usize::from), Some(0));
//!
//! // The length is missing.
//! let mut reader = StreamReader::from_slice(b"\x60");
//! let err = reader.read().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);
//! ```
//!
//! Calling a method that doesn’t fit the current value, such as reading
//! the contents of a container, results in an error of kind
//! [`ErrorKind::Usage`]. These errors leave the reader intact.
//!
//!
//! # Sources and Asynchronous Reading
//!
//! The reader takes its data from a [`Source`]. Apart from slices, there
//! are sources for types implementing `std::io::Read` and for closures.
//! All methods of the reader exist in an `async` version with an `_async`
//! suffix. They are needed for sources that may have to wait for their
//! data, such as the Tokio source available with the `tokio` feature.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ember_ber::Error> {
//! use ember_ber::StreamReader;
//! use ember_ber::decode::SliceSource;
//!
//! let mut reader = StreamReader::new(
//!     SliceSource::new(b"\x60\x03\x01\x01\xff")
//! );
//! while reader.read_async().await? {
//!     assert!(reader.read_contents_as_boolean_async().await?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`StreamReader`]: crate::StreamReader
//! [`read`]: crate::StreamReader::read
//! [`inner_number`]: crate::StreamReader::inner_number
//! [`outer_id`]: crate::StreamReader::outer_id
//! [`is_data_value`]: crate::StreamReader::is_data_value
//! [`read_contents_as_integer`]: crate::StreamReader::read_contents_as_integer
//! [`read_contents`]: crate::StreamReader::read_contents
//! [`skip`]: crate::StreamReader::skip
//! [`InnerNumber::END_CONTAINER`]: crate::InnerNumber::END_CONTAINER
//! [`Value`]: crate::Value
//! [`ErrorKind::Content`]: crate::ErrorKind::Content
//! [`ErrorKind::UnexpectedEnd`]: crate::ErrorKind::UnexpectedEnd
//! [`ErrorKind::Usage`]: crate::ErrorKind::Usage
//! [`Source`]: crate::decode::Source
