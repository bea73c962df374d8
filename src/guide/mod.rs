//! Getting started with the ember-ber crate.
//!
//! This module provides a short introduction to the EmBER encoding and
//! how the crate can be used to decode and encode data in it. It is only
//! for documentation and does not contain any code.
//!
//! The guide consists of the following sections:
//!
//! * [ember] describes the encoding,
//! * [decode] shows how to read data with the [`StreamReader`],
//! * [encode] shows how to write data with the [`StreamWriter`].
//!
//! [`StreamReader`]: crate::StreamReader
//! [`StreamWriter`]: crate::StreamWriter

pub mod ember;
pub mod decode;
pub mod encode;
