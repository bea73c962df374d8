//! Owned primitive values.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::fmt;
use bytes::Bytes;
use crate::ident::InnerNumber;


//------------ Value ---------------------------------------------------------

/// The decoded contents of a primitive data value.
///
/// This is what the reader returns when asked for the contents of whatever
/// value it is currently positioned on and what the writer accepts for
/// writing a value of any primitive type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A BOOLEAN.
    Boolean(bool),

    /// An INTEGER.
    Integer(i64),

    /// An OCTET STRING.
    Octetstring(Bytes),

    /// A REAL.
    Real(f64),

    /// A UTF8String.
    Utf8String(String),

    /// A RELATIVE-OID.
    RelativeObjectIdentifier(Vec<u32>),
}

impl Value {
    /// Returns the inner number for the type of the value.
    pub fn inner_number(&self) -> InnerNumber {
        match *self {
            Value::Boolean(_) => InnerNumber::BOOLEAN,
            Value::Integer(_) => InnerNumber::INTEGER,
            Value::Octetstring(_) => InnerNumber::OCTETSTRING,
            Value::Real(_) => InnerNumber::REAL,
            Value::Utf8String(_) => InnerNumber::UTF8_STRING,
            Value::RelativeObjectIdentifier(_) => {
                InnerNumber::RELATIVE_OBJECT_IDENTIFIER
            }
        }
    }
}


//--- From

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Octetstring(value)
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(value: &'a [u8]) -> Self {
        Value::Octetstring(Bytes::copy_from_slice(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Utf8String(value)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(value: &'a str) -> Self {
        Value::Utf8String(value.into())
    }
}

impl From<Vec<u32>> for Value {
    fn from(value: Vec<u32>) -> Self {
        Value::RelativeObjectIdentifier(value)
    }
}


//--- Display

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Boolean(value) => fmt::Display::fmt(&value, f),
            Value::Integer(value) => fmt::Display::fmt(&value, f),
            Value::Octetstring(ref value) => {
                for octet in value.iter() {
                    write!(f, "{:02X}", octet)?;
                }
                Ok(())
            }
            Value::Real(value) => fmt::Display::fmt(&value, f),
            Value::Utf8String(ref value) => write!(f, "{:?}", value),
            Value::RelativeObjectIdentifier(ref value) => {
                let mut first = true;
                for item in value {
                    if first {
                        first = false
                    }
                    else {
                        f.write_str(".")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                Ok(())
            }
        }
    }
}


//============ Tests =========================================================
