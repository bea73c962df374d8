//! Minimal-length integers.
//!
//! INTEGER contents as well as the exponent and mantissa of a REAL are
//! big-endian integers using the smallest possible number of octets. Signed
//! values are in two’s complement, so the most significant bit of the first
//! octet is the sign bit.
//!
//! Decoding is lenient and accepts redundant leading octets as long as the
//! value fits into the native type.

use crate::decode::Pos;
use crate::error::Error;


//------------ Signed --------------------------------------------------------

/// Decodes a signed integer from its content octets.
///
/// The first octet is sign-extended. Every further octet is shifted in from
/// the right, failing if the value would not fit an `i64` any more. The
/// position is the start of the octets and is used for error reporting.
pub fn decode_signed(octets: &[u8], pos: Pos) -> Result<i64, Error> {
    let (&first, rest) = match octets.split_first() {
        Some(some) => some,
        None => {
            return Err(Error::content(
                "unexpected zero length for integer", pos
            ))
        }
    };
    let mut res = i64::from(first as i8);
    for &octet in rest {
        res = shift_in(res, octet).ok_or_else(|| {
            Error::content("integer exceeds expected range", pos)
        })?;
    }
    Ok(res)
}

/// Returns the number of content octets for a signed integer.
pub fn signed_len(value: i64) -> usize {
    // Bits without redundant sign bits plus the sign bit itself.
    let magnitude = if value < 0 { !value } else { value };
    let bits = (i64::BITS - magnitude.leading_zeros()) as usize + 1;
    bits.div_ceil(8)
}

/// Appends the content octets of a signed integer to a target.
pub fn append_signed(value: i64, target: &mut impl Extend<u8>) {
    let len = signed_len(value);
    target.extend(value.to_be_bytes().into_iter().skip(8 - len))
}


//------------ Unsigned ------------------------------------------------------

/// Decodes an unsigned integer from its content octets.
pub fn decode_unsigned(octets: &[u8], pos: Pos) -> Result<u64, Error> {
    if octets.is_empty() {
        return Err(Error::content(
            "unexpected zero length for integer", pos
        ))
    }
    let mut res = 0u64;
    for &octet in octets {
        res = res.checked_mul(0x100).map(|res| {
            res | u64::from(octet)
        }).ok_or_else(|| {
            Error::content("integer exceeds expected range", pos)
        })?;
    }
    Ok(res)
}

/// Returns the number of content octets for an unsigned integer.
///
/// Zero still needs one octet.
pub fn unsigned_len(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(8).max(1)
}

/// Appends the content octets of an unsigned integer to a target.
pub fn append_unsigned(value: u64, target: &mut impl Extend<u8>) {
    let len = unsigned_len(value);
    target.extend(value.to_be_bytes().into_iter().skip(8 - len))
}


//------------ Helpers -------------------------------------------------------

/// Shifts an octet in from the right.
///
/// Returns `None` on overflow.
fn shift_in(value: i64, octet: u8) -> Option<i64> {
    // The low octet is zero after the multiplication so or-ing in the
    // octet works for both signs.
    value.checked_mul(0x100).map(|value| value | i64::from(octet))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;
    use super::*;

    fn signed(value: i64) -> Vec<u8> {
        let mut res = Vec::new();
        append_signed(value, &mut res);
        assert_eq!(res.len(), signed_len(value));
        res
    }

    fn unsigned(value: u64) -> Vec<u8> {
        let mut res = Vec::new();
        append_unsigned(value, &mut res);
        assert_eq!(res.len(), unsigned_len(value));
        res
    }

    #[test]
    fn encode_signed_minimal() {
        assert_eq!(signed(0), b"\x00");
        assert_eq!(signed(1), b"\x01");
        assert_eq!(signed(-1), b"\xff");
        assert_eq!(signed(127), b"\x7f");
        assert_eq!(signed(128), b"\x00\x80");
        assert_eq!(signed(-128), b"\x80");
        assert_eq!(signed(-129), b"\xff\x7f");
        assert_eq!(signed(0x7fff), b"\x7f\xff");
        assert_eq!(signed(0x8000), b"\x00\x80\x00");
        assert_eq!(signed(-0x8000), b"\x80\x00");
        assert_eq!(signed(i64::MAX), b"\x7f\xff\xff\xff\xff\xff\xff\xff");
        assert_eq!(signed(i64::MIN), b"\x80\x00\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn encode_unsigned_minimal() {
        assert_eq!(unsigned(0), b"\x00");
        assert_eq!(unsigned(1), b"\x01");
        assert_eq!(unsigned(0x80), b"\x80");
        assert_eq!(unsigned(0x1_0000), b"\x01\x00\x00");
        assert_eq!(unsigned(u64::MAX), b"\xff\xff\xff\xff\xff\xff\xff\xff");
    }

    #[test]
    fn decode_signed_values() {
        for &value in &[
            0, 1, -1, 127, 128, -128, -129, 255, 256, 0x7fff, -0x8000,
            0x12_3456_789a, -0x12_3456_789a, i64::MAX, i64::MIN,
            i64::MAX - 1, i64::MIN + 1,
        ] {
            assert_eq!(
                decode_signed(&signed(value), Pos::default()).unwrap(),
                value
            );
        }

        // Redundant leading octets are fine.
        assert_eq!(decode_signed(b"\x00\x01", Pos::default()).unwrap(), 1);
        assert_eq!(decode_signed(b"\xff\xff", Pos::default()).unwrap(), -1);
        assert_eq!(
            decode_signed(
                b"\xff\x80\x00\x00\x00\x00\x00\x00\x00", Pos::default()
            ).unwrap(),
            i64::MIN
        );
    }

    #[test]
    fn decode_signed_failures() {
        let err = decode_signed(b"", 3usize.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Content);
        assert_eq!(err.pos(), Some(Pos::from(3usize)));

        let err = decode_signed(
            b"\x00\x80\x00\x00\x00\x00\x00\x00\x00", Pos::default()
        ).unwrap_err();
        assert_eq!(
            err.to_string(), "integer exceeds expected range at position 0"
        );
        assert!(
            decode_signed(
                b"\xff\x7f\xff\xff\xff\xff\xff\xff\xff", Pos::default()
            ).is_err()
        );
    }

    #[test]
    fn decode_unsigned_values() {
        for &value in &[0, 1, 0x80, 0xffff, 0x1_0000, u64::MAX] {
            assert_eq!(
                decode_unsigned(&unsigned(value), Pos::default()).unwrap(),
                value
            );
        }
        assert_eq!(
            decode_unsigned(b"\x00\x00\x80", Pos::default()).unwrap(), 0x80
        );
        assert!(decode_unsigned(b"", Pos::default()).is_err());
        assert!(
            decode_unsigned(
                b"\x01\x00\x00\x00\x00\x00\x00\x00\x00", Pos::default()
            ).is_err()
        );
    }
}
