//! Relative object identifiers and seven bit subidentifiers.
//!
//! A RELATIVE-OID is a sequence of unsigned integers. Each of them, called a
//! subidentifier, is encoded big-endian in groups of seven bits with the
//! most significant bit of each octet set if more octets follow. Tag
//! numbers beyond 30 in identifier octets use the same scheme.
//!
//! Unlike absolute object identifiers, there is no special treatment of the
//! first two components. Subidentifiers are limited to `u32`.

use crate::decode::Pos;
use crate::error::Error;


//------------ Subidentifiers ------------------------------------------------

/// Adds the next octet of a subidentifier to the value accumulated so far.
///
/// Returns `None` if the result would not fit a `u32`. The caller checks
/// the continuation bit itself.
pub fn push_octet(value: u32, octet: u8) -> Option<u32> {
    if value.leading_zeros() < 7 {
        return None
    }
    Some(value << 7 | u32::from(octet & 0x7F))
}

/// Returns the number of octets in the encoding of a subidentifier.
pub fn subidentifier_len(value: u32) -> usize {
    let bits = (u32::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(7).max(1)
}

/// Appends the encoding of a subidentifier to a target.
pub fn append_subidentifier(value: u32, target: &mut impl Extend<u8>) {
    let len = subidentifier_len(value);
    target.extend((0..len).rev().map(|idx| {
        let octet = (value >> (idx * 7)) as u8 & 0x7F;
        if idx == 0 { octet } else { octet | 0x80 }
    }))
}


//------------ Relative OIDs -------------------------------------------------

/// Decodes the content octets of a relative object identifier.
///
/// Empty content results in an empty identifier. The position is the start
/// of the content and is used for error reporting.
pub fn decode(octets: &[u8], pos: Pos) -> Result<Vec<u32>, Error> {
    let mut res = Vec::new();
    let mut value = 0u32;
    let mut pending = false;
    for (idx, &octet) in octets.iter().enumerate() {
        value = push_octet(value, octet).ok_or_else(|| {
            Error::content(
                "number or subidentifier exceeds expected range", pos + idx
            )
        })?;
        if octet & 0x80 == 0 {
            res.push(value);
            value = 0;
            pending = false;
        }
        else {
            pending = true;
        }
    }
    if pending {
        return Err(Error::content("incorrect length", pos + octets.len()))
    }
    Ok(res)
}

/// Returns the length of the content octets of a relative object identifier.
pub fn encoded_len(subidentifiers: &[u32]) -> usize {
    subidentifiers.iter().map(|&value| subidentifier_len(value)).sum()
}

/// Appends the content octets of a relative object identifier to a target.
pub fn append_encoded(
    subidentifiers: &[u32], target: &mut impl Extend<u8>
) {
    for &value in subidentifiers {
        append_subidentifier(value, target)
    }
}


//============ Tests =========================================================
