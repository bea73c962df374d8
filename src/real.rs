//! REAL values.
//!
//! EmBER only uses the binary form of X.690 section 8.5 with base 2 and a
//! scaling factor of zero plus the special values for infinity, NaN, and
//! negative zero. Zero itself has empty content.
//!
//! Unlike plain BER, the exponent is the exponent of the leading one bit of
//! the mantissa, i.e., the value is `1.f × 2^exponent` with the mantissa
//! holding the bits `1f`. Trailing zero bits are removed from the mantissa.
//! This is what deployed Ember+ implementations produce and expect.

use smallvec::SmallVec;
use crate::decode::Pos;
use crate::error::Error;
use crate::int;


//------------ Constants -----------------------------------------------------

/// The first octet for plus infinity.
const PLUS_INFINITY: u8 = 0x40;

/// The first octet for minus infinity.
const MINUS_INFINITY: u8 = 0x41;

/// The first octet for not-a-number.
const NOT_A_NUMBER: u8 = 0x42;

/// The first octet for minus zero.
const MINUS_ZERO: u8 = 0x43;

/// The IEEE 754 exponent bias for doubles.
const BIAS: i64 = 1023;

/// The number of explicit mantissa bits in a double.
const FRACTION_BITS: u32 = 52;

/// The mask for the explicit mantissa bits in a double.
const FRACTION_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;

/// The upper bound of the encoded content length.
///
/// One octet of header, two of exponent, and seven of mantissa.
pub const MAX_ENCODED_LEN: usize = 10;


//------------ Decoding ------------------------------------------------------

/// Decodes the content octets of a real value.
///
/// The position is the start of the content and is used for error
/// reporting.
pub fn decode(octets: &[u8], pos: Pos) -> Result<f64, Error> {
    let (&first, rest) = match octets.split_first() {
        Some(some) => some,
        None => return Ok(0.0)
    };

    // Special values. Some encoders add garbage after those, so we ignore
    // the rest.
    match first {
        PLUS_INFINITY => return Ok(f64::INFINITY),
        MINUS_INFINITY => return Ok(f64::NEG_INFINITY),
        NOT_A_NUMBER => return Ok(f64::NAN),
        MINUS_ZERO => return Ok(-0.0),
        _ => { }
    }

    if first & 0x80 == 0 || first & 0x3C != 0 {
        return Err(Error::content("unexpected encoding for Real", pos))
    }
    let negative = first & 0x40 != 0;

    let (exp_len, rest) = match first & 0x03 {
        3 => match rest.split_first() {
            Some((&len, rest)) => (usize::from(len), rest),
            None => return Err(Error::content("incorrect length", pos))
        },
        n => (usize::from(n) + 1, rest)
    };
    if rest.len() <= exp_len {
        return Err(Error::content("incorrect length", pos))
    }
    let (exp_octets, mantissa_octets) = rest.split_at(exp_len);
    let exponent = int::decode_signed(exp_octets, pos)?;
    let mantissa = int::decode_unsigned(mantissa_octets, pos)?;

    // Some encoders mark infinity and NaN via the exponent IEEE uses for
    // them.
    if exponent == BIAS + 1 {
        if mantissa != 0 {
            return Ok(f64::NAN)
        }
        return Ok(if negative { f64::NEG_INFINITY } else { f64::INFINITY })
    }
    if exponent <= -BIAS || exponent > BIAS {
        return Err(Error::content("exponent exceeds expected range", pos))
    }
    if mantissa == 0 {
        return Err(Error::content("mantissa is zero", pos))
    }

    // Move the leading one to the position of the implicit bit.
    let zeros = mantissa.leading_zeros();
    let implicit = u64::BITS - FRACTION_BITS - 1;
    let mantissa = if zeros > implicit {
        mantissa << (zeros - implicit)
    }
    else {
        mantissa >> (implicit - zeros)
    };

    let mut bits = (mantissa & FRACTION_MASK)
        | ((exponent + BIAS) as u64) << FRACTION_BITS;
    if negative {
        bits |= 1 << 63;
    }
    Ok(f64::from_bits(bits))
}


//------------ Encoding ------------------------------------------------------

/// Appends the content octets of a real value to a target.
pub fn append_encoded(value: f64, target: &mut impl Extend<u8>) {
    if value.is_nan() {
        target.extend([NOT_A_NUMBER]);
        return
    }
    if value.is_infinite() {
        target.extend([
            if value.is_sign_negative() { MINUS_INFINITY }
            else { PLUS_INFINITY }
        ]);
        return
    }
    if value == 0.0 {
        if value.is_sign_negative() {
            target.extend([MINUS_ZERO])
        }
        return
    }

    let bits = value.to_bits();
    let biased = ((bits >> FRACTION_BITS) & 0x7FF) as i64;
    let fraction = bits & FRACTION_MASK;
    let (exponent, mantissa) = if biased == 0 {
        // Subnormal: no implicit bit, the exponent follows from the
        // position of the leading one.
        let leading = i64::from(u64::BITS - 1 - fraction.leading_zeros());
        (leading - BIAS + 1 - i64::from(FRACTION_BITS), fraction)
    }
    else {
        (biased - BIAS, fraction | 1 << FRACTION_BITS)
    };
    let mantissa = mantissa >> mantissa.trailing_zeros();

    let exp_len = int::signed_len(exponent);
    let mut first = 0x80 | (exp_len - 1) as u8;
    if value.is_sign_negative() {
        first |= 0x40;
    }
    target.extend([first]);
    int::append_signed(exponent, target);
    int::append_unsigned(mantissa, target);
}

/// Returns the content octets of a real value.
pub fn encode(value: f64) -> SmallVec<[u8; MAX_ENCODED_LEN]> {
    let mut res = SmallVec::new();
    append_encoded(value, &mut res);
    res
}


//============ Tests =========================================================
