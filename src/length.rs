//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is re-exported
//! by the parent.

use crate::decode::{ReadBuffer, Source};
use crate::error::Error;


//------------ Length -------------------------------------------------------

/// The length octets of an encoded value.
///
/// A length value can either be definite, meaning it provides the actual
/// number of content octets in the value, or indefinite, in which case the
/// content is delimited by a special end-of-value marker.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the definite length. Thus, if the first octet is
/// less than 128, it provides the definite length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length. If they specify that there are zero more octets, i.e., the
/// value of the first octet is 128, the length is indefinite. Otherwise,
/// those following octets give the big-endian encoding of the definite
/// length of the content octets.
///
/// Decoding accepts redundant leading zero octets in the long form.
/// Encoding always uses the shortest form.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Length {
    /// A length value in definite form.
    ///
    /// Provides the actual length of the content in octets.
    Definite(usize),

    /// A length value in indefinite form.
    ///
    /// In this form, the end of a value is determined by a special tag.
    Indefinite,
}

impl Length {
    /// The octet used for indefinite length.
    const INDEFINITE_OCTET: u8 = 0x80;

    /// Returns the length if it is definite.
    pub fn definite(self) -> Option<usize> {
        match self {
            Length::Definite(len) => Some(len),
            Length::Indefinite => None,
        }
    }

    /// Returns whether the length is definite and zero.
    pub fn is_zero(self) -> bool {
        self == Length::Definite(0)
    }

    /// Takes a length value from the beginning of a buffer.
    pub async fn take_from<S: Source>(
        buf: &mut ReadBuffer<S>
    ) -> Result<Self, Error> {
        let start = buf.pos();
        match buf.take_u8().await? {
            // Bit 7 clear: other bits are the length
            n if (n & 0x80) == 0 => Ok(Length::Definite(n as usize)),

            // Bit 7 set: other bits are the number of octets that
            // encode the length. Unless they are all 0, in which case this
            // is the indefinite form.
            Self::INDEFINITE_OCTET => Ok(Length::Indefinite),
            n => {
                let count = (n & 0x7F) as usize;
                let mut len = 0usize;
                for _ in 0..count {
                    let octet = buf.take_u8().await?;
                    len = len.checked_mul(0x100).map(|len| {
                        len | usize::from(octet)
                    }).ok_or_else(|| {
                        Error::content("length exceeds expected range", start)
                    })?;
                }
                Ok(Length::Definite(len))
            }
        }
    }

    /// Returns the number of octets of the encoded form.
    pub fn encoded_len(self) -> usize {
        match self {
            Length::Indefinite => 1,
            Length::Definite(len) => {
                if len <= 0x7F {
                    1
                }
                else {
                    1 + Self::long_form_len(len)
                }
            }
        }
    }

    /// Appends the encoded length to a target.
    pub fn append_encoded(self, target: &mut impl Extend<u8>) {
        match self {
            Length::Indefinite => target.extend([Self::INDEFINITE_OCTET]),
            Length::Definite(len) => {
                if len <= 0x7F {
                    target.extend([len as u8])
                }
                else {
                    let count = Self::long_form_len(len);
                    target.extend([0x80 | count as u8]);
                    target.extend(
                        len.to_be_bytes().into_iter().skip(
                            usize::BITS as usize / 8 - count
                        )
                    );
                }
            }
        }
    }

    /// Returns the number of octets needed for the long form of `len`.
    fn long_form_len(len: usize) -> usize {
        let bits = (usize::BITS - len.leading_zeros()) as usize;
        bits.div_ceil(8)
    }
}

impl From<usize> for Length {
    fn from(len: usize) -> Self {
        Length::Definite(len)
    }
}


//============ Tests =========================================================
