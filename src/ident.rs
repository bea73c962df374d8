//! The identifier octets of an encoded value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::{fmt, str};
use thiserror::Error;
use crate::decode::{ReadBuffer, Source};
use crate::error::Error;
use crate::reloid;


//------------ EmberId -------------------------------------------------------

/// The tag of a value.
///
/// Tags consist of one of four classes, represented by the [`Class`] enum,
/// and a number within this class. In EmBER, the tag of the outer
/// identifier of a data value tells the value’s role within its parent.
/// These are always either of the application or the context-specific
/// class.
///
/// Tags have a canonical textual form of the class’s initial letter, a
/// hyphen, and the number in decimal, e.g., `C-2` for context-specific
/// tag 2. This form is used by the `Display` and `FromStr` impls.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EmberId {
    class: Class,
    number: u32,
}

impl EmberId {
    /// Creates a tag from a class and number.
    pub const fn new(class: Class, number: u32) -> Self {
        EmberId { class, number }
    }

    /// Creates a new tag in the universal class.
    pub const fn universal(number: u32) -> Self {
        Self::new(Class::Universal, number)
    }

    /// Creates a new tag in the application class.
    pub const fn application(number: u32) -> Self {
        Self::new(Class::Application, number)
    }

    /// Creates a new tag in the context-specific class.
    pub const fn ctx(number: u32) -> Self {
        Self::new(Class::Context, number)
    }

    /// Creates a new tag in the private class.
    pub const fn private(number: u32) -> Self {
        Self::new(Class::Private, number)
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        self.class
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u32 {
        self.number
    }
}

impl fmt::Display for EmberId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.class.initial(), self.number)
    }
}

impl str::FromStr for EmberId {
    type Err = ParseEmberIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let class = match chars.next() {
            Some('U') => Class::Universal,
            Some('A') => Class::Application,
            Some('C') => Class::Context,
            Some('P') => Class::Private,
            _ => return Err(ParseEmberIdError(()))
        };
        if chars.next() != Some('-') {
            return Err(ParseEmberIdError(()))
        }
        let digits = chars.as_str();
        if digits.is_empty()
            || !digits.bytes().all(|ch| ch.is_ascii_digit())
        {
            return Err(ParseEmberIdError(()))
        }
        let number = u32::from_str(digits).map_err(|_| {
            ParseEmberIdError(())
        })?;
        Ok(Self::new(class, number))
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Class {
    /// The universal class for the types defined by ASN.1 itself.
    Universal,

    /// The application class.
    Application,

    /// The context-specific class.
    Context,

    /// The private class.
    Private,
}

impl Class {
    const fn from_u8(octet: u8) -> Self {
        match octet {
            0x00..=0x3F => Self::Universal,
            0x40..=0x7F => Self::Application,
            0x80..=0xBF => Self::Context,
            0xC0..=0xFF => Self::Private
        }
    }

    const fn into_u8(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::Context => 0x80,
            Self::Private => 0xC0,
        }
    }

    const fn initial(self) -> char {
        match self {
            Self::Universal => 'U',
            Self::Application => 'A',
            Self::Context => 'C',
            Self::Private => 'P',
        }
    }
}


//------------ Ident ---------------------------------------------------------

/// The identifier octets of a value.
///
/// The identifier octets combine the tag of a value with a flag whether the
/// value uses primitive or constructed encoding.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ident {
    id: EmberId,
    constructed: bool,
}

impl Ident {
    /// The identifier marking the end-of-contents of an indefinite value.
    pub const END_OF_CONTENTS: Self = Self::new(EmberId::universal(0), false);

    /// The mask for the constructed bit in the first octet.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The mask for the number in a single octet identifier.
    const SINGLEBYTE_DATA_MASK: u8 = 0x1f;

    /// The largest number that fits into a single octet identifier.
    const MAX_SINGLEBYTE_NUMBER: u32 = 0x1e;

    /// Creates identifier octets from a tag.
    pub const fn new(id: EmberId, constructed: bool) -> Self {
        Ident { id, constructed }
    }

    /// Returns the tag of the identifier.
    pub const fn id(self) -> EmberId {
        self.id
    }

    /// Returns the class of the identifier.
    pub const fn class(self) -> Class {
        self.id.class
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u32 {
        self.id.number
    }

    /// Returns whether the value uses constructed encoding.
    pub const fn is_constructed(self) -> bool {
        self.constructed
    }

    /// Returns the inner number for an identifier in inner position.
    ///
    /// Only universal and application tags have an inner number. Returns
    /// `None` for the other classes as well as for application numbers that
    /// fall outside the inner number space.
    pub fn inner_number(self) -> Option<InnerNumber> {
        match self.class() {
            Class::Universal => Some(InnerNumber(self.number())),
            Class::Application => InnerNumber::application(self.number()),
            Class::Context | Class::Private => None,
        }
    }

    /// Takes the identifier octets from the beginning of a buffer.
    ///
    /// Returns `Ok(None)` if the source ends before the first octet. If it
    /// ends in the middle of the identifier, returns an error.
    pub async fn take_opt_from<S: Source>(
        buf: &mut ReadBuffer<S>
    ) -> Result<Option<Self>, Error> {
        let start = buf.pos();
        let first = match buf.take_opt_u8().await? {
            Some(first) => first,
            None => return Ok(None)
        };
        let class = Class::from_u8(first);
        let constructed = first & Self::CONSTRUCTED_MASK != 0;

        let number = if first & Self::SINGLEBYTE_DATA_MASK
            == Self::SINGLEBYTE_DATA_MASK
        {
            let mut number = 0u32;
            loop {
                let octet = buf.take_u8().await?;
                number = reloid::push_octet(number, octet).ok_or_else(|| {
                    Error::content(
                        "number or subidentifier exceeds expected range",
                        start
                    )
                })?;
                if octet & 0x80 == 0 {
                    break number
                }
            }
        }
        else {
            u32::from(first & Self::SINGLEBYTE_DATA_MASK)
        };
        Ok(Some(Self::new(EmberId::new(class, number), constructed)))
    }

    /// Takes the identifier octets from the beginning of a buffer.
    ///
    /// Returns an unexpected end-of-stream error if the source has ended.
    pub async fn take_from<S: Source>(
        buf: &mut ReadBuffer<S>
    ) -> Result<Self, Error> {
        let pos = buf.pos();
        match Self::take_opt_from(buf).await? {
            Some(res) => Ok(res),
            None => Err(Error::unexpected_end(pos))
        }
    }

    /// Returns the number of octets of the encoded form.
    pub fn encoded_len(self) -> usize {
        if self.number() <= Self::MAX_SINGLEBYTE_NUMBER {
            1
        }
        else {
            1 + reloid::subidentifier_len(self.number())
        }
    }

    /// Appends the encoded identifier octets to a target.
    pub fn append_encoded(self, target: &mut impl Extend<u8>) {
        let mut first = self.class().into_u8();
        if self.constructed {
            first |= Self::CONSTRUCTED_MASK
        }
        if self.number() <= Self::MAX_SINGLEBYTE_NUMBER {
            target.extend([first | self.number() as u8]);
        }
        else {
            target.extend([first | Self::SINGLEBYTE_DATA_MASK]);
            reloid::append_subidentifier(self.number(), target);
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.constructed {
            write!(f, "{} (constructed)", self.id)
        }
        else {
            fmt::Display::fmt(&self.id, f)
        }
    }
}


//------------ InnerNumber ---------------------------------------------------

/// The type of a value in the unified inner number space.
///
/// The inner identifier of a data value tells its actual type. It is either
/// one of the universal types or an application-defined type. Both are
/// mapped onto a single number: universal types keep their tag number while
/// application types are shifted up by [`FIRST_APPLICATION`].
///
/// The stream reader also uses the number to signal the end of a container
/// via [`END_CONTAINER`].
///
/// [`FIRST_APPLICATION`]: Self::FIRST_APPLICATION
/// [`END_CONTAINER`]: Self::END_CONTAINER
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InnerNumber(u32);

impl InnerNumber {
    /// The pseudo type reported at the end of a container.
    ///
    /// This is the number of the universal end-of-contents tag, which never
    /// appears as the type of a data value.
    pub const END_CONTAINER: Self = InnerNumber(0);

    /// The BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = InnerNumber(1);

    /// The INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = InnerNumber(2);

    /// The OCTET STRING type, UNIVERSAL 4.
    pub const OCTETSTRING: Self = InnerNumber(4);

    /// The REAL type, UNIVERSAL 9.
    pub const REAL: Self = InnerNumber(9);

    /// The UTF8String type, UNIVERSAL 12.
    pub const UTF8_STRING: Self = InnerNumber(12);

    /// The RELATIVE-OID type, UNIVERSAL 13.
    pub const RELATIVE_OBJECT_IDENTIFIER: Self = InnerNumber(13);

    /// The SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = InnerNumber(16);

    /// The SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = InnerNumber(17);

    /// The inner number of APPLICATION 0.
    pub const FIRST_APPLICATION: Self = InnerNumber(1 << 30);

    /// Creates an inner number from its raw value.
    pub const fn new(number: u32) -> Self {
        InnerNumber(number)
    }

    /// Returns the inner number of an application-defined type.
    ///
    /// Returns `None` if the number is too large for the inner number
    /// space.
    pub const fn application(number: u32) -> Option<Self> {
        match number.checked_add(Self::FIRST_APPLICATION.0) {
            Some(res) => Some(InnerNumber(res)),
            None => None,
        }
    }

    /// Returns the raw value.
    pub const fn into_u32(self) -> u32 {
        self.0
    }

    /// Returns whether this is an application-defined type.
    pub const fn is_application(self) -> bool {
        self.0 >= Self::FIRST_APPLICATION.0
    }

    /// Returns whether values of this type are containers.
    ///
    /// These are SEQUENCE, SET, and all application-defined types.
    pub const fn is_container(self) -> bool {
        self.0 == Self::SEQUENCE.0 || self.0 == Self::SET.0
            || self.is_application()
    }

    /// Returns whether values of this type have primitive contents.
    pub const fn is_primitive(self) -> bool {
        matches!(self.0, 1 | 2 | 4 | 9 | 12 | 13)
    }

    /// Returns the identifier octets for a value of this type.
    ///
    /// Returns `None` for [`END_CONTAINER`][Self::END_CONTAINER].
    pub fn inner_ident(self) -> Option<Ident> {
        if self.is_application() {
            Some(Ident::new(
                EmberId::application(self.0 - Self::FIRST_APPLICATION.0),
                true
            ))
        }
        else if self == Self::END_CONTAINER {
            None
        }
        else {
            Some(Ident::new(EmberId::universal(self.0), self.is_container()))
        }
    }
}

impl From<InnerNumber> for u32 {
    fn from(number: InnerNumber) -> u32 {
        number.0
    }
}

impl fmt::Display for InnerNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InnerNumber::END_CONTAINER => f.write_str("End-of-container"),
            InnerNumber::BOOLEAN => f.write_str("Boolean"),
            InnerNumber::INTEGER => f.write_str("Integer"),
            InnerNumber::OCTETSTRING => f.write_str("Octetstring"),
            InnerNumber::REAL => f.write_str("Real"),
            InnerNumber::UTF8_STRING => f.write_str("UTF8String"),
            InnerNumber::RELATIVE_OBJECT_IDENTIFIER => {
                f.write_str("RelativeObjectIdentifier")
            }
            InnerNumber::SEQUENCE => f.write_str("Sequence"),
            InnerNumber::SET => f.write_str("Set"),
            number if number.is_application() => {
                write!(f, "A-{}", number.0 - Self::FIRST_APPLICATION.0)
            }
            number => write!(f, "U-{}", number.0)
        }
    }
}


//------------ ParseEmberIdError ---------------------------------------------

/// A string didn’t contain a valid tag.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid identifier")]
pub struct ParseEmberIdError(());


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::async_support::complete;
    use crate::decode::SliceSource;
    use crate::error::ErrorKind;
    use super::*;

    const CLASSES: &[Class] = &[
        Class::Universal, Class::Application, Class::Context, Class::Private
    ];

    fn encode(ident: Ident) -> Vec<u8> {
        let mut res = Vec::new();
        ident.append_encoded(&mut res);
        assert_eq!(res.len(), ident.encoded_len());
        res
    }

    fn decode(data: &[u8]) -> Result<Option<Ident>, Error> {
        let mut buf = ReadBuffer::new(SliceSource::new(data), 16);
        let res = complete(Ident::take_opt_from(&mut buf))?;
        assert_eq!(buf.available(), 0, "trailing data");
        Ok(res)
    }

    #[test]
    fn encode_single_octet() {
        assert_eq!(
            encode(Ident::new(EmberId::application(0), true)), b"\x60"
        );
        assert_eq!(
            encode(Ident::new(EmberId::ctx(0), true)), b"\xa0"
        );
        assert_eq!(
            encode(Ident::new(EmberId::universal(16), true)), b"\x30"
        );
        assert_eq!(
            encode(Ident::new(EmberId::universal(12), false)), b"\x0c"
        );
        assert_eq!(
            encode(Ident::new(EmberId::private(30), false)), b"\xde"
        );
    }

    #[test]
    fn encode_multi_octet() {
        assert_eq!(
            encode(Ident::new(EmberId::application(31), false)),
            b"\x5f\x1f"
        );
        assert_eq!(
            encode(Ident::new(EmberId::application(0x7f), true)),
            b"\x7f\x7f"
        );
        assert_eq!(
            encode(Ident::new(EmberId::ctx(0x80), false)),
            b"\x9f\x81\x00"
        );
        assert_eq!(
            encode(Ident::new(EmberId::universal(u32::MAX), false)),
            b"\x1f\x8f\xff\xff\xff\x7f"
        );
    }

    #[test]
    fn decode_round_trip() {
        let numbers = [
            0, 1, 29, 30, 31, 32, 0x7f, 0x80, 0x3fff, 0x4000, 0x1f_ffff,
            0x20_0000, 0x0fff_ffff, 0x1000_0000, u32::MAX
        ];
        for &class in CLASSES {
            for &number in &numbers {
                for &constructed in &[false, true] {
                    let ident = Ident::new(
                        EmberId::new(class, number), constructed
                    );
                    assert_eq!(
                        decode(&encode(ident)).unwrap(), Some(ident)
                    );
                }
            }
        }
    }

    #[test]
    fn decode_failures() {
        assert_eq!(decode(b"").unwrap(), None);
        assert_eq!(
            decode(b"\x7f\x81").unwrap_err().kind(),
            ErrorKind::UnexpectedEnd
        );
        let err = decode(b"\x7f\x90\x80\x80\x80\x00").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Content);
        assert_eq!(
            err.to_string(),
            "number or subidentifier exceeds expected range at position 0"
        );
    }

    #[test]
    fn inner_numbers() {
        assert_eq!(
            Ident::new(EmberId::universal(2), false).inner_number(),
            Some(InnerNumber::INTEGER)
        );
        assert_eq!(
            Ident::new(EmberId::application(3), true).inner_number(),
            InnerNumber::application(3)
        );
        assert_eq!(
            Ident::new(EmberId::ctx(3), true).inner_number(), None
        );
        assert_eq!(
            Ident::new(EmberId::private(3), true).inner_number(), None
        );
        assert_eq!(
            Ident::new(EmberId::application(u32::MAX), true).inner_number(),
            None
        );
        assert_eq!(
            InnerNumber::application(0), Some(InnerNumber::FIRST_APPLICATION)
        );
        assert!(InnerNumber::SET.is_container());
        assert!(InnerNumber::FIRST_APPLICATION.is_container());
        assert!(!InnerNumber::REAL.is_container());
        assert!(InnerNumber::REAL.is_primitive());
        assert!(!InnerNumber::END_CONTAINER.is_primitive());
        assert_eq!(InnerNumber::END_CONTAINER.inner_ident(), None);
        assert_eq!(
            InnerNumber::SEQUENCE.inner_ident(),
            Some(Ident::new(EmberId::universal(16), true))
        );
        assert_eq!(
            InnerNumber::application(5).and_then(InnerNumber::inner_ident),
            Some(Ident::new(EmberId::application(5), true))
        );
        assert_eq!(
            InnerNumber::application(5).unwrap().to_string(), "A-5"
        );
        assert_eq!(InnerNumber::UTF8_STRING.to_string(), "UTF8String");
    }

    #[test]
    fn display_and_parse() {
        for &class in CLASSES {
            for &number in &[0, 1, 234, u32::MAX] {
                let id = EmberId::new(class, number);
                assert_eq!(id.to_string().parse::<EmberId>(), Ok(id));
            }
        }
        assert_eq!(EmberId::application(2).to_string(), "A-2");
        assert_eq!(EmberId::ctx(0).to_string(), "C-0");
        assert_eq!("P-7".parse::<EmberId>(), Ok(EmberId::private(7)));

        for s in &[
            "", "U", "U-", "S-234", "U+234", "P--234", "C-+234", "A- 1",
            "A-12a", "a-1", "C-99999999999999999999", "C-4294967296",
        ] {
            assert!(s.parse::<EmberId>().is_err(), "{s} parsed");
        }
    }
}
