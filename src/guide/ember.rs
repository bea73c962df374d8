//! A short introduction to EmBER.
//!
//! # BER in a Nutshell
//!
//! The _Basic Encoding Rules_ (BER) defined in ITU-T recommendation
//! [X.690] encode each value as a sequence of identifier octets, length
//! octets, and content octets.
//!
//! The identifier consists of a class, a flag whether the value is
//! _primitive,_ i.e., its content are the encoded value itself, or
//! _constructed,_ i.e., its content is a sequence of further values, and a
//! number. There are four classes: universal, application,
//! context-specific, and private. The universal class is used for the
//! types defined by ASN.1 itself, the number identifies the type.
//!
//! In the first identifier octet, the class occupies the top two bits
//! and the constructed flag is bit 5. Numbers up to 30 are kept in the
//! lower five bits. For larger numbers, these bits are all set and the
//! number follows in groups of seven bits, most significant group first,
//! with the top bit of each octet set if another octet follows.
//!
//! The length is either _definite_ or _indefinite._ A definite length up
//! to 127 is encoded in a single octet. Larger lengths are encoded in
//! as few big-endian octets as possible preceded by an octet of `0x80`
//! plus their number. An indefinite length is encoded as a single octet of
//! `0x80`. Its content ends with a value of all zeros, the end-of-contents.
//!
//! [X.690]: https://www.itu.int/rec/T-REC-X.690-201508-I/en
//!
//!
//! # The EmBER Profile
//!
//! Ember+ uses only a subset of BER and adds a rule of its own. Every data
//! value is wrapped in a constructed value with a context-specific or
//! application identifier. This _outer identifier_ names the field of the
//! enclosing container the value represents. Its content is a single
//! value with an _inner identifier_ stating the type of the value.
//!
//! The types available are:
//!
//! | Type                    | Inner identifier     | Inner number       |
//! |-------------------------|----------------------|--------------------|
//! | BOOLEAN                 | `U-1`                | 1                  |
//! | INTEGER                 | `U-2`                | 2                  |
//! | OCTET STRING            | `U-4`                | 4                  |
//! | REAL                    | `U-9`                | 9                  |
//! | UTF8String              | `U-12`               | 12                 |
//! | RELATIVE-OID            | `U-13`               | 13                 |
//! | SEQUENCE                | `U-16`, constructed  | 16                 |
//! | SET                     | `U-17`, constructed  | 17                 |
//! | application-defined     | `A-n`, constructed   | 2<sup>30</sup> + n |
//!
//! The crate describes the type of a value through its _inner number_
//! shown in the last column, represented by the type
//! [`InnerNumber`][crate::InnerNumber]. The inner numbers of the
//! application-defined types start at
//! [`InnerNumber::FIRST_APPLICATION`][crate::InnerNumber::FIRST_APPLICATION]
//! so that they can’t clash with the universal types.
//!
//! SEQUENCE, SET, and the application-defined types are _containers._
//! Their content is a sequence of further data values, each again wrapped
//! in an outer identifier. Containers are usually encoded with indefinite
//! length. Closing such a container takes two end-of-contents values: one
//! for the inner and one for the outer identifier.
//!
//! Identifiers are written as a class letter followed by a dash and the
//! number, e.g., `C-1` for context-specific tag 1 or `A-0` for application
//! tag 0. The type [`EmberId`][crate::EmberId] can be converted to and from
//! this notation.
//!
//!
//! # Some Examples
//!
//! The boolean value true as application field 0:
//!
//! ```text
//! 60 03          outer identifier A-0, constructed, length 3
//!    01 01 FF    BOOLEAN, length 1, true
//! ```
//!
//! An empty SEQUENCE in field A-0, first with definite and then with
//! indefinite length:
//!
//! ```text
//! 60 02 30 00
//! 60 80 30 80 00 00 00 00
//! ```
//!
//! The content of primitive values follows plain BER with two twists:
//! integers use the minimal number of octets, and REAL values are encoded
//! with the exponent of the leading one bit. The details are documented
//! in the modules [`int`][crate::int] and [`real`][crate::real].
