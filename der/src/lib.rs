use nom::{IResult, Parser, bytes::complete::take, number::complete::be_u8};
use revdec::decoder::{DecodableFrom, Decoder};

pub mod error;

use error::Error;

pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_NUMBER_MASK: u8 = 0x1f;
const LENGTH_LONG_FORM: u8 = 0x80;
const MAX_LENGTH_OCTETS: u8 = 8;
const MAX_DEPTH: usize = 64;

/// A sequence of top level TLVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }
}

impl<'a> DecodableFrom<&'a [u8]> for Der {}

impl<'a> Decoder<&'a [u8], Der> for &'a [u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        parse_all(self)
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        parse_all(self)
    }
}

fn parse_all(mut input: &[u8]) -> Result<Der, Error> {
    let mut elements = Vec::new();
    while !input.is_empty() {
        let (rest, tlv) = Tlv::parse(input)?;
        input = rest;
        elements.push(tlv);
    }
    Ok(Der { elements })
}

/// Splits the first complete TLV off `input`.
///
/// Returns the whole encoding of the first TLV (header included) and the
/// bytes that follow it.
pub fn split_tlv(input: &[u8]) -> Result<(&[u8], &[u8]), Error> {
    let (rest, _) = Tlv::parse(input)?;
    Ok(input.split_at(input.len() - rest.len()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl From<u8> for TagClass {
    fn from(value: u8) -> Self {
        match value >> 6 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u32,
}

impl Tag {
    pub fn new(class: TagClass, constructed: bool, number: u32) -> Self {
        Tag {
            class,
            constructed,
            number,
        }
    }

    pub fn class(&self) -> TagClass {
        self.class
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the universal type this tag denotes, if it is in the universal class.
    pub fn universal(&self) -> Option<UniversalTag> {
        (self.class == TagClass::Universal).then(|| UniversalTag::from(self.number))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UniversalTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    NumericString,
    PrintableString,
    TeletexString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    VisibleString,
    UniversalString,
    BMPString,
    Unimplemented(u32),
}

impl From<u32> for UniversalTag {
    fn from(value: u32) -> Self {
        match value {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x10 => Self::Sequence,
            0x11 => Self::Set,
            0x12 => Self::NumericString,
            0x13 => Self::PrintableString,
            0x14 => Self::TeletexString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            0x1a => Self::VisibleString,
            0x1c => Self::UniversalString,
            0x1e => Self::BMPString,
            _ => Self::Unimplemented(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    length: usize,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Content octets of a primitive TLV.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Nested TLVs of a constructed TLV.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Tlv, Error> {
        Self::parse_nested(input, 0)
    }

    fn parse_nested(input: &[u8], depth: usize) -> IResult<&[u8], Tlv, Error> {
        if depth > MAX_DEPTH {
            return Err(nom::Err::Failure(Error::NestingTooDeep(MAX_DEPTH)));
        }
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = take(length).parse(input)?;

        if tag.is_constructed() {
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, tlv) = Self::parse_nested(data, depth + 1)?;
                data = rest;
                tlvs.push(tlv);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    length,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                length,
                value: Value::Data(data.to_vec()),
            },
        ))
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag, Error> {
    let (mut input, first) = be_u8(input)?;
    let class = TagClass::from(first);
    let constructed = first & TAG_CONSTRUCTED == TAG_CONSTRUCTED;
    let mut number = u32::from(first & TAG_NUMBER_MASK);

    if number == u32::from(TAG_NUMBER_MASK) {
        // high tag number form: base 128, continuation bit on every octet but the last.
        number = 0;
        loop {
            let (rest, b) = be_u8(input)?;
            input = rest;
            number = number
                .checked_mul(128)
                .ok_or(nom::Err::Failure(Error::TagNumberOverflow))?
                | u32::from(b & 0x7f);
            if b & 0x80 == 0 {
                break;
            }
        }
    }

    Ok((
        input,
        Tag {
            class,
            constructed,
            number,
        },
    ))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize, Error> {
    let (input, n) = be_u8(input)?;
    if n & LENGTH_LONG_FORM == 0 {
        // short form: 0-127
        return Ok((input, usize::from(n)));
    }

    // long form
    // First 1 bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let octets = n & 0x7f;
    if octets == 0 {
        return Err(nom::Err::Failure(Error::IndefiniteLength));
    }
    if octets > MAX_LENGTH_OCTETS {
        return Err(nom::Err::Failure(Error::LengthTooLarge(octets)));
    }
    let (input, bs) = take(octets).parse(input)?;
    if bs.first() == Some(&0) {
        return Err(nom::Err::Failure(Error::NonMinimalLength));
    }
    let length = bs.iter().fold(0u64, |n, &b| (n << 8) | u64::from(b));
    if length < u64::from(LENGTH_LONG_FORM) {
        return Err(nom::Err::Failure(Error::NonMinimalLength));
    }
    let length =
        usize::try_from(length).map_err(|_| nom::Err::Failure(Error::LengthTooLarge(octets)))?;

    Ok((input, length))
}
