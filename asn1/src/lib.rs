use std::borrow::Cow;
use std::{fmt::Display, str::FromStr};

use der::{Der, Tlv, UniversalTag, Value};
use error::Error;
use revdec::decoder::{DecodableFrom, Decoder};

pub mod error;

#[derive(Debug, Clone)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }
}

impl DecodableFrom<Der> for ASN1Object {}

impl Decoder<Der, ASN1Object> for Der {
    type Error = Error;
    fn decode(&self) -> Result<ASN1Object, Error> {
        let elements = self
            .elements()
            .iter()
            .map(Element::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ASN1Object { elements })
    }
}

impl<'a> DecodableFrom<&'a [u8]> for ASN1Object {}

impl<'a> Decoder<&'a [u8], ASN1Object> for &'a [u8] {
    type Error = Error;
    fn decode(&self) -> Result<ASN1Object, Error> {
        let der: Der = self.decode()?;
        der.decode()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(bool),
    Integer(Integer),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    CharacterString(CharacterString),
    Sequence(Vec<Element>),
    Set(Vec<Element>),
    Unimplemented(Tlv),
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self, Self::Error> {
        let Some(universal) = tlv.tag().universal() else {
            // context-specific, application and private tags are kept as raw TLVs.
            return Ok(Element::Unimplemented(tlv.clone()));
        };

        match (universal, tlv.value()) {
            (UniversalTag::Sequence, Value::Tlv(tlvs)) => Ok(Element::Sequence(
                tlvs.iter()
                    .map(Element::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            (UniversalTag::Set, Value::Tlv(tlvs)) => Ok(Element::Set(
                tlvs.iter()
                    .map(Element::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            (_, Value::Tlv(_)) => Ok(Element::Unimplemented(tlv.clone())),
            (UniversalTag::Boolean, Value::Data(data)) => match data.as_slice() {
                [0x00] => Ok(Element::Boolean(false)),
                [0xff] => Ok(Element::Boolean(true)),
                _ => Err(Error::InvalidBoolean),
            },
            (UniversalTag::Integer, Value::Data(data)) => {
                if data.is_empty() {
                    return Err(Error::IntegerNoData);
                }
                Ok(Element::Integer(Integer::from(data.as_slice())))
            }
            (UniversalTag::OctetString, Value::Data(data)) => {
                Ok(Element::OctetString(OctetString::from(data.as_slice())))
            }
            (UniversalTag::Null, Value::Data(data)) => {
                if !data.is_empty() {
                    return Err(Error::NullWithContent);
                }
                Ok(Element::Null)
            }
            (UniversalTag::ObjectIdentifier, Value::Data(data)) => Ok(Element::ObjectIdentifier(
                ObjectIdentifier::try_from(data.as_slice())?,
            )),
            (tag, Value::Data(data)) => match StringKind::from_universal(tag) {
                Some(kind) => Ok(Element::CharacterString(CharacterString::new(
                    kind,
                    data.clone(),
                ))),
                None => Ok(Element::Unimplemented(tlv.clone())),
            },
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::OctetString(os) => write!(f, "OctetString({})", os),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::CharacterString(s) => write!(f, "{:?}({})", s.kind(), s),
            Element::Sequence(seq) => write!(f, "Sequence({:?})", seq),
            Element::Set(set) => write!(f, "Set({:?})", set),
            Element::Unimplemented(tlv) => write!(f, "Unimplemented({:?})", tlv),
        }
    }
}

/// INTEGER content octets, big-endian two's complement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: Vec<u8>,
}

impl Integer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
}

impl From<&[u8]> for Integer {
    fn from(value: &[u8]) -> Self {
        Integer {
            inner: value.to_vec(),
        }
    }
}

impl From<Vec<u8>> for Integer {
    fn from(value: Vec<u8>) -> Self {
        Integer { inner: value }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for b in &self.inner {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.inner
    }
}

impl TryFrom<Vec<u8>> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for v in value.iter() {
            if !pending && *v == 0x80 {
                return Err(Error::ObjectIdentifierNonMinimalEncoding);
            }
            val = val
                .checked_mul(128)
                .ok_or(Error::ObjectIdentifierArcOverflow)?
                | (*v as u64 & 0x7F);
            pending = true;
            if *v & 0x80 == 0 {
                // If the continuation bit is not set, we have reached the end of this value
                subidentifiers.push(val);
                val = 0;
                pending = false;
            }
        }
        if pending {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        // The first subidentifier packs the first two arcs as 40 * X + Y.
        let first = subidentifiers[0];
        let (x, y) = match first {
            0..=39 => (0, first),
            40..=79 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut inner = vec![x, y];
        inner.extend_from_slice(&subidentifiers[1..]);

        Ok(ObjectIdentifier { inner })
    }
}

impl TryFrom<&ObjectIdentifier> for Vec<u8> {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self, Self::Error> {
        if oid.inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }

        let first = oid.inner[0]
            .checked_mul(40)
            .and_then(|n| n.checked_add(oid.inner[1]))
            .ok_or(Error::ObjectIdentifierArcOverflow)?;

        let mut result = Vec::new();
        for v in std::iter::once(first).chain(oid.inner[2..].iter().copied()) {
            let mut encoded = vec![v as u8 & 0x7F];
            let mut value = v >> 7;
            while value > 0 {
                encoded.push(value as u8 & 0x7F | 0x80);
                value >>= 7;
            }
            result.extend(encoded.iter().rev());
        }

        Ok(result)
    }
}

impl TryFrom<ObjectIdentifier> for Vec<u8> {
    type Error = Error;

    fn try_from(oid: ObjectIdentifier) -> Result<Self, Self::Error> {
        Vec::try_from(&oid)
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .inner
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split('.')
            .map(|c| {
                c.parse::<u64>()
                    .map_err(|_| Error::ObjectIdentifierInvalidComponent(c.to_string()))
            })
            .collect::<Result<Vec<u64>, Error>>()?;
        if values.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(ObjectIdentifier { inner: values })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.inner {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Universal character string types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    UTF8String,
    NumericString,
    PrintableString,
    TeletexString,
    IA5String,
    VisibleString,
    UniversalString,
    BMPString,
}

impl StringKind {
    pub fn from_universal(tag: UniversalTag) -> Option<Self> {
        match tag {
            UniversalTag::UTF8String => Some(StringKind::UTF8String),
            UniversalTag::NumericString => Some(StringKind::NumericString),
            UniversalTag::PrintableString => Some(StringKind::PrintableString),
            UniversalTag::TeletexString => Some(StringKind::TeletexString),
            UniversalTag::IA5String => Some(StringKind::IA5String),
            UniversalTag::VisibleString => Some(StringKind::VisibleString),
            UniversalTag::UniversalString => Some(StringKind::UniversalString),
            UniversalTag::BMPString => Some(StringKind::BMPString),
            _ => None,
        }
    }
}

/// A character string kept as its content octets.
///
/// Nothing is validated at decode time. Text is produced on demand by
/// `to_string_lossy`, which substitutes U+FFFD for anything that does not
/// decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterString {
    kind: StringKind,
    bytes: Vec<u8>,
}

impl CharacterString {
    pub fn new(kind: StringKind, bytes: Vec<u8>) -> Self {
        CharacterString { kind, bytes }
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content octets as UTF-8.
    ///
    /// BMPString (UTF-16BE) and UniversalString (UTF-32BE) are transcoded,
    /// every other kind is returned as is.
    pub fn utf8_bytes(&self) -> Cow<'_, [u8]> {
        match self.kind {
            StringKind::BMPString | StringKind::UniversalString => {
                Cow::Owned(self.to_string_lossy().into_bytes())
            }
            _ => Cow::Borrowed(&self.bytes),
        }
    }

    pub fn to_string_lossy(&self) -> String {
        match self.kind {
            StringKind::BMPString => {
                let chunks = self.bytes.chunks_exact(2);
                let odd = !chunks.remainder().is_empty();
                let units = chunks.map(|c| u16::from_be_bytes([c[0], c[1]]));
                let mut s: String = char::decode_utf16(units)
                    .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect();
                if odd {
                    s.push(char::REPLACEMENT_CHARACTER);
                }
                s
            }
            StringKind::UniversalString => {
                let chunks = self.bytes.chunks_exact(4);
                let partial = !chunks.remainder().is_empty();
                let mut s: String = chunks
                    .map(|c| {
                        char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                            .unwrap_or(char::REPLACEMENT_CHARACTER)
                    })
                    .collect();
                if partial {
                    s.push(char::REPLACEMENT_CHARACTER);
                }
                s
            }
            _ => String::from_utf8_lossy(&self.bytes).into_owned(),
        }
    }
}

impl Display for CharacterString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use std::str::FromStr;

    use crate::error::Error;
    use crate::{ASN1Object, CharacterString, Element, Integer, ObjectIdentifier, StringKind};
    use revdec::decoder::Decoder;

    #[rstest(input, expected, case(ObjectIdentifier { inner: vec![0x01, 0x02, 0x03, 0x04]}, "1.2.3.4"))]
    fn test_object_identifier_to_string(input: ObjectIdentifier, expected: &str) {
        let actual = input.to_string();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case("1.2.3.4", ObjectIdentifier { inner: vec![1, 2, 3, 4] }),
        case("2.5.4.3", ObjectIdentifier { inner: vec![2, 5, 4, 3] }),
    )]
    fn test_object_identifier_from_string(input: &str, expected: ObjectIdentifier) {
        let actual = ObjectIdentifier::from_str(input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case("1", Error::ObjectIdentifierTooFewComponents),
        case("1.x.3", Error::ObjectIdentifierInvalidComponent("x".to_string())),
    )]
    fn test_object_identifier_from_string_error(input: &str, expected: Error) {
        let actual = ObjectIdentifier::from_str(input).unwrap_err();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
    // Test case for ISO/ITU-T joint standards (1.2)
    case(vec![0x2A], ObjectIdentifier { inner: vec![1, 2] }),
    // Test case for commonName (2.5.4.3)
    case(vec![0x55, 0x04, 0x03], ObjectIdentifier { inner: vec![2, 5, 4, 3] }),
    // Test case for ITU-T standard (0.9.2342.19200300.100.1.25)
    case(vec![0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x19], ObjectIdentifier { inner: vec![0, 9, 2342, 19200300, 100, 1, 25] }),
    // Test case for multi-byte encoding (1.2.840.113549.1.9.1)
    case(vec![0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x01], ObjectIdentifier { inner: vec![1, 2, 840, 113549, 1, 9, 1] }),
    // Test case for a first subidentifier above 80 (2.100.3)
    case(vec![0x81, 0x34, 0x03], ObjectIdentifier { inner: vec![2, 100, 3] }),
    )]
    fn test_object_identifier_from_bytes(input: Vec<u8>, expected: ObjectIdentifier) {
        let actual = ObjectIdentifier::try_from(input).unwrap();
        assert_eq!(expected.arcs(), actual.arcs());
    }

    #[rstest(input, expected,
        case(vec![], Error::ObjectIdentifierNoData),
        case(vec![0x55, 0x84], Error::ObjectIdentifierIncompleteEncoding),
        case(vec![0x2a, 0x80, 0x01, 0x01], Error::ObjectIdentifierNonMinimalEncoding),
        case(vec![0x80, 0x2a], Error::ObjectIdentifierNonMinimalEncoding),
    )]
    fn test_object_identifier_from_bytes_error(input: Vec<u8>, expected: Error) {
        let actual = ObjectIdentifier::try_from(input).unwrap_err();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
    case(ObjectIdentifier { inner: vec![1, 2] }, vec![0x2A]),
    case(ObjectIdentifier { inner: vec![2, 5, 4, 0] }, vec![0x55, 0x04, 0x00]),
    case(ObjectIdentifier { inner: vec![0, 9, 2342, 19200300, 100, 1, 25] }, vec![0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x19]),
    case(ObjectIdentifier { inner: vec![1, 2, 840, 113549, 1, 9, 1] }, vec![0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x01]),
    )]
    fn test_object_identifier_to_bytes(input: ObjectIdentifier, expected: Vec<u8>) {
        let actual = Vec::<u8>::try_from(input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(kind, input, expected,
        case(StringKind::UTF8String, vec![0xe3, 0x81, 0x82], "あ"),
        case(StringKind::PrintableString, b"Example".to_vec(), "Example"),
        case(StringKind::UTF8String, vec![0x41, 0xff, 0x42], "A\u{fffd}B"),
        case(StringKind::BMPString, vec![0x30, 0xc6, 0x30, 0xb9, 0x30, 0xc8], "テスト"),
        case(StringKind::BMPString, vec![0x00, 0x41, 0x00], "A\u{fffd}"),
        case(StringKind::UniversalString, vec![0x00, 0x00, 0x00, 0x41, 0x00, 0x01, 0xf6, 0x0e], "A😎"),
    )]
    fn test_character_string_to_string_lossy(kind: StringKind, input: Vec<u8>, expected: &str) {
        let s = CharacterString::new(kind, input);
        assert_eq!(expected, s.to_string_lossy());
    }

    #[test]
    fn test_character_string_utf8_bytes() {
        let bmp = CharacterString::new(StringKind::BMPString, vec![0x00, 0x41]);
        let teletex = CharacterString::new(StringKind::TeletexString, vec![0xe9]);

        assert_eq!(b"A".as_slice(), bmp.utf8_bytes().as_ref());
        assert_eq!([0xe9].as_slice(), teletex.utf8_bytes().as_ref());
    }

    #[test]
    fn test_decode_name_like_structure() {
        // SEQUENCE { SET { SEQUENCE { OID 2.5.4.6, PrintableString "JP" } } }
        let input: &[u8] = &[
            0x30, 0x0d, 0x31, 0x0b, 0x30, 0x09, 0x06, 0x03, 0x55, 0x04, 0x06, 0x13, 0x02, 0x4a,
            0x50,
        ];

        let obj: ASN1Object = input.decode().unwrap();

        let expected = Element::Sequence(vec![Element::Set(vec![Element::Sequence(vec![
            Element::ObjectIdentifier(ObjectIdentifier::from_str("2.5.4.6").unwrap()),
            Element::CharacterString(CharacterString::new(
                StringKind::PrintableString,
                b"JP".to_vec(),
            )),
        ])])]);
        assert_eq!(&[expected], obj.elements());
    }

    #[rstest(input, expected,
        case(vec![0x01, 0x01, 0xff], Element::Boolean(true)),
        case(vec![0x02, 0x02, 0x1a, 0x2b], Element::Integer(Integer::from(vec![0x1a, 0x2b]))),
        case(vec![0x05, 0x00], Element::Null),
    )]
    fn test_decode_primitive(input: Vec<u8>, expected: Element) {
        let obj: ASN1Object = input.as_slice().decode().unwrap();
        assert_eq!(&[expected], obj.elements());
    }

    #[rstest(input,
        case::bad_boolean(vec![0x01, 0x01, 0x01]),
        case::empty_integer(vec![0x02, 0x00]),
        case::null_with_content(vec![0x05, 0x01, 0x00]),
        case::bad_der(vec![0x30, 0x80]),
    )]
    fn test_decode_error(input: Vec<u8>) {
        let result: Result<ASN1Object, Error> = input.as_slice().decode();
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_context_specific_is_unimplemented() {
        let input: &[u8] = &[0x80, 0x01, 0x00];
        let obj: ASN1Object = input.decode().unwrap();
        assert!(matches!(obj.elements()[0], Element::Unimplemented(_)));
    }
}
