//! Name and related types
//!
//! Defined in RFC 5280 Section 4.1.2.4
//!
//! ```asn1
//! Name ::= CHOICE { -- only one possibility for now --
//!     rdnSequence  RDNSequence
//! }
//!
//! RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
//!
//! RelativeDistinguishedName ::= SET OF AttributeTypeAndValue
//!
//! AttributeTypeAndValue ::= SEQUENCE {
//!     type     AttributeType,
//!     value    AttributeValue
//! }
//!
//! AttributeType ::= OBJECT IDENTIFIER
//! AttributeValue ::= ANY -- DEFINED BY AttributeType
//! ```

use std::borrow::Cow;
use std::fmt;

use asn1::{ASN1Object, CharacterString, Element, ObjectIdentifier};
use revdec::decoder::{DecodableFrom, Decoder};

use crate::OidName;
use crate::error::{Error, Result};

/// X.509 Distinguished Name
///
/// A Name identifies an entity in an X.509 certificate. It consists of
/// a sequence of Relative Distinguished Names (RDNs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub rdn_sequence: Vec<RelativeDistinguishedName>,
}

impl Name {
    /// Create a new Name with the given RDN sequence
    pub fn new(rdn_sequence: Vec<RelativeDistinguishedName>) -> Self {
        Self { rdn_sequence }
    }

    /// Get a reference to the RDN sequence
    pub fn rdn_sequence(&self) -> &[RelativeDistinguishedName] {
        &self.rdn_sequence
    }

    /// Every attribute of every RDN, in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.rdn_sequence
            .iter()
            .flat_map(|rdn| rdn.attributes.iter())
    }
}

/// Slash separated form, one `/key=value` per attribute: `/C=US/O=Example Org`.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in self.attributes() {
            write!(
                f,
                "/{}={}",
                attr.short_name(),
                attr.attribute_value.to_string_lossy()
            )?;
        }
        Ok(())
    }
}

impl DecodableFrom<ASN1Object> for Name {}

impl Decoder<ASN1Object, Name> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<Name> {
        match self.elements() {
            [] => Err(Error::NameMissing),
            [element] => element.decode(),
            [_, rest @ ..] => Err(Error::NameTrailingData(rest.len())),
        }
    }
}

impl DecodableFrom<Element> for Name {}

impl Decoder<Element, Name> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Name> {
        match self {
            Element::Sequence(elements) => {
                let rdn_sequence = elements
                    .iter()
                    .map(|elem| elem.decode())
                    .collect::<Result<Vec<RelativeDistinguishedName>>>()?;
                Ok(Name { rdn_sequence })
            }
            _ => Err(Error::NameExpectedSequence),
        }
    }
}

/// Relative Distinguished Name (RDN)
///
/// A set of attribute-value pairs that together form one component of a Name.
/// Typically contains a single AttributeTypeAndValue, but can contain multiple
/// for multi-valued RDNs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    pub attributes: Vec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    /// Create a new RDN with a single attribute
    pub fn new_single(attribute: AttributeTypeAndValue) -> Self {
        Self {
            attributes: vec![attribute],
        }
    }

    /// Create a new RDN with multiple attributes
    pub fn new(attributes: Vec<AttributeTypeAndValue>) -> Self {
        Self { attributes }
    }
}

impl DecodableFrom<Element> for RelativeDistinguishedName {}

impl Decoder<Element, RelativeDistinguishedName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RelativeDistinguishedName> {
        match self {
            Element::Set(elements) => {
                let attributes = elements
                    .iter()
                    .map(|elem| elem.decode())
                    .collect::<Result<Vec<AttributeTypeAndValue>>>()?;
                Ok(RelativeDistinguishedName { attributes })
            }
            _ => Err(Error::RdnExpectedSet),
        }
    }
}

/// Value of an attribute, kept as the content octets of its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// One of the universal character string types.
    String(CharacterString),
    /// Any other primitive type.
    Other(Vec<u8>),
}

impl AttributeValue {
    /// The value as UTF-8 octets, not validated.
    ///
    /// BMPString and UniversalString values are transcoded first. Everything
    /// else is returned verbatim.
    pub fn utf8_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            AttributeValue::String(s) => s.utf8_bytes(),
            AttributeValue::Other(bytes) => Cow::Borrowed(bytes),
        }
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.utf8_bytes()).into_owned()
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(CharacterString::new(
            asn1::StringKind::UTF8String,
            value.as_bytes().to_vec(),
        ))
    }
}

impl TryFrom<&Element> for AttributeValue {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self> {
        let value = match element {
            Element::CharacterString(s) => AttributeValue::String(s.clone()),
            Element::Boolean(b) => AttributeValue::Other(vec![if *b { 0xff } else { 0x00 }]),
            Element::Integer(i) => AttributeValue::Other(i.as_bytes().to_vec()),
            Element::OctetString(os) => AttributeValue::Other(os.as_bytes().to_vec()),
            Element::Null => AttributeValue::Other(Vec::new()),
            Element::ObjectIdentifier(oid) => AttributeValue::Other(Vec::try_from(oid)?),
            Element::Unimplemented(tlv) => {
                let data = tlv.data().ok_or(Error::AttributeValueConstructed)?;
                AttributeValue::Other(data.to_vec())
            }
            Element::Sequence(_) | Element::Set(_) => {
                return Err(Error::AttributeValueConstructed);
            }
        };
        Ok(value)
    }
}

/// Attribute Type and Value pair
///
/// Represents a single attribute in an X.509 Name, such as CN=example.com
/// or O=Example Organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub attribute_type: ObjectIdentifier,
    pub attribute_value: AttributeValue,
}

impl AttributeTypeAndValue {
    /// OID for commonName (CN)
    pub const OID_COMMON_NAME: &'static str = "2.5.4.3";
    /// OID for surname (SN)
    pub const OID_SURNAME: &'static str = "2.5.4.4";
    /// OID for serialNumber
    pub const OID_SERIAL_NUMBER: &'static str = "2.5.4.5";
    /// OID for countryName (C)
    pub const OID_COUNTRY_NAME: &'static str = "2.5.4.6";
    /// OID for localityName (L)
    pub const OID_LOCALITY_NAME: &'static str = "2.5.4.7";
    /// OID for stateOrProvinceName (ST)
    pub const OID_STATE_OR_PROVINCE_NAME: &'static str = "2.5.4.8";
    /// OID for streetAddress
    pub const OID_STREET_ADDRESS: &'static str = "2.5.4.9";
    /// OID for organizationName (O)
    pub const OID_ORGANIZATION_NAME: &'static str = "2.5.4.10";
    /// OID for organizationalUnitName (OU)
    pub const OID_ORGANIZATIONAL_UNIT_NAME: &'static str = "2.5.4.11";
    /// OID for title
    pub const OID_TITLE: &'static str = "2.5.4.12";
    /// OID for businessCategory
    pub const OID_BUSINESS_CATEGORY: &'static str = "2.5.4.15";
    /// OID for postalCode
    pub const OID_POSTAL_CODE: &'static str = "2.5.4.17";
    /// OID for givenName (GN)
    pub const OID_GIVEN_NAME: &'static str = "2.5.4.42";
    /// OID for initials
    pub const OID_INITIALS: &'static str = "2.5.4.43";
    /// OID for generationQualifier
    pub const OID_GENERATION_QUALIFIER: &'static str = "2.5.4.44";
    /// OID for dnQualifier
    pub const OID_DN_QUALIFIER: &'static str = "2.5.4.46";
    /// OID for pseudonym
    pub const OID_PSEUDONYM: &'static str = "2.5.4.65";
    /// OID for userId (UID)
    pub const OID_USER_ID: &'static str = "0.9.2342.19200300.100.1.1";
    /// OID for domainComponent (DC)
    pub const OID_DOMAIN_COMPONENT: &'static str = "0.9.2342.19200300.100.1.25";
    /// OID for emailAddress (E)
    pub const OID_EMAIL_ADDRESS: &'static str = "1.2.840.113549.1.9.1";

    pub fn new(
        attribute_type: ObjectIdentifier,
        attribute_value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            attribute_type,
            attribute_value: attribute_value.into(),
        }
    }

    /// Short name of the attribute type, or the dotted OID when it has none.
    pub fn short_name(&self) -> String {
        self.oid_name()
            .map(str::to_string)
            .unwrap_or_else(|| self.attribute_type.to_string())
    }
}

impl OidName for AttributeTypeAndValue {
    fn oid_name(&self) -> Option<&'static str> {
        match self.attribute_type.to_string().as_str() {
            Self::OID_COMMON_NAME => Some("CN"),
            Self::OID_SURNAME => Some("SN"),
            Self::OID_SERIAL_NUMBER => Some("serialNumber"),
            Self::OID_COUNTRY_NAME => Some("C"),
            Self::OID_LOCALITY_NAME => Some("L"),
            Self::OID_STATE_OR_PROVINCE_NAME => Some("ST"),
            Self::OID_STREET_ADDRESS => Some("street"),
            Self::OID_ORGANIZATION_NAME => Some("O"),
            Self::OID_ORGANIZATIONAL_UNIT_NAME => Some("OU"),
            Self::OID_TITLE => Some("title"),
            Self::OID_BUSINESS_CATEGORY => Some("businessCategory"),
            Self::OID_POSTAL_CODE => Some("postalCode"),
            Self::OID_GIVEN_NAME => Some("GN"),
            Self::OID_INITIALS => Some("initials"),
            Self::OID_GENERATION_QUALIFIER => Some("generationQualifier"),
            Self::OID_DN_QUALIFIER => Some("dnQualifier"),
            Self::OID_PSEUDONYM => Some("pseudonym"),
            Self::OID_USER_ID => Some("UID"),
            Self::OID_DOMAIN_COMPONENT => Some("DC"),
            Self::OID_EMAIL_ADDRESS => Some("E"),
            _ => None,
        }
    }
}

impl DecodableFrom<Element> for AttributeTypeAndValue {}

impl Decoder<Element, AttributeTypeAndValue> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AttributeTypeAndValue> {
        let Element::Sequence(seq) = self else {
            return Err(Error::AttributeTypeAndValueExpectedSequence);
        };

        let (attribute_type, attribute_value) = match seq.as_slice() {
            [Element::ObjectIdentifier(oid), value_elem] => {
                (oid.clone(), AttributeValue::try_from(value_elem)?)
            }
            [_, _] => {
                return Err(Error::AttributeTypeAndValueExpectedOid);
            }
            _ => {
                return Err(Error::AttributeTypeAndValueInvalidElementCount);
            }
        };

        Ok(AttributeTypeAndValue {
            attribute_type,
            attribute_value,
        })
    }
}
