//! Distinguished Name parsing seam.
//!
//! The line decoder only needs "DER bytes in, ordered (short name, value)
//! pairs out". `NameParser` is that contract; `DerNameParser` fulfils it
//! with the workspace's DER stack.

use asn1::ASN1Object;
use pkix_types::Name;
use revdec::decoder::Decoder;

/// One attribute of a Distinguished Name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdnAttribute {
    pub short_name: String,
    /// Value octets, expected to be UTF-8 but not validated.
    pub value: Vec<u8>,
}

impl RdnAttribute {
    pub fn new(short_name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            short_name: short_name.into(),
            value: value.into(),
        }
    }
}

pub trait NameParser {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Parses a DER encoded Name into its attributes, flattened in encoding order.
    fn parse_name(&self, der: &[u8]) -> Result<Vec<RdnAttribute>, Self::Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DerNameParser;

impl NameParser for DerNameParser {
    type Error = pkix_types::Error;

    fn parse_name(&self, der: &[u8]) -> pkix_types::Result<Vec<RdnAttribute>> {
        let obj: ASN1Object = der.decode()?;
        let name: Name = obj.decode()?;
        Ok(name
            .attributes()
            .map(|attr| {
                RdnAttribute::new(attr.short_name(), attr.attribute_value.utf8_bytes())
            })
            .collect())
    }
}

/// Renders attributes as `/key=value` segments.
///
/// Values that are not valid UTF-8 are decoded lossily, so an attribute is
/// never dropped.
pub fn format_rdns(rdns: &[RdnAttribute]) -> String {
    rdns.iter()
        .map(|rdn| format!("/{}={}", rdn.short_name, String::from_utf8_lossy(&rdn.value)))
        .collect()
}
