//! Error types for PKIX types

use thiserror::Error;

/// Result type for PKIX types operations
pub type Result<T> = std::result::Result<T, Error>;

/// PKIX types error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    // Name errors
    #[error("Name: expected SEQUENCE")]
    NameExpectedSequence,
    #[error("Name: no DER element")]
    NameMissing,
    #[error("Name: {0} unexpected element(s) after the name")]
    NameTrailingData(usize),

    // RelativeDistinguishedName errors
    #[error("RelativeDistinguishedName: expected SET")]
    RdnExpectedSet,

    // AttributeTypeAndValue errors
    #[error("AttributeTypeAndValue: expected SEQUENCE")]
    AttributeTypeAndValueExpectedSequence,
    #[error("AttributeTypeAndValue: expected OBJECT IDENTIFIER for attribute type")]
    AttributeTypeAndValueExpectedOid,
    #[error("AttributeTypeAndValue: expected 2 elements")]
    AttributeTypeAndValueInvalidElementCount,
    #[error("AttributeValue: constructed values are not supported")]
    AttributeValueConstructed,

    /// ASN.1 encoding/decoding error
    #[error("ASN.1 error: {0}")]
    ASN1Error(#[from] asn1::error::Error),
}
