//! Error types for ASN.1 parsing.

use thiserror::Error;

/// Errors that can occur while turning DER into ASN.1 elements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    // Boolean errors
    #[error("invalid boolean")]
    InvalidBoolean,

    // Integer errors
    #[error("INTEGER: no data")]
    IntegerNoData,

    // Null errors
    #[error("NULL: content must be empty")]
    NullWithContent,

    // ObjectIdentifier errors
    #[error("OBJECT IDENTIFIER: no data")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER: subidentifier has a leading 0x80 octet")]
    ObjectIdentifierNonMinimalEncoding,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    ObjectIdentifierTooFewComponents,
    #[error("OBJECT IDENTIFIER: invalid component '{0}'")]
    ObjectIdentifierInvalidComponent(String),
    #[error("OBJECT IDENTIFIER: arc does not fit in 64 bits")]
    ObjectIdentifierArcOverflow,

    // DER errors
    #[error("invalid DER encoding: {0}")]
    FailedToDecodeDer(#[from] der::error::Error),
}
