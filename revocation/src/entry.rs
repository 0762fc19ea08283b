use std::fmt;

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use log::trace;
use pkix_types::SerialNumber;
use serde::Serialize;

use crate::{
    error::{Cause, Error, Field, Result},
    name_parser::{DerNameParser, NameParser, format_rdns},
};

const FIELD_SEPARATOR: char = ' ';
const ISSUER_FIELD: usize = 1;
const SERIAL_FIELD: usize = 3;

/// Standard alphabet, padding optional, stray trailing bits ignored.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A successfully decoded revocation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEntry {
    pub issuer: String,
    pub serial: String,
}

impl fmt::Display for DecodedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "issuer: {} serial: {}", self.issuer, self.serial)
    }
}

/// Decodes revocation lines with a pluggable Distinguished Name parser.
///
/// A line is split on single spaces. Field 1 holds the base64 DER issuer
/// Name and field 3 the base64 serial number; every other field is ignored.
#[derive(Debug, Clone)]
pub struct LineDecoder<P = DerNameParser> {
    parser: P,
}

impl Default for LineDecoder<DerNameParser> {
    fn default() -> Self {
        Self::new(DerNameParser)
    }
}

impl<P: NameParser> LineDecoder<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn decode(&self, line: &str) -> Result<DecodedEntry> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let (Some(issuer), Some(serial)) = (fields.get(ISSUER_FIELD), fields.get(SERIAL_FIELD))
        else {
            return Err(Error::MalformedLine {
                fields: fields.len(),
            });
        };

        let der = BASE64
            .decode(issuer)
            .map_err(|e| Error::decode(Field::Issuer, e))?;
        let issuer = self.decode_name(Field::Issuer, &der)?;
        let serial = decode_serial(serial)?;
        trace!("decoded issuer {issuer} with serial {serial}");

        Ok(DecodedEntry { issuer, serial })
    }

    /// Renders a DER encoded Name, attributing failures to `field`.
    pub(crate) fn decode_name(&self, field: Field, der: &[u8]) -> Result<String> {
        let rdns = self
            .parser
            .parse_name(der)
            .map_err(|e| Error::decode(field, Cause::Name(Box::new(e))))?;
        Ok(format_rdns(&rdns))
    }
}

/// Decodes a single line with the DER backed parser.
pub fn decode_line(line: &str) -> Result<DecodedEntry> {
    LineDecoder::default().decode(line)
}

fn decode_serial(field: &str) -> Result<String> {
    let bytes = BASE64
        .decode(field)
        .map_err(|e| Error::decode(Field::Serial, e))?;
    Ok(SerialNumber::from_bytes(bytes).format_hex())
}
