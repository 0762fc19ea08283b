//! cert_storage revocation keys.
//!
//! Keys are stored base64 encoded and come in two shapes:
//!
//! - `is` followed by the DER issuer Name and the serial number octets
//! - `spk` followed by the DER subject Name and the SHA-256 hash of the
//!   subject public key
//!
//! The Name is self-delimiting, so everything after its TLV is the serial
//! or the hash.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use der::split_tlv;
use pkix_types::SerialNumber;
use serde::Serialize;

use crate::{
    batch::{Report, ReportEntry, decode_lines},
    entry::{BASE64, LineDecoder},
    error::{Field, Result, StorageKeyError},
    name_parser::NameParser,
};

const PREFIX_ISSUER_SERIAL: &[u8] = b"is";
const PREFIX_SUBJECT_PUBLIC_KEY: &[u8] = b"spk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKey {
    IssuerSerial { issuer: Vec<u8>, serial: Vec<u8> },
    SubjectPublicKey { subject: Vec<u8>, pub_key_hash: Vec<u8> },
}

impl StorageKey {
    pub fn from_bytes(key: &[u8]) -> std::result::Result<Self, StorageKeyError> {
        if let Some(rest) = key.strip_prefix(PREFIX_ISSUER_SERIAL) {
            let (issuer, serial) = split_tlv(rest)?;
            return Ok(StorageKey::IssuerSerial {
                issuer: issuer.to_vec(),
                serial: serial.to_vec(),
            });
        }
        if let Some(rest) = key.strip_prefix(PREFIX_SUBJECT_PUBLIC_KEY) {
            let (subject, pub_key_hash) = split_tlv(rest)?;
            return Ok(StorageKey::SubjectPublicKey {
                subject: subject.to_vec(),
                pub_key_hash: pub_key_hash.to_vec(),
            });
        }
        Err(StorageKeyError::UnknownPrefix)
    }

    pub fn from_base64(key: &str) -> std::result::Result<Self, StorageKeyError> {
        Self::from_bytes(&BASE64.decode(key)?)
    }

    /// Renders the key's Name with `decoder`'s parser.
    pub fn describe<P: NameParser>(&self, decoder: &LineDecoder<P>) -> Result<StorageEntry> {
        match self {
            StorageKey::IssuerSerial { issuer, serial } => Ok(StorageEntry::IssuerSerial {
                issuer: decoder.decode_name(Field::Issuer, issuer)?,
                serial: SerialNumber::from_bytes(serial.clone()).format_hex(),
            }),
            StorageKey::SubjectPublicKey {
                subject,
                pub_key_hash,
            } => Ok(StorageEntry::SubjectPublicKey {
                subject: decoder.decode_name(Field::Subject, subject)?,
                pub_key_hash: STANDARD.encode(pub_key_hash),
            }),
        }
    }
}

/// Printable form of a [`StorageKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageEntry {
    IssuerSerial {
        issuer: String,
        serial: String,
    },
    SubjectPublicKey {
        subject: String,
        pub_key_hash: String,
    },
}

impl fmt::Display for StorageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEntry::IssuerSerial { issuer, serial } => {
                write!(f, "issuer: {issuer} serial: {serial}")
            }
            StorageEntry::SubjectPublicKey {
                subject,
                pub_key_hash,
            } => write!(f, "subject: {subject} pubKeyHash: {pub_key_hash}"),
        }
    }
}

impl ReportEntry for StorageEntry {
    const KIND: &'static str = "key";
}

impl<P: NameParser> LineDecoder<P> {
    pub fn decode_storage_key(&self, key: &str) -> Result<StorageEntry> {
        StorageKey::from_base64(key)?.describe(self)
    }

    pub fn decode_storage_keys(&self, input: &str) -> Vec<Report<StorageEntry>> {
        decode_lines(input, |line| self.decode_storage_key(line))
    }
}

/// Decodes one base64 key per line with the DER backed parser.
pub fn decode_storage_keys(input: &str) -> Vec<Report<StorageEntry>> {
    LineDecoder::default().decode_storage_keys(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::RejectingParser;
    use crate::error::Error;
    use rstest::rstest;

    const IS_KEY: &str = "aXMwKTEQMA4GA1UEAwwHRXhhbXBsZTEVMBMGA1UECgwMRXhhbXBsZSBDb3JwGis=";
    const SPK_KEY: &str = "c3BrMCkxEDAOBgNVBAMMB0V4YW1wbGUxFTATBgNVBAoMDEV4YW1wbGUgQ29ycAABAgMEBQYHCAkKCwwNDg8QERITFBUWFxgZGhscHR4f";

    #[test]
    fn test_from_bytes_issuer_serial() {
        let mut key = b"is".to_vec();
        key.extend_from_slice(&[0x30, 0x00, 0x01, 0x02]);

        let parsed = StorageKey::from_bytes(&key).unwrap();

        assert_eq!(
            StorageKey::IssuerSerial {
                issuer: vec![0x30, 0x00],
                serial: vec![0x01, 0x02],
            },
            parsed
        );
    }

    #[rstest]
    #[case::issuer_serial(IS_KEY, "issuer: /CN=Example/O=Example Corp serial: 1a2b")]
    #[case::subject_public_key(
        SPK_KEY,
        "subject: /CN=Example/O=Example Corp pubKeyHash: AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8="
    )]
    fn test_decode_storage_key(#[case] key: &str, #[case] expected: &str) {
        let entry = LineDecoder::default().decode_storage_key(key).unwrap();
        assert_eq!(expected, entry.to_string());
    }

    #[rstest]
    #[case::not_base64("!!")]
    #[case::unknown_prefix("eHgwAA==")]
    #[case::truncated_name("aXMwKQ==")]
    fn test_decode_storage_key_error(#[case] key: &str) {
        let err = LineDecoder::default().decode_storage_key(key).unwrap_err();
        assert!(matches!(err, Error::StorageKey(_)));
    }

    #[test]
    fn test_subject_failure_is_attributed_to_subject() {
        let decoder = LineDecoder::new(RejectingParser);
        let err = decoder.decode_storage_key(SPK_KEY).unwrap_err();
        assert_eq!(Some(Field::Subject), err.field());
    }

    #[test]
    fn test_decode_storage_keys_batch() {
        let input = format!("{IS_KEY}\n\nnot-a-key\r\n{SPK_KEY}\n");

        let reports = decode_storage_keys(&input);

        assert_eq!(3, reports.len());
        assert!(reports[0].is_decoded());
        assert_eq!("Couldn't decode key: not-a-key", reports[1].to_string());
        assert!(reports[2].is_decoded());
    }
}
