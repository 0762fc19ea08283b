//! Certificate Serial Number
//!
//! Defined in RFC 5280 Section 4.1.2.2
//!
//! ```asn1
//! CertificateSerialNumber ::= INTEGER
//! ```
//!
//! Revocation entries carry the serial as the bare content octets of the
//! INTEGER, so no sign handling or normalisation is done here: the octets
//! are rendered exactly as they were logged.

use std::fmt;

/// Certificate Serial Number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SerialNumber {
    inner: Vec<u8>,
}

impl SerialNumber {
    /// Create from the raw serial octets.
    ///
    /// # Example
    ///
    /// ```
    /// use pkix_types::SerialNumber;
    ///
    /// let serial = SerialNumber::from_bytes(vec![0x01, 0x02, 0x03]);
    /// assert_eq!(serial.format_hex(), "010203");
    /// ```
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { inner: bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Format as lowercase hex, two digits per octet, no separators.
    ///
    /// # Example
    ///
    /// ```
    /// use pkix_types::SerialNumber;
    ///
    /// let serial = SerialNumber::from_bytes(vec![0x00, 0xc3, 0x54, 0x8e]);
    /// assert_eq!(serial.format_hex(), "00c3548e");
    /// ```
    pub fn format_hex(&self) -> String {
        self.inner.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl From<Vec<u8>> for SerialNumber {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hex())
    }
}
