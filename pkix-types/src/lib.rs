//! PKIX (Public Key Infrastructure using X.509) Common Types
//!
//! The subset of RFC 5280 types needed to read revocation entries:
//! the issuer `Name` with its RDNs, and the certificate serial number.
//!
//! - RFC 5280: Internet X.509 Public Key Infrastructure Certificate and CRL Profile
//! - RFC 4519: Lightweight Directory Access Protocol (LDAP): Schema for User Applications

pub mod error;
pub mod name;
pub mod oid_name;
pub mod serial_number;

pub use error::{Error, Result};
pub use name::{AttributeTypeAndValue, AttributeValue, Name, RelativeDistinguishedName};
pub use oid_name::OidName;
pub use serial_number::SerialNumber;
