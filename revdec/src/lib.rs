//! # revdec
//!
//! Core conversion trait shared by the revocation entry decoder crates.
//!
//! Every step from the raw bytes of a log field to a printable issuer name
//! is expressed as a `Decoder` conversion:
//! ```text
//! &[u8] → Der → ASN1Object → Element → Name
//! ```
//!
//! The `der`, `asn1` and `pkix-types` crates each implement one link of the
//! chain, and the `revocation` crate drives it line by line.
//!
//! ## Example
//!
//! ```ignore
//! use revdec::decoder::Decoder;
//! use der::Der;
//! use asn1::ASN1Object;
//!
//! let bytes: &[u8] = &[0x30, 0x00];
//! let der: Der = bytes.decode().unwrap();
//! let asn1: ASN1Object = der.decode().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
