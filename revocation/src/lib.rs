//! # revocation
//!
//! Decoding of revocation log lines into a human readable form.
//!
//! Each line carries a base64 DER issuer Distinguished Name in field 1 and a
//! base64 serial number in field 3 (fields separated by single spaces):
//!
//! ```
//! use revocation::decode_line;
//!
//! let line = "x MCkxEDAOBgNVBAMMB0V4YW1wbGUxFTATBgNVBAoMDEV4YW1wbGUgQ29ycA== y Gis=";
//! let entry = decode_line(line).unwrap();
//! assert_eq!(
//!     entry.to_string(),
//!     "issuer: /CN=Example/O=Example Corp serial: 1a2b"
//! );
//! ```
//!
//! Batches decode line by line, rendering failures in place:
//!
//! ```
//! use revocation::render_batch;
//!
//! let rendered = render_batch("garbage\n\n");
//! assert_eq!(rendered, vec!["Couldn't decode entry: garbage".to_string()]);
//! ```

#![forbid(unsafe_code)]

pub mod batch;
pub mod entry;
pub mod error;
pub mod name_parser;
pub mod storage_key;

pub use batch::{Report, ReportEntry, decode_batch, non_empty_lines, render_batch};
pub use entry::{DecodedEntry, LineDecoder, decode_line};
pub use error::{Cause, Error, Field, Result, StorageKeyError};
pub use name_parser::{DerNameParser, NameParser, RdnAttribute, format_rdns};
pub use storage_key::{StorageEntry, StorageKey, decode_storage_keys};
