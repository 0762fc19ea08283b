use std::fmt;

use base64::DecodeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The field of an entry a decoding failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Issuer,
    Serial,
    Subject,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Issuer => write!(f, "issuer"),
            Field::Serial => write!(f, "serial"),
            Field::Subject => write!(f, "subject"),
        }
    }
}

/// Underlying reason a field could not be decoded.
#[derive(Debug, Error)]
pub enum Cause {
    #[error("base64: {0}")]
    Base64(#[from] DecodeError),
    #[error("distinguished name: {0}")]
    Name(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum StorageKeyError {
    #[error("base64: {0}")]
    Base64(#[from] DecodeError),
    #[error("unknown key prefix")]
    UnknownPrefix,
    #[error("cannot split name from key: {0}")]
    Der(#[from] der::error::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed line: expected at least 4 fields, got {fields}")]
    MalformedLine { fields: usize },
    #[error("cannot decode {field} field: {source}")]
    Decode { field: Field, source: Cause },
    #[error("cert_storage key: {0}")]
    StorageKey(#[from] StorageKeyError),
}

impl Error {
    pub(crate) fn decode(field: Field, cause: impl Into<Cause>) -> Self {
        Error::Decode {
            field,
            source: cause.into(),
        }
    }

    /// The field the failure is attributed to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::Decode { field, .. } => Some(*field),
            Error::MalformedLine { .. } | Error::StorageKey(_) => None,
        }
    }
}
