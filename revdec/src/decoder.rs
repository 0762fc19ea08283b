//! Decoder trait for type-safe conversions.
//!
//! `Decoder<T, D>` converts a source `T` into a destination `D`. The marker
//! trait `DecodableFrom<T>` has to be implemented by `D` for the conversion
//! to exist, so only the links of the decoding chain that were declared on
//! purpose can be called.
//!
//! ```no_run
//! use revdec::decoder::{DecodableFrom, Decoder};
//!
//! struct Field(Vec<u8>);
//! struct Text(String);
//!
//! #[derive(Debug)]
//! struct FieldError;
//!
//! impl DecodableFrom<Field> for Text {}
//!
//! impl Decoder<Field, Text> for Field {
//!     type Error = FieldError;
//!
//!     fn decode(&self) -> Result<Text, Self::Error> {
//!         Ok(Text(String::from_utf8_lossy(&self.0).into_owned()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. When a source has several destinations
/// (an `Element` can become a `Name`, an RDN or an attribute), the
/// destination is picked by the binding's type annotation:
///
/// ```ignore
/// let name: Name = element.decode()?;
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` does not hold a valid encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// This trait has no methods. It only exists so that a `Decoder` impl cannot
/// be written for a pair of types that was not declared decodable.
pub trait DecodableFrom<T> {}
