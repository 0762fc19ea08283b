//! Trait for types that have OIDs with conventional names

/// Trait for types that have OIDs with conventional/standard names
///
/// For example, an attribute with OID `2.5.4.3` has the conventional short name `CN`.
pub trait OidName {
    /// Returns the conventional name for this type's OID, if it has one
    fn oid_name(&self) -> Option<&'static str>;
}
