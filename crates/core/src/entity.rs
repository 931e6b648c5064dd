//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record the console lists is addressed by an immutable identifier
/// that is unique within its collection.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + Send
        + Sync;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
