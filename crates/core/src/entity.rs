//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products, product prices and gift cards are entities: two rows with the same
/// values but different ids are different records.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
