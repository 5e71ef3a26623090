//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Members, expenses and settlements are entities: two records with the same
/// id describe the same thing even if a later edit changed their fields.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
