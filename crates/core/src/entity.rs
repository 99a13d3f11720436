//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Entity identifier. Opaque to the domain; each store decides its own scheme.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether a store has assigned an identifier yet.
    fn has_id(&self) -> bool;
}
