//! Identity for persisted records.

/// A record addressed by an id that stays fixed across updates.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;

    /// True if this record carries `id`.
    fn has_id(&self, id: Self::Id) -> bool {
        self.id() == id
    }
}
