//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Ordering by ID is also the engine's
//! canonical iteration order, which is what keeps seeded runs reproducible.
//!
//! `HostId`, `PlaceId` and `PathogenId` are dense indices into the owning
//! `Vec`; `AgentId` is a monotonically increasing key into a sparse registry
//! (agents come and go every tick).  `Uid` is the model-wide element
//! identity shared by hosts and places.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": the inner type's maximum.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a host (person) in the population's host store.
    pub struct HostId(u32);
}

typed_id! {
    /// Index of a place (environment) in the place registry.
    pub struct PlaceId(u32);
}

typed_id! {
    /// Key of a live pathogen agent.  Never reused within a model, so the
    /// inner type is 64-bit: a long run mints millions of short-lived agents.
    pub struct AgentId(u64);
}

typed_id! {
    /// Index of a pathogen in the model's pathogen table.
    pub struct PathogenId(u16);
}

typed_id! {
    /// Model-wide element identity, minted in creation order for every host
    /// and place.
    pub struct Uid(u64);
}
