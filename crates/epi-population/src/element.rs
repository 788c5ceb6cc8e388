//! Shared identity for everything that has a location.

use epi_core::{Coordinate, Uid};

/// Identity and position common to hosts and places.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub uid:        Uid,
    pub name:       String,
    pub coordinate: Coordinate,
}

/// Mints [`Uid`]s in creation order.  One per population, so uids are unique
/// and monotonic within a model.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UidSource {
    next: u64,
}

impl UidSource {
    pub fn mint(&mut self) -> Uid {
        let uid = Uid(self.next);
        self.next += 1;
        uid
    }

    /// Mint a uid and wrap it in an [`Element`].
    pub fn element(&mut self, name: impl Into<String>, coordinate: Coordinate) -> Element {
        Element { uid: self.mint(), name: name.into(), coordinate }
    }

    /// Number of uids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
