//! Places (environments with a land use) and their registry.

use std::collections::BTreeSet;

use epi_core::{AgentId, Coordinate, LandUse, PlaceId};

use crate::Element;

#[cfg(feature = "fx-hash")]
type UseIndex = rustc_hash::FxHashMap<LandUse, Vec<PlaceId>>;
#[cfg(not(feature = "fx-hash"))]
type UseIndex = std::collections::HashMap<LandUse, Vec<PlaceId>>;

// ── Place ─────────────────────────────────────────────────────────────────────

/// A located container hosts and pathogen agents can occupy.
///
/// The occupant set is not stored here: [`Population`](crate::Population)
/// keeps it as a back-reference index so movement is its single writer.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    pub id:       PlaceId,
    pub element:  Element,
    pub land_use: LandUse,
    /// Capacity-like scale used by the density and environment transmission
    /// terms.  Always `> 0`.
    pub size:     f64,
    /// Environment agents currently deposited here.
    pub(crate) agents: BTreeSet<AgentId>,
}

impl Place {
    #[inline]
    pub fn land_use(&self) -> LandUse {
        self.land_use
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.element.coordinate
    }

    /// `occupants / size`.
    #[inline]
    pub fn density(&self, occupants: usize) -> f64 {
        occupants as f64 / self.size
    }

    pub fn agents(&self) -> &BTreeSet<AgentId> {
        &self.agents
    }
}

// ── PlaceRegistry ─────────────────────────────────────────────────────────────

/// All places in the city, indexed by `PlaceId` and by land use.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceRegistry {
    places: Vec<Place>,
    by_use: UseIndex,
}

impl PlaceRegistry {
    pub(crate) fn push(&mut self, element: Element, land_use: LandUse, size: f64) -> PlaceId {
        let id = PlaceId(self.places.len() as u32);
        self.places.push(Place { id, element, land_use, size, agents: BTreeSet::new() });
        self.by_use.entry(land_use).or_default().push(id);
        id
    }

    #[inline]
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.index())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: PlaceId) -> Option<&mut Place> {
        self.places.get_mut(id.index())
    }

    /// Places with `land_use`, in creation order.
    pub fn with_use(&self, land_use: LandUse) -> &[PlaceId] {
        self.by_use.get(&land_use).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: PlaceId) -> bool {
        id.index() < self.places.len()
    }
}

impl<'a> IntoIterator for &'a PlaceRegistry {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}
