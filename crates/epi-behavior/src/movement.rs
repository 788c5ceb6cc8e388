//! The decision a choice model hands back to the engine.

use epi_core::PlaceId;
use epi_population::Itinerary;

/// What a host wants to do this tick.
///
/// Movements are computed against a read-only snapshot and applied by
/// epi-sim afterwards, in ascending `HostId` order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Keep the current place and itinerary.
    Stay,

    /// Go to `destination` (possibly the current place) and adopt
    /// `itinerary`.
    Relocate {
        destination: PlaceId,
        itinerary:   Itinerary,
    },
}
