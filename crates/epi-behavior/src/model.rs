//! The `ChoiceModel` trait, the extension point for host movement.

use epi_core::{HostRng, PlaceCategory, PlaceId};
use epi_population::{Host, PlaceRegistry};

use crate::{MoveContext, Movement};

/// Pluggable host movement.
///
/// # Thread safety
///
/// With the `parallel` feature, epi-sim calls `choose` for many hosts at once
/// on Rayon, so implementations must be `Send + Sync`.  Per-host state lives
/// in [`Host::itinerary`] (returned through [`Movement::Relocate`]), not in
/// the model.
pub trait ChoiceModel: Send + Sync + 'static {
    /// Decide where `host` goes this tick.
    fn choose(&self, host: &Host, ctx: &MoveContext<'_>, rng: &mut HostRng) -> Movement;

    /// Resolve a place of `category` for `host`.  Used by the scenario
    /// commands that force every host into one category.
    ///
    /// Default: home for primary, work (else home) for secondary, home for
    /// tertiary.
    fn destination(
        &self,
        host:     &Host,
        category: PlaceCategory,
        _places:  &PlaceRegistry,
        _rng:     &mut HostRng,
    ) -> PlaceId {
        match category {
            PlaceCategory::Secondary => host.secondary_place.unwrap_or(host.primary_place),
            PlaceCategory::Primary | PlaceCategory::Tertiary => host.primary_place,
        }
    }
}
