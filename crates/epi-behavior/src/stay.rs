//! A choice model under which nobody moves.

use epi_core::HostRng;
use epi_population::Host;

use crate::{ChoiceModel, MoveContext, Movement};

/// A [`ChoiceModel`] that always returns [`Movement::Stay`].
///
/// Useful in tests and for well-mixed single-place scenarios.
pub struct StayPut;

impl ChoiceModel for StayPut {
    fn choose(&self, _host: &Host, _ctx: &MoveContext<'_>, _rng: &mut HostRng) -> Movement {
        Movement::Stay
    }
}
