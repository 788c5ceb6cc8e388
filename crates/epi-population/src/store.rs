//! Host storage: `HostStore` (host data) and `HostRngs` (per-host RNG).
//!
//! # Why two structs?
//!
//! The movement phase needs `&mut HostRngs` (exclusive access to each host's
//! RNG) and `&HostStore` (shared read access to every host) at the same time.
//! Keeping the RNGs in their own struct lets both borrows coexist:
//!
//! ```ignore
//! // epi-sim movement step (simplified):
//! let hosts: &HostStore = &population.hosts;
//! let moves = population.rngs.inner
//!     .par_iter_mut()
//!     .zip(hosts.as_slice().par_iter())
//!     .map(|(rng, host)| choice.choose(host, &ctx, rng))
//!     .collect::<Vec<_>>();
//! ```

use epi_core::{HostId, HostRng};

use crate::Host;

// ── HostRngs ──────────────────────────────────────────────────────────────────

/// Per-host deterministic RNG state, index-aligned with [`HostStore`].
pub struct HostRngs {
    pub inner: Vec<HostRng>,
    seed:      u64,
}

impl HostRngs {
    pub(crate) fn new(seed: u64) -> Self {
        Self { inner: Vec::new(), seed }
    }

    /// Seed the RNG for the next host id.
    pub(crate) fn push(&mut self, host: HostId) {
        debug_assert_eq!(host.index(), self.inner.len());
        self.inner.push(HostRng::new(self.seed, host));
    }

    #[inline]
    pub fn get_mut(&mut self, host: HostId) -> &mut HostRng {
        &mut self.inner[host.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── HostStore ─────────────────────────────────────────────────────────────────

/// All hosts, indexed by `HostId`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostStore {
    hosts: Vec<Host>,
}

impl HostStore {
    pub(crate) fn push(&mut self, host: Host) {
        debug_assert_eq!(host.id.index(), self.hosts.len());
        self.hosts.push(host);
    }

    #[inline]
    pub fn get(&self, id: HostId) -> Option<&Host> {
        self.hosts.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: HostId) -> Option<&mut Host> {
        self.hosts.get_mut(id.index())
    }

    /// Iterator over all `HostId`s in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = HostId> + '_ {
        (0..self.hosts.len() as u32).map(HostId)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Host> {
        self.hosts.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Host> {
        self.hosts.iter_mut()
    }

    pub fn as_slice(&self) -> &[Host] {
        &self.hosts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl<'a> IntoIterator for &'a HostStore {
    type Item = &'a Host;
    type IntoIter = std::slice::Iter<'a, Host>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}
