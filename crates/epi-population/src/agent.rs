//! Pathogen agents and their registry.

use std::collections::BTreeMap;

use epi_core::{AgentId, HostId, PathogenId, PlaceId, Time};

/// What an agent is riding in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentVessel {
    Host(HostId),
    Environment(PlaceId),
}

/// One unit of pathogen presence with a finite life.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:       AgentId,
    pub pathogen: PathogenId,
    /// Remaining life; the agent is removed once this reaches zero.
    pub life:     Time,
    pub vessel:   AgentVessel,
}

impl Agent {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life.amount > 0.0
    }
}

/// Every live agent, keyed and iterated by id.
///
/// Ids are minted monotonically and never reused.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRegistry {
    agents:  BTreeMap<AgentId, Agent>,
    next_id: u64,
}

impl AgentRegistry {
    pub(crate) fn insert(&mut self, pathogen: PathogenId, life: Time, vessel: AgentVessel) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        self.agents.insert(id, Agent { id, pathogen, life, vessel });
        id
    }

    pub(crate) fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.values_mut()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Live agents in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agents ever created, including removed ones.
    pub fn minted(&self) -> u64 {
        self.next_id
    }
}
