use std::collections::{BTreeMap, HashSet};

use super::person::{win_rate, PersonId};
use super::value::Role;
use crate::error::RosterError;

pub type TeamId = u32;

/// Five players, one per role. Holds person ids only; the store owns the
/// players themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    id: TeamId,
    // Indexed by position in `Role::ALL`
    members: [PersonId; 5],
    pub wins: u32,
    pub losses: u32,
}

impl Team {
    /// Fails with `InvalidTeamSize` unless every role maps to a distinct player.
    pub fn new(id: TeamId, lineup: &BTreeMap<Role, PersonId>) -> Result<Self, RosterError> {
        let distinct: HashSet<&PersonId> = lineup.values().collect();
        if lineup.len() != Role::ALL.len() || distinct.len() != lineup.len() {
            return Err(RosterError::InvalidTeamSize(distinct.len()));
        }

        let members = Role::ALL.map(|role| lineup[&role].clone());
        Ok(Team {
            id,
            members,
            wins: 0,
            losses: 0,
        })
    }

    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn member(&self, role: Role) -> &PersonId {
        &self.members[slot(role)]
    }

    /// `(role, person id)` pairs in slot order.
    pub fn members(&self) -> impl Iterator<Item = (Role, &PersonId)> + '_ {
        Role::ALL.into_iter().zip(self.members.iter())
    }

    pub fn contains(&self, person_id: &str) -> bool {
        self.members.iter().any(|m| m == person_id)
    }

    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.losses)
    }

    /// Swap the holder of `role`, returning the previous member's id.
    pub(crate) fn replace(&mut self, role: Role, person_id: PersonId) -> PersonId {
        std::mem::replace(&mut self.members[slot(role)], person_id)
    }
}

fn slot(role: Role) -> usize {
    match role {
        Role::Top => 0,
        Role::Jungle => 1,
        Role::Mid => 2,
        Role::Adc => 3,
        Role::Support => 4,
    }
}
