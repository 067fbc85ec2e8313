use std::collections::{BTreeMap, HashMap};

use super::person::{Person, PersonId};
use super::stats::{Stats, DEFAULT_WINDOW};
use super::team::{Team, TeamId};
use super::value::Role;
use crate::error::RosterError;

/// In-memory roster: unique players, unique teams, and the player -> team
/// lookup that keeps every player in at most one team.
#[derive(Debug, Clone)]
pub struct RosterStore {
    persons: Vec<Person>,
    teams: Vec<Team>,
    membership: HashMap<PersonId, TeamId>,
    next_team_id: TeamId,
    stats_window: usize,
}

impl Default for RosterStore {
    fn default() -> Self {
        RosterStore::new()
    }
}

impl RosterStore {
    pub fn new() -> Self {
        RosterStore::with_stats_window(DEFAULT_WINDOW)
    }

    pub fn with_stats_window(stats_window: usize) -> Self {
        RosterStore {
            persons: Vec::new(),
            teams: Vec::new(),
            membership: HashMap::new(),
            next_team_id: 1,
            stats_window,
        }
    }

    /// Empty history sized to this roster's rolling window.
    pub fn empty_stats(&self) -> Stats {
        Stats::with_window(self.stats_window)
    }

    pub fn stats_window(&self) -> usize {
        self.stats_window
    }

    /// Players in insertion order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Teams in insertion order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn add_person(&mut self, person: Person) -> Result<(), RosterError> {
        if self.find_person(person.id()).is_some() {
            return Err(RosterError::DuplicatePerson(person.name.to_string()));
        }
        self.persons.push(person);
        Ok(())
    }

    /// Refused while the player is in a team.
    pub fn remove_person(&mut self, person_id: &str) -> Result<Person, RosterError> {
        let idx = self.position(person_id)?;
        if let Some(&team_id) = self.membership.get(person_id) {
            return Err(RosterError::PersonInTeam {
                name: self.persons[idx].name.to_string(),
                team_id,
            });
        }
        Ok(self.persons.remove(idx))
    }

    /// Replace the stored player that shares `edited`'s id.
    ///
    /// Taking another player's name is refused, as is changing the role of a
    /// teamed player.
    pub fn set_person(&mut self, edited: Person) -> Result<(), RosterError> {
        let idx = self.position(edited.id())?;
        if let Some(other) = self.find_person_by_name(edited.name.as_str()) {
            if other.id() != edited.id() {
                return Err(RosterError::DuplicatePerson(edited.name.to_string()));
            }
        }
        if let Some(&team_id) = self.membership.get(edited.id()) {
            if self.persons[idx].role != edited.role {
                return Err(RosterError::PersonInTeam {
                    name: self.persons[idx].name.to_string(),
                    team_id,
                });
            }
        }
        self.persons[idx] = edited;
        Ok(())
    }

    pub fn find_person(&self, person_id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id() == person_id)
    }

    /// Exact, case-sensitive name match.
    pub fn find_person_by_name(&self, name: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.name.as_str() == name)
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id() == team_id)
    }

    pub fn team_of(&self, person_id: &str) -> Option<TeamId> {
        self.membership.get(person_id).copied()
    }

    pub fn next_team_id(&self) -> TeamId {
        self.next_team_id
    }

    /// Insert a fully built team and link its members.
    ///
    /// Every member must exist, play the role of their slot and be free.
    pub fn add_team(&mut self, team: Team) -> Result<(), RosterError> {
        if self.team(team.id()).is_some() {
            return Err(RosterError::DuplicateTeam(team.id()));
        }
        for (slot, person_id) in team.members() {
            self.check_member(slot, person_id)?;
        }

        for (_, person_id) in team.members() {
            self.membership.insert(person_id.clone(), team.id());
        }
        self.next_team_id = self.next_team_id.max(team.id().saturating_add(1));
        self.teams.push(team);
        Ok(())
    }

    /// Build a team from one pick per role and register it.
    ///
    /// Checks run before anything is mutated: unresolved roles first (all of
    /// them are reported), then role fit, then existing memberships.
    pub fn form_team(&mut self, picks: &BTreeMap<Role, PersonId>) -> Result<Team, RosterError> {
        let missing: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| {
                picks
                    .get(role)
                    .map_or(true, |id| self.find_person(id).is_none())
            })
            .collect();
        if !missing.is_empty() {
            return Err(RosterError::MissingRoles(missing));
        }

        for (&slot, person_id) in picks {
            self.check_member(slot, person_id)?;
        }

        let team = Team::new(self.next_team_id, picks)?;
        self.add_team(team.clone())?;
        log::info!("Formed team {}", team.id());
        Ok(team)
    }

    /// Remove a team and release all of its members.
    pub fn dissolve_team(&mut self, team_id: TeamId) -> Result<Team, RosterError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id() == team_id)
            .ok_or(RosterError::TeamNotFound(team_id))?;
        let team = self.teams.remove(idx);
        for (_, person_id) in team.members() {
            self.membership.remove(person_id);
        }
        Ok(team)
    }

    /// Put `person_id` into the slot of their role, releasing the previous
    /// holder. Returns the released player's id.
    pub fn replace_member(&mut self, team_id: TeamId, person_id: &str) -> Result<PersonId, RosterError> {
        let person = self
            .find_person(person_id)
            .ok_or_else(|| RosterError::PersonNotFound(person_id.to_string()))?;
        if let Some(&current) = self.membership.get(person_id) {
            return Err(RosterError::PersonAlreadyInTeam {
                name: person.name.to_string(),
                team_id: current,
            });
        }
        let role = person.role;

        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id() == team_id)
            .ok_or(RosterError::TeamNotFound(team_id))?;
        let released = team.replace(role, person_id.to_string());

        self.membership.remove(&released);
        self.membership.insert(person_id.to_string(), team_id);
        Ok(released)
    }

    /// Count a match result for the team and each of its members.
    pub fn record_team_result(&mut self, team_id: TeamId, won: bool) -> Result<(), RosterError> {
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id() == team_id)
            .ok_or(RosterError::TeamNotFound(team_id))?;
        if won {
            team.wins = team.wins.saturating_add(1);
        } else {
            team.losses = team.losses.saturating_add(1);
        }

        let members: Vec<PersonId> = team.members().map(|(_, id)| id.clone()).collect();
        for person in self.persons.iter_mut().filter(|p| members.iter().any(|m| m == p.id())) {
            if won {
                person.wins = person.wins.saturating_add(1);
            } else {
                person.losses = person.losses.saturating_add(1);
            }
        }
        Ok(())
    }

    fn check_member(&self, slot: Role, person_id: &str) -> Result<(), RosterError> {
        let person = self
            .find_person(person_id)
            .ok_or_else(|| RosterError::PersonNotFound(person_id.to_string()))?;
        if person.role != slot {
            return Err(RosterError::RoleMismatch {
                name: person.name.to_string(),
                slot,
                actual: person.role,
            });
        }
        if let Some(&team_id) = self.membership.get(person_id) {
            return Err(RosterError::PersonAlreadyInTeam {
                name: person.name.to_string(),
                team_id,
            });
        }
        Ok(())
    }

    fn position(&self, person_id: &str) -> Result<usize, RosterError> {
        self.persons
            .iter()
            .position(|p| p.id() == person_id)
            .ok_or_else(|| RosterError::PersonNotFound(person_id.to_string()))
    }
}
