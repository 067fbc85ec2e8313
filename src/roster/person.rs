use std::collections::BTreeSet;

use uuid::Uuid;

use super::stats::Stats;
use super::value::{Champion, Name, Rank, Role, Tag};

/// Stable, store-independent player identifier.
pub type PersonId = String;

/// A rostered player. Edits produce modified copies via the `with_*` methods;
/// the id never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: PersonId,
    pub name: Name,
    pub role: Role,
    pub rank: Rank,
    pub champion: Champion,
    pub tags: BTreeSet<Tag>,
    pub wins: u32,
    pub losses: u32,
    pub stats: Stats,
}

impl Person {
    /// New player with a freshly assigned id and an empty record.
    pub fn new(name: Name, role: Role, rank: Rank, champion: Champion) -> Self {
        Person::with_id(
            Uuid::new_v4().to_string(),
            name,
            role,
            rank,
            champion,
            BTreeSet::new(),
            0,
            0,
            Stats::default(),
        )
    }

    /// Full constructor used by storage adapters to rebuild a known player.
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: PersonId,
        name: Name,
        role: Role,
        rank: Rank,
        champion: Champion,
        tags: BTreeSet<Tag>,
        wins: u32,
        losses: u32,
        stats: Stats,
    ) -> Self {
        Person {
            id,
            name,
            role,
            rank,
            champion,
            tags,
            wins,
            losses,
            stats,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    pub fn with_tags(mut self, tags: BTreeSet<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn games_played(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses)
    }

    /// Fraction of games won, 0.0 with no games played.
    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.losses)
    }
}

/// Counts are widened before summing so a full `u32` record cannot overflow.
pub(crate) fn win_rate(wins: impl Into<u64>, losses: impl Into<u64>) -> f64 {
    let wins: u64 = wins.into();
    let games = wins + losses.into();
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}
