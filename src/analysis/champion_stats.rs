use std::collections::HashMap;

use crate::roster::person::win_rate;
use crate::roster::Person;

#[derive(Debug, Clone)]
pub struct ChampionStats {
    pub name: String,
    pub players: usize,
    pub wins: u64,
    pub losses: u64,
}

impl ChampionStats {
    pub fn new(name: String) -> Self {
        ChampionStats {
            name,
            players: 0,
            wins: 0,
            losses: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.losses)
    }
}

/// Champion pool of a roster: who mains what, and how those players fare.
pub struct ChampionPoolTracker {
    stats: HashMap<String, ChampionStats>,
}

impl Default for ChampionPoolTracker {
    fn default() -> Self {
        ChampionPoolTracker::new()
    }
}

impl ChampionPoolTracker {
    pub fn new() -> Self {
        ChampionPoolTracker {
            stats: HashMap::new(),
        }
    }

    pub fn from_persons<'a>(persons: impl IntoIterator<Item = &'a Person>) -> Self {
        let mut tracker = ChampionPoolTracker::new();
        for person in persons {
            tracker.add_player(person);
        }
        tracker
    }

    pub fn add_player(&mut self, person: &Person) {
        let champion = person.champion.to_string();
        let entry = self
            .stats
            .entry(champion.clone())
            .or_insert_with(|| ChampionStats::new(champion));

        entry.players += 1;
        entry.wins += u64::from(person.wins);
        entry.losses += u64::from(person.losses);
    }

    /// Most-played first, then by win rate.
    pub fn get_stats(&self) -> Vec<ChampionStats> {
        let mut stats: Vec<ChampionStats> = self.stats.values().cloned().collect();
        stats.sort_by(|a, b| {
            b.players
                .cmp(&a.players)
                .then(b.win_rate().partial_cmp(&a.win_rate()).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| a.name.cmp(&b.name))
        });
        stats
    }

    pub fn get_champion(&self, name: &str) -> Option<ChampionStats> {
        self.stats.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Champion, Name, Rank, Role};

    fn main(name: &str, champion: &str, wins: u32, losses: u32) -> Person {
        Person::new(
            Name::new(name).unwrap(),
            Role::Mid,
            Rank::new("Gold").unwrap(),
            Champion::new(champion).unwrap(),
        )
        .with_record(wins, losses)
    }

    #[test]
    fn aggregates_by_champion() {
        let persons = vec![
            main("A", "Ahri", 3, 1),
            main("B", "Ahri", 1, 1),
            main("C", "Zed", 5, 0),
        ];
        let tracker = ChampionPoolTracker::from_persons(&persons);

        let ahri = tracker.get_champion("Ahri").unwrap();
        assert_eq!(ahri.players, 2);
        assert_eq!((ahri.wins, ahri.losses), (4, 2));

        let order: Vec<String> = tracker.get_stats().into_iter().map(|s| s.name).collect();
        assert_eq!(order, vec!["Ahri".to_string(), "Zed".to_string()]);
    }

    #[test]
    fn pooled_records_do_not_overflow() {
        let persons = vec![main("A", "Ahri", u32::MAX, 0), main("B", "Ahri", u32::MAX, 2)];
        let ahri = ChampionPoolTracker::from_persons(&persons).get_champion("Ahri").unwrap();
        assert_eq!(ahri.wins, 2 * u64::from(u32::MAX));
        assert!(ahri.win_rate() > 0.99);
    }
}
