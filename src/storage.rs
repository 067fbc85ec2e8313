use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AppError, ValidationError};
use crate::roster::{Champion, Name, Person, Rank, Role, RosterStore, Stats, Tag, Team};

const ROSTER_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct JsonAdaptedStats {
    #[serde(default)]
    pub cs_per_min: Vec<f64>,
    #[serde(default)]
    pub gold_diff_at_15: Vec<i32>,
    #[serde(default)]
    pub kda: Vec<f64>,
    #[serde(default)]
    pub score: Vec<f64>,
}

impl JsonAdaptedStats {
    fn from_model(stats: &Stats) -> Self {
        JsonAdaptedStats {
            cs_per_min: stats.cs_per_min().to_vec(),
            gold_diff_at_15: stats.gold_diff_at_15().to_vec(),
            kda: stats.kda().to_vec(),
            score: stats.score().to_vec(),
        }
    }

    /// Broken histories load as empty rather than failing the whole player.
    fn to_model(&self, window: usize) -> Stats {
        Stats::from_series(
            self.cs_per_min.clone(),
            self.gold_diff_at_15.clone(),
            self.kda.clone(),
            &self.score,
            window,
        )
        .unwrap_or_else(|_| {
            log::warn!(
                "Discarding stats history with mismatched or out-of-range series ({} / {} / {} / {} entries)",
                self.cs_per_min.len(),
                self.gold_diff_at_15.len(),
                self.kda.len(),
                self.score.len()
            );
            Stats::with_window(window)
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonAdaptedPerson {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub rank: Option<String>,
    pub champion: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub stats: JsonAdaptedStats,
}

impl JsonAdaptedPerson {
    pub fn from_model(person: &Person) -> Self {
        JsonAdaptedPerson {
            id: Some(person.id().to_string()),
            name: Some(person.name.to_string()),
            role: Some(person.role.to_string()),
            rank: Some(person.rank.to_string()),
            champion: Some(person.champion.to_string()),
            tags: person.tags.iter().map(|t| t.as_str().to_string()).collect(),
            wins: person.wins,
            losses: person.losses,
            stats: JsonAdaptedStats::from_model(&person.stats),
        }
    }

    /// Fails on the first missing or malformed field, in declaration order.
    pub fn to_model(&self, stats_window: usize) -> Result<Person, ValidationError> {
        let id = required(&self.id, "id")?;
        let name = Name::new(required(&self.name, "name")?)?;
        let role = required(&self.role, "role")?.parse::<Role>()?;
        let rank = Rank::new(required(&self.rank, "rank")?)?;
        let champion = Champion::new(required(&self.champion, "champion")?)?;
        let tags = self
            .tags
            .iter()
            .map(|t| Tag::new(t))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Person::with_id(
            id.to_string(),
            name,
            role,
            rank,
            champion,
            tags,
            self.wins,
            self.losses,
            self.stats.to_model(stats_window),
        ))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonAdaptedTeam {
    pub id: u32,
    pub top: Option<String>,
    pub jungle: Option<String>,
    pub mid: Option<String>,
    pub adc: Option<String>,
    pub support: Option<String>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl JsonAdaptedTeam {
    pub fn from_model(team: &Team) -> Self {
        let member = |role| Some(team.member(role).clone());
        JsonAdaptedTeam {
            id: team.id(),
            top: member(Role::Top),
            jungle: member(Role::Jungle),
            mid: member(Role::Mid),
            adc: member(Role::Adc),
            support: member(Role::Support),
            wins: team.wins,
            losses: team.losses,
        }
    }

    fn lineup(&self) -> Result<BTreeMap<Role, String>, ValidationError> {
        let slots = [
            (Role::Top, &self.top, "top"),
            (Role::Jungle, &self.jungle, "jungle"),
            (Role::Mid, &self.mid, "mid"),
            (Role::Adc, &self.adc, "adc"),
            (Role::Support, &self.support, "support"),
        ];
        slots
            .into_iter()
            .map(|(role, id, field)| required(id, field).map(|id| (role, id.to_string())))
            .collect()
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .ok_or(ValidationError::IllegalValue { field })
}

/// On-disk roster document.
#[derive(Debug, Serialize, Deserialize)]
pub struct RosterFile {
    pub version: u32,
    pub last_updated: DateTime<Utc>,
    pub persons: Vec<JsonAdaptedPerson>,
    pub teams: Vec<JsonAdaptedTeam>,
}

impl RosterFile {
    pub fn new() -> Self {
        RosterFile {
            version: ROSTER_FILE_VERSION,
            last_updated: Utc::now(),
            persons: Vec::new(),
            teams: Vec::new(),
        }
    }

    pub fn from_model(store: &RosterStore) -> Self {
        RosterFile {
            version: ROSTER_FILE_VERSION,
            last_updated: Utc::now(),
            persons: store.persons().iter().map(JsonAdaptedPerson::from_model).collect(),
            teams: store.teams().iter().map(JsonAdaptedTeam::from_model).collect(),
        }
    }

    /// Rebuild the in-memory roster. Any invalid player or team aborts the load.
    pub fn to_model(&self, stats_window: usize) -> Result<RosterStore, AppError> {
        let mut store = RosterStore::with_stats_window(stats_window);

        for person in &self.persons {
            store.add_person(person.to_model(stats_window)?)?;
        }

        for team in &self.teams {
            let built = Team::new(team.id, &team.lineup()?)?.with_record(team.wins, team.losses);
            store.add_team(built)?;
        }

        Ok(store)
    }

    /// A missing file is an empty roster; any other read failure is an error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::JsonError(format!("Failed to parse roster file {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No roster file at {}, starting empty", path.display());
                Ok(RosterFile::new())
            }
            Err(e) => Err(AppError::JsonError(format!(
                "Failed to read roster file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn save(&mut self, path: &Path) -> Result<(), AppError> {
        self.last_updated = Utc::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::JsonError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize roster: {}", e))
        })?;

        fs::write(path, json).map_err(|e| {
            AppError::JsonError(format!("Failed to write roster file {}: {}", path.display(), e))
        })?;

        log::info!(
            "Saved {} players and {} teams to {}",
            self.persons.len(),
            self.teams.len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for RosterFile {
    fn default() -> Self {
        RosterFile::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::roster::stats::DEFAULT_WINDOW;
    use tempfile::TempDir;

    fn adapted(name: &str, role: &str) -> JsonAdaptedPerson {
        JsonAdaptedPerson {
            id: Some(format!("id-{name}")),
            name: Some(name.to_string()),
            role: Some(role.to_string()),
            rank: Some("Gold".to_string()),
            champion: Some("Ahri".to_string()),
            tags: vec!["captain".to_string()],
            wins: 1,
            losses: 2,
            stats: JsonAdaptedStats::default(),
        }
    }

    fn full_roster() -> RosterStore {
        let mut file = RosterFile::new();
        for role in Role::ALL {
            file.persons.push(adapted(&format!("P{role}"), role.as_str()));
        }
        file.teams.push(JsonAdaptedTeam {
            id: 4,
            top: Some("id-PTop".to_string()),
            jungle: Some("id-PJungle".to_string()),
            mid: Some("id-PMid".to_string()),
            adc: Some("id-PAdc".to_string()),
            support: Some("id-PSupport".to_string()),
            wins: 3,
            losses: 0,
        });
        file.to_model(DEFAULT_WINDOW).unwrap()
    }

    #[test]
    fn first_offending_field_is_named() {
        let mut p = adapted("Alice", "Top");
        p.rank = None;
        assert_eq!(
            p.to_model(DEFAULT_WINDOW),
            Err(ValidationError::IllegalValue { field: "rank" })
        );

        let mut p = adapted("Alice", "Top");
        p.role = Some("Bot".to_string());
        p.champion = Some("123".to_string());
        assert_eq!(p.to_model(DEFAULT_WINDOW), Err(ValidationError::Role));
    }

    #[test]
    fn mismatched_stats_load_as_empty() {
        let mut p = adapted("Alice", "Top");
        p.stats = JsonAdaptedStats {
            cs_per_min: vec![7.0, 8.0],
            gold_diff_at_15: vec![100],
            kda: vec![3.0, 2.0],
            score: vec![5.0, 5.0],
        };
        let person = p.to_model(DEFAULT_WINDOW).unwrap();
        assert!(person.stats.is_empty());
    }

    #[test]
    fn out_of_range_stats_load_as_empty() {
        let mut p = adapted("Alice", "Top");
        p.stats = JsonAdaptedStats {
            cs_per_min: vec![7.0, 25.0],
            gold_diff_at_15: vec![100, 200],
            kda: vec![3.0, 2.0],
            score: vec![5.0, 5.0],
        };
        let person = p.to_model(DEFAULT_WINDOW).unwrap();
        assert!(person.stats.is_empty());
        assert_eq!(person.stats.window(), DEFAULT_WINDOW);
    }

    fn lineup_team(id: u32, prefix: &str) -> JsonAdaptedTeam {
        let slot = |role: &str| Some(format!("id-{prefix}{role}"));
        JsonAdaptedTeam {
            id,
            top: slot("Top"),
            jungle: slot("Jungle"),
            mid: slot("Mid"),
            adc: slot("Adc"),
            support: slot("Support"),
            wins: 0,
            losses: 0,
        }
    }

    fn lineup_file(prefixes: &[&str]) -> RosterFile {
        let mut file = RosterFile::new();
        for prefix in prefixes {
            for role in Role::ALL {
                file.persons.push(adapted(&format!("{prefix}{role}"), role.as_str()));
            }
        }
        file
    }

    #[test]
    fn person_claimed_by_two_teams_fails_load() {
        let mut file = lineup_file(&["A", "B"]);
        file.teams.push(lineup_team(1, "A"));
        let mut second = lineup_team(2, "B");
        second.adc = Some("id-AAdc".to_string());
        file.teams.push(second);

        assert!(matches!(
            file.to_model(DEFAULT_WINDOW),
            Err(AppError::Roster(RosterError::PersonAlreadyInTeam { team_id: 1, .. }))
        ));
    }

    #[test]
    fn member_in_wrong_slot_fails_load() {
        let mut file = lineup_file(&["A"]);
        let mut team = lineup_team(1, "A");
        team.top = Some("id-AMid".to_string());
        team.mid = Some("id-ATop".to_string());
        file.teams.push(team);

        assert!(matches!(
            file.to_model(DEFAULT_WINDOW),
            Err(AppError::Roster(RosterError::RoleMismatch { slot: Role::Top, actual: Role::Mid, .. }))
        ));
    }

    #[test]
    fn highest_team_id_loads() {
        let mut file = lineup_file(&["A"]);
        file.teams.push(lineup_team(u32::MAX, "A"));

        let store = file.to_model(DEFAULT_WINDOW).unwrap();
        assert_eq!(store.team_of("id-ATop"), Some(u32::MAX));
    }

    #[test]
    fn teams_restore_membership_and_next_id() {
        let store = full_roster();
        assert_eq!(store.teams().len(), 1);
        assert_eq!(store.team_of("id-PMid"), Some(4));
        assert_eq!(store.next_team_id(), 5);
        assert_eq!(store.team(4).unwrap().wins, 3);
    }

    #[test]
    fn team_with_unknown_member_fails() {
        let mut file = RosterFile::new();
        file.teams.push(JsonAdaptedTeam {
            id: 1,
            top: Some("ghost".to_string()),
            jungle: Some("a".to_string()),
            mid: Some("b".to_string()),
            adc: Some("c".to_string()),
            support: Some("d".to_string()),
            wins: 0,
            losses: 0,
        });
        assert!(matches!(
            file.to_model(DEFAULT_WINDOW),
            Err(AppError::Roster(RosterError::PersonNotFound(_)))
        ));
    }

    #[test]
    fn save_then_load_keeps_roster() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("roster.json");

        let mut store = full_roster();
        let mid_id = store.find_person_by_name("PMid").unwrap().id().to_string();
        let mid = store.find_person(&mid_id).unwrap().clone();
        let updated = mid.stats.add_latest_stats("9", "500", "4.5");
        store.set_person(mid.with_stats(updated)).unwrap();

        RosterFile::from_model(&store).save(&path).unwrap();
        let loaded = RosterFile::load(&path).unwrap().to_model(DEFAULT_WINDOW).unwrap();

        assert_eq!(loaded.persons(), store.persons());
        assert_eq!(loaded.teams(), store.teams());
        assert_eq!(loaded.find_person(&mid_id).unwrap().stats.len(), 1);
    }

    #[test]
    fn unreadable_file_is_not_an_empty_roster() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            RosterFile::load(temp_dir.path()),
            Err(AppError::JsonError(_))
        ));
    }

    #[test]
    fn missing_file_is_empty_roster() {
        let temp_dir = TempDir::new().unwrap();
        let file = RosterFile::load(&temp_dir.path().join("absent.json")).unwrap();
        assert!(file.persons.is_empty());
        assert!(file.teams.is_empty());
    }
}
