use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const MAX_NAME_LEN: usize = 50;
const MAX_CHAMPION_LEN: usize = 30;

/// A player's display name. Unique within a roster for import purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
            Ok(Name(trimmed.to_string()))
        } else {
            Err(ValidationError::Name)
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        !raw.trim().is_empty()
            && raw.chars().count() <= MAX_NAME_LEN
            && !raw.chars().any(char::is_control)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the five team positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    /// Team slot order, also the column order of the teams export.
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<Role>().is_ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Adc => "Adc",
            Role::Support => "Support",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
            .ok_or(ValidationError::Role)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TIERS: [&str; 11] = [
    "Unranked",
    "Iron",
    "Bronze",
    "Silver",
    "Gold",
    "Platinum",
    "Emerald",
    "Diamond",
    "Master",
    "Grandmaster",
    "Challenger",
];

// Tiers from Master upwards have no divisions.
const FIRST_APEX_TIER: usize = 8;

const DIVISIONS: [&str; 4] = ["I", "II", "III", "IV"];

/// Ranked tier with an optional division, e.g. `Gold` or `Diamond II`.
///
/// Input is case-insensitive and accepts `1`-`4` for divisions; the stored form
/// is canonical (`Gold IV`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rank(String);

impl Rank {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        Self::canonicalize(raw).map(Rank).ok_or(ValidationError::Rank)
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::canonicalize(raw).is_some()
    }

    fn canonicalize(raw: &str) -> Option<String> {
        let mut parts = raw.split_whitespace();
        let tier_raw = parts.next()?;
        let division_raw = parts.next();
        if parts.next().is_some() {
            return None;
        }

        let tier_idx = TIERS.iter().position(|t| t.eq_ignore_ascii_case(tier_raw))?;
        let tier = TIERS[tier_idx];

        match division_raw {
            None => Some(tier.to_string()),
            Some(_) if tier_idx == 0 || tier_idx >= FIRST_APEX_TIER => None,
            Some(div) => {
                let division = DIVISIONS
                    .iter()
                    .position(|d| d.eq_ignore_ascii_case(div))
                    .or_else(|| match div.parse::<usize>() {
                        Ok(n @ 1..=4) => Some(n - 1),
                        _ => None,
                    })?;
                Some(format!("{} {}", tier, DIVISIONS[division]))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Champion(String);

impl Champion {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
            Ok(Champion(trimmed.to_string()))
        } else {
            Err(ValidationError::Champion)
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        let raw = raw.trim();
        raw.chars().next().is_some_and(char::is_alphabetic)
            && raw.chars().count() <= MAX_CHAMPION_LEN
            && raw
                .chars()
                .all(|c| c.is_alphabetic() || matches!(c, ' ' | '\'' | '.' | '&'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Champion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form single-word label attached to a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if Self::is_valid(raw) {
            Ok(Tag(raw.to_string()))
        } else {
            Err(ValidationError::Tag)
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty() && raw.chars().all(char::is_alphanumeric)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}
