use thiserror::Error;

use crate::roster::value::Role;

/// Constraint violations raised by the value objects and the storage adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Names should only contain printable characters, should not be blank and must be at most 50 characters long")]
    Name,

    #[error("Role should be one of: Top, Jungle, Mid, Adc, Support")]
    Role,

    #[error("Rank should be a tier (Iron to Challenger, or Unranked), optionally followed by a division I-IV for tiers below Master")]
    Rank,

    #[error("Champion names should only contain letters, spaces, apostrophes, periods or '&', and must be at most 30 characters long")]
    Champion,

    #[error("Tag names should be alphanumeric")]
    Tag,

    #[error("Stats should have cs/min in 0-20, gold diff at 15 within +/-20000 and KDA in 0-100")]
    Stats,

    #[error("{field} field is missing or invalid")]
    IllegalValue { field: &'static str },
}

/// Business-rule failures of the roster store and team formation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Person {0} already exists in the roster")]
    DuplicatePerson(String),

    #[error("Team {0} already exists in the roster")]
    DuplicateTeam(u32),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(u32),

    #[error("{name} belongs to team {team_id}; dissolve the team or swap them out first")]
    PersonInTeam { name: String, team_id: u32 },

    #[error("{name} is already a member of team {team_id}")]
    PersonAlreadyInTeam { name: String, team_id: u32 },

    #[error("A team needs exactly 5 members, one per role (got {0})")]
    InvalidTeamSize(usize),

    #[error("No candidate available for roles: {}", format_roles(.0))]
    MissingRoles(Vec<Role>),

    #[error("{name} plays {actual}, not {slot}")]
    RoleMismatch { name: String, slot: Role, actual: Role },
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whole-call failures of the CSV engines. Per-row problems never surface here.
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),

    #[error("CSV I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}
