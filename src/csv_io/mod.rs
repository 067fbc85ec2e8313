pub mod export;
pub mod import;

pub use export::{export_players, export_teams, PLAYERS_HEADER, TEAMS_HEADER};
pub use import::{import_persons, HeaderShape, ImportResult, RowIssue, RowOutcome};
