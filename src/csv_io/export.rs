use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use crate::error::CsvError;
use crate::roster::{Role, RosterStore};

pub const PLAYERS_HEADER: [&str; 6] = ["Name", "Role", "Rank", "Champion", "Wins", "Losses"];
pub const TEAMS_HEADER: [&str; 9] = [
    "TeamId", "Top", "Jungle", "Mid", "Adc", "Support", "Wins", "Losses", "WinRate%",
];

/// Overwrite `dest` with one row per player, in roster order.
/// Returns the number of data rows written.
pub fn export_players(store: &RosterStore, dest: &Path) -> Result<usize, CsvError> {
    let rows = write_players(store, create(dest)?)?;
    log::info!("Exported {} players to {}", rows, dest.display());
    Ok(rows)
}

/// Overwrite `dest` with one row per team, member names in role order.
pub fn export_teams(store: &RosterStore, dest: &Path) -> Result<usize, CsvError> {
    let rows = write_teams(store, create(dest)?)?;
    log::info!("Exported {} teams to {}", rows, dest.display());
    Ok(rows)
}

pub fn write_players<W: Write>(store: &RosterStore, out: W) -> Result<usize, CsvError> {
    let mut writer = WriterBuilder::new().terminator(Terminator::Any(b'\n')).from_writer(out);
    writer.write_record(PLAYERS_HEADER)?;

    for person in store.persons() {
        writer.write_record([
            person.name.as_str(),
            person.role.as_str(),
            person.rank.as_str(),
            person.champion.as_str(),
            &person.wins.to_string(),
            &person.losses.to_string(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(store.persons().len())
}

pub fn write_teams<W: Write>(store: &RosterStore, out: W) -> Result<usize, CsvError> {
    let mut writer = WriterBuilder::new().terminator(Terminator::Any(b'\n')).from_writer(out);
    writer.write_record(TEAMS_HEADER)?;

    for team in store.teams() {
        let mut row = Vec::with_capacity(TEAMS_HEADER.len());
        row.push(team.id().to_string());
        for role in Role::ALL {
            let member = team.member(role);
            let name = match store.find_person(member) {
                Some(person) => person.name.to_string(),
                None => {
                    log::warn!("Team {} references unknown player {}", team.id(), member);
                    String::new()
                }
            };
            row.push(name);
        }
        row.push(team.wins.to_string());
        row.push(team.losses.to_string());
        row.push(format!("{:.2}", team.win_rate() * 100.0));
        writer.write_record(&row)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(store.teams().len())
}

fn create(dest: &Path) -> Result<File, CsvError> {
    File::create(dest).map_err(|source| CsvError::Io {
        path: dest.display().to_string(),
        source,
    })
}
