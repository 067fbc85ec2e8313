mod display;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use display::output::{
    display_champion_pool, display_error, display_import_result, display_info, display_players,
    display_success, display_teams,
};
use league_roster::analysis::champion_stats::ChampionPoolTracker;
use league_roster::analysis::recommender::TeamRecommender;
use league_roster::config::Config;
use league_roster::csv_io::{export_players, export_teams, import_persons};
use league_roster::error::{AppError, RosterError};
use league_roster::roster::{Champion, Name, Person, PersonId, Rank, Role, RosterStore, Tag};
use league_roster::storage::RosterFile;

#[derive(Parser, Debug)]
#[command(name = "League Roster")]
#[command(about = "Manage a five-role team roster: players, stats, teams and CSV files", long_about = None)]
struct Args {
    /// Roster file to use instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a player
    Add {
        name: String,
        role: String,
        rank: String,
        champion: String,
        /// Tag to attach (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Remove a player (refused while they are in a team)
    Delete { name: String },

    /// List all players
    List,

    /// List all teams
    Teams,

    /// Import players from a CSV file
    Import { path: PathBuf },

    /// Export players to a CSV file (overwrites)
    ExportPlayers { path: PathBuf },

    /// Export teams to a CSV file (overwrites)
    ExportTeams { path: PathBuf },

    /// Form a team from one player per role
    FormTeam {
        #[arg(long)]
        top: Option<String>,
        #[arg(long)]
        jungle: Option<String>,
        #[arg(long)]
        mid: Option<String>,
        #[arg(long)]
        adc: Option<String>,
        #[arg(long)]
        support: Option<String>,
        /// Fill unpicked roles with the best free player
        #[arg(long)]
        auto: bool,
    },

    /// Dissolve a team, freeing its members
    Dissolve { team_id: u32 },

    /// Put a free player into a team, replacing whoever holds their role
    Swap { team_id: u32, name: String },

    /// Record one match of stats for a player
    Stats {
        name: String,
        /// CS per minute
        cs: String,
        /// Gold difference at 15 minutes
        #[arg(allow_hyphen_values = true)]
        gold: String,
        kda: String,
    },

    /// Record a match result for a team and its members
    #[command(name = "result")]
    Record { team_id: u32, outcome: Outcome },

    /// Show the roster's champion pool
    Pool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Outcome {
    Win,
    Loss,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let roster_path = args.data_file.clone().unwrap_or_else(|| config.roster_path());

    let mut store = RosterFile::load(&roster_path)?.to_model(config.stats_window)?;

    match args.command {
        Command::List => display_players(&store),
        Command::Teams => display_teams(&store),
        Command::Pool => {
            let tracker = ChampionPoolTracker::from_persons(store.persons());
            display_champion_pool(tracker.get_stats());
        }

        Command::Add {
            name,
            role,
            rank,
            champion,
            tag,
        } => {
            let name = Name::new(&name)?;
            if store.find_person_by_name(name.as_str()).is_some() {
                return Err(AppError::Roster(RosterError::DuplicatePerson(name.to_string())).into());
            }
            let tags = tag
                .iter()
                .map(|t| Tag::new(t))
                .collect::<Result<BTreeSet<Tag>, _>>()?;
            let person = Person::new(name, role.parse::<Role>()?, Rank::new(&rank)?, Champion::new(&champion)?)
                .with_tags(tags)
                .with_stats(store.empty_stats());

            let summary = format!("Added {} ({}, {})", person.name, person.role, person.rank);
            store.add_person(person)?;
            display_success(&summary);
            save(&store, &roster_path)?;
        }

        Command::Delete { name } => {
            let id = person_id(&store, &name)?;
            store.remove_person(&id)?;
            display_success(&format!("Removed {}", name));
            save(&store, &roster_path)?;
        }

        Command::Import { path } => {
            display_info(&format!("Importing players from {}", path.display()));
            let result = import_persons(&mut store, &path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            display_import_result(&result);
            if result.imported > 0 {
                save(&store, &roster_path)?;
            }
        }

        Command::ExportPlayers { path } => {
            let rows = export_players(&store, &path)
                .with_context(|| format!("Failed to export players to {}", path.display()))?;
            display_success(&format!("Exported {} players to {}", rows, path.display()));
        }

        Command::ExportTeams { path } => {
            let rows = export_teams(&store, &path)
                .with_context(|| format!("Failed to export teams to {}", path.display()))?;
            display_success(&format!("Exported {} teams to {}", rows, path.display()));
        }

        Command::FormTeam {
            top,
            jungle,
            mid,
            adc,
            support,
            auto,
        } => {
            let mut picks: BTreeMap<Role, PersonId> = BTreeMap::new();
            let named = [
                (Role::Top, top),
                (Role::Jungle, jungle),
                (Role::Mid, mid),
                (Role::Adc, adc),
                (Role::Support, support),
            ];
            for (role, name) in named {
                if let Some(name) = name {
                    picks.insert(role, person_id(&store, &name)?);
                }
            }
            if auto {
                picks = TeamRecommender::auto_pick(&store, &picks);
            }

            let team = store.form_team(&picks)?;
            display_success(&format!("Formed team #{}", team.id()));
            save(&store, &roster_path)?;
            display_teams(&store);
        }

        Command::Dissolve { team_id } => {
            store.dissolve_team(team_id)?;
            display_success(&format!("Dissolved team #{}", team_id));
            save(&store, &roster_path)?;
        }

        Command::Swap { team_id, name } => {
            let id = person_id(&store, &name)?;
            let released = store.replace_member(team_id, &id)?;
            let released_name = store
                .find_person(&released)
                .map(|p| p.name.to_string())
                .unwrap_or(released);
            display_success(&format!("{} replaces {} in team #{}", name, released_name, team_id));
            save(&store, &roster_path)?;
        }

        Command::Stats { name, cs, gold, kda } => {
            let id = person_id(&store, &name)?;
            let person = store
                .find_person(&id)
                .cloned()
                .ok_or_else(|| AppError::PlayerNotFound(name.clone()))?;
            let Some(stats) = person.stats.try_add_latest_stats(&cs, &gold, &kda) else {
                display_info(&format!("Ignored invalid stats for {} ({}, {}, {})", name, cs, gold, kda));
                return Ok(());
            };

            let score = stats.score().last().copied().unwrap_or_default();
            store.set_person(person.with_stats(stats))?;
            display_success(&format!("Recorded match for {} (score {:.2})", name, score));
            save(&store, &roster_path)?;
        }

        Command::Record { team_id, outcome } => {
            let won = matches!(outcome, Outcome::Win);
            store.record_team_result(team_id, won)?;
            display_success(&format!(
                "Recorded a {} for team #{}",
                if won { "win" } else { "loss" },
                team_id
            ));
            save(&store, &roster_path)?;
        }
    }

    Ok(())
}

fn person_id(store: &RosterStore, name: &str) -> Result<PersonId, AppError> {
    store
        .find_person_by_name(name)
        .map(|p| p.id().to_string())
        .ok_or_else(|| AppError::PlayerNotFound(name.to_string()))
}

fn save(store: &RosterStore, path: &Path) -> Result<(), AppError> {
    RosterFile::from_model(store).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_subcommand_parses_outcome() {
        let args = Args::try_parse_from(["league_roster", "result", "3", "loss"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Record {
                team_id: 3,
                outcome: Outcome::Loss
            }
        ));
        assert!(Args::try_parse_from(["league_roster", "record", "3", "win"]).is_err());
    }
}
