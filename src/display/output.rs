use colored::*;
use league_roster::analysis::champion_stats::ChampionStats;
use league_roster::csv_io::{ImportResult, RowOutcome};
use league_roster::roster::{Role, RosterStore};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "#")]
    number: String,
    name: String,
    role: String,
    rank: String,
    champion: String,
    record: String,
    win_rate: String,
    grade: String,
    team: String,
    tags: String,
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: String,
    top: String,
    jungle: String,
    mid: String,
    adc: String,
    support: String,
    record: String,
    win_rate: String,
}

#[derive(Tabled)]
struct PoolRow {
    rank: String,
    champion: String,
    players: String,
    record: String,
    win_rate: String,
}

pub fn display_players(store: &RosterStore) {
    println!("\n{}", format!("👥 PLAYERS ({})", store.persons().len()).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    if store.persons().is_empty() {
        println!("{}", "No players yet. Add some or import a CSV file.".yellow());
        return;
    }

    let mut rows = vec![];
    for (idx, person) in store.persons().iter().enumerate() {
        rows.push(PlayerRow {
            number: format!("{}", idx + 1),
            name: person.name.to_string(),
            role: person.role.to_string(),
            rank: person.rank.to_string(),
            champion: person.champion.to_string(),
            record: format!("{}W / {}L", person.wins, person.losses),
            win_rate: format!("{:.1}%", person.win_rate() * 100.0),
            grade: person
                .stats
                .grade()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "-".to_string()),
            team: store
                .team_of(person.id())
                .map(|id| format!("#{}", id))
                .unwrap_or_else(|| "-".to_string()),
            tags: person
                .tags
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_teams(store: &RosterStore) {
    println!("\n{}", format!("🛡️ TEAMS ({})", store.teams().len()).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    if store.teams().is_empty() {
        println!("{}", "No teams formed yet.".yellow());
        return;
    }

    let name_of = |id: &str| {
        store
            .find_person(id)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    let mut rows = vec![];
    for team in store.teams() {
        let win_rate = team.win_rate() * 100.0;
        let win_rate = if team.wins == 0 && team.losses == 0 {
            "-".to_string()
        } else if win_rate >= 50.0 {
            format!("{:.1}%", win_rate).green().to_string()
        } else {
            format!("{:.1}%", win_rate).red().to_string()
        };

        rows.push(TeamRow {
            id: format!("#{}", team.id()),
            top: name_of(team.member(Role::Top).as_str()),
            jungle: name_of(team.member(Role::Jungle).as_str()),
            mid: name_of(team.member(Role::Mid).as_str()),
            adc: name_of(team.member(Role::Adc).as_str()),
            support: name_of(team.member(Role::Support).as_str()),
            record: format!("{}W / {}L", team.wins, team.losses),
            win_rate,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_import_result(result: &ImportResult) {
    println!("\n{}", "📥 IMPORT SUMMARY".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!(
        "{} {} imported, {} duplicate, {} invalid\n",
        "📈 Rows:".bold(),
        result.imported.to_string().green(),
        result.duplicates.to_string().yellow(),
        result.invalid.to_string().red()
    );

    for issue in &result.issues {
        let label = match issue.outcome {
            RowOutcome::Duplicate => "duplicate".yellow(),
            RowOutcome::Invalid => "invalid".red(),
        };
        println!("  line {:>4} {:<9} {}", issue.line, label, issue.reason);
    }
    if !result.issues.is_empty() {
        println!();
    }
}

pub fn display_champion_pool(stats: Vec<ChampionStats>) {
    println!("\n{}", "🎮 CHAMPION POOL".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if stats.is_empty() {
        println!("{}", "No champions in the roster".yellow());
        return;
    }

    let mut rows = vec![];
    for (idx, champ) in stats.iter().enumerate() {
        rows.push(PoolRow {
            rank: format!("#{}", idx + 1),
            champion: champ.name.clone(),
            players: format!("{}", champ.players),
            record: format!("{}W / {}L", champ.wins, champ.losses),
            win_rate: format!("{:.1}%", champ.win_rate() * 100.0),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(top) = stats.first() {
        println!("\n{}", "Most Played".bold().yellow());
        println!(
            "  {} is mained by {} player(s) with a {:.1}% win rate\n",
            top.name,
            top.players,
            top.win_rate() * 100.0
        );
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
