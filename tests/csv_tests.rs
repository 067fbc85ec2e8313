//! Import/export against real files on disk.

use std::collections::BTreeMap;
use std::fs;

use league_roster::csv_io::{export_players, export_teams, import_persons, RowOutcome};
use league_roster::error::CsvError;
use league_roster::roster::{PersonId, Role, RosterStore};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn every_header_shape_imports_well_formed_rows() {
    let cases = [
        "Name,Role,Rank,Champion\nA,Top,Gold,Garen\nB,Jungle,Silver II,Lee Sin\nC,Mid,Diamond,Ahri\n",
        "Name,Role,Rank,Champion,Wins,Losses\nA,Top,Gold,Garen,1,0\nB,Jungle,Silver II,Lee Sin,0,0\nC,Mid,Diamond,Ahri,5,5\n",
        "Name,Role,Rank,Champion,Wins,Losses,WinRate%,AvgGrade\nA,Top,Gold,Garen,1,0,100.00,A\nB,Jungle,Silver II,Lee Sin,0,0,0.00,-\nC,Mid,Diamond,Ahri,5,5,50.00,B\n",
    ];

    for content in cases {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "players.csv", content);
        let mut store = RosterStore::new();

        let result = import_persons(&mut store, &path).unwrap();
        assert_eq!((result.imported, result.duplicates, result.invalid), (3, 0, 0));
        assert_eq!(store.persons().len(), 3);
    }
}

#[test]
fn reimporting_same_name_counts_duplicate() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "players.csv",
        "Name,Role,Rank,Champion\nAlice,Top,Gold,Ahri\nAlice,Top,Gold,Ahri\n",
    );
    let mut store = RosterStore::new();

    let result = import_persons(&mut store, &path).unwrap();
    assert_eq!((result.imported, result.duplicates, result.invalid), (1, 1, 0));

    // Second pass: everything already exists
    let again = import_persons(&mut store, &path).unwrap();
    assert_eq!((again.imported, again.duplicates, again.invalid), (0, 2, 0));
    assert_eq!(store.persons().len(), 1);
}

#[test]
fn invalid_rows_never_reach_the_store() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "players.csv",
        "Name,Role,Rank,Champion\nShort,Top,Gold\nBadRank,Top,Platinum V,Ahri\n\nGood,Mid,Gold,Ahri\n\n",
    );
    let mut store = RosterStore::new();

    let result = import_persons(&mut store, &path).unwrap();
    assert_eq!((result.imported, result.duplicates, result.invalid), (1, 0, 2));
    assert!(store.find_person_by_name("Short").is_none());
    assert!(store.find_person_by_name("BadRank").is_none());
    assert!(result.issues.iter().all(|i| i.outcome == RowOutcome::Invalid));
    assert_eq!(result.issues.iter().map(|i| i.line).collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn unknown_header_aborts_import() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "players.csv", "Name,Role,Champion\nAlice,Top,Ahri\n");
    let mut store = RosterStore::new();

    let err = import_persons(&mut store, &path).unwrap_err();
    assert!(matches!(err, CsvError::InvalidCsv(_)));
    assert!(err.to_string().contains("Name,Role,Champion"));
    assert!(store.persons().is_empty());
}

#[test]
fn missing_source_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut store = RosterStore::new();
    let err = import_persons(&mut store, &dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, CsvError::Io { .. }));
}

#[test]
fn empty_roster_exports_header_only() {
    let dir = TempDir::new().unwrap();
    let players = dir.path().join("players.csv");
    let teams = dir.path().join("teams.csv");
    let store = RosterStore::new();

    assert_eq!(export_players(&store, &players).unwrap(), 0);
    assert_eq!(export_teams(&store, &teams).unwrap(), 0);
    assert_eq!(fs::read_to_string(&players).unwrap(), "Name,Role,Rank,Champion,Wins,Losses\n");
    assert_eq!(
        fs::read_to_string(&teams).unwrap(),
        "TeamId,Top,Jungle,Mid,Adc,Support,Wins,Losses,WinRate%\n"
    );
}

#[test]
fn export_overwrites_and_reimports_cleanly() {
    let dir = TempDir::new().unwrap();
    let source = write_csv(
        &dir,
        "in.csv",
        "Name,Role,Rank,Champion,Wins,Losses\n\"Smith, John\",Adc,gold 3,Jinx,7,3\nZed Main,Mid,Master,Zed,0,1\n",
    );
    let out = write_csv(&dir, "out.csv", "stale content that must disappear\n");

    let mut store = RosterStore::new();
    import_persons(&mut store, &source).unwrap();
    assert_eq!(export_players(&store, &out).unwrap(), 2);

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "Name,Role,Rank,Champion,Wins,Losses\n\"Smith, John\",Adc,Gold III,Jinx,7,3\nZed Main,Mid,Master,Zed,0,1\n"
    );

    let mut fresh = RosterStore::new();
    let result = import_persons(&mut fresh, &out).unwrap();
    assert_eq!(result.imported, 2);
    let smith = fresh.find_person_by_name("Smith, John").unwrap();
    assert_eq!((smith.wins, smith.losses), (7, 3));
}

#[test]
fn team_export_places_names_by_role() {
    let dir = TempDir::new().unwrap();
    let source = write_csv(
        &dir,
        "in.csv",
        "Name,Role,Rank,Champion\nSupp,Support,Gold,Lulu\nBot,Adc,Gold,Jinx\nMidder,Mid,Gold,Ahri\nJgl,Jungle,Gold,Vi\nToplaner,Top,Gold,Garen\n",
    );
    let mut store = RosterStore::new();
    import_persons(&mut store, &source).unwrap();

    let picks: BTreeMap<Role, PersonId> = store
        .persons()
        .iter()
        .map(|p| (p.role, p.id().to_string()))
        .collect();
    let team = store.form_team(&picks).unwrap();
    store.record_team_result(team.id(), false).unwrap();

    let out = dir.path().join("teams.csv");
    assert_eq!(export_teams(&store, &out).unwrap(), 1);
    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("TeamId,Top,Jungle,Mid,Adc,Support,Wins,Losses,WinRate%"));
    assert_eq!(lines.next(), Some("1,Toplaner,Jgl,Midder,Bot,Supp,0,1,0.00"));
    assert_eq!(lines.next(), None);
}

#[test]
fn largest_record_imports_and_reports_win_rate() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "players.csv",
        "Name,Role,Rank,Champion,Wins,Losses\nBig,Top,Gold,Ahri,4294967295,1\n",
    );
    let mut store = RosterStore::new();

    let result = import_persons(&mut store, &path).unwrap();
    assert_eq!(result.imported, 1);
    let big = store.find_person_by_name("Big").unwrap();
    assert_eq!(big.games_played(), 4_294_967_296);
    assert!(big.win_rate() > 0.99 && big.win_rate() < 1.0);
}
