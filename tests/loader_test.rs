//! End-to-end tests: staged batches through the loader into a real SQLite
//! warehouse, verifying committed values and rejection reporting.

use indicatif::ProgressBar;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

use sports_staging_loader::loader::{load_staging_dir, EntityLoader, RejectReason};
use sports_staging_loader::schema::{ALL_ENTITIES, LEAGUES, MATCHES, TEAMS};
use sports_staging_loader::staging::StagedRow;
use sports_staging_loader::store::{ProductionStore, SqliteStore};

fn staged(index: usize, fields: &[(&str, &str)]) -> StagedRow {
    let mut row = StagedRow::new(index);
    for (col, raw) in fields {
        row.set(*col, *raw);
    }
    row
}

fn league(index: usize, id: &str, name: &str, active: &str) -> StagedRow {
    staged(
        index,
        &[
            ("league_id", id),
            ("league_name", name),
            ("country", "England"),
            ("sport_type", "Football"),
            ("founded_year", "1992"),
            ("is_active", active),
        ],
    )
}

fn team(index: usize, id: &str, league_id: &str, name: &str) -> StagedRow {
    staged(
        index,
        &[
            ("team_id", id),
            ("league_id", league_id),
            ("team_name", name),
            ("city", "London"),
            ("is_active", "1"),
        ],
    )
}

fn load<S: ProductionStore>(
    store: &mut S,
    schema: &sports_staging_loader::schema::EntitySchema,
    rows: Vec<StagedRow>,
) -> sports_staging_loader::LoadReport {
    EntityLoader::new(store)
        .load(schema, &rows, &ProgressBar::hidden())
        .expect("storage should not fail")
}

#[test]
fn flag_normalization_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("warehouse.db");

    let mut store = SqliteStore::open(&db_path).unwrap();
    let report = load(
        &mut store,
        &LEAGUES,
        vec![
            league(1, "1", "EPL", "Yes"),
            league(2, "2", "X", "maybe"),
        ],
    );
    assert_eq!(report.accepted_count(), 2);
    assert_eq!(report.rejected_count(), 0);
    drop(store);

    let conn = Connection::open(&db_path).unwrap();
    let active: i64 = conn
        .query_row("SELECT is_active FROM leagues WHERE league_id = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(active, 1);

    let active: i64 = conn
        .query_row("SELECT is_active FROM leagues WHERE league_id = 2", [], |r| r.get(0))
        .unwrap();
    assert_eq!(active, 0);
}

#[test]
fn invalid_match_date_is_accepted_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("warehouse.db");

    let mut store = SqliteStore::open(&db_path).unwrap();
    load(&mut store, &LEAGUES, vec![league(1, "1", "EPL", "Yes")]);
    load(
        &mut store,
        &TEAMS,
        vec![team(1, "10", "1", "Arsenal"), team(2, "11", "1", "Chelsea")],
    );

    let report = load(
        &mut store,
        &MATCHES,
        vec![staged(
            1,
            &[
                ("match_id", "100"),
                ("league_id", "1"),
                ("season", "2024/25"),
                ("match_date", "2024-99-99"),
                ("home_team_id", "10"),
                ("away_team_id", "11"),
                ("match_status", "Scheduled"),
            ],
        )],
    );
    assert_eq!(report.accepted_count(), 1);
    assert_eq!(report.rejected_count(), 0);
    drop(store);

    let conn = Connection::open(&db_path).unwrap();
    let date: Option<String> = conn
        .query_row("SELECT match_date FROM matches WHERE match_id = 100", [], |r| r.get(0))
        .unwrap();
    assert_eq!(date, None);
}

#[test]
fn match_with_same_home_and_away_team_is_rejected() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    load(&mut store, &LEAGUES, vec![league(1, "1", "EPL", "Yes")]);
    load(&mut store, &TEAMS, vec![team(1, "10", "1", "Arsenal")]);

    let report = load(
        &mut store,
        &MATCHES,
        vec![staged(
            1,
            &[
                ("match_id", "100"),
                ("league_id", "1"),
                ("home_team_id", "10"),
                ("away_team_id", "10"),
            ],
        )],
    );

    assert_eq!(report.accepted_count(), 0);
    assert_eq!(report.rejected_count(), 1);
    assert_eq!(report.rejections()[0].reason, RejectReason::InvariantViolation);
    assert_eq!(store.count("matches").unwrap(), 0);
}

#[test]
fn team_with_unknown_league_is_rejected() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    load(&mut store, &LEAGUES, vec![league(1, "1", "EPL", "Yes")]);

    let report = load(
        &mut store,
        &TEAMS,
        vec![
            team(1, "10", "1", "Arsenal"),
            team(2, "11", "42", "Nowhere FC"),
            team(3, "12", "1", "Chelsea"),
        ],
    );

    assert_eq!(report.accepted_count(), 2);
    assert_eq!(report.rejected_count(), 1);

    let rejection = &report.rejections()[0];
    assert_eq!(rejection.index, 2);
    assert_eq!(rejection.key.as_deref(), Some("11"));
    assert_eq!(rejection.reason, RejectReason::MissingForeignKey);
    assert_eq!(store.count("teams").unwrap(), 2);
}

#[test]
fn reloading_a_committed_identity_is_rejected_and_row_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("warehouse.db");

    let mut store = SqliteStore::open(&db_path).unwrap();
    load(&mut store, &LEAGUES, vec![league(1, "1", "EPL", "Yes")]);
    drop(store);

    // A second run against the same warehouse, as re-loads happen in practice
    let mut store = SqliteStore::open(&db_path).unwrap();
    let report = load(
        &mut store,
        &LEAGUES,
        vec![league(1, "1", "Overwrite Attempt", "No")],
    );

    assert_eq!(report.accepted_count(), 0);
    assert_eq!(report.rejections()[0].reason, RejectReason::DuplicateKey);
    drop(store);

    let conn = Connection::open(&db_path).unwrap();
    let (name, active): (String, i64) = conn
        .query_row(
            "SELECT league_name, is_active FROM leagues WHERE league_id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "EPL");
    assert_eq!(active, 1);
}

#[test]
fn full_staging_directory_load() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("staging");
    fs::create_dir(&staging).unwrap();

    write_staging(
        &staging,
        "stg_leagues.csv",
        "league_id,league_name,country,sport_type,founded_year,is_active\n\
         1,EPL,England,Football,1992,Yes\n\
         2,La Liga,Spain,Football,1929,1\n",
    );
    write_staging(
        &staging,
        "stg_teams.csv",
        "team_id,league_id,team_name,city,stadium,founded_year,is_active\n\
         10,1,Arsenal,London,Emirates,1886,Y\n\
         11,1,Chelsea,London,Stamford Bridge,1905,true\n\
         12,9,Ghost Town,Nowhere,,1900,No\n",
    );
    write_staging(
        &staging,
        "stg_players.csv",
        "player_id,team_id,first_name,last_name,position,nationality,date_of_birth,jersey_number,is_active\n\
         100,10,Bukayo,Saka,Winger,England,2001-09-05,7,Yes\n\
         101,10,Unknown,Birthday,Defender,England,not-a-date,,0\n",
    );
    write_staging(
        &staging,
        "stg_matches.csv",
        "match_id,league_id,season,match_date,home_team_id,away_team_id,home_score,away_score,stadium,match_status,attendance\n\
         1000,1,2024/25,2024-08-17,10,11,2,1,Emirates,Completed,60260\n\
         1001,1,2024/25,2024-12-01,10,10,,,Emirates,Scheduled,\n",
    );

    let db_path = dir.path().join("warehouse.db");
    let mut store = SqliteStore::open(&db_path).unwrap();
    let reports = load_staging_dir(&staging, &mut store, ALL_ENTITIES).unwrap();

    let by_entity = |name: &str| reports.iter().find(|r| r.entity == name).unwrap();

    assert_eq!(by_entity("leagues").accepted_count(), 2);
    assert_eq!(by_entity("teams").accepted_count(), 2);
    assert_eq!(by_entity("teams").rejected_count(), 1);
    assert_eq!(by_entity("players").accepted_count(), 2);
    assert_eq!(by_entity("matches").accepted_count(), 1);
    assert_eq!(
        by_entity("matches").rejections()[0].reason,
        RejectReason::InvariantViolation
    );

    assert_eq!(store.count("leagues").unwrap(), 2);
    assert_eq!(store.count("teams").unwrap(), 2);
    assert_eq!(store.count("players").unwrap(), 2);
    assert_eq!(store.count("matches").unwrap(), 1);
    drop(store);

    // The player with unparseable date of birth was accepted with NULL
    let conn = Connection::open(&db_path).unwrap();
    let dob: Option<String> = conn
        .query_row(
            "SELECT date_of_birth FROM players WHERE player_id = 101",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(dob, None);
}

#[test]
fn missing_staging_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("staging");
    fs::create_dir(&staging).unwrap();

    write_staging(
        &staging,
        "stg_leagues.csv",
        "league_id,league_name,is_active\n1,EPL,Yes\n",
    );

    let mut store = SqliteStore::open_in_memory().unwrap();
    let reports = load_staging_dir(&staging, &mut store, ALL_ENTITIES).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].entity, "leagues");
    assert_eq!(reports[0].accepted_count(), 1);
}

fn write_staging(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}
