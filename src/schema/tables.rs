//! Entity schema definitions for the sports analytics warehouse

use super::types::*;

pub static LEAGUES: EntitySchema = EntitySchema {
    name: "leagues",
    source_file: "stg_leagues.csv",
    primary_key: "league_id",
    columns: &[
        Column::required("league_id", FieldType::Integer),
        Column::required("league_name", FieldType::Text),
        Column::new("country", FieldType::Text),
        Column::new("sport_type", FieldType::Text),
        Column::new("founded_year", FieldType::Integer),
        Column::required("is_active", FieldType::Flag),
    ],
    foreign_keys: &[],
    distinct_pairs: &[],
};

pub static TEAMS: EntitySchema = EntitySchema {
    name: "teams",
    source_file: "stg_teams.csv",
    primary_key: "team_id",
    columns: &[
        Column::required("team_id", FieldType::Integer),
        Column::required("league_id", FieldType::Integer),
        Column::required("team_name", FieldType::Text),
        Column::new("city", FieldType::Text),
        Column::new("stadium", FieldType::Text),
        Column::new("founded_year", FieldType::Integer),
        Column::required("is_active", FieldType::Flag),
    ],
    foreign_keys: &[ForeignKey::new("league_id", "leagues", "league_id")],
    distinct_pairs: &[],
};

pub static PLAYERS: EntitySchema = EntitySchema {
    name: "players",
    source_file: "stg_players.csv",
    primary_key: "player_id",
    columns: &[
        Column::required("player_id", FieldType::Integer),
        Column::required("team_id", FieldType::Integer),
        Column::required("first_name", FieldType::Text),
        Column::required("last_name", FieldType::Text),
        Column::new("position", FieldType::Text),
        Column::new("nationality", FieldType::Text),
        Column::new("date_of_birth", FieldType::Date),
        Column::new("jersey_number", FieldType::Integer),
        Column::required("is_active", FieldType::Flag),
    ],
    foreign_keys: &[ForeignKey::new("team_id", "teams", "team_id")],
    distinct_pairs: &[],
};

pub static MATCHES: EntitySchema = EntitySchema {
    name: "matches",
    source_file: "stg_matches.csv",
    primary_key: "match_id",
    columns: &[
        Column::required("match_id", FieldType::Integer),
        Column::required("league_id", FieldType::Integer),
        Column::new("season", FieldType::Text),
        Column::new("match_date", FieldType::Date),
        Column::required("home_team_id", FieldType::Integer),
        Column::required("away_team_id", FieldType::Integer),
        Column::new("home_score", FieldType::Integer),
        Column::new("away_score", FieldType::Integer),
        Column::new("stadium", FieldType::Text),
        Column::new("match_status", FieldType::Text),
        Column::new("attendance", FieldType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("league_id", "leagues", "league_id"),
        ForeignKey::new("home_team_id", "teams", "team_id"),
        ForeignKey::new("away_team_id", "teams", "team_id"),
    ],
    distinct_pairs: &[("home_team_id", "away_team_id")],
};

/// All entities in foreign-key dependency order (parents before children)
pub static ALL_ENTITIES: &[&EntitySchema] = &[&LEAGUES, &TEAMS, &PLAYERS, &MATCHES];

/// Look up an entity schema by table name
pub fn get_entity(name: &str) -> Option<&'static EntitySchema> {
    ALL_ENTITIES.iter().find(|e| e.name == name).copied()
}

/// All entity table names, in load order
pub fn entity_names() -> Vec<&'static str> {
    ALL_ENTITIES.iter().map(|e| e.name).collect()
}
