//! Tabular normalization.
//!
//! Shared helpers the pipelines apply to upstream tables:
//! - lower-casing column names
//! - deriving per-game columns from totals
//! - flattening rows into NaN-safe [`StatRecord`]s

use serde_json::{Number, Value};

use crate::models::{Cell, StatRecord, Table};

/// Counting stats that get a `{stat}_per_game` companion column.
pub const PER_GAME_STATS: [&str; 12] = [
    "pts", "reb", "ast", "stl", "blk", "tov", "fgm", "fga", "fg3m", "fg3a", "ftm", "fta",
];

/// Games-played column, the divisor for per-game stats.
pub const GAMES_PLAYED: &str = "gp";

/// Lower-case every column name in place.
pub fn lowercase_columns(table: &mut Table) {
    for column in table.columns_mut() {
        *column = column.to_lowercase();
    }
}

/// True when the table has no games to divide by: no `gp` column or a
/// `gp` column summing to zero.
pub fn has_no_games(table: &Table) -> bool {
    match table.column_sum(GAMES_PLAYED) {
        Some(total) => total == 0.0,
        None => true,
    }
}

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Append `{stat}_per_game` for every base stat present in the table.
///
/// Rows with a non-positive `gp` or a non-numeric stat get a null.
/// Tables without a `gp` column are left unchanged.
pub fn add_per_game_columns(table: &mut Table) {
    let Some(gp_idx) = table.column_index(GAMES_PLAYED) else {
        return;
    };

    for stat in PER_GAME_STATS {
        let Some(stat_idx) = table.column_index(stat) else {
            continue;
        };

        let values: Vec<Cell> = table
            .rows()
            .iter()
            .map(|row| match (row[stat_idx].as_f64(), row[gp_idx].as_f64()) {
                (Some(total), Some(gp)) if gp > 0.0 => Cell::Float(round1(total / gp)),
                _ => Cell::Null,
            })
            .collect();

        table.push_column(format!("{}_per_game", stat), values);
    }
}

/// Convert a cell to JSON, mapping NaN and infinities to null.
pub fn sanitize_cell(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Bool(b) => Value::Bool(*b),
        Cell::Int(i) => Value::Number((*i).into()),
        Cell::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Cell::Text(s) => Value::String(s.clone()),
    }
}

/// Flatten a table into records, skipping the `exclude` columns.
pub fn to_records(table: &Table, exclude: &[&str]) -> Vec<StatRecord> {
    let kept: Vec<(usize, &String)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !exclude.contains(&name.as_str()))
        .collect();

    table
        .rows()
        .iter()
        .map(|row| {
            kept.iter()
                .map(|(idx, name)| (name.to_string(), sanitize_cell(&row[*idx])))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lowercase_columns() {
        let mut table = Table::new("T", cols(&["PLAYER_ID", "Team_ID", "GP"]));
        lowercase_columns(&mut table);
        assert_eq!(table.columns(), &cols(&["player_id", "team_id", "gp"])[..]);
    }

    #[test]
    fn test_has_no_games() {
        let no_gp = Table::new("T", cols(&["pts"]));
        assert!(has_no_games(&no_gp));

        let zero = Table::new("T", cols(&["gp"])).with_rows(vec![vec![Cell::Int(0)]]);
        assert!(has_no_games(&zero));

        let some = Table::new("T", cols(&["gp"])).with_rows(vec![vec![Cell::Int(3)]]);
        assert!(!has_no_games(&some));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(20.0), 20.0);
        assert_eq!(round1(27.14), 27.1);
        assert_eq!(round1(27.16), 27.2);
        assert_eq!(round1(1.0 / 3.0), 0.3);
    }

    #[test]
    fn test_add_per_game_columns() {
        let mut table = Table::new("T", cols(&["gp", "pts", "reb", "min"])).with_rows(vec![
            vec![Cell::Int(82), Cell::Int(2251), Cell::Int(615), Cell::Float(2877.0)],
            vec![Cell::Int(0), Cell::Int(0), Cell::Int(0), Cell::Float(0.0)],
        ]);
        add_per_game_columns(&mut table);

        assert_eq!(
            table.columns(),
            &cols(&["gp", "pts", "reb", "min", "pts_per_game", "reb_per_game"])[..]
        );
        assert_eq!(table.cell(0, "pts_per_game"), Some(&Cell::Float(27.5)));
        assert_eq!(table.cell(0, "reb_per_game"), Some(&Cell::Float(7.5)));
        assert_eq!(table.cell(1, "pts_per_game"), Some(&Cell::Null));
    }

    #[test]
    fn test_per_game_matches_rounded_ratio() {
        let mut table = Table::new("T", cols(&["gp", "pts"]))
            .with_rows(vec![vec![Cell::Int(7), Cell::Int(150)]]);
        add_per_game_columns(&mut table);
        assert_eq!(
            table.cell(0, "pts_per_game"),
            Some(&Cell::Float(round1(150.0 / 7.0)))
        );
    }

    #[test]
    fn test_sanitize_cell_non_finite() {
        assert_eq!(sanitize_cell(&Cell::Float(f64::NAN)), Value::Null);
        assert_eq!(sanitize_cell(&Cell::Float(f64::INFINITY)), Value::Null);
        assert_eq!(sanitize_cell(&Cell::Float(1.5)), json!(1.5));
        assert_eq!(sanitize_cell(&Cell::Int(7)), json!(7));
    }

    #[test]
    fn test_to_records_excludes_columns() {
        let table = Table::new("T", cols(&["player_id", "season_id", "pts"])).with_rows(vec![
            vec![Cell::Int(2544), "2020-21".into(), Cell::Float(f64::NAN)],
        ]);
        let records = to_records(&table, &["player_id"]);

        assert_eq!(records.len(), 1);
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({"season_id": "2020-21", "pts": null})
        );
    }
}
