//! Per-player statistics index built from the stats tab.
//!
//! Unlike the club index there is no verified gate here: every row with a
//! player id is kept.

use crate::model::{PlayerStatsIndex, StatRow};
use crate::witb::fields::{get_field, RawRow};

/// Year bucket for rows without `as_of_year`.
pub const UNKNOWN_YEAR: &str = "_";

pub fn stat_row_from(row: &RawRow) -> StatRow {
    let field = |candidates: &[&str]| get_field(row, candidates);
    StatRow {
        stat_key: field(&["stat_key", "stat key"]),
        stat_label_en: field(&["stat_label_en", "stat label en"]),
        stat_label_ja: field(&["stat_label_ja", "stat label ja"]),
        value: field(&["value", "Value"]),
        unit: field(&["unit", "Unit"]),
        rank: field(&["rank", "Rank"]),
        source_name: field(&["source_name", "source name"]),
        source_url: field(&["source_url", "source url"]),
        notes: field(&["notes", "Notes"]),
    }
}

/// Groups rows into `year -> player_id -> rows`, keeping row order per player.
pub fn aggregate_stats(rows: &[RawRow]) -> PlayerStatsIndex {
    let mut index = PlayerStatsIndex::default();
    for row in rows {
        let player_id = get_field(row, &["player_id", "player id"]);
        if player_id.is_empty() {
            continue;
        }
        let mut year = get_field(row, &["as_of_year", "as of year"]);
        if year.is_empty() {
            year = UNKNOWN_YEAR.to_string();
        }
        index.push(year, player_id, stat_row_from(row));
    }
    index
}
