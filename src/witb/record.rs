//! Row → entity conversion behind the verified gate.

use crate::model::{ClubInfo, EntityFields, IndexEntity, PlayerRef, SourceRef};
use crate::witb::fields::{get_field, RawRow};
use crate::witb::shaft::parse_shaft;
use crate::witb::spec::parse_spec;

const TAB_PREFIX: &str = "witb_";

/// Category used when a row has no explicit one: the tab name without its
/// `witb_` prefix.
pub fn category_from_tab(tab: &str) -> &str {
    match tab.strip_prefix(TAB_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => tab,
    }
}

/// Only rows whose verified cell reads `TRUE` (any case) are indexed.
pub fn is_verified(row: &RawRow) -> bool {
    get_field(row, &["verified", "Verified"]).to_uppercase() == "TRUE"
}

/// Builds one entity from a row that already passed the gate.
///
/// Missing cells become empty strings; nothing here fails.
pub fn build_entity(row: &RawRow, category_fallback: &str) -> IndexEntity {
    let field = |candidates: &[&str]| get_field(row, candidates);

    let mut category = field(&["category", "Category"]);
    if category.is_empty() {
        category = category_fallback.to_string();
    }
    let spec = parse_spec(&field(&["spec", "Spec"]), &category);
    let shaft = parse_shaft(&field(&["shaft", "Shaft"]));

    IndexEntity::new(EntityFields {
        player: PlayerRef {
            id: field(&["player_id", "player id"]),
            name: field(&["player_name", "player name"]),
        },
        as_of_ym: field(&["as_of_date", "as_of_ym", "as of date", "as of ym"]),
        slot: field(&["slot", "Slot"]),
        club: ClubInfo {
            brand: field(&["brand", "Brand"]),
            model: field(&["model", "Model"]),
        },
        spec,
        shaft,
        source: SourceRef {
            name: field(&["source_name", "source name"]),
            url: field(&["source_url", "source url"]),
            verified: true,
        },
        category,
    })
}

/// Entities and row counters for one tab (or several, once merged).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TabBuild {
    pub entities: Vec<IndexEntity>,
    pub rows_seen: usize,
    pub rows_verified: usize,
}

impl TabBuild {
    /// Appends `other` after `self`, keeping entity order.
    pub fn merge(mut self, other: TabBuild) -> TabBuild {
        self.entities.extend(other.entities);
        self.rows_seen += other.rows_seen;
        self.rows_verified += other.rows_verified;
        self
    }
}

/// Gates and builds every row of one tab, in row order.
pub fn build_tab(tab: &str, rows: &[RawRow]) -> TabBuild {
    let category_fallback = category_from_tab(tab);
    let entities: Vec<IndexEntity> = rows
        .iter()
        .filter(|row| is_verified(row))
        .map(|row| build_entity(row, category_fallback))
        .collect();

    TabBuild {
        rows_seen: rows.len(),
        rows_verified: entities.len(),
        entities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_category_from_tab() {
        assert_eq!(category_from_tab("witb_wedges"), "wedges");
        assert_eq!(category_from_tab("witb_rows"), "rows");
        assert_eq!(category_from_tab("putters"), "putters");
        assert_eq!(category_from_tab("witb_"), "witb_");
    }

    #[test]
    fn test_verified_gate_is_case_insensitive_and_exact() {
        assert!(is_verified(&row(&[("verified", "TRUE")])));
        assert!(is_verified(&row(&[("Verified", " true ")])));
        assert!(!is_verified(&row(&[("verified", "FALSE")])));
        assert!(!is_verified(&row(&[("verified", "yes")])));
        assert!(!is_verified(&row(&[("verified", "")])));
        assert!(!is_verified(&row(&[("brand", "Vokey")])));
    }

    #[test]
    fn test_build_entity_from_loose_headers() {
        let r = row(&[
            ("Player ID", "p1"),
            ("Player Name", "Player One"),
            ("As Of Date", "2025-06"),
            ("Slot", "56"),
            ("Brand", "Vokey"),
            ("Model", "SM9"),
            ("Spec", "56-10S@56.3"),
            ("Shaft", "DG TI S400"),
            ("Source Name", "Tour"),
            ("Source URL", "https://example.com/witb"),
            ("Verified", "TRUE"),
        ]);
        let entity = build_entity(&r, "wedges");
        let fields = entity.fields();

        assert_eq!(entity.id(), "p1|2025-06|wedges|56");
        assert_eq!(fields.player.name, "Player One");
        assert_eq!(fields.category, "wedges");
        assert_eq!(fields.spec.grind.as_deref(), Some("S"));
        assert_eq!(fields.source.url, "https://example.com/witb");
        assert!(fields.source.verified);
        assert!(entity.search_text().contains("Player One"));
        assert!(entity.search_text().contains("wedges"));
    }

    #[test]
    fn test_explicit_category_beats_tab_fallback() {
        let r = row(&[("category", "irons"), ("spec", "56-10S@56.3")]);
        let entity = build_entity(&r, "wedges");
        assert_eq!(entity.fields().category, "irons");
        // Spec grammar follows the resolved category, not the tab.
        assert!(entity.fields().spec.loft_label.is_none());
    }

    #[test]
    fn test_as_of_ym_fallback_column() {
        let r = row(&[("as_of_ym", "2024-12"), ("player_id", "p3")]);
        assert_eq!(build_entity(&r, "drivers").fields().as_of_ym, "2024-12");
    }

    #[test]
    fn test_build_tab_counts_and_filters() {
        let rows = vec![
            row(&[("player_id", "p1"), ("slot", "1"), ("verified", "TRUE")]),
            row(&[("player_id", "p1"), ("slot", "2"), ("verified", "FALSE")]),
            row(&[("player_id", "p2"), ("slot", "3"), ("verified", "true")]),
        ];
        let build = build_tab("witb_drivers", &rows);

        assert_eq!(build.rows_seen, 3);
        assert_eq!(build.rows_verified, 2);
        let ids: Vec<_> = build.entities.iter().map(IndexEntity::id).collect();
        assert_eq!(ids, vec!["p1||drivers|1", "p2||drivers|3"]);
    }

    #[test]
    fn test_merge_keeps_order() {
        let a = build_tab(
            "witb_drivers",
            &[row(&[("player_id", "a"), ("verified", "TRUE")])],
        );
        let b = build_tab(
            "witb_putters",
            &[
                row(&[("player_id", "b"), ("verified", "TRUE")]),
                row(&[("player_id", "c")]),
            ],
        );
        let merged = TabBuild::default().merge(a).merge(b);

        assert_eq!(merged.rows_seen, 3);
        assert_eq!(merged.rows_verified, 2);
        assert_eq!(merged.entities[0].fields().category, "drivers");
        assert_eq!(merged.entities[1].fields().category, "putters");
    }
}
