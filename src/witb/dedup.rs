use std::collections::HashSet;

use crate::model::IndexEntity;

#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    pub entities: Vec<IndexEntity>,
    pub dropped: usize,
}

/// Keeps the first entity for each id; later ones are dropped.
///
/// Input order is configured tab order then row order, so an earlier tab
/// always wins over a later one.
pub fn dedup_first_wins(entities: Vec<IndexEntity>) -> DedupOutcome {
    let before = entities.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    let entities: Vec<IndexEntity> = entities
        .into_iter()
        .filter(|entity| seen.insert(entity.id().to_string()))
        .collect();

    DedupOutcome {
        dropped: before - entities.len(),
        entities,
    }
}
