use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::witb::search::build_search_text;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: String, // empty for orphan rows
    pub name: String,
}

impl PlayerRef {
    pub fn is_orphan(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubInfo {
    pub brand: String,
    pub model: String,
}

/// Spec column. Structured fields are only set for wedges that follow the
/// `loft-bounceGRIND@actual` convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecParsed {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loft_label: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grind: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_loft"
    )]
    pub loft_actual: Option<f64>,
}

/// Whole lofts are written as integers (`60`, not `60.0`).
fn serialize_loft<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
            serializer.serialize_i64(v as i64)
        }
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShaftParsed {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub name: String,
    pub url: String,
    pub verified: bool,
}

/// Normalized fields of one index entity, before identity and search text
/// are derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityFields {
    pub player: PlayerRef,
    pub category: String,
    pub as_of_ym: String, // opaque snapshot token, never parsed as a date
    pub slot: String,
    pub club: ClubInfo,
    pub spec: SpecParsed,
    pub shaft: ShaftParsed,
    pub source: SourceRef,
}

impl EntityFields {
    /// Identity key `player_id|as_of_ym|category|slot`.
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.player.id, self.as_of_ym, self.category, self.slot
        )
    }
}

/// One club/slot attributed to one player at one snapshot.
///
/// `id` and `search_text` are derived from the other fields at construction
/// and cannot be set independently, so an entity is immutable once built.
/// Deserializing re-derives both and ignores whatever the input carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntityFields")]
pub struct IndexEntity {
    id: String,
    #[serde(flatten)]
    fields: EntityFields,
    search_text: String,
}

impl IndexEntity {
    pub fn new(fields: EntityFields) -> Self {
        Self {
            id: fields.identity_key(),
            search_text: build_search_text(&fields),
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &EntityFields {
        &self.fields
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }
}

impl From<EntityFields> for IndexEntity {
    fn from(fields: EntityFields) -> Self {
        Self::new(fields)
    }
}

/// One named statistic for one player in one year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRow {
    pub stat_key: String,
    pub stat_label_en: String,
    pub stat_label_ja: String,
    pub value: String,
    pub unit: String,
    pub rank: String,
    pub source_name: String,
    pub source_url: String,
    pub notes: String,
}

/// `byYear[year][player_id] -> rows`, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStatsIndex {
    pub by_year: BTreeMap<String, BTreeMap<String, Vec<StatRow>>>,
}

impl PlayerStatsIndex {
    pub fn push(&mut self, year: String, player_id: String, row: StatRow) {
        self.by_year
            .entry(year)
            .or_default()
            .entry(player_id)
            .or_default()
            .push(row);
    }

    pub fn get(&self, year: &str, player_id: &str) -> Option<&[StatRow]> {
        self.by_year
            .get(year)
            .and_then(|players| players.get(player_id))
            .map(Vec::as_slice)
    }

    pub fn total_rows(&self) -> usize {
        self.by_year
            .values()
            .flat_map(|players| players.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}
