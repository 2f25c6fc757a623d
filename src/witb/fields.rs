//! Loosely-keyed row access.
//!
//! Spreadsheet headers drift between tabs (`player_id`, `Player ID`,
//! `player id`), so lookups go through [`get_field`], which tries each
//! candidate spelling verbatim and then against normalized header names.

/// One spreadsheet row as `(header, value)` pairs in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    fn exact(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Trims, lowercases and collapses whitespace runs to `_`.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Returns the first non-empty (trimmed) value among `candidates`, or `""`.
///
/// Each candidate is tried verbatim first, then against every header after
/// normalization. Absence is never an error.
pub fn get_field(row: &RawRow, candidates: &[&str]) -> String {
    for candidate in candidates {
        if let Some(value) = row.exact(candidate).map(str::trim) {
            if !value.is_empty() {
                return value.to_string();
            }
        }

        let wanted = normalize_header(candidate);
        let found = row
            .cells
            .iter()
            .filter(|(k, _)| normalize_header(k) == wanted)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty());
        if let Some(value) = found {
            return value.to_string();
        }
    }
    String::new()
}
