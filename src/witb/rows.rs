use csv::ReaderBuilder;

use crate::traits::ParseError;
use crate::witb::fields::RawRow;

/// Decodes one published tab into header-keyed rows.
///
/// A leading BOM is dropped and ragged rows are accepted: cells beyond the
/// header are ignored and missing trailing cells are simply absent.
pub fn parse_tab_csv(text: &str) -> Result<Vec<RawRow>, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows: Vec<RawRow> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        );
    }
    Ok(rows)
}
