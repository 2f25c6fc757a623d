use regex::Regex;
use std::sync::OnceLock;

use crate::model::SpecParsed;

/// Only wedge specs carry a parseable grammar.
pub const WEDGE_CATEGORY: &str = "wedges";

fn wedge_spec_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)-(\d+)([A-Za-z]+)\s*@(\d+(?:\.\d+)?)$")
            .expect("wedge spec pattern is valid")
    })
}

/// Parses the free-text spec column.
///
/// For wedges, `56-10S@56.5` yields loft label 56, bounce 10, grind `S` and
/// actual loft 56.5. Anything else keeps only `raw`.
pub fn parse_spec(raw: &str, category: &str) -> SpecParsed {
    let mut spec = SpecParsed {
        raw: raw.to_string(),
        ..SpecParsed::default()
    };
    if category != WEDGE_CATEGORY {
        return spec;
    }

    let Some(caps) = wedge_spec_pattern().captures(raw.trim()) else {
        return spec;
    };

    // Out-of-range integers count as a non-match rather than an error.
    let (Ok(loft_label), Ok(bounce), Ok(loft_actual)) = (
        caps[1].parse::<u32>(),
        caps[2].parse::<u32>(),
        caps[4].parse::<f64>(),
    ) else {
        return spec;
    };

    spec.loft_label = Some(loft_label);
    spec.bounce = Some(bounce);
    spec.grind = Some(caps[3].to_string());
    spec.loft_actual = Some(loft_actual);
    spec
}
