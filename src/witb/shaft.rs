use regex::Regex;
use std::sync::OnceLock;

use crate::model::ShaftParsed;

/// Compound alias added when a shaft names both Dynamic Gold and Tour Issue.
pub const DG_TI_ALIAS: &str = "DG TI";

fn flex_code_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[XSML]\d+").expect("flex code pattern is valid"))
}

/// Classification of one whitespace-separated shaft token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaftToken<'a> {
    /// `DG`, Dynamic Gold.
    DynamicGold,
    /// `TI`, Tour Issue.
    TourIssue,
    /// Flex/weight code such as `S300` or `X100`.
    Flex(&'a str),
    Other(&'a str),
}

impl<'a> ShaftToken<'a> {
    pub fn classify(token: &'a str) -> Self {
        if token.eq_ignore_ascii_case("DG") {
            Self::DynamicGold
        } else if token.eq_ignore_ascii_case("TI") {
            Self::TourIssue
        } else if flex_code_pattern().is_match(token) {
            Self::Flex(token)
        } else {
            Self::Other(token)
        }
    }

    fn display(&self) -> &'a str {
        match *self {
            Self::DynamicGold => "Dynamic Gold",
            Self::TourIssue => "Tour Issue",
            Self::Flex(t) | Self::Other(t) => t,
        }
    }

    fn aliases(&self) -> &[&'a str] {
        match self {
            Self::DynamicGold => &["DG", "Dynamic Gold", "DynamicGold"],
            Self::TourIssue => &["TI", "Tour Issue"],
            Self::Flex(t) | Self::Other(t) => std::slice::from_ref(t),
        }
    }
}

/// Parses the free-text shaft column into a display label and search aliases.
pub fn parse_shaft(raw: &str) -> ShaftParsed {
    let mut shaft = ShaftParsed {
        raw: raw.to_string(),
        ..ShaftParsed::default()
    };
    if raw.trim().is_empty() {
        return shaft;
    }

    let tokens: Vec<ShaftToken<'_>> = raw.split_whitespace().map(ShaftToken::classify).collect();

    let mut aliases: Vec<String> = Vec::new();
    let mut push_alias = |alias: &str| {
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
        }
    };
    for token in &tokens {
        for alias in token.aliases() {
            push_alias(*alias);
        }
    }
    let has_dg = tokens.contains(&ShaftToken::DynamicGold);
    let has_ti = tokens.contains(&ShaftToken::TourIssue);
    if has_dg && has_ti {
        push_alias(DG_TI_ALIAS);
    }

    let display = tokens
        .iter()
        .map(ShaftToken::display)
        .collect::<Vec<_>>()
        .join(" ");

    shaft.display = Some(display);
    shaft.aliases = Some(aliases);
    shaft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(shaft: &ShaftParsed) -> Vec<&str> {
        shaft
            .aliases
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_dg_ti_flex() {
        let shaft = parse_shaft("DG TI S400");
        assert_eq!(shaft.raw, "DG TI S400");
        assert_eq!(
            shaft.display.as_deref(),
            Some("Dynamic Gold Tour Issue S400")
        );
        assert_eq!(
            aliases(&shaft),
            vec![
                "DG",
                "Dynamic Gold",
                "DynamicGold",
                "TI",
                "Tour Issue",
                "S400",
                "DG TI"
            ]
        );
    }

    #[test]
    fn test_compound_alias_any_order_and_case() {
        let shaft = parse_shaft("ti x100 dg");
        assert!(aliases(&shaft).contains(&DG_TI_ALIAS));
        assert_eq!(
            shaft.display.as_deref(),
            Some("Tour Issue x100 Dynamic Gold")
        );
    }

    #[test]
    fn test_single_brand_token_has_no_compound_alias() {
        assert!(!aliases(&parse_shaft("DG S300")).contains(&DG_TI_ALIAS));
        assert!(!aliases(&parse_shaft("KBS TI X")).contains(&DG_TI_ALIAS));
    }

    #[test]
    fn test_other_tokens_pass_through_and_dedupe() {
        let shaft = parse_shaft("Project  X  LZ 6.5 X");
        assert_eq!(shaft.display.as_deref(), Some("Project X LZ 6.5 X"));
        assert_eq!(aliases(&shaft), vec!["Project", "X", "LZ", "6.5"]);
    }

    #[test]
    fn test_empty_shaft_has_raw_only() {
        assert_eq!(parse_shaft(""), ShaftParsed::default());
        let blank = parse_shaft("   ");
        assert_eq!(blank.raw, "   ");
        assert!(blank.display.is_none());
        assert!(blank.aliases.is_none());
    }

    #[test]
    fn test_classify() {
        assert_eq!(ShaftToken::classify("dG"), ShaftToken::DynamicGold);
        assert_eq!(ShaftToken::classify("S300"), ShaftToken::Flex("S300"));
        assert_eq!(ShaftToken::classify("Tour"), ShaftToken::Other("Tour"));
    }
}
