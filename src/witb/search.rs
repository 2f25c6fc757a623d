use crate::model::EntityFields;

/// Builds the free-word search substrate for one entity.
///
/// Parts are collected in a fixed order (player name, category, brand,
/// model, spec raw, loft label, actual loft, bounce, grind, shaft display,
/// shaft aliases, source name), blanks dropped, duplicates removed keeping
/// the first occurrence, then joined with single spaces.
pub fn build_search_text(fields: &EntityFields) -> String {
    let spec = &fields.spec;
    let shaft = &fields.shaft;

    let mut parts: Vec<String> = vec![
        fields.player.name.clone(),
        fields.category.clone(),
        fields.club.brand.clone(),
        fields.club.model.clone(),
        spec.raw.clone(),
    ];
    parts.extend(spec.loft_label.map(|v| v.to_string()));
    parts.extend(spec.loft_actual.map(|v| v.to_string()));
    parts.extend(spec.bounce.map(|v| v.to_string()));
    parts.extend(spec.grind.clone());
    parts.extend(shaft.display.clone());
    parts.extend(shaft.aliases.iter().flatten().cloned());
    parts.push(fields.source.name.clone());

    let mut unique: Vec<String> = Vec::with_capacity(parts.len());
    for part in parts {
        if !part.is_empty() && !unique.contains(&part) {
            unique.push(part);
        }
    }
    unique.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClubInfo, PlayerRef, SourceRef};
    use crate::witb::{shaft::parse_shaft, spec::parse_spec};

    #[test]
    fn test_full_wedge_search_text() {
        let fields = EntityFields {
            player: PlayerRef {
                id: "p1".to_string(),
                name: "p1".to_string(),
            },
            category: "wedges".to_string(),
            as_of_ym: "2025-06".to_string(),
            slot: "56".to_string(),
            club: ClubInfo {
                brand: "Vokey".to_string(),
                model: "SM9".to_string(),
            },
            spec: parse_spec("56-10S@56.3", "wedges"),
            shaft: parse_shaft("DG TI S400"),
            source: SourceRef::default(),
        };

        assert_eq!(
            build_search_text(&fields),
            "p1 wedges Vokey SM9 56-10S@56.3 56 56.3 10 S \
             Dynamic Gold Tour Issue S400 DG Dynamic Gold DynamicGold TI Tour Issue S400 DG TI"
        );
    }

    #[test]
    fn test_whole_number_loft_prints_without_fraction() {
        let fields = EntityFields {
            category: "wedges".to_string(),
            spec: parse_spec("60-08M@60", "wedges"),
            ..EntityFields::default()
        };
        assert_eq!(build_search_text(&fields), "wedges 60-08M@60 60 8 M");
    }

    #[test]
    fn test_blanks_dropped_and_duplicates_removed() {
        let fields = EntityFields {
            player: PlayerRef {
                id: "p9".to_string(),
                name: "Ping".to_string(),
            },
            category: "putters".to_string(),
            club: ClubInfo {
                brand: "Ping".to_string(),
                model: String::new(),
            },
            source: SourceRef {
                name: "putters".to_string(),
                url: "https://example.com".to_string(),
                verified: true,
            },
            ..EntityFields::default()
        };
        assert_eq!(build_search_text(&fields), "Ping putters");
    }
}
