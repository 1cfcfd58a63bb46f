//! Splitting of cells that stack several results on separate lines.

use labgrid_lexicon::UnitSuffix;
use labgrid_model::ResultRecord;
use tracing::trace;

use crate::units::detect_unit;

fn segments(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// A row is expandable when its result holds two or more non-empty lines.
pub fn is_row_expandable(row: &ResultRecord) -> bool {
    segments(&row.text_value).len() >= 2
}

/// Replaces every composite row with one row per value line.
///
/// Norm lines pair with value lines by position only when both have the
/// same count; otherwise each sub-row receives the whole original norm.
/// Sub-row names carry the unit detected in their norm, or a 1-based
/// ordinal when no unit keyword matches.
pub fn expand_composite_rows(
    rows: Vec<ResultRecord>,
    suffixes: &[UnitSuffix],
) -> Vec<ResultRecord> {
    let mut expanded = Vec::with_capacity(rows.len());
    for row in rows {
        if !is_row_expandable(&row) {
            expanded.push(row);
            continue;
        }
        let values = segments(&row.text_value);
        let norms = row.norm.as_deref().map(segments).unwrap_or_default();
        let paired = norms.len() == values.len();
        trace!(
            test = %row.test_name,
            values = values.len(),
            norms = norms.len(),
            paired,
            "expanding composite row"
        );

        for (index, value) in values.iter().enumerate() {
            let norm = if paired {
                Some(norms[index].to_string())
            } else {
                row.norm.clone()
            };
            let suffix = detect_unit(norm.as_deref(), suffixes)
                .map_or_else(|| (index + 1).to_string(), str::to_string);
            expanded.push(ResultRecord {
                test_name: format!("{} ({suffix})", row.test_name),
                value: None,
                text_value: (*value).to_string(),
                norm,
                ..row.clone()
            });
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use labgrid_lexicon::Lexicon;

    use super::*;

    fn row(value: &str, norm: Option<&str>) -> ResultRecord {
        ResultRecord::draft("Coagulation", 2, "Prothrombin", value)
            .with_norm(norm.map(str::to_string))
    }

    #[test]
    fn splits_with_unit_suffixes() {
        let lexicon = Lexicon::default();
        let rows = expand_composite_rows(
            vec![row("12\n14", Some("10-20 sec\n5-10 INR"))],
            &lexicon.unit_suffixes,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].test_name, "Prothrombin (Seconds)");
        assert_eq!(rows[0].text_value, "12");
        assert_eq!(rows[0].norm.as_deref(), Some("10-20 sec"));
        assert_eq!(rows[1].test_name, "Prothrombin (INR)");
        assert_eq!(rows[1].text_value, "14");
        assert_eq!(rows[1].norm.as_deref(), Some("5-10 INR"));
        assert!(rows.iter().all(|r| r.page == 2 && r.category == "Coagulation"));
    }

    #[test]
    fn mismatched_norm_is_replicated() {
        let lexicon = Lexicon::default();
        let rows = expand_composite_rows(
            vec![row("1\n2\n3", Some("0-5\n0-6"))],
            &lexicon.unit_suffixes,
        );
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.norm.as_deref() == Some("0-5\n0-6")));
        let names: Vec<_> = rows.iter().map(|r| r.test_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Prothrombin (1)", "Prothrombin (2)", "Prothrombin (3)"]
        );
    }

    #[test]
    fn blank_lines_are_not_segments() {
        let lexicon = Lexicon::default();
        let single = row("12\n\n  ", None);
        assert!(!is_row_expandable(&single));
        let rows = expand_composite_rows(vec![single.clone()], &lexicon.unit_suffixes);
        assert_eq!(rows, vec![single]);
    }

    #[test]
    fn missing_norm_uses_ordinals() {
        let lexicon = Lexicon::default();
        let rows = expand_composite_rows(vec![row("5\n6", None)], &lexicon.unit_suffixes);
        assert_eq!(rows[0].test_name, "Prothrombin (1)");
        assert_eq!(rows[1].norm, None);
    }
}
