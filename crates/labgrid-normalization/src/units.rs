//! Canonical unit detection from free text.

use labgrid_lexicon::UnitSuffix;
use labgrid_model::ResultRecord;

/// First canonical unit whose keyword occurs in `text` (case-insensitive).
pub fn detect_unit<'a>(text: Option<&str>, suffixes: &'a [UnitSuffix]) -> Option<&'a str> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    suffixes
        .iter()
        .find(|suffix| {
            suffix
                .keywords
                .iter()
                .any(|keyword| lower.contains(&keyword.to_lowercase()))
        })
        .map(|suffix| suffix.unit.as_str())
}

fn has_unit(row: &ResultRecord) -> bool {
    row.unit.as_deref().is_some_and(|unit| !unit.trim().is_empty())
}

/// Fills a missing unit from the norm text. Rows that already have a unit
/// are left alone, which makes the stage idempotent.
pub fn infer_missing_units(
    mut rows: Vec<ResultRecord>,
    suffixes: &[UnitSuffix],
) -> Vec<ResultRecord> {
    for row in &mut rows {
        if has_unit(row) {
            continue;
        }
        if let Some(unit) = detect_unit(row.norm.as_deref(), suffixes) {
            row.unit = Some(unit.to_string());
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use labgrid_lexicon::Lexicon;

    use super::*;

    fn row(norm: Option<&str>, unit: Option<&str>) -> ResultRecord {
        ResultRecord::draft("Coagulation", 1, "PT", "12")
            .with_norm(norm.map(str::to_string))
            .with_unit(unit.map(str::to_string))
    }

    #[test]
    fn detects_units_case_insensitively() {
        let lexicon = Lexicon::default();
        let suffixes = &lexicon.unit_suffixes;
        assert_eq!(detect_unit(Some("10-20 SEC"), suffixes), Some("Seconds"));
        assert_eq!(detect_unit(Some("3.9 - 6.1 ммоль/л"), suffixes), Some("mmol/L"));
        assert_eq!(detect_unit(Some("0 - 5 мг/л"), suffixes), Some("mg/L"));
        assert_eq!(detect_unit(Some("120-160 г/л"), suffixes), Some("g/L"));
        assert_eq!(detect_unit(Some("negative"), suffixes), None);
        assert_eq!(detect_unit(None, suffixes), None);
        assert_eq!(detect_unit(Some("  "), suffixes), None);
    }

    #[test]
    fn fills_unit_from_norm() {
        let lexicon = Lexicon::default();
        let rows = infer_missing_units(
            vec![row(Some("0.8-1.2 INR"), None)],
            &lexicon.unit_suffixes,
        );
        assert_eq!(rows[0].unit.as_deref(), Some("INR"));
    }

    #[test]
    fn keeps_existing_unit() {
        let lexicon = Lexicon::default();
        let rows = infer_missing_units(
            vec![row(Some("10-20 sec"), Some("s"))],
            &lexicon.unit_suffixes,
        );
        assert_eq!(rows[0].unit.as_deref(), Some("s"));
    }

    #[test]
    fn tolerates_missing_norm() {
        let lexicon = Lexicon::default();
        let rows = infer_missing_units(vec![row(None, None)], &lexicon.unit_suffixes);
        assert_eq!(rows[0].unit, None);
    }
}
