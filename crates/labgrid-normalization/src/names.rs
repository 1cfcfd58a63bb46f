use std::sync::LazyLock;

use regex::Regex;

static LEADING_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*\)\s*").expect("Invalid ordinal regex"));

/// Strips a `"<Group>:"` prefix and a `"N)"` ordinal from an antibiotic
/// name. A name that would become empty is returned trimmed but otherwise
/// unchanged.
pub fn clean_antibiotic_name(name: &str) -> String {
    let original = name.trim();
    let mut cleaned = original;
    if let Some((_, rest)) = cleaned.split_once(':') {
        cleaned = rest.trim();
    }
    let cleaned = LEADING_ORDINAL.replace(cleaned, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        original.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_group_and_ordinal() {
        assert_eq!(
            clean_antibiotic_name("Пенициллины: 1) Бензилпенициллин"),
            "Бензилпенициллин"
        );
        assert_eq!(clean_antibiotic_name("2) Ampicillin"), "Ampicillin");
        assert_eq!(clean_antibiotic_name("Cephalosporins: Cefazolin"), "Cefazolin");
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(clean_antibiotic_name(" Amikacin "), "Amikacin");
    }

    #[test]
    fn never_empties_a_name() {
        assert_eq!(clean_antibiotic_name("Group:"), "Group:");
        assert_eq!(clean_antibiotic_name("1)"), "1)");
    }
}
