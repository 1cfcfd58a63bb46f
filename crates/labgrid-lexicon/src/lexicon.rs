//! Keyword tables driving every lexical heuristic.
//!
//! A [`Lexicon`] is immutable configuration: build it once (the built-in
//! Russian/English default, or a JSON replacement) and share it across
//! document parses. Fields missing from a JSON file fall back to the
//! built-in values.

use serde::{Deserialize, Serialize};

use labgrid_model::ColumnRole;

use crate::error::LexiconError;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

/// Header keywords for each column role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnKeywords {
    pub test_name: Vec<String>,
    pub result: Vec<String>,
    pub norm: Vec<String>,
    pub unit: Vec<String>,
}

impl ColumnKeywords {
    pub fn for_role(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::TestName => &self.test_name,
            ColumnRole::Result => &self.result,
            ColumnRole::Norm => &self.norm,
            ColumnRole::Unit => &self.unit,
        }
    }
}

impl Default for ColumnKeywords {
    fn default() -> Self {
        Self {
            test_name: words(&[
                "наименование",
                "показатель",
                "исследование",
                "тест",
                "анализ",
                "test",
                "parameter",
                "analyte",
                "investigation",
            ]),
            result: words(&["результат", "значение", "result", "value"]),
            norm: words(&[
                "референсные значения",
                "референс",
                "норма",
                "reference",
                "norm",
                "range",
            ]),
            unit: words(&["единицы", "ед. изм", "ед.изм", "unit", "units"]),
        }
    }
}

/// A canonical unit and the substrings that reveal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSuffix {
    pub unit: String,
    pub keywords: Vec<String>,
}

impl UnitSuffix {
    fn new(unit: &str, keywords: &[&str]) -> Self {
        Self {
            unit: unit.to_string(),
            keywords: words(keywords),
        }
    }
}

fn default_unit_suffixes() -> Vec<UnitSuffix> {
    // Order matters: the first unit with a matching keyword wins, so
    // specific spellings come before their substrings (mg/l before g/l).
    vec![
        UnitSuffix::new("Seconds", &["sec", "сек"]),
        UnitSuffix::new("INR", &["inr", "мно"]),
        UnitSuffix::new("%", &["%"]),
        UnitSuffix::new("mmol/L", &["ммоль/л", "mmol/l"]),
        UnitSuffix::new("µmol/L", &["мкмоль/л", "µmol/l", "umol/l"]),
        UnitSuffix::new("mg/L", &["мг/л", "mg/l"]),
        UnitSuffix::new("g/L", &["г/л", "g/l"]),
        UnitSuffix::new("U/L", &["ед/л", "ме/л", "iu/l", "u/l"]),
        UnitSuffix::new("10^12/L", &["10^12", "10*12", "10¹²"]),
        UnitSuffix::new("10^9/L", &["10^9", "10*9", "10⁹"]),
        UnitSuffix::new("mm/h", &["мм/ч", "mm/h"]),
    ]
}

/// Duration keywords, one family per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeKeywords {
    pub hours: Vec<String>,
    pub minutes: Vec<String>,
    pub seconds: Vec<String>,
}

impl Default for TimeKeywords {
    fn default() -> Self {
        Self {
            hours: words(&["hours", "hour", "hrs", "hr", "h", "часов", "часа", "час", "ч"]),
            minutes: words(&["minutes", "minute", "mins", "min", "минуты", "минут", "мин"]),
            seconds: words(&[
                "seconds", "second", "secs", "sec", "s", "секунды", "секунд", "сек", "с",
            ]),
        }
    }
}

/// Label families for patient metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientLabels {
    pub name: Vec<String>,
    pub dob: Vec<String>,
    pub report_date: Vec<String>,
    pub height: Vec<String>,
    pub weight: Vec<String>,
    /// Words that end a free-text name in the first-page text scan.
    pub stop_words: Vec<String>,
}

impl Default for PatientLabels {
    fn default() -> Self {
        Self {
            name: words(&[
                "ф.и.о.",
                "ф.и.о",
                "фио",
                "фамилия",
                "пациент",
                "patient",
                "patient name",
                "full name",
            ]),
            dob: words(&[
                "дата рождения",
                "д.р.",
                "г.р.",
                "date of birth",
                "birth date",
                "dob",
            ]),
            report_date: words(&[
                "дата исследования",
                "дата выдачи",
                "дата взятия",
                "дата",
                "report date",
                "date",
            ]),
            height: words(&["рост", "height"]),
            weight: words(&["масса тела", "вес", "weight"]),
            stop_words: words(&[
                "дата", "д.р.", "г.р.", "пол", "возраст", "рост", "вес", "date", "dob", "sex",
                "gender", "age", "height", "weight",
            ]),
        }
    }
}

/// All keyword tables used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub column_keywords: ColumnKeywords,
    /// Words that mark a line as a section label.
    pub section_keywords: Vec<String>,
    /// Printer footers, lab contacts, signature lines.
    pub noise_terms: Vec<String>,
    pub unit_suffixes: Vec<UnitSuffix>,
    pub time_keywords: TimeKeywords,
    pub patient: PatientLabels,
    /// Free-text culture/positivity findings.
    pub finding_keywords: Vec<String>,
    /// Category words for antibiotic susceptibility sections.
    pub antibiotic_keywords: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            column_keywords: ColumnKeywords::default(),
            section_keywords: words(&[
                "анализ",
                "исследование",
                "крови",
                "мочи",
                "кала",
                "биохими",
                "гематолог",
                "коагулограмма",
                "гемостаз",
                "гормон",
                "иммунолог",
                "серолог",
                "посев",
                "микробиолог",
                "антибиотик",
                "analysis",
                "blood",
                "urine",
                "biochemistry",
                "hematology",
                "coagulation",
                "hormone",
                "immunology",
                "culture",
                "panel",
            ]),
            noise_terms: words(&[
                "страница",
                "page",
                "напечатано",
                "printed",
                "тел.",
                "телефон",
                "phone",
                "www",
                "e-mail",
                "email",
                "подпись",
                "signature",
                "врач",
                "лицензия",
                "license",
                "eucast",
                "версия",
                "version",
                "адрес",
                "address",
            ]),
            unit_suffixes: default_unit_suffixes(),
            time_keywords: TimeKeywords::default(),
            patient: PatientLabels::default(),
            finding_keywords: words(&[
                "обнаружен",
                "выделен",
                "рост микрофлоры",
                "рост флоры",
                "detected",
                "growth of microflora",
            ]),
            antibiotic_keywords: words(&["антибиотик", "antibiotic", "susceptibility"]),
        }
    }
}

impl Lexicon {
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Checks the invariants the engine relies on: a non-empty result
    /// family (header detection depends on it) and no blank keywords.
    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.column_keywords.result.is_empty() {
            return Err(LexiconError::invalid("result keyword family is empty"));
        }
        let families: [(&str, &[String]); 16] = [
            ("column_keywords.test_name", &self.column_keywords.test_name),
            ("column_keywords.result", &self.column_keywords.result),
            ("column_keywords.norm", &self.column_keywords.norm),
            ("column_keywords.unit", &self.column_keywords.unit),
            ("section_keywords", &self.section_keywords),
            ("noise_terms", &self.noise_terms),
            ("time_keywords.hours", &self.time_keywords.hours),
            ("time_keywords.minutes", &self.time_keywords.minutes),
            ("time_keywords.seconds", &self.time_keywords.seconds),
            ("patient.name", &self.patient.name),
            ("patient.dob", &self.patient.dob),
            ("patient.report_date", &self.patient.report_date),
            ("patient.height", &self.patient.height),
            ("patient.weight", &self.patient.weight),
            ("finding_keywords", &self.finding_keywords),
            ("antibiotic_keywords", &self.antibiotic_keywords),
        ];
        for (family, keywords) in families {
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(LexiconError::invalid(format!(
                    "{family} contains a blank keyword"
                )));
            }
        }
        for suffix in &self.unit_suffixes {
            if suffix.unit.trim().is_empty() {
                return Err(LexiconError::invalid("unit suffix with blank unit"));
            }
            if suffix.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(LexiconError::invalid(format!(
                    "unit suffix {} contains a blank keyword",
                    suffix.unit
                )));
            }
        }
        Ok(())
    }

    /// Keywords of a column role.
    pub fn role_keywords(&self, role: ColumnRole) -> &[String] {
        self.column_keywords.for_role(role)
    }
}
