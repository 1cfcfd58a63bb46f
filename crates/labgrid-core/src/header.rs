//! Table labels from the text above a table.
//!
//! Candidates are the text lines whose bottom edge lies inside a band of
//! `header_window` points above the table, minus every line rendered inside
//! some table on the page. Each candidate is scored on lexical cues and the
//! best positive score wins; ties go to the line closest to the table.
//! When nothing scores positively the caller keeps its previous label.

use labgrid_lexicon::Lexicon;
use labgrid_match::FuzzyMatcher;
use labgrid_model::{BBox, Page, ParserOptions, TextLine};

const UPPERCASE_BONUS: i32 = 50;
const SECTION_KEYWORD_BONUS: i32 = 50;
const NOISE_PENALTY: i32 = -100;
const LENGTH_PENALTY: i32 = -20;

/// Upper-case text must be longer than this to earn the bonus.
const MIN_UPPERCASE_LEN: usize = 5;
const MIN_LABEL_LEN: usize = 3;
const MAX_LABEL_LEN: usize = 100;

fn is_upper_case(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && text.to_uppercase() == text
}

/// Lexical score of a candidate label.
pub fn score_label(text: &str, lexicon: &Lexicon, threshold: f64) -> i32 {
    let text = text.trim();
    let matcher = FuzzyMatcher::new(threshold);
    let len = text.chars().count();
    let mut score = 0;

    if len > MIN_UPPERCASE_LEN && is_upper_case(text) {
        score += UPPERCASE_BONUS;
    }
    if matcher.contains_any(text, &lexicon.section_keywords) {
        score += SECTION_KEYWORD_BONUS;
    }
    if matcher.contains_any(text, &lexicon.noise_terms) {
        score += NOISE_PENALTY;
    }
    if !(MIN_LABEL_LEN..=MAX_LABEL_LEN).contains(&len) {
        score += LENGTH_PENALTY;
    }
    score
}

/// Best positively scored candidate. Candidates are given farthest first,
/// so a later candidate wins a tie.
pub fn best_label<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    lexicon: &Lexicon,
    threshold: f64,
) -> Option<&'a str> {
    let mut best: Option<(&'a str, i32)> = None;
    for text in candidates {
        let score = score_label(text, lexicon, threshold);
        if score > 0 && best.is_none_or(|(_, current)| score >= current) {
            best = Some((text, score));
        }
    }
    best.map(|(text, _)| text.trim())
}

/// Lines eligible as the label of a table at `table`, farthest first.
pub fn label_candidates<'a>(page: &'a Page, table: &BBox, window: f64) -> Vec<&'a TextLine> {
    let table_boxes: Vec<BBox> = page.tables.iter().filter_map(|t| t.bbox).collect();
    let mut candidates: Vec<&TextLine> = page
        .text_lines
        .iter()
        .filter(|line| line.bbox.bottom < table.top && table.top - line.bbox.bottom < window)
        .filter(|line| {
            let (x, y) = line.bbox.center();
            !table_boxes.iter().any(|bbox| bbox.strictly_contains(x, y))
        })
        .filter(|line| !line.text.trim().is_empty())
        .collect();
    candidates.sort_by(|a, b| a.bbox.bottom.total_cmp(&b.bbox.bottom));
    candidates
}

/// Label of the table at `table`, if any line above it qualifies.
pub fn find_label_above(
    page: &Page,
    table: &BBox,
    lexicon: &Lexicon,
    options: &ParserOptions,
) -> Option<String> {
    let candidates = label_candidates(page, table, options.header_window);
    best_label(
        candidates.iter().map(|line| line.text.as_str()),
        lexicon,
        options.match_threshold,
    )
    .map(str::to_string)
}
