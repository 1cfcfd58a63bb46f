//! Height and weight parsing.

use std::sync::LazyLock;

use regex::Regex;

static METERS_AND_CM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d)\s*[мm]\.?\s*(\d{1,2})").expect("Invalid height regex")
});

static CENTIMETERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:см|cm)").expect("Invalid height regex")
});

static METERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:м|m)(?:[^\p{L}]|$)").expect("Invalid height regex")
});

static KILOGRAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:кг|kg)").expect("Invalid weight regex")
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:[.,]\d+)?)\s*$").expect("Invalid number regex"));

/// Bare heights below this are meters.
const MAX_HEIGHT_IN_METERS: f64 = 3.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', ".").parse().ok())
}

/// Height in centimeters from forms like "1м72", "172 см", "1.72m", "172".
pub fn parse_height_cm(text: &str) -> Option<f64> {
    if let Some(caps) = METERS_AND_CM.captures(text) {
        let meters: f64 = caps.get(1)?.as_str().parse().ok()?;
        let centimeters: f64 = caps.get(2)?.as_str().parse().ok()?;
        return Some(meters * 100.0 + centimeters);
    }
    if let Some(cm) = capture_number(&CENTIMETERS, text) {
        return Some(round1(cm));
    }
    if let Some(m) = capture_number(&METERS, text) {
        return Some(round1(m * 100.0));
    }
    let bare = capture_number(&BARE_NUMBER, text)?;
    Some(if bare < MAX_HEIGHT_IN_METERS {
        round1(bare * 100.0)
    } else {
        round1(bare)
    })
}

/// Weight in kilograms from forms like "70кг", "70.5 kg", "70".
pub fn parse_weight_kg(text: &str) -> Option<f64> {
    capture_number(&KILOGRAMS, text)
        .or_else(|| capture_number(&BARE_NUMBER, text))
        .map(round1)
}
