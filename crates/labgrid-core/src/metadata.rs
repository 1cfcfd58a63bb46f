use std::sync::LazyLock;

use regex::Regex;

static PRINTED_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}\.\d{2}\.\d{4}),\s+(\d{2}:\d{2})").expect("Invalid timestamp regex")
});

/// First printer timestamp ("DD.MM.YYYY, HH:MM") among `lines`, rendered
/// as "DD.MM.YYYY HH:MM".
pub fn find_printed_at<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<String> {
    lines.into_iter().find_map(|line| {
        let caps = PRINTED_AT.captures(line)?;
        Some(format!("{} {}", caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_timestamp_wins() {
        let lines = [
            "Лаборатория №1",
            "Напечатано: 14.05.2024, 09:31",
            "Printed 15.05.2024, 10:00",
        ];
        assert_eq!(find_printed_at(lines).as_deref(), Some("14.05.2024 09:31"));
    }

    #[test]
    fn requires_comma_and_time() {
        assert_eq!(find_printed_at(["Дата: 14.05.2024"]), None);
        assert_eq!(find_printed_at(["14.05.2024 09:31"]), None);
    }
}
