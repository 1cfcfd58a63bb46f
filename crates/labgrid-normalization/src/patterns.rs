/// Regex alternation of `keywords`: trimmed, escaped, blank entries
/// dropped, longest first so a short form never shadows a longer spelling.
/// `None` when nothing remains.
pub fn keyword_alternation<S: AsRef<str>>(keywords: &[S]) -> Option<String> {
    let mut keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return None;
    }
    keywords.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    Some(
        keywords
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|"),
    )
}
