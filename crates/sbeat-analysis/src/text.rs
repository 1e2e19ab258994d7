//! Small text helpers shared by summary and effect generation.

/// Title-case an identifier: underscores become spaces and each word is
/// capitalized (`character_kiara` -> `Character Kiara`).
pub fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string to at most `max_chars` characters (UTF-8 safe).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
