pub(crate) fn contains_ignore_case(value: &str, pattern: &str) -> bool {
    value.to_lowercase().contains(&pattern.to_lowercase())
}

pub(crate) fn strip_chars(value: &str, chars: &[char]) -> String {
    value.chars().filter(|c| !chars.contains(c)).collect()
}
