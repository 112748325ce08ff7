use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating profile handles
    /// Lowercase letters, digits and underscores only
    /// - Valid: "jane_doe", "gaffer42", "_dp"
    /// - Invalid: "Jane", "jane-doe", "jane doe", "jané"
    pub static ref HANDLE_REGEX: Regex = Regex::new(r"^[a-z0-9_]+$").unwrap();
}

/// Character count as seen by users, not bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Trims and maps blank strings to `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
