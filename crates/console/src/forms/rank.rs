//! Rank field: an integer between 0 and 999 typed as free text.

pub const RANK_MAX: u16 = 999;
const RANK_MAX_DIGITS: usize = 3;

/// Keys accepted besides digits.
const EDITING_KEYS: [&str; 8] = [
    "Backspace",
    "Tab",
    "ArrowLeft",
    "ArrowRight",
    "Delete",
    "Home",
    "End",
    "Enter",
];

/// Normalized rank input: the text to show back and the bound value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankInput {
    pub text: String,
    pub value: Option<u16>,
}

/// Normalize typed or pasted text: non-digits dropped, first three digits
/// kept, leading zeros removed, clamped to [`RANK_MAX`].
pub fn normalize_rank_input(raw: &str) -> RankInput {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(RANK_MAX_DIGITS)
        .collect();
    if digits.is_empty() {
        return RankInput::default();
    }

    // At most three ascii digits, always fits.
    let value = digits.parse::<u16>().unwrap_or(RANK_MAX).min(RANK_MAX);
    RankInput {
        text: value.to_string(),
        value: Some(value),
    }
}

/// Whether a key press may reach the rank field.
pub fn is_rank_key_allowed(key: &str) -> bool {
    let is_digit = key.len() == 1 && key.bytes().all(|b| b.is_ascii_digit());
    is_digit || EDITING_KEYS.contains(&key)
}
