use crate::config::SENTINEL;

/// Characters dropped from a shelving date before digits are extracted.
const DATE_SEPARATORS: &[char] = &['-', '.', '/', ' ', '년', '월', '일'];

/// Normalize a shelving date to `YYYYMMDD`.
///
/// Separators are stripped and only ASCII digits kept; when at least eight
/// digits remain the first eight are returned. Anything shorter leaves the
/// original value untouched. The month and day are not range-checked.
pub fn normalize_shelving_date(raw: &str) -> String {
    if raw == SENTINEL || raw == "nan" {
        return raw.to_string();
    }

    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !DATE_SEPARATORS.contains(c))
        .filter(char::is_ascii_digit)
        .collect();

    if digits.len() >= 8 {
        digits[..8].to_string()
    } else {
        raw.to_string()
    }
}
