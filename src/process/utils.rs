/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render a numeric cell the way the sheet shows it: whole numbers without a
/// trailing `.0`, everything else in shortest round-trip form, NaN as `nan`.
pub fn render_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_str() {
        assert_eq!(clean_str("  도서명 "), "도서명");
        assert_eq!(clean_str("\"저자\""), "저자");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn test_render_float() {
        assert_eq!(render_float(2024.0), "2024");
        assert_eq!(render_float(-3.0), "-3");
        assert_eq!(render_float(813.6), "813.6");
        assert_eq!(render_float(f64::NAN), "nan");
        assert_eq!(render_float(f64::INFINITY), "inf");
    }
}
