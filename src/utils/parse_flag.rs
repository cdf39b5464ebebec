/// Parse a boolean query flag. The dashboard sends `spot_bid=True`, so matching is case-insensitive.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(t) if t.is_empty() => default,
        Some(t) => matches!(t.as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn python_style_true_is_accepted() {
        assert!(parse_flag(Some("True"), false));
    }

    #[test]
    fn missing_or_blank_uses_default() {
        assert!(!parse_flag(None, false));
        assert!(parse_flag(Some("  "), true));
    }

    #[test]
    fn unknown_words_are_false() {
        assert!(!parse_flag(Some("False"), true));
        assert!(!parse_flag(Some("maybe"), true));
    }
}
