/// Truncate to at most `limit` characters, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Escape text for interpolation into an HTML body.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_limit() {
        assert_eq!(truncate_chars("herpetology", 80), "herpetology");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("🐢🐢🐢🐢", 2), "🐢🐢");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"M.S. & <b>"field" crew</b>"#),
            "M.S. &amp; &lt;b&gt;&quot;field&quot; crew&lt;/b&gt;"
        );
    }
}
