//! Formatting utilities for Telegram HTML parse mode.

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `<b>…</b>` around escaped text.
pub fn bold(text: &str) -> String {
    format!("<b>{}</b>", escape_html(text))
}

/// `<code>…</code>` around escaped text.
pub fn code(text: &str) -> String {
    format!("<code>{}</code>", escape_html(text))
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out = s.chars().take(keep).collect::<String>();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_telegram_html_specials() {
        assert_eq!(
            escape_html(r#"Tom & Jerry <"uncut">"#),
            "Tom &amp; Jerry &lt;&quot;uncut&quot;&gt;"
        );
    }

    #[test]
    fn bold_and_code_escape_their_content() {
        assert_eq!(bold("A<B"), "<b>A&lt;B</b>");
        assert_eq!(code("42"), "<code>42</code>");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("short", 10), "short");
        let hindi = "रिज़ल्ट".repeat(10);
        let t = truncate_text(&hindi, 8);
        assert_eq!(t.chars().count(), 8);
        assert!(t.ends_with("..."));
    }
}
