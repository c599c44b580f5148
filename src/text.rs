//! Cleaning of text extracted from markup
//!
//! Post bodies come back with layout whitespace and the site's `Comment:`
//! label mixed in. [`normalize_text`] removes both.

/// Label the site prepends to author updates inside a post body
pub const BOILERPLATE_LABEL: &str = "Comment:";

/// Cleans raw extracted text
///
/// Tabs and line breaks become spaces, every `Comment:` label is removed,
/// runs of whitespace collapse to one space and the ends are trimmed.
/// Applying it twice gives the same result as applying it once.
///
/// # Example
///
/// ```
/// use ideas_harvester::text::normalize_text;
///
/// assert_eq!(normalize_text("Long\tsetup\r\n\nComment: target hit"), "Long setup target hit");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let mut text: String = raw
        .chars()
        .map(|c| match c {
            '\t' | '\r' | '\n' => ' ',
            other => other,
        })
        .collect();

    // Removing one label can splice a new one together from its neighbours
    while text.contains(BOILERPLATE_LABEL) {
        text = text.replace(BOILERPLATE_LABEL, "");
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to at most `max_chars` characters
///
/// Counts `char`s, so a multi-byte character is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_control_whitespace() {
        assert_eq!(normalize_text("a\tb\nc\r\nd"), "a b c d");
    }

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(normalize_text("too     many   spaces"), "too many spaces");
    }

    #[test]
    fn test_trims_ends() {
        assert_eq!(normalize_text("\n\t  padded \n"), "padded");
    }

    #[test]
    fn test_removes_boilerplate_label() {
        assert_eq!(
            normalize_text("Entry at 1.10 Comment: stop moved Comment: closed"),
            "Entry at 1.10 stop moved closed"
        );
    }

    #[test]
    fn test_removes_spliced_label() {
        assert_eq!(normalize_text("CommComment:ent: done"), "done");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\r\n "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "plain",
            "  Comment:  \n\tCommCommComment:ent:ent: x ",
            "a\r\n\r\nb\t\tc",
            "Bitcoin\u{a0}breakout  Comment:\nupdate",
            "Comment:",
            "",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "input: {:?}", sample);
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("€€€€", 2), "€€");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }
}
