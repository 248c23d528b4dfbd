use std::io::{self, Write};

use crate::domain::email::EmailMessage;
use crate::mail::decoders::clean_line;

pub const FROM_WIDTH: usize = 50;
pub const SUBJECT_WIDTH: usize = 60;
pub const PREVIEW_WIDTH: usize = 80;

const ELLIPSIS: &str = "...";
const NO_SUBJECT: &str = "(no subject)";

/// Shorten `text` to at most `max` characters, ending in `...` when cut.
pub fn truncate_display(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Write message `current` of `total` (1-based). Header values are reduced
/// to a single printable line before truncation.
pub fn render_message<W: Write>(
    out: &mut W,
    current: usize,
    total: usize,
    msg: &EmailMessage,
) -> io::Result<()> {
    let from = clean_line(&msg.from);
    let mut subject = clean_line(&msg.subject);
    if subject.is_empty() {
        subject = NO_SUBJECT.to_string();
    }

    writeln!(out)?;
    write!(out, "[{current}/{total}] ")?;
    writeln!(out, "From: {}", truncate_display(&from, FROM_WIDTH))?;
    writeln!(out, "Subject: {}", truncate_display(&subject, SUBJECT_WIDTH))?;
    if !msg.snippet.is_empty() {
        writeln!(out, "Preview: {}", truncate_display(&msg.snippet, PREVIEW_WIDTH))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(from: &str, subject: &str, snippet: &str) -> EmailMessage {
        EmailMessage {
            id: "m".into(),
            from: from.into(),
            subject: subject.into(),
            snippet: snippet.into(),
        }
    }

    fn rendered(msg: &EmailMessage) -> String {
        let mut buf = Vec::new();
        render_message(&mut buf, 2, 5, msg).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn long_subject_is_cut_to_width() {
        let subject = "s".repeat(70);
        let shown = truncate_display(&subject, SUBJECT_WIDTH);
        assert_eq!(shown.chars().count(), 60);
        assert_eq!(shown, format!("{}...", "s".repeat(57)));
    }

    #[test]
    fn text_at_the_limit_is_untouched() {
        let from = "f".repeat(FROM_WIDTH);
        assert_eq!(truncate_display(&from, FROM_WIDTH), from);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let preview = "é".repeat(100);
        let shown = truncate_display(&preview, PREVIEW_WIDTH);
        assert_eq!(shown, format!("{}...", "é".repeat(77)));
    }

    #[test]
    fn renders_all_fields() {
        let out = rendered(&message("Ann <ann@example.com>", "Lunch", "See you at noon"));
        assert_eq!(
            out,
            "\n[2/5] From: Ann <ann@example.com>\nSubject: Lunch\nPreview: See you at noon\n"
        );
    }

    #[test]
    fn header_controls_cannot_break_the_layout() {
        let out = rendered(&message(
            "Eve\n<eve@example.com>\u{001B}[2J",
            "Re:\r\n  \u{202E}urgent\t!",
            "",
        ));
        assert_eq!(
            out,
            "\n[2/5] From: Eve <eve@example.com>[2J\nSubject: Re: urgent !\n"
        );
    }

    #[test]
    fn invisible_only_subject_uses_placeholder() {
        let out = rendered(&message("a@example.com", "\u{200B} \u{034F}", ""));
        assert!(out.contains("Subject: (no subject)\n"));
    }

    #[test]
    fn empty_subject_uses_placeholder_and_empty_preview_is_hidden() {
        let out = rendered(&message("", "", ""));
        assert!(out.contains("Subject: (no subject)\n"));
        assert!(!out.contains("Preview:"));
    }
}
