//! Human-readable session report, printed to stdout.
//!
//! Rendered as one string and written in a single call so fleet workers
//! interleave whole reports at worst, not individual lines.

use std::fmt::Write as _;

use crate::domain::SessionResult;

const RULE: &str = "============================================================";
const EXCERPT_WIDTH: usize = 80;

pub fn print_session(result: &SessionResult, threshold: usize) {
    println!("{}", render(result, threshold));
}

fn render(result: &SessionResult, threshold: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "[{}] SESSION REPORT ({})",
        result.label,
        result.started_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "{RULE}");

    for (index, record) in result.records.iter().enumerate() {
        let _ = writeln!(out, "\n--- Article {} ---", index + 1);
        let _ = writeln!(out, "Heading (es): {}", record.heading);
        if record.has_excerpt() {
            let _ = writeln!(out, "Excerpt (es):");
            let _ = writeln!(out, "{}", wrap(&record.excerpt, EXCERPT_WIDTH, "  "));
        } else {
            let _ = writeln!(out, "Excerpt (es): [!] not found");
        }
        match record.image_url {
            Some(ref url) => {
                let _ = writeln!(out, "Cover image : {url}");
            }
            None => {
                let _ = writeln!(out, "Cover image : [!] none found");
            }
        }
    }

    let _ = writeln!(out, "\n--- Translated headlines ---");
    if result.titles.is_empty() {
        let _ = writeln!(out, "[!] No translations available");
    } else {
        for (index, title) in result.titles.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", index + 1, title.translated);
        }
    }

    let _ = writeln!(out, "\n--- Repeated words ---");
    if result.repeated_words.is_empty() {
        let _ = writeln!(out, "No word repeated more than {threshold} times.");
    } else {
        for (word, count) in &result.repeated_words {
            let _ = writeln!(out, "  - '{word}': {count} times");
        }
    }

    out
}

/// Greedy word wrap: lines of at most `width` characters (indent excluded),
/// words never split.
fn wrap(text: &str, width: usize, indent: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
        .iter()
        .map(|l| format!("{indent}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleRecord, SessionStatus, TranslatedTitle};

    fn sample_result() -> SessionResult {
        let mut result = SessionResult::started("Local");
        let mut record = ArticleRecord::new("https://example.com/a1".into());
        record.heading = "La ola".into();
        record.excerpt = "Un resumen breve.".into();
        record.image_url = Some("https://example.com/cover.jpg".into());
        result.records.push(record);
        result.records.push(ArticleRecord::new("https://example.com/a2".into()));
        result.titles.push(TranslatedTitle {
            original: "La ola".into(),
            translated: "The wave".into(),
        });
        result.repeated_words.push(("wave".into(), 3));
        result.status = SessionStatus::Passed;
        result
    }

    #[test]
    fn test_render_lists_articles_and_translations() {
        let out = render(&sample_result(), 2);
        assert!(out.contains("[Local] SESSION REPORT"));
        assert!(out.contains("--- Article 1 ---"));
        assert!(out.contains("Heading (es): La ola"));
        assert!(out.contains("Cover image : https://example.com/cover.jpg"));
        assert!(out.contains("Heading (es): Unknown"));
        assert!(out.contains("Cover image : [!] none found"));
        assert!(out.contains("1. The wave"));
        assert!(out.contains("  - 'wave': 3 times"));
    }

    #[test]
    fn test_render_empty_translations_and_repetitions() {
        let mut result = sample_result();
        result.titles.clear();
        result.repeated_words.clear();

        let out = render(&result, 2);
        assert!(out.contains("[!] No translations available"));
        assert!(out.contains("No word repeated more than 2 times."));
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "uno dos tres cuatro cinco seis siete ocho nueve diez";
        let wrapped = wrap(text, 20, "  ");
        for line in wrapped.lines() {
            assert!(line.len() <= 22, "line too long: {line:?}");
            assert!(line.starts_with("  "));
        }
        // No words lost
        let rejoined: Vec<&str> = wrapped.split_whitespace().collect();
        assert_eq!(rejoined.len(), 10);
    }

    #[test]
    fn test_wrap_never_splits_words() {
        let wrapped = wrap("extraordinariamente corto", 5, "");
        assert_eq!(wrapped, "extraordinariamente\ncorto");
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap("", 80, "  "), "");
    }
}
