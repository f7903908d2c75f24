#![forbid(unsafe_code)]

//! Editing aids for the notes page: a line highlighter and word completion.

use trellis::{Ansi16, Color, Style};

/// Words offered as inline completions.
const VOCABULARY: &[&str] = &[
    "binding", "border", "cursor", "divider", "element", "focus", "highlight", "layout", "overlay",
    "padding", "selection", "terminal", "trellis", "undo",
];

/// Markers styled as tasks.
const TASK_WORDS: &[&str] = &["TODO", "FIXME", "DONE"];

/// One style per code point of `line`.
///
/// Headings (lines starting with `#`) are bold; task markers and digits
/// get a color.
pub fn highlight_line(_row: usize, line: &str) -> Vec<Style> {
    let chars: Vec<char> = line.chars().collect();
    if line.trim_start().starts_with('#') {
        return vec![Style::new().bold(true); chars.len()];
    }

    let mut styles = vec![Style::new(); chars.len()];
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            styles[i] = Style::new().fg(Color::Ansi16(Ansi16::Cyan));
            i += 1;
            continue;
        }
        if !chars[i].is_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_alphanumeric() {
            i += 1;
        }
        let word: String = chars[start..i].iter().collect();
        if TASK_WORDS.contains(&word.as_str()) {
            let task = Style::new().fg(Color::Ansi16(Ansi16::Yellow)).bold(true);
            styles[start..i].fill(task);
        }
    }
    styles
}

/// Remainder of the first vocabulary word that extends `prefix`.
pub fn complete(prefix: &str) -> Option<String> {
    if prefix.chars().count() < 2 {
        return None;
    }
    VOCABULARY
        .iter()
        .find(|w| w.len() > prefix.len() && w.starts_with(prefix))
        .map(|w| w[prefix.len()..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis::StyleFlags;

    #[test]
    fn headings_are_bold() {
        let styles = highlight_line(0, "# Title");
        assert_eq!(styles.len(), 7);
        assert!(styles.iter().all(|s| s.flag(StyleFlags::BOLD) == Some(true)));
    }

    #[test]
    fn task_words_and_digits_are_colored() {
        let styles = highlight_line(0, "a TODO 7");
        assert_eq!(styles[0], Style::new());
        assert!(styles[2].fg.is_some());
        assert!(styles[5].fg.is_some());
        assert_eq!(styles[6], Style::new());
        assert_eq!(styles[7].fg, Some(Color::Ansi16(Ansi16::Cyan)));
    }

    #[test]
    fn task_word_must_stand_alone() {
        let styles = highlight_line(0, "TODOS");
        assert!(styles.iter().all(|s| s.fg.is_none()));
    }

    #[test]
    fn completion_needs_two_chars_and_a_longer_word() {
        assert_eq!(complete("t"), None);
        assert_eq!(complete("te"), Some("rminal".into()));
        assert_eq!(complete("undo"), None);
        assert_eq!(complete("zz"), None);
    }
}
