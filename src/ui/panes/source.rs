//! Source code pane rendering with syntax highlighting
//!
//! The pane uses a simple per-line scanner to apply highlighting styles; it
//! does not run the real lexer, so it keeps working on lines the lexer would
//! reject. Block comments that span lines are only highlighted on the line
//! where they open.

use crate::parser::lexer::{is_keyword, is_symbol};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for one line of Jack code
pub fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, n)| n);

        // Comments run to the end of the line
        if c == '/' && matches!(next, Some('/') | Some('*')) {
            flush_word(&mut spans, &mut current_word);
            spans.push(Span::styled(
                &line[offset..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if c == '"' {
            flush_word(&mut spans, &mut current_word);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != '"' {
                end += 1;
            }
            let stop = chars.get(end + 1).map_or(line.len(), |&(o, _)| o);
            spans.push(Span::styled(
                &line[offset..stop],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end + 1;
            continue;
        }

        if c.is_ascii_alphanumeric() || c == '_' {
            current_word.push(c);
            i += 1;
            continue;
        }

        flush_word(&mut spans, &mut current_word);
        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            c if is_symbol(c) => Style::default().fg(DEFAULT_THEME.fg),
            _ => Style::default(),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    flush_word(&mut spans, &mut current_word);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let style = word_style(word);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn word_style(word: &str) -> Style {
    if is_keyword(word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if word.starts_with(|c: char| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_code: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(highlight_source_code(line).spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_texts(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words_and_symbols() {
        let line = highlight_source_code("let x = 10;");
        assert_eq!(span_texts(&line), vec!["let", " ", "x", " ", "=", " ", "10", ";"]);
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(line.spans[6].style.fg, Some(DEFAULT_THEME.number));
    }

    #[test]
    fn test_highlight_string_and_comment() {
        let line = highlight_source_code("do Output.printString(\"a; b\"); // note");
        let texts = span_texts(&line);
        assert!(texts.contains(&"\"a; b\"".to_string()));
        assert_eq!(texts.last().map(String::as_str), Some("// note"));
    }
}
