//! Parse tree pane
//!
//! The tree is flattened into one row per visible node, in pre-order. Each
//! node is identified by its pre-order index in the full tree, which stays
//! stable while subtrees are collapsed and expanded.

use crate::parser::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// One visible line of the tree pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: usize,
    pub depth: usize,
    pub kind: TokenKind,
    pub text: String,
    pub child_count: usize,
    pub collapsed: bool,
}

/// Flatten `root`, skipping the descendants of collapsed nodes.
pub fn flatten_tree(root: &Token, collapsed: &FxHashSet<usize>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut next_id = 0;
    push_rows(root, 0, collapsed, true, &mut next_id, &mut rows);
    rows
}

fn push_rows(
    token: &Token,
    depth: usize,
    collapsed: &FxHashSet<usize>,
    visible: bool,
    next_id: &mut usize,
    rows: &mut Vec<TreeRow>,
) {
    let id = *next_id;
    *next_id += 1;
    let is_collapsed = collapsed.contains(&id);

    if visible {
        rows.push(TreeRow {
            id,
            depth,
            kind: token.kind,
            text: token.text.clone(),
            child_count: token.children.len(),
            collapsed: is_collapsed,
        });
    }

    // Ids are assigned to hidden nodes too so they stay stable.
    for child in &token.children {
        push_rows(
            child,
            depth + 1,
            collapsed,
            visible && !is_collapsed,
            next_id,
            rows,
        );
    }
}

fn row_line(row: &TreeRow, selected: bool) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let marker = if row.child_count == 0 {
        "  "
    } else if row.collapsed {
        "▸ "
    } else {
        "▾ "
    };

    let tag_style = Style::default().fg(DEFAULT_THEME.kind_color(row.kind));
    let mut spans = vec![
        Span::raw(indent),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
    ];

    if row.kind.is_terminal() {
        spans.push(Span::styled(
            format!("{} ", row.kind.tag()),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
        spans.push(Span::styled(
            row.text.clone(),
            tag_style.add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(row.kind.tag().to_string(), tag_style));
        if row.collapsed {
            spans.push(Span::styled(
                format!(" … {} children", row.child_count),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }
    }

    if selected {
        for span in &mut spans {
            span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
        }
    }
    Line::from(spans)
}

/// Render the parse tree pane, keeping the selected row in view.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
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
        .title(" Parse Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if selected < *scroll {
        *scroll = selected;
    } else if selected >= *scroll + visible_height {
        *scroll = selected + 1 - visible_height;
    }

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| row_line(row, idx == selected))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, tokenize};

    fn tree() -> Token {
        let tokens = tokenize("class A { field int x; }").unwrap();
        parse(&tokens).unwrap()
    }

    #[test]
    fn test_flatten_expanded() {
        let rows = flatten_tree(&tree(), &FxHashSet::default());
        // class, 3 leaves, classVarDec + 4 leaves, closing brace
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].kind, TokenKind::Class);
        assert_eq!(rows[4].kind, TokenKind::ClassVarDec);
        assert_eq!(rows[4].depth, 1);
        assert_eq!(rows[5].depth, 2);
        assert_eq!(rows[9].text, "}");
    }

    #[test]
    fn test_collapsed_subtree_keeps_ids() {
        let mut collapsed = FxHashSet::default();
        collapsed.insert(4);
        let rows = flatten_tree(&tree(), &collapsed);
        assert_eq!(rows.len(), 6);
        assert!(rows[4].collapsed);
        assert_eq!(rows[5].id, 9);
    }
}
