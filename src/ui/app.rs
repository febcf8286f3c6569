//! Main TUI application state and logic

use super::panes::{flatten_tree, TreeRow};
use crate::parser::Token;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

const PAGE: usize = 20;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Name shown in the source pane title
    pub title: String,

    /// The source code that was parsed
    pub source_code: String,

    /// The parse tree being browsed
    pub tree: Token,

    /// Pre-order ids of folded nodes
    pub collapsed: FxHashSet<usize>,

    /// Visible rows, rebuilt whenever folding changes
    pub rows: Vec<TreeRow>,

    /// Index into `rows`
    pub selected: usize,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over a parsed unit
    pub fn new(title: impl Into<String>, source_code: String, tree: Token) -> Self {
        let collapsed = FxHashSet::default();
        let rows = flatten_tree(&tree, &collapsed);
        let status_message = format!("{} nodes", tree.node_count());
        App {
            title: title.into(),
            source_code,
            tree,
            collapsed,
            rows,
            selected: 0,
            focused_pane: FocusedPane::Tree,
            source_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.title,
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[1],
            &self.rows,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.toggle();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Source => self.source_scroll = 0,
                FocusedPane::Tree => self.selected = 0,
            },
            KeyCode::End => match self.focused_pane {
                // Clamped while rendering.
                FocusedPane::Source => self.source_scroll = usize::MAX,
                FocusedPane::Tree => self.selected = self.rows.len().saturating_sub(1),
            },
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_fold(),
            KeyCode::Char('e') => {
                self.collapsed.clear();
                self.refresh_rows(None);
                self.status_message = "Expanded all".to_string();
            }
            _ => {}
        }
    }

    fn move_by(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_scroll = self.source_scroll.saturating_add_signed(delta);
            }
            FocusedPane::Tree => {
                let last = self.rows.len().saturating_sub(1);
                self.selected = self.selected.saturating_add_signed(delta).min(last);
                if let Some(row) = self.rows.get(self.selected) {
                    self.status_message = describe(row);
                }
            }
        }
    }

    /// Fold or unfold the selected node.
    fn toggle_fold(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if row.child_count == 0 {
            return;
        }
        let id = row.id;
        if !self.collapsed.remove(&id) {
            self.collapsed.insert(id);
        }
        self.refresh_rows(Some(id));
    }

    /// Rebuild the visible rows, keeping `keep` selected when given.
    fn refresh_rows(&mut self, keep: Option<usize>) {
        self.rows = flatten_tree(&self.tree, &self.collapsed);
        self.selected = keep
            .and_then(|id| self.rows.iter().position(|r| r.id == id))
            .unwrap_or(0);
    }
}

fn describe(row: &TreeRow) -> String {
    if row.kind.is_terminal() {
        format!("{} '{}'", row.kind, row.text)
    } else {
        format!("{} ({} children)", row.kind, row.child_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, tokenize};

    fn app() -> App {
        let source = "class A { field int x; }".to_string();
        let tokens = tokenize(&source).unwrap();
        let tree = parse(&tokens).unwrap();
        App::new("A.jack", source, tree)
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = app();
        app.handle_key_event(KeyEvent::from(KeyCode::Up));
        assert_eq!(app.selected, 0);
        app.handle_key_event(KeyEvent::from(KeyCode::PageDown));
        assert_eq!(app.selected, app.rows.len() - 1);
    }

    #[test]
    fn test_fold_and_unfold() {
        let mut app = app();
        let total = app.rows.len();
        for _ in 0..4 {
            app.handle_key_event(KeyEvent::from(KeyCode::Down));
        }
        assert_eq!(app.status_message, "classVarDec (4 children)");

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.rows.len(), total - 4);
        assert_eq!(app.rows[app.selected].id, 4);

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.rows.len(), total);
    }

    #[test]
    fn test_quit_and_focus() {
        let mut app = app();
        app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.focused_pane, FocusedPane::Source);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
