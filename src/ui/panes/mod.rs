//! TUI pane rendering modules
//!
//! - [`source`]: Source code display with syntax highlighting
//! - [`tree`]: The parse tree, one row per visible node, foldable
//! - [`status`]: Status bar with keybindings and the selected node
//!
//! Each pane module exports a primary `render_*` function that draws from
//! borrowed state; scroll offsets are owned by the app and passed in.

pub mod source;
pub mod status;
pub mod tree;

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::{flatten_tree, render_tree_pane, TreeRow};
