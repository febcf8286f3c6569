//! # Introduction
//!
//! A syntax analyzer for Jack, the small object-oriented language of the
//! Nand to Tetris course. Source text is tokenized, parsed by a recursive
//! descent parser into a parse tree, and the tree is written out as XML.
//! A terminal viewer built with [ratatui](https://docs.rs/ratatui) browses
//! the tree of a single file.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Parse tree → XML / TUI
//! ```
//!
//! 1. [`parser`]: tokenizes the source and builds the parse tree; no I/O.
//! 2. [`xml`]: renders trees and token sequences as markup.
//! 3. [`analyzer`]: finds `.jack` files, runs the front end on each and
//!    writes one output file per unit.
//! 4. [`cli`]: command-line arguments for the `jack-analyzer` binary.
//! 5. [`ui`]: ratatui-based tree viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use jack_analyzer::parser::{parse, tokenize, TokenKind};
//!
//! let tokens = tokenize("class Main { field int x; }").unwrap();
//! let class = parse(&tokens).unwrap();
//! assert_eq!(class.kind, TokenKind::Class);
//! assert_eq!(class.leaves().len(), tokens.len());
//! ```

pub mod analyzer;
pub mod cli;
pub mod parser;
pub mod ui;
pub mod xml;
