//! Markup rendering of tokens and parse trees
//!
//! Every node becomes an element named after its kind. Leaves hold their
//! escaped text on one line; composite nodes open and close on lines of
//! their own with the children indented two spaces deeper:
//!
//! ```text
//! <returnStatement>
//!   <keyword>return</keyword>
//!   <symbol>;</symbol>
//! </returnStatement>
//! ```

use crate::parser::Token;
use std::borrow::Cow;
use std::io::{self, Write};

const INDENT: &str = "  ";

pub struct XmlWriter<W: Write> {
    out: W,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write a parse tree rooted at `root`.
    pub fn write_tree(&mut self, root: &Token) -> io::Result<()> {
        self.write_node(root, 0)?;
        self.out.flush()
    }

    /// Write a flat token sequence under a synthetic `<tokens>` element.
    pub fn write_tokens(&mut self, tokens: &[Token]) -> io::Result<()> {
        writeln!(self.out, "<tokens>")?;
        for token in tokens {
            self.write_node(token, 1)?;
        }
        writeln!(self.out, "</tokens>")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_node(&mut self, token: &Token, depth: usize) -> io::Result<()> {
        let indent = INDENT.repeat(depth);
        let tag = token.kind.tag();

        if token.is_leaf() {
            return writeln!(self.out, "{indent}<{tag}>{}</{tag}>", escape(&token.text));
        }

        writeln!(self.out, "{indent}<{tag}>")?;
        for child in &token.children {
            self.write_node(child, depth + 1)?;
        }
        writeln!(self.out, "{indent}</{tag}>")
    }
}

/// Render a parse tree to a string.
pub fn render_tree(root: &Token) -> String {
    let mut writer = XmlWriter::new(Vec::new());
    writer
        .write_tree(root)
        .expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Render a token sequence to a string.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut writer = XmlWriter::new(Vec::new());
    writer
        .write_tokens(tokens)
        .expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Escape the characters markup reserves.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
