//! Position tracking over the token sequence
//!
//! The parser never indexes the token slice directly. It asks the cursor
//! for the current token, consumes it with [`Cursor::advance`], and when a
//! production has consumed one token too many to decide between
//! alternatives it puts that token back with [`Cursor::rewind`].
//!
//! Rewind is a single-step undo: at most one rewind may be pending, so every
//! `rewind` must be followed by an `advance` before the next `rewind`.

use super::ast::Token;

pub struct Cursor<'a> {
    tokens: &'a [Token],
    position: usize,
    rewound: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            rewound: false,
        }
    }

    /// Peek at the token under the cursor without consuming it.
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Consume and return the token under the cursor.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        self.rewound = false;
        Some(token)
    }

    /// Step back over the token consumed last, saturating at the start.
    pub fn rewind(&mut self) {
        debug_assert!(!self.rewound, "cursor rewound twice without advancing");
        self.position = self.position.saturating_sub(1);
        self.rewound = true;
    }

    /// Index of the token under the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::TokenKind;

    fn tokens() -> Vec<Token> {
        vec![
            Token::leaf(TokenKind::Keyword, "return"),
            Token::leaf(TokenKind::Symbol, ";"),
        ]
    }

    #[test]
    fn test_advance_and_rewind() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);

        assert_eq!(cursor.current().map(|t| t.text.as_str()), Some("return"));
        assert_eq!(cursor.advance().map(|t| t.text.as_str()), Some("return"));
        assert_eq!(cursor.advance().map(|t| t.text.as_str()), Some(";"));
        assert!(cursor.is_at_end());
        assert!(cursor.advance().is_none());

        cursor.rewind();
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.current().map(|t| t.text.as_str()), Some(";"));
    }

    #[test]
    fn test_rewind_saturates_at_start() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        cursor.rewind();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty_sequence() {
        let mut cursor = Cursor::new(&[]);
        assert!(cursor.is_empty());
        assert!(cursor.current().is_none());
        assert!(cursor.advance().is_none());
    }

    #[test]
    #[should_panic(expected = "rewound twice")]
    #[cfg(debug_assertions)]
    fn test_double_rewind_is_a_bug() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        cursor.advance();
        cursor.advance();
        cursor.rewind();
        cursor.rewind();
    }
}
