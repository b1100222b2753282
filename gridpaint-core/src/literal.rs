//! Lenient reader for grid literals pasted as free text.
//!
//! Accepts the first nested bracketed list found in the input, e.g.
//! `const bitmap = [ [1, 2], ['3', "4"], ];`.  Grammar:
//!
//! ```text
//! literal := '[' ( row ( ',' row )* ','? )? ']'
//! row     := '[' ( int ( ',' int )* ','? )? ']'
//! int     := digits | '\'' digits '\'' | '"' digits '"'
//! ```
//!
//! Whitespace (including newlines) may appear between any two tokens.
//! Anything before the literal or after its closing bracket is ignored.

use crate::error::CoreError;
use crate::grid::PaletteIndex;

/// Extract and parse the first nested integer-list literal in `text`.
///
/// Only structure is checked here; shape validation (non-empty,
/// rectangular) is left to [`Grid::from_rows`](crate::Grid::from_rows).
pub fn parse_literal(text: &str) -> crate::Result<Vec<Vec<PaletteIndex>>> {
    let start = find_literal_start(text)
        .ok_or_else(|| CoreError::parse("no nested [[...]] literal found"))?;
    let mut parser = Parser {
        src: text.as_bytes(),
        pos: start,
    };
    parser.literal()
}

/// Byte offset of the first `[` whose next non-space character is another `[`.
fn find_literal_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        if b != b'[' {
            return None;
        }
        bytes[i + 1..]
            .iter()
            .find(|c| !c.is_ascii_whitespace())
            .filter(|&&c| c == b'[')
            .map(|_| i)
    })
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn literal(&mut self) -> crate::Result<Vec<Vec<PaletteIndex>>> {
        self.list(Self::row)
    }

    fn row(&mut self) -> crate::Result<Vec<PaletteIndex>> {
        self.list(Self::int)
    }

    /// `'[' ( item ( ',' item )* ','? )? ']'`
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> crate::Result<T>,
    ) -> crate::Result<Vec<T>> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(_) => items.push(item(self)?),
                None => return Err(self.error("unterminated list")),
            }
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                Some(c) => {
                    return Err(self.error(&format!("expected ',' or ']', found '{}'", c as char)))
                }
                None => return Err(self.error("unterminated list")),
            }
        }
    }

    fn int(&mut self) -> crate::Result<PaletteIndex> {
        let quote = match self.peek() {
            Some(q @ (b'\'' | b'"')) => {
                self.pos += 1;
                Some(q)
            }
            _ => None,
        };
        if quote.is_some() {
            self.skip_ws();
        }
        let start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(match self.src.get(self.pos) {
                Some(b'-') => self.error("negative values are not allowed"),
                Some(&c) => self.error(&format!("expected a number, found '{}'", c as char)),
                None => self.error("expected a number, found end of input"),
            });
        }
        let digits = std::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| self.error("invalid number"))?;
        let value = digits
            .parse::<PaletteIndex>()
            .map_err(|_| self.error(&format!("{digits} is out of range")))?;
        if let Some(q) = quote {
            self.expect(q)?;
        }
        Ok(value)
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    fn expect(&mut self, want: u8) -> crate::Result<()> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(&format!(
                "expected '{}', found '{}'",
                want as char, c as char
            ))),
            None => Err(self.error(&format!("expected '{}', found end of input", want as char))),
        }
    }

    fn error(&self, msg: &str) -> CoreError {
        CoreError::parse(format!("{msg} at offset {}", self.pos))
    }
}
