//! SQL scanner for locating CREATE TABLE statements and splitting their bodies.

use tracing::{debug, trace};

/// Strip comments and normalize whitespace.
///
/// Line comments are removed before block comments, so a `--` inside a
/// block comment still eats the rest of its line. An unterminated block
/// comment is left in place.
pub fn clean_sql(input: &str) -> String {
    let without_line_comments = strip_line_comments(input);
    let without_comments = strip_block_comments(&without_line_comments);
    collapse_whitespace(&without_comments)
}

fn strip_line_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, line) in input.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match line.find("--") {
            Some(idx) => out.push_str(&line[..idx]),
            None => out.push_str(line),
        }
    }
    out
}

fn strip_block_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        match rest[start + 2..].find("*/") {
            Some(len) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + 2 + len + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A `CREATE TABLE name ( body );` statement found in cleaned SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStatement<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_quote_byte(b: u8) -> bool {
    matches!(b, b'\'' | b'"' | b'`')
}

/// Byte-level scanner over cleaned SQL.
///
/// Only ASCII bytes are ever matched, so every slice boundary it produces
/// lands on a char boundary.
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn current(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.src.len() {
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.current().is_some_and(|b| b.is_ascii_whitespace()) {
            self.advance();
        }
        self.pos > start
    }

    fn read_word(&mut self) -> &'a str {
        let start = self.pos;
        while self.current().is_some_and(is_word_byte) {
            self.advance();
        }
        &self.src[start..self.pos]
    }

    fn at_word_start(&self) -> bool {
        let bytes = self.bytes();
        self.current().is_some_and(is_word_byte)
            && (self.pos == 0 || !is_word_byte(bytes[self.pos - 1]))
    }

    /// Skip a quoted literal or identifier opened by `quote`. Only the same
    /// delimiter closes it.
    fn skip_quoted(&mut self, quote: u8) {
        self.advance(); // skip opening quote
        while let Some(b) = self.current() {
            self.advance();
            if b == quote {
                // Doubled delimiter is an escaped one
                if self.current() == Some(quote) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
    }

    /// Find the next table statement, skipping anything that doesn't have
    /// the `CREATE TABLE name (...)` shape.
    pub fn next_table(&mut self) -> Option<TableStatement<'a>> {
        while self.pos < self.src.len() {
            if !self.at_word_start() {
                self.advance();
                continue;
            }

            let word = self.read_word();
            if !word.eq_ignore_ascii_case("CREATE") {
                continue;
            }

            let resume = self.pos;
            match self.parse_create_table() {
                Some(stmt) => {
                    trace!(table = stmt.name, "found CREATE TABLE");
                    return Some(stmt);
                }
                None => {
                    debug!(offset = resume, "skipping CREATE statement without table shape");
                    self.pos = resume;
                }
            }
        }
        None
    }

    fn parse_create_table(&mut self) -> Option<TableStatement<'a>> {
        if !self.skip_whitespace() || !self.read_word().eq_ignore_ascii_case("TABLE") {
            return None;
        }
        if !self.skip_whitespace() {
            return None;
        }

        let name = self.read_word();
        if name.is_empty() {
            return None;
        }

        self.skip_whitespace();
        if self.current() != Some(b'(') {
            return None;
        }
        self.advance();

        let body_start = self.pos;
        let body_end = self.find_closing_paren()?;
        let body = &self.src[body_start..body_end];

        self.skip_table_options()?;

        Some(TableStatement { name, body })
    }

    /// Advance past the parenthesis closing the one just consumed and
    /// return its offset.
    fn find_closing_paren(&mut self) -> Option<usize> {
        let mut depth = 1usize;
        while let Some(b) = self.current() {
            match b {
                q if is_quote_byte(q) => {
                    self.skip_quoted(q);
                    continue;
                }
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = self.pos;
                        self.advance();
                        return Some(end);
                    }
                }
                _ => {}
            }
            self.advance();
        }
        None
    }

    /// Skip table options (ENGINE=, etc.) up to and including the
    /// terminating `;`. Fails on anything that looks like the start of
    /// another statement.
    fn skip_table_options(&mut self) -> Option<()> {
        while let Some(b) = self.current() {
            match b {
                b';' => {
                    self.advance();
                    return Some(());
                }
                b'(' | b')' => return None,
                _ if self.at_word_start() => {
                    if self.read_word().eq_ignore_ascii_case("CREATE") {
                        return None;
                    }
                }
                _ => self.advance(),
            }
        }
        None
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = TableStatement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_table()
    }
}

/// Split a table body on commas outside parentheses and quoted text
/// (`'...'`, `"..."` or `` `...` ``).
///
/// Clauses are trimmed; empty ones are dropped.
pub fn split_clauses(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut in_quote: Option<u8> = None;
    let mut start = 0;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(quote) = in_quote {
            if b == quote {
                if bytes.get(i + 1) == Some(&quote) {
                    i += 1;
                } else {
                    in_quote = None;
                }
            }
        } else {
            match b {
                q if is_quote_byte(q) => in_quote = Some(q),
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => {
                    clauses.push(body[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
        }
        i += 1;
    }
    clauses.push(body[start..].trim());

    clauses.retain(|c| !c.is_empty());
    clauses
}
