//! Schema extraction from CREATE TABLE statements.
//!
//! Extraction is best-effort and never fails. Clauses that don't match a
//! known shape are dropped and logged at debug level.

use super::lexer::{clean_sql, is_word_byte, split_clauses, Scanner};
use super::types::map_type;
use crate::schema::{Field, ForeignKeyRef, Schema, Table};
use tracing::{debug, trace};

/// Parse a SQL script into a table registry.
pub fn parse_sql(input: &str) -> Schema {
    let cleaned = clean_sql(input);
    let mut schema = Schema::default();

    for stmt in Scanner::new(&cleaned) {
        let mut table = Table::new(stmt.name.to_lowercase());
        for clause in split_clauses(stmt.body) {
            parse_clause(&mut table, clause);
        }
        trace!(
            table = %table.name,
            fields = table.fields.len(),
            foreign_keys = table.foreign_keys.len(),
            "parsed table"
        );
        schema.insert(table);
    }

    schema
}

fn parse_clause(table: &mut Table, clause: &str) {
    let clause = strip_constraint_name(clause);
    let mut cursor = Cursor::new(clause);

    if cursor.keywords(&["PRIMARY", "KEY"]) {
        parse_primary_key(table, cursor, clause);
    } else if cursor.keywords(&["FOREIGN", "KEY"]) {
        parse_foreign_key(table, cursor, clause);
    } else {
        parse_field(table, clause);
    }
}

/// Drop a leading `CONSTRAINT name` when it introduces a table constraint.
fn strip_constraint_name(clause: &str) -> &str {
    let mut cursor = Cursor::new(clause);
    if !cursor.keyword("CONSTRAINT") || cursor.ident().is_none() {
        return clause;
    }
    cursor.skip_whitespace();
    let rest = cursor.rest();

    let mut probe = Cursor::new(rest);
    let is_constraint = probe.clone().keywords(&["PRIMARY", "KEY"])
        || probe.clone().keywords(&["FOREIGN", "KEY"])
        || probe.clone().keyword("UNIQUE")
        || probe.keyword("CHECK");
    if is_constraint { rest } else { clause }
}

fn parse_primary_key(table: &mut Table, mut cursor: Cursor<'_>, clause: &str) {
    let Some(list) = cursor.paren_group() else {
        debug!(table = %table.name, clause, "ignoring malformed PRIMARY KEY clause");
        return;
    };

    for key in list.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        table.primary_keys.push(key.to_string());
        match table.fields.get_mut(key) {
            Some(field) => {
                field.primary_key = true;
                field.required = true;
            }
            None => {
                debug!(table = %table.name, key, "primary key names a field not declared yet");
            }
        }
    }
}

fn parse_foreign_key(table: &mut Table, mut cursor: Cursor<'_>, clause: &str) {
    let Some(fk) = read_foreign_key(&mut cursor) else {
        debug!(table = %table.name, clause, "ignoring malformed FOREIGN KEY clause");
        return;
    };

    if let Some(field) = table.fields.get_mut(&fk.field) {
        field.foreign_key = true;
    }
    table.foreign_keys.push(fk);
}

/// `( field ) REFERENCES table ( field )`
fn read_foreign_key(cursor: &mut Cursor<'_>) -> Option<ForeignKeyRef> {
    let field = cursor.paren_group()?.trim();
    cursor.skip_whitespace();
    if !cursor.keyword("REFERENCES") {
        return None;
    }
    let target = cursor.ident()?;
    let target_field = cursor.paren_group()?.trim();

    Some(ForeignKeyRef {
        field: field.to_string(),
        referenced_table: target.to_lowercase(),
        referenced_field: target_field.to_string(),
    })
}

fn parse_field(table: &mut Table, clause: &str) {
    let mut cursor = Cursor::new(clause);
    let Some(name) = cursor.ident() else {
        debug!(table = %table.name, clause, "ignoring clause without a field name");
        return;
    };
    if !cursor.skip_whitespace() {
        debug!(table = %table.name, clause, "ignoring field without a type");
        return;
    }
    let Some(type_token) = cursor.type_token() else {
        debug!(table = %table.name, clause, "ignoring field without a type");
        return;
    };

    let upper = clause.to_uppercase();
    let primary_key = upper.contains("PRIMARY KEY");
    let field = Field {
        name: name.to_string(),
        typ: map_type(type_token),
        required: upper.contains("NOT NULL"),
        primary_key,
        foreign_key: false,
    };

    trace!(table = %table.name, field = name, typ = type_token, "parsed field");
    table.fields.insert(name.to_string(), field);
    if primary_key {
        table.primary_keys.push(name.to_string());
    }
}

/// Cursor over a single body clause.
#[derive(Clone)]
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn current(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.current().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while self.current().is_some_and(is_word_byte) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Leading whitespace, then an identifier.
    fn ident(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let word = self.word();
        (!word.is_empty()).then_some(word)
    }

    /// Case-insensitive keyword match. Leaves the cursor in place on failure.
    fn keyword(&mut self, kw: &str) -> bool {
        let saved = self.pos;
        if self.ident().is_some_and(|w| w.eq_ignore_ascii_case(kw)) {
            true
        } else {
            self.pos = saved;
            false
        }
    }

    fn keywords(&mut self, kws: &[&str]) -> bool {
        let saved = self.pos;
        if kws.iter().all(|kw| self.keyword(kw)) {
            true
        } else {
            self.pos = saved;
            false
        }
    }

    /// `( ... )` up to the first closing parenthesis, with a non-empty body.
    fn paren_group(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        if self.current() != Some(b'(') {
            return None;
        }
        let start = self.pos + 1;
        let len = self.src[start..].find(')')?;
        let inner = &self.src[start..start + len];
        if inner.is_empty() {
            return None;
        }
        self.pos = start + len + 1;
        Some(inner)
    }

    /// A type name with an optional precision group attached directly.
    fn type_token(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if self.word().is_empty() {
            return None;
        }
        if self.current() == Some(b'(') {
            if let Some(len) = self.src[self.pos..].find(')') {
                self.pos += len + 1;
            }
        }
        Some(&self.src[start..self.pos])
    }
}
