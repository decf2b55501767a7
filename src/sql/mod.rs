//! SQL script to relational schema extraction.

mod lexer;
mod parser;
mod types;

pub use lexer::{clean_sql, split_clauses, Scanner, TableStatement};
pub use parser::parse_sql;
pub use types::map_type;
