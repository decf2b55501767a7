//! Loading SQL input from files or readers.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("No SQL content provided")]
    Empty,
    #[error("{} is not a .sql file", path.display())]
    NotSqlFile { path: PathBuf },
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reject input that has nothing but whitespace.
pub fn validate_sql(text: &str) -> Result<&str, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(text)
}

pub fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sql"))
}

/// Read a `.sql` file as UTF-8 text.
pub fn load_sql(path: &Path) -> Result<String, InputError> {
    if !is_sql_file(path) {
        return Err(InputError::NotSqlFile {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    validate_sql(&content)?;
    Ok(content)
}

/// Read SQL text from a reader such as stdin. `label` names the source in
/// error messages.
pub fn read_sql<R: Read>(mut reader: R, label: &str) -> Result<String, InputError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| InputError::Io {
            path: PathBuf::from(label),
            source,
        })?;
    validate_sql(&content)?;
    Ok(content)
}
