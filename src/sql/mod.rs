//! SQL text pipeline: dialect translation, table qualification, parameter
//! substitution, and statement-kind detection.

pub mod dialect;
pub mod params;
pub mod qualify;

pub use dialect::translate_dialect;
pub use params::{substitute_params, PlaceholderStyle};
pub use qualify::qualify_tables;

/// Statement class derived from the leading keyword. The kind decides the
/// shape contract of the normalized result: row tuples for `Select`, an
/// affected-count record for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl QueryKind {
    /// Classify by the first keyword, case-insensitive, ignoring leading
    /// whitespace.
    pub fn of(sql: &str) -> Self {
        let word: String = sql
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        match word.to_ascii_uppercase().as_str() {
            "SELECT" => QueryKind::Select,
            "INSERT" => QueryKind::Insert,
            "UPDATE" => QueryKind::Update,
            "DELETE" => QueryKind::Delete,
            _ => QueryKind::Other,
        }
    }

    pub fn is_select(self) -> bool {
        self == QueryKind::Select
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kind_from_leading_keyword() {
        assert_eq!(QueryKind::of("SELECT * FROM users"), QueryKind::Select);
        assert_eq!(QueryKind::of("  insert into users"), QueryKind::Insert);
        assert_eq!(QueryKind::of("\n\tUpdate users set x"), QueryKind::Update);
        assert_eq!(QueryKind::of("delete from cart"), QueryKind::Delete);
    }

    #[test]
    fn anything_else_is_other() {
        assert_eq!(QueryKind::of("CREATE TABLE t (id int)"), QueryKind::Other);
        assert_eq!(QueryKind::of(""), QueryKind::Other);
        assert_eq!(QueryKind::of("   "), QueryKind::Other);
    }
}
