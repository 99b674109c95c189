//! Positional parameter substitution by text replacement.
//!
//! This is plain string interpolation with quote doubling, not a prepared
//! statement: it is only safe for trusted, internally generated SQL and
//! parameters, and must never see user-controlled statement text.

use serde_json::Value;

/// Placeholder style of one statement. Exactly one style is selected per
/// statement by first-match precedence (`%s` before `?` before `$n`); mixing
/// styles leaves the later style's occurrences in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    Percent,
    Question,
    Dollar,
}

pub fn detect_style(sql: &str) -> PlaceholderStyle {
    if sql.contains("%s") {
        PlaceholderStyle::Percent
    } else if sql.contains('?') {
        PlaceholderStyle::Question
    } else {
        PlaceholderStyle::Dollar
    }
}

/// Render one parameter as a SQL literal. Strings are quoted with internal
/// single quotes doubled; booleans and null become their SQL tokens; numbers
/// keep their textual representation.
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => "NULL".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Substitute `params` into `sql` following the detected style. For `%s` and
/// `?` each parameter consumes one occurrence, left to right; for `$n` every
/// occurrence of the indexed token is replaced, and an index absent from the
/// text is skipped. Extra parameters are silently unused; a placeholder with
/// no parameter remains unreplaced.
pub fn substitute_params(sql: &str, params: &[Value]) -> String {
    if params.is_empty() {
        return sql.to_string();
    }
    let mut text = sql.to_string();
    match detect_style(sql) {
        PlaceholderStyle::Percent => {
            for param in params {
                text = text.replacen("%s", &literal(param), 1);
            }
        }
        PlaceholderStyle::Question => {
            for param in params {
                text = text.replacen('?', &literal(param), 1);
            }
        }
        PlaceholderStyle::Dollar => {
            for (index, param) in params.iter().enumerate() {
                let token = format!("${}", index + 1);
                if !text.contains(&token) {
                    continue;
                }
                text = text.replace(&token, &literal(param));
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_style_substitutes_left_to_right() {
        assert_eq!(
            substitute_params("SELECT * FROM t WHERE a = ? AND b = ?", &[json!(1), json!("x")]),
            "SELECT * FROM t WHERE a = 1 AND b = 'x'"
        );
    }

    #[test]
    fn percent_style_takes_precedence_over_question() {
        assert_eq!(
            substitute_params("WHERE a = %s AND note = '?'", &[json!(5)]),
            "WHERE a = 5 AND note = '?'"
        );
    }

    #[test]
    fn dollar_style_replaces_every_occurrence_of_an_index() {
        assert_eq!(
            substitute_params(
                "WHERE name ILIKE $1 OR description ILIKE $1 LIMIT $2",
                &[json!("%tea%"), json!(10)]
            ),
            "WHERE name ILIKE '%tea%' OR description ILIKE '%tea%' LIMIT 10"
        );
    }

    #[test]
    fn dollar_index_missing_from_text_is_skipped() {
        assert_eq!(
            substitute_params("WHERE b = $2", &[json!("unused"), json!(7)]),
            "WHERE b = 7"
        );
    }

    #[test]
    fn string_quotes_are_doubled() {
        assert_eq!(
            substitute_params("WHERE name = ?", &[json!("O'Brien")]),
            "WHERE name = 'O''Brien'"
        );
    }

    #[test]
    fn booleans_and_null_become_sql_tokens() {
        assert_eq!(
            substitute_params("VALUES (?, ?, ?)", &[json!(true), json!(false), Value::Null]),
            "VALUES (true, false, NULL)"
        );
    }

    #[test]
    fn extra_parameters_are_silently_unused() {
        assert_eq!(
            substitute_params("WHERE a = ?", &[json!(1), json!(2), json!(3)]),
            "WHERE a = 1"
        );
    }

    #[test]
    fn missing_parameters_leave_placeholders_in_place() {
        assert_eq!(
            substitute_params("WHERE a = ? AND b = ?", &[json!(1)]),
            "WHERE a = 1 AND b = ?"
        );
    }

    #[test]
    fn mixed_styles_substitute_first_detected_only() {
        // documented limitation: `?` wins detection, `$1` stays behind
        assert_eq!(
            substitute_params("WHERE a = ? AND b = $1", &[json!(1), json!(2)]),
            "WHERE a = 1 AND b = $1"
        );
    }

    #[test]
    fn no_parameters_means_no_change() {
        let sql = "SELECT * FROM t WHERE a = ?";
        assert_eq!(substitute_params(sql, &[]), sql);
    }
}
