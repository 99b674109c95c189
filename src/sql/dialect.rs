//! Rewrite rules converting the SQLite-flavored source dialect to Postgres.
//!
//! The rules form a fixed, ordered table applied to the whole statement in
//! sequence; date-function rewrites run before the generic keyword rewrites
//! so already-converted text is never translated twice. Every rule is
//! idempotent on its own output, and a statement with no match passes through
//! unchanged; this stage never fails.

use regex::{Captures, Regex};
use std::sync::LazyLock;

struct Rule {
    pattern: Regex,
    rewrite: fn(&Captures) -> String,
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule {
            pattern: Regex::new(r"(?i)date\('now'\)").unwrap(),
            rewrite: |_| "CURRENT_DATE".to_string(),
        },
        Rule {
            pattern: Regex::new(r"(?i)datetime\('now'\)").unwrap(),
            rewrite: |_| "NOW()".to_string(),
        },
        Rule {
            pattern: Regex::new(r"(?i)date\('now',\s*'([+-])(\d+)\s+days?'\)").unwrap(),
            rewrite: |c| format!("CURRENT_DATE {} INTERVAL '{} days'", &c[1], &c[2]),
        },
        Rule {
            pattern: Regex::new(r"(?i)datetime\('now',\s*'([+-])(\d+)\s+days?'\)").unwrap(),
            rewrite: |c| format!("NOW() {} INTERVAL '{} days'", &c[1], &c[2]),
        },
        Rule {
            pattern: Regex::new(r"(?i)DATE\((\w+)\)").unwrap(),
            rewrite: |c| format!("{}::date", &c[1]),
        },
        Rule {
            pattern: Regex::new(r"(?i)CURRENT_TIMESTAMP").unwrap(),
            rewrite: |_| "NOW()".to_string(),
        },
        Rule {
            pattern: Regex::new(r"(?i)\bIFNULL\s*\(").unwrap(),
            rewrite: |_| "COALESCE(".to_string(),
        },
        Rule {
            pattern: Regex::new(r"(?i)\b(is_[a-z_]+|[a-z_]+_flag)\s*=\s*1\b").unwrap(),
            rewrite: |c| format!("{} = TRUE", &c[1]),
        },
        Rule {
            pattern: Regex::new(r"(?i)\b(is_[a-z_]+|[a-z_]+_flag)\s*=\s*0\b").unwrap(),
            rewrite: |c| format!("{} = FALSE", &c[1]),
        },
    ]
});

/// Apply the rule table in order. Unmatched text is returned as written.
pub fn translate_dialect(sql: &str) -> String {
    RULES.iter().fold(sql.to_string(), |text, rule| {
        rule.pattern.replace_all(&text, rule.rewrite).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_now_becomes_current_date() {
        assert_eq!(
            translate_dialect("SELECT date('now')"),
            "SELECT CURRENT_DATE"
        );
    }

    #[test]
    fn datetime_now_becomes_now() {
        assert_eq!(translate_dialect("SELECT datetime('now')"), "SELECT NOW()");
    }

    #[test]
    fn date_arithmetic_preserves_sign_and_days() {
        assert_eq!(
            translate_dialect("date('now', '-7 day')"),
            "CURRENT_DATE - INTERVAL '7 days'"
        );
        assert_eq!(
            translate_dialect("date('now', '+30 days')"),
            "CURRENT_DATE + INTERVAL '30 days'"
        );
    }

    #[test]
    fn datetime_arithmetic_preserves_sign_and_days() {
        assert_eq!(
            translate_dialect("datetime('now', '-1 day')"),
            "NOW() - INTERVAL '1 days'"
        );
    }

    #[test]
    fn date_of_column_becomes_cast() {
        assert_eq!(
            translate_dialect("WHERE DATE(created_at) = CURRENT_DATE"),
            "WHERE created_at::date = CURRENT_DATE"
        );
    }

    #[test]
    fn bare_current_timestamp_becomes_now() {
        assert_eq!(
            translate_dialect("SET updated_at = CURRENT_TIMESTAMP"),
            "SET updated_at = NOW()"
        );
    }

    #[test]
    fn ifnull_becomes_coalesce() {
        assert_eq!(
            translate_dialect("SELECT IFNULL(phone, '')"),
            "SELECT COALESCE(phone, '')"
        );
        assert_eq!(
            translate_dialect("SELECT ifnull (phone, '')"),
            "SELECT COALESCE(phone, '')"
        );
    }

    #[test]
    fn boolean_flag_comparisons_become_literals() {
        assert_eq!(
            translate_dialect("WHERE is_active = 1 AND deleted_flag = 0"),
            "WHERE is_active = TRUE AND deleted_flag = FALSE"
        );
    }

    #[test]
    fn non_flag_columns_keep_numeric_comparison() {
        assert_eq!(
            translate_dialect("WHERE quantity = 1"),
            "WHERE quantity = 1"
        );
    }

    #[test]
    fn rules_are_idempotent_on_translated_text() {
        let source =
            "SELECT IFNULL(a, 0) FROM t WHERE is_paid = 1 AND DATE(ts) > date('now', '-7 day')";
        let once = translate_dialect(source);
        assert_eq!(translate_dialect(&once), once);
    }

    #[test]
    fn unmatched_text_is_unchanged() {
        let sql = "SELECT id, name FROM products WHERE price > 10";
        assert_eq!(translate_dialect(sql), sql);
    }
}
