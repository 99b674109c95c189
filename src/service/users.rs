//! User account operations.

use super::records::{User, UserSummary};
use super::ShopService;
use crate::normalize::WriteReport;
use serde_json::json;

const USER_COLUMNS: &str =
    "id, telegram_id, name, phone, email, language, is_admin, created_at, is_registered";

fn is_duplicate_key(report: &WriteReport) -> bool {
    let in_message = report
        .error
        .as_deref()
        .map_or(false, |e| e.contains("duplicate key") || e.contains("23505"));
    in_message || report.code.as_deref() == Some("23505")
}

impl ShopService {
    /// Look up an account by its Telegram id.
    pub async fn user_by_telegram_id(&self, telegram_id: i64) -> Option<User> {
        let sql = format!("SELECT {} FROM users WHERE telegram_id = $1", USER_COLUMNS);
        let outcome = self.gateway.execute(&sql, &[json!(telegram_id)]).await;
        outcome.rows().first().and_then(|row| User::from_row(row))
    }

    /// Register an account and return its id. A Telegram id that already has
    /// an account returns the existing id, including when the insert loses a
    /// race and reports a duplicate key.
    pub async fn add_user(
        &self,
        telegram_id: i64,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        language: &str,
    ) -> Option<String> {
        if let Some(existing) = self.user_by_telegram_id(telegram_id).await {
            return Some(existing.id);
        }
        let outcome = self
            .gateway
            .execute(
                "INSERT INTO users (telegram_id, name, phone, email, language) \
                 VALUES ($1, $2, $3, $4, $5)",
                &[
                    json!(telegram_id),
                    json!(name),
                    json!(phone),
                    json!(email),
                    json!(language),
                ],
            )
            .await;
        if let Some(report) = outcome.write() {
            if !report.is_ok() && !is_duplicate_key(report) {
                tracing::error!(telegram_id, error = ?report.error, "add_user failed");
                return None;
            }
        }
        self.user_by_telegram_id(telegram_id).await.map(|u| u.id)
    }

    /// Flag an account as registered, keeping the stored phone when no new
    /// one is supplied.
    pub async fn mark_registered(&self, telegram_id: i64, phone: Option<&str>) -> bool {
        self.gateway
            .execute(
                "UPDATE users SET is_registered = 1, phone = COALESCE($2, phone) \
                 WHERE telegram_id = $1",
                &[json!(telegram_id), json!(phone)],
            )
            .await
            .write_ok()
    }

    /// Create or refresh an account keyed by Telegram id, updating only the
    /// fields provided. Returns the stored account summary.
    pub async fn upsert_user(
        &self,
        telegram_id: i64,
        name: &str,
        language: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Option<UserSummary> {
        let mut columns = vec!["telegram_id", "name", "language", "is_registered"];
        let mut params = vec![json!(telegram_id), json!(name), json!(language), json!(true)];
        if let Some(phone) = phone {
            columns.push("phone");
            params.push(json!(phone));
        }
        if let Some(email) = email {
            columns.push("email");
            params.push(json!(email));
        }
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${}", i)).collect();
        let updates: Vec<String> = columns[1..]
            .iter()
            .map(|column| format!("{} = EXCLUDED.{}", column, column))
            .collect();
        let sql = format!(
            "INSERT INTO users ({}) VALUES ({}) ON CONFLICT (telegram_id) DO UPDATE SET {}",
            columns.join(", "),
            placeholders.join(", "),
            updates.join(", ")
        );
        let outcome = self.gateway.execute(&sql, &params).await;
        if !outcome.write_ok() {
            tracing::error!(telegram_id, "upsert_user failed");
            return None;
        }
        let summary = self
            .gateway
            .execute(
                "SELECT id, is_admin, language, is_registered FROM users WHERE telegram_id = $1",
                &[json!(telegram_id)],
            )
            .await;
        summary
            .rows()
            .first()
            .and_then(|row| UserSummary::from_row(row))
    }

    /// Upsert an account with the admin flag forced on.
    pub async fn create_or_promote_admin(
        &self,
        telegram_id: i64,
        name: &str,
        language: &str,
    ) -> bool {
        self.gateway
            .execute(
                "INSERT INTO users (telegram_id, name, language, is_admin, is_registered) \
                 VALUES ($1, $2, $3, $4, $5) \
                 ON CONFLICT (telegram_id) DO UPDATE SET \
                 name = EXCLUDED.name, language = EXCLUDED.language, \
                 is_admin = TRUE, is_registered = TRUE",
                &[
                    json!(telegram_id),
                    json!(name),
                    json!(language),
                    json!(true),
                    json!(true),
                ],
            )
            .await
            .write_ok()
    }

    pub async fn update_language(&self, user_id: &str, language: &str) -> bool {
        self.gateway
            .execute(
                "UPDATE users SET language = $2 WHERE id = $1",
                &[json!(user_id), json!(language)],
            )
            .await
            .write_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_detection_covers_message_and_code() {
        let by_message = WriteReport::failed(
            "duplicate key value violates unique constraint \"users_telegram_id_key\"",
            None,
            None,
        );
        assert!(is_duplicate_key(&by_message));

        let by_code = WriteReport::failed("conflict", Some("23505".into()), None);
        assert!(is_duplicate_key(&by_code));

        let other = WriteReport::failed("permission denied", Some("42501".into()), None);
        assert!(!is_duplicate_key(&other));
    }
}
