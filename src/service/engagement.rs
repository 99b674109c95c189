//! Favorites, reviews, notifications and loyalty points.

use super::catalog::PRODUCT_COLUMNS;
use super::records::{LoyaltyPoints, Notification, Product, Review};
use super::ShopService;
use serde_json::json;

impl ShopService {
    pub async fn add_favorite(&self, user_id: &str, product_id: &str) -> bool {
        self.gateway
            .execute(
                "INSERT INTO favorites (user_id, product_id) VALUES ($1, $2)",
                &[json!(user_id), json!(product_id)],
            )
            .await
            .write_ok()
    }

    pub async fn remove_favorite(&self, user_id: &str, product_id: &str) -> bool {
        self.gateway
            .execute(
                "DELETE FROM favorites WHERE user_id = $1 AND product_id = $2",
                &[json!(user_id), json!(product_id)],
            )
            .await
            .write_ok()
    }

    /// Products the user marked as favorite, newest first.
    pub async fn favorites_of_user(&self, user_id: &str) -> Vec<Product> {
        let columns: Vec<String> = PRODUCT_COLUMNS
            .split(", ")
            .map(|c| format!("p.{}", c))
            .collect();
        let sql = format!(
            "SELECT {} FROM favorites f JOIN products p ON p.id = f.product_id \
             WHERE f.user_id = $1 ORDER BY f.created_at DESC",
            columns.join(", ")
        );
        let outcome = self.gateway.execute(&sql, &[json!(user_id)]).await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Product::from_row(row))
            .collect()
    }

    pub async fn add_review(
        &self,
        user_id: &str,
        product_id: &str,
        rating: i64,
        comment: &str,
    ) -> bool {
        self.gateway
            .execute(
                "INSERT INTO reviews (user_id, product_id, rating, comment) \
                 VALUES ($1, $2, $3, $4)",
                &[
                    json!(user_id),
                    json!(product_id),
                    json!(rating),
                    json!(comment),
                ],
            )
            .await
            .write_ok()
    }

    /// Reviews of one product with the reviewer's name, newest first.
    pub async fn reviews_of_product(&self, product_id: &str) -> Vec<Review> {
        let outcome = self
            .gateway
            .execute(
                "SELECT r.rating, r.comment, r.created_at, u.name \
                 FROM reviews r JOIN users u ON u.id = r.user_id \
                 WHERE r.product_id = $1 ORDER BY r.created_at DESC",
                &[json!(product_id)],
            )
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Review::from_row(row))
            .collect()
    }

    pub async fn notify(&self, user_id: &str, title: &str, message: &str, kind: &str) -> bool {
        self.gateway
            .execute(
                "INSERT INTO notifications (user_id, title, message, type) \
                 VALUES ($1, $2, $3, $4)",
                &[json!(user_id), json!(title), json!(message), json!(kind)],
            )
            .await
            .write_ok()
    }

    /// Unread notifications for a user, newest first.
    pub async fn unread_notifications(&self, user_id: &str) -> Vec<Notification> {
        let outcome = self
            .gateway
            .execute(
                "SELECT id, user_id, title, message, type, is_read, created_at \
                 FROM notifications WHERE user_id = $1 AND is_read = 0 \
                 ORDER BY created_at DESC",
                &[json!(user_id)],
            )
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Notification::from_row(row))
            .collect()
    }

    pub async fn mark_read(&self, notification_id: &str) -> bool {
        self.gateway
            .execute(
                "UPDATE notifications SET is_read = 1 WHERE id = $1",
                &[json!(notification_id)],
            )
            .await
            .write_ok()
    }

    /// The user's loyalty balance, creating the row on first read.
    pub async fn loyalty_points_of(&self, user_id: &str) -> Option<LoyaltyPoints> {
        if let Some(points) = self.fetch_loyalty_points(user_id).await {
            return Some(points);
        }
        let created = self
            .gateway
            .execute(
                "INSERT INTO loyalty_points (user_id) VALUES ($1)",
                &[json!(user_id)],
            )
            .await;
        if !created.write_ok() {
            return None;
        }
        self.fetch_loyalty_points(user_id).await
    }

    /// Credit points, creating the balance row when missing.
    pub async fn add_loyalty_points(&self, user_id: &str, points: i64) -> bool {
        if self.loyalty_points_of(user_id).await.is_none() {
            return false;
        }
        self.gateway
            .execute(
                "UPDATE loyalty_points \
                 SET current_points = current_points + $2, total_earned = total_earned + $2 \
                 WHERE user_id = $1",
                &[json!(user_id), json!(points)],
            )
            .await
            .write_ok()
    }

    async fn fetch_loyalty_points(&self, user_id: &str) -> Option<LoyaltyPoints> {
        let outcome = self
            .gateway
            .execute(
                "SELECT id, user_id, current_points, total_earned \
                 FROM loyalty_points WHERE user_id = $1",
                &[json!(user_id)],
            )
            .await;
        outcome
            .rows()
            .first()
            .and_then(|row| LoyaltyPoints::from_row(row))
    }
}
