//! Order creation and tracking.

use super::records::{text, CartLine, Order, OrderDetails, OrderLine};
use super::ShopService;
use serde_json::json;

const ORDER_COLUMNS: &str = "id, user_id, total_amount, status, delivery_address, \
                             payment_method, payment_status, created_at, updated_at";

impl ShopService {
    /// Create an order and return its id.
    pub async fn create_order(
        &self,
        user_id: &str,
        total_amount: f64,
        delivery_address: &str,
        payment_method: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Option<String> {
        let inserted = self
            .gateway
            .execute(
                "INSERT INTO orders \
                 (user_id, total_amount, delivery_address, payment_method, latitude, longitude) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
                &[
                    json!(user_id),
                    json!(total_amount),
                    json!(delivery_address),
                    json!(payment_method),
                    json!(latitude),
                    json!(longitude),
                ],
            )
            .await;
        if !inserted.write_ok() {
            tracing::error!(user_id, "create_order failed");
            return None;
        }
        let created = self
            .gateway
            .execute(
                "SELECT id FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
                &[json!(user_id)],
            )
            .await;
        created.rows().first().and_then(|row| text(row, 0))
    }

    /// Copy cart lines into order_items. Lines without a product are skipped.
    pub async fn add_order_items(&self, order_id: &str, lines: &[CartLine]) -> bool {
        for line in lines {
            let Some(product_id) = line.product_id.as_deref() else {
                continue;
            };
            let inserted = self
                .gateway
                .execute(
                    "INSERT INTO order_items (order_id, product_id, quantity, price) \
                     VALUES ($1, $2, $3, $4)",
                    &[
                        json!(order_id),
                        json!(product_id),
                        json!(line.quantity),
                        json!(line.price),
                    ],
                )
                .await;
            if !inserted.write_ok() {
                tracing::error!(order_id, product_id, "add_order_items failed");
                return false;
            }
        }
        true
    }

    /// A user's orders, newest first.
    pub async fn orders_of_user(&self, user_id: &str) -> Vec<Order> {
        let sql = format!(
            "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
            ORDER_COLUMNS
        );
        let outcome = self.gateway.execute(&sql, &[json!(user_id)]).await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Order::from_row(row))
            .collect()
    }

    /// One order with its lines, or `None` when the order does not exist.
    pub async fn order_details(&self, order_id: &str) -> Option<OrderDetails> {
        let sql = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        let outcome = self.gateway.execute(&sql, &[json!(order_id)]).await;
        let order = outcome.rows().first().and_then(|row| Order::from_row(row))?;

        let items = self
            .gateway
            .execute(
                "SELECT oi.quantity, oi.price, p.name, p.image_url \
                 FROM order_items oi JOIN products p ON p.id = oi.product_id \
                 WHERE oi.order_id = $1",
                &[json!(order_id)],
            )
            .await;
        let items = items
            .rows()
            .iter()
            .filter_map(|row| OrderLine::from_row(row))
            .collect();
        Some(OrderDetails { order, items })
    }

    pub async fn set_status(&self, order_id: &str, status: &str) -> bool {
        self.gateway
            .execute(
                "UPDATE orders SET status = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
                &[json!(order_id), json!(status)],
            )
            .await
            .write_ok()
    }
}
