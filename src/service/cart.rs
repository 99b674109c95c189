//! Cart operations.

use super::records::{integer, text, CartLine};
use super::ShopService;
use serde_json::json;

impl ShopService {
    /// Add a product to the user's cart, merging the quantity into an
    /// existing line. Returns the cart line id, or `None` when the product is
    /// missing or stock is insufficient.
    pub async fn add_to_cart(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> Option<String> {
        let product = self.product_by_id(product_id).await?;
        if product.stock < quantity {
            return None;
        }
        let existing = self
            .gateway
            .execute(
                "SELECT id, quantity FROM cart WHERE user_id = $1 AND product_id = $2",
                &[json!(user_id), json!(product_id)],
            )
            .await;
        if let Some(row) = existing.rows().first() {
            let line_id = text(row, 0)?;
            let merged = integer(row, 1) + quantity;
            if merged > product.stock {
                return None;
            }
            let updated = self
                .gateway
                .execute(
                    "UPDATE cart SET quantity = $2 WHERE id = $1",
                    &[json!(line_id), json!(merged)],
                )
                .await;
            return updated.write_ok().then_some(line_id);
        }
        let inserted = self
            .gateway
            .execute(
                "INSERT INTO cart (user_id, product_id, quantity) VALUES ($1, $2, $3)",
                &[json!(user_id), json!(product_id), json!(quantity)],
            )
            .await;
        if !inserted.write_ok() {
            return None;
        }
        let created = self
            .gateway
            .execute(
                "SELECT id FROM cart WHERE user_id = $1 AND product_id = $2",
                &[json!(user_id), json!(product_id)],
            )
            .await;
        created.rows().first().and_then(|row| text(row, 0))
    }

    /// Cart lines joined with their product, newest first.
    pub async fn cart_items(&self, user_id: &str) -> Vec<CartLine> {
        let outcome = self
            .gateway
            .execute(
                "SELECT c.id, p.name, p.price, c.quantity, p.id AS product_id, p.image_url \
                 FROM cart c JOIN products p ON p.id = c.product_id \
                 WHERE c.user_id = $1 ORDER BY c.created_at DESC",
                &[json!(user_id)],
            )
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| CartLine::from_row(row))
            .collect()
    }

    pub async fn remove_item(&self, cart_item_id: &str) -> bool {
        self.gateway
            .execute("DELETE FROM cart WHERE id = $1", &[json!(cart_item_id)])
            .await
            .write_ok()
    }

    /// Set a line's quantity; zero or less removes the line.
    pub async fn set_quantity(&self, cart_item_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(cart_item_id).await;
        }
        self.gateway
            .execute(
                "UPDATE cart SET quantity = $2 WHERE id = $1",
                &[json!(cart_item_id), json!(quantity)],
            )
            .await
            .write_ok()
    }

    pub async fn clear(&self, user_id: &str) -> bool {
        self.gateway
            .execute("DELETE FROM cart WHERE user_id = $1", &[json!(user_id)])
            .await
            .write_ok()
    }
}
