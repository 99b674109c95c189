//! Catalog reads: categories, subcategories, products.

use super::records::{Category, Product, Subcategory};
use super::ShopService;
use serde_json::json;

pub(crate) const PRODUCT_COLUMNS: &str =
    "id, name, description, price, image_url, category_id, subcategory_id, stock, is_active";

impl ShopService {
    /// Active categories ordered by name.
    pub async fn categories(&self) -> Vec<Category> {
        let outcome = self
            .gateway
            .execute(
                "SELECT id, name, description, emoji, is_active, created_at \
                 FROM categories WHERE is_active = 1 ORDER BY name",
                &[],
            )
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Category::from_row(row))
            .collect()
    }

    /// Active subcategories of one category.
    pub async fn subcategories_of(&self, category_id: &str) -> Vec<Subcategory> {
        let outcome = self
            .gateway
            .execute(
                "SELECT id, name, emoji FROM subcategories \
                 WHERE category_id = $1 AND is_active = 1 ORDER BY name",
                &[json!(category_id)],
            )
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Subcategory::from_row(row))
            .collect()
    }

    /// Active products of one subcategory, name-ordered, paginated.
    pub async fn products_by_subcategory(
        &self,
        subcategory_id: &str,
        limit: i64,
        offset: i64,
    ) -> Vec<Product> {
        let sql = format!(
            "SELECT {} FROM products \
             WHERE subcategory_id = $1 AND is_active = 1 \
             ORDER BY name LIMIT $2 OFFSET $3",
            PRODUCT_COLUMNS
        );
        let outcome = self
            .gateway
            .execute(&sql, &[json!(subcategory_id), json!(limit), json!(offset)])
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Product::from_row(row))
            .collect()
    }

    pub async fn product_by_id(&self, product_id: &str) -> Option<Product> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let outcome = self.gateway.execute(&sql, &[json!(product_id)]).await;
        outcome.rows().first().and_then(|row| Product::from_row(row))
    }

    /// Case-insensitive substring search over name and description.
    pub async fn search_products(&self, query: &str, limit: i64) -> Vec<Product> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            "SELECT {} FROM products \
             WHERE (name ILIKE $1 OR description ILIKE $1) AND is_active = 1 \
             ORDER BY name LIMIT $2",
            PRODUCT_COLUMNS
        );
        let outcome = self
            .gateway
            .execute(&sql, &[json!(pattern), json!(limit)])
            .await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Product::from_row(row))
            .collect()
    }

    /// Most viewed and best selling active products.
    pub async fn popular_products(&self, limit: i64) -> Vec<Product> {
        let sql = format!(
            "SELECT {} FROM products WHERE is_active = 1 \
             ORDER BY views DESC, sales_count DESC LIMIT $1",
            PRODUCT_COLUMNS
        );
        let outcome = self.gateway.execute(&sql, &[json!(limit)]).await;
        outcome
            .rows()
            .iter()
            .filter_map(|row| Product::from_row(row))
            .collect()
    }

    pub async fn increment_product_views(&self, product_id: &str) -> bool {
        self.gateway
            .execute(
                "UPDATE products SET views = views + 1 WHERE id = $1",
                &[json!(product_id)],
            )
            .await
            .write_ok()
    }
}
