//! Schema qualification of bare table references.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const SCHEMA: &str = "public";

/// Tables owned by the `public` schema. Only names listed here are rewritten;
/// anything else passes through exactly as written, so statements against
/// unregistered tables still work unqualified.
const PUBLIC_TABLES: &[&str] = &[
    "users",
    "orders",
    "order_items",
    "automation_rules",
    "scheduled_posts",
    "inventory_rules",
    "products",
    "product_images",
    "favorites",
    "categories",
    "subcategories",
    "promo_codes",
    "promo_uses",
    "shipments",
    "loyalty_points",
    "notifications",
    "suppliers",
    "business_expenses",
    "automation_executions",
    "security_logs",
    "webhook_logs",
    "stock_reservations",
    "stocktaking_items",
    "stocktaking_sessions",
    "user_activity_logs",
    "post_activity",
    "post_statistics",
];

static READ_SITES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(FROM|JOIN)\s+([a-zA-Z_][a-zA-Z0-9_\.]+)").unwrap());
static WRITE_SITES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(UPDATE|INTO|DELETE\s+FROM)\s+([a-zA-Z_][a-zA-Z0-9_\.]+)").unwrap()
});

fn qualify_site(caps: &Captures) -> String {
    let keyword = &caps[1];
    let table = &caps[2];
    // already schema-qualified, leave as is
    if table.contains('.') {
        return caps[0].to_string();
    }
    if PUBLIC_TABLES.contains(&table.to_ascii_lowercase().as_str()) {
        format!("{} {}.{}", keyword, SCHEMA, table)
    } else {
        caps[0].to_string()
    }
}

/// Rewrite unqualified references to registered tables after `FROM`, `JOIN`,
/// `UPDATE`, `INTO` and `DELETE FROM`. Case-insensitive on keywords and table
/// names; never fails.
pub fn qualify_tables(sql: &str) -> String {
    let reads = READ_SITES.replace_all(sql, qualify_site);
    WRITE_SITES.replace_all(&reads, qualify_site).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifies_registered_table_after_from() {
        assert_eq!(
            qualify_tables("SELECT * FROM products WHERE price > 10"),
            "SELECT * FROM public.products WHERE price > 10"
        );
    }

    #[test]
    fn qualifies_join_update_into_and_delete_from() {
        assert_eq!(
            qualify_tables("SELECT * FROM orders o JOIN users u ON u.id = o.user_id"),
            "SELECT * FROM public.orders o JOIN public.users u ON u.id = o.user_id"
        );
        assert_eq!(
            qualify_tables("UPDATE products SET stock = 0"),
            "UPDATE public.products SET stock = 0"
        );
        assert_eq!(
            qualify_tables("INSERT INTO favorites (user_id) VALUES ($1)"),
            "INSERT INTO public.favorites (user_id) VALUES ($1)"
        );
        assert_eq!(
            qualify_tables("DELETE FROM notifications WHERE id = $1"),
            "DELETE FROM public.notifications WHERE id = $1"
        );
    }

    #[test]
    fn collapses_gap_between_keyword_and_table() {
        assert_eq!(
            qualify_tables("DELETE FROM   orders WHERE id = $1"),
            "DELETE FROM public.orders WHERE id = $1"
        );
    }

    #[test]
    fn already_qualified_reference_is_unchanged() {
        let sql = "SELECT * FROM public.users";
        assert_eq!(qualify_tables(sql), sql);
        // and running the rewrite twice changes nothing
        assert_eq!(qualify_tables(&qualify_tables(sql)), sql);
    }

    #[test]
    fn unregistered_table_passes_through() {
        let sql = "SELECT * FROM cart WHERE user_id = $1";
        assert_eq!(qualify_tables(sql), sql);
    }

    #[test]
    fn keywords_and_names_match_case_insensitively() {
        assert_eq!(
            qualify_tables("select * from Products"),
            "select * from public.Products"
        );
    }
}
