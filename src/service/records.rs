//! Typed records reshaped from normalized row tuples. Field order follows the
//! positional column layout each query selects; constructors tolerate short
//! rows by defaulting trailing columns.

use serde::Serialize;
use serde_json::Value;

pub(crate) fn text(row: &[Value], index: usize) -> Option<String> {
    row.get(index)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

pub(crate) fn text_or(row: &[Value], index: usize, default: &str) -> String {
    text(row, index).unwrap_or_else(|| default.to_string())
}

pub(crate) fn number(row: &[Value], index: usize) -> f64 {
    match row.get(index) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        // numeric columns may arrive as JSON strings
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub(crate) fn integer(row: &[Value], index: usize) -> i64 {
    match row.get(index) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

pub(crate) fn flag(row: &[Value], index: usize, default: bool) -> bool {
    row.get(index).and_then(Value::as_bool).unwrap_or(default)
}

/// Layout: (id, telegram_id, name, phone, email, language, is_admin,
/// created_at, is_registered).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub telegram_id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub language: String,
    pub is_admin: bool,
    pub created_at: Option<String>,
    pub is_registered: bool,
}

impl User {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(User {
            id: text(row, 0)?,
            telegram_id: integer(row, 1),
            name: text(row, 2),
            phone: text(row, 3),
            email: text(row, 4),
            language: text_or(row, 5, "ru"),
            is_admin: flag(row, 6, false),
            created_at: text(row, 7),
            is_registered: flag(row, 8, false),
        })
    }
}

/// Layout: (id, is_admin, language, is_registered).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub is_admin: bool,
    pub language: String,
    pub is_registered: bool,
}

impl UserSummary {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(UserSummary {
            id: text(row, 0)?,
            is_admin: flag(row, 1, false),
            language: text_or(row, 2, "ru"),
            is_registered: flag(row, 3, false),
        })
    }
}

/// Layout: (id, name, description, emoji, is_active, created_at).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub emoji: String,
    pub is_active: bool,
    pub created_at: Option<String>,
}

impl Category {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Category {
            id: text(row, 0)?,
            name: text(row, 1),
            description: text(row, 2),
            emoji: text_or(row, 3, "📦"),
            is_active: flag(row, 4, true),
            created_at: text(row, 5),
        })
    }
}

/// Layout: (id, name, emoji).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subcategory {
    pub id: String,
    pub name: Option<String>,
    pub emoji: String,
}

impl Subcategory {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Subcategory {
            id: text(row, 0)?,
            name: text(row, 1),
            emoji: text_or(row, 2, "📦"),
        })
    }
}

/// Layout: (id, name, description, price, image_url, category_id,
/// subcategory_id, stock, is_active).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub stock: i64,
    pub is_active: bool,
}

impl Product {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Product {
            id: text(row, 0)?,
            name: text(row, 1),
            description: text(row, 2),
            price: number(row, 3),
            image_url: text(row, 4),
            category_id: text(row, 5),
            subcategory_id: text(row, 6),
            stock: integer(row, 7),
            is_active: flag(row, 8, true),
        })
    }
}

/// Layout: (id, product_name, price, quantity, product_id, image_url).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: String,
    pub product_name: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub product_id: Option<String>,
    pub image_url: Option<String>,
}

impl CartLine {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(CartLine {
            id: text(row, 0)?,
            product_name: text(row, 1),
            price: number(row, 2),
            quantity: integer(row, 3),
            product_id: text(row, 4),
            image_url: text(row, 5),
        })
    }
}

/// Layout: (id, user_id, total_amount, status, delivery_address,
/// payment_method, payment_status, created_at, updated_at).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub user_id: Option<String>,
    pub total_amount: f64,
    pub status: Option<String>,
    pub delivery_address: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Order {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Order {
            id: text(row, 0)?,
            user_id: text(row, 1),
            total_amount: number(row, 2),
            status: text(row, 3),
            delivery_address: text(row, 4),
            payment_method: text(row, 5),
            payment_status: text(row, 6),
            created_at: text(row, 7),
            updated_at: text(row, 8),
        })
    }
}

/// Layout: (quantity, price, product_name, image_url).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub quantity: i64,
    pub price: f64,
    pub product_name: Option<String>,
    pub image_url: Option<String>,
}

impl OrderLine {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        if row.is_empty() {
            return None;
        }
        Some(OrderLine {
            quantity: integer(row, 0),
            price: number(row, 1),
            product_name: text(row, 2),
            image_url: text(row, 3),
        })
    }
}

/// An order together with its lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderLine>,
}

/// Layout: (rating, comment, created_at, user_name).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: Option<String>,
    pub user_name: String,
}

impl Review {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        if row.is_empty() {
            return None;
        }
        Some(Review {
            rating: integer(row, 0),
            comment: text(row, 1),
            created_at: text(row, 2),
            user_name: text_or(row, 3, "Anonymous"),
        })
    }
}

/// Layout: (id, user_id, title, message, type, is_read, created_at).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub kind: String,
    pub is_read: bool,
    pub created_at: Option<String>,
}

impl Notification {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(Notification {
            id: text(row, 0)?,
            user_id: text(row, 1),
            title: text(row, 2),
            message: text(row, 3),
            kind: text_or(row, 4, "info"),
            is_read: flag(row, 5, false),
            created_at: text(row, 6),
        })
    }
}

/// Layout: (id, user_id, current_points, total_earned).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoyaltyPoints {
    pub id: String,
    pub user_id: Option<String>,
    pub current_points: i64,
    pub total_earned: i64,
}

impl LoyaltyPoints {
    pub fn from_row(row: &[Value]) -> Option<Self> {
        Some(LoyaltyPoints {
            id: text(row, 0)?,
            user_id: text(row, 1),
            current_points: integer(row, 2),
            total_earned: integer(row, 3),
        })
    }
}
