//! Shop entity operations over the gateway's cursor-like contract.
//!
//! Every method issues internally constructed SQL through
//! [`Gateway::execute`] and reshapes the normalized row tuples into typed
//! records. All methods follow the soft-failure convention of the gateway: a
//! miss or a failed call surfaces as `None` / empty / `false`, never an
//! error.

pub mod cart;
pub mod catalog;
pub mod engagement;
pub mod orders;
pub mod records;
pub mod users;

pub use records::{
    CartLine, Category, LoyaltyPoints, Notification, Order, OrderDetails, OrderLine, Product,
    Review, Subcategory, User, UserSummary,
};

use crate::gateway::Gateway;

#[derive(Clone)]
pub struct ShopService {
    gateway: Gateway,
}

impl ShopService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}
