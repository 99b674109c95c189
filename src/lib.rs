//! Shoplink: Telegram-shop backend over a remote Postgres RPC gateway.
//!
//! Legacy call sites write SQLite-flavored SQL; the gateway rewrites it into
//! the Postgres dialect, qualifies known table names, substitutes positional
//! parameters, dispatches one remote procedure call, and normalizes the
//! response into a cursor-like result. The shop service layers the entity
//! operations on top of that contract.

pub mod config;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod rpc;
pub mod service;
pub mod sql;

pub use config::{from_env, GatewayConfig, Role};
pub use error::{ConfigError, GatewayError};
pub use gateway::{Execution, Gateway, HealthReport};
pub use normalize::{QueryResult, Row, WriteReport};
pub use service::ShopService;
pub use sql::QueryKind;
