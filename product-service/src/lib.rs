//! # product-service
//!
//! A CRUD service exposing a Product catalog over HTTP, backed by a
//! relational table, with paginated listing and a uniform response envelope.
//!
//! ## Shape
//!
//! - Every endpoint answers with the same envelope: correlation identifier,
//!   success flag, error message, tin/tout timestamps, and a payload that is
//!   a page of products, a single product, or an empty object.
//! - List queries are validated up front ([`pagination`]); invalid page or
//!   pageSize values are rejected with 400, never clamped.
//! - Storage is a capability ([`repository::ProductRepository`]) injected at
//!   startup: PostgreSQL in production, in-memory in tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use product_service::config::Config;
//! use product_service::handlers;
//! use product_service::observability::init_tracing;
//! use product_service::repository::MemoryProductRepository;
//! use product_service::server::Server;
//! use product_service::state::AppState;
//!
//! #[tokio::main]
//! async fn main() -> product_service::error::Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let repository = Arc::new(MemoryProductRepository::new());
//!     let state = AppState::new(config.clone(), repository);
//!
//!     let app = handlers::router(state);
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod ids;
pub mod middleware;
pub mod model;
pub mod observability;
pub mod pagination;
pub mod repository;
pub mod server;
pub mod state;
