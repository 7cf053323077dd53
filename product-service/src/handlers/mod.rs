//! HTTP handlers and routing
//!
//! Handlers are thin: they pull parameters out of the request, call the
//! pagination engine or the persistence port, and seal the result into the
//! uniform response envelope. Every error they return converts into a
//! failure envelope at the boundary; nothing escapes in another shape.

mod health;
mod products;

pub use health::health;
pub use products::{
    create_product, delete_product, get_product, list_products, update_product, ListParams,
};

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the service router with the given application state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}
