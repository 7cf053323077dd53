//! The persistence port and its implementations
//!
//! [`ProductRepository`] is the capability the service core depends on:
//! count, find, bounded page fetch, lookups by identity and by name, and the
//! three mutations. It is consumed as `Arc<dyn ProductRepository>`, injected
//! into the application state at startup, so handlers never know which store
//! they talk to.
//!
//! Two implementations exist:
//!
//! - [`PostgresProductRepository`]: the production store over a sqlx pool
//! - [`MemoryProductRepository`]: an in-memory store used by tests
//!
//! Lookup misses are `Ok(None)`, not errors; only genuine store failures
//! surface as [`RepositoryError`], and they are never retried here.

mod error;
mod memory;
mod postgres;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::MemoryProductRepository;
pub use postgres::PostgresProductRepository;

use async_trait::async_trait;

use crate::ids::ProductId;
use crate::model::Product;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// The abstract storage capability for products.
///
/// Implementations must keep iteration order stable across pages for an
/// unmodified dataset; both shipped stores order by identity, which is
/// time-sortable and therefore reflects creation order.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Count every product in the collection.
    async fn count_all(&self) -> RepositoryResult<u64>;

    /// Fetch the whole collection in store order.
    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// Fetch up to `limit` products starting at `offset`, plus the total row
    /// count of the whole collection.
    ///
    /// The total is counted independently of the bounded fetch so it reflects
    /// the entire table, not the returned slice.
    async fn find_page(&self, limit: u32, offset: u64) -> RepositoryResult<(Vec<Product>, u64)>;

    /// Find a product by its identity. A miss is `Ok(None)`.
    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;

    /// Find the first product whose name matches exactly. A miss is `Ok(None)`.
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>>;

    /// Insert a new product under its already-assigned identity.
    async fn insert(&self, product: &Product) -> RepositoryResult<()>;

    /// Overwrite an existing product in place, identity unchanged.
    ///
    /// Returns `false` if no row with that identity exists.
    async fn update(&self, product: &Product) -> RepositoryResult<bool>;

    /// Remove a product. Returns `false` if no row with that identity exists.
    async fn delete(&self, id: &ProductId) -> RepositoryResult<bool>;
}
