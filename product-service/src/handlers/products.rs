//! Product collection handlers

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::str::FromStr;
use tracing::info;

use crate::envelope::{EmptyData, EnvelopeBuilder};
use crate::error::{Error, Result};
use crate::extract::Json;
use crate::ids::ProductId;
use crate::model::{NewProduct, Product, ProductPatch};
use crate::pagination::{Page, PageRequest};
use crate::repository::RepositoryErrorKind;
use crate::state::AppState;

/// Query parameters accepted by the list endpoint.
///
/// Values arrive as raw strings and are validated by the pagination engine,
/// not here, so a malformed value is reported through the taxonomy rather
/// than as a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub name: Option<String>,
}

/// List products page by page, or look one up by name.
///
/// A present `name` parameter takes precedence over pagination entirely:
/// page and pageSize are then neither validated nor used.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let envelope = EnvelopeBuilder::start();

    if let Some(name) = params.name.as_deref().filter(|n| !n.is_empty()) {
        info!(name, "looking up product by name");

        let product = state
            .repository()
            .find_by_name(name)
            .await?
            .ok_or_else(|| Error::not_found("Product", name))?;

        return Ok(envelope.success(product).into_response());
    }

    let request = PageRequest::parse(
        params.page.as_deref(),
        params.page_size.as_deref(),
        state.config().pagination.default_page_size,
    )?;

    info!(
        page = request.page(),
        page_size = request.page_size(),
        "listing products"
    );

    let (items, total_items) = state
        .repository()
        .find_page(request.page_size(), request.offset())
        .await?;

    let page: Page<Product> = Page::assemble(items, total_items, &request, envelope.started());

    Ok(envelope.success(page).into_response())
}

/// Fetch a single product by identity.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let envelope = EnvelopeBuilder::start();
    let id = parse_product_id(&id)?;

    info!(id = %id, "fetching product");

    let product = state
        .repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found("Product", id.as_str()))?;

    Ok(envelope.success(product).into_response())
}

/// Create a product under a freshly generated identity.
///
/// Any identity supplied in the body is ignored; the server always assigns
/// its own.
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<Response> {
    let envelope = EnvelopeBuilder::start();

    body.validate().map_err(Error::invalid_parameter)?;

    let product = body.into_product(ProductId::new());

    info!(id = %product.id, name = %product.name, "creating product");

    state.repository().insert(&product).await.map_err(|e| {
        if e.kind == RepositoryErrorKind::AlreadyExists {
            Error::IdentityGeneration(e.to_string())
        } else {
            Error::Store(e)
        }
    })?;

    Ok(envelope.success(product).into_response())
}

/// Update an existing product in place, identity unchanged.
///
/// The stored record is fetched first, the patch merged over it, and the
/// merged record persisted. Concurrent updates to the same identity can race;
/// the store's own semantics decide the winner.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Response> {
    let envelope = EnvelopeBuilder::start();
    let id = parse_product_id(&id)?;

    let existing = state
        .repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found("Product", id.as_str()))?;

    let merged = patch.apply(existing).map_err(Error::invalid_parameter)?;

    info!(id = %merged.id, "updating product");

    let updated = state.repository().update(&merged).await?;
    if !updated {
        // The row vanished between the fetch and the write.
        return Err(Error::not_found("Product", id.as_str()));
    }

    Ok(envelope.success(merged).into_response())
}

/// Delete a product.
///
/// The deleted record is not echoed back; the success envelope carries an
/// empty payload.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let envelope = EnvelopeBuilder::start();
    let id = parse_product_id(&id)?;

    state
        .repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found("Product", id.as_str()))?;

    info!(id = %id, "deleting product");

    let deleted = state.repository().delete(&id).await?;
    if !deleted {
        return Err(Error::not_found("Product", id.as_str()));
    }

    Ok(envelope.success(EmptyData {}).into_response())
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    ProductId::from_str(raw)
        .map_err(|e| Error::invalid_parameter(format!("invalid product id '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id_accepts_generated_ids() {
        let id = ProductId::new();
        assert_eq!(parse_product_id(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_parse_product_id_rejects_garbage() {
        let error = parse_product_id("not-an-id").unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_list_params_accept_raw_strings() {
        let params: ListParams =
            serde_json::from_str(r#"{"page": "2", "pageSize": "10"}"#).unwrap();
        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.page_size.as_deref(), Some("10"));
        assert!(params.name.is_none());
    }
}
