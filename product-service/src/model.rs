//! The Product entity and its request bodies
//!
//! A [`Product`] is a row in the catalog table. Its identity is a
//! [`ProductId`] assigned by the server on create; the remaining fields are
//! client-supplied and validated at the handler boundary.
//!
//! [`NewProduct`] is the create body (no identity field; one supplied by a
//! client is ignored) and [`ProductPatch`] the update body, where every field
//! is optional and absent fields leave the stored value untouched.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// A product record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identity, assigned by the server and immutable afterwards
    #[serde(rename = "id_product")]
    pub id: ProductId,
    /// Display name
    #[serde(rename = "product_name")]
    pub name: String,
    /// Price in the smallest currency unit, never negative
    pub price: i64,
    /// Units in stock, never negative
    pub count: i64,
    /// Image reference, may be empty
    pub image_url: String,
}

/// Request body for creating a product.
///
/// Unknown fields (including any client-supplied `id_product`) are ignored;
/// the server always generates the identity.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "product_name")]
    pub name: String,
    pub price: i64,
    pub count: i64,
    #[serde(default)]
    pub image_url: String,
}

impl NewProduct {
    /// Validate the body, returning a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.name, self.price, self.count)
    }

    /// Materialize the body into a product under a freshly assigned identity.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            count: self.count,
            image_url: self.image_url,
        }
    }
}

/// Request body for updating a product.
///
/// Every field is optional. Present fields overwrite the stored value, absent
/// fields are left as they are. The identity cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(rename = "product_name")]
    pub name: Option<String>,
    pub price: Option<i64>,
    pub count: Option<i64>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// Merge the patch into an existing product, then validate the result.
    ///
    /// Returns the merged record or a description of the first invalid field.
    pub fn apply(self, mut product: Product) -> Result<Product, String> {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(count) = self.count {
            product.count = count;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }

        validate_fields(&product.name, product.price, product.count)?;
        Ok(product)
    }
}

fn validate_fields(name: &str, price: i64, count: i64) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("product_name must not be empty".to_string());
    }
    if price < 0 {
        return Err("price must not be negative".to_string());
    }
    if count < 0 {
        return Err("count must not be negative".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Kopi Gayo 250g".to_string(),
            price: 45000,
            count: 12,
            image_url: String::new(),
        }
    }

    #[test]
    fn test_new_product_valid() {
        assert!(new_product().validate().is_ok());
    }

    #[test]
    fn test_new_product_rejects_empty_name() {
        let mut body = new_product();
        body.name = "   ".to_string();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_new_product_rejects_negative_price() {
        let mut body = new_product();
        body.price = -1;
        assert_eq!(
            body.validate().unwrap_err(),
            "price must not be negative"
        );
    }

    #[test]
    fn test_new_product_rejects_negative_count() {
        let mut body = new_product();
        body.count = -3;
        assert_eq!(
            body.validate().unwrap_err(),
            "count must not be negative"
        );
    }

    #[test]
    fn test_into_product_assigns_given_identity() {
        let id = ProductId::new();
        let product = new_product().into_product(id.clone());
        assert_eq!(product.id, id);
        assert_eq!(product.name, "Kopi Gayo 250g");
        assert_eq!(product.price, 45000);
    }

    #[test]
    fn test_create_body_ignores_client_identity() {
        let json = r#"{
            "id_product": "prod_01h455vb4pex5vsknk084sn02q",
            "product_name": "Teh Melati",
            "price": 12000,
            "count": 4
        }"#;
        let body: NewProduct = serde_json::from_str(json).unwrap();
        assert_eq!(body.name, "Teh Melati");
        assert_eq!(body.image_url, "");
    }

    #[test]
    fn test_patch_applies_present_fields_only() {
        let product = new_product().into_product(ProductId::new());
        let original_count = product.count;

        let patch = ProductPatch {
            price: Some(47500),
            ..ProductPatch::default()
        };
        let merged = patch.apply(product.clone()).unwrap();

        assert_eq!(merged.price, 47500);
        assert_eq!(merged.count, original_count);
        assert_eq!(merged.name, product.name);
        assert_eq!(merged.id, product.id);
    }

    #[test]
    fn test_empty_patch_is_a_noop() {
        let product = new_product().into_product(ProductId::new());
        let merged = ProductPatch::default().apply(product.clone()).unwrap();
        assert_eq!(merged, product);
    }

    #[test]
    fn test_patch_rejects_invalid_merge_result() {
        let product = new_product().into_product(ProductId::new());
        let patch = ProductPatch {
            count: Some(-1),
            ..ProductPatch::default()
        };
        assert!(patch.apply(product).is_err());
    }

    #[test]
    fn test_product_wire_field_names() {
        let product = new_product().into_product(ProductId::new());
        let value = serde_json::to_value(&product).unwrap();

        assert!(value.get("id_product").is_some());
        assert!(value.get("product_name").is_some());
        assert!(value.get("price").is_some());
        assert!(value.get("count").is_some());
        assert!(value.get("image_url").is_some());
    }
}
