use serde::{Deserialize, Serialize};

crate::numeric_id!(
    /// Backend identifier of a product
    ProductId
);

/// Listing status of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Inactive => "Inactive",
        }
    }
}

/// Product from the inventory, as returned by `GET /products/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub asin: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub status: ProductStatus,
}

impl Product {
    /// Link to the marketplace listing of this product
    pub fn marketplace_url(&self) -> String {
        marketplace_url(&self.asin)
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

/// Link to the marketplace listing for an ASIN
pub fn marketplace_url(asin: &str) -> String {
    format!("https://www.amazon.com/dp/{}", asin.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{"id":7,"sku":"SKU-7","asin":"B0TEST0007","name":"Mug","price":12.5,"status":"inactive"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.status, ProductStatus::Inactive);
        assert!(!product.is_active());
        assert_eq!(product.marketplace_url(), "https://www.amazon.com/dp/B0TEST0007");
    }

    #[test]
    fn status_defaults_to_active() {
        let json = r#"{"id":1,"sku":"A","asin":"B","name":"C","price":1.0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.status, ProductStatus::Active);
    }
}
