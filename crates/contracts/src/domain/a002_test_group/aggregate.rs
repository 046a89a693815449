use crate::domain::a001_product::aggregate::{Product, ProductId};
use serde::{Deserialize, Serialize};

crate::numeric_id!(
    /// Backend identifier of a test group
    TestGroupId
);

/// Row of `GET /product-groups/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGroup {
    pub id: TestGroupId,
    pub name: String,
    #[serde(default)]
    pub item_count: usize,
}

/// Response of `GET /product-groups/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestGroupDetail {
    pub id: TestGroupId,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl TestGroupDetail {
    pub fn summary(&self) -> TestGroup {
        TestGroup {
            id: self.id,
            name: self.name.clone(),
            item_count: self.products.len(),
        }
    }
}

/// Body of `POST /product-groups/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTestGroup {
    pub name: String,
    pub product_ids: Vec<ProductId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_without_products_is_empty() {
        let json = r#"{"id":3,"name":"Kitchen"}"#;
        let detail: TestGroupDetail = serde_json::from_str(json).unwrap();
        assert!(detail.products.is_empty());
        assert!(!detail.is_active);
        assert_eq!(detail.summary().item_count, 0);
    }

    #[test]
    fn new_group_serializes_ids_as_numbers() {
        let dto = NewTestGroup {
            name: "Summer".into(),
            product_ids: vec![ProductId(1), ProductId(5)],
        };
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"name":"Summer","product_ids":[1,5]}"#
        );
    }
}
