use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_test_group::aggregate::NewTestGroup;

pub const NAME_REQUIRED: &str = "Group name is required.";
pub const PRODUCTS_REQUIRED: &str = "Select at least one product.";

/// Field errors of the Details step
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddGroupErrors {
    pub name: Option<String>,
    pub products: Option<String>,
}

impl AddGroupErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.products.is_none()
    }
}

/// Next and Create stay disabled until something is picked, whatever the name
pub fn can_continue(selected: &[Product]) -> bool {
    !selected.is_empty()
}

/// Validates the Details step and assembles the creation payload
pub fn build_group(name: &str, selected: &[Product]) -> Result<NewTestGroup, AddGroupErrors> {
    let name = name.trim();
    let errors = AddGroupErrors {
        name: name.is_empty().then(|| NAME_REQUIRED.to_string()),
        products: (!can_continue(selected)).then(|| PRODUCTS_REQUIRED.to_string()),
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(NewTestGroup {
        name: name.to_string(),
        product_ids: selected.iter().map(|p| p.id).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::{ProductId, ProductStatus};

    fn product(id: i64) -> Product {
        Product {
            id: ProductId(id),
            sku: format!("SKU-{}", id),
            asin: format!("B0{}", id),
            name: format!("Product {}", id),
            price: 10.0,
            status: ProductStatus::Active,
        }
    }

    #[test]
    fn zero_products_blocks_even_with_a_valid_name() {
        assert!(!can_continue(&[]));
        let errors = build_group("Kitchen", &[]).unwrap_err();
        assert_eq!(errors.name, None);
        assert_eq!(errors.products.as_deref(), Some(PRODUCTS_REQUIRED));
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = build_group("   ", &[product(1)]).unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(errors.products, None);
    }

    #[test]
    fn builds_trimmed_name_and_ids_in_selection_order() {
        let dto = build_group("  Kitchen  ", &[product(7), product(3)]).unwrap();
        assert_eq!(dto.name, "Kitchen");
        assert_eq!(dto.product_ids, vec![ProductId(7), ProductId(3)]);
    }
}
