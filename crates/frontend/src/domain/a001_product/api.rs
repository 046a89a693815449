use crate::shared::api_client::{get_list, ApiError};
use contracts::domain::a001_product::aggregate::Product;

pub async fn fetch_products() -> Result<Vec<Product>, ApiError> {
    get_list("/products/").await
}
