use crate::shared::api_client::{get, get_list, post, ApiError};
use contracts::dashboards::d400_price_test_results::{AsinSales, DailySales, SalesSummary};
use contracts::domain::a002_test_group::aggregate::TestGroupId;
use contracts::domain::a003_price_test::aggregate::{NewPriceTest, PriceTest, PriceTestId};

pub async fn fetch_price_tests() -> Result<Vec<PriceTest>, ApiError> {
    get_list("/price-test/").await
}

/// Uncontrolled tests of one group, newest first as sent by the backend
pub async fn fetch_price_tests_by_group(id: TestGroupId) -> Result<Vec<PriceTest>, ApiError> {
    get_list(&format!("/price-test/by_group/{}?is_controlled_test=false", id)).await
}

pub async fn fetch_test_sales(id: PriceTestId) -> Result<SalesSummary, ApiError> {
    Ok(get(&format!("/price-test/{}/sales", id)).await?.unwrap_or_default())
}

pub fn sales_by_asin_path(id: PriceTestId, asins: &[String]) -> String {
    format!(
        "/price-test/{}/sales/asin?asins={}",
        id,
        urlencoding::encode(&asins.join(","))
    )
}

pub async fn fetch_test_sales_by_asin(
    id: PriceTestId,
    asins: &[String],
) -> Result<Vec<AsinSales>, ApiError> {
    get_list(&sales_by_asin_path(id, asins)).await
}

pub async fn fetch_test_sales_by_date(id: PriceTestId) -> Result<Vec<DailySales>, ApiError> {
    get_list(&format!("/price-test/{}/sales/date", id)).await
}

pub async fn create_price_test(dto: &NewPriceTest) -> Result<Option<PriceTest>, ApiError> {
    post("/price-test/", dto).await
}
