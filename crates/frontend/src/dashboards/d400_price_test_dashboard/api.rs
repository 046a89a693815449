use super::view_model::DashboardData;
use crate::domain::a003_price_test::api::{
    fetch_price_tests_by_group, fetch_test_sales, fetch_test_sales_by_asin,
    fetch_test_sales_by_date,
};
use crate::shared::api_client::ApiError;
use contracts::domain::a002_test_group::aggregate::TestGroupId;

/// Loads the reports of the most recent uncontrolled test of a group
pub async fn load_group_dashboard(group_id: TestGroupId) -> Result<DashboardData, ApiError> {
    let tests = fetch_price_tests_by_group(group_id).await?;
    let Some(test) = tests.into_iter().next() else {
        log::info!("group {} has no price tests", group_id);
        return Ok(DashboardData::default());
    };

    let asins = test.asins();
    let (summary, daily, by_asin) = futures::try_join!(
        fetch_test_sales(test.id),
        fetch_test_sales_by_date(test.id),
        fetch_test_sales_by_asin(test.id, &asins),
    )?;

    Ok(DashboardData {
        test: Some(test),
        summary,
        daily,
        asins: by_asin,
    })
}
