use crate::shared::api_client::{get_list, get_one, post, ApiError};
use contracts::domain::a002_test_group::aggregate::{
    NewTestGroup, TestGroup, TestGroupDetail, TestGroupId,
};

pub async fn fetch_test_groups() -> Result<Vec<TestGroup>, ApiError> {
    get_list("/product-groups/").await
}

pub async fn fetch_test_group(id: TestGroupId) -> Result<TestGroupDetail, ApiError> {
    get_one(&format!("/product-groups/{}", id)).await
}

/// Creates a group; the backend echoes the stored group when it has a body to send
pub async fn create_test_group(dto: &NewTestGroup) -> Result<Option<TestGroup>, ApiError> {
    post("/product-groups/", dto).await
}
