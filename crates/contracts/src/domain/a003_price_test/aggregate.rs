use crate::domain::a001_product::aggregate::ProductId;
use crate::domain::a002_test_group::aggregate::TestGroupId;
use crate::domain::common::serde_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::numeric_id!(
    /// Backend identifier of a price test
    PriceTestId
);

/// Lifecycle of a price test. Transitions are owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceTestStatus {
    #[default]
    Planned,
    Running,
    Paused,
    Completed,
}

impl PriceTestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTestStatus::Planned => "planned",
            PriceTestStatus::Running => "running",
            PriceTestStatus::Paused => "paused",
            PriceTestStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTestStatus::Planned => "Planned",
            PriceTestStatus::Running => "Running",
            PriceTestStatus::Paused => "Paused",
            PriceTestStatus::Completed => "Completed",
        }
    }

    pub fn all() -> [PriceTestStatus; 4] {
        [
            PriceTestStatus::Planned,
            PriceTestStatus::Running,
            PriceTestStatus::Paused,
            PriceTestStatus::Completed,
        ]
    }
}

/// Control/test price pair for one product of the tested group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTestItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub asin: String,
    #[serde(default)]
    pub name: String,
    pub control_price: f64,
    pub test_price: f64,
}

impl PriceTestItem {
    /// Relative price change of the test price against the control price, in percent
    pub fn price_change_pct(&self) -> f64 {
        if self.control_price == 0.0 {
            0.0
        } else {
            (self.test_price - self.control_price) / self.control_price * 100.0
        }
    }
}

/// Row of `GET /price-test/` and `GET /price-test/by_group/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTest {
    pub id: PriceTestId,
    pub name: String,
    pub group_id: TestGroupId,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(with = "serde_date")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: PriceTestStatus,
    #[serde(default)]
    pub is_controlled_test: bool,
    #[serde(default)]
    pub items: Vec<PriceTestItem>,
}

impl PriceTest {
    /// Number of days covered by the test, both ends included
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn asins(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.asin.clone())
            .filter(|asin| !asin.is_empty())
            .collect()
    }
}

/// Body of `POST /price-test/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPriceTest {
    pub name: String,
    pub group_id: TestGroupId,
    #[serde(with = "serde_date")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_date")]
    pub end_date: NaiveDate,
    pub is_controlled_test: bool,
    pub items: Vec<PriceTestItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_price_test_serializes_plain_dates() {
        let dto = NewPriceTest {
            name: "Spring".into(),
            group_id: TestGroupId(2),
            start_date: date(2024, 4, 1),
            end_date: date(2024, 4, 14),
            is_controlled_test: false,
            items: vec![PriceTestItem {
                product_id: ProductId(9),
                asin: "B000000009".into(),
                name: "Kettle".into(),
                control_price: 20.0,
                test_price: 22.0,
            }],
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["start_date"], "2024-04-01");
        assert_eq!(json["end_date"], "2024-04-14");
        assert_eq!(json["items"][0]["product_id"], 9);
    }

    #[test]
    fn reads_backend_row_with_timestamp_dates() {
        let json = r#"{
            "id": 11, "name": "Q2", "group_id": 4,
            "start_date": "2024-05-01T00:00:00", "end_date": "2024-05-10",
            "status": "running"
        }"#;
        let test: PriceTest = serde_json::from_str(json).unwrap();
        assert_eq!(test.status, PriceTestStatus::Running);
        assert_eq!(test.duration_days(), 10);
        assert!(test.items.is_empty());
    }

    #[test]
    fn price_change_handles_zero_control() {
        let mut item = PriceTestItem {
            product_id: ProductId(1),
            asin: String::new(),
            name: String::new(),
            control_price: 0.0,
            test_price: 5.0,
        };
        assert_eq!(item.price_change_pct(), 0.0);
        item.control_price = 10.0;
        assert!((item.price_change_pct() - (-50.0)).abs() < 1e-9);
    }
}
