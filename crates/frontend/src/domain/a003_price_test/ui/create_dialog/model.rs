//! Validation and payload assembly of the Create Test dialog.

use crate::shared::date_utils::{format_date, parse_input_date, tomorrow};
use crate::shared::format::format_delta_pct;
use chrono::NaiveDate;
use contracts::domain::a001_product::aggregate::{Product, ProductId};
use contracts::domain::a002_test_group::aggregate::TestGroupId;
use contracts::domain::a003_price_test::aggregate::{NewPriceTest, PriceTestItem};

pub const DATE_ORDER_ERROR: &str = "End date must be on or after the start date.";
pub const PRICE_ERROR: &str = "Enter a positive price.";

/// Raw values of the Details step, as typed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestDetailsInput {
    pub name: String,
    pub group_id: Option<TestGroupId>,
    pub start_date: String,
    pub end_date: String,
    pub is_controlled_test: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestDetailsErrors {
    pub name: Option<String>,
    pub group: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TestDetailsErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.group.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Details that passed validation
#[derive(Clone, Debug, PartialEq)]
pub struct TestDetails {
    pub name: String,
    pub group_id: TestGroupId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_controlled_test: bool,
}

fn check_date(raw: &str, label: &str, earliest: NaiveDate) -> Result<NaiveDate, String> {
    if raw.trim().is_empty() {
        return Err(format!("{} is required.", label));
    }
    let date = parse_input_date(raw).ok_or_else(|| format!("{} is not a valid date.", label))?;
    if date < earliest {
        return Err(format!("{} must be {} or later.", label, format_date(&earliest)));
    }
    Ok(date)
}

impl TestDetailsInput {
    /// Checks every field; dates may not start before the day after `today`
    pub fn validate(&self, today: NaiveDate) -> Result<TestDetails, TestDetailsErrors> {
        let earliest = tomorrow(today);
        let mut errors = TestDetailsErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Test name is required.".to_string());
        }
        if self.group_id.is_none() {
            errors.group = Some("Select a test group.".to_string());
        }
        let start = check_date(&self.start_date, "Start date", earliest)
            .map_err(|e| errors.start_date = Some(e))
            .ok();
        let end = check_date(&self.end_date, "End date", earliest)
            .map_err(|e| errors.end_date = Some(e))
            .ok();
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.end_date = Some(DATE_ORDER_ERROR.to_string());
            }
        }

        match (self.group_id, start, end) {
            (Some(group_id), Some(start_date), Some(end_date)) if errors.is_empty() => {
                Ok(TestDetails {
                    name: name.to_string(),
                    group_id,
                    start_date,
                    end_date,
                    is_controlled_test: self.is_controlled_test,
                })
            }
            _ => Err(errors),
        }
    }
}

/// One product of the Review step with its editable test price
#[derive(Clone, Debug, PartialEq)]
pub struct ItemLine {
    pub product_id: ProductId,
    pub asin: String,
    pub name: String,
    pub control_price: f64,
    pub test_price: String,
}

impl From<&Product> for ItemLine {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            asin: product.asin.clone(),
            name: product.name.clone(),
            control_price: product.price,
            test_price: format!("{:.2}", product.price),
        }
    }
}

impl ItemLine {
    pub fn parsed_price(&self) -> Option<f64> {
        self.test_price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    pub fn price_error(&self) -> Option<&'static str> {
        match self.parsed_price() {
            Some(_) => None,
            None => Some(PRICE_ERROR),
        }
    }

    /// Payload item; `None` until the test price is valid
    pub fn to_item(&self) -> Option<PriceTestItem> {
        self.parsed_price().map(|test_price| PriceTestItem {
            product_id: self.product_id,
            asin: self.asin.clone(),
            name: self.name.clone(),
            control_price: self.control_price,
            test_price,
        })
    }

    /// Signed change of the test price against the control price
    pub fn change_label(&self) -> String {
        self.to_item()
            .map(|item| format_delta_pct(item.price_change_pct()))
            .unwrap_or_default()
    }
}

/// Builds the payload; on failure returns the indices of lines with a bad price
pub fn build_price_test(details: &TestDetails, lines: &[ItemLine]) -> Result<NewPriceTest, Vec<usize>> {
    let invalid: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.parsed_price().is_none())
        .map(|(i, _)| i)
        .collect();
    if !invalid.is_empty() {
        return Err(invalid);
    }
    let items = lines.iter().filter_map(ItemLine::to_item).collect();
    Ok(NewPriceTest {
        name: details.name.clone(),
        group_id: details.group_id,
        start_date: details.start_date,
        end_date: details.end_date,
        is_controlled_test: details.is_controlled_test,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::ProductStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn input(start: &str, end: &str) -> TestDetailsInput {
        TestDetailsInput {
            name: "Spring discount".into(),
            group_id: Some(TestGroupId(4)),
            start_date: start.into(),
            end_date: end.into(),
            is_controlled_test: false,
        }
    }

    #[test]
    fn accepts_dates_from_tomorrow() {
        let details = input("2024-03-11", "2024-03-11").validate(today()).unwrap();
        assert_eq!(details.group_id, TestGroupId(4));
        assert_eq!(details.start_date, details.end_date);
    }

    #[test]
    fn end_before_start_reports_the_order_error() {
        let errors = input("2024-03-20", "2024-03-15").validate(today()).unwrap_err();
        assert_eq!(errors.end_date.as_deref(), Some(DATE_ORDER_ERROR));
        assert_eq!(errors.start_date, None);
    }

    #[test]
    fn today_is_too_early() {
        let errors = input("2024-03-10", "2024-03-12").validate(today()).unwrap_err();
        assert!(errors.start_date.is_some());
        assert_eq!(errors.end_date, None);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = TestDetailsInput::default().validate(today()).unwrap_err();
        assert_eq!(errors.name.as_deref(), Some("Test name is required."));
        assert_eq!(errors.group.as_deref(), Some("Select a test group."));
        assert_eq!(errors.start_date.as_deref(), Some("Start date is required."));
        assert_eq!(errors.end_date.as_deref(), Some("End date is required."));
    }

    #[test]
    fn lines_default_to_the_control_price() {
        let product = Product {
            id: ProductId(1),
            sku: "SKU-1".into(),
            asin: "B01".into(),
            name: "Mug".into(),
            price: 12.5,
            status: ProductStatus::Active,
        };
        let line = ItemLine::from(&product);
        assert_eq!(line.test_price, "12.50");
        assert_eq!(line.parsed_price(), Some(12.5));
    }

    #[test]
    fn non_positive_prices_block_submission() {
        let details = input("2024-03-11", "2024-03-20").validate(today()).unwrap();
        let line = |price: &str| ItemLine {
            product_id: ProductId(1),
            asin: "B01".into(),
            name: "Mug".into(),
            control_price: 10.0,
            test_price: price.into(),
        };
        let lines = vec![line("9.5"), line("0"), line("abc")];
        assert_eq!(build_price_test(&details, &lines).unwrap_err(), vec![1, 2]);

        assert_eq!(line("9.5").change_label(), "-5.0%");
        assert_eq!(line("12").change_label(), "+20.0%");
        assert_eq!(line("abc").change_label(), "");

        let dto = build_price_test(&details, &[line("9.5")]).unwrap();
        assert_eq!(dto.items.len(), 1);
        assert_eq!(dto.items[0].test_price, 9.5);
        assert_eq!(dto.items[0].control_price, 10.0);
    }
}
