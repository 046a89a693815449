//! Built-in sample shown before a group is picked or when the backend is
//! not reachable.

use super::view_model::DashboardData;
use chrono::{Duration, NaiveDate};
use contracts::dashboards::d400_price_test_results::{
    AsinSales, DailySales, DashboardMetrics, MetricComparison, PeriodKind, SalesSummary, TestPeriod,
};
use contracts::domain::a001_product::aggregate::ProductId;
use contracts::domain::a002_test_group::aggregate::TestGroupId;
use contracts::domain::a003_price_test::aggregate::{
    PriceTest, PriceTestId, PriceTestItem, PriceTestStatus,
};

const SAMPLE_DAYS: i64 = 14;

/// (asin, name, control price, test price, daily units at control price)
const SAMPLE_PRODUCTS: [(&str, &str, f64, f64, f64); 4] = [
    ("B07SAMPLE1", "Stoneware Coffee Mug", 14.99, 13.49, 22.0),
    ("B07SAMPLE2", "Glass Tea Infuser", 19.99, 17.99, 11.0),
    ("B07SAMPLE3", "Bamboo Coaster Set", 12.49, 11.49, 16.0),
    ("B07SAMPLE4", "Ceramic Pour-Over Dripper", 24.99, 22.49, 7.0),
];

/// Unit cost as a share of the control price
const COST_RATIO: f64 = 0.55;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap_or_default()
}

fn metrics(label: &str, kind: PeriodKind, offset_days: i64, lift: f64) -> DashboardMetrics {
    let start = start_date() + Duration::days(offset_days);
    let days = SAMPLE_DAYS as f64;
    let mut test = (0.0, 0.0, 0.0);
    let mut control = (0.0, 0.0, 0.0);
    for (_, _, control_price, test_price, units) in SAMPLE_PRODUCTS {
        let cost = control_price * COST_RATIO;
        let test_units = units * days * lift;
        let control_units = units * days;
        test.0 += test_units;
        test.1 += test_units * test_price;
        test.2 += test_units * (test_price - cost);
        control.0 += control_units;
        control.1 += control_units * control_price;
        control.2 += control_units * (control_price - cost);
    }
    DashboardMetrics {
        period: TestPeriod {
            label: label.to_string(),
            kind,
            start_date: start,
            end_date: start + Duration::days(SAMPLE_DAYS - 1),
        },
        total_units: MetricComparison::new(test.0, control.0),
        total_sales: MetricComparison::new(test.1, control.1),
        contribution_margin: MetricComparison::new(test.2, control.2),
        average_price: MetricComparison::new(test.1 / test.0, control.1 / control.0),
    }
}

fn daily() -> Vec<DailySales> {
    (0..SAMPLE_DAYS)
        .map(|day| {
            // weekly rhythm, weekends sell more
            let weekday_factor = if day % 7 >= 5 { 1.25 } else { 1.0 };
            let ramp = 1.0 + day as f64 * 0.01;
            let (mut test_units, mut control_units, mut test_sales, mut control_sales) =
                (0.0, 0.0, 0.0, 0.0);
            for (_, _, control_price, test_price, units) in SAMPLE_PRODUCTS {
                let base = units * weekday_factor;
                test_units += base * 1.12 * ramp;
                control_units += base;
                test_sales += base * 1.12 * ramp * test_price;
                control_sales += base * control_price;
            }
            DailySales {
                date: start_date() + Duration::days(day),
                test_units: test_units.round(),
                control_units: control_units.round(),
                test_sales,
                control_sales,
            }
        })
        .collect()
}

fn asins() -> Vec<AsinSales> {
    SAMPLE_PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, &(asin, name, control_price, test_price, units))| {
            let lift = 1.05 + i as f64 * 0.04;
            let days = SAMPLE_DAYS as f64;
            let cost = control_price * COST_RATIO;
            let test_units = (units * days * lift).round();
            let control_units = units * days;
            AsinSales {
                asin: asin.to_string(),
                name: name.to_string(),
                units: MetricComparison::new(test_units, control_units),
                sales: MetricComparison::new(test_units * test_price, control_units * control_price),
                margin: MetricComparison::new(
                    test_units * (test_price - cost),
                    control_units * (control_price - cost),
                ),
            }
        })
        .collect()
}

fn test() -> PriceTest {
    PriceTest {
        id: PriceTestId(0),
        name: "Spring kitchen discount".to_string(),
        group_id: TestGroupId(0),
        group_name: Some("Sample group".to_string()),
        start_date: start_date(),
        end_date: start_date() + Duration::days(SAMPLE_DAYS - 1),
        status: PriceTestStatus::Completed,
        is_controlled_test: false,
        items: SAMPLE_PRODUCTS
            .iter()
            .enumerate()
            .map(|(i, &(asin, name, control_price, test_price, _))| PriceTestItem {
                product_id: ProductId(i as i64 + 1),
                asin: asin.to_string(),
                name: name.to_string(),
                control_price,
                test_price,
            })
            .collect(),
    }
}

pub fn sample_dashboard() -> DashboardData {
    DashboardData {
        test: Some(test()),
        summary: SalesSummary {
            periods: vec![
                metrics("Pre-test", PeriodKind::PreTest, -SAMPLE_DAYS, 1.0),
                metrics("Test", PeriodKind::Test, 0, 1.14),
                metrics("Post-test", PeriodKind::PostTest, SAMPLE_DAYS, 1.03),
            ],
        },
        daily: daily(),
        asins: asins(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_consistent() {
        let data = sample_dashboard();
        let test = data.test.as_ref().unwrap();
        assert_eq!(data.daily.len() as i64, test.duration_days());
        assert_eq!(test.asins().len(), data.asins.len());

        let pre = &data.summary.periods[0];
        assert_eq!(pre.total_units.delta_pct, 0.0);
        let during = &data.summary.periods[1];
        assert!(during.total_units.delta_pct > 0.0);
        assert!(during.average_price.delta_pct < 0.0);
    }
}
