use crate::domain::common::serde_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Test value, control value and their relative difference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricComparison {
    pub test: f64,
    pub control: f64,
    /// `(test - control) / control * 100`
    pub delta_pct: f64,
}

impl MetricComparison {
    pub fn new(test: f64, control: f64) -> Self {
        Self {
            test,
            control,
            delta_pct: delta_pct(test, control),
        }
    }
}

/// Percentage change of `test` against `control`; 0 when there is no baseline
pub fn delta_pct(test: f64, control: f64) -> f64 {
    if control == 0.0 {
        0.0
    } else {
        (test - control) / control * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    PreTest,
    Test,
    Control,
    PostTest,
}

impl PeriodKind {
    pub fn label(&self) -> &'static str {
        match self {
            PeriodKind::PreTest => "Pre-test",
            PeriodKind::Test => "Test",
            PeriodKind::Control => "Control",
            PeriodKind::PostTest => "Post-test",
        }
    }
}

/// Date range whose sales are compared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPeriod {
    pub label: String,
    pub kind: PeriodKind,
    #[serde(with = "serde_date")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_date")]
    pub end_date: NaiveDate,
}

/// Aggregates of one comparison period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub period: TestPeriod,
    pub total_units: MetricComparison,
    pub total_sales: MetricComparison,
    pub contribution_margin: MetricComparison,
    pub average_price: MetricComparison,
}

/// Response of `GET /price-test/{id}/sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SalesSummary {
    #[serde(default)]
    pub periods: Vec<DashboardMetrics>,
}

/// Row of `GET /price-test/{id}/sales/date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    #[serde(with = "serde_date")]
    pub date: NaiveDate,
    pub test_units: f64,
    pub control_units: f64,
    pub test_sales: f64,
    pub control_sales: f64,
}

/// Row of `GET /price-test/{id}/sales/asin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsinSales {
    pub asin: String,
    #[serde(default)]
    pub name: String,
    pub units: MetricComparison,
    pub sales: MetricComparison,
    pub margin: MetricComparison,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_computes_delta() {
        let m = MetricComparison::new(120.0, 100.0);
        assert!((m.delta_pct - 20.0).abs() < 1e-9);

        let flat = MetricComparison::new(5.0, 0.0);
        assert_eq!(flat.delta_pct, 0.0);
    }

    #[test]
    fn summary_reads_period_list() {
        let json = r#"{"periods":[{
            "period":{"label":"Week 1","kind":"test","start_date":"2024-01-01","end_date":"2024-01-07"},
            "total_units":{"test":10,"control":8,"delta_pct":25},
            "total_sales":{"test":100,"control":80,"delta_pct":25},
            "contribution_margin":{"test":30,"control":20,"delta_pct":50},
            "average_price":{"test":10,"control":10,"delta_pct":0}
        }]}"#;
        let summary: SalesSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.periods.len(), 1);
        assert_eq!(summary.periods[0].period.kind, PeriodKind::Test);
        assert_eq!(summary.periods[0].contribution_margin.delta_pct, 50.0);
    }
}
