//! Pure state of the price test dashboard: data source, period toggles and
//! chart series.

use crate::shared::charts::{BarGroup, LineSeriesPoint};
use crate::shared::components::stat_card::ValueFormat;
use crate::shared::date_utils::{format_date_range, format_short};
use contracts::dashboards::d400_price_test_results::{
    AsinSales, DailySales, DashboardMetrics, MetricComparison, SalesSummary,
};
use contracts::domain::a002_test_group::aggregate::TestGroupId;
use contracts::domain::a003_price_test::aggregate::PriceTest;
use std::collections::BTreeSet;
use std::fmt::Display;

pub const SAMPLE_SOURCE: &str = "sample";

/// Where the dashboard reads its numbers from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSource {
    #[default]
    Sample,
    Group(TestGroupId),
}

impl DataSource {
    /// Value of the source `<select>` option
    pub fn to_value(&self) -> String {
        match self {
            DataSource::Sample => SAMPLE_SOURCE.to_string(),
            DataSource::Group(id) => id.to_string(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value == SAMPLE_SOURCE {
            return Some(DataSource::Sample);
        }
        value.parse::<i64>().ok().map(|id| DataSource::Group(TestGroupId(id)))
    }
}

/// Everything the dashboard shows for one test
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    /// Most recent test of the group; `None` when the group has no tests
    pub test: Option<PriceTest>,
    pub summary: SalesSummary,
    pub daily: Vec<DailySales>,
    pub asins: Vec<AsinSales>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Units,
    Sales,
    Margin,
    AveragePrice,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Units,
        Metric::Sales,
        Metric::Margin,
        Metric::AveragePrice,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Units => "Units",
            Metric::Sales => "Sales",
            Metric::Margin => "Contribution margin",
            Metric::AveragePrice => "Average price",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Metric::Units => "products",
            Metric::Sales => "dollar",
            Metric::Margin => "percent",
            Metric::AveragePrice => "trending-up",
        }
    }

    pub fn format(&self) -> ValueFormat {
        match self {
            Metric::Units => ValueFormat::Integer,
            _ => ValueFormat::Currency,
        }
    }

    pub fn of(&self, metrics: &DashboardMetrics) -> MetricComparison {
        match self {
            Metric::Units => metrics.total_units,
            Metric::Sales => metrics.total_sales,
            Metric::Margin => metrics.contribution_margin,
            Metric::AveragePrice => metrics.average_price,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Units => "units",
            Metric::Sales => "sales",
            Metric::Margin => "margin",
            Metric::AveragePrice => "average_price",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }
}

/// Periods switched off by the user, keyed by period label. Every period
/// of a freshly loaded summary starts enabled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeriodToggles {
    hidden: BTreeSet<String>,
}

impl PeriodToggles {
    pub fn is_enabled(&self, label: &str) -> bool {
        !self.hidden.contains(label)
    }

    pub fn toggle(&mut self, label: &str) {
        if !self.hidden.remove(label) {
            self.hidden.insert(label.to_string());
        }
    }

    pub fn visible(&self, summary: &SalesSummary) -> Vec<DashboardMetrics> {
        summary
            .periods
            .iter()
            .filter(|m| self.is_enabled(&m.period.label))
            .cloned()
            .collect()
    }
}

/// What the page currently shows, plus the error of the last failed load
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub data: DashboardData,
    pub toggles: PeriodToggles,
    pub error: Option<String>,
}

impl DashboardState {
    pub fn new(data: DashboardData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Applies a finished load. A failure only records its message; the
    /// numbers already on screen stay.
    pub fn settle<E: Display>(&mut self, result: Result<DashboardData, E>) {
        match result {
            Ok(data) => {
                self.data = data;
                self.toggles = PeriodToggles::default();
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Subtitle under the page title; empty while an error explains why
    /// nothing is loaded
    pub fn caption(&self) -> String {
        match (&self.data.test, &self.error) {
            (Some(test), _) => format!(
                "{} · {} · {}",
                test.name,
                format_date_range(&test.start_date, &test.end_date),
                test.status.label()
            ),
            (None, Some(_)) => String::new(),
            (None, None) => "No price tests for this group yet.".to_string(),
        }
    }

    pub fn visible_periods(&self) -> Vec<DashboardMetrics> {
        self.toggles.visible(&self.data.summary)
    }
}

/// One bar group per visible period for the chosen metric
pub fn bar_groups(periods: &[DashboardMetrics], metric: Metric) -> Vec<BarGroup> {
    periods
        .iter()
        .map(|m| {
            let value = metric.of(m);
            BarGroup {
                label: m.period.label.clone(),
                test: value.test,
                control: value.control,
            }
        })
        .collect()
}

/// Daily test vs control sales, oldest first
pub fn daily_points(daily: &[DailySales]) -> Vec<LineSeriesPoint> {
    let mut rows: Vec<&DailySales> = daily.iter().collect();
    rows.sort_by_key(|d| d.date);
    rows.into_iter()
        .map(|d| LineSeriesPoint {
            label: format_short(&d.date),
            test: d.test_sales,
            control: d.control_sales,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::dashboards::d400_price_test_dashboard::sample::sample_dashboard;
    use crate::shared::api_client::ApiError;
    use contracts::dashboards::d400_price_test_results::{PeriodKind, TestPeriod};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn period(label: &str, units: (f64, f64)) -> DashboardMetrics {
        DashboardMetrics {
            period: TestPeriod {
                label: label.to_string(),
                kind: PeriodKind::Test,
                start_date: date(1, 1),
                end_date: date(1, 7),
            },
            total_units: MetricComparison::new(units.0, units.1),
            total_sales: MetricComparison::new(units.0 * 10.0, units.1 * 10.0),
            contribution_margin: MetricComparison::default(),
            average_price: MetricComparison::new(10.0, 10.0),
        }
    }

    #[test]
    fn source_round_trips_through_the_select_value() {
        assert_eq!(DataSource::parse("sample"), Some(DataSource::Sample));
        assert_eq!(
            DataSource::parse(&DataSource::Group(TestGroupId(5)).to_value()),
            Some(DataSource::Group(TestGroupId(5)))
        );
        assert_eq!(DataSource::parse("nope"), None);
    }

    #[test]
    fn hidden_periods_drop_out_of_cards_and_bars() {
        let summary = SalesSummary {
            periods: vec![period("Week 1", (10.0, 8.0)), period("Week 2", (12.0, 9.0))],
        };
        let mut toggles = PeriodToggles::default();
        assert_eq!(toggles.visible(&summary).len(), 2);

        toggles.toggle("Week 1");
        let visible = toggles.visible(&summary);
        let groups = bar_groups(&visible, Metric::Units);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Week 2");
        assert_eq!((groups[0].test, groups[0].control), (12.0, 9.0));

        toggles.toggle("Week 1");
        assert!(toggles.is_enabled("Week 1"));
    }

    #[test]
    fn daily_points_are_in_date_order() {
        let row = |d: u32, sales: f64| DailySales {
            date: date(3, d),
            test_units: 0.0,
            control_units: 0.0,
            test_sales: sales,
            control_sales: sales / 2.0,
        };
        let points = daily_points(&[row(3, 30.0), row(1, 10.0)]);
        assert_eq!(points[0].label, "03/01");
        assert_eq!(points[1].test, 30.0);
        assert_eq!(points[1].control, 15.0);
    }

    #[test]
    fn failed_load_keeps_what_is_shown() {
        let shown = sample_dashboard();
        let mut state = DashboardState::new(shown.clone());
        state.toggles.toggle("Pre-test");

        state.settle(Err::<DashboardData, _>(ApiError::Unauthorized));

        assert_eq!(state.data, shown);
        assert!(!state.toggles.is_enabled("Pre-test"));
        assert!(state.error.as_deref().is_some_and(|e| e.starts_with("Authentication failed")));
        assert!(!state.caption().contains("No price tests"));
        assert!(!state.visible_periods().is_empty());
    }

    #[test]
    fn successful_load_replaces_data_and_clears_error() {
        let mut state = DashboardState::new(sample_dashboard());
        state.toggles.toggle("Pre-test");
        state.settle(Err::<DashboardData, _>(ApiError::NotFound));

        state.settle(Ok::<_, ApiError>(DashboardData::default()));

        assert_eq!(state.data, DashboardData::default());
        assert_eq!(state.error, None);
        assert!(state.toggles.is_enabled("Pre-test"));
        assert_eq!(state.caption(), "No price tests for this group yet.");
    }

    #[test]
    fn no_tests_caption_is_suppressed_while_an_error_shows() {
        let mut state = DashboardState::default();
        state.settle(Err::<DashboardData, _>(ApiError::Forbidden));
        assert_eq!(state.caption(), "");
    }

    #[test]
    fn metric_keys_are_unique() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_key(metric.key()), Some(metric));
        }
    }
}
