use crate::shared::format::{format_currency, format_delta_pct, format_int};
use crate::shared::icons::icon;
use contracts::dashboards::d400_price_test_results::MetricComparison;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Currency,
    Integer,
}

impl ValueFormat {
    pub fn apply(&self, value: f64) -> String {
        match self {
            ValueFormat::Currency => format_currency(value),
            ValueFormat::Integer => format_int(value),
        }
    }
}

/// Class and arrow for a delta; changes within ±0.05% count as flat
pub fn change_style(delta_pct: f64) -> (&'static str, &'static str) {
    if delta_pct >= 0.05 {
        ("\u{2191}", "stat-card__change stat-card__change--up")
    } else if delta_pct <= -0.05 {
        ("\u{2193}", "stat-card__change stat-card__change--down")
    } else {
        ("", "stat-card__change stat-card__change--flat")
    }
}

/// Metric card of the dashboard: test value, its change against control and
/// the control value underneath.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// None while loading
    #[prop(into)]
    value: Signal<Option<MetricComparison>>,
    format: ValueFormat,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(m) => format.apply(m.test),
        None => "—".to_string(),
    };

    let change_view = move || {
        value.get().map(|m| {
            let (arrow, cls) = change_style(m.delta_pct);
            view! { <span class=cls>{format!("{}{}", arrow, format_delta_pct(m.delta_pct))}</span> }
        })
    };

    let subtitle_view = move || {
        value.get().map(|m| {
            view! {
                <div class="stat-card__subtitle">
                    {format!("Control: {}", format.apply(m.control))}
                </div>
            }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {formatted}
                    {change_view}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_style_has_flat_band() {
        assert_eq!(change_style(12.0).0, "\u{2191}");
        assert_eq!(change_style(-3.0).0, "\u{2193}");
        assert_eq!(change_style(0.01).0, "");
    }

    #[test]
    fn value_format_delegates() {
        assert_eq!(ValueFormat::Currency.apply(1234.5), "$1,234.50");
        assert_eq!(ValueFormat::Integer.apply(1234.4), "1,234");
    }
}
