//! Per-column filters of the data table.
//!
//! A table holds at most one [`ColumnFilter`] per column id; all active
//! filters must pass for a row to be shown.

use super::column::CellValue;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Range { min: Option<f64>, max: Option<f64> },
    OneOf(BTreeSet<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnFilter {
    pub column_id: String,
    pub value: FilterValue,
    /// Human readable form shown on the filter tag
    pub label: String,
}

impl ColumnFilter {
    /// Substring filter; `None` for a blank query
    pub fn text(column_id: &str, header: &str, query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            column_id: column_id.to_string(),
            value: FilterValue::Text(query.to_lowercase()),
            label: format!("{} contains \"{}\"", header, query),
        })
    }

    /// Range filter from raw input; a bound that is blank or not a number is
    /// left open. `None` when both bounds end up open.
    pub fn range(column_id: &str, header: &str, min_input: &str, max_input: &str) -> Option<Self> {
        let min = parse_bound(min_input);
        let max = parse_bound(max_input);
        let label = match (min, max) {
            (None, None) => return None,
            (Some(min), Some(max)) => {
                format!("{}: {} – {}", header, format_bound(min), format_bound(max))
            }
            (Some(min), None) => format!("{} ≥ {}", header, format_bound(min)),
            (None, Some(max)) => format!("{} ≤ {}", header, format_bound(max)),
        };
        Some(Self {
            column_id: column_id.to_string(),
            value: FilterValue::Range { min, max },
            label,
        })
    }

    /// Membership filter; `None` when no value is chosen
    pub fn one_of(
        column_id: &str,
        header: &str,
        values: impl IntoIterator<Item = String>,
    ) -> Option<Self> {
        let values: BTreeSet<String> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        let label = format!(
            "{}: {}",
            header,
            values.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        Some(Self {
            column_id: column_id.to_string(),
            value: FilterValue::OneOf(values),
            label,
        })
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        match &self.value {
            FilterValue::Text(needle) => cell.contains_lowercase(needle),
            FilterValue::Range { min, max } => match cell.as_number() {
                Some(n) => {
                    n >= min.unwrap_or(f64::NEG_INFINITY) && n <= max.unwrap_or(f64::INFINITY)
                }
                None => false,
            },
            FilterValue::OneOf(values) => values.contains(&cell.display()),
        }
    }
}

/// Parses one bound of a numeric range. Non-numeric input is ignored with a
/// warning rather than reported to the user.
pub fn parse_bound(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            log::warn!("ignoring non-numeric range bound {:?}", input);
            None
        }
    }
}

fn format_bound(value: f64) -> String {
    CellValue::Number(value).display()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_filter_is_case_insensitive() {
        let filter = ColumnFilter::text("name", "Name", " MUG ").unwrap();
        assert_eq!(filter.label, "Name contains \"MUG\"");
        assert!(filter.matches(&CellValue::from("Blue mug")));
        assert!(!filter.matches(&CellValue::from("Kettle")));
        assert!(ColumnFilter::text("name", "Name", "   ").is_none());
    }

    #[test]
    fn range_bounds_are_inclusive_and_optional() {
        let both = ColumnFilter::range("price", "Price", "10", "20").unwrap();
        assert_eq!(both.label, "Price: 10 – 20");
        assert!(both.matches(&CellValue::Number(10.0)));
        assert!(both.matches(&CellValue::Number(20.0)));
        assert!(!both.matches(&CellValue::Number(20.01)));

        let min_only = ColumnFilter::range("price", "Price", "10", "").unwrap();
        assert_eq!(min_only.label, "Price ≥ 10");
        assert!(min_only.matches(&CellValue::Number(1e9)));
        assert!(!min_only.matches(&CellValue::Number(9.99)));

        let max_only = ColumnFilter::range("price", "Price", "", "5.5").unwrap();
        assert!(max_only.matches(&CellValue::Number(-100.0)));
        assert!(!max_only.matches(&CellValue::Empty));
    }

    #[test]
    fn malformed_bound_is_treated_as_open() {
        let filter = ColumnFilter::range("price", "Price", "abc", "20").unwrap();
        assert_eq!(filter.value, FilterValue::Range { min: None, max: Some(20.0) });
        assert!(ColumnFilter::range("price", "Price", "abc", "xyz").is_none());
        assert_eq!(parse_bound("NaN"), None);
        assert_eq!(parse_bound(" 3 "), Some(3.0));
    }

    #[test]
    fn one_of_matches_any_selected_value() {
        let filter =
            ColumnFilter::one_of("status", "Status", vec!["running".into(), "paused".into()])
                .unwrap();
        assert_eq!(filter.label, "Status: paused, running");
        assert!(filter.matches(&CellValue::from("paused")));
        assert!(!filter.matches(&CellValue::from("planned")));
        assert!(ColumnFilter::one_of("status", "Status", Vec::new()).is_none());
    }
}
