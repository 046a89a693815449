/// Date helpers for forms, tables and chart axes
use chrono::{Duration, Local, NaiveDate};

/// Layout of `<input type="date">` values and of dates sent to the API
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local date of the browser
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today + Duration::days(1)
}

/// "Mar 15, 2024"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// "Mar 01, 2024 – Mar 14, 2024"
pub fn format_date_range(start: &NaiveDate, end: &NaiveDate) -> String {
    format!("{} – {}", format_date(start), format_date(end))
}

/// "03/15", used on chart axes
pub fn format_short(date: &NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// Parses the value of a date input; empty or malformed input gives `None`
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT).ok()
}

pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&date(2024, 3, 15)), "Mar 15, 2024");
        assert_eq!(
            format_date_range(&date(2024, 3, 1), &date(2024, 3, 14)),
            "Mar 01, 2024 – Mar 14, 2024"
        );
        assert_eq!(format_short(&date(2024, 12, 31)), "12/31");
    }

    #[test]
    fn test_tomorrow_crosses_month() {
        assert_eq!(tomorrow(date(2024, 2, 29)), date(2024, 3, 1));
    }

    #[test]
    fn test_input_round_trip() {
        assert_eq!(parse_input_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("15.03.2024"), None);
        assert_eq!(to_input_value(Some(date(2024, 3, 5))), "2024-03-05");
        assert_eq!(to_input_value(None), "");
    }
}
