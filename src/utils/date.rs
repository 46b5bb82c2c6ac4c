use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Long human form used on invoices, e.g. `Monday, 01 January 2024`.
pub fn long_date(d: &NaiveDate) -> String {
    d.format("%A, %d %B %Y").to_string()
}
