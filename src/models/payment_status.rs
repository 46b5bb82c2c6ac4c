use serde::Serialize;
use std::fmt;

/// Payment state of a clamp record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PaymentStatus {
    #[default]
    Processing,
    Paid,
    #[serde(rename = "Not Paid")]
    NotPaid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Processing,
        PaymentStatus::Paid,
        PaymentStatus::NotPaid,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentStatus::Processing => "Processing",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotPaid => "Not Paid",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Processing" => Some(PaymentStatus::Processing),
            "Paid" => Some(PaymentStatus::Paid),
            "Not Paid" => Some(PaymentStatus::NotPaid),
            _ => None,
        }
    }

    /// Lenient parser for form input: case-insensitive, accepts `not_paid` / `notpaid`.
    pub fn from_input(s: &str) -> Option<Self> {
        let norm: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        match norm.as_str() {
            "processing" => Some(PaymentStatus::Processing),
            "paid" => Some(PaymentStatus::Paid),
            "notpaid" => Some(PaymentStatus::NotPaid),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_input_is_case_and_separator_insensitive() {
        assert_eq!(PaymentStatus::from_input("paid"), Some(PaymentStatus::Paid));
        assert_eq!(
            PaymentStatus::from_input(" Not Paid "),
            Some(PaymentStatus::NotPaid)
        );
        assert_eq!(
            PaymentStatus::from_input("not_paid"),
            Some(PaymentStatus::NotPaid)
        );
        assert_eq!(PaymentStatus::from_input("refunded"), None);
    }

    #[test]
    fn db_strings_are_strict() {
        assert_eq!(PaymentStatus::from_db_str("paid"), None);
        for s in PaymentStatus::ALL {
            assert_eq!(PaymentStatus::from_db_str(s.to_db_str()), Some(s));
        }
    }
}
