// Time-scoping parameter for a single remote request

use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelector {
    Month(NaiveDate),
    Date(NaiveDate),
}

impl PeriodSelector {
    /// The single query pair sent upstream. Month and date are never combined.
    pub fn query_pair(&self) -> (&'static str, String) {
        match self {
            PeriodSelector::Month(day) => ("month", day.format("%Y-%m").to_string()),
            PeriodSelector::Date(day) => ("date", day.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn label(&self) -> String {
        self.query_pair().1
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.query_pair();
        write!(f, "{}={}", key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_single_query_pair() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).expect("date");
        assert_eq!(
            PeriodSelector::Month(day).query_pair(),
            ("month", "2024-03".to_string())
        );
        assert_eq!(
            PeriodSelector::Date(day).query_pair(),
            ("date", "2024-03-15".to_string())
        );
        assert_eq!(PeriodSelector::Date(day).to_string(), "date=2024-03-15");
    }
}
