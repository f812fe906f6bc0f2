//! Temporal resolution of a datastream file.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Temporal resolution of a datastream: one record per year, month, or day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// One record per year.
    Annual,
    /// One record per calendar month.
    Monthly,
    /// One record per calendar day.
    Daily,
}

impl Resolution {
    /// Returns the `chrono` format string of the header date field at this
    /// resolution (`%Y`, `%Y-%m`, or `%Y-%m-%d`).
    pub fn date_format(self) -> &'static str {
        match self {
            Self::Annual => "%Y",
            Self::Monthly => "%Y-%m",
            Self::Daily => "%Y-%m-%d",
        }
    }

    /// Returns the lowercase name (`annual`, `monthly`, `daily`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }

    /// Returns the capitalized name used in output directory paths
    /// (`Annual`, `Monthly`, `Daily`).
    pub fn capitalized(self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Monthly => "Monthly",
            Self::Daily => "Daily",
        }
    }

    /// Number of records a datastream holds for `year` at this resolution.
    ///
    /// Annual streams hold 1 record, monthly streams 12, and daily streams
    /// 365 or 366 depending on whether `year` is a leap year.
    pub fn records_per_year(self, year: i32) -> usize {
        match self {
            Self::Annual => 1,
            Self::Monthly => 12,
            Self::Daily => {
                if is_leap_year(year) {
                    366
                } else {
                    365
                }
            }
        }
    }
}

impl FromStr for Resolution {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            _ => Err(CalendarError::InvalidResolution {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `year` is a leap year under the proleptic Gregorian
/// rule: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_resolutions() {
        assert_eq!("annual".parse::<Resolution>().unwrap(), Resolution::Annual);
        assert_eq!(
            "Monthly".parse::<Resolution>().unwrap(),
            Resolution::Monthly
        );
        assert_eq!("DAILY".parse::<Resolution>().unwrap(), Resolution::Daily);
    }

    #[test]
    fn parse_unknown_resolution() {
        let err = "weekly".parse::<Resolution>().unwrap_err();
        assert!(matches!(err, CalendarError::InvalidResolution { .. }));
    }

    #[test]
    fn date_formats() {
        assert_eq!(Resolution::Annual.date_format(), "%Y");
        assert_eq!(Resolution::Monthly.date_format(), "%Y-%m");
        assert_eq!(Resolution::Daily.date_format(), "%Y-%m-%d");
    }

    #[test]
    fn capitalized_names() {
        assert_eq!(Resolution::Daily.capitalized(), "Daily");
        assert_eq!(Resolution::Monthly.capitalized(), "Monthly");
        assert_eq!(Resolution::Annual.capitalized(), "Annual");
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2001));
        assert!(is_leap_year(2400));
    }

    #[test]
    fn records_per_year_by_resolution() {
        assert_eq!(Resolution::Annual.records_per_year(1999), 1);
        assert_eq!(Resolution::Monthly.records_per_year(1999), 12);
        assert_eq!(Resolution::Daily.records_per_year(1999), 365);
        assert_eq!(Resolution::Daily.records_per_year(2000), 366);
        assert_eq!(Resolution::Daily.records_per_year(1900), 365);
    }
}
