//! Date columns spanning a full calendar year.

use chrono::NaiveDate;

use crate::resolution::Resolution;

/// Generates the ordered dates covering the whole of `year` at `resolution`.
///
/// Daily resolution yields every calendar day (365 or 366 dates), monthly
/// resolution the first day of each month (12 dates), and annual resolution
/// January 1 alone. These are the column labels of a sampling output table.
pub fn period_dates(year: i32, resolution: Resolution) -> Vec<NaiveDate> {
    match resolution {
        Resolution::Annual => vec![ymd(year, 1, 1)],
        Resolution::Monthly => (1..=12).map(|m| ymd(year, m, 1)).collect(),
        Resolution::Daily => {
            let n = resolution.records_per_year(year);
            let mut dates = Vec::with_capacity(n);
            let mut d = ymd(year, 1, 1);
            for _ in 0..n {
                dates.push(d);
                // Safety: succ of any day within a year is representable.
                d = d.succ_opt().expect("date increment within year range");
            }
            dates
        }
    }
}

/// Infallible construction for month starts and January 1.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
