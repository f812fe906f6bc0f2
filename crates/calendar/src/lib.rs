//! # dsample-calendar
//!
//! Pure date arithmetic for datastream sampling: temporal resolutions,
//! leap-year-aware record counts, and the date columns spanning a full
//! calendar year at a given resolution.

mod error;
mod period;
mod resolution;

pub use error::CalendarError;
pub use period::period_dates;
pub use resolution::{Resolution, is_leap_year};
