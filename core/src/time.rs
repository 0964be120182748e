//! Time related utils.

use crate::{Error, Result};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Build a datetime from unix seconds.
pub fn from_unix_timestamp(secs: i64) -> Result<DateTime> {
    chrono::DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::unexpected(format!("unix timestamp {secs} is out of range")))
}
