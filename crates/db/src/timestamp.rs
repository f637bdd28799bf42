//! Timestamp conversion between storage and domain.
//!
//! Columns are `TIMESTAMPTZ`; the domain only sees `DateTime<Utc>`. This is
//! the one place the two meet.

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

/// Stored timestamp as UTC.
#[must_use]
pub fn to_utc(value: DateTimeWithTimeZone) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}

/// Domain timestamp for storage.
#[must_use]
pub fn to_db(value: DateTime<Utc>) -> DateTimeWithTimeZone {
    value.into()
}

/// Current time for storage.
#[must_use]
pub fn now() -> DateTimeWithTimeZone {
    to_db(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_offset_is_normalised() {
        let wib = FixedOffset::east_opt(7 * 3600).unwrap();
        let stored = wib.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap();

        let utc = to_utc(stored);

        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap());
        assert_eq!(to_utc(to_db(utc)), utc);
    }
}
