//! RightScale timestamps (`2013/03/06 19:50:00 +0000`)

use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt;

const FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

/// Parse a timestamp as returned in `created_at`/`updated_at`
pub fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), FORMAT).ok()
}

/// Format a timestamp the way the API accepts it in filters
pub fn format<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format(FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_api_timestamps() {
        let at = parse("2013/03/06 19:50:00 +0000").unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2013, 3, 6));
        assert_eq!((at.hour(), at.minute()), (19, 50));
    }

    #[test]
    fn iso_timestamps_are_not_accepted() {
        assert!(parse("2013-03-06T19:50:00Z").is_none());
    }
}
