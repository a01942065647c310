//! Conversions between `YYYY-MM-DD hh:mm:ss` date fields and seconds since the Unix
//! epoch. All dates are interpreted in UTC.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::ReaderError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parses a date field into seconds since the epoch.
///
/// Returns `None` for anything that is not a well-formed date, including
/// non-UTF-8 bytes.
pub fn date_to_epoch_seconds(field: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(field).ok()?;
    let date = PrimitiveDateTime::parse(text.trim(), DATE_FORMAT).ok()?;
    Some(date.assume_utc().unix_timestamp())
}

/// Formats seconds since the epoch as a date field.
pub fn epoch_seconds_to_date(seconds: i64) -> Result<String, ReaderError> {
    let date = OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|_| ReaderError::TimestampOutOfRange { seconds })?;
    Ok(date.format(DATE_FORMAT)?)
}
