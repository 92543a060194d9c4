use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// The value cameras write into a timestamp field they never set.
pub const NO_TIME: &str = "0000:00:00 00:00:00";

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// True for [`NO_TIME`] and the blank placeholders some firmwares write
/// instead (`"    :  :     :  :  "`, empty strings).
pub fn is_unset(s: &str) -> bool {
    let s = s.trim();
    s == NO_TIME || s.chars().all(|c| matches!(c, ' ' | ':' | '0' | '-'))
}

/// Parses the timestamp forms EXIF, ExifTool and XMP produce.
///
/// Offsets and sub-seconds are accepted and dropped: the summary shows the
/// wall-clock time the camera recorded. A bare date parses as midnight.
pub fn timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if is_unset(s) {
        return None;
    }
    parse_any(s).and_then(|t| t.with_nanosecond(0))
}

fn parse_any(s: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y:%m:%d %H:%M:%S%.f%:z", "%Y:%m:%d %H:%M:%S%#z"] {
        if let Ok(zoned) = DateTime::parse_from_str(s, fmt) {
            return Some(zoned.naive_local());
        }
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(s) {
        return Some(zoned.naive_local());
    }
    for fmt in [
        "%Y:%m:%d %H:%M:%S%.f",
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }
    for fmt in ["%Y:%m:%d", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
