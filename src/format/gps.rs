use super::{escaped, numeric, Context, Lines};
use crate::error::RichExifError;
use crate::markup;
use crate::tags::gps;

/// Coordinates as `35 40 12.34 N`.
///
/// A coordinate that is present but not readable as a degree/minute/second
/// triple fails the whole block: a half-right position is worse than none.
pub(super) fn render(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let latitude = coordinate(ctx, gps::LATITUDE, gps::LATITUDE_REF)?;
    let longitude = coordinate(ctx, gps::LONGITUDE, gps::LONGITUDE_REF)?;
    out.push(markup::field_markup("Latitude", &latitude));
    out.push(markup::field_markup("Longitude", &longitude));

    if let Some(altitude) = numeric(ctx.store, gps::ALTITUDE, |x| format!("{:.1} m", x))? {
        let line = match escaped(ctx.store, gps::ALTITUDE_REF)? {
            Some(reference) => format!("{} ({})", altitude, altitude_reference(&reference)),
            None => altitude,
        };
        out.push(markup::field_markup("Altitude", &line));
    }
    Ok(())
}

fn coordinate(ctx: &Context<'_>, tag: &str, ref_tag: &str) -> Result<String, RichExifError> {
    let reference = escaped(ctx.store, ref_tag)?
        .map(|r| hemisphere(&r).to_string())
        .unwrap_or_else(|| "??".to_string());

    let Some(triple) = ctx.store.rational_triple(tag)? else {
        return Ok(format!("?? {}", reference));
    };
    Ok(format!(
        "{} {}",
        dms_text(triple, ctx.gps_seconds_precision),
        reference
    ))
}

/// Most decimals shown for seconds.
const MAX_SECONDS_PRECISION: usize = 9;

/// `35 40 12.34`. Rounding happens once on the whole angle, so a value that
/// rounds up to a full minute or degree carries over instead of showing `60`.
fn dms_text([degrees, minutes, seconds]: [f64; 3], precision: usize) -> String {
    let precision = precision.min(MAX_SECONDS_PRECISION);
    let scale = 10_i64.pow(precision as u32);
    let per_minute = 60 * scale;
    let per_degree = 60 * per_minute;

    let total = degrees.abs() * 3600.0 + minutes.abs() * 60.0 + seconds.abs();
    let units = (total * scale as f64).round() as i64;
    format!(
        "{} {} {:.prec$}",
        units / per_degree,
        units % per_degree / per_minute,
        (units % per_minute) as f64 / scale as f64,
        prec = precision
    )
}

/// `"North"` → `"N"`; single letters and anything unrecognised pass through.
fn hemisphere(reference: &str) -> &str {
    match reference.to_ascii_lowercase().as_str() {
        "north" | "n" => "N",
        "south" | "s" => "S",
        "east" | "e" => "E",
        "west" | "w" => "W",
        _ => reference,
    }
}

fn altitude_reference(reference: &str) -> &str {
    match reference {
        "0" => "Above sea level",
        "1" => "Below sea level",
        _ => reference,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{format_report, SummaryFormatter};
    use super::dms_text;
    use crate::store::{MemoryStore, TagValue};
    use std::path::Path;

    fn gps_lines(report: &str) -> Vec<String> {
        report
            .lines()
            .filter(|line| {
                ["Latitude", "Longitude", "Altitude"]
                    .iter()
                    .any(|needle| line.contains(needle))
            })
            .map(String::from)
            .collect()
    }

    fn tokyo() -> MemoryStore {
        MemoryStore::new()
            .with("Exif.GPSInfo.GPSLatitudeRef", "N")
            .with("Exif.GPSInfo.GPSLatitude", "35/1 40/1 1234/100")
            .with("Exif.GPSInfo.GPSLongitudeRef", "East")
            .with("Exif.GPSInfo.GPSLongitude", TagValue::Triple([139.0, 41.0, 30.1234]))
            .with("Exif.GPSInfo.GPSAltitude", TagValue::Rational(405, 10))
            .with("Exif.GPSInfo.GPSAltitudeRef", "0")
    }

    #[test]
    fn test_full_gps_block() {
        let report = format_report(&tokyo(), Path::new("a.jpg")).into_markup();
        assert_eq!(
            gps_lines(&report),
            vec![
                "<b>Latitude:</b> 35 40 12.34 N",
                "<b>Longitude:</b> 139 41 30.12 E",
                "<b>Altitude:</b> 40.5 m (Above sea level)",
            ]
        );
    }

    #[test]
    fn test_seconds_precision() {
        let formatter = SummaryFormatter::new().with_gps_seconds_precision(0);
        let report = formatter.format(&tokyo(), Path::new("a.jpg")).into_markup();
        assert!(report.contains("<b>Latitude:</b> 35 40 12 N"));
    }

    #[test]
    fn test_rounding_carries_into_minutes_and_degrees() {
        assert_eq!(dms_text([10.0, 59.0, 59.999], 2), "11 0 0.00");
        assert_eq!(dms_text([10.0, 30.0, 59.996], 2), "10 31 0.00");
        assert_eq!(dms_text([10.0, 30.0, 59.4], 0), "10 30 59");
        assert_eq!(dms_text([10.0, 30.0, 59.5], 0), "10 31 0");
        assert_eq!(dms_text([35.0, 40.0, 12.344], 2), "35 40 12.34");
    }

    #[test]
    fn test_decimal_latitude_never_shows_sixty_seconds() {
        let store = MemoryStore::new()
            .with("Exif.GPSInfo.GPSLatitudeRef", "N")
            .with("Exif.GPSInfo.GPSLatitude", TagValue::Float(10.999_999_9));
        let report = format_report(&store, Path::new("a.jpg")).into_markup();
        assert!(report.contains("<b>Latitude:</b> 11 0 0.00 N"), "{}", report);
    }

    #[test]
    fn test_no_latitude_ref_means_no_block() {
        let store = MemoryStore::new()
            .with("Exif.GPSInfo.GPSLatitude", "35/1 40/1 1234/100")
            .with("Exif.GPSInfo.GPSLongitude", "139/1 41/1 3012/100")
            .with("Exif.GPSInfo.GPSAltitude", "40.5 m");
        let report = format_report(&store, Path::new("a.jpg")).into_markup();
        assert!(gps_lines(&report).is_empty());
    }

    #[test]
    fn test_missing_parts_show_placeholders() {
        let store = MemoryStore::new()
            .with("Exif.GPSInfo.GPSLatitudeRef", "S")
            .with("Exif.GPSInfo.GPSLatitude", "33 52 4.5");
        let report = format_report(&store, Path::new("a.jpg")).into_markup();
        assert_eq!(
            gps_lines(&report),
            vec!["<b>Latitude:</b> 33 52 4.50 S", "<b>Longitude:</b> ?? ??"]
        );
    }
}
