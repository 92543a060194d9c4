//! Turns a [`MetadataStore`] into a [`DisplayReport`].
//!
//! The summary is a fixed, ordered table of [`Rule`]s. Every rule decides on
//! its own whether it applies and renders its lines into a private buffer,
//! so a value that fails to convert only costs its own block.

mod datetime;
mod exposure;
mod gps;
mod lens;
mod vendor;

use crate::error::RichExifError;
use crate::markup;
use crate::parse_fn::number;
use crate::report::DisplayReport;
use crate::store::{MetadataStore, TagValue};
use crate::tags;
use std::path::Path;

pub(crate) type Lines = Vec<String>;

/// One block of the summary.
pub(crate) struct Rule {
    pub name: &'static str,
    pub applies: fn(&dyn MetadataStore) -> bool,
    pub render: fn(&Context<'_>, &mut Lines) -> Result<(), RichExifError>,
}

pub(crate) struct Context<'a> {
    pub store: &'a dyn MetadataStore,
    pub path: &'a Path,
    pub gps_seconds_precision: usize,
}

fn always(_: &dyn MetadataStore) -> bool {
    true
}

fn has_model(store: &dyn MetadataStore) -> bool {
    store.contains(tags::MODEL)
}

fn has_flash(store: &dyn MetadataStore) -> bool {
    store.contains(tags::FLASH)
}

fn has_gps(store: &dyn MetadataStore) -> bool {
    store.contains(tags::gps::LATITUDE_REF)
}

fn has_comment(store: &dyn MetadataStore) -> bool {
    store.contains(tags::USER_COMMENT)
}

const RULES: &[Rule] = &[
    Rule {
        name: "header",
        applies: always,
        render: header,
    },
    Rule {
        name: "camera",
        applies: has_model,
        render: camera,
    },
    Rule {
        name: "timestamps",
        applies: always,
        render: datetime::render,
    },
    Rule {
        name: "exposure",
        applies: always,
        render: exposure::render,
    },
    Rule {
        name: "focal length",
        applies: always,
        render: exposure::focal_length,
    },
    Rule {
        name: "flash",
        applies: has_flash,
        render: flash,
    },
    Rule {
        name: "white balance",
        applies: always,
        render: vendor::white_balance,
    },
    Rule {
        name: "focus",
        applies: always,
        render: vendor::focus,
    },
    Rule {
        name: "extras",
        applies: always,
        render: extras,
    },
    Rule {
        name: "lens",
        applies: always,
        render: lens::render,
    },
    Rule {
        name: "gps",
        applies: has_gps,
        render: gps::render,
    },
    Rule {
        name: "thumbnails",
        applies: always,
        render: thumbnails,
    },
    Rule {
        name: "comment",
        applies: has_comment,
        render: comment,
    },
];

/// Renders metadata summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFormatter {
    gps_seconds_precision: usize,
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self {
            gps_seconds_precision: 2,
        }
    }
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decimal places for the seconds component of GPS coordinates, at most 9.
    pub fn with_gps_seconds_precision(mut self, precision: usize) -> Self {
        self.gps_seconds_precision = precision;
        self
    }

    /// Builds the full summary for the image at `path`.
    ///
    /// Never fails: absent tags are skipped, and a block whose values cannot
    /// be interpreted is left out (and logged) while the rest still renders.
    pub fn format(&self, store: &dyn MetadataStore, path: &Path) -> DisplayReport {
        let ctx = Context {
            store,
            path,
            gps_seconds_precision: self.gps_seconds_precision,
        };

        let mut lines = Lines::new();
        for rule in RULES {
            if !(rule.applies)(store) {
                continue;
            }
            let mut block = Lines::new();
            match (rule.render)(&ctx, &mut block) {
                Ok(()) => lines.append(&mut block),
                Err(err) => log::warn!(
                    "Skipping {} block for {}: {}",
                    rule.name,
                    path.display(),
                    err
                ),
            }
        }

        DisplayReport::from_lines(lines)
    }
}

/// Formats with the default [`SummaryFormatter`].
///
/// ```
/// use richexif::{format_report, MemoryStore};
/// use std::path::Path;
///
/// let store = MemoryStore::new().with("Exif.Image.Model", "X100");
/// let report = format_report(&store, Path::new("/photos/DSCF0001.JPG"));
/// assert!(report.markup().contains("<b>Camera:</b> X100"));
/// ```
pub fn format_report(store: &dyn MetadataStore, path: &Path) -> DisplayReport {
    SummaryFormatter::default().format(store, path)
}

/// Renders a numeric tag with `fmt`, falling back to the escaped raw value
/// when it does not read as a number.
pub(crate) fn numeric(
    store: &dyn MetadataStore,
    tag: &str,
    fmt: impl Fn(f64) -> String,
) -> Result<Option<String>, RichExifError> {
    match store.float(tag) {
        Ok(value) => Ok(value.map(fmt)),
        Err(RichExifError::TagType { .. }) => Ok(store
            .string(tag)?
            .map(|raw| markup::escape(&raw).into_owned())),
        Err(err) => Err(err),
    }
}

/// An aperture tag rendered with `fmt` as an f-number.
///
/// Rationals are the APEX value EXIF stores (`N = 2^(Av/2)`); decimals are
/// taken as already converted, which is how ExifTool prints them.
pub(crate) fn aperture(
    store: &dyn MetadataStore,
    tag: &str,
    fmt: impl Fn(f64) -> String,
) -> Result<Option<String>, RichExifError> {
    let apex = match store.value(tag) {
        Some(TagValue::Rational(..)) => true,
        Some(TagValue::String(s)) => number::rational(s).is_some(),
        _ => false,
    };
    if apex {
        numeric(store, tag, |av| fmt(2f64.powf(av / 2.0)))
    } else {
        numeric(store, tag, fmt)
    }
}

/// The string value of a tag, markup-escaped.
pub(crate) fn escaped(
    store: &dyn MetadataStore,
    tag: &str,
) -> Result<Option<String>, RichExifError> {
    Ok(store
        .string(tag)?
        .map(|value| markup::escape(value.trim()).into_owned()))
}

fn header(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let path = ctx.path.to_string_lossy();
    out.push(format!("<b>{}</b>", markup::escape(&path)));
    Ok(())
}

fn camera(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let Some(model) = escaped(ctx.store, tags::MODEL)?.filter(|m| !m.is_empty()) else {
        return Ok(());
    };
    let camera = match escaped(ctx.store, tags::MAKE)? {
        Some(make) if !make.is_empty() => format!("{} {}", make, model),
        _ => model,
    };
    out.push(markup::field_markup("Camera", &camera));
    Ok(())
}

fn flash(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    if let Some(flash) = escaped(ctx.store, tags::FLASH)? {
        out.push(markup::field_markup("Flash", &flash));
    }
    Ok(())
}

fn extras(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    for spec in tags::EXTRAS {
        if let Some(value) = escaped(ctx.store, spec.tag)? {
            out.push(markup::field_markup(spec.label, &value));
        }
    }
    Ok(())
}

fn thumbnails(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    out.push(markup::field_markup(
        "Thumbnails",
        &ctx.store.preview_count().to_string(),
    ));
    Ok(())
}

fn comment(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    match escaped(ctx.store, tags::USER_COMMENT)? {
        Some(comment) if !comment.is_empty() => {
            out.push(markup::field_markup("Comment", &comment));
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn render(store: &MemoryStore) -> String {
        format_report(store, Path::new("/photos/test.jpg")).into_markup()
    }

    #[test]
    fn test_model_only_report() {
        let store = MemoryStore::new().with("Exif.Image.Model", "X100");
        let report = render(&store);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines,
            vec![
                "<b>/photos/test.jpg</b>",
                "<b>Camera:</b> X100",
                "<b>DateTime:</b> ??",
                "<b>Exposure:</b> ?? s, F??, ISO ??",
                "<b>Focal length:</b> ?? mm (35 mm film: ?? mm)",
                "<b>Thumbnails:</b> 0",
            ]
        );
        assert!(!report.contains("Latitude"));
        assert!(!report.contains("Lens"));
        assert!(!report.contains("Flash"));
    }

    #[test]
    fn test_empty_store_still_has_mandatory_blocks() {
        let report = render(&MemoryStore::new());
        assert!(report.starts_with("<b>/photos/test.jpg</b>"));
        assert!(report.contains("<b>DateTime:</b> ??"));
        assert!(!report.contains("Camera"));
    }

    #[test]
    fn test_make_and_model_are_escaped() {
        let store = MemoryStore::new()
            .with("Exif.Image.Make", "Fuji<film>")
            .with("Exif.Image.Model", "X100 & \"S\"");
        let report = render(&store);
        assert!(report.contains("<b>Camera:</b> Fuji&lt;film&gt; X100 &amp; &quot;S&quot;"));
        assert!(!report.contains("<film>"));
    }

    #[test]
    fn test_blank_model_shows_no_camera() {
        let store = MemoryStore::new()
            .with("Exif.Image.Make", "Canon")
            .with("Exif.Image.Model", "   ");
        let report = render(&store);
        assert!(!report.contains("Camera"), "{}", report);
        assert!(report.contains("<b>Thumbnails:</b> 0"));
    }

    #[test]
    fn test_make_without_model_shows_no_camera() {
        let store = MemoryStore::new().with("Exif.Image.Make", "Canon");
        assert!(!render(&store).contains("Camera"));
    }

    #[test]
    fn test_header_path_is_escaped() {
        let report = format_report(&MemoryStore::new(), Path::new("/tmp/<a> & b.jpg"));
        assert!(report.markup().starts_with("<b>/tmp/&lt;a&gt; &amp; b.jpg</b>"));
    }

    #[test]
    fn test_flash_extras_and_comment() {
        let store = MemoryStore::new()
            .with("Exif.Photo.Flash", "Off, Did not fire")
            .with("Exif.Photo.MeteringMode", "Multi-segment")
            .with("Exif.Photo.ExposureProgram", "Aperture-priority AE")
            .with("Exif.Nikon3.ActiveDLighting", "Normal")
            .with("Exif.Photo.UserComment", "  holiday  ");
        let report = render(&store);
        let lines: Vec<&str> = report.lines().collect();

        let program = lines.iter().position(|l| l.contains("Program")).unwrap();
        let metering = lines.iter().position(|l| l.contains("Metering")).unwrap();
        let adl = lines.iter().position(|l| l.contains("Active D-Lighting")).unwrap();
        assert!(program < metering && metering < adl);

        assert!(report.contains("<b>Flash:</b> Off, Did not fire"));
        assert_eq!(lines.last(), Some(&"<b>Comment:</b> holiday"));
    }

    #[test]
    fn test_blank_comment_is_skipped() {
        let store = MemoryStore::new().with("Exif.Photo.UserComment", "   ");
        assert!(!render(&store).contains("Comment"));
    }

    #[test]
    fn test_thumbnail_count() {
        let mut store = MemoryStore::new();
        store.set_preview_count(3);
        assert!(render(&store).contains("<b>Thumbnails:</b> 3"));
    }

    #[test]
    fn test_bad_value_only_drops_its_block() {
        let store = MemoryStore::new()
            .with("Exif.Image.Model", "X100")
            .with("Exif.GPSInfo.GPSLatitudeRef", "N")
            .with("Exif.GPSInfo.GPSLatitude", "somewhere warm")
            .with("Exif.Photo.LensModel", "XF23mm");
        let report = render(&store);
        assert!(report.contains("<b>Camera:</b> X100"));
        assert!(report.contains("<b>Lens model:</b> XF23mm"));
        assert!(report.contains("<b>Thumbnails:</b> 0"));
        assert!(!report.contains("Latitude"));
    }
}
