//! Typed access to the tag values of one image.
//!
//! The formatter only ever talks to [`MetadataStore`]; where the values come
//! from (an ExifTool process, a host application's own EXIF reader, a test
//! fixture) is hidden behind [`MetadataProvider`].

use crate::error::RichExifError;
use crate::parse_fn::{datetime, number};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// One metadata value as a provider hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Rational(i64, i64),
    Triple([f64; 3]),
    Float(f64),
    String(String),
    #[serde(skip_deserializing)]
    Date(NaiveDateTime),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::String(s) => f.write_str(s),
            TagValue::Float(x) => write!(f, "{}", x),
            TagValue::Rational(num, 1) => write!(f, "{}", num),
            TagValue::Rational(num, den) => write!(f, "{}/{}", num, den),
            TagValue::Triple([a, b, c]) => write!(f, "{} {} {}", a, b, c),
            TagValue::Date(date) => write!(f, "{}", date.format(datetime::EXIF_FORMAT)),
        }
    }
}

impl TagValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TagValue::Float(x) => Some(*x),
            TagValue::Rational(_, 0) => None,
            TagValue::Rational(num, den) => Some(*num as f64 / *den as f64),
            TagValue::String(s) => number::float(s),
            TagValue::Triple(_) | TagValue::Date(_) => None,
        }
    }

    pub fn as_triple(&self) -> Option<[f64; 3]> {
        match self {
            TagValue::Triple(triple) => Some(*triple),
            TagValue::String(s) => number::triple(s),
            TagValue::Float(_) | TagValue::Rational(..) => self.as_float().map(number::dms),
            TagValue::Date(_) => None,
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::String(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::String(s)
    }
}

impl From<f64> for TagValue {
    fn from(x: f64) -> Self {
        TagValue::Float(x)
    }
}

impl From<NaiveDateTime> for TagValue {
    fn from(date: NaiveDateTime) -> Self {
        TagValue::Date(date)
    }
}

/// Read-only view of one image's metadata.
///
/// Absent tags read as `Ok(None)`. A tag that is present but cannot be
/// converted to the requested type is an error, so the caller can tell
/// "not recorded" apart from "recorded as something unexpected".
///
/// Values are expected either raw, as EXIF stores them (rationals such as
/// `497/100`), or in ExifTool's printed form (`5.6`, `"35.0 mm"`). For
/// `ApertureValue` and `MaxApertureValue` the two differ: a rational is read
/// as APEX, a decimal as an f-number.
pub trait MetadataStore {
    /// The raw value of a tag, if present.
    fn value(&self, tag: &str) -> Option<&TagValue>;

    /// Number of embedded preview images.
    fn preview_count(&self) -> usize;

    fn contains(&self, tag: &str) -> bool {
        self.value(tag).is_some()
    }

    fn string(&self, tag: &str) -> Result<Option<String>, RichExifError> {
        Ok(self.value(tag).map(ToString::to_string))
    }

    fn float(&self, tag: &str) -> Result<Option<f64>, RichExifError> {
        self.value(tag)
            .map(|value| value.as_float().ok_or_else(|| type_error(tag, "a number")))
            .transpose()
    }

    /// Degree/minute/second style values (GPS coordinates).
    fn rational_triple(&self, tag: &str) -> Result<Option<[f64; 3]>, RichExifError> {
        self.value(tag)
            .map(|value| value.as_triple().ok_or_else(|| type_error(tag, "a triple")))
            .transpose()
    }

    /// Timestamps. A field holding the "no time" placeholder reads as `None`.
    fn date(&self, tag: &str) -> Result<Option<NaiveDateTime>, RichExifError> {
        match self.value(tag) {
            None => Ok(None),
            Some(TagValue::Date(date)) => Ok(Some(*date)),
            Some(TagValue::String(s)) if datetime::is_unset(s) => Ok(None),
            Some(TagValue::String(s)) => datetime::timestamp(s)
                .map(Some)
                .ok_or_else(|| type_error(tag, "a timestamp")),
            Some(_) => Err(type_error(tag, "a timestamp")),
        }
    }
}

fn type_error(tag: &str, expected: &'static str) -> RichExifError {
    RichExifError::TagType {
        tag: tag.to_string(),
        expected,
    }
}

/// Loads the metadata of a file.
pub trait MetadataProvider {
    type Store: MetadataStore;

    fn load(&mut self, path: &Path) -> Result<Self::Store, RichExifError>;
}

/// A [`MetadataStore`] held in memory.
///
/// Used by the ExifTool provider and handy for hosts that already have the
/// values at hand. Deserializes from a JSON object of tag names to values:
///
/// ```
/// use richexif::{MemoryStore, MetadataStore};
///
/// let store: MemoryStore = serde_json::from_str(
///     r#"{"tags": {"Exif.Image.Model": "X100", "Exif.Photo.FNumber": [28, 10]}}"#,
/// ).unwrap();
/// assert_eq!(store.float("Exif.Photo.FNumber").unwrap(), Some(2.8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    tags: BTreeMap<String, TagValue>,
    #[serde(default)]
    previews: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>, value: impl Into<TagValue>) {
        self.tags.insert(tag.into(), value.into());
    }

    /// Builder-style [`MemoryStore::insert`].
    pub fn with(mut self, tag: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.insert(tag, value);
        self
    }

    pub fn set_preview_count(&mut self, previews: usize) {
        self.previews = previews;
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.tags.iter().map(|(tag, value)| (tag.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<TagValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for (tag, value) in iter {
            store.insert(tag, value);
        }
        store
    }
}

impl MetadataStore for MemoryStore {
    fn value(&self, tag: &str) -> Option<&TagValue> {
        self.tags.get(tag)
    }

    fn preview_count(&self) -> usize {
        self.previews
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_missing_tags_read_as_none() -> Result<(), RichExifError> {
        let store = MemoryStore::new();
        assert!(!store.contains("Exif.Image.Model"));
        assert_eq!(store.string("Exif.Image.Model")?, None);
        assert_eq!(store.float("Exif.Photo.FNumber")?, None);
        assert_eq!(store.rational_triple("Exif.GPSInfo.GPSLatitude")?, None);
        assert_eq!(store.date("Exif.Image.DateTime")?, None);
        Ok(())
    }

    #[test]
    fn test_typed_conversions() -> Result<(), RichExifError> {
        let store = MemoryStore::new()
            .with("Exif.Photo.ExposureTime", TagValue::Rational(1, 250))
            .with("Exif.Photo.FocalLength", "35.0 mm")
            .with("Exif.GPSInfo.GPSLatitude", "35/1 40/1 1234/100")
            .with("Exif.Image.DateTime", "2019:07:14 18:03:11");

        assert_eq!(store.float("Exif.Photo.ExposureTime")?, Some(0.004));
        assert_eq!(store.string("Exif.Photo.ExposureTime")?.as_deref(), Some("1/250"));
        assert_eq!(store.float("Exif.Photo.FocalLength")?, Some(35.0));
        assert_eq!(
            store.rational_triple("Exif.GPSInfo.GPSLatitude")?,
            Some([35.0, 40.0, 12.34])
        );
        assert_eq!(
            store.date("Exif.Image.DateTime")?,
            NaiveDate::from_ymd_opt(2019, 7, 14).and_then(|d| d.and_hms_opt(18, 3, 11))
        );
        Ok(())
    }

    #[test]
    fn test_conversion_failure_is_an_error() {
        let store = MemoryStore::new()
            .with("Exif.Photo.FNumber", "wide open")
            .with("Exif.Image.DateTime", "last tuesday");

        assert_matches!(
            store.float("Exif.Photo.FNumber"),
            Err(RichExifError::TagType { tag, .. }) if tag == "Exif.Photo.FNumber"
        );
        assert_matches!(
            store.date("Exif.Image.DateTime"),
            Err(RichExifError::TagType { expected: "a timestamp", .. })
        );
    }

    #[test]
    fn test_no_time_sentinel_reads_as_none() -> Result<(), RichExifError> {
        let store = MemoryStore::new().with("Exif.Image.DateTime", datetime::NO_TIME);
        assert!(store.contains("Exif.Image.DateTime"));
        assert_eq!(store.date("Exif.Image.DateTime")?, None);
        Ok(())
    }

    #[test]
    fn test_deserialize_from_json() -> Result<(), RichExifError> {
        let value = json!({
            "tags": {
                "Exif.Image.Model": "X100",
                "Exif.Photo.FNumber": [28, 10],
                "Exif.Photo.ISOSpeedRatings": 200,
                "Exif.GPSInfo.GPSLongitude": [139.0, 41.0, 30.12]
            },
            "previews": 2
        });
        let store: MemoryStore = serde_path_to_error::deserialize(value)?;

        assert_eq!(store.len(), 4);
        assert_eq!(store.preview_count(), 2);
        assert_eq!(
            store.value("Exif.Photo.FNumber"),
            Some(&TagValue::Rational(28, 10))
        );
        assert_eq!(store.float("Exif.Photo.ISOSpeedRatings")?, Some(200.0));
        assert_eq!(
            store.rational_triple("Exif.GPSInfo.GPSLongitude")?,
            Some([139.0, 41.0, 30.12])
        );
        Ok(())
    }
}
