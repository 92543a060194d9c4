//! Glue between the host's "selection changed" notification and the summary.
//!
//! The listener holds no per-image state: the selected image comes in as an
//! argument and the new report goes out as a [`ReportUpdate`].

use crate::config::Config;
use crate::exiftool::ExifTool;
use crate::error::RichExifError;
use crate::format::SummaryFormatter;
use crate::report::DisplayReport;
use crate::store::MetadataProvider;
use crate::utils::percent_decode;
use std::path::PathBuf;

/// What the host exposes about its current selection.
pub trait ImageSelection {
    /// URI (or plain path) of the first selected image.
    fn selected_image_uri(&self) -> Option<String>;
}

impl ImageSelection for Option<String> {
    fn selected_image_uri(&self) -> Option<String> {
        self.clone()
    }
}

impl ImageSelection for &str {
    fn selected_image_uri(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// A host-owned widget that shows markup.
pub trait DisplaySurface {
    fn set_markup(&mut self, markup: &str);
}

/// Outcome of one selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportUpdate {
    /// Nothing is selected; whatever is displayed stays.
    Unchanged,
    /// Show this report instead of the current one.
    Replace(DisplayReport),
}

impl ReportUpdate {
    pub fn apply_to(self, surface: &mut dyn DisplaySurface) {
        if let ReportUpdate::Replace(report) = self {
            surface.set_markup(report.markup());
        }
    }

    pub fn report(&self) -> Option<&DisplayReport> {
        match self {
            ReportUpdate::Unchanged => None,
            ReportUpdate::Replace(report) => Some(report),
        }
    }
}

/// Converts a selection URI to a local path.
///
/// `file://` URIs lose their scheme and an empty or `localhost` host. Other
/// `scheme://host/path` URIs keep only their path. Query and fragment are
/// dropped from URIs, and `%XX` escapes are decoded. Anything without a
/// scheme is taken as a path as-is.
pub fn resolve_path(uri: &str) -> PathBuf {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return PathBuf::from(uri);
    };
    let is_scheme = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    if !is_scheme {
        return PathBuf::from(uri);
    }

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let path = match rest.find('/') {
        Some(slash) => &rest[slash..],
        None => "",
    };
    bytes_to_path(percent_decode(path))
}

#[cfg(unix)]
fn bytes_to_path(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;
    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reacts to selection changes by loading metadata and formatting it.
pub struct SelectionListener<P> {
    provider: P,
    formatter: SummaryFormatter,
}

impl<P: MetadataProvider> SelectionListener<P> {
    pub fn new(provider: P) -> Self {
        Self::with_formatter(provider, SummaryFormatter::default())
    }

    pub fn with_formatter(provider: P, formatter: SummaryFormatter) -> Self {
        Self {
            provider,
            formatter,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Handles one notification from the host.
    ///
    /// Load failures become an error report rather than an `Err`: the host
    /// has nothing better to do with them than show them.
    pub fn on_selection_changed(&mut self, selection: &dyn ImageSelection) -> ReportUpdate {
        let Some(uri) = selection.selected_image_uri() else {
            log::debug!("No image selected, keeping the current report");
            return ReportUpdate::Unchanged;
        };

        let path = resolve_path(&uri);
        log::debug!("Selection changed to {} ({})", path.display(), uri);

        let report = match self.provider.load(&path) {
            Ok(store) => self.formatter.format(&store, &path),
            Err(err) => {
                log::warn!("Cannot read metadata of {}: {}", path.display(), err);
                DisplayReport::error(&path, &err)
            }
        };
        ReportUpdate::Replace(report)
    }
}

impl SelectionListener<ExifTool> {
    /// A listener reading metadata through the configured `exiftool`.
    pub fn from_config(config: &Config) -> Result<Self, RichExifError> {
        let provider = ExifTool::with_executable(&config.exiftool)?;
        let formatter =
            SummaryFormatter::new().with_gps_seconds_precision(config.gps_seconds_precision);
        Ok(Self::with_formatter(provider, formatter))
    }
}
