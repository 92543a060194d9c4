//! # richexif
//!
//! Turns the metadata of the selected photo into a short markup summary for
//! an image viewer sidebar: camera, timestamps, exposure, focal length, flash,
//! white balance and focus (Nikon, Canon, Sony), lens, GPS position, embedded
//! previews and the user comment.
//!
//! Metadata is read through a [`MetadataProvider`]. [`ExifTool`] is the
//! bundled one: it keeps a long-running ExifTool process in stay-open mode so
//! that clicking through a folder does not spawn a process per image.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use richexif::{Config, RichExifError, SelectionListener};
//!
//! fn main() -> Result<(), RichExifError> {
//!     let config = Config::load(None)?;
//!     let mut listener = SelectionListener::from_config(&config)?;
//!
//!     // Called by the host whenever the selection changes.
//!     let update = listener.on_selection_changed(&"file:///photos/IMG_0001.JPG");
//!     if let Some(report) = update.report() {
//!         println!("{}", report.plain_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The formatter only needs something implementing [`MetadataStore`], so it
//! can be driven without ExifTool:
//!
//! ```
//! use richexif::{format_report, MemoryStore};
//! use std::path::Path;
//!
//! let store = MemoryStore::new()
//!     .with("Exif.Image.Model", "X100")
//!     .with("Exif.Photo.ExposureTime", "1/250")
//!     .with("Exif.Photo.FNumber", 5.6);
//!
//! let report = format_report(&store, Path::new("/photos/a.jpg"));
//! assert!(report.markup().contains("<b>Exposure:</b> 1/250 s, F5.6, ISO ??"));
//! ```

// Public API
mod error;
mod exiftool;

pub use error::RichExifError;
pub use exiftool::ExifTool;

pub mod config;
pub mod format;
pub mod markup;
pub mod parse_fn;
pub mod report;
pub mod selection;
pub mod store;
pub mod tags;

pub use config::Config;
pub use format::{format_report, SummaryFormatter};
pub use report::DisplayReport;
pub use selection::{
    resolve_path, DisplaySurface, ImageSelection, ReportUpdate, SelectionListener,
};
pub use store::{MemoryStore, MetadataProvider, MetadataStore, TagValue};

mod utils;
