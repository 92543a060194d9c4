use crate::markup;
use std::fmt;
use std::path::Path;

/// The rendered summary of one image, as Pango markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayReport {
    markup: String,
    failed: bool,
}

impl DisplayReport {
    pub(crate) fn from_lines(lines: Vec<String>) -> Self {
        Self {
            markup: lines.join("\n"),
            failed: false,
        }
    }

    /// Report shown when the metadata of `path` could not be loaded.
    pub fn error(path: &Path, cause: impl fmt::Display) -> Self {
        let path = path.to_string_lossy();
        Self {
            markup: format!(
                "<b>{}</b>\n<b>Cannot read metadata:</b> {}",
                markup::escape(&path),
                markup::escape(&cause.to_string())
            ),
            failed: true,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.markup.lines()
    }

    /// The report without markup, e.g. for logging or tooltips.
    pub fn plain_text(&self) -> String {
        markup::to_plain_text(&self.markup)
    }

    pub fn is_error(&self) -> bool {
        self.failed
    }
}

impl fmt::Display for DisplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}
