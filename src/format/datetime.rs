use super::{Context, Lines};
use crate::error::RichExifError;
use crate::markup;
use crate::parse_fn::datetime::{is_unset, DISPLAY_FORMAT};
use crate::tags::{self, TagSpec};

/// Shows one `DateTime` line when all recorded timestamps agree, and every
/// recorded timestamp with its own label when they don't.
pub(super) fn render(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let mut found: Vec<(&TagSpec, String)> = Vec::new();

    for spec in tags::TIMESTAMPS {
        let Some(raw) = ctx.store.string(spec.tag)? else {
            continue;
        };
        if is_unset(&raw) {
            continue;
        }
        let shown = match ctx.store.date(spec.tag) {
            Ok(Some(date)) => date.format(DISPLAY_FORMAT).to_string(),
            Ok(None) => continue,
            // Unparseable but set: show what the camera wrote.
            Err(RichExifError::TagType { .. }) => markup::escape(raw.trim()).into_owned(),
            Err(err) => return Err(err),
        };
        found.push((spec, shown));
    }

    let mut distinct: Vec<&str> = found.iter().map(|(_, shown)| shown.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    match distinct.as_slice() {
        [] => out.push(markup::field_markup("DateTime", "??")),
        [only] => out.push(markup::field_markup("DateTime", only)),
        _ => {
            for (spec, shown) in &found {
                out.push(markup::field_markup(spec.label, shown));
            }
        }
    }
    Ok(())
}
