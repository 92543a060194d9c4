//! Makernote-specific blocks.
//!
//! White balance shows the first dialect that matches. Focus shows every
//! dialect that is present: a converted or re-tagged file can carry more
//! than one.

use super::{escaped, Context, Lines, Rule};
use crate::error::RichExifError;
use crate::markup;
use crate::store::MetadataStore;
use crate::tags::{focus as af, white_balance as wb};

const WHITE_BALANCE: &[Rule] = &[
    Rule {
        name: "nikon white balance",
        applies: nikon_wb_applies,
        render: nikon_white_balance,
    },
    Rule {
        name: "canon white balance",
        applies: canon_wb_applies,
        render: canon_white_balance,
    },
    Rule {
        name: "white balance",
        applies: standard_wb_applies,
        render: standard_white_balance,
    },
];

const FOCUS: &[Rule] = &[
    Rule {
        name: "nikon focus",
        applies: nikon_focus_applies,
        render: nikon_focus,
    },
    Rule {
        name: "sony focus",
        applies: sony_focus_applies,
        render: sony_focus,
    },
    Rule {
        name: "canon focus",
        applies: canon_focus_applies,
        render: canon_focus,
    },
];

pub(super) fn white_balance(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    match WHITE_BALANCE.iter().find(|rule| (rule.applies)(ctx.store)) {
        Some(rule) => (rule.render)(ctx, out),
        None => Ok(()),
    }
}

pub(super) fn focus(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    for rule in FOCUS.iter().filter(|rule| (rule.applies)(ctx.store)) {
        (rule.render)(ctx, out)?;
    }
    Ok(())
}

fn nikon_wb_applies(store: &dyn MetadataStore) -> bool {
    store.contains(wb::NIKON_BIAS)
}

fn canon_wb_applies(store: &dyn MetadataStore) -> bool {
    store.contains(wb::CANON_RED) || store.contains(wb::CANON_BLUE)
}

fn standard_wb_applies(store: &dyn MetadataStore) -> bool {
    store.contains(wb::STANDARD)
}

fn nikon_white_balance(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let bias = escaped(ctx.store, wb::NIKON_BIAS)?.unwrap_or_default();
    let text = match escaped(ctx.store, wb::NIKON_MODE)? {
        Some(mode) => format!("{}, bias {}", mode, bias),
        None => format!("bias {}", bias),
    };
    out.push(markup::field_markup("White balance", &text));
    Ok(())
}

fn canon_white_balance(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let store = ctx.store;
    let mut text = escaped(store, wb::CANON_MODE)?.unwrap_or_else(|| "??".to_string());

    if text.eq_ignore_ascii_case("manual") {
        if let Some(kelvin) = escaped(store, wb::CANON_TEMPERATURE)? {
            text.push_str(&format!(" {} K", kelvin));
        }
    }

    let bias: Vec<String> = [("R", wb::CANON_RED), ("B", wb::CANON_BLUE)]
        .into_iter()
        .filter_map(|(label, tag)| match escaped(store, tag) {
            Ok(Some(value)) => Some(Ok(format!("{} {}", label, value))),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        })
        .collect::<Result<_, _>>()?;
    text.push_str(&format!(" ({})", bias.join(", ")));

    out.push(markup::field_markup("White balance", &text));
    Ok(())
}

fn standard_white_balance(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    if let Some(mode) = escaped(ctx.store, wb::STANDARD)? {
        out.push(markup::field_markup("White balance", &mode));
    }
    Ok(())
}

fn nikon_focus_applies(store: &dyn MetadataStore) -> bool {
    store.contains(af::NIKON_MODE) || store.contains(af::NIKON_AREA)
}

fn sony_focus_applies(store: &dyn MetadataStore) -> bool {
    store.contains(af::SONY_MODE) || store.contains(af::SONY_AREA)
}

fn canon_focus_applies(store: &dyn MetadataStore) -> bool {
    store.contains(af::CANON_MODE) || store.contains(af::CANON_POINT)
}

fn nikon_focus(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    focus_line(ctx, out, "Focus (Nikon)", af::NIKON_MODE, af::NIKON_AREA)
}

fn sony_focus(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    focus_line(ctx, out, "Focus (Sony)", af::SONY_MODE, af::SONY_AREA)
}

fn canon_focus(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    focus_line(ctx, out, "Focus (Canon)", af::CANON_MODE, af::CANON_POINT)
}

fn focus_line(
    ctx: &Context<'_>,
    out: &mut Lines,
    label: &str,
    mode_tag: &str,
    area_tag: &str,
) -> Result<(), RichExifError> {
    let parts: Vec<String> = [escaped(ctx.store, mode_tag)?, escaped(ctx.store, area_tag)?]
        .into_iter()
        .flatten()
        .collect();
    out.push(markup::field_markup(label, &parts.join(", ")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::format_report;
    use crate::store::MemoryStore;
    use std::path::Path;

    fn lines_with(store: &MemoryStore, needle: &str) -> Vec<String> {
        format_report(store, Path::new("a.jpg"))
            .lines()
            .filter(|line| line.contains(needle))
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_white_balance_tags_emit_nothing() {
        assert!(lines_with(&MemoryStore::new(), "White balance").is_empty());
    }

    #[test]
    fn test_nikon_white_balance_wins() {
        let store = MemoryStore::new()
            .with("Exif.Nikon3.WhiteBalance", "AUTO")
            .with("Exif.Nikon3.WhiteBalanceBias", "0 0")
            .with("Exif.CanonPr.WhiteBalanceRed", "12")
            .with("Exif.Photo.WhiteBalance", "Auto");
        assert_eq!(
            lines_with(&store, "White balance"),
            vec!["<b>White balance:</b> AUTO, bias 0 0"]
        );
    }

    #[test]
    fn test_canon_manual_uses_colour_temperature() {
        let store = MemoryStore::new()
            .with("Exif.CanonSi.WhiteBalance", "Manual")
            .with("Exif.CanonPr.ColorTemperature", "5200")
            .with("Exif.CanonPr.WhiteBalanceRed", "-3")
            .with("Exif.CanonPr.WhiteBalanceBlue", "4")
            .with("Exif.Photo.WhiteBalance", "Manual");
        assert_eq!(
            lines_with(&store, "White balance"),
            vec!["<b>White balance:</b> Manual 5200 K (R -3, B 4)"]
        );
    }

    #[test]
    fn test_canon_auto_ignores_colour_temperature() {
        let store = MemoryStore::new()
            .with("Exif.CanonSi.WhiteBalance", "Auto")
            .with("Exif.CanonPr.ColorTemperature", "5200")
            .with("Exif.CanonPr.WhiteBalanceBlue", "0");
        assert_eq!(
            lines_with(&store, "White balance"),
            vec!["<b>White balance:</b> Auto (B 0)"]
        );
    }

    #[test]
    fn test_standard_white_balance() {
        let store = MemoryStore::new().with("Exif.Photo.WhiteBalance", "Auto");
        assert_eq!(
            lines_with(&store, "White balance"),
            vec!["<b>White balance:</b> Auto"]
        );
    }

    #[test]
    fn test_focus_sections_are_independent() {
        let store = MemoryStore::new()
            .with("Exif.Nikon3.Focus", "AF-C")
            .with("Exif.NikonAf2.AFAreaMode", "Dynamic Area")
            .with("Exif.CanonCs.FocusMode", "One-shot AF");
        assert_eq!(
            lines_with(&store, "Focus ("),
            vec![
                "<b>Focus (Nikon):</b> AF-C, Dynamic Area",
                "<b>Focus (Canon):</b> One-shot AF",
            ]
        );
    }

    #[test]
    fn test_sony_focus_area_only() {
        let store = MemoryStore::new().with("Exif.Sony2.AFAreaMode", "Wide");
        assert_eq!(
            lines_with(&store, "Focus ("),
            vec!["<b>Focus (Sony):</b> Wide"]
        );
    }
}
