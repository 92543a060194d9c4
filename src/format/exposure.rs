use super::{aperture, escaped, numeric, Context, Lines};
use crate::error::RichExifError;
use crate::markup;
use crate::tags;

/// `1/250 s, F8.0, ISO 400 (Hi 0.3)`, with `??` for whatever is missing.
pub(super) fn render(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let store = ctx.store;

    let time = numeric(store, tags::EXPOSURE_TIME, exposure_time)?
        .unwrap_or_else(|| "??".to_string());

    let aperture = match numeric(store, tags::F_NUMBER, f_number)? {
        Some(aperture) => Some(aperture),
        None => aperture(store, tags::APERTURE_VALUE, f_number)?,
    }
    .unwrap_or_else(|| "F??".to_string());

    let mut iso = None;
    for tag in tags::ISO {
        match escaped(store, tag)? {
            Some(value) if !value.is_empty() => {
                iso = Some(value);
                break;
            }
            _ => {}
        }
    }
    let mut iso = format!("ISO {}", iso.as_deref().unwrap_or("??"));
    if let Some(expansion) = escaped(store, tags::ISO_EXPANSION)? {
        if !expansion.is_empty() && !expansion.eq_ignore_ascii_case("off") {
            iso.push_str(&format!(" ({})", expansion));
        }
    }

    out.push(markup::field_markup(
        "Exposure",
        &format!("{} s, {}, {}", time, aperture, iso),
    ));
    Ok(())
}

pub(super) fn focal_length(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    let actual = numeric(ctx.store, tags::FOCAL_LENGTH, millimetres)?
        .unwrap_or_else(|| "??".to_string());
    let film = numeric(ctx.store, tags::FOCAL_LENGTH_35MM, millimetres)?
        .unwrap_or_else(|| "??".to_string());

    out.push(markup::field_markup(
        "Focal length",
        &format!("{} mm (35 mm film: {} mm)", actual, film),
    ));
    Ok(())
}

/// Short exposures as a fraction of a second, long ones as seconds.
fn exposure_time(seconds: f64) -> String {
    if seconds > 0.0 && seconds <= 0.5 {
        format!("1/{:.0}", 1.0 / seconds)
    } else if seconds < 5.0 {
        format!("{:.1}", seconds)
    } else {
        format!("{:.0}", seconds)
    }
}

fn f_number(value: f64) -> String {
    format!("F{:.1}", value)
}

fn millimetres(value: f64) -> String {
    format!("{:.1}", value)
}
