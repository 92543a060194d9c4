use super::{aperture, escaped, numeric, Context, Lines};
use crate::error::RichExifError;
use crate::markup;
use crate::tags;

pub(super) fn render(ctx: &Context<'_>, out: &mut Lines) -> Result<(), RichExifError> {
    for spec in tags::LENS_PARAMETERS {
        let shown = if spec.tag == tags::MAX_APERTURE {
            aperture(ctx.store, spec.tag, |x| format!("F{}", trimmed(x)))?
        } else {
            numeric(ctx.store, spec.tag, |x| format!("{} m", trimmed(x)))?
        };
        if let Some(shown) = shown {
            out.push(markup::field_markup(spec.label, &shown));
        }
    }

    for spec in tags::LENS_MODELS {
        match escaped(ctx.store, spec.tag)? {
            Some(model) if !model.is_empty() => {
                out.push(markup::field_markup(spec.label, &model));
            }
            _ => {}
        }
    }
    Ok(())
}

/// At most two decimals, without trailing zeros.
fn trimmed(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
