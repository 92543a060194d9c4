use std::str::FromStr;

/// Parses `"n/d"` into its numerator and denominator.
pub fn rational(s: &str) -> Option<(f64, f64)> {
    let (num, den) = s.trim().split_once('/')?;
    let num = f64::from_str(num.trim()).ok()?;
    let den = f64::from_str(den.trim()).ok()?;
    Some((num, den))
}

/// Reads a single number out of a decorated value.
///
/// Accepts plain floats, rationals and values with a trailing unit
/// (`"35.0 mm"`, `"4.47 m"`). A zero denominator or `"undef"` gives `None`.
pub fn float(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "undef" {
        return None;
    }
    if let Ok(value) = f64::from_str(s) {
        return Some(value);
    }

    let first = s.split_whitespace().next().unwrap_or("");
    if let Some((num, den)) = rational(first) {
        return if den == 0.0 { None } else { Some(num / den) };
    }
    if let Ok(value) = f64::from_str(first) {
        return Some(value);
    }

    // "f/2.8" style
    first
        .rsplit_once('/')
        .and_then(|(_, tail)| f64::from_str(tail).ok())
}

/// Reads a degree/minute/second style triple.
///
/// Understands space separated numbers or rationals (`"35/1 40/1 1234/100"`),
/// ExifTool's printed form (`35 deg 40' 12.34" N`) and a single decimal
/// value, which is split into degrees, minutes and seconds.
pub fn triple(s: &str) -> Option<[f64; 3]> {
    let cleaned: String = s
        .chars()
        .map(|c| match c {
            '\'' | '"' | ',' | '°' | '′' | '″' => ' ',
            c => c,
        })
        .collect();

    let parts = cleaned
        .split_whitespace()
        .filter(|part| *part != "deg")
        .filter(|part| !matches!(*part, "N" | "S" | "E" | "W"))
        .map(component)
        .collect::<Option<Vec<f64>>>()?;

    match parts.as_slice() {
        [d, m, s] => Some([*d, *m, *s]),
        [decimal] => Some(dms(*decimal)),
        _ => None,
    }
}

fn component(part: &str) -> Option<f64> {
    match rational(part) {
        Some((_, den)) if den == 0.0 => Some(0.0),
        Some((num, den)) => Some(num / den),
        None => f64::from_str(part).ok(),
    }
}

/// Splits a decimal angle into whole degrees, whole minutes and seconds.
pub fn dms(decimal: f64) -> [f64; 3] {
    let value = decimal.abs();
    let degrees = value.trunc();
    let minutes_full = (value - degrees) * 60.0;
    let minutes = minutes_full.trunc();
    let seconds = (minutes_full - minutes) * 60.0;
    [degrees, minutes, seconds]
}
