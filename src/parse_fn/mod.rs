//! Lenient parsers for the textual forms metadata providers hand out.
//!
//! ExifTool prints values with units and decorations (`"35.0 mm"`,
//! `"1/250"`, `"35 deg 40' 12.34\" N"`), other providers give bare numbers
//! or rationals. These helpers turn any of those into plain numbers.

pub mod datetime;
pub mod number;
