//! Tag names looked up by the summary, in display order.
//!
//! Names follow the `Family.Group.Tag` convention (`Exif.Photo.FNumber`).
//! Vendor groups use the makernote group names: `Nikon3`, `NikonIi`,
//! `CanonCs`, `CanonSi`, `Sony2`, ...

/// A tag and the label it is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    pub tag: &'static str,
    pub label: &'static str,
}

const fn spec(tag: &'static str, label: &'static str) -> TagSpec {
    TagSpec { tag, label }
}

pub const MAKE: &str = "Exif.Image.Make";
pub const MODEL: &str = "Exif.Image.Model";

/// Timestamp candidates, probed in this order.
pub const TIMESTAMPS: &[TagSpec] = &[
    spec("Exif.Image.DateTime", "DateTime"),
    spec("Exif.Photo.DateTimeOriginal", "DateTimeOriginal"),
    spec("Exif.Image.DateTimeOriginal", "DateTimeOriginal (IFD0)"),
    spec("Exif.Photo.DateTimeDigitized", "DateTimeDigitized"),
    spec("Exif.Image.DateTimeDigitized", "DateTimeDigitized (IFD0)"),
];

pub const EXPOSURE_TIME: &str = "Exif.Photo.ExposureTime";
pub const F_NUMBER: &str = "Exif.Photo.FNumber";
pub const APERTURE_VALUE: &str = "Exif.Photo.ApertureValue";

/// ISO sources: the standard tag first, then vendor fallbacks.
pub const ISO: &[&str] = &[
    "Exif.Photo.ISOSpeedRatings",
    "Exif.Nikon3.ISOSpeed",
    "Exif.CanonSi.ISOSpeed",
    "Exif.Sony2.ISOSetting",
];
pub const ISO_EXPANSION: &str = "Exif.NikonIi.ISOExpansion";

pub const FOCAL_LENGTH: &str = "Exif.Photo.FocalLength";
pub const FOCAL_LENGTH_35MM: &str = "Exif.Photo.FocalLengthIn35mmFilm";

pub const FLASH: &str = "Exif.Photo.Flash";

pub mod white_balance {
    pub const NIKON_MODE: &str = "Exif.Nikon3.WhiteBalance";
    pub const NIKON_BIAS: &str = "Exif.Nikon3.WhiteBalanceBias";
    pub const CANON_MODE: &str = "Exif.CanonSi.WhiteBalance";
    pub const CANON_RED: &str = "Exif.CanonPr.WhiteBalanceRed";
    pub const CANON_BLUE: &str = "Exif.CanonPr.WhiteBalanceBlue";
    pub const CANON_TEMPERATURE: &str = "Exif.CanonPr.ColorTemperature";
    pub const STANDARD: &str = "Exif.Photo.WhiteBalance";
}

pub mod focus {
    pub const NIKON_MODE: &str = "Exif.Nikon3.Focus";
    pub const NIKON_AREA: &str = "Exif.NikonAf2.AFAreaMode";
    pub const SONY_MODE: &str = "Exif.Sony2.FocusMode";
    pub const SONY_AREA: &str = "Exif.Sony2.AFAreaMode";
    pub const CANON_MODE: &str = "Exif.CanonCs.FocusMode";
    pub const CANON_POINT: &str = "Exif.CanonCs.AFPoint";
}

/// Miscellaneous shooting settings, one line each.
pub const EXTRAS: &[TagSpec] = &[
    spec("Exif.Photo.ExposureBiasValue", "Exposure bias"),
    spec("Exif.Photo.ExposureProgram", "Program"),
    spec("Exif.Photo.ExposureMode", "Exposure mode"),
    spec("Exif.Photo.MeteringMode", "Metering"),
    spec("Exif.Photo.SceneCaptureType", "Scene"),
    spec("Exif.Photo.Contrast", "Contrast"),
    spec("Exif.Photo.Saturation", "Saturation"),
    spec("Exif.Photo.Sharpness", "Sharpness"),
    spec("Exif.Photo.DigitalZoomRatio", "Digital zoom"),
    spec("Exif.Nikon3.ActiveDLighting", "Active D-Lighting"),
    spec("Exif.NikonVr.VibrationReduction", "Vibration reduction"),
    spec("Exif.CanonCs.ImageStabilization", "Image stabilization"),
    spec("Exif.Sony2.DynamicRangeOptimizer", "DRO"),
];

pub const MAX_APERTURE: &str = "Exif.Photo.MaxApertureValue";

/// Numeric lens parameters. Everything but the aperture is a distance.
pub const LENS_PARAMETERS: &[TagSpec] = &[
    spec(MAX_APERTURE, "Max aperture"),
    spec("Exif.NikonLd3.FocusDistance", "Focus distance"),
    spec("Exif.Photo.SubjectDistance", "Subject distance"),
];

/// Lens names. Several may be present at once; all are shown.
pub const LENS_MODELS: &[TagSpec] = &[
    spec("Exif.Nikon3.Lens", "Lens"),
    spec("Exif.CanonCs.LensType", "Lens type"),
    spec("Exif.Photo.LensModel", "Lens model"),
];

pub mod gps {
    pub const LATITUDE_REF: &str = "Exif.GPSInfo.GPSLatitudeRef";
    pub const LATITUDE: &str = "Exif.GPSInfo.GPSLatitude";
    pub const LONGITUDE_REF: &str = "Exif.GPSInfo.GPSLongitudeRef";
    pub const LONGITUDE: &str = "Exif.GPSInfo.GPSLongitude";
    pub const ALTITUDE_REF: &str = "Exif.GPSInfo.GPSAltitudeRef";
    pub const ALTITUDE: &str = "Exif.GPSInfo.GPSAltitude";
}

pub const USER_COMMENT: &str = "Exif.Photo.UserComment";
