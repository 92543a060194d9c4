use criterion::{black_box, criterion_group, criterion_main, Criterion};
use richexif::{format_report, resolve_path, MemoryStore, SummaryFormatter, TagValue};
use std::path::Path;

fn nikon_store() -> MemoryStore {
    let mut store = MemoryStore::new()
        .with("Exif.Image.Make", "NIKON CORPORATION")
        .with("Exif.Image.Model", "NIKON D750")
        .with("Exif.Image.DateTime", "2023:06:14 18:02:11")
        .with("Exif.Photo.DateTimeOriginal", "2023:06:14 18:01:59")
        .with("Exif.Photo.DateTimeDigitized", "2023:06:14 18:01:59")
        .with("Exif.Photo.ExposureTime", TagValue::Rational(1, 250))
        .with("Exif.Photo.FNumber", TagValue::Rational(56, 10))
        .with("Exif.Photo.ISOSpeedRatings", "400")
        .with("Exif.NikonIi.ISOExpansion", "Off")
        .with("Exif.Photo.FocalLength", TagValue::Rational(850, 10))
        .with("Exif.Photo.FocalLengthIn35mmFilm", 85.0)
        .with("Exif.Photo.Flash", "Off, Did not fire")
        .with("Exif.Nikon3.WhiteBalance", "Auto")
        .with("Exif.Nikon3.WhiteBalanceBias", "0 0")
        .with("Exif.Nikon3.Focus", "AF-C")
        .with("Exif.NikonAf2.AFAreaMode", "Dynamic Area (9 points)")
        .with("Exif.Photo.ExposureProgram", "Aperture-priority AE")
        .with("Exif.Photo.MeteringMode", "Multi-segment")
        .with("Exif.Nikon3.ActiveDLighting", "Normal")
        .with("Exif.Photo.MaxApertureValue", 1.8)
        .with("Exif.NikonLd3.FocusDistance", "3.35 m")
        .with("Exif.Nikon3.Lens", "85mm f/1.8")
        .with("Exif.Photo.LensModel", "AF-S Nikkor 85mm f/1.8G")
        .with("Exif.GPSInfo.GPSLatitudeRef", "North")
        .with("Exif.GPSInfo.GPSLatitude", "52/1 22/1 3714/100")
        .with("Exif.GPSInfo.GPSLongitudeRef", "East")
        .with("Exif.GPSInfo.GPSLongitude", "4/1 53/1 4098/100")
        .with("Exif.GPSInfo.GPSAltitude", TagValue::Rational(21, 10))
        .with("Exif.GPSInfo.GPSAltitudeRef", "0")
        .with("Exif.Photo.UserComment", "Sunset over the canal <3");
    store.set_preview_count(2);
    store
}

fn bench_summary(c: &mut Criterion) {
    let path = Path::new("/photos/DSC_0042.NEF");
    let store = nikon_store();
    let formatter = SummaryFormatter::new();

    c.bench_function("format full report", |b| {
        b.iter(|| formatter.format(black_box(&store), black_box(path)))
    });

    let sparse = MemoryStore::new().with("Exif.Image.Model", "X100");
    c.bench_function("format sparse report", |b| {
        b.iter(|| format_report(black_box(&sparse), black_box(path)))
    });

    c.bench_function("resolve file uri", |b| {
        b.iter(|| resolve_path(black_box("file:///photos/summer%20day/DSC_0042.NEF")))
    });
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
