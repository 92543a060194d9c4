//! Prints the sidebar summary of one image, as plain text.
//!
//! cargo run --example summary -- path/to/image.jpg [config.json]
use richexif::{Config, RichExifError, SelectionListener};
use std::path::Path;

fn main() -> Result<(), RichExifError> {
    let mut args = std::env::args().skip(1);
    let Some(image) = args.next() else {
        eprintln!("usage: summary <image> [config.json]");
        std::process::exit(2);
    };
    let config_path = args.next();

    let config = Config::load(config_path.as_deref().map(Path::new))?;
    let mut listener = SelectionListener::from_config(&config)?;

    match listener.on_selection_changed(&image.as_str()).report() {
        Some(report) => println!("{}", report.plain_text()),
        None => println!("Nothing selected"),
    }
    Ok(())
}
