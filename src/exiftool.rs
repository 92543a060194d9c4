use crate::error::RichExifError;
use crate::store::{MemoryStore, MetadataProvider, TagValue};
use crate::utils::value_to_clean_string;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};

const STDERR_POLL_INTERVAL: Duration = Duration::from_millis(5);
const STDERR_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Arguments for one metadata read: JSON, `Group:Tag` keys, duplicates kept.
const READ_ARGS: &[&str] = &["-json", "-G1", "-a"];

/// ExifTool family 1 groups and the namespace their tags live under.
const GROUPS: &[(&str, &str)] = &[
    ("IFD0", "Exif.Image"),
    ("ExifIFD", "Exif.Photo"),
    ("GPS", "Exif.GPSInfo"),
    ("IFD1", "Exif.Thumbnail"),
    ("InteropIFD", "Exif.Iop"),
];

/// ExifTool tags whose namespaced name differs from `Group:Tag` mapped
/// through [`GROUPS`], including the makernote tags the summary reads.
const ALIASES: &[(&str, &str)] = &[
    ("IFD0:ModifyDate", "Exif.Image.DateTime"),
    ("IFD0:CreateDate", "Exif.Image.DateTimeDigitized"),
    ("ExifIFD:CreateDate", "Exif.Photo.DateTimeDigitized"),
    ("ExifIFD:ISO", "Exif.Photo.ISOSpeedRatings"),
    ("ExifIFD:ExposureCompensation", "Exif.Photo.ExposureBiasValue"),
    ("ExifIFD:FocalLengthIn35mmFormat", "Exif.Photo.FocalLengthIn35mmFilm"),
    ("Nikon:ISO", "Exif.Nikon3.ISOSpeed"),
    ("Nikon:ISOExpansion", "Exif.NikonIi.ISOExpansion"),
    ("Nikon:WhiteBalance", "Exif.Nikon3.WhiteBalance"),
    ("Nikon:WhiteBalanceFineTune", "Exif.Nikon3.WhiteBalanceBias"),
    ("Nikon:FocusMode", "Exif.Nikon3.Focus"),
    ("Nikon:AFAreaMode", "Exif.NikonAf2.AFAreaMode"),
    ("Nikon:ActiveD-Lighting", "Exif.Nikon3.ActiveDLighting"),
    ("Nikon:VibrationReduction", "Exif.NikonVr.VibrationReduction"),
    ("Nikon:FocusDistance", "Exif.NikonLd3.FocusDistance"),
    ("Nikon:Lens", "Exif.Nikon3.Lens"),
    ("Canon:CameraISO", "Exif.CanonSi.ISOSpeed"),
    ("Canon:WhiteBalance", "Exif.CanonSi.WhiteBalance"),
    ("Canon:WhiteBalanceRed", "Exif.CanonPr.WhiteBalanceRed"),
    ("Canon:WhiteBalanceBlue", "Exif.CanonPr.WhiteBalanceBlue"),
    ("Canon:ColorTemperature", "Exif.CanonPr.ColorTemperature"),
    ("Canon:FocusMode", "Exif.CanonCs.FocusMode"),
    ("Canon:AFPoint", "Exif.CanonCs.AFPoint"),
    ("Canon:ImageStabilization", "Exif.CanonCs.ImageStabilization"),
    ("Canon:LensType", "Exif.CanonCs.LensType"),
    ("Sony:ISOSetting", "Exif.Sony2.ISOSetting"),
    ("Sony:FocusMode", "Exif.Sony2.FocusMode"),
    ("Sony:AFAreaMode", "Exif.Sony2.AFAreaMode"),
    ("Sony:DynamicRangeOptimizer", "Exif.Sony2.DynamicRangeOptimizer"),
];

/// Tags holding an embedded preview image.
const PREVIEW_TAGS: &[&str] = &["ThumbnailImage", "PreviewImage", "JpgFromRaw", "OtherImage"];

/// A persistent `exiftool` process in `-stay_open` mode, used as the
/// [`MetadataProvider`] for the summary.
///
/// The process is terminated when this struct is dropped.
#[derive(Debug)]
pub struct ExifTool {
    stdin: BufWriter<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    stderr_receiver: Receiver<String>,
    child: Child,
}

impl ExifTool {
    /// Launches `exiftool` from `PATH`.
    pub fn new() -> Result<Self, RichExifError> {
        Self::with_executable(Path::new("exiftool"))
    }

    /// Launches `exiftool` from a specific path.
    pub fn with_executable(exiftool_path: &Path) -> Result<Self, RichExifError> {
        let mut child = Command::new(exiftool_path)
            .args(["-stay_open", "True", "-@", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RichExifError::ExifToolNotFound)?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stderr"))?;

        // stderr is read on its own thread so a chatty error stream can
        // never block stdout. The thread ends when the channel or pipe closes.
        let (stderr_sender, stderr_receiver) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                if stderr_sender.send(line).is_err() {
                    break;
                }
            }
        });

        log::debug!("Started exiftool from {}", exiftool_path.display());
        Ok(Self {
            stdin: BufWriter::new(stdin),
            stdout: BufReader::new(stdout),
            stderr_receiver,
            child,
        })
    }

    /// Sends one command and returns its stdout.
    ///
    /// Arguments go to ExifTool's stdin one per line, followed by `-execute`.
    pub fn execute_raw(&mut self, args: &[&str]) -> Result<Vec<u8>, RichExifError> {
        // Stale lines from an earlier command would be blamed on this one.
        while self.stderr_receiver.try_recv().is_ok() {}

        for arg in args {
            writeln!(self.stdin, "{}", arg)?;
        }
        writeln!(self.stdin, "-execute")?;
        self.stdin.flush()?;

        let stdout_bytes = self.read_until_ready()?;
        let stderr_lines = self.drain_stderr()?;

        let command_args = args.join(" ");
        for line in &stderr_lines {
            if let Some(file) = line.strip_prefix("Error: File not found - ") {
                return Err(RichExifError::FileNotFound {
                    path: PathBuf::from(file.trim()),
                    command_args,
                });
            } else if line.contains("Error:") {
                return Err(RichExifError::ExifToolProcess {
                    message: line.to_string(),
                    std_err: stderr_lines.join("\n"),
                    command_args,
                });
            } else if line.contains("Warning:") {
                log::warn!("ExifTool: {} (command={})", line, command_args);
            }
        }

        Ok(stdout_bytes)
    }

    /// Reads stdout up to the `{ready}` marker ExifTool prints after each command.
    fn read_until_ready(&mut self) -> Result<Vec<u8>, RichExifError> {
        const READY_UNIX: &[u8] = b"{ready}\n";
        const READY_WIN: &[u8] = b"{ready}\r\n";

        let mut buffer = Vec::with_capacity(4096);
        let mut chunk = [0u8; 4096];
        loop {
            let bytes_read = self.stdout.read(&mut chunk)?;
            if bytes_read == 0 {
                let stderr_lines = self.drain_stderr().unwrap_or_default();
                return if stderr_lines.is_empty() {
                    Err(RichExifError::ProcessTerminated)
                } else {
                    Err(RichExifError::ExifToolProcess {
                        message: "Process terminated unexpectedly".to_string(),
                        std_err: stderr_lines.join("\n"),
                        command_args: "<unknown - process terminated>".to_string(),
                    })
                };
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            for marker in [READY_WIN, READY_UNIX] {
                if buffer.ends_with(marker) {
                    buffer.truncate(buffer.len() - marker.len());
                    return Ok(buffer);
                }
            }
        }
    }

    /// Collects what ExifTool wrote to stderr for the last command.
    ///
    /// Error lines can trail the `{ready}` marker slightly, so the channel is
    /// polled for a short while when it is empty.
    fn drain_stderr(&mut self) -> Result<Vec<String>, RichExifError> {
        let mut lines = Vec::new();
        let start = Instant::now();

        loop {
            match self.stderr_receiver.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(RichExifError::StderrDisconnected),
            }
        }

        while lines.is_empty() && start.elapsed() < STDERR_POLL_TIMEOUT {
            match self.stderr_receiver.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) => thread::sleep(STDERR_POLL_INTERVAL),
                Err(TryRecvError::Disconnected) => return Err(RichExifError::StderrDisconnected),
            }
        }

        Ok(lines)
    }

    /// Asks the process to leave stay-open mode. Called on drop.
    pub fn close(&mut self) -> Result<(), std::io::Error> {
        writeln!(self.stdin, "-stay_open")?;
        writeln!(self.stdin, "False")?;
        writeln!(self.stdin, "-execute")?;
        self.stdin.flush()
    }

    /// Reads every tag of one file as ExifTool's grouped JSON object.
    ///
    /// Runs `exiftool -json -G1 -a {file_path}`.
    pub fn json(&mut self, file_path: &Path) -> Result<Map<String, Value>, RichExifError> {
        let path_str = file_path.to_string_lossy();
        let mut args = READ_ARGS.to_vec();
        args.push(path_str.as_ref());

        let unexpected = || RichExifError::UnexpectedFormat {
            path: path_str.to_string(),
            command_args: args.join(" "),
        };

        let output = self.execute_raw(&args)?;
        if output.is_empty() {
            return Err(unexpected());
        }
        let value: Value = serde_json::from_slice(&output)?;
        match value {
            Value::Array(items) => match items.into_iter().next() {
                Some(Value::Object(object)) => Ok(object),
                _ => Err(unexpected()),
            },
            _ => Err(unexpected()),
        }
    }
}

impl MetadataProvider for ExifTool {
    type Store = MemoryStore;

    fn load(&mut self, path: &Path) -> Result<MemoryStore, RichExifError> {
        log::debug!("Reading metadata of {}", path.display());
        let object = self.json(path)?;
        store_from_json(path, object)
    }
}

impl Drop for ExifTool {
    fn drop(&mut self) {
        // Kill regardless: close() only asks nicely.
        let _ = self.close();
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Translates one file's `Group:Tag` JSON object into a [`MemoryStore`].
pub(crate) fn store_from_json(
    path: &Path,
    object: Map<String, Value>,
) -> Result<MemoryStore, RichExifError> {
    if let Some(reason) = object.get("ExifTool:Error") {
        return Err(RichExifError::Unsupported {
            path: path.to_path_buf(),
            reason: value_to_clean_string(reason),
        });
    }
    if let Some(warning) = object.get("ExifTool:Warning") {
        log::warn!(
            "ExifTool warning for {}: {}",
            path.display(),
            value_to_clean_string(warning)
        );
    }

    let mut store = MemoryStore::new();
    let mut previews = 0;

    for (key, value) in object {
        let Some((group, tag)) = key.split_once(':') else {
            continue;
        };
        if PREVIEW_TAGS.contains(&tag) && is_binary_placeholder(&value) {
            previews += 1;
            continue;
        }
        let Some(value) = tag_value(&value) else {
            continue;
        };

        if let Some((_, name)) = ALIASES.iter().find(|(alias, _)| *alias == key) {
            store.insert(*name, value);
        } else if let Some((_, namespace)) = GROUPS.iter().find(|(g, _)| *g == group) {
            store.insert(format!("{}.{}", namespace, tag), value);
        }
    }

    store.set_preview_count(previews);
    Ok(store)
}

fn is_binary_placeholder(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with("(Binary data"))
}

fn tag_value(value: &Value) -> Option<TagValue> {
    match value {
        Value::String(s) => Some(TagValue::String(s.clone())),
        Value::Number(n) => n.as_f64().map(TagValue::Float),
        Value::Bool(b) => Some(TagValue::String(b.to_string())),
        Value::Array(items) => Some(TagValue::String(
            items
                .iter()
                .map(value_to_clean_string)
                .collect::<Vec<_>>()
                .join(" "),
        )),
        Value::Null | Value::Object(_) => None,
    }
}
