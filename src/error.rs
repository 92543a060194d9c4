use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RichExifError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ExifTool executable could not be started: {0}")]
    ExifToolNotFound(#[source] std::io::Error),

    #[error("File not found: {}. command={command_args}", path.display())]
    FileNotFound { path: PathBuf, command_args: String },

    #[error("ExifTool error: {message}. command={command_args}")]
    ExifToolProcess {
        message: String,
        std_err: String,
        command_args: String,
    },

    #[error("ExifTool process terminated unexpectedly.")]
    ProcessTerminated,

    #[error("stderr channel for exiftool disconnected.")]
    StderrDisconnected,

    #[error("Expected different format from exiftool. file={path}, args={command_args}")]
    UnexpectedFormat { path: String, command_args: String },

    #[error("{reason}")]
    Unsupported { path: PathBuf, reason: String },

    #[error("Tag '{tag}' cannot be read as {expected}")]
    TagType { tag: String, expected: &'static str },

    #[error("Deserialization error at path '{path}': {source}")]
    Deserialization {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl From<serde_path_to_error::Error<serde_json::Error>> for RichExifError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        RichExifError::Deserialization {
            path: err.path().to_string(),
            source: err.into_inner(),
        }
    }
}
