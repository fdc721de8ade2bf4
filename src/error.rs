use std::path::PathBuf;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// All library functions return a `Result` with this error type
#[derive(Error, Debug)]
pub enum Error {
    /// This error is returned when a codec is bound to a path that cannot name a file
    #[error("invalid path: {0:?}")]
    InvalidPath(PathBuf),
    /// This error is returned when the data handed to the PNG codec does not start with the PNG
    /// signature
    #[error("not a png file")]
    NotAPngFile,
    /// This error is returned when no codec is registered for the format of the file, or the
    /// format could not be identified at all
    #[error("unsupported image format")]
    UnsupportedFormat,
    /// This error is returned when pixel data, palette or sample format of an image don't agree
    /// with each other
    #[error("invalid image: {0}")]
    InvalidImage(&'static str),
    /// This error is returned when the image could not be decoded, this is usually caused by
    /// corrupted/invalid files
    #[error("failed to decode image: {0}")]
    Decode(#[source] BoxError),
    /// This error is returned when the decoded image could not be encoded again
    #[error("failed to encode image: {0}")]
    Encode(#[source] BoxError),
    /// This error is returned when a text map has an empty key or value, a NUL byte, a key that
    /// is too long, or characters that can't be stored in a text chunk
    #[error("invalid text entry: {0}")]
    Validation(&'static str),
    /// This error is returned when the number of text segments found in the file does not match
    /// the number of text chunks declared before the image data
    #[error("text chunk count mismatch: expected {declared} segments, found {found}")]
    ChunkCountMismatch { declared: usize, found: usize },
    /// This error is returned when the OS encounters a problem while reading or writing the file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
