//! # Portable Network Graphics
//!
//! PNG data is stored in chunks: Each chunk starts with a 4 byte big endian number describing the
//! length of the data within. After that there's a 4 byte ASCII identifier for the chunk type.
//! Then comes the data, which is as long as the length described. At the end there is a CRC-32
//! checksum of the chunk type and data. An `IEND` chunk marks the end of the file.
//!
//! Text is stored in uncompressed `tEXt` chunks, one per entry, placed before the image data.
//! Writing never edits chunks in place: the image is fully decoded with the `png` crate and a new
//! file is encoded from its size, sample format, palette, transparency and pixels plus the new
//! text chunks. Every other ancillary chunk, including old text, is dropped, and interlaced images
//! come back progressive.
//!
//! ## Related Links
//!
//! - [Wikipedia article for PNG](https://en.wikipedia.org/wiki/Portable_Network_Graphics)
//! - [PNG Specification](https://www.w3.org/TR/png/)
//! - [pngcheck](http://www.libpng.org/pub/png/apps/pngcheck.html)

mod codec;
mod image;
mod lock;
mod text;

pub use image::PngImage;
pub use ::png::{BitDepth, ColorType};

use crate::{
    error::{Error, Result},
    TextChunk, TextMap,
};
use lock::CodecLock;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub(crate) const SIGNATURE: &[u8; 8] = b"\x89PNG\x0D\x0A\x1A\x0A";

/// The critical chunks a still image may contain.
const CRITICAL_CHUNKS: [&[u8]; 4] = [b"IHDR", b"PLTE", b"IDAT", b"IEND"];

const CRC: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Decodes a whole PNG image.
pub fn decode_png(bytes: &[u8]) -> Result<PngImage> {
    let _lock = CodecLock::acquire();
    codec::decode(bytes)
}

/// Encodes `image` into a new PNG stream with one `tEXt` chunk per entry of `map`.
pub fn encode_png(image: &PngImage, map: &TextMap) -> Result<Vec<u8>> {
    let entries = text::encode_map(map)?;
    let _lock = CodecLock::acquire();
    codec::encode(image, &entries)
}

/// Text chunk codec bound to one PNG file.
///
/// The whole file is kept in memory. [`write`](TextChunk::write) replaces the file on disk and
/// the in-memory copy, [`read`](TextChunk::read) only looks at the in-memory copy.
#[derive(Debug)]
pub struct PngTextChunk {
    filename: PathBuf,
    data: Vec<u8>,
}

impl PngTextChunk {
    /// Binds a codec to `filename`, with `data` being the current content of that file. Nothing is
    /// decoded yet.
    pub fn new(filename: impl Into<PathBuf>, data: Vec<u8>) -> Result<PngTextChunk> {
        let filename = filename.into();
        if filename.as_os_str().is_empty() || filename.file_name().is_none() {
            warn!("{:?} is not a valid file path", filename);
            return Err(Error::InvalidPath(filename));
        }
        if !data.starts_with(SIGNATURE) {
            error!("{} is not a png file", filename.display());
            return Err(Error::NotAPngFile);
        }
        Ok(PngTextChunk { filename, data })
    }

    /// Loads `filename` and binds a codec to it.
    pub fn open(filename: impl Into<PathBuf>) -> Result<PngTextChunk> {
        let filename = filename.into();
        let data = fs::read(&filename)?;
        PngTextChunk::new(filename, data)
    }

    /// The current content of the file.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn report(&self, action: &str, e: Error) -> Error {
        error!("Failed to {} text chunks of {}: {}", action, self.filename.display(), e);
        e
    }
}

impl TextChunk for PngTextChunk {
    fn write(&mut self, map: &TextMap) -> Result<()> {
        let entries = match text::encode_map(map) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Refusing to write text chunks to {}: {}", self.filename.display(), e);
                return Err(e);
            }
        };

        let _lock = CodecLock::acquire();
        let image = codec::decode(&self.data).map_err(|e| self.report("write", e))?;
        let bytes = codec::encode(&image, &entries).map_err(|e| self.report("write", e))?;
        fs::write(&self.filename, &bytes).map_err(|e| self.report("write", e.into()))?;
        debug!("Wrote {} text chunks to {}", entries.len(), self.filename.display());
        self.data = bytes;
        Ok(())
    }

    fn read(&mut self) -> Result<TextMap> {
        let _lock = CodecLock::acquire();
        let declared = codec::text_count(&self.data).map_err(|e| self.report("read", e))?;
        if declared == 0 {
            return Ok(TextMap::new());
        }
        text::read_map(&self.data, declared).map_err(|e| self.report("read", e))
    }

    fn filename(&self) -> &Path {
        &self.filename
    }
}
