//! # textchunk
//!
//! Reads and writes key/value text stored inside image files, meant for embedding editor state
//! (node graphs, widget trees, ...) into screenshots so it can be restored later.
//!
//! Only PNG is implemented, through uncompressed `tEXt` chunks. Other formats can be plugged in
//! with [`TextChunkHelper::register_text_chunk_generator`].
//!
//! ```no_run
//! use textchunk::{read_text_chunks, textmap, write_text_chunks};
//!
//! write_text_chunks("graph.png", &textmap! {"GraphEditor" => "Begin Object ... End Object"})?;
//! assert_eq!(read_text_chunks("graph.png")?["GraphEditor"], "Begin Object ... End Object");
//! # Ok::<(), textchunk::Error>(())
//! ```

#[macro_use]
extern crate log;

pub mod error;
mod formats;
mod helper;
#[cfg(feature = "png")]
mod utils;

pub use error::{Error, Result};
pub use formats::{identify_format, ImageFormat};
#[cfg(feature = "png")]
pub use formats::png::{decode_png, encode_png, BitDepth, ColorType, PngImage, PngTextChunk};
pub use helper::{TextChunk, TextChunkHelper};

use std::{collections::HashMap, path::Path};

/// Text entries of an image, keyed by keyword.
pub type TextMap = HashMap<String, String>;

/// Returns the text stored in the image at `path`.
///
/// Images without any text yield an empty map.
pub fn read_text_chunks(path: impl AsRef<Path>) -> Result<TextMap> {
    TextChunkHelper::new().create_text_chunk(path)?.read()
}

/// Replaces the text stored in the image at `path` with `map`.
///
/// The file is rewritten in full. It is left untouched if anything fails.
pub fn write_text_chunks(path: impl AsRef<Path>, map: &TextMap) -> Result<()> {
    TextChunkHelper::new().create_text_chunk(path)?.write(map)
}

/// Builds a [`TextMap`] from `key => value` pairs, converting both sides with `to_string`.
#[macro_export]
macro_rules! textmap {
    {$($key:expr => $value:expr),* $(,)?} => {{
        #[allow(unused_mut)]
        let mut m = $crate::TextMap::new();
        $(m.insert($key.to_string(), $value.to_string());)*
        m
    }};
}
