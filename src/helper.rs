use crate::{
    error::{Error, Result},
    formats::{identify_format, ImageFormat},
    TextMap,
};
use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
};

/// Reads and writes the text chunks of one image file.
pub trait TextChunk: Send {
    /// Replaces every text chunk of the file with the entries of `map`.
    ///
    /// The file is left untouched if `map` has an empty key or value, or one containing a NUL
    /// byte.
    fn write(&mut self, map: &TextMap) -> Result<()>;

    /// Returns the text chunks of the file.
    fn read(&mut self) -> Result<TextMap>;

    /// The file this codec is bound to.
    fn filename(&self) -> &Path;
}

type Generator = Box<dyn Fn(PathBuf, Vec<u8>) -> Result<Box<dyn TextChunk>> + Send + Sync>;

/// Builds the right [`TextChunk`] for a file, depending on its image format.
pub struct TextChunkHelper {
    generators: HashMap<ImageFormat, Generator>,
}

impl TextChunkHelper {
    /// A helper with a generator for every format this crate was built with.
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut helper = Self::empty();
        #[cfg(feature = "png")]
        helper.register_text_chunk_generator(ImageFormat::Png, |path, data| {
            let chunk = crate::PngTextChunk::new(path, data)?;
            Ok(Box::new(chunk) as Box<dyn TextChunk>)
        });
        helper
    }

    /// A helper without any generator.
    pub fn empty() -> Self {
        TextChunkHelper { generators: HashMap::new() }
    }

    /// Loads `path` and returns a codec bound to it.
    pub fn create_text_chunk(&self, path: impl AsRef<Path>) -> Result<Box<dyn TextChunk>> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            error!("Failed to load the file : {}", path.display());
            Error::from(e)
        })?;
        let format = identify_format(&data).ok_or(Error::UnsupportedFormat)?;
        match self.generators.get(&format) {
            Some(generator) => generator(path.to_path_buf(), data),
            None => {
                debug!("No text chunk generator registered for {:?}", format);
                Err(Error::UnsupportedFormat)
            }
        }
    }

    /// Whether a generator is registered for `format`.
    pub fn is_supported_image_format(&self, format: ImageFormat) -> bool {
        self.generators.contains_key(&format)
    }

    /// Registers `generator` for `format`, replacing the previous one if any.
    pub fn register_text_chunk_generator<F>(&mut self, format: ImageFormat, generator: F)
    where
        F: Fn(PathBuf, Vec<u8>) -> Result<Box<dyn TextChunk>> + Send + Sync + 'static,
    {
        if self.generators.insert(format, Box::new(generator)).is_some() {
            info!("Overwrote the text chunk generator of {:?}", format);
        }
    }

    /// Removes the generator for `format`. Files of that format are unsupported afterwards.
    pub fn unregister_text_chunk_generator(&mut self, format: ImageFormat) {
        self.generators.remove(&format);
    }
}

impl Default for TextChunkHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextChunkHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.generators.keys()).finish()
    }
}
