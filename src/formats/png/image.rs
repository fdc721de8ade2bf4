use crate::error::{Error, Result};
use png::{BitDepth, ColorType};

/// A decoded PNG: size, sample format, the palette and transparency chunks when present, and the
/// pixel data.
///
/// Pixels are stored exactly as PNG packs them, one scanline after the other:
/// [`line_size`](PngImage::line_size) bytes each, big-endian samples for 16 bit images, several
/// pixels per byte below 8 bits per pixel. Interlaced images are stored deinterlaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngImage {
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: BitDepth,
    palette: Option<Vec<u8>>,
    transparency: Option<Vec<u8>>,
    data: Vec<u8>,
}

fn allows_bit_depth(color_type: ColorType, bit_depth: BitDepth) -> bool {
    use BitDepth::*;
    match color_type {
        ColorType::Grayscale => true,
        ColorType::Indexed => bit_depth != Sixteen,
        ColorType::Rgb | ColorType::GrayscaleAlpha | ColorType::Rgba => {
            matches!(bit_depth, Eight | Sixteen)
        }
    }
}

fn line_size(width: u32, color_type: ColorType, bit_depth: BitDepth) -> Option<usize> {
    let bits = (width as usize).checked_mul(color_type.samples() * bit_depth as usize)?;
    Some((bits + 7) / 8)
}

impl PngImage {
    /// Builds an image from packed scanlines, checking them against the size and sample format.
    ///
    /// Indexed images need a palette, add one with [`PngImage::with_palette`].
    pub fn new(
        width: u32,
        height: u32,
        color_type: ColorType,
        bit_depth: BitDepth,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage("image has zero width or height"));
        }
        if !allows_bit_depth(color_type, bit_depth) {
            return Err(Error::InvalidImage("bit depth not allowed for color type"));
        }
        let expected = line_size(width, color_type, bit_depth)
            .and_then(|n| n.checked_mul(height as usize))
            .ok_or(Error::InvalidImage("image too large"))?;
        if data.len() != expected {
            return Err(Error::InvalidImage("pixel data does not match image size"));
        }
        Ok(PngImage {
            width,
            height,
            color_type,
            bit_depth,
            palette: None,
            transparency: None,
            data,
        })
    }

    /// Sets the `PLTE` entries, three bytes (red, green, blue) each.
    pub fn with_palette(mut self, palette: Vec<u8>) -> Result<Self> {
        if palette.is_empty() || palette.len() % 3 != 0 || palette.len() > 256 * 3 {
            return Err(Error::InvalidImage("invalid palette length"));
        }
        self.palette = Some(palette);
        Ok(self)
    }

    /// Sets the raw `tRNS` chunk data.
    pub fn with_transparency(mut self, transparency: Vec<u8>) -> Self {
        self.transparency = Some(transparency);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    pub fn palette(&self) -> Option<&[u8]> {
        self.palette.as_deref()
    }

    pub fn transparency(&self) -> Option<&[u8]> {
        self.transparency.as_deref()
    }

    /// Length in bytes of one scanline.
    pub fn line_size(&self) -> usize {
        self.data.len() / self.height as usize
    }

    /// All scanlines, back to back.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.line_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_line_size() {
        let image = PngImage::new(10, 2, ColorType::Grayscale, BitDepth::One, vec![0; 4]).unwrap();
        assert_eq!(image.line_size(), 2);
        assert_eq!(image.rows().count(), 2);

        let image = PngImage::new(3, 1, ColorType::Rgb, BitDepth::Sixteen, vec![7; 18]).unwrap();
        assert_eq!(image.line_size(), 18);
    }

    #[test]
    fn reject_invalid_images() {
        let invalid = |w, h, c, d, n| {
            matches!(PngImage::new(w, h, c, d, vec![0; n]), Err(Error::InvalidImage(_)))
        };
        assert!(invalid(0, 1, ColorType::Rgb, BitDepth::Eight, 0));
        assert!(invalid(1, 1, ColorType::Rgb, BitDepth::Four, 1));
        assert!(invalid(1, 1, ColorType::Indexed, BitDepth::Sixteen, 2));
        assert!(invalid(2, 2, ColorType::Rgba, BitDepth::Eight, 15));
        assert!(!invalid(2, 2, ColorType::Rgba, BitDepth::Eight, 16));
    }

    #[test]
    fn palette_length() {
        let image = PngImage::new(1, 1, ColorType::Indexed, BitDepth::Eight, vec![0]).unwrap();
        assert!(image.clone().with_palette(vec![]).is_err());
        assert!(image.clone().with_palette(vec![0; 4]).is_err());
        assert!(image.clone().with_palette(vec![0; 257 * 3]).is_err());
        assert_eq!(image.with_palette(vec![1, 2, 3]).unwrap().palette(), Some(&[1, 2, 3][..]));
    }
}
