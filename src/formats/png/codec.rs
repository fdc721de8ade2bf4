// Pixel decoding and encoding is delegated to the `png` crate. What stays here is the glue: the
// chunk walk that refuses unknown critical chunks (the decoder would silently skip them), the
// declared text count, and the write settings.
//
// The encoder can't produce interlaced data, so interlaced images are written back progressive.

use super::{image::PngImage, CRITICAL_CHUNKS, SIGNATURE};
use crate::error::{Error, Result};
use png::{
    AdaptiveFilterType, ColorType, Compression, Decoder, Encoder, FilterType, Transformations,
};

fn is_critical(chunk_type: &[u8]) -> bool {
    chunk_type[0] & 0x20 == 0
}

/// Walks the chunk list and fails on a critical chunk this codec doesn't know.
///
/// Stops at `IEND` or when the data runs out, truncation is left for the decoder to report.
pub(crate) fn check_critical_chunks(bytes: &[u8]) -> Result<()> {
    let mut pos = SIGNATURE.len();
    while let Some(header) = bytes.get(pos..).and_then(|rest| rest.get(..8)) {
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let chunk_type = &header[4..];
        if chunk_type == b"IEND" {
            break;
        }
        if is_critical(chunk_type) && !CRITICAL_CHUNKS.contains(&chunk_type) {
            let name = String::from_utf8_lossy(chunk_type);
            error!("Found unknown critical chunk {:?}", name);
            return Err(Error::Decode(format!("unknown critical chunk {:?}", name).into()));
        }
        pos = match pos.checked_add(length).and_then(|p| p.checked_add(12)) {
            Some(p) => p,
            None => break,
        };
    }
    Ok(())
}

fn decoder(bytes: &[u8]) -> Result<Decoder<&[u8]>> {
    if !bytes.starts_with(SIGNATURE) {
        return Err(Error::NotAPngFile);
    }
    check_critical_chunks(bytes)?;
    let mut decoder = Decoder::new(bytes);
    decoder.set_transformations(Transformations::IDENTITY);
    Ok(decoder)
}

/// Number of text chunks (`tEXt`, `zTXt` and `iTXt`) placed before the image data.
pub(crate) fn text_count(bytes: &[u8]) -> Result<usize> {
    let reader = decoder(bytes)?.read_info().map_err(|e| Error::Decode(e.into()))?;
    let info = reader.info();
    Ok(info.uncompressed_latin1_text.len()
        + info.compressed_latin1_text.len()
        + info.utf8_text.len())
}

pub(crate) fn decode(bytes: &[u8]) -> Result<PngImage> {
    let mut reader = decoder(bytes)?.read_info().map_err(|e| Error::Decode(e.into()))?;
    let mut data = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut data).map_err(|e| Error::Decode(e.into()))?;
    data.truncate(frame.buffer_size());

    let info = reader.info();
    let image = PngImage::new(info.width, info.height, info.color_type, info.bit_depth, data)?;
    let image = match &info.palette {
        Some(palette) => image.with_palette(palette.to_vec())?,
        None => image,
    };
    Ok(match &info.trns {
        Some(trns) => image.with_transparency(trns.to_vec()),
        None => image,
    })
}

/// Encodes `image` with one `tEXt` chunk per entry, in the order given.
///
/// Entries must already be validated, keys and values are written as Latin-1.
pub(crate) fn encode(image: &PngImage, entries: &[(String, String)]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, image.width(), image.height());
    encoder.set_color(image.color_type());
    encoder.set_depth(image.bit_depth());
    encoder.set_compression(Compression::Fast);
    // Same choice as libpng: no filtering when pixels are palette indices or smaller than a byte.
    if image.color_type() == ColorType::Indexed || (image.bit_depth() as u8) < 8 {
        encoder.set_filter(FilterType::NoFilter);
    } else {
        encoder.set_adaptive_filter(AdaptiveFilterType::Adaptive);
    }
    if let Some(palette) = image.palette() {
        encoder.set_palette(palette.to_vec());
    }
    if let Some(trns) = image.transparency() {
        encoder.set_trns(trns.to_vec());
    }
    for (key, value) in entries {
        encoder.add_text_chunk(key.clone(), value.clone()).map_err(|e| Error::Encode(e.into()))?;
    }

    let mut writer = encoder.write_header().map_err(|e| Error::Encode(e.into()))?;
    writer.write_image_data(image.data()).map_err(|e| Error::Encode(e.into()))?;
    writer.finish().map_err(|e| Error::Encode(e.into()))?;
    Ok(out)
}
