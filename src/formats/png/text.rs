// A `tEXt` chunk holds a keyword, a NUL separator and the text, both Latin-1 encoded, with no
// terminator after the text.
//
// Reading doesn't go through the decoder's parsed chunks. The file is scanned for the raw `tEXt`
// chunk type and the data of each match is split on NUL, as many times as the number of text
// chunks declared before the image data. Every chunk yields a key and a value, so a file is only
// accepted when exactly twice that many non-empty segments come out.
//
// A match only counts when it frames a whole chunk: the 4 bytes before it give a length that fits
// in the file and the CRC after that length checks out. Otherwise the scan moves on by one byte,
// so `tEXt` appearing inside palette entries, pixel data or another chunk is passed over. A
// complete, CRC-valid `tEXt` chunk stored inside some other chunk's data is still taken as text.
//
// Related links:
// https://www.w3.org/TR/png/#11tEXt

use super::{CRC, SIGNATURE};
use crate::{
    error::{Error, Result},
    utils::find_bytes,
    TextMap,
};
use std::ops::Range;

const TEXT: &[u8; 4] = b"tEXt";

/// Keywords are 1 to 79 bytes long.
pub(crate) const MAX_KEYWORD_LENGTH: usize = 79;

fn to_latin1(s: &str) -> Option<Vec<u8>> {
    s.chars().map(|c| u8::try_from(c).ok()).collect()
}

fn from_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn validate_entry(key: &str, value: &str) -> Result<(Vec<u8>, Vec<u8>)> {
    if key.is_empty() {
        return Err(Error::Validation("empty key"));
    }
    if value.is_empty() {
        return Err(Error::Validation("empty value"));
    }
    if key.contains('\0') || value.contains('\0') {
        return Err(Error::Validation("NUL byte in key or value"));
    }
    let key = to_latin1(key).ok_or(Error::Validation("key is not Latin-1"))?;
    let value = to_latin1(value).ok_or(Error::Validation("value is not Latin-1"))?;
    if key.len() > MAX_KEYWORD_LENGTH {
        return Err(Error::Validation("key longer than 79 bytes"));
    }
    Ok((key, value))
}

pub(crate) fn validate_map(map: &TextMap) -> Result<()> {
    map.iter().try_for_each(|(key, value)| validate_entry(key, value).map(|_| ()))
}

/// Validates `map` and returns its entries sorted by key, so output is reproducible.
pub(crate) fn encode_map(map: &TextMap) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        validate_entry(key, value)?;
        entries.push((key.clone(), value.clone()));
    }
    entries.sort_unstable();
    Ok(entries)
}

/// Data range of the chunk whose type starts at `marker`, if a well formed chunk is there.
fn chunk_data(bytes: &[u8], marker: usize) -> Option<Range<usize>> {
    let length = bytes.get(marker.checked_sub(4)?..marker)?;
    let start = marker + TEXT.len();
    let end = start.checked_add(u32::from_be_bytes(length.try_into().ok()?) as usize)?;
    let crc = bytes.get(end..end.checked_add(4)?)?;
    let crc = u32::from_be_bytes(crc.try_into().ok()?);
    (crc == CRC.checksum(&bytes[marker..end])).then(|| start..end)
}

fn next_text_chunk(bytes: &[u8], mut from: usize) -> Option<Range<usize>> {
    while let Some(marker) = find_bytes(bytes, TEXT, from) {
        if let Some(data) = chunk_data(bytes, marker) {
            return Some(data);
        }
        from = marker + 1;
    }
    None
}

/// Splits the text chunks of `bytes` into key and value segments, stopping after `declared`
/// chunks.
pub(crate) fn split_text_chunks(bytes: &[u8], declared: usize) -> Vec<&[u8]> {
    let mut segments = Vec::with_capacity(declared.saturating_mul(2).min(1024));
    let mut search_start = SIGNATURE.len();
    for count in 0..declared {
        let data = match next_text_chunk(bytes, search_start) {
            Some(data) => data,
            None => break,
        };
        // Skip the CRC
        search_start = data.end + 4;
        for segment in bytes[data].split(|&b| b == 0) {
            if segments.len() == (count + 1) * 2 {
                break;
            }
            if !segment.is_empty() {
                segments.push(segment);
            }
        }
    }
    segments
}

/// Recovers the text map from `bytes`, which declare `declared` text chunks.
pub(crate) fn read_map(bytes: &[u8], declared: usize) -> Result<TextMap> {
    let segments = split_text_chunks(bytes, declared);
    if segments.len() != declared * 2 {
        error!("The text could not be read correctly");
        error!("Number of texts declared by the header : {}", declared * 2);
        error!("Number of texts actually retrieved     : {}", segments.len());
        return Err(Error::ChunkCountMismatch { declared: declared * 2, found: segments.len() });
    }
    let map = segments
        .chunks_exact(2)
        .map(|pair| (from_latin1(pair[0]), from_latin1(pair[1])))
        .collect();
    validate_map(&map)?;
    Ok(map)
}
