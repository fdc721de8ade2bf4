#![cfg(feature = "png")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use textchunk::{
    decode_png, encode_png, BitDepth, ColorType, PngImage, PngTextChunk, TextChunk, TextMap,
};

// Maps any char onto the non-NUL Latin-1 range, the only text a tEXt chunk can hold
fn latin1(s: &str, max_len: usize) -> String {
    s.chars().take(max_len).map(|c| char::from((c as u32 % 255 + 1) as u8)).collect()
}

fn sanitize(map: TextMap) -> TextMap {
    map.into_iter()
        .map(|(key, value)| (latin1(&key, 79), latin1(&value, usize::MAX)))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .collect()
}

fn image(width: u8, height: u8, seed: u8) -> PngImage {
    let (width, height) = (width as u32 % 32 + 1, height as u32 % 32 + 1);
    // 8 bit gray and alpha, or 16 bit gray depending on the seed
    let (color_type, bit_depth) = if seed % 2 == 0 {
        (ColorType::GrayscaleAlpha, BitDepth::Eight)
    } else {
        (ColorType::Grayscale, BitDepth::Sixteen)
    };
    let line = width as usize * 2;
    let data = (0..height as usize)
        .flat_map(|y| (0..line).map(move |x| seed.wrapping_mul(x as u8) ^ y as u8))
        .collect();
    PngImage::new(width, height, color_type, bit_depth, data).unwrap()
}

#[quickcheck]
fn written_text_reads_back(map: TextMap, width: u8, height: u8, seed: u8) -> TestResult {
    let map = sanitize(map);
    if map.is_empty() {
        return TestResult::discard();
    }
    let image = image(width, height, seed);
    let bytes = encode_png(&image, &map).unwrap();
    let mut codec = PngTextChunk::new("property.png", bytes).unwrap();
    TestResult::from_bool(codec.read().unwrap() == map)
}

#[quickcheck]
fn text_never_changes_pixels(map: TextMap, width: u8, height: u8, seed: u8) -> bool {
    let image = image(width, height, seed);
    let bytes = encode_png(&image, &sanitize(map)).unwrap();
    decode_png(&bytes).unwrap() == image
}

#[quickcheck]
fn garbage_is_never_a_panic(bytes: Vec<u8>) -> bool {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend(bytes);
    let _ = decode_png(&data);
    let _ = PngTextChunk::new("garbage.png", data).unwrap().read();
    true
}
