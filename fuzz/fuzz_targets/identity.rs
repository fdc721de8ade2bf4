#![no_main]
use libfuzzer_sys::fuzz_target;
use textchunk::{decode_png, encode_png, PngTextChunk, TextChunk, TextMap};

fuzz_target!(|data: (Vec<u8>, TextMap)| {
    if let Ok(image) = decode_png(&data.0) {
        if let Ok(bytes) = encode_png(&image, &data.1) {
            assert_eq!(decode_png(&bytes).unwrap(), image);
            let mut codec = PngTextChunk::new("fuzz.png", bytes).unwrap();
            assert_eq!(codec.read().unwrap(), data.1);
        }
    }
});
