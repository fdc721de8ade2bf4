#![no_main]
use libfuzzer_sys::fuzz_target;
use textchunk::{decode_png, encode_png, TextMap};

fuzz_target!(|data: (Vec<u8>, TextMap)| {
    if let Ok(image) = decode_png(&data.0) {
        let _ = encode_png(&image, &data.1);
    }
});
