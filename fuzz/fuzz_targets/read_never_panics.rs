#![no_main]
use libfuzzer_sys::fuzz_target;
use textchunk::{PngTextChunk, TextChunk};

fuzz_target!(|data: Vec<u8>| {
    if let Ok(mut codec) = PngTextChunk::new("fuzz.png", data) {
        let _ = codec.read();
    }
});
