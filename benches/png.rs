use criterion::{criterion_group, criterion_main, BatchSize::SmallInput, Criterion};
use textchunk::{
    decode_png, encode_png, textmap, BitDepth, ColorType, PngImage, PngTextChunk, TextChunk,
    TextMap,
};

fn screenshot() -> PngImage {
    let (width, height) = (640, 360);
    let data = (0..height)
        .flat_map(|y| (0..width * 4).map(move |x| ((x / 4) ^ y) as u8))
        .collect();
    PngImage::new(width as u32, height as u32, ColorType::Rgba, BitDepth::Eight, data).unwrap()
}

fn graph() -> TextMap {
    let node = "Begin Object Class=/Script/BlueprintGraph.K2Node_CallFunction\n";
    textmap! {"GraphEditor" => node.repeat(200)}
}

pub fn read(c: &mut Criterion) {
    let bytes = encode_png(&screenshot(), &graph()).unwrap();
    c.bench_function("png read", |b| {
        b.iter_batched(
            || PngTextChunk::new("bench.png", bytes.clone()).unwrap(),
            |mut codec| codec.read().unwrap(),
            SmallInput,
        )
    });
}

pub fn write(c: &mut Criterion) {
    let image = decode_png(&encode_png(&screenshot(), &TextMap::new()).unwrap()).unwrap();
    let map = graph();
    c.bench_function("png write", |b| b.iter(|| encode_png(&image, &map).unwrap()));
}

pub fn decode(c: &mut Criterion) {
    let bytes = encode_png(&screenshot(), &graph()).unwrap();
    c.bench_function("png decode", |b| b.iter(|| decode_png(&bytes).unwrap()));
}

criterion_group!(png, read, write, decode);
criterion_main!(png);
