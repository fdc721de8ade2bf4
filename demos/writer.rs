// Replaces the text of the given path with the key=value pairs provided as args
// `cargo run --example writer -- screenshot.png GraphEditor="Begin Object ... End Object"`
fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap();
    let map = args
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => panic!("expected key=value, got {}", arg),
        })
        .collect();

    textchunk::write_text_chunks(&path, &map).unwrap();
}
