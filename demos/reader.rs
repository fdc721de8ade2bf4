// Reads the file paths provided as args and prints the text they contain, if any
// `cargo run --example reader -- screenshot.png`
fn main() {
    for path in std::env::args().skip(1) {
        match textchunk::read_text_chunks(&path) {
            Ok(map) if map.is_empty() => println!("{}: no text", path),
            Ok(map) => {
                let mut entries: Vec<_> = map.into_iter().collect();
                entries.sort_unstable();
                println!("{}:", path);
                for (key, value) in entries {
                    println!("  {} = {}", key, value);
                }
            }
            Err(e) => eprintln!("{}: {}", path, e),
        }
    }
}
