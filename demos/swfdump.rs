//! Parses an SWF file and prints a structural summary.
//!
//! Not part of the library's public API — a thin driver demonstrating
//! `swf::parse` / `swf::serialize` round-tripping a file from disk.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

fn main() {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: swfdump <path-to-swf>");
            std::process::exit(1);
        }
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let movie = match swf::parse(BufReader::new(file)) {
        Ok(movie) => movie,
        Err(e) => {
            eprintln!("failed to parse {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let header = &movie.header;
    println!("signature:   {:?}", header.compression);
    println!("version:     {}", header.version);
    println!(
        "frame size:  {:.1} x {:.1} px",
        header.stage_size.x_max.to_pixels() - header.stage_size.x_min.to_pixels(),
        header.stage_size.y_max.to_pixels() - header.stage_size.y_min.to_pixels()
    );
    println!("frame rate:  {:.2} fps", header.frame_rate);
    println!("frame count: {}", header.num_frames);
    println!("tag count:   {}", movie.tags.len());

    let mut histogram: BTreeMap<u16, usize> = BTreeMap::new();
    for tag in &movie.tags {
        *histogram.entry(tag.code()).or_insert(0) += 1;
    }
    println!("tag codes:");
    for (code, count) in histogram {
        println!("  {:>3}: {}", code, count);
    }
}
