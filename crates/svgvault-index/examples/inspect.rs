use std::env;
use std::path::PathBuf;

use svgvault_core::MetadataExtractor;
use svgvault_index::{default_extractor, PatternExtractor};

// Print the metadata extracted from individual SVG files without touching
// any sidecar.
// Usage:
//   cargo run -p svgvault-index --example inspect -- <file.svg>... [--pattern]
// Notes:
//   - `--pattern` forces the regex strategy instead of the default one.

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut files: Vec<PathBuf> = Vec::new();
    let mut pattern_only = false;
    for arg in &args {
        match arg.as_str() {
            "--pattern" => pattern_only = true,
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s);
                std::process::exit(2);
            }
            s => files.push(PathBuf::from(s)),
        }
    }
    if files.is_empty() {
        eprintln!("Usage: cargo run -p svgvault-index --example inspect -- <file.svg>... [--pattern]");
        std::process::exit(1);
    }

    let extractor: Box<dyn MetadataExtractor> = if pattern_only {
        Box::new(PatternExtractor::new()?)
    } else {
        default_extractor()?
    };
    println!("SVG inspect ({} strategy)\n===========", extractor.name());

    for file in files {
        let markup = std::fs::read_to_string(&file)?;
        let meta = extractor.extract(&markup);
        println!("\n{}", file.display());
        println!("  width   : {}", meta.width.as_deref().unwrap_or("-"));
        println!("  height  : {}", meta.height.as_deref().unwrap_or("-"));
        println!("  viewBox : {}", meta.view_box.as_deref().unwrap_or("-"));
        println!("  paths   : {}", meta.path_count);
        println!("  fills   : {}", meta.fills.join(", "));
        println!("  strokes : {}", meta.strokes.join(", "));
    }
    Ok(())
}
