//! CLI example that loads a directory and prints the filtered view of it
//!
//! Usage:
//!   cargo run --example filtered_listing [path] [extension]
//!
//! Only files with the given extension (default `rs`) are kept. Directories
//! are dropped from the view, so the files form a flat virtual forest; the
//! indentation shows their physical depth. Set `RUST_LOG=debug` (or `trace`)
//! to see what the loader and the navigator are doing.

use anyhow::Result;
use filtered_tree::prelude::*;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or(".");
    let extension = args.get(2).map(String::as_str).unwrap_or("rs").to_string();

    println!("Loading directory: {}", path);
    let tree = load_directory(path)?;

    let matching = node(move |n: &Node<FileData>| n.data.has_extension(&extension));
    let nav = Navigator::new(matching);

    println!("Total nodes: {}", tree.node_count());
    println!("Matching files: {}", nav.iter(&tree).count());
    println!();
    println!("Filtered view:");
    println!("═══════════════════════════════");

    // Walk the view in document order, one step at a time
    let mut current = nav.first(&tree);
    while let Some(id) = current {
        let depth = tree.depth(id);
        let indent = "  ".repeat(depth);
        if let Some(node) = tree.get(id) {
            println!("{}📄 {} ({})", indent, node.name, format_size(node.data.size));
        }
        current = nav.next(&tree, id)?;
    }

    println!("═══════════════════════════════");

    let total_size: u64 = nav
        .iter(&tree)
        .filter_map(|id| tree.get(id))
        .map(|n| n.data.size)
        .sum();
    println!("  Total size: {}", format_size(total_size));

    Ok(())
}

/// Format file size in human-readable format
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
