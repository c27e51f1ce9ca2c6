//! Show the snapshot manifest ("data as of") and check that both snapshots load.
//! Run: cargo run --bin snapshot_info

use std::path::Path;

use smitebuilds::data::config::snapshot_paths_from_env;
use smitebuilds::data::snapshot::{load_characters, load_items, load_manifest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (items_path, characters_path) = snapshot_paths_from_env();
    let snapshot_dir = Path::new(&items_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    match load_manifest(snapshot_dir)? {
        Some(manifest) => {
            println!("Manifest: {}", snapshot_dir.display());
            for (dataset, entry) in &manifest {
                let captured = entry.captured_at.as_deref().unwrap_or("unknown");
                println!("  {dataset}: {} ({} records, captured {captured})", entry.path, entry.records);
            }
        }
        None => println!("No manifest in {}", snapshot_dir.display()),
    }

    let mut err = 0;
    match load_items(&items_path) {
        Ok(items) => println!("[items] {} records in {}", items.len(), items_path),
        Err(e) => {
            eprintln!("[items] {e}");
            err += 1;
        }
    }
    match load_characters(&characters_path) {
        Ok(characters) => println!("[characters] {} records in {}", characters.len(), characters_path),
        Err(e) => {
            eprintln!("[characters] {e}");
            err += 1;
        }
    }

    if err > 0 {
        std::process::exit(1);
    }
    Ok(())
}
