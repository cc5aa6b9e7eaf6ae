//! Build script for the podcast sampler.
//!
//! Copies `.env.example` next to the `.env` file the binary reads, so a fresh
//! install has a template for the Listen Notes key and the Spotify client
//! credentials:
//! - Linux: `~/.local/share/podsampler/.env.example`
//! - macOS: `~/Library/Application Support/podsampler/.env.example`
//! - Windows: `%LOCALAPPDATA%/podsampler/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let template = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join(".env.example");

    let mut data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.push("podsampler");
    fs::create_dir_all(&data_dir)?;

    if template.is_file() {
        fs::copy(&template, data_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
