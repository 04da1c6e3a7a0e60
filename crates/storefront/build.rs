//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet: the file is copied to
//! `static/css/derived/main.<hash>.css` and the served path is exported as
//! `STYLESHEET_PATH`, so browsers can cache it indefinitely.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters of the SHA-256 digest kept in the file name.
const FINGERPRINT_LEN: usize = 8;

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let source = manifest_dir.join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", source.display());

    match fingerprint(&source, &manifest_dir.join("static/css/derived")) {
        Ok(file_name) => {
            println!("cargo:rustc-env=STYLESHEET_PATH=/static/css/derived/{file_name}");
        }
        Err(e) => {
            // Serve the unhashed file rather than failing the build
            println!("cargo:warning=Could not fingerprint main.css: {e}");
            println!("cargo:rustc-env=STYLESHEET_PATH=/static/css/main.css");
        }
    }

    Ok(())
}

/// Copy `source` into `derived_dir` under a content-hashed name and return
/// that name.
fn fingerprint(source: &Path, derived_dir: &Path) -> Result<String, Box<dyn Error>> {
    let content = fs::read(source)?;
    let digest = format!("{:x}", Sha256::digest(&content));
    let short = digest.get(..FINGERPRINT_LEN).unwrap_or(&digest);

    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("main");
    let file_name = format!("{stem}.{short}.css");

    fs::create_dir_all(derived_dir)?;
    fs::write(derived_dir.join(&file_name), content)?;
    Ok(file_name)
}
