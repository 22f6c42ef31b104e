//! Embed directories of static files into your binary, compressed, with a
//! switch to read them from disk instead.
//!
//! Assets are collected once at build time: every regular file under the
//! given roots is compressed with `zstd` and written into generated Rust
//! source as a sorted table of `(path, payload)` pairs. At runtime an
//! [`Assets`] value serves lookups from that table, decompressing on each
//! call, or, after [`Assets::set_raw`], re-reads the original files from the
//! filesystem so assets can be edited without rebuilding.
//!
//! ## How It Works
//!
//! There are three ways to produce the table:
//!
//! 1.  **Build Script:** With the `build` feature, [`Config`] runs the
//!     generator from `build.rs` and writes `assets.rs` (plus a companion
//!     `assets_test.rs`) into `OUT_DIR`.
//! 2.  **Macro:** [`include_assets!`] runs the same collector at macro
//!     expansion time and expands to an [`Assets`] constant.
//! 3.  **Command Line:** the `packed-assets` tool from `packed_assets_cli`
//!     writes the two files into your source tree.
//!
//! ## Usage
//!
//! 1. Add `packed_assets` to your `Cargo.toml`. The `build` feature is required for
//!    build-dependencies.
//!
//! ```toml
//! [dependencies]
//! packed_assets = "0.1.0"
//!
//! [build-dependencies]
//! packed_assets = { version = "0.1.0", features = ["build"] }
//! ```
//!
//! 2. Create a `build.rs` file in your project root to generate the assets.
//!
//! ```ignore
//! // build.rs
//! packed_assets::Config::new(["templates"])
//!   .level(10) // Set a custom zstd compression level (optional)
//!   .build()
//!   .expect("Failed to pack assets");
//! ```
//!
//! 3. Include the generated module and read assets through it.
//!
//! ```ignore
//! // src/main.rs
//! mod assets {
//!     include!(concat!(env!("OUT_DIR"), "/assets.rs"));
//! }
//!
//! let hello = assets::asset("templates/hello")?;
//! assets::set_raw_assets(true); // serve from disk from now on
//! let hello_on_disk = assets::asset("templates/hello")?;
//! ```
//!
//! Or skip the build script entirely:
//!
//! ```ignore
//! use packed_assets::{Assets, include_assets};
//!
//! static TEMPLATES: Assets<'static> = include_assets!("templates", strip = "templates/");
//! let hello: Vec<u8> = TEMPLATES.get("hello")?;
//! ```

#![doc(html_root_url = "https://docs.rs/packed_assets/0.1.0")]

use std::io;

mod assets;
mod error;

pub use assets::{Assets, Mode};
pub use error::{Error, Result};
// Re-export the procedural macro.
pub use packed_assets_macros::include_assets;

#[cfg(feature = "build")]
pub use packed_assets_codegen as build;
#[cfg(feature = "build")]
pub use packed_assets_codegen::Config;

/// Decompresses one payload produced by the asset collector.
///
/// An empty payload stands for an empty file and decompresses to empty
/// content without touching the decoder.
///
/// # Errors
/// Returns the decoder's error if `payload` is not valid zstd data.
pub fn decompress(payload: &[u8]) -> io::Result<Vec<u8>> {
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    zstd::decode_all(payload)
}
