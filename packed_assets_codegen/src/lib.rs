//! Asset collection and source generation for `packed_assets`.
//!
//! This crate does the build-time half of the work: it walks asset roots,
//! compresses every regular file with `zstd`, merges the results into one
//! [`AssetMap`] and renders the Rust source that embeds it.
//!
//! It is usually reached through `packed_assets` with the `build` feature
//! enabled (from a `build.rs` script), through the `include_assets!` macro,
//! or through the `packed-assets` command-line tool.
//!
//! ```no_run
//! use packed_assets_codegen::Generator;
//!
//! let generated = Generator::new()
//!     .output_prefix("src/assets")
//!     .strip_prefix("web/")
//!     .generate(&["web/templates", "web/static"])
//!     .expect("failed to generate assets");
//!
//! for file in generated.files() {
//!     std::fs::write(&file.path, &file.body).expect("failed to write asset source");
//! }
//! ```

use std::{collections::BTreeMap, path::PathBuf};

pub mod collect;
mod config;
pub mod generate;
pub mod path;
pub mod render;

pub use collect::{DEFAULT_COMPRESSION_LEVEL, collect, compress};
pub use config::Config;
pub use generate::{
    DEFAULT_OUTPUT_PREFIX, Generated, GeneratedFile, Generator, collect_all, infer_package_name,
    merge,
};
pub use path::logical_path;

/// Logical asset path mapped to its compressed payload.
///
/// Empty files map to an empty payload. The map is sorted so that generated
/// output is reproducible for the same inputs.
pub type AssetMap = BTreeMap<String, Vec<u8>>;

/// A specialized `Result` type for asset generation.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while collecting assets or generating source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no file paths to assets")]
    NoPaths,
    #[error("no assets found under the given paths")]
    NoAssets,
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("failed to walk asset directory")]
    Walk(#[from] walkdir::Error),
    #[error("failed to read '{}'", .0.display())]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to compress '{}'", .0.display())]
    Compress(PathBuf, #[source] std::io::Error),
    #[error("path '{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("Path '{0}' not found (current directory is '{1}')")]
    PathNotFound(String, String),
    #[error("Environment variable '{0}' not set by Cargo")]
    Var(&'static str),
}
