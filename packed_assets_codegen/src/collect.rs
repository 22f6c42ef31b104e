//! Walking an asset root into an [`AssetMap`].
use std::{fs, io, path::Path};

use walkdir::WalkDir;

use crate::{
    AssetMap, Error, Result,
    path::{logical_path, path_key},
};

/// The default zstd compression level used by [`collect`].
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 6;

/// Reads every regular file under `root` into memory as compressed data.
///
/// Keys are the walked paths with `strip_prefix` removed (see
/// [`logical_path`]). Directories are descended into but never stored, and
/// anything that is not a regular file (symlinks, sockets, devices) is
/// skipped. A `root` that is itself a regular file yields a single asset.
///
/// # Errors
/// Any failure to list a directory or read a file aborts the whole walk; no
/// partial map is returned.
pub fn collect(root: impl AsRef<Path>, strip_prefix: &str, level: i32) -> Result<AssetMap> {
    let root = root.as_ref();
    let mut assets = AssetMap::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let key = path_key(path)?;
        let content = fs::read(path).map_err(|e| Error::Read(path.to_path_buf(), e))?;
        let payload = compress(&content, level).map_err(|e| Error::Compress(path.to_path_buf(), e))?;

        tracing::trace!(
            path = %path.display(),
            size = content.len(),
            packed = payload.len(),
            "packed asset"
        );
        assets.insert(logical_path(&key, strip_prefix).to_owned(), payload);
    }

    tracing::debug!(root = %root.display(), assets = assets.len(), "collected assets");
    Ok(assets)
}

/// Compresses one file's contents with a single zstd stream.
///
/// Empty input is returned as an empty payload without running the encoder,
/// which `packed_assets::decompress` reads back as empty content.
///
/// # Errors
/// Returns the encoder's error if compression fails.
pub fn compress(content: &[u8], level: i32) -> io::Result<Vec<u8>> {
    if content.is_empty() {
        return Ok(Vec::new());
    }
    zstd::encode_all(content, level)
}
