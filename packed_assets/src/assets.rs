use std::{
    collections::BTreeMap,
    fs,
    path::{Component, MAIN_SEPARATOR, Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use walkdir::WalkDir;

use crate::{Error, Result, decompress};

/// Where an [`Assets`] value reads its files from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Decompress the payloads compiled into the binary.
    #[default]
    Embedded,
    /// Read the original files from the filesystem on every call.
    Raw,
}

/// A set of compressed assets compiled into the binary.
///
/// Values are normally produced by generated code or by
/// [`include_assets!`](crate::include_assets) and stored in a `static`.
/// Lookups decompress on every call; nothing is cached.
///
/// The mode is per instance and can be flipped at any time with
/// [`Assets::set_mode`]. Each lookup reads the mode once, but a flip is not
/// ordered against lookups already running on other threads.
#[derive(Debug)]
pub struct Assets<'a> {
    entries: &'a [(&'a str, &'a [u8])],
    raw: AtomicBool,
}

impl<'a> Assets<'a> {
    /// Creates an accessor in [`Mode::Embedded`].
    ///
    /// `entries` must be sorted by path, as the generator emits them.
    #[must_use]
    pub const fn new(entries: &'a [(&'a str, &'a [u8])]) -> Self {
        Self::with_mode(entries, Mode::Embedded)
    }

    /// Creates an accessor starting in `mode`.
    #[must_use]
    pub const fn with_mode(entries: &'a [(&'a str, &'a [u8])], mode: Mode) -> Self {
        Self {
            entries,
            raw: AtomicBool::new(matches!(mode, Mode::Raw)),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.raw.load(Ordering::Relaxed) {
            Mode::Raw
        } else {
            Mode::Embedded
        }
    }

    /// Switches the mode for every later lookup, from any thread.
    pub fn set_mode(&self, mode: Mode) {
        self.raw.store(mode == Mode::Raw, Ordering::Relaxed);
    }

    /// Shorthand for `set_mode(Mode::Raw)` or `set_mode(Mode::Embedded)`.
    pub fn set_raw(&self, raw: bool) {
        self.set_mode(if raw { Mode::Raw } else { Mode::Embedded });
    }

    /// Returns the contents of the asset at `path`.
    ///
    /// # Errors
    /// In embedded mode, [`Error::NotFound`] for an unknown path and
    /// [`Error::Decompress`] for a corrupt payload. In raw mode, the
    /// filesystem error.
    pub fn get(&self, path: &str) -> Result<Vec<u8>> {
        match self.mode() {
            Mode::Embedded => self.get_embedded(path),
            Mode::Raw => self.get_raw(path),
        }
    }

    /// Returns every asset whose path starts with `dir`.
    ///
    /// # Errors
    /// The first failing entry aborts the whole call, see [`Assets::get`].
    pub fn get_dir(&self, dir: &str) -> Result<BTreeMap<String, Vec<u8>>> {
        match self.mode() {
            Mode::Embedded => self.get_embedded_dir(dir),
            Mode::Raw => self.get_raw_dir(dir),
        }
    }

    /// Decompresses the embedded asset at `path`, regardless of the mode.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no asset is stored under `path`, or
    /// [`Error::Decompress`] if its payload is corrupt.
    pub fn get_embedded(&self, path: &str) -> Result<Vec<u8>> {
        let payload = self.payload(path).ok_or_else(|| Error::NotFound(path.to_owned()))?;
        unpack(path, payload)
    }

    /// Decompresses every embedded asset whose path starts with `dir`.
    ///
    /// # Errors
    /// [`Error::Decompress`] for the first corrupt payload.
    pub fn get_embedded_dir(&self, dir: &str) -> Result<BTreeMap<String, Vec<u8>>> {
        // Paths sharing a prefix are contiguous once sorted.
        let start = self.entries.partition_point(|(path, _)| *path < dir);
        self.entries[start..]
            .iter()
            .take_while(|(path, _)| path.starts_with(dir))
            .map(|(path, payload)| unpack(path, payload).map(|body| ((*path).to_owned(), body)))
            .collect()
    }

    /// Reads `path` from the filesystem, regardless of the mode.
    ///
    /// # Errors
    /// Returns the filesystem error.
    pub fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    /// Reads every regular file under `dir` from the filesystem, regardless of
    /// the mode. Keys are the walked paths with `/` separators and no `.`
    /// segments; links are not followed.
    ///
    /// # Errors
    /// Returns the first filesystem error.
    pub fn get_raw_dir(&self, dir: impl AsRef<Path>) -> Result<BTreeMap<String, Vec<u8>>> {
        let mut files = BTreeMap::new();
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            files.insert(key(path)?, fs::read(path)?);
        }
        Ok(files)
    }

    /// Returns `true` if an asset is embedded under `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.payload(path).is_some()
    }

    /// The embedded asset paths, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(path, _)| *path)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn payload(&self, path: &str) -> Option<&'a [u8]> {
        self.entries
            .binary_search_by(|(probe, _)| (*probe).cmp(path))
            .ok()
            .map(|idx| self.entries[idx].1)
    }
}

/// Filesystem path to key. Must agree with `packed_assets_codegen::path::path_key`
/// or raw and embedded lookups stop lining up.
fn key(path: &Path) -> Result<String> {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        return Ok(".".to_owned());
    }
    let key = cleaned
        .to_str()
        .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;
    if MAIN_SEPARATOR == '/' {
        Ok(key.to_owned())
    } else {
        Ok(key.replace(MAIN_SEPARATOR, "/"))
    }
}

fn unpack(path: &str, payload: &[u8]) -> Result<Vec<u8>> {
    decompress(payload).map_err(|source| Error::Decompress {
        path: path.to_owned(),
        source,
    })
}
