//! Merging asset roots and producing the generated source files.
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    AssetMap, Error, Result,
    collect::{DEFAULT_COMPRESSION_LEVEL, collect},
    render::Template,
};

/// The output path prefix used when none is configured.
pub const DEFAULT_OUTPUT_PREFIX: &str = "assets";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub body: Vec<u8>,
}

/// The two files produced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The source file embedding the assets.
    pub main: GeneratedFile,
    /// A companion test module for the embedded assets.
    pub test: GeneratedFile,
}

impl Generated {
    /// Both files, main source first.
    #[must_use]
    pub const fn files(&self) -> [&GeneratedFile; 2] {
        [&self.main, &self.test]
    }
}

/// A builder for generating a source file with embedded assets.
///
/// # Example
/// ```no_run
/// let generated = packed_assets_codegen::Generator::new()
///     .package("web")
///     .output_prefix("src/web/assets")
///     .public(true)
///     .generate(&["templates"])
///     .expect("Failed to generate assets");
/// assert_eq!(generated.main.path, std::path::Path::new("src/web/assets.rs"));
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    package: String,
    output_prefix: String,
    strip_prefix: String,
    public: bool,
    level: i32,
    command: Option<String>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator writing to `assets.rs` with crate-private accessors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            package: String::new(),
            output_prefix: String::new(),
            strip_prefix: String::new(),
            public: false,
            level: DEFAULT_COMPRESSION_LEVEL,
            command: None,
        }
    }

    /// Sets the package name recorded in the generated source.
    ///
    /// When left empty it is inferred from the output directory, see
    /// [`infer_package_name`].
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the path prefix of the generated files.
    ///
    /// `src/assets` produces `src/assets.rs` and `src/assets_test.rs`. An empty
    /// prefix means [`DEFAULT_OUTPUT_PREFIX`].
    #[must_use]
    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Sets the prefix removed from every asset path to form its key.
    #[must_use]
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = prefix.into();
        self
    }

    /// Makes the generated accessors `pub` instead of `pub(crate)`.
    #[must_use]
    pub const fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Sets the zstd compression level (1-21).
    ///
    /// If not set, [`DEFAULT_COMPRESSION_LEVEL`] is used.
    #[must_use]
    pub const fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Records the command line that produced the files in their header.
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// The output prefix with the default applied.
    #[must_use]
    pub fn resolved_output_prefix(&self) -> &str {
        if self.output_prefix.is_empty() {
            DEFAULT_OUTPUT_PREFIX
        } else {
            &self.output_prefix
        }
    }

    /// The package name with inference applied.
    #[must_use]
    pub fn resolved_package(&self) -> String {
        if self.package.is_empty() {
            infer_package_name(self.resolved_output_prefix())
        } else {
            self.package.clone()
        }
    }

    /// Reads, compresses and embeds the assets under `paths`.
    ///
    /// Roots are collected in order and merged; when two roots produce the
    /// same key the later root wins.
    ///
    /// # Errors
    /// Returns [`Error::NoPaths`] for an empty `paths`, [`Error::NoAssets`]
    /// when no regular file was found, and any collection error unchanged.
    pub fn generate<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Generated> {
        let assets = collect_all(paths, &self.strip_prefix, self.level)?;
        // Smallest key, so the test file is the same on every run.
        let Some((sample_path, sample_body)) = assets.first_key_value() else {
            return Err(Error::NoAssets);
        };

        let package = self.resolved_package();
        let dirs = paths
            .iter()
            .map(|p| crate::path::path_key(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let template = Template {
            package: &package,
            command: self.command.as_deref(),
            public: self.public,
            assets: &assets,
            sample: (sample_path.as_str(), sample_body.as_slice()),
            sample_on_disk: self.strip_prefix.is_empty(),
            dirs: &dirs,
        };

        let prefix = self.resolved_output_prefix();
        let main = GeneratedFile {
            path: PathBuf::from(format!("{prefix}.rs")),
            body: template.main().into_bytes(),
        };
        let test = GeneratedFile {
            path: PathBuf::from(format!("{prefix}_test.rs")),
            body: template.test().into_bytes(),
        };
        tracing::debug!(
            package = %package,
            assets = assets.len(),
            main = %main.path.display(),
            "generated asset source"
        );

        Ok(Generated { main, test })
    }
}

/// Collects every root in order and merges the results, last root winning.
///
/// # Errors
/// Returns [`Error::NoPaths`] for an empty `paths`; the first collection
/// error aborts the merge.
pub fn collect_all<P: AsRef<Path>>(paths: &[P], strip_prefix: &str, level: i32) -> Result<AssetMap> {
    if paths.is_empty() {
        return Err(Error::NoPaths);
    }

    let maps = paths
        .iter()
        .map(|path| collect(path, strip_prefix, level))
        .collect::<Result<Vec<_>>>()?;
    Ok(merge(maps))
}

/// Merges collected maps in order; a key present in several maps keeps the
/// payload from the last one.
#[must_use]
pub fn merge(maps: impl IntoIterator<Item = AssetMap>) -> AssetMap {
    maps.into_iter().fold(AssetMap::new(), |mut merged, map| {
        merged.extend(map);
        merged
    })
}

/// Guesses a package name from the directory an output prefix lives in.
///
/// `src/web/assets` gives `web`. A prefix without a directory falls back to
/// the current directory's name. The result is turned into a valid
/// identifier; `assets` is used when nothing usable is left.
#[must_use]
pub fn infer_package_name(output_prefix: &str) -> String {
    let parent = Path::new(output_prefix)
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && *p != Path::new("."))
        .map(Path::to_path_buf);
    let dir = parent.or_else(|| env::current_dir().ok());
    let name = dir
        .as_deref()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if ident.trim_matches('_').is_empty() {
        DEFAULT_OUTPUT_PREFIX.to_owned()
    } else {
        ident
    }
}
