//! Build-script helper.
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{Error, Result, collect::DEFAULT_COMPRESSION_LEVEL, generate::Generator};

/// A builder for generating embedded assets from a `build.rs` script.
///
/// The generated files are written to `OUT_DIR` and pulled into the crate
/// with `include!`.
///
/// # Example
/// ```no_run
/// // in build.rs
/// packed_assets_codegen::Config::new(["assets"])
///   .level(10)
///   .build()
///   .expect("Failed to pack assets");
/// ```
///
/// ```ignore
/// // in src/main.rs
/// mod assets {
///     include!(concat!(env!("OUT_DIR"), "/assets.rs"));
/// }
/// ```
#[derive(Debug)]
pub struct Config {
    paths: Vec<PathBuf>,
    package: Option<String>,
    output: String,
    strip_prefix: String,
    public: bool,
    level: i32,
    out_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new configuration for the given asset roots.
    ///
    /// Each root can be a single file or a directory and should be relative
    /// to the crate root (`CARGO_MANIFEST_DIR`). Later roots win when two
    /// roots produce the same asset path.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            package: None,
            output: String::new(),
            strip_prefix: String::new(),
            public: false,
            level: DEFAULT_COMPRESSION_LEVEL,
            out_dir: None,
        }
    }

    /// Sets the prefix removed from every asset path to form its key.
    #[must_use]
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = prefix.into();
        self
    }

    /// Sets the zstd compression level (1-21).
    ///
    /// Higher levels provide better compression at the cost of slower build times.
    /// If not set, a default level of `6` is used.
    #[must_use]
    pub const fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Makes the generated accessors `pub` instead of `pub(crate)`.
    #[must_use]
    pub const fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Sets the package name recorded in the generated source.
    ///
    /// Defaults to `CARGO_PKG_NAME`.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Sets the file name prefix of the generated files inside the output
    /// directory. Defaults to `assets`.
    #[must_use]
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Writes the generated files to `dir` instead of `OUT_DIR`.
    #[must_use]
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Runs the generator and writes both files into the output directory.
    ///
    /// This is the final method that should be called in the builder chain.
    /// Cargo is told to rerun the build script whenever an asset root changes.
    ///
    /// # Errors
    /// Returns an [`Error`] if a root does not exist, if `OUT_DIR` is not set,
    /// or if collecting, generating or writing fails.
    pub fn build(self) -> Result<()> {
        for path in &self.paths {
            let canonical_path = path.canonicalize().map_err(|_| {
                Error::PathNotFound(
                    path.display().to_string(),
                    env::current_dir()
                        .map_or_else(|_| "unknown".into(), |p| p.display().to_string()),
                )
            })?;
            println!("cargo:rerun-if-changed={}", canonical_path.display());
        }

        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => env::var("OUT_DIR")
                .map(PathBuf::from)
                .map_err(|_| Error::Var("OUT_DIR"))?,
        };
        let package = match self.package {
            Some(package) => package,
            None => env::var("CARGO_PKG_NAME").map_err(|_| Error::Var("CARGO_PKG_NAME"))?,
        };

        let prefix = out_dir.join(if self.output.is_empty() {
            crate::DEFAULT_OUTPUT_PREFIX
        } else {
            self.output.as_str()
        });
        let prefix = crate::path::path_key(&prefix)?;

        let generated = Generator::new()
            .package(package)
            .output_prefix(prefix)
            .strip_prefix(self.strip_prefix)
            .public(self.public)
            .level(self.level)
            .generate(&self.paths)?;

        fs::create_dir_all(&out_dir)?;
        for file in generated.files() {
            fs::write(&file.path, &file.body)?;
            tracing::debug!(path = %file.path.display(), "wrote generated assets");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("hello"), "Hello world!\n").unwrap();
        let out = dir.path().join("out");

        Config::new([&assets])
            .package("demo")
            .output("embedded")
            .out_dir(&out)
            .build()
            .unwrap();

        let main = fs::read_to_string(out.join("embedded.rs")).unwrap();
        assert!(main.contains("// Package: demo"));
        assert!(out.join("embedded_test.rs").is_file());
    }

    #[test]
    fn test_build_missing_root_fails() {
        let dir = TempDir::new().unwrap();

        let result = Config::new([dir.path().join("missing")])
            .package("demo")
            .out_dir(dir.path())
            .build();
        assert!(matches!(result, Err(Error::PathNotFound(..))));
    }
}
