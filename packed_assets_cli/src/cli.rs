//! Command-line interface definitions.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use packed_assets_codegen::{DEFAULT_COMPRESSION_LEVEL, DEFAULT_OUTPUT_PREFIX, Generator};

/// Generate Rust source embedding compressed asset files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Package name recorded in the generated files (default: name of the output directory)
    #[arg(short, long, default_value = "")]
    pub package: String,

    /// Path prefix of the generated files, writes <OUT>.rs and <OUT>_test.rs
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PREFIX)]
    pub out: String,

    /// Prefix stripped from the front of every asset path
    #[arg(short, long, default_value = "")]
    pub strip: String,

    /// Export the accessors with `pub` instead of `pub(crate)`
    #[arg(long)]
    pub public: bool,

    /// zstd compression level (1-21)
    #[arg(short, long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    pub level: i32,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Files or directories to embed; later paths win when asset paths collide
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Generates both files and writes them next to each other.
pub fn run(cli: &Cli, command: &str) -> Result<()> {
    let generated = Generator::new()
        .package(&cli.package)
        .output_prefix(&cli.out)
        .strip_prefix(&cli.strip)
        .public(cli.public)
        .level(cli.level)
        .command(command)
        .generate(&cli.paths)
        .context("Failed to generate assets")?;

    for file in generated.files() {
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&file.path, &file.body)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        tracing::info!("wrote {}", file.path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["packed-assets", "templates"]).unwrap();
        assert_eq!(cli.out, "assets");
        assert_eq!(cli.package, "");
        assert_eq!(cli.strip, "");
        assert_eq!(cli.level, DEFAULT_COMPRESSION_LEVEL);
        assert!(!cli.public);
        assert_eq!(cli.paths, [PathBuf::from("templates")]);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "packed-assets",
            "-o",
            "src/web/assets",
            "--strip",
            "web/",
            "--public",
            "-l",
            "19",
            "web/templates",
            "web/static",
        ])
        .unwrap();
        assert_eq!(cli.out, "src/web/assets");
        assert_eq!(cli.strip, "web/");
        assert!(cli.public);
        assert_eq!(cli.level, 19);
        assert_eq!(cli.paths.len(), 2);
    }

    #[test]
    fn test_parse_requires_paths() {
        assert!(Cli::try_parse_from(["packed-assets", "--public"]).is_err());
    }

    #[test]
    fn test_run_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("hello"), "Hello world!\n").unwrap();
        let out = dir.path().join("gen").join("assets");

        let cli = Cli::try_parse_from([
            "packed-assets",
            "--out",
            out.to_str().unwrap(),
            templates.to_str().unwrap(),
        ])
        .unwrap();
        run(&cli, "packed-assets --out gen/assets templates").unwrap();

        let main = fs::read_to_string(dir.path().join("gen").join("assets.rs")).unwrap();
        assert!(main.contains("// Package: gen\n"));
        assert!(main.contains("// Command: packed-assets --out gen/assets templates\n"));
        assert!(dir.path().join("gen").join("assets_test.rs").is_file());
    }

    #[test]
    fn test_run_without_assets_fails() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("assets");
        let cli = Cli::try_parse_from([
            "packed-assets",
            "--out",
            out.to_str().unwrap(),
            dir.path().to_str().unwrap(),
        ])
        .unwrap();

        assert!(run(&cli, "packed-assets").is_err());
        assert!(!dir.path().join("assets.rs").exists());
    }
}
