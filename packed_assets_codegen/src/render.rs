//! Rendering an [`AssetMap`] as Rust source.
//!
//! Generated files contain only outer items and plain `//` comments, so they
//! can be mounted either as a module file or with `include!`.
use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::AssetMap;

/// Expands to an `Assets::new(&[...])` expression over `assets`.
///
/// `krate` is the path the `packed_assets` crate is reachable under at the
/// expansion site. The expression is a constant and may initialize a
/// `static`.
#[must_use]
pub fn assets_expr(krate: &TokenStream, assets: &AssetMap) -> TokenStream {
    let entries = assets.iter().map(|(path, payload)| entry(path, payload));
    quote! {
        #krate::Assets::new(&[#(#entries),*])
    }
}

fn entry(path: &str, payload: &[u8]) -> TokenStream {
    let payload = Literal::byte_string(payload);
    quote! { (#path, #payload) }
}

pub(crate) struct Template<'a> {
    pub package: &'a str,
    pub command: Option<&'a str>,
    pub public: bool,
    pub assets: &'a AssetMap,
    pub sample: (&'a str, &'a [u8]),
    /// The sample key is also its path on disk, nothing was stripped from it.
    pub sample_on_disk: bool,
    pub dirs: &'a [String],
}

impl Template<'_> {
    fn header(&self) -> String {
        let mut header = format!(
            "// Code generated by packed_assets_codegen v{}. DO NOT EDIT.\n// Package: {}\n",
            env!("CARGO_PKG_VERSION"),
            self.package
        );
        if let Some(command) = self.command {
            header.push_str(&format!("// Command: {command}\n"));
        }
        header.push('\n');
        header
    }

    fn visibility(&self) -> TokenStream {
        if self.public {
            quote!(pub)
        } else {
            quote!(pub(crate))
        }
    }

    /// The source file embedding the assets.
    pub fn main(&self) -> String {
        let krate = quote!(::packed_assets);
        let vis = self.visibility();

        let mut out = self.header();
        out.push_str(&format!(
            "/// Assets embedded for the `{}` package.\n{vis} static ASSETS: {krate}::Assets<'static> = {krate}::Assets::new(&[\n",
            self.package
        ));
        for (path, payload) in self.assets {
            out.push_str(&format!("    {},\n", entry(path, payload)));
        }
        out.push_str("]);\n\n");

        let accessors = [
            quote! {
                /// Returns the asset stored under `path`, decompressed, or the file at
                /// `path` when raw assets are enabled.
                #[allow(dead_code)]
                #vis fn asset(path: &str) -> #krate::Result<::std::vec::Vec<u8>> {
                    ASSETS.get(path)
                }
            },
            quote! {
                /// Returns every asset whose path starts with `dir`, or the files under
                /// `dir` when raw assets are enabled.
                #[allow(dead_code)]
                #vis fn asset_dir(
                    dir: &str,
                ) -> #krate::Result<::std::collections::BTreeMap<::std::string::String, ::std::vec::Vec<u8>>> {
                    ASSETS.get_dir(dir)
                }
            },
            quote! {
                /// Switches between the embedded assets and the files on disk.
                #[allow(dead_code)]
                #vis fn set_raw_assets(raw: bool) {
                    ASSETS.set_raw(raw);
                }
            },
        ];
        for item in accessors {
            out.push_str(&item.to_string());
            out.push_str("\n\n");
        }
        out
    }

    /// The companion test module, meant to be mounted as a child of the main file.
    pub fn test(&self) -> String {
        let krate = quote!(::packed_assets);
        let (sample_path, sample_body) = self.sample;
        let sample_body = Literal::byte_string(sample_body);
        let count = self.assets.len();
        let dirs = self.dirs;

        let mut missing = format!("{sample_path}.missing");
        while self.assets.contains_key(&missing) {
            missing.push_str(".missing");
        }

        let items = [
            quote! { use super::*; },
            quote! {
                const SAMPLE_PATH: &str = #sample_path;
                const SAMPLE_BODY: &[u8] = #sample_body;
                const DIRS: &[&str] = &[#(#dirs),*];
            },
            quote! {
                #[test]
                fn embedded_sample_lookup_returns_packed_body() {
                    let body = ASSETS.get_embedded(SAMPLE_PATH).expect("sample asset is embedded");
                    let expected = #krate::decompress(SAMPLE_BODY).expect("sample body decompresses");
                    assert_eq!(body, expected);
                }
            },
            quote! {
                #[test]
                fn embedded_paths_are_sorted() {
                    assert!(ASSETS.paths().is_sorted());
                }
            },
            quote! {
                #[test]
                fn embedded_dir_holds_every_asset() {
                    let assets = ASSETS.get_embedded_dir("").expect("embedded assets decompress");
                    assert_eq!(assets.len(), #count);
                }
            },
            quote! {
                #[test]
                fn missing_asset_is_not_found() {
                    let err = ASSETS.get_embedded(#missing).unwrap_err();
                    assert!(err.is_not_found());
                }
            },
            quote! {
                #[test]
                fn raw_dirs_are_readable() {
                    for dir in DIRS {
                        ASSETS.get_raw_dir(dir).expect("asset root is readable");
                    }
                }
            },
        ];

        let mut out = self.header();
        let on_disk = self.sample_on_disk.then(|| {
            quote! {
                #[test]
                fn embedded_sample_matches_file_on_disk() {
                    let embedded = ASSETS.get_embedded(SAMPLE_PATH).expect("sample asset is embedded");
                    let raw = ASSETS.get_raw(SAMPLE_PATH).expect("sample file is readable");
                    assert_eq!(embedded, raw);
                }
            }
        });
        for item in items.into_iter().chain(on_disk) {
            out.push_str(&item.to_string());
            out.push_str("\n\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> AssetMap {
        AssetMap::from([
            ("templates/empty_file".to_owned(), Vec::new()),
            ("templates/hello".to_owned(), vec![0x28, 0xb5, 0x2f, 0xfd]),
        ])
    }

    fn template<'a>(assets: &'a AssetMap, dirs: &'a [String]) -> Template<'a> {
        Template {
            package: "web",
            command: Some("packed-assets --out src/web/assets templates"),
            public: true,
            assets,
            sample: ("templates/empty_file", &[]),
            sample_on_disk: false,
            dirs,
        }
    }

    #[test]
    fn test_main_embeds_every_entry() {
        let assets = assets();
        let dirs = ["templates".to_owned()];
        let main = template(&assets, &dirs).main();

        assert!(main.starts_with("// Code generated by packed_assets_codegen v"));
        assert!(main.contains("// Package: web\n"));
        assert!(main.contains("// Command: packed-assets --out src/web/assets templates\n"));
        assert!(main.contains("(\"templates/empty_file\" , b\"\")"));
        assert!(main.contains("(\"templates/hello\" , b\"("));
        assert!(main.contains("pub static ASSETS"));
        assert!(main.contains("fn set_raw_assets"));
        assert!(!main.contains("#!["));
    }

    #[test]
    fn test_test_file_uses_sample() {
        let assets = assets();
        let dirs = ["templates".to_owned()];
        let test = template(&assets, &dirs).test();

        assert!(test.contains("const SAMPLE_PATH : & str = \"templates/empty_file\""));
        assert!(test.contains("\"templates/empty_file.missing\""));
        assert!(test.contains("assert_eq ! (assets . len () , 2usize)"));
        assert!(test.contains("& [\"templates\"]"));
    }

    #[test]
    fn test_test_file_checks_sort_order() {
        let assets = assets();
        let test = template(&assets, &[]).test();

        assert!(test.contains("fn embedded_paths_are_sorted"));
        assert!(test.contains("ASSETS . paths () . is_sorted ()"));
    }

    #[test]
    fn test_disk_comparison_only_for_unstripped_sample() {
        let assets = assets();
        let stripped = template(&assets, &[]).test();
        assert!(!stripped.contains("fn embedded_sample_matches_file_on_disk"));

        let unstripped = Template {
            sample_on_disk: true,
            ..template(&assets, &[])
        }
        .test();
        assert!(unstripped.contains("fn embedded_sample_matches_file_on_disk"));
        assert!(unstripped.contains("ASSETS . get_raw (SAMPLE_PATH)"));
    }

    #[test]
    fn test_missing_key_avoids_real_assets() {
        let mut assets = assets();
        assets.insert("templates/empty_file.missing".to_owned(), Vec::new());
        let dirs = [];
        let test = template(&assets, &dirs).test();

        assert!(test.contains("\"templates/empty_file.missing.missing\""));
    }

    #[test]
    fn test_assets_expr_uses_crate_path() {
        let expr = assets_expr(&quote!(crate), &assets()).to_string();
        assert!(expr.starts_with("crate :: Assets :: new (& ["));
    }
}
