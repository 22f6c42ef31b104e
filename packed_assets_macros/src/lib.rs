//! Procedural macro implementation for the `packed_assets` crate. Do not use directly.
use std::{env, error::Error as _, path::PathBuf};

use packed_assets_codegen::{
    AssetMap, DEFAULT_COMPRESSION_LEVEL, collect, logical_path, path::path_key,
    render::assets_expr,
};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Ident, LitInt, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Embeds a directory of compressed assets at compile time.
///
/// The first argument is a string literal naming a file or directory relative
/// to the crate root (`CARGO_MANIFEST_DIR`). Every regular file below it is
/// compressed with `zstd` and embedded. Asset paths are relative to the crate
/// root, with the optional `strip` prefix removed:
///
/// ```ignore
/// use packed_assets::{Assets, include_assets};
///
/// static TEMPLATES: Assets<'static> = include_assets!("templates", strip = "templates/", level = 10);
///
/// let hello = TEMPLATES.get("hello")?;
/// ```
///
/// It expands to a constant expression of type `packed_assets::Assets`, so it
/// can initialize a `static`.
///
/// # Rebuilds
///
/// Every embedded file is referenced through `include_bytes!` so Cargo rebuilds
/// when one of them changes. Files added to the directory later are not seen
/// until something else triggers a rebuild.
///
/// # Panics
///
/// This macro will cause a compilation failure if:
/// - The specified path does not exist or cannot be read.
/// - No regular file is found under it.
/// - The arguments are malformed.
#[proc_macro]
pub fn include_assets(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as Args);
    expand(&args)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `"path" [, strip = "prefix"] [, level = N]`
struct Args {
    path: LitStr,
    strip: Option<LitStr>,
    level: Option<LitInt>,
}

impl Parse for Args {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self {
            path: input.parse()?,
            strip: None,
            level: None,
        };

        while input.parse::<Option<Token![,]>>()?.is_some() {
            if input.is_empty() {
                break;
            }
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "strip" => args.strip = Some(input.parse()?),
                "level" => args.level = Some(input.parse()?),
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "include_assets: expected `strip` or `level`",
                    ));
                }
            }
        }
        if !input.is_empty() {
            return Err(input.error("include_assets: expected `,`"));
        }
        Ok(args)
    }
}

fn expand(args: &Args) -> syn::Result<TokenStream2> {
    use proc_macro_crate::{FoundCrate, crate_name};

    let span = args.path.span();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .map_err(|_| {
            syn::Error::new(
                span,
                "CARGO_MANIFEST_DIR is not set; this macro must be run by Cargo.",
            )
        })?;
    let root = manifest_dir.join(args.path.value());
    let level = match &args.level {
        Some(level) => level.base10_parse::<i32>()?,
        None => DEFAULT_COMPRESSION_LEVEL,
    };
    let strip = args.strip.as_ref().map(LitStr::value).unwrap_or_default();

    let fail = |err: packed_assets_codegen::Error| {
        let mut msg = format!("include_assets: could not pack '{}': {err}", root.display());
        let mut source = err.source();
        while let Some(cause) = source {
            msg.push_str(&format!(": {cause}"));
            source = cause.source();
        }
        syn::Error::new(span, msg)
    };

    let base = format!("{}/", path_key(&manifest_dir).map_err(&fail)?);
    let collected = collect(&root, &base, level).map_err(&fail)?;
    if collected.is_empty() {
        return Err(syn::Error::new(
            span,
            format!("include_assets: no files found under '{}'", root.display()),
        ));
    }

    let mut tracked = Vec::with_capacity(collected.len());
    let assets: AssetMap = collected
        .into_iter()
        .map(|(key, payload)| {
            tracked.push(manifest_dir.join(&key).display().to_string());
            (logical_path(&key, &strip).to_owned(), payload)
        })
        .collect();

    let krate = match crate_name("packed_assets") {
        Ok(FoundCrate::Name(name)) => {
            let name = Ident::new(&name, Span::call_site());
            quote!(::#name)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::packed_assets), // Fallback
    };
    let expr = assets_expr(&krate, &assets);

    Ok(quote! {
        {
            #(const _: &[u8] = include_bytes!(#tracked);)*
            #expr
        }
    })
}
