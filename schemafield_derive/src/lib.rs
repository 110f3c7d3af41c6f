use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, LitStr, parse_macro_input};

/// Implements `schemafield::Record`.
///
/// The importable path defaults to `module_path!()::TypeName`; override it
/// with `#[record(path = "crate::module::TypeName")]` when the type is
/// re-exported elsewhere.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.generics,
            "Record does not support generic types",
        ));
    }

    // Records are stored as JSON mappings.
    if !matches!(input.data, Data::Struct(_)) {
        return Err(syn::Error::new(
            ident.span(),
            "Record can only be derived for structs",
        ));
    }

    let options = parse_record_options(&input.attrs)?;
    let path = match options.path {
        Some(path) => quote!(#path),
        None => quote!(::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident))),
    };

    Ok(quote! {
        impl ::schemafield::Record for #ident {
            const PATH: &'static str = #path;
        }
    })
}

struct RecordOptions {
    path: Option<String>,
}

fn parse_record_options(attrs: &[syn::Attribute]) -> syn::Result<RecordOptions> {
    let mut options = RecordOptions { path: None };

    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                let value = meta.value()?;
                let lit: LitStr = value.parse()?;
                let path = lit.value();
                if !is_qualified_path(&path) {
                    return Err(meta.error("record path must look like `module::TypeName`"));
                }
                options.path = Some(path);
                return Ok(());
            }

            Err(meta.error("Unsupported record attribute. Supported: path = \"...\""))
        })?;
    }

    Ok(options)
}

fn is_qualified_path(path: &str) -> bool {
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
                && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        })
}
