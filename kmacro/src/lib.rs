//! Macro definitions for kernel module functions.
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Ident, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Attribute macro to mark the initialization function of a kernel module. It
/// places the function in the `.text.init` section and exports it to the host
/// as `init_module`.
///
/// The function returns `0` on success or a negative errno.
/// # Example:
/// ```ignore
/// #[init_fn]
/// fn init() -> i32 { ... }
/// ```
#[proc_macro_attribute]
pub fn init_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as syn::ItemFn);
    let func_name = &func.sig.ident;
    quote! {
        pub unsafe extern "C" fn init_module() -> core::ffi::c_int {
            #func_name() as core::ffi::c_int
        }
        #[unsafe(link_section = ".text.init")]
        #func
    }
    .into()
}

/// Attribute macro to mark the cleanup function of a kernel module. It places
/// the function in the `.text.exit` section and exports it to the host as
/// `cleanup_module`.
/// # Example:
/// ```ignore
/// #[exit_fn]
/// fn cleanup() { ... }
/// ```
#[proc_macro_attribute]
pub fn exit_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as syn::ItemFn);
    let func_name = &func.sig.ident;
    quote! {
        pub unsafe extern "C" fn cleanup_module() {
            #func_name()
        }
        #[unsafe(link_section = ".text.exit")]
        #func
    }
    .into()
}

/// Attribute macro for host functions that modules call by symbol name.
///
/// The function keeps its Rust path and is additionally exported unmangled,
/// so a module's `unsafe extern "C"` declaration links against it.
#[proc_macro_attribute]
pub fn capi_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as syn::ItemFn);
    if func.sig.abi.is_none() {
        return syn::Error::new_spanned(&func.sig, "capi_fn requires an `extern \"C\"` function")
            .to_compile_error()
            .into();
    }
    quote! {
        #[unsafe(no_mangle)]
        #func
    }
    .into()
}

#[derive(Default)]
struct ModuleArgs {
    name: Option<LitStr>,
    version: Option<LitStr>,
    license: Option<LitStr>,
    description: Option<LitStr>,
    author: Option<LitStr>,
}

impl Parse for ModuleArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ModuleArgs::default();
        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![:]>()?;
            let value: LitStr = input.parse()?;

            let slot = match key.to_string().as_str() {
                "name" => &mut args.name,
                "version" => &mut args.version,
                "license" => &mut args.license,
                "description" => &mut args.description,
                "author" => &mut args.author,
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("Unknown field: {}", key),
                    ));
                }
            };
            if slot.replace(value).is_some() {
                return Err(syn::Error::new(
                    key.span(),
                    format!("Duplicate field: {}", key),
                ));
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        let required = [
            ("name", &args.name),
            ("version", &args.version),
            ("license", &args.license),
            ("description", &args.description),
        ];
        for (field, value) in required {
            if value.is_none() {
                return Err(syn::Error::new(
                    input.span(),
                    format!("{} is required", field),
                ));
            }
        }
        Ok(args)
    }
}

/// Builds one `.modinfo` entry: `key=value\0`.
fn modinfo_entry(key: &str, value: &LitStr) -> Vec<u8> {
    let mut entry = Vec::with_capacity(key.len() + value.value().len() + 2);
    entry.extend_from_slice(key.as_bytes());
    entry.push(b'=');
    entry.extend_from_slice(value.value().as_bytes());
    entry.push(0);
    entry
}

fn expand_module(args: &ModuleArgs) -> proc_macro2::TokenStream {
    let fields = [
        ("name", "MODULE_NAME", &args.name),
        ("version", "MODULE_VERSION", &args.version),
        ("license", "MODULE_LICENSE", &args.license),
        ("description", "MODULE_DESCRIPTION", &args.description),
        ("author", "MODULE_AUTHOR", &args.author),
    ];

    let statics = fields.iter().filter_map(|(key, ident, value)| {
        let entry = modinfo_entry(key, value.as_ref()?);
        let len = entry.len();
        let ident = Ident::new(ident, proc_macro2::Span::call_site());
        Some(quote! {
            #[used]
            #[unsafe(link_section = ".modinfo")]
            static #ident: [u8; #len] = [#(#entry),*];
        })
    });

    quote! {
        #(#statics)*
        #[used]
        #[allow(non_upper_case_globals)]
        #[unsafe(link_section = ".gnu.linkonce.this_module")]
        static __this_module: kmod::Module = kmod::Module::new(Some(init_module), Some(cleanup_module));

        #[cfg(target_os = "none")]
        #[panic_handler]
        fn panic(_info: &core::panic::PanicInfo) -> ! {
            loop {}
        }
    }
}

/// Macro to declare module metadata in the `.modinfo` section.
///
/// `name`, `version`, `license` and `description` are required, `author`
/// is optional.
///
/// # Example:
/// ```ignore
/// module! {
///     name: "hello",
///     version: "1.0.0",
///     license: "GPL",
///     author: "Jane Doe",
///     description: "A simple hello world kernel module",
/// }
/// ```
///
/// Parameters can be in any order.
#[proc_macro]
pub fn module(item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(item as ModuleArgs);
    expand_module(&args).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_any_order() {
        let args: ModuleArgs = syn::parse_str(
            r#"description: "d", license: "GPL", version: "0.1.0", name: "hello""#,
        )
        .unwrap();
        assert_eq!(args.name.unwrap().value(), "hello");
        assert_eq!(args.license.unwrap().value(), "GPL");
        assert!(args.author.is_none());
    }

    #[test]
    fn test_missing_field() {
        let err = syn::parse_str::<ModuleArgs>(r#"name: "hello", version: "1""#)
            .err()
            .unwrap();
        assert!(err.to_string().contains("license is required"));
    }

    #[test]
    fn test_unknown_and_duplicate_fields() {
        let unknown = syn::parse_str::<ModuleArgs>(r#"name: "a", alias: "b""#).err();
        assert!(unknown.unwrap().to_string().contains("Unknown field: alias"));
        let dup = syn::parse_str::<ModuleArgs>(r#"name: "a", name: "b""#).err();
        assert!(dup.unwrap().to_string().contains("Duplicate field: name"));
    }

    #[test]
    fn test_modinfo_entry() {
        let value: LitStr = syn::parse_str(r#""Lukas Graber""#).unwrap();
        assert_eq!(modinfo_entry("author", &value), b"author=Lukas Graber\0");
    }

    #[test]
    fn test_author_is_optional() {
        let without: ModuleArgs = syn::parse_str(
            r#"name: "a", version: "1", license: "GPL", description: "d""#,
        )
        .unwrap();
        assert!(!expand_module(&without).to_string().contains("MODULE_AUTHOR"));

        let with: ModuleArgs = syn::parse_str(
            r#"name: "a", version: "1", license: "GPL", description: "d", author: "x""#,
        )
        .unwrap();
        assert!(expand_module(&with).to_string().contains("MODULE_AUTHOR"));
    }
}
