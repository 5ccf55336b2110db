//! Derive macro implementation for tenv

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Visibility};

mod attrs;

use attrs::FieldAttrs;

/// `Tenv` derive macro
///
/// Implements `tenv::EnvField` for a struct with named fields, generating the
/// table of binding descriptors used by `tenv::populate_from_env`.
///
/// Only fields declared `pub` (including `pub(crate)` and friends) are bound.
/// Field types that do not implement `tenv::EnvField` are bound as
/// unsupported and never changed.
/// The struct must implement `Default`, which is used to materialize an
/// absent `Option<Self>` field in an enclosing record.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[tenv(name = "KEY")]` or `#[tenv = "KEY"]`: Lookup key override
/// - `#[tenv(from_file)]`: Support `{KEY}_FILE` pattern
/// - `#[tenv(skip)]`: Do not bind this field
///
/// # Example
///
/// See the `tenv` crate documentation for usage examples.
#[proc_macro_derive(Tenv, attributes(tenv))]
pub fn derive_tenv(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Tenv only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Tenv only supports structs",
            ));
        }
    };

    let mut bindings = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;

        // Private fields are not externally settable
        if attrs.skip || matches!(field.vis, Visibility::Inherited) {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };

        let field_name = ident.unraw().to_string();
        let tag = attrs.name.unwrap_or_default();

        let binding = quote! {
            ::tenv::Binding::new(
                #field_name,
                #tag,
                (&::tenv::__private::Slot::new(&mut self.#ident)).__tenv_bind()
            )
        };
        bindings.push(if attrs.from_file {
            quote! { #binding.with_file_fallback() }
        } else {
            binding
        });
    }

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        for param in generics.type_params_mut() {
            param.bounds.push(parse_quote!(::tenv::EnvField));
        }
        let (_, ty_generics, _) = input.generics.split_for_impl();
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#struct_name #ty_generics: ::core::default::Default));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tenv::EnvField for #struct_name #ty_generics #where_clause {
            fn materialize() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(::core::default::Default::default())
            }

            fn bindings(
                &mut self,
            ) -> ::core::option::Option<::std::vec::Vec<::tenv::Binding<'_>>> {
                #[allow(unused_imports)]
                use ::tenv::__private::{BindEnvField as _, BindUnsupported as _};

                ::core::option::Option::Some(::std::vec![#(#bindings),*])
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: DeriveInput) -> String {
        expand(&input).unwrap().to_string()
    }

    #[test]
    fn test_public_fields_are_bound_in_order() {
        let output = expand_str(parse_quote! {
            struct Config {
                pub host: String,
                #[tenv(name = "log_level")]
                pub(crate) level: String,
            }
        });

        let host = output.find("\"host\"").unwrap();
        let level = output.find("\"level\"").unwrap();
        assert!(host < level);
        assert!(output.contains("\"log_level\""));
    }

    #[test]
    fn test_private_and_skipped_fields_are_ignored() {
        let output = expand_str(parse_quote! {
            struct Config {
                pub host: String,
                secret: String,
                #[tenv(skip)]
                pub cache: Vec<String>,
            }
        });

        assert!(output.contains("\"host\""));
        assert!(!output.contains("\"secret\""));
        assert!(!output.contains("\"cache\""));
    }

    #[test]
    fn test_raw_identifier_name() {
        let output = expand_str(parse_quote! {
            struct Config {
                pub r#type: String,
            }
        });

        assert!(output.contains("\"type\""));
    }

    #[test]
    fn test_from_file_adds_fallback() {
        let output = expand_str(parse_quote! {
            struct Config {
                #[tenv(from_file)]
                pub api_key: String,
            }
        });

        assert!(output.contains("with_file_fallback"));
    }

    #[test]
    fn test_fields_bind_through_slot() {
        let output = expand_str(parse_quote! {
            struct Config {
                pub timeout: std::time::Duration,
            }
        });

        assert!(output.contains("__private :: Slot :: new"));
        assert!(output.contains("self . timeout"));
        assert!(output.contains("__tenv_bind"));
    }

    #[test]
    fn test_generic_params_get_bounds() {
        let output = expand_str(parse_quote! {
            struct Wrapper<T> {
                pub inner: T,
            }
        });

        assert!(output.contains(":: tenv :: EnvField"));
        assert!(output.contains(":: core :: default :: Default"));
    }

    #[test]
    fn test_rejects_non_records() {
        let tuple: DeriveInput = parse_quote! { struct Port(pub u16); };
        let unit: DeriveInput = parse_quote! { struct Marker; };
        let enumeration: DeriveInput = parse_quote! { enum Mode { A, B } };

        assert!(expand(&tuple).is_err());
        assert!(expand(&unit).is_err());
        assert!(expand(&enumeration).is_err());
    }

    #[test]
    fn test_attribute_errors_propagate() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[tenv(prefix = "APP_")]
                pub host: String,
            }
        };

        assert!(expand(&input).is_err());
    }
}
