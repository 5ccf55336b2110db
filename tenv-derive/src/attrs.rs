//! Attribute parsing for `#[tenv(...)]` annotations.

use syn::{Expr, ExprLit, Field, Lit, Meta};

/// Parsed `#[tenv(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Override lookup key, upper-cased at runtime.
    ///
    /// If `None`, the field name is used.
    pub name: Option<String>,

    /// Fall back to `{KEY}_FILE` when the variable is unset.
    pub from_file: bool,

    /// Exclude the field from binding.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[tenv(...)]` attributes from a struct field.
    ///
    /// Attributes with other paths are ignored.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("tenv") {
                continue;
            }

            // #[tenv = "..."]
            if let Meta::NameValue(meta) = &attr.meta {
                match &meta.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => attrs.name = Some(s.value()),
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "expected a string literal key",
                        ))
                    }
                }
                continue;
            }

            // #[tenv(...)]
            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let name: Lit = value.parse()?;
                    match name {
                        Lit::Str(s) => attrs.name = Some(s.value()),
                        other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
                    }
                    return Ok(());
                }

                // from_file
                if meta.path.is_ident("from_file") {
                    attrs.from_file = true;
                    return Ok(());
                }

                // skip
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported tenv attribute"))
            })?;
        }

        Ok(attrs)
    }
}
