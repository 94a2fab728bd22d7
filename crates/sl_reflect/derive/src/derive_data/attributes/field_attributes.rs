use proc_macro2::Span;
use syn::{Attribute, Expr, Lit, LitStr, Meta, Token, punctuated::Punctuated, spanned::Spanned};

use super::set_flag;
use crate::REFLECT_ATTRIBUTE_NAME;

const RENAME: &str = "rename";
const SKIP: &str = "skip";
const OMIT_EMPTY: &str = "omit_empty";
const EMBED: &str = "embed";

/// Field-level `#[reflect(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub skip: Option<Span>,
    pub omit_empty: Option<Span>,
    pub embed: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for meta in &metas {
                result.parse_meta(meta)?;
            }
        }

        if let (Some(span), true) = (result.skip, result.is_annotated()) {
            return Err(syn::Error::new(
                span,
                "`skip` removes the field, other attributes have no effect",
            ));
        }

        Ok(result)
    }

    fn parse_meta(&mut self, meta: &Meta) -> syn::Result<()> {
        match meta {
            Meta::Path(path) if path.is_ident(SKIP) => set_flag(&mut self.skip, SKIP, path.span()),
            Meta::Path(path) if path.is_ident(OMIT_EMPTY) => {
                set_flag(&mut self.omit_empty, OMIT_EMPTY, path.span())
            }
            Meta::Path(path) if path.is_ident(EMBED) => {
                set_flag(&mut self.embed, EMBED, path.span())
            }
            Meta::NameValue(pair) if pair.path.is_ident(RENAME) => {
                if self.rename.is_some() {
                    return Err(syn::Error::new(pair.span(), "duplicate `rename` attribute"));
                }
                match &pair.value {
                    Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(lit), ..
                    }) => {
                        self.rename = Some(lit.clone());
                        Ok(())
                    }
                    other => Err(syn::Error::new(
                        other.span(),
                        "expected a string literal, e.g. `rename = \"id\"`",
                    )),
                }
            }
            _ => Err(syn::Error::new(
                meta.span(),
                "unknown attribute, expected one of \
                `rename = \"..\"`, `skip`, `omit_empty`, `embed`",
            )),
        }
    }

    #[inline]
    fn is_annotated(&self) -> bool {
        self.rename.is_some() || self.omit_empty.is_some() || self.embed.is_some()
    }

    /// Whether the field is visible to reflection.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.skip.is_none()
    }
}
