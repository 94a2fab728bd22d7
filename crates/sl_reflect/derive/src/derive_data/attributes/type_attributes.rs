use proc_macro2::Span;
use syn::{
    Attribute, Expr, Lit, Meta, Path, Token, parse::ParseStream, punctuated::Punctuated,
    spanned::Spanned,
};

use super::set_flag;
use crate::REFLECT_ATTRIBUTE_NAME;

const OPAQUE: &str = "opaque";
const MARSHAL_JSON: &str = "marshal_json";
const MARSHAL_TEXT: &str = "marshal_text";
const AUTO_REGISTER: &str = "auto_register";
const TYPE_PATH: &str = "type_path";

/// Type-level `#[reflect(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "crate::module::Name"`, without generics.
    pub type_path: Option<Path>,
    /// `opaque`, fields are not inspected.
    pub is_opaque: Option<Span>,
    /// `marshal_json`, the type implements `MarshalJson`.
    pub marshal_json: Option<Span>,
    /// `marshal_text`, the type implements `MarshalText`.
    pub marshal_text: Option<Span>,
    /// `auto_register`, submit the type to the automatic registry.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    /// Collects every `#[reflect(...)]` attribute on a type.
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_args_with(|input: ParseStream| result.parse_stream(input))?;
            }
        }

        Ok(result)
    }

    /// Parses a comma separated list such as `opaque, marshal_text`.
    pub fn parse_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        let metas = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;
        for meta in &metas {
            self.parse_meta(meta)?;
        }
        Ok(())
    }

    fn parse_meta(&mut self, meta: &Meta) -> syn::Result<()> {
        match meta {
            Meta::Path(path) if path.is_ident(OPAQUE) => {
                set_flag(&mut self.is_opaque, OPAQUE, path.span())
            }
            Meta::Path(path) if path.is_ident(MARSHAL_JSON) => {
                set_flag(&mut self.marshal_json, MARSHAL_JSON, path.span())
            }
            Meta::Path(path) if path.is_ident(MARSHAL_TEXT) => {
                set_flag(&mut self.marshal_text, MARSHAL_TEXT, path.span())
            }
            Meta::Path(path) if path.is_ident(AUTO_REGISTER) => {
                set_flag(&mut self.auto_register, AUTO_REGISTER, path.span())
            }
            Meta::NameValue(pair) if pair.path.is_ident(TYPE_PATH) => {
                if self.type_path.is_some() {
                    return Err(syn::Error::new(pair.span(), "duplicate `type_path` attribute"));
                }
                let Expr::Lit(syn::ExprLit {
                    lit: Lit::Str(lit), ..
                }) = &pair.value
                else {
                    return Err(syn::Error::new(
                        pair.value.span(),
                        "expected a string literal, e.g. `type_path = \"crate::foo::Bar\"`",
                    ));
                };
                let path = lit.parse_with(Path::parse_mod_style)?;
                if path.leading_colon.is_some() || path.segments.len() < 2 {
                    return Err(syn::Error::new(
                        lit.span(),
                        "expected a path like `crate::foo::Bar` without leading `::`",
                    ));
                }
                self.type_path = Some(path);
                Ok(())
            }
            _ => Err(syn::Error::new(
                meta.span(),
                "unknown attribute, expected one of \
                `opaque`, `marshal_json`, `marshal_text`, `auto_register`, `type_path = \"..\"`",
            )),
        }
    }
}
