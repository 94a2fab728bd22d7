use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{LitStr, spanned::Spanned};

/// A string expression in generated code.
#[derive(Clone)]
pub(crate) enum StringExpr {
    /// A string known at compile time, a literal or a macro such as `module_path!()`.
    Const(TokenStream),
    /// A `&'static str` expression.
    Borrowed(TokenStream),
    /// A `String` expression.
    Owned(TokenStream),
}

impl Default for StringExpr {
    fn default() -> Self {
        Self::Const("".to_token_stream())
    }
}

impl<T: ToString + Spanned> From<T> for StringExpr {
    fn from(value: T) -> Self {
        Self::Const(LitStr::new(&value.to_string(), value.span()).to_token_stream())
    }
}

impl StringExpr {
    pub fn from_lit(lit: &LitStr) -> Self {
        Self::Const(lit.to_token_stream())
    }

    pub fn from_str(string: &str) -> Self {
        Self::Const(string.to_token_stream())
    }

    /// Returns tokens for a statically borrowed [string slice](str).
    pub fn into_borrowed(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => tokens,
            Self::Owned(owned) => quote! {
                &#owned as &str
            },
        }
    }

    /// Returns tokens for an [owned string](String).
    pub fn into_owned(self, sl_reflect_path: &syn::Path) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => {
                let macro_utils_ = crate::path::macro_utils_(sl_reflect_path);
                quote! {
                    #macro_utils_::ToOwned::to_owned(#tokens)
                }
            }
            Self::Owned(owned) => owned,
        }
    }

    fn is_const(&self) -> bool {
        matches!(self, StringExpr::Const(_))
    }

    /// Concatenates the expressions.
    ///
    /// All-constant input is merged at compile time with [`concat`],
    /// anything else goes through `impls::concat` at runtime.
    pub fn from_iter<T: IntoIterator<Item = StringExpr>>(
        iter: T,
        sl_reflect_path: &syn::Path,
    ) -> Self {
        let exprs: Vec<StringExpr> = iter.into_iter().collect();

        if exprs.is_empty() {
            return Self::default();
        }

        if exprs.iter().all(StringExpr::is_const) {
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Const(quote! {
                ::core::concat!( #(#inner),* )
            })
        } else {
            let macro_utils_ = crate::path::macro_utils_(sl_reflect_path);
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Owned(quote! {
                #macro_utils_::__concat(&[ #(#inner),* ])
            })
        }
    }
}
