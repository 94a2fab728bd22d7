mod string_expr;

pub(crate) use string_expr::StringExpr;

/// An empty token stream, for optional pieces of generated code.
#[inline(always)]
pub(crate) fn empty() -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
