//! Parsing of `#[reflect(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::TypeAttributes;

use proc_macro2::Span;

/// Records a boolean flag, rejecting duplicates.
fn set_flag(flag: &mut Option<Span>, name: &str, span: Span) -> syn::Result<()> {
    if flag.is_some() {
        return Err(syn::Error::new(span, format!("duplicate `{name}` attribute")));
    }
    *flag = Some(span);
    Ok(())
}
