//! Paths of `sl_reflect` items used by generated code.
//!
//! Keeping them in one place limits the changes needed when `sl_reflect`
//! is reorganized. The only special case is the crate path itself,
//! see [`sl_reflect`].

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `sl_reflect` crate.
///
/// 1. For crates that depend on `sl_reflect`, `::sl_reflect` is returned.
/// 2. For crates that depend on `shapelog`, `::shapelog::reflect` is returned.
/// 3. Otherwise `::sl_reflect` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so the path is passed around
/// instead of being fetched again.
pub(crate) fn sl_reflect() -> syn::Path {
    sl_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("sl_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;
mod ops;
mod registry;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;
pub(crate) use ops::*;
pub(crate) use registry::*;

#[inline(always)]
pub(crate) fn macro_utils_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::__macro_exports::macro_utils
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn reflect_(sl_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #sl_reflect_path::Reflect
    }
}
