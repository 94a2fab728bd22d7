// -----------------------------------------------------------------------------
// Modules

mod match_reflect;

mod opaque_kind;
mod struct_kind;

mod auto_register;
mod trait_get_type_meta;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_reflect::match_reflect_impls;

use auto_register::get_auto_register_impl;
use struct_kind::impl_struct;
use trait_get_type_meta::impl_trait_get_type_meta;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;

pub(crate) use opaque_kind::impl_opaque;
pub(crate) use trait_type_path::impl_trait_type_path;
