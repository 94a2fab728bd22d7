mod marshal;

pub use marshal::{BoxError, MarshalJson, MarshalText};
pub use marshal::{TypeTraitMarshalJson, TypeTraitMarshalText};
