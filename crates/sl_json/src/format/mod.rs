//! Text forms of scalars.
//!
//! - [`string`]: quoting and escaping, with optional HTML escaping.
//! - [`number`]: integers through `itoa`, floats in shortest round-trip form.

pub(crate) mod number;
pub(crate) mod string;
