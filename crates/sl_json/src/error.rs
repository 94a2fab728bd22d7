use alloc::string::String;
use core::fmt;

use sl_reflect::registry::BoxError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Capability

/// The custom encoding capability that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// [`MarshalJson`](sl_reflect::registry::MarshalJson)
    MarshalJson,
    /// [`MarshalText`](sl_reflect::registry::MarshalText)
    MarshalText,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarshalJson => f.pad("MarshalJson"),
            Self::MarshalText => f.pad("MarshalText"),
        }
    }
}

// -----------------------------------------------------------------------------
// MarshalError

/// The reason a marshal call failed.
///
/// A failed call never produces partial output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarshalError {
    /// The shape has no encoding, e.g. a function pointer or an opaque type
    /// without a capability.
    #[error("unsupported type: {type_path}")]
    UnsupportedType { type_path: &'static str },

    /// The shape is supported but this value is not, e.g. a non-finite float.
    #[error("unsupported value: {description}")]
    UnsupportedValue { description: String },

    /// The same shared value was reached again while still being encoded.
    #[error("encountered a cycle via {type_path}")]
    CyclicStructure { type_path: &'static str },

    /// A capability returned an error or produced malformed output.
    #[error("error calling {capability} for type {type_path}: {source}")]
    Marshaler {
        capability: Capability,
        type_path: &'static str,
        #[source]
        source: BoxError,
    },
}

impl MarshalError {
    /// Returns the type path named by the error, if any.
    pub fn type_path(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedType { type_path }
            | Self::CyclicStructure { type_path }
            | Self::Marshaler { type_path, .. } => Some(*type_path),
            Self::UnsupportedValue { .. } => None,
        }
    }
}

// -----------------------------------------------------------------------------
// SyntaxError

/// A malformed byte sequence found while scanning.
///
/// `offset` is the number of bytes consumed when the error was detected,
/// the offending byte included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    message: String,
    offset: u64,
}

impl SyntaxError {
    #[inline]
    pub(crate) fn new(message: String, offset: u64) -> Self {
        Self { message, offset }
    }

    /// Returns the description of the error.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the byte offset where the error occurred.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Capability, MarshalError, SyntaxError};
    use alloc::string::{String, ToString};

    #[test]
    fn messages() {
        let err = MarshalError::UnsupportedType { type_path: "fn()" };
        assert_eq!(err.to_string(), "unsupported type: fn()");

        let err = MarshalError::UnsupportedValue {
            description: String::from("+Inf"),
        };
        assert_eq!(err.to_string(), "unsupported value: +Inf");
        assert_eq!(err.type_path(), None);

        let err = MarshalError::Marshaler {
            capability: Capability::MarshalText,
            type_path: "demo::Level",
            source: "bad level".into(),
        };
        assert_eq!(
            err.to_string(),
            "error calling MarshalText for type demo::Level: bad level"
        );
        assert_eq!(err.type_path(), Some("demo::Level"));
    }

    #[test]
    fn syntax_error_keeps_offset() {
        let err = SyntaxError::new(String::from("unexpected end of JSON input"), 3);
        assert_eq!(err.offset(), 3);
        assert_eq!(err.to_string(), err.message());
    }
}
