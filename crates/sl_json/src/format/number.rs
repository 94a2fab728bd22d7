use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::MarshalError;

// -----------------------------------------------------------------------------
// Integers

#[inline]
pub(crate) fn write_int(dst: &mut Vec<u8>, value: i64) {
    dst.extend_from_slice(itoa::Buffer::new().format(value).as_bytes());
}

#[inline]
pub(crate) fn write_uint(dst: &mut Vec<u8>, value: u64) {
    dst.extend_from_slice(itoa::Buffer::new().format(value).as_bytes());
}

// -----------------------------------------------------------------------------
// Floats

struct ByteWriter<'a>(&'a mut Vec<u8>);

impl Write for ByteWriter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn non_finite(is_nan: bool, negative: bool) -> MarshalError {
    let description = match (is_nan, negative) {
        (true, _) => "NaN",
        (false, false) => "+Inf",
        (false, true) => "-Inf",
    };
    MarshalError::UnsupportedValue {
        description: String::from(description),
    }
}

// `{:e}` writes `1e21`; a sign is inserted so the exponent reads `1e+21`.
fn sign_exponent(dst: &mut Vec<u8>, start: usize) {
    if let Some(pos) = dst[start..].iter().position(|&b| b == b'e') {
        let at = start + pos + 1;
        if dst.get(at) != Some(&b'-') {
            dst.insert(at, b'+');
        }
    }
}

macro_rules! impl_write_float {
    ($name:ident, $ty:ty) => {
        /// Writes the shortest decimal form that parses back to the same value.
        ///
        /// Magnitudes below `1e-6` or from `1e21` on use exponent form, compared
        /// at the value's own width. The exponent never has leading zeros.
        pub(crate) fn $name(dst: &mut Vec<u8>, value: $ty) -> Result<(), MarshalError> {
            if !value.is_finite() {
                return Err(non_finite(value.is_nan(), value.is_sign_negative()));
            }

            let abs = value.abs();
            let exponent = abs != 0.0 && (abs < 1e-6 || abs >= 1e21);

            let start = dst.len();
            let mut writer = ByteWriter(dst);
            // `ByteWriter` never fails.
            let _ = if exponent {
                write!(writer, "{value:e}")
            } else {
                write!(writer, "{value}")
            };

            if exponent {
                sign_exponent(dst, start);
            }
            Ok(())
        }
    };
}

impl_write_float!(write_f32, f32);
impl_write_float!(write_f64, f64);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{write_f32, write_f64, write_int, write_uint};
    use crate::MarshalError;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn f64_text(v: f64) -> String {
        let mut out = Vec::new();
        write_f64(&mut out, v).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn f32_text(v: f32) -> String {
        let mut out = Vec::new();
        write_f32(&mut out, v).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn integers() {
        let mut out = Vec::new();
        write_int(&mut out, i64::MIN);
        out.push(b' ');
        write_uint(&mut out, u64::MAX);
        assert_eq!(out, b"-9223372036854775808 18446744073709551615");
    }

    #[test]
    fn shortest_round_trip() {
        let third = 1.0 / 3.0;
        assert_eq!(f64_text(third), "0.3333333333333333");
        assert_eq!(serde_json::from_str::<f64>(&f64_text(third)).unwrap(), third);
        assert_eq!(f64_text(1.0), "1");
        assert_eq!(f64_text(-0.0), "-0");
        assert_eq!(f64_text(0.1), "0.1");
        assert_eq!(f32_text(0.1), "0.1");
    }

    #[test]
    fn exponent_thresholds() {
        assert_eq!(f64_text(0.000001), "0.000001");
        assert_eq!(f64_text(0.0000001), "1e-7");
        assert_eq!(f64_text(1.5e-9), "1.5e-9");
        assert_eq!(f64_text(1e20), "100000000000000000000");
        assert_eq!(f64_text(1e21), "1e+21");
        assert_eq!(f64_text(-2.5e300), "-2.5e+300");
        assert_eq!(f32_text(1e-7), "1e-7");
        assert_eq!(f32_text(1e21), "1e+21");
    }

    #[test]
    fn exponent_output_parses_back() {
        for v in [1e-7, 3.2e-10, 1e21, 6.02e23, f64::MIN_POSITIVE, f64::MAX] {
            assert_eq!(serde_json::from_str::<f64>(&f64_text(v)).unwrap(), v);
        }
    }

    #[test]
    fn non_finite_is_rejected() {
        let mut out = Vec::new();
        let err = write_f64(&mut out, f64::INFINITY).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedValue { ref description } if description == "+Inf"));
        let err = write_f32(&mut out, f32::NEG_INFINITY).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedValue { ref description } if description == "-Inf"));
        let err = write_f64(&mut out, f64::NAN).unwrap_err();
        assert!(matches!(err, MarshalError::UnsupportedValue { ref description } if description == "NaN"));
        assert!(out.is_empty());
    }
}
