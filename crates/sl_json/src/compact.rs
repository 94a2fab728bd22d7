use alloc::vec::Vec;

use crate::SyntaxError;
use crate::format::string::HEX;
use crate::scanner::{Op, Scanner};

/// Appends `src` to `dst` without insignificant whitespace.
///
/// With `escape_html`, `<`, `>`, `&`, U+2028 and U+2029 are escaped on the
/// way. On error `dst` is truncated back to its original length.
pub(crate) fn compact_with(
    scan: &mut Scanner,
    dst: &mut Vec<u8>,
    src: &[u8],
    escape_html: bool,
) -> Result<(), SyntaxError> {
    let orig_len = dst.len();
    scan.reset();

    let mut start = 0;
    for (i, &c) in src.iter().enumerate() {
        if escape_html && matches!(c, b'<' | b'>' | b'&') {
            dst.extend_from_slice(&src[start..i]);
            dst.extend_from_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[(c >> 4) as usize],
                HEX[(c & 0xF) as usize],
            ]);
            start = i + 1;
        }
        // U+2028 and U+2029 are E2 80 A8 and E2 80 A9.
        if escape_html
            && c == 0xE2
            && i + 2 < src.len()
            && src[i + 1] == 0x80
            && src[i + 2] & !1 == 0xA8
        {
            dst.extend_from_slice(&src[start..i]);
            dst.extend_from_slice(br"\u202");
            dst.push(HEX[(src[i + 2] & 0xF) as usize]);
            start = i + 3;
        }

        let op = scan.step(c);
        if op >= Op::SkipSpace {
            if op == Op::Error {
                break;
            }
            if start < i {
                dst.extend_from_slice(&src[start..i]);
            }
            start = i + 1;
        }
    }

    if scan.eof() == Op::Error {
        dst.truncate(orig_len);
        return Err(scan.take_error());
    }
    if start < src.len() {
        dst.extend_from_slice(&src[start..]);
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::compact_with;
    use crate::scanner::Scanner;
    use alloc::vec::Vec;

    fn compact(src: &[u8], html: bool) -> Result<Vec<u8>, u64> {
        let mut scan = Scanner::new();
        let mut dst = Vec::from(&b"prefix:"[..]);
        match compact_with(&mut scan, &mut dst, src, html) {
            Ok(()) => Ok(dst.split_off(7)),
            Err(e) => {
                assert_eq!(dst, b"prefix:");
                Err(e.offset())
            }
        }
    }

    #[test]
    fn strips_whitespace_outside_strings() {
        let src = b" { \"a b\" : [ 1 , 2.5e3 ,\n\t\"x \" ] , \"c\":null } ";
        assert_eq!(compact(src, false).unwrap(), br#"{"a b":[1,2.5e3,"x "],"c":null}"#);
    }

    #[test]
    fn escapes_html_on_request() {
        let src = "[\"<b>&\u{2028}\"]".as_bytes();
        assert_eq!(compact(src, false).unwrap(), src);
        assert_eq!(
            compact(src, true).unwrap(),
            br#"["\u003cb\u003e\u0026\u2028"]"#
        );
    }

    #[test]
    fn invalid_input_leaves_destination_untouched() {
        assert_eq!(compact(b"[1, 2", false), Err(5));
        assert_eq!(compact(b"{\"a\":1,}", false), Err(8));
        assert!(compact(b"", false).is_err());
    }
}
