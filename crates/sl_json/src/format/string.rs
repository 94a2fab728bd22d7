use alloc::vec::Vec;

pub(crate) const HEX: &[u8; 16] = b"0123456789abcdef";

/// Returns `true` if the ASCII byte cannot appear raw inside a string.
#[inline]
const fn needs_escape(b: u8, escape_html: bool) -> bool {
    b < 0x20 || b == b'"' || b == b'\\' || (escape_html && matches!(b, b'<' | b'>' | b'&'))
}

/// Writes `s` as a quoted string.
#[inline]
pub(crate) fn write_quoted(dst: &mut Vec<u8>, s: &str, escape_html: bool) {
    dst.push(b'"');
    escape_str(dst, s, escape_html);
    dst.push(b'"');
}

/// Writes the escaped content of `s` without quotes.
///
/// `\n`, `\r` and `\t` use their short forms, other control bytes become
/// `\u00XX`. U+2028 and U+2029 are always escaped.
pub(crate) fn escape_str(dst: &mut Vec<u8>, s: &str, escape_html: bool) {
    let bytes = s.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b < 0x80 {
            if !needs_escape(b, escape_html) {
                i += 1;
                continue;
            }
            dst.extend_from_slice(&bytes[start..i]);
            match b {
                b'\\' | b'"' => dst.extend_from_slice(&[b'\\', b]),
                b'\n' => dst.extend_from_slice(br"\n"),
                b'\r' => dst.extend_from_slice(br"\r"),
                b'\t' => dst.extend_from_slice(br"\t"),
                _ => dst.extend_from_slice(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[(b >> 4) as usize],
                    HEX[(b & 0xF) as usize],
                ]),
            }
            i += 1;
            start = i;
            continue;
        }

        // U+2028 LINE SEPARATOR and U+2029 PARAGRAPH SEPARATOR are E2 80 A8/A9.
        if b == 0xE2 && bytes.get(i + 1) == Some(&0x80) {
            if let Some(&last @ (0xA8 | 0xA9)) = bytes.get(i + 2) {
                dst.extend_from_slice(&bytes[start..i]);
                dst.extend_from_slice(br"\u202");
                dst.push(HEX[(last & 0xF) as usize]);
                i += 3;
                start = i;
                continue;
            }
        }

        i += 1;
    }

    dst.extend_from_slice(&bytes[start..]);
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{escape_str, write_quoted};
    use alloc::string::String;
    use alloc::vec::Vec;

    fn quoted(s: &str, html: bool) -> String {
        let mut out = Vec::new();
        write_quoted(&mut out, s, html);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn control_bytes() {
        assert_eq!(quoted("a\nb\tc\r", false), r#""a\nb\tc\r""#);
        assert_eq!(quoted("\u{1}\u{1f}", false), r#""\u0001\u001f""#);
        assert_eq!(quoted("\u{8}\u{c}", false), r#""\u0008\u000c""#);
        assert_eq!(quoted("say \"hi\" \\", false), r#""say \"hi\" \\""#);
        assert_eq!(quoted("\u{7f}", false), "\"\u{7f}\"");
    }

    #[test]
    fn html_bytes_are_optional() {
        assert_eq!(quoted("<a&b>", false), r#""<a&b>""#);
        assert_eq!(quoted("<a&b>", true), r#""\u003ca\u0026b\u003e""#);
    }

    #[test]
    fn separators_are_always_escaped() {
        assert_eq!(quoted("x\u{2028}y\u{2029}", false), r#""x\u2028y\u2029""#);
        assert_eq!(quoted("\u{2027}é", false), "\"\u{2027}é\"");
    }

    #[test]
    fn unquoted_names() {
        let mut out = Vec::new();
        escape_str(&mut out, "user\"id", false);
        assert_eq!(out, br#"user\"id"#);
    }

    #[test]
    fn strings_parse_back() {
        let samples = ["", "plain", "tab\there", "\u{0}\u{2028}", "ünï\u{1F600}", "</script>"];
        for s in samples {
            for html in [false, true] {
                let parsed: String = serde_json::from_str(&quoted(s, html)).unwrap();
                assert_eq!(parsed, s);
            }
        }
    }
}
