//! A byte-at-a-time state machine over encoded text.
//!
//! The scanner does not build values, it only reports what each byte means
//! through an [`Op`]. [`check_valid`](crate::check_valid) and [`compact`](crate::compact) are
//! built on it.
//!
//! `Op::End` reports that a top-level value completed *before* the byte
//! just fed: a number like `123` only ends once a following byte is seen.
//! End of input is therefore signalled by feeding one space, see
//! [`Scanner::eof`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use sl_utils::Reusable;

use crate::SyntaxError;

/// Maximum nesting depth of arrays and objects.
pub const MAX_NESTING_DEPTH: usize = 10000;

// Parse stacks grown beyond this are not kept by pooled scanners.
const MAX_KEPT_STACK: usize = 1024;

// -----------------------------------------------------------------------------
// Op

/// The meaning of a scanned byte.
///
/// Variants are ordered: everything from `SkipSpace` on can be dropped by a
/// compactor, everything from `End` on stops the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Op {
    /// An uninteresting byte.
    Continue,
    /// The first byte of a string, number or literal.
    BeginLiteral,
    BeginObject,
    /// An object key just finished.
    ObjectKey,
    /// A non-last object value just finished.
    ObjectValue,
    EndObject,
    BeginArray,
    /// A non-last array element just finished.
    ArrayValue,
    EndArray,
    /// Insignificant whitespace.
    SkipSpace,
    /// The top-level value ended before this byte.
    End,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parse {
    ObjectKey,
    ObjectValue,
    ArrayValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    BeginValue,
    BeginValueOrEmpty,
    BeginStringOrEmpty,
    BeginString,
    EndValue,
    EndTop,
    InString,
    InStringEsc,
    /// Inside `\u`, with the number of hex digits read so far.
    InStringEscU(u8),
    Neg,
    Digits,
    Zero,
    Dot,
    DotDigits,
    Exp,
    ExpSign,
    ExpDigits,
    /// Inside `true`, `false` or `null`, with the bytes still expected.
    Literal {
        rest: &'static [u8],
        name: &'static str,
    },
    Error,
}

#[inline]
const fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

// -----------------------------------------------------------------------------
// Scanner

/// The scanning state machine.
///
/// Call [`reset`](Scanner::reset), feed bytes with [`step`](Scanner::step)
/// and finish with [`eof`](Scanner::eof). Once an error is hit, every
/// following byte scans as an error too.
#[derive(Debug)]
pub(crate) struct Scanner {
    step: Step,
    end_top: bool,
    parse_state: Vec<Parse>,
    err: Option<SyntaxError>,
    bytes: u64,
}

impl Default for Scanner {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Reusable for Scanner {
    fn reset(&mut self) {
        if self.parse_state.capacity() > MAX_KEPT_STACK {
            self.parse_state = Vec::new();
        }
        Scanner::reset(self);
    }
}

impl Scanner {
    /// Creates a scanner ready for input.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            step: Step::BeginValue,
            end_top: false,
            parse_state: Vec::new(),
            err: None,
            bytes: 0,
        }
    }

    /// Prepares the scanner for a new input.
    pub(crate) fn reset(&mut self) {
        self.step = Step::BeginValue;
        self.parse_state.clear();
        self.err = None;
        self.end_top = false;
        self.bytes = 0;
    }

    /// Feeds one byte.
    #[inline]
    pub(crate) fn step(&mut self, c: u8) -> Op {
        self.bytes += 1;
        self.dispatch(c)
    }

    /// Signals the end of input.
    ///
    /// Returns `Op::End` if exactly one complete value was read.
    pub(crate) fn eof(&mut self) -> Op {
        if self.err.is_some() {
            return Op::Error;
        }
        if self.end_top {
            return Op::End;
        }
        self.dispatch(b' ');
        if self.end_top {
            return Op::End;
        }
        if self.err.is_none() {
            self.err = Some(SyntaxError::new(
                String::from("unexpected end of JSON input"),
                self.bytes,
            ));
        }
        Op::Error
    }

    /// Takes the recorded error.
    pub(crate) fn take_error(&mut self) -> SyntaxError {
        match self.err.take() {
            Some(err) => err,
            None => SyntaxError::new(String::from("unexpected end of JSON input"), self.bytes),
        }
    }

    fn dispatch(&mut self, c: u8) -> Op {
        match self.step {
            Step::BeginValue => self.begin_value(c),
            Step::BeginValueOrEmpty => self.begin_value_or_empty(c),
            Step::BeginStringOrEmpty => self.begin_string_or_empty(c),
            Step::BeginString => self.begin_string(c),
            Step::EndValue => self.end_value(c),
            Step::EndTop => self.end_top(c),
            Step::InString => self.in_string(c),
            Step::InStringEsc => self.in_string_esc(c),
            Step::InStringEscU(read) => self.in_string_esc_u(c, read),
            Step::Neg => self.neg(c),
            Step::Digits => self.digits(c),
            Step::Zero => self.zero(c),
            Step::Dot => self.dot(c),
            Step::DotDigits => self.dot_digits(c),
            Step::Exp => self.exp(c),
            Step::ExpSign => self.exp_sign(c),
            Step::ExpDigits => self.exp_digits(c),
            Step::Literal { rest, name } => self.literal(c, rest, name),
            Step::Error => Op::Error,
        }
    }

    // -------------------------------------------------------------------------
    // Nesting

    fn push_parse_state(&mut self, c: u8, state: Parse, success: Op) -> Op {
        self.parse_state.push(state);
        if self.parse_state.len() <= MAX_NESTING_DEPTH {
            success
        } else {
            self.error(c, "exceeded max depth")
        }
    }

    fn pop_parse_state(&mut self) {
        self.parse_state.pop();
        if self.parse_state.is_empty() {
            self.step = Step::EndTop;
            self.end_top = true;
        } else {
            self.step = Step::EndValue;
        }
    }

    fn error(&mut self, c: u8, context: &str) -> Op {
        self.step = Step::Error;
        self.err = Some(SyntaxError::new(
            format!("invalid character {} {}", quote_char(c), context),
            self.bytes,
        ));
        Op::Error
    }

    // -------------------------------------------------------------------------
    // Values

    // After `[`.
    fn begin_value_or_empty(&mut self, c: u8) -> Op {
        if is_space(c) {
            return Op::SkipSpace;
        }
        if c == b']' {
            return self.end_value(c);
        }
        self.begin_value(c)
    }

    fn begin_value(&mut self, c: u8) -> Op {
        if is_space(c) {
            return Op::SkipSpace;
        }
        match c {
            b'{' => {
                self.step = Step::BeginStringOrEmpty;
                self.push_parse_state(c, Parse::ObjectKey, Op::BeginObject)
            }
            b'[' => {
                self.step = Step::BeginValueOrEmpty;
                self.push_parse_state(c, Parse::ArrayValue, Op::BeginArray)
            }
            b'"' => {
                self.step = Step::InString;
                Op::BeginLiteral
            }
            b'-' => {
                self.step = Step::Neg;
                Op::BeginLiteral
            }
            b'0' => {
                self.step = Step::Zero;
                Op::BeginLiteral
            }
            b'1'..=b'9' => {
                self.step = Step::Digits;
                Op::BeginLiteral
            }
            b't' => {
                self.step = Step::Literal {
                    rest: b"rue",
                    name: "true",
                };
                Op::BeginLiteral
            }
            b'f' => {
                self.step = Step::Literal {
                    rest: b"alse",
                    name: "false",
                };
                Op::BeginLiteral
            }
            b'n' => {
                self.step = Step::Literal {
                    rest: b"ull",
                    name: "null",
                };
                Op::BeginLiteral
            }
            _ => self.error(c, "looking for beginning of value"),
        }
    }

    // After `{`.
    fn begin_string_or_empty(&mut self, c: u8) -> Op {
        if is_space(c) {
            return Op::SkipSpace;
        }
        if c == b'}' {
            if let Some(last) = self.parse_state.last_mut() {
                *last = Parse::ObjectValue;
            }
            return self.end_value(c);
        }
        self.begin_string(c)
    }

    // After `{"key": value,`.
    fn begin_string(&mut self, c: u8) -> Op {
        if is_space(c) {
            return Op::SkipSpace;
        }
        if c == b'"' {
            self.step = Step::InString;
            return Op::BeginLiteral;
        }
        self.error(c, "looking for beginning of object key string")
    }

    // After a complete value, such as `{}`, `true` or `["x"`.
    fn end_value(&mut self, c: u8) -> Op {
        let Some(&state) = self.parse_state.last() else {
            self.step = Step::EndTop;
            self.end_top = true;
            return self.end_top(c);
        };
        if is_space(c) {
            self.step = Step::EndValue;
            return Op::SkipSpace;
        }
        match state {
            Parse::ObjectKey => {
                if c == b':' {
                    self.set_top(Parse::ObjectValue);
                    self.step = Step::BeginValue;
                    return Op::ObjectKey;
                }
                self.error(c, "after object key")
            }
            Parse::ObjectValue => {
                if c == b',' {
                    self.set_top(Parse::ObjectKey);
                    self.step = Step::BeginString;
                    return Op::ObjectValue;
                }
                if c == b'}' {
                    self.pop_parse_state();
                    return Op::EndObject;
                }
                self.error(c, "after object key:value pair")
            }
            Parse::ArrayValue => {
                if c == b',' {
                    self.step = Step::BeginValue;
                    return Op::ArrayValue;
                }
                if c == b']' {
                    self.pop_parse_state();
                    return Op::EndArray;
                }
                self.error(c, "after array element")
            }
        }
    }

    #[inline]
    fn set_top(&mut self, state: Parse) {
        if let Some(last) = self.parse_state.last_mut() {
            *last = state;
        }
    }

    // Only spaces may follow the top-level value.
    fn end_top(&mut self, c: u8) -> Op {
        if !is_space(c) {
            // Reported on the next call.
            self.error(c, "after top-level value");
        }
        Op::End
    }

    // -------------------------------------------------------------------------
    // Strings

    fn in_string(&mut self, c: u8) -> Op {
        match c {
            b'"' => {
                self.step = Step::EndValue;
                Op::Continue
            }
            b'\\' => {
                self.step = Step::InStringEsc;
                Op::Continue
            }
            0..0x20 => self.error(c, "in string literal"),
            _ => Op::Continue,
        }
    }

    fn in_string_esc(&mut self, c: u8) -> Op {
        match c {
            b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' | b'"' => {
                self.step = Step::InString;
                Op::Continue
            }
            b'u' => {
                self.step = Step::InStringEscU(0);
                Op::Continue
            }
            _ => self.error(c, "in string escape code"),
        }
    }

    fn in_string_esc_u(&mut self, c: u8, read: u8) -> Op {
        if !c.is_ascii_hexdigit() {
            return self.error(c, "in \\u hexadecimal character escape");
        }
        self.step = if read == 3 {
            Step::InString
        } else {
            Step::InStringEscU(read + 1)
        };
        Op::Continue
    }

    // -------------------------------------------------------------------------
    // Numbers

    // After `-`.
    fn neg(&mut self, c: u8) -> Op {
        match c {
            b'0' => {
                self.step = Step::Zero;
                Op::Continue
            }
            b'1'..=b'9' => {
                self.step = Step::Digits;
                Op::Continue
            }
            _ => self.error(c, "in numeric literal"),
        }
    }

    // After a non-zero integer part, such as `1` or `100`.
    fn digits(&mut self, c: u8) -> Op {
        if c.is_ascii_digit() {
            return Op::Continue;
        }
        self.zero(c)
    }

    // After `0`.
    fn zero(&mut self, c: u8) -> Op {
        match c {
            b'.' => {
                self.step = Step::Dot;
                Op::Continue
            }
            b'e' | b'E' => {
                self.step = Step::Exp;
                Op::Continue
            }
            _ => self.end_value(c),
        }
    }

    // After `1.`.
    fn dot(&mut self, c: u8) -> Op {
        if c.is_ascii_digit() {
            self.step = Step::DotDigits;
            return Op::Continue;
        }
        self.error(c, "after decimal point in numeric literal")
    }

    // After `3.14`.
    fn dot_digits(&mut self, c: u8) -> Op {
        match c {
            b'0'..=b'9' => Op::Continue,
            b'e' | b'E' => {
                self.step = Step::Exp;
                Op::Continue
            }
            _ => self.end_value(c),
        }
    }

    // After `314e`.
    fn exp(&mut self, c: u8) -> Op {
        if c == b'+' || c == b'-' {
            self.step = Step::ExpSign;
            return Op::Continue;
        }
        self.exp_sign(c)
    }

    // After `314e-`.
    fn exp_sign(&mut self, c: u8) -> Op {
        if c.is_ascii_digit() {
            self.step = Step::ExpDigits;
            return Op::Continue;
        }
        self.error(c, "in exponent of numeric literal")
    }

    // After `314e-2`.
    fn exp_digits(&mut self, c: u8) -> Op {
        if c.is_ascii_digit() {
            return Op::Continue;
        }
        self.end_value(c)
    }

    // -------------------------------------------------------------------------
    // Literals

    fn literal(&mut self, c: u8, rest: &'static [u8], name: &'static str) -> Op {
        match rest {
            [expected, tail @ ..] if c == *expected => {
                self.step = if tail.is_empty() {
                    Step::EndValue
                } else {
                    Step::Literal { rest: tail, name }
                };
                Op::Continue
            }
            [expected, ..] => {
                let context = format!(
                    "in literal {name} (expecting {})",
                    quote_char(*expected)
                );
                self.error(c, &context)
            }
            // `rest` is never stored empty.
            [] => self.end_value(c),
        }
    }
}

/// Formats a byte as a quoted character for error messages, e.g. `'x'`.
fn quote_char(c: u8) -> String {
    match c {
        b'\'' => String::from(r"'\''"),
        b'"' => String::from(r#"'"'"#),
        0x07 => String::from(r"'\a'"),
        0x08 => String::from(r"'\b'"),
        0x0C => String::from(r"'\f'"),
        b'\n' => String::from(r"'\n'"),
        b'\r' => String::from(r"'\r'"),
        b'\t' => String::from(r"'\t'"),
        0x0B => String::from(r"'\v'"),
        0x00..0x20 | 0x7F => format!("'\\x{c:02x}'"),
        0x80..=0xA0 | 0xAD => format!("'\\u{:04x}'", c),
        _ => format!("'{}'", char::from(c)),
    }
}

// -----------------------------------------------------------------------------
// Validation

/// Checks that `data` is exactly one encoded value, surrounded by optional
/// whitespace.
pub(crate) fn check_valid_with(scan: &mut Scanner, data: &[u8]) -> Result<(), SyntaxError> {
    scan.reset();
    for &c in data {
        if scan.step(c) == Op::Error {
            return Err(scan.take_error());
        }
    }
    if scan.eof() == Op::Error {
        return Err(scan.take_error());
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{MAX_NESTING_DEPTH, Op, Scanner, check_valid_with, quote_char};
    use alloc::vec::Vec;
    use sl_utils::Reusable;

    fn check(data: &[u8]) -> Result<(), (alloc::string::String, u64)> {
        let mut scan = Scanner::new();
        check_valid_with(&mut scan, data).map_err(|e| (e.message().into(), e.offset()))
    }

    #[test]
    fn accepts_values() {
        let inputs: [&[u8]; 9] = [
            br#"{"a":1,"b":[1,2,3]}"#,
            b" [] ",
            b"{}",
            b"-0.5e+10",
            b"0",
            b"true",
            b"null",
            br#""esc \" \\ \/ \b \t""#,
            b"[false, {\"k\" : null}]\n",
        ];
        for ok in inputs {
            assert_eq!(check(ok), Ok(()), "{}", alloc::string::String::from_utf8_lossy(ok));
        }
    }

    #[test]
    fn trailing_comma() {
        let (msg, offset) = check(br#"{"a":1,}"#).unwrap_err();
        assert_eq!(msg, "invalid character '}' looking for beginning of object key string");
        assert_eq!(offset, 8);
    }

    #[test]
    fn error_messages() {
        let cases: [(&[u8], &str); 9] = [
            (b"", "unexpected end of JSON input"),
            (b"[1,", "unexpected end of JSON input"),
            (b"01", "invalid character '1' after top-level value"),
            (b"[1}", "invalid character '}' after array element"),
            (b"{\"a\" 1}", "invalid character '1' after object key"),
            (b"tru", "invalid character ' ' in literal true (expecting 'e')"),
            (b"trux", "invalid character 'x' in literal true (expecting 'e')"),
            (b"1.x", "invalid character 'x' after decimal point in numeric literal"),
            (b"\"a\nb\"", "invalid character '\\n' in string literal"),
        ];
        for (input, expected) in cases {
            assert_eq!(check(input).unwrap_err().0, expected);
        }
    }

    #[test]
    fn hex_escape_needs_four_digits() {
        let (msg, _) = check(br#""\u12g4""#).unwrap_err();
        assert_eq!(msg, "invalid character 'g' in \\u hexadecimal character escape");
    }

    #[test]
    fn nesting_limit() {
        let mut deep = Vec::new();
        deep.resize(MAX_NESTING_DEPTH, b'[');
        deep.resize(MAX_NESTING_DEPTH * 2, b']');
        assert_eq!(check(&deep), Ok(()));

        let mut deeper = Vec::new();
        deeper.resize(MAX_NESTING_DEPTH + 1, b'[');
        deeper.resize(MAX_NESTING_DEPTH * 2 + 2, b']');
        let (msg, offset) = check(&deeper).unwrap_err();
        assert_eq!(msg, "invalid character '[' exceeded max depth");
        assert_eq!(offset, MAX_NESTING_DEPTH as u64 + 1);
    }

    #[test]
    fn errors_are_sticky() {
        let mut scan = Scanner::new();
        assert_eq!(scan.step(b'}'), Op::Error);
        assert_eq!(scan.step(b'1'), Op::Error);
        assert_eq!(scan.eof(), Op::Error);
    }

    #[test]
    fn end_is_reported_after_the_value() {
        let mut scan = Scanner::new();
        assert_eq!(scan.step(b'1'), Op::BeginLiteral);
        assert_eq!(scan.step(b'2'), Op::Continue);
        assert_eq!(scan.step(b' '), Op::End);
        assert_eq!(scan.eof(), Op::End);
    }

    #[test]
    fn quoted_characters() {
        assert_eq!(quote_char(b'\''), r"'\''");
        assert_eq!(quote_char(b'"'), r#"'"'"#);
        assert_eq!(quote_char(0x01), r"'\x01'");
        assert_eq!(quote_char(b'a'), "'a'");
        assert_eq!(quote_char(0xE9), "'é'");
    }

    #[test]
    fn pooled_reset_drops_large_stacks() {
        let mut scan = Scanner::new();
        for _ in 0..2000 {
            scan.step(b'[');
        }
        Reusable::reset(&mut scan);
        assert_eq!(scan.parse_state.capacity(), 0);
        assert_eq!(scan.eof(), Op::Error);
    }
}
