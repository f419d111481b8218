//! Identifier and string literal extraction from a declaration line.
//!
//! Handles the usual shapes of tagged constants:
//! - `ConditionReady ConditionType = "Ready"` inside a `const ( ... )` block
//! - `const ReasonFailed = "Failed"`
//! - `ReasonRaw = `raw value``
//! - `ReasonBare` (no literal, the identifier doubles as the value)

use crate::error::TagError;
use crate::model::Declaration;
use regex::Regex;
use std::str::Chars;
use std::sync::LazyLock;

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap());

// "…" with backslash escapes
static RE_DQ_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:\\.|[^"\\])*""#).unwrap());

// `…` without escapes
static RE_RAW_STRING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());

/// Keywords that may precede the declared name on a single-line declaration.
const DECL_KEYWORDS: &[&str] = &["const", "var"];

/// Parse the identifier and literal value of a declaration line.
pub fn parse(line: &str) -> Result<Declaration, TagError> {
    let const_name =
        first_ident(line).ok_or_else(|| TagError::NoIdentifier(line.trim().to_string()))?;
    let value = first_string_literal(line).unwrap_or_else(|| const_name.clone());
    Ok(Declaration { const_name, value })
}

/// First identifier on the line, skipping pointer/reference sigils and a
/// leading declaration keyword.
fn first_ident(line: &str) -> Option<String> {
    let s = line.trim().trim_start_matches(['*', '&']);
    let ident = RE_IDENT.find(s)?.as_str();

    if DECL_KEYWORDS.contains(&ident) {
        let rest = s[ident.len()..].trim_start();
        // `const` alone (e.g. the opening of `const (`) has no name to offer
        if let Some(m) = RE_IDENT.find(rest.trim_start_matches(['*', '&'])) {
            return Some(m.as_str().to_string());
        }
    }
    Some(ident.to_string())
}

/// First double-quoted or raw string literal, unquoted.
fn first_string_literal(line: &str) -> Option<String> {
    let dq = RE_DQ_STRING.find(line);
    let raw = RE_RAW_STRING.find(line);

    match (dq, raw) {
        (None, None) => None,
        (Some(d), Some(r)) if r.start() < d.start() => Some(strip_quotes(r.as_str()).to_string()),
        (Some(d), _) => Some(unescape(strip_quotes(d.as_str()))),
        (None, Some(r)) => Some(strip_quotes(r.as_str()).to_string()),
    }
}

fn strip_quotes(lit: &str) -> &str {
    &lit[1..lit.len() - 1]
}

/// Decode the backslash escapes of a double-quoted literal.
///
/// `\x`, octal and the single-letter escapes produce raw bytes, `\u` and
/// `\U` produce code points. Malformed or unknown escapes are kept verbatim.
fn unescape(s: &str) -> String {
    let mut out: Vec<u8> = Vec::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut out, c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push(b'\\');
            break;
        };
        let decoded = match esc {
            'a' => Some(Escaped::Byte(0x07)),
            'b' => Some(Escaped::Byte(0x08)),
            'f' => Some(Escaped::Byte(0x0c)),
            'n' => Some(Escaped::Byte(b'\n')),
            'r' => Some(Escaped::Byte(b'\r')),
            't' => Some(Escaped::Byte(b'\t')),
            'v' => Some(Escaped::Byte(0x0b)),
            '\\' | '\'' | '"' => Some(Escaped::Char(esc)),
            'x' => read_digits(&mut chars, 2, 16).map(|v| Escaped::Byte(v as u8)),
            '0'..='7' => {
                let high = esc.to_digit(8).unwrap_or_default();
                let mut ahead = chars.clone();
                read_digits(&mut ahead, 2, 8)
                    .map(|low| high * 64 + low)
                    .and_then(|v| u8::try_from(v).ok())
                    .map(|v| {
                        chars = ahead;
                        Escaped::Byte(v)
                    })
            }
            'u' => read_code_point(&mut chars, 4),
            'U' => read_code_point(&mut chars, 8),
            _ => None,
        };
        match decoded {
            Some(Escaped::Byte(b)) => out.push(b),
            Some(Escaped::Char(c)) => push_char(&mut out, c),
            None => {
                out.push(b'\\');
                push_char(&mut out, esc);
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

enum Escaped {
    Byte(u8),
    Char(char),
}

fn push_char(out: &mut Vec<u8>, c: char) {
    out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
}

/// Consume exactly `count` digits of `radix`, or nothing at all.
fn read_digits(chars: &mut Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut ahead = chars.clone();
    let mut value = 0u32;
    for _ in 0..count {
        let digit = ahead.next()?.to_digit(radix)?;
        value = value * radix + digit;
    }
    *chars = ahead;
    Some(value)
}

fn read_code_point(chars: &mut Chars<'_>, count: usize) -> Option<Escaped> {
    let mut ahead = chars.clone();
    let c = read_digits(&mut ahead, count, 16).and_then(char::from_u32)?;
    *chars = ahead;
    Some(Escaped::Char(c))
}
