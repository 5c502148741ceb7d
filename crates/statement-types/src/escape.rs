//! HTML-safe JSON string escaping.
//!
//! Chaincode written against the Go shim encodes ledger values with
//! `encoding/json`, which escapes `<`, `>`, `&`, U+2028 and U+2029 inside
//! strings. [`HtmlSafeFormatter`] does the same with `serde_json`'s
//! compact layout, so a peer running this crate stages the same bytes as
//! a peer running the Go chaincode.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

/// Compact JSON formatter that escapes HTML-significant characters and
/// the JavaScript line terminators.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSafeFormatter;

impl HtmlSafeFormatter {
    const fn escape_for(c: char) -> Option<&'static str> {
        match c {
            '<' => Some("\\u003c"),
            '>' => Some("\\u003e"),
            '&' => Some("\\u0026"),
            '\u{2028}' => Some("\\u2028"),
            '\u{2029}' => Some("\\u2029"),
            _ => None,
        }
    }
}

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let Some(escaped) = Self::escape_for(c) else {
                continue;
            };
            let before = fragment.get(start..i).unwrap_or_default();
            writer.write_all(before.as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i.saturating_add(c.len_utf8());
        }
        let rest = fragment.get(start..).unwrap_or_default();
        writer.write_all(rest.as_bytes())
    }
}

/// Serialize `value` as compact, HTML-safe JSON.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if `value` fails to serialize.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, HtmlSafeFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}
