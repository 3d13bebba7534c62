//! Flat `key=value` properties files
//!
//! The settings and status files follow the Java `.properties` conventions so
//! they stay readable by the other Minarca components. Files are Latin-1 on
//! disk; anything outside printable ASCII is written as a `\uXXXX` escape.

use std::collections::BTreeMap;
use std::path::Path;

use super::file_io::{encode_latin1, read_latin1, write_atomic};
use crate::error::MinarcaError;

/// Ordered key/value pairs read from a properties file
pub type Properties = BTreeMap<String, String>;

/// Read a properties file, returning `None` if it doesn't exist
pub fn read_properties<P: AsRef<Path>>(path: P) -> Result<Option<Properties>, MinarcaError> {
    Ok(read_latin1(path)?.map(|text| parse(&text)))
}

/// Write key/value pairs to a properties file atomically, in the given order
pub fn write_properties<P, K, V>(path: P, entries: &[(K, V)]) -> Result<(), MinarcaError>
where
    P: AsRef<Path>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let text = format(entries);
    write_atomic(path, &encode_latin1(&text)?)
}

/// Parse properties text. Later duplicates of a key win.
pub fn parse(text: &str) -> Properties {
    let mut properties = Properties::new();
    for line in logical_lines(text) {
        let (key, value) = split_key_value(&line);
        properties.insert(unescape(key), unescape(value));
    }
    properties
}

/// Serialize key/value pairs, one `key=value` line each
pub fn format<K: AsRef<str>, V: AsRef<str>>(entries: &[(K, V)]) -> String {
    let mut output = String::new();
    for (key, value) in entries {
        output.push_str(&escape(key.as_ref(), true));
        output.push('=');
        output.push_str(&escape(value.as_ref(), false));
        output.push('\n');
    }
    output
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continued lines and drop blank and comment lines
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        for natural in raw.split('\r') {
            let trimmed = natural.trim_start_matches(is_blank);
            let continuing = current.is_some();
            if !continuing && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
                continue;
            }

            // An odd number of trailing backslashes continues the line
            let trailing = trimmed.chars().rev().take_while(|&c| c == '\\').count();
            let (content, continues) = if trailing % 2 == 1 {
                (&trimmed[..trimmed.len() - 1], true)
            } else {
                (trimmed, false)
            };

            let mut line = current.take().unwrap_or_default();
            line.push_str(content);
            if continues {
                current = Some(line);
            } else {
                lines.push(line);
            }
        }
    }

    if let Some(line) = current {
        lines.push(line);
    }
    lines
}

/// Split a logical line at the first unescaped `=`, `:` or blank
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = idx;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(s: &str) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let Some(next) = chars.next() else {
            break;
        };
        let decoded = match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            'u' => {
                let hex: String = chars.clone().take(4).collect();
                match u16::from_str_radix(&hex, 16) {
                    Ok(unit) if hex.len() == 4 => {
                        for _ in 0..4 {
                            chars.next();
                        }
                        // Surrogate halves are combined below
                        units.push(unit);
                        continue;
                    }
                    _ => 'u',
                }
            }
            other => other,
        };
        let mut buf = [0u16; 2];
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

fn escape(s: &str, is_key: bool) -> String {
    let mut output = String::with_capacity(s.len());
    for (idx, c) in s.chars().enumerate() {
        match c {
            '\\' => output.push_str("\\\\"),
            '\t' => output.push_str("\\t"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\x0c' => output.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                output.push('\\');
                output.push(c);
            }
            ' ' if is_key || idx == 0 => output.push_str("\\ "),
            ' '..='~' => output.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    output.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    output
}
