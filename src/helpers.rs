//! Helper utility functions for the converter
//!
//! Contains general-purpose utilities used throughout the rules:
//! - Token replacement with word/call boundaries
//! - Line ending normalization

use crate::keywords::Match;

/// Remove a trailing `\n` / `\r\n`
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace every occurrence of `key` in `line` that satisfies the boundary
/// rule of `mode`
pub fn replace_token(line: &str, key: &str, value: &str, mode: Match) -> String {
    if mode == Match::Literal {
        return line.replace(key, value);
    }

    let key_ends_in_ident = key.chars().last().map_or(false, is_ident_char);
    let mut result = String::with_capacity(line.len());
    let mut rest = line;
    let mut prev: Option<char> = None;

    while let Some(pos) = rest.find(key) {
        let before = rest[..pos].chars().last().or(prev);
        let after = rest[pos + key.len()..].chars().next();

        let start_ok = match before {
            None => true,
            Some(c) => !is_ident_char(c) && !(mode == Match::Call && c == '.'),
        };
        let end_ok = match mode {
            Match::Word if key_ends_in_ident => !after.map_or(false, is_ident_char),
            _ => true,
        };

        result.push_str(&rest[..pos]);
        if start_ok && end_ok {
            result.push_str(value);
        } else {
            result.push_str(key);
        }
        prev = key.chars().last();
        rest = &rest[pos + key.len()..];
    }
    result.push_str(rest);
    result
}
