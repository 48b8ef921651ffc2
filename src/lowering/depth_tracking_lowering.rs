//! Depth Tracking Lowering
//!
//! Tracks brace depth inside a converted class body so member declarations
//! are only recognized at member level, not inside method bodies.
//! Braces inside string and character literals or after `//` are not counted.

use crate::lowering::conversion_state::ConversionState;

/// Count opening and closing braces outside of literals and line comments
///
/// # Returns
/// A tuple of (opening_count, closing_count)
pub fn count_braces_outside_literals(s: &str) -> (usize, usize) {
    let mut opens = 0;
    let mut closes = 0;
    let mut quote: Option<char> = None;
    let mut escape_next = false;
    let mut prev = '\0';

    for c in s.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        if let Some(q) = quote {
            if c == '\\' {
                escape_next = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '/' if prev == '/' => break,
            '{' => opens += 1,
            '}' => closes += 1,
            _ => {}
        }
        prev = c;
    }

    (opens, closes)
}

/// Update the class-body depth from a line that stayed inside the body
pub fn update_class_depth(state: &mut ConversionState, line: &str) {
    if !state.in_class_body {
        return;
    }
    let (opens, closes) = count_braces_outside_literals(line);
    state.class_depth = (state.class_depth + opens).saturating_sub(closes).max(1);
}
