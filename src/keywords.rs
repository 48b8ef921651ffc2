//! Static lookup tables
//!
//! Plain source-token → target-token mappings consulted by the rules. They
//! carry no state.

use crate::java_type::Container;

/// Free functions renamed on the Java side. An empty target drops the call
/// and keeps its argument (`move(A)` → `A`).
pub const FUNC_NAMES: &[(&str, &str)] = &[
    ("move", ""),
    ("to_string", "String.valueOf"),
    ("stoi", "Integer.valueOf"),
    ("stol", "Long.valueOf"),
    ("stoll", "Long.valueOf"),
];

/// Containers declared with a bare default constructor: `set<int> seen;`
pub const DEFAULT_CONSTRUCTED: &[(&str, Container)] = &[
    ("unordered_set", Container::HashSet),
    ("set", Container::TreeSet),
    ("stack", Container::Deque),
    ("queue", Container::Queue),
    ("deque", Container::Deque),
    ("unordered_map", Container::HashMap),
    ("map", Container::TreeMap),
    ("vector", Container::List),
];

/// How a replacement key is matched against a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Plain substring
    Literal,
    /// Whole word: not preceded or followed by an identifier character
    Word,
    /// Free call: not preceded by an identifier character or `.`
    Call,
}

/// Token replacements applied verbatim at the end of every line, in order.
pub const REPLACED_END: &[(&str, &str, Match)] = &[
    ("constexpr", "final", Match::Word),
    ("const", "final", Match::Word),
    ("1'000'000'007", "1_000_000_007", Match::Literal),
    (".top()", ".peek()", Match::Literal),
    ("bool", "boolean", Match::Word),
    ("string ", "String ", Match::Word),
    ("string& ", "String ", Match::Word),
    (".push_back(", ".add(", Match::Literal),
    (".emplace_back(", ".add(", Match::Literal),
    (".emplace(", ".add(", Match::Literal),
    (".pop_front(", ".pollFirst(", Match::Literal),
    (".pop_back(", ".pollLast(", Match::Literal),
    (".insert(", ".add(", Match::Literal),
    (".erase(", ".remove(", Match::Literal),
    (".count(", ".contains(", Match::Literal),
    (".empty()", ".isEmpty()", Match::Literal),
    (".front()", "[0]", Match::Literal),
    (".back()", "[n - 1]", Match::Literal),
    ("min(", "Math.min(", Match::Call),
    ("max(", "Math.max(", Match::Call),
    ("abs(", "Math.abs(", Match::Call),
    ("INT_MIN", "Integer.MIN_VALUE", Match::Word),
    ("INT_MAX", "Integer.MAX_VALUE", Match::Word),
    ("LONG_MIN", "Long.MIN_VALUE", Match::Word),
    ("LONG_MAX", "Long.MAX_VALUE", Match::Word),
    ("LLONG_MIN", "Long.MIN_VALUE", Match::Word),
    ("LLONG_MAX", "Long.MAX_VALUE", Match::Word),
    ("long long", "long", Match::Word),
    ("nullptr", "null", Match::Word),
];

/// Words that can precede `(` or sit in a type position without being a
/// declaration
pub const RESERVED: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "catch", "return", "delete", "new",
    "throw", "sizeof", "using", "typedef", "goto", "co_return", "operator", "template",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// Java visibility keywords; lines already carrying one are left alone
pub const VISIBILITY: &[&str] = &["public", "private", "protected"];

pub fn starts_with_visibility(text: &str) -> bool {
    let first = text.split_whitespace().next().unwrap_or("");
    VISIBILITY.contains(&first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("return"));
        assert!(is_reserved("if"));
        assert!(!is_reserved("UF"));
    }

    #[test]
    fn test_visibility_prefix() {
        assert!(starts_with_visibility("public long f(int x) {"));
        assert!(starts_with_visibility("  private int[] memo;"));
        assert!(!starts_with_visibility("publicity x;"));
    }

    #[test]
    fn test_default_constructed_table_is_unique() {
        for (i, (name, _)) in DEFAULT_CONSTRUCTED.iter().enumerate() {
            assert!(DEFAULT_CONSTRUCTED[i + 1..].iter().all(|(other, _)| other != name));
        }
    }
}
