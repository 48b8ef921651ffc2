//! C++ Type Expressions
//!
//! Parses the type spellings found in declarations and parameter lists into a
//! small tree so the Java side can be derived recursively:
//!
//! ```text
//! const vector<vector<pair<int, long long>>>&
//!   → Reference(Const(Named vector [Named vector [Named pair [int, long long]]]))
//! ```
//!
//! Anything that does not look like a type is kept as `Unparsed` and later
//! passes through untranslated.

/// A parsed C++ type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CppType {
    /// `name` or `name<args...>`; `std::` is stripped from the name
    Named { name: String, args: Vec<CppType> },
    /// `T*`
    Pointer(Box<CppType>),
    /// `T&` or `T&&`
    Reference(Box<CppType>),
    /// `const T`, `constexpr T` (and Java's `final T`)
    Const(Box<CppType>),
    /// Text that could not be recognized as a type
    Unparsed(String),
}

impl CppType {
    /// Parse a type expression. Never fails; unknown shapes become `Unparsed`.
    pub fn parse(text: &str) -> CppType {
        let normalized = normalize_spaces(&text.replace("std::", ""));
        parse_normalized(&normalized)
    }

    /// Name of the outermost named type, looking through qualifiers
    pub fn head_name(&self) -> Option<&str> {
        match self {
            CppType::Named { name, .. } => Some(name),
            CppType::Pointer(inner) | CppType::Reference(inner) | CppType::Const(inner) => {
                inner.head_name()
            }
            CppType::Unparsed(_) => None,
        }
    }
}

fn parse_normalized(s: &str) -> CppType {
    let s = s.trim();
    if s.is_empty() {
        return CppType::Unparsed(String::new());
    }

    if let Some(rest) = s.strip_suffix("&&").or_else(|| s.strip_suffix('&')) {
        return CppType::Reference(Box::new(parse_normalized(rest)));
    }
    if let Some(rest) = s.strip_suffix('*') {
        return CppType::Pointer(Box::new(parse_normalized(rest)));
    }
    for qualifier in ["const ", "constexpr ", "final "] {
        if let Some(rest) = s.strip_prefix(qualifier) {
            return CppType::Const(Box::new(parse_normalized(rest)));
        }
    }
    if let Some(rest) = s.strip_suffix(" const") {
        return CppType::Const(Box::new(parse_normalized(rest)));
    }

    if let Some(open) = s.find('<') {
        if !s.ends_with('>') {
            return CppType::Unparsed(s.to_string());
        }
        let name = s[..open].trim();
        if !is_type_name(name) {
            return CppType::Unparsed(s.to_string());
        }
        let inner = &s[open + 1..s.len() - 1];
        let args = split_top_level(inner)
            .into_iter()
            .filter(|arg| !arg.trim().is_empty())
            .map(|arg| parse_normalized(&arg))
            .collect();
        return CppType::Named { name: name.to_string(), args };
    }

    if is_type_name(s) {
        CppType::Named { name: s.to_string(), args: Vec::new() }
    } else {
        CppType::Unparsed(s.to_string())
    }
}

/// Identifier-ish names, including multi-word builtins (`long long`,
/// `unsigned int`) and qualified Java names (`Map.Entry`)
fn is_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ' ' || c == '.' || c == ':')
}

fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a comma-separated list at top level, ignoring commas nested inside
/// `<>`, `()`, `[]` or `{}`.
///
/// ```text
/// "vector<vector<pair<int, int>>>, int num" → ["vector<vector<pair<int, int>>>", "int num"]
/// ```
pub fn split_top_level(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for c in text.chars() {
        match c {
            '<' | '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            '>' | ')' | ']' | '}' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

/// Split a `type name` parameter into its type and name at the last space.
/// A parameter without a space is treated as a bare name.
pub fn split_param(param: &str) -> (String, String) {
    let param = param.trim();
    match param.rsplit_once(' ') {
        Some((ty, name)) => {
            // `int &x` and `int *p` keep their markers on the type
            let markers: String = name.chars().take_while(|c| *c == '&' || *c == '*').collect();
            let name = &name[markers.len()..];
            (format!("{}{}", ty.trim(), markers), name.to_string())
        }
        None => (String::new(), param.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, args: Vec<CppType>) -> CppType {
        CppType::Named { name: name.to_string(), args }
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(CppType::parse("int"), named("int", vec![]));
        assert_eq!(CppType::parse("long  long"), named("long long", vec![]));
    }

    #[test]
    fn test_parse_qualified_reference() {
        let ty = CppType::parse("const std::vector<int>&");
        assert_eq!(
            ty,
            CppType::Reference(Box::new(CppType::Const(Box::new(named(
                "vector",
                vec![named("int", vec![])]
            )))))
        );
        assert_eq!(ty.head_name(), Some("vector"));
    }

    #[test]
    fn test_parse_nested_pairs() {
        let ty = CppType::parse("vector<vector<pair<int, long long>>>");
        let pair = named("pair", vec![named("int", vec![]), named("long long", vec![])]);
        assert_eq!(ty, named("vector", vec![named("vector", vec![pair])]));
    }

    #[test]
    fn test_parse_pointer() {
        assert_eq!(
            CppType::parse("TreeNode*"),
            CppType::Pointer(Box::new(named("TreeNode", vec![])))
        );
    }

    #[test]
    fn test_unparsed_falls_through() {
        assert!(matches!(CppType::parse("int (*)(int)"), CppType::Unparsed(_)));
        assert!(matches!(CppType::parse("vector<int"), CppType::Unparsed(_)));
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("vector<vector<pair<int, int>>>, int num"),
            vec!["vector<vector<pair<int, int>>>".to_string(), "int num".to_string()]
        );
        assert_eq!(split_top_level("m + 1, vector<int>(n, -1)").len(), 2);
        assert!(split_top_level("  ").is_empty());
    }

    #[test]
    fn test_split_param() {
        assert_eq!(
            split_param("const string& param1"),
            ("const string&".to_string(), "param1".to_string())
        );
        assert_eq!(
            split_param("vector<int> &nums"),
            ("vector<int>&".to_string(), "nums".to_string())
        );
    }
}
