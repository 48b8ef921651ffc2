//! Constructor Translation
//!
//! Two shapes:
//!
//! ```text
//! MyClass(const vector<int>& v1) {   →  public MyClass(int[] v1) {
//! UF uf(m * n);                      →  UF uf = new UF(m * n);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cpp_type::{split_top_level, CppType};
use crate::java_type::{java_type_of, Container, JavaType};
use crate::keywords::is_reserved;
use crate::translate::container_decl_translate::{full_range, is_iterator_arg};
use crate::translate::function_def_translate::{emit_params, translate_params};
use crate::translate::rule::{LineRule, RuleContext, RuleOutcome};

static CONSTRUCTOR_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(\w+)\((.*)\) \{$").expect("valid regex"));
static OBJECT_CONSTRUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(\w+(?:<[^=;]+>)?) (\w+)\((.*)\);$").expect("valid regex")
});

/// Out-of-line constructor definition with parameters
pub struct ConstructorDefRule;

impl LineRule for ConstructorDefRule {
    fn name(&self) -> &'static str {
        "constructor-def"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = CONSTRUCTOR_DEF.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, class_name, params) = (&caps[1], &caps[2], &caps[3]);
        if is_reserved(class_name) {
            return RuleOutcome::Passthrough;
        }

        let params = translate_params(params);
        if params.is_empty() {
            return RuleOutcome::Translated(line.to_string());
        }

        let java_params = emit_params(&params, cx);
        RuleOutcome::Translated(format!(
            "{}{} {}({}) {{",
            spaces,
            cx.state.method_visibility(),
            class_name,
            java_params
        ))
    }
}

/// Local object constructed with arguments: `T name(args);`
pub struct ObjectConstructionRule;

impl LineRule for ObjectConstructionRule {
    fn name(&self) -> &'static str {
        "object-construction"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = OBJECT_CONSTRUCTION.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, cpp_type, var, args) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        let head = CppType::parse(cpp_type);
        let head_name = head.head_name().unwrap_or("");
        if is_reserved(head_name) || Container::from_cpp(head_name).is_some() {
            return RuleOutcome::Passthrough;
        }

        let parts = split_top_level(args);
        let ty = java_type_of(cpp_type);
        if parts.iter().any(|arg| is_iterator_arg(arg)) {
            // only `string s(t.begin(), t.end())` has a direct Java form
            let source = match (&ty, full_range(&parts)) {
                (JavaType::Object(name), Some(source)) if name == "String" => source,
                _ => return RuleOutcome::Passthrough,
            };
            let out = format!("{}String {} = String.valueOf({});", spaces, var, source);
            cx.state.variable_types.set(var, ty);
            return RuleOutcome::Translated(out);
        }

        let out = match &ty {
            JavaType::Primitive(_) => format!("{}{} {} = {};", spaces, ty, var, args),
            JavaType::Object(name) if name == "String" => {
                match parts.as_slice() {
                    [count, ch] => format!(
                        "{}String {} = String.valueOf({}).repeat({});",
                        spaces, var, ch, count
                    ),
                    _ => format!("{}String {} = {};", spaces, var, args),
                }
            }
            JavaType::Class { name, .. } => {
                format!("{}{} {} = new {}<>({});", spaces, ty, var, name, args)
            }
            _ => format!("{}{} {} = new {}({});", spaces, ty, var, ty, args),
        };

        cx.state.variable_types.set(var, ty);
        RuleOutcome::Translated(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lowering::ConversionState;

    fn run(rule: &dyn LineRule, line: &str, state: &mut ConversionState) -> RuleOutcome {
        let mut cx = RuleContext { state, line_number: 1, indent: "  " };
        rule.apply(line, &mut cx)
    }

    #[test]
    fn test_class_constructor() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&ConstructorDefRule, "MyClass(const vector<int>& v1) {", &mut state),
            RuleOutcome::Translated("public MyClass(int[] v1) {".to_string())
        );
    }

    #[test]
    fn test_constructor_without_params_is_kept() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&ConstructorDefRule, "  Trie() {", &mut state),
            RuleOutcome::Translated("  Trie() {".to_string())
        );
    }

    #[test]
    fn test_control_keyword_is_not_a_constructor() {
        let mut state = ConversionState::new();
        assert_eq!(run(&ConstructorDefRule, "  if(x > 0) {", &mut state), RuleOutcome::Passthrough);
    }

    #[test]
    fn test_object_construction() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&ObjectConstructionRule, "UF uf(m * n);", &mut state),
            RuleOutcome::Translated("UF uf = new UF(m * n);".to_string())
        );
        assert_eq!(state.variable_types.describe("uf"), "UF");
    }

    #[test]
    fn test_generic_object_construction() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&ObjectConstructionRule, "  Fenwick<long long> tree(n + 1);", &mut state),
            RuleOutcome::Translated("  Fenwick<Long> tree = new Fenwick<>(n + 1);".to_string())
        );
    }

    #[test]
    fn test_primitive_and_string_construction() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&ObjectConstructionRule, "int x(5);", &mut state),
            RuleOutcome::Translated("int x = 5;".to_string())
        );
        assert_eq!(
            run(&ObjectConstructionRule, "string pad(n, ' ');", &mut state),
            RuleOutcome::Translated("String pad = String.valueOf(' ').repeat(n);".to_string())
        );
    }

    #[test]
    fn test_string_from_iterator_range() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&ObjectConstructionRule, "  string s(t.begin(), t.end());", &mut state),
            RuleOutcome::Translated("  String s = String.valueOf(t);".to_string())
        );
        assert_eq!(
            run(&ObjectConstructionRule, "string s(t.begin(), t.begin() + k);", &mut state),
            RuleOutcome::Passthrough
        );
        assert_eq!(
            run(&ObjectConstructionRule, "UF uf(edges.begin(), edges.end());", &mut state),
            RuleOutcome::Passthrough
        );
    }

    #[test]
    fn test_return_statement_is_not_a_construction() {
        let mut state = ConversionState::new();
        assert_eq!(run(&ObjectConstructionRule, "  return max(a, b);", &mut state), RuleOutcome::Passthrough);
    }
}
