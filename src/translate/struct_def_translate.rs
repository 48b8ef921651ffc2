//! Struct Definition Translation
//!
//! Translates C++ aggregate structs to Java classes.
//!
//! C++ struct syntax:
//! ```text
//! struct T {
//!   int i;
//!   int val;
//!   T(int i, int val) : i(i), val(val) {}
//! };
//! ```
//!
//! Java class syntax:
//! ```text
//! class T {
//!   public int i;
//!   public int val;
//!   public T(int i, int val) {
//!     this.i = i;
//!     this.val = val;
//!   }
//! }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::cpp_type::split_top_level;
use crate::java_type::java_type_of;
use crate::keywords::starts_with_visibility;
use crate::translate::container_decl_translate::{DefaultContainerDeclRule, PriorityQueueDeclRule};
use crate::translate::function_def_translate::translate_params;
use crate::translate::rule::{LineRule, RuleContext, RuleOutcome};

static STRUCT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)struct (\w+) \{$").expect("valid regex"));
static STRUCT_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\};$").expect("valid regex"));
static INIT_LIST_CTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(\w+)\((.*)\) : (.+) \{\}$").expect("valid regex"));
static INITIALIZER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)[({](.*)[)}]$").expect("valid regex"));
static MEMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)(.*);$").expect("valid regex"));
static TYPED_MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?) ([*&]*)(\w+)( = .+)?$").expect("valid regex"));

//=============================================================================
// HEADER / CLOSE
//=============================================================================

/// `struct T {` → `class T {`, and `};` → `}`
pub struct StructBoundaryRule;

impl LineRule for StructBoundaryRule {
    fn name(&self) -> &'static str {
        "struct-boundary"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        if let Some(caps) = STRUCT_OPEN.captures(line) {
            cx.state.enter_class_body();
            return RuleOutcome::Translated(format!("{}class {} {{", &caps[1], &caps[2]));
        }
        if STRUCT_CLOSE.is_match(line) {
            cx.state.exit_class_body();
            return RuleOutcome::Translated("}".to_string());
        }
        RuleOutcome::Passthrough
    }
}

//=============================================================================
// CONSTRUCTOR WITH INITIALIZER LIST
//=============================================================================

/// `T(int i, int j) : i(i), j(j) {}` → constructor with one assignment per
/// parameter
pub struct InitializerListConstructorRule;

impl LineRule for InitializerListConstructorRule {
    fn name(&self) -> &'static str {
        "initializer-list-constructor"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = INIT_LIST_CTOR.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, class_name, params, initializers) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        let params = translate_params(params);
        if params.is_empty() {
            return RuleOutcome::Passthrough;
        }

        // member initialized from each parameter: `val(v)` binds v → val
        let bindings: Vec<(String, String)> = split_top_level(initializers)
            .iter()
            .filter_map(|item| INITIALIZER.captures(item.trim()))
            .map(|c| (c[2].trim().to_string(), c[1].to_string()))
            .collect();

        let visibility = if cx.state.in_class_body { "public" } else { "???" };
        let java_params = params
            .iter()
            .map(|(ty, name)| format!("{} {}", ty, name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!("{}{} {}({}) {{", spaces, visibility, class_name, java_params);
        for (_, name) in &params {
            let member = bindings
                .iter()
                .find(|(arg, _)| arg == name)
                .map(|(_, member)| member.as_str())
                .unwrap_or(name.as_str());
            out.push_str(&format!("\n{}{}this.{} = {};", spaces, cx.indent, member, name));
        }
        out.push_str(&format!("\n{}}}", spaces));

        trace!(class = class_name, params = params.len(), "initializer-list constructor");
        RuleOutcome::Translated(out)
    }
}

//=============================================================================
// MEMBER DECLARATIONS
//=============================================================================

/// Inside a converted class body, `T name;` → `public T' name;`.
/// Default-constructed containers keep their collection type and get an
/// initializer: `vector<int> v;` → `public List<Integer> v = new ArrayList<>();`
pub struct ClassMemberRule;

impl LineRule for ClassMemberRule {
    fn name(&self) -> &'static str {
        "class-member"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        if !cx.state.at_member_level() {
            return RuleOutcome::Passthrough;
        }
        let Some(caps) = MEMBER.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, declaration) = (&caps[1], &caps[2]);
        if starts_with_visibility(declaration)
            || declaration.starts_with("return")
            || declaration.starts_with('}')
        {
            return RuleOutcome::Passthrough;
        }

        let containers: [&dyn LineRule; 2] = [&DefaultContainerDeclRule, &PriorityQueueDeclRule];
        for rule in containers {
            if let RuleOutcome::Translated(text) = rule.apply(line, cx) {
                return RuleOutcome::Translated(format!("{}public {}", spaces, text.trim_start()));
            }
        }

        if let Some(member) = TYPED_MEMBER.captures(declaration) {
            let cpp_type = format!("{}{}", &member[1], &member[2]);
            if !cpp_type.contains('(') {
                let ty = java_type_of(&cpp_type);
                let name = &member[3];
                let init = member.get(4).map_or("", |m| m.as_str());
                let out = format!("{}public {} {}{};", spaces, ty, name, init);
                cx.state.variable_types.set(name, ty);
                return RuleOutcome::Translated(out);
            }
        }

        RuleOutcome::Translated(format!("{}public {};", spaces, declaration))
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
    fn test_struct_open_and_close() {
        let mut state = ConversionState::new();
        assert_eq!(
            run(&StructBoundaryRule, "struct T {", &mut state),
            RuleOutcome::Translated("class T {".to_string())
        );
        assert!(state.in_class_body);
        assert_eq!(run(&StructBoundaryRule, "};", &mut state), RuleOutcome::Translated("}".to_string()));
        assert!(!state.in_class_body);
    }

    #[test]
    fn test_indented_close_is_not_a_struct_close() {
        let mut state = ConversionState::new();
        assert_eq!(run(&StructBoundaryRule, "  };", &mut state), RuleOutcome::Passthrough);
    }

    #[test]
    fn test_initializer_list_constructor() {
        let mut state = ConversionState::new();
        state.enter_class_body();
        let out = run(
            &InitializerListConstructorRule,
            "  T(int i, int j, int val) : i(i), j(j), val(val) {}",
            &mut state,
        );
        assert_eq!(
            out,
            RuleOutcome::Translated(
                "  public T(int i, int j, int val) {\n    this.i = i;\n    this.j = j;\n    this.val = val;\n  }"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_initializer_list_maps_renamed_members() {
        let mut state = ConversionState::new();
        state.enter_class_body();
        let out = run(&InitializerListConstructorRule, "  ListNode(int x) : val(x), next(nullptr) {}", &mut state);
        assert_eq!(
            out,
            RuleOutcome::Translated("  public ListNode(int x) {\n    this.val = x;\n  }".to_string())
        );
    }

    #[test]
    fn test_constructor_outside_class_has_unresolved_visibility() {
        let mut state = ConversionState::new();
        let out = run(&InitializerListConstructorRule, "T(int i) : i(i) {}", &mut state);
        match out {
            RuleOutcome::Translated(text) => assert!(text.starts_with("??? T(int i) {")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_parameter_constructor_is_not_claimed() {
        let mut state = ConversionState::new();
        state.enter_class_body();
        assert_eq!(run(&InitializerListConstructorRule, "  T() : i(0) {}", &mut state), RuleOutcome::Passthrough);
    }

    #[test]
    fn test_member_declarations() {
        let mut state = ConversionState::new();
        state.enter_class_body();
        assert_eq!(
            run(&ClassMemberRule, "  int val;", &mut state),
            RuleOutcome::Translated("  public int val;".to_string())
        );
        assert_eq!(
            run(&ClassMemberRule, "  ListNode *next;", &mut state),
            RuleOutcome::Translated("  public ListNode next;".to_string())
        );
        assert_eq!(state.variable_types.describe("val"), "int");
    }

    #[test]
    fn test_container_members_are_initialized() {
        let mut state = ConversionState::new();
        state.enter_class_body();
        assert_eq!(
            run(&ClassMemberRule, "  vector<int> v;", &mut state),
            RuleOutcome::Translated("  public List<Integer> v = new ArrayList<>();".to_string())
        );
        assert_eq!(
            run(&ClassMemberRule, "  unordered_map<int, int> m;", &mut state),
            RuleOutcome::Translated("  public Map<Integer, Integer> m = new HashMap<>();".to_string())
        );
        assert_eq!(
            run(&ClassMemberRule, "  priority_queue<int> pq;", &mut state),
            RuleOutcome::Translated(
                "  public Queue<Integer> pq = new PriorityQueue<>(Collections.reverseOrder());".to_string()
            )
        );
        assert_eq!(state.variable_types.describe("v"), "List<Integer>");
    }

    #[test]
    fn test_member_rule_needs_class_body() {
        let mut state = ConversionState::new();
        assert_eq!(run(&ClassMemberRule, "  int val;", &mut state), RuleOutcome::Passthrough);
    }

    #[test]
    fn test_member_rule_skips_method_bodies() {
        let mut state = ConversionState::new();
        state.enter_class_body();
        state.class_depth = 2;
        assert_eq!(run(&ClassMemberRule, "    ++count;", &mut state), RuleOutcome::Passthrough);
    }
}
