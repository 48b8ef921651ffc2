//! Range-Based For Translation
//!
//! ```text
//! for (const vector<int>& edge : edges)      → for (int[] edge : edges)
//! for (const int num : nums)                 → for (final int num : nums)
//! for (const auto& [v, w] : graph[u])        → for (Pair<Integer, Long> pair : graph[u]) {
//!                                                final int v = pair.getKey();
//!                                                final long w = pair.getValue();
//! for (const auto& [key, value] : count)     → for (Map.Entry<String, Integer> entry : count.entrySet()) {
//!                                                final String key = entry.getKey();
//!                                                final int value = entry.getValue();
//! for (const auto& [_, value] : count)       → for (final int value : count.values())
//! for (const auto& [key, _] : count)         → for (final String key : count.keySet())
//! ```
//!
//! Structured bindings need the registered type of the iterable. When it is
//! unknown the line is kept as is and a diagnostic is reported.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::cpp_type::CppType;
use crate::java_type::{translate, Form, JavaType};
use crate::translate::rule::{Fallback, LineRule, RuleContext, RuleOutcome};
use crate::type_registry::UNKNOWN_TYPE;

static RANGE_FOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)for \((.+) ([*&]*)(\w+) : (\S+)\)(.*)$").expect("valid regex")
});
static STRUCTURED_BINDING_FOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)for \((?:const )?auto ?(?:&{1,2})? ?\[(\w+), (\w+)\] : ([^)]+)\)(.*)$")
        .expect("valid regex")
});

/// Name meaning "ignore this component"
const WILDCARD: &str = "_";

fn is_const(ty: &CppType) -> bool {
    match ty {
        CppType::Const(_) => true,
        CppType::Reference(inner) | CppType::Pointer(inner) => is_const(inner),
        _ => false,
    }
}

fn finalize(ty: JavaType) -> JavaType {
    match ty {
        JavaType::Primitive(_) | JavaType::Object(_) => JavaType::Final(Box::new(ty)),
        other => other,
    }
}

/// Close a binding block whose loop body sits on the header line.
/// An empty rest or a lone `{` leaves the block open for the following lines.
fn with_body(head: String, rest: &str, spaces: &str, indent: &str) -> String {
    match rest.trim() {
        "" | "{" => head,
        body => format!("{}\n{}{}{}\n{}}}", head, spaces, indent, body, spaces),
    }
}

//=============================================================================
// PLAIN RANGE-FOR
//=============================================================================

pub struct RangeForRule;

impl LineRule for RangeForRule {
    fn name(&self) -> &'static str {
        "range-for"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = RANGE_FOR.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, cpp_type, var, iterable, rest) = (&caps[1], &caps[2], &caps[4], &caps[5], &caps[6]);
        if cpp_type.contains([';', '=']) {
            return RuleOutcome::Passthrough;
        }

        let parsed = CppType::parse(&format!("{}{}", cpp_type, &caps[3]));
        let ty = if parsed.head_name() == Some("auto") {
            let element = cx
                .state
                .variable_types
                .resolve(iterable)
                .and_then(|t| t.element())
                .map(|t| t.unboxed());
            match element {
                Some(elem) if is_const(&parsed) => finalize(elem),
                Some(elem) => elem,
                None => translate(&parsed, Form::Unboxed),
            }
        } else {
            translate(&parsed, Form::Unboxed)
        };

        let out = format!("{}for ({} {} : {}){}", spaces, ty, var, iterable, rest);
        cx.state.variable_types.set(var, ty);
        RuleOutcome::Translated(out)
    }
}

//=============================================================================
// STRUCTURED BINDINGS
//=============================================================================

pub struct StructuredBindingForRule;

impl LineRule for StructuredBindingForRule {
    fn name(&self) -> &'static str {
        "structured-binding-for"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = STRUCTURED_BINDING_FOR.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, key, value, iterable) = (&caps[1], &caps[2], &caps[3], caps[4].trim());
        let rest = &caps[5];
        let indent = cx.indent;

        let Some(container) = cx.state.variable_types.resolve(iterable) else {
            return RuleOutcome::unresolved(format!("Failed to parse '{}'", UNKNOWN_TYPE), Fallback::KeepLine);
        };

        // list of pairs: the element is the pair
        if let Some((first, second)) = container.element().as_ref().and_then(JavaType::pair_parts) {
            let (key_type, value_type) = (first.unboxed(), second.unboxed());
            let head = format!(
                "{ws}for (Pair<{k}, {v}> pair : {it}) {{\n{ws}{ind}final {kt} {key} = pair.getKey();\n{ws}{ind}final {vt} {value} = pair.getValue();",
                ws = spaces,
                k = first,
                v = second,
                it = iterable,
                ind = indent,
                kt = key_type,
                vt = value_type,
                key = key,
                value = value,
            );
            trace!(iterable, "pair binding");
            cx.state.variable_types.set(key, key_type);
            cx.state.variable_types.set(value, value_type);
            return RuleOutcome::Translated(with_body(head, rest, spaces, indent));
        }

        if let Some((first, second)) = container.map_parts() {
            let (object_key, object_value) = (first.to_string(), second.to_string());
            let (key_type, value_type) = (first.unboxed(), second.unboxed());

            let out = if key == WILDCARD {
                cx.state.variable_types.set(value, value_type.clone());
                format!("{}for (final {} {} : {}.values()){}", spaces, value_type, value, iterable, rest)
            } else if value == WILDCARD {
                cx.state.variable_types.set(key, key_type.clone());
                format!("{}for (final {} {} : {}.keySet()){}", spaces, key_type, key, iterable, rest)
            } else {
                cx.state.variable_types.set(key, key_type.clone());
                cx.state.variable_types.set(value, value_type.clone());
                let head = format!(
                    "{ws}for (Map.Entry<{k}, {v}> entry : {it}.entrySet()) {{\n{ws}{ind}final {kt} {key} = entry.getKey();\n{ws}{ind}final {vt} {value} = entry.getValue();",
                    ws = spaces,
                    k = object_key,
                    v = object_value,
                    it = iterable,
                    ind = indent,
                    kt = key_type,
                    vt = value_type,
                    key = key,
                    value = value,
                );
                with_body(head, rest, spaces, indent)
            };
            trace!(iterable, "map binding");
            return RuleOutcome::Translated(out);
        }

        RuleOutcome::unresolved(format!("Failed to parse '{}'", container), Fallback::KeepLine)
    }
}
