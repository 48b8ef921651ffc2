//! Function Definition Translation
//!
//! Translates C++ function headers to Java method headers.
//!
//! C++ function syntax:
//! ```text
//! long long myFunc(const string& param1, bool param2) {
//! ```
//!
//! Java method syntax:
//! ```text
//! public long myFunc(final String param1, boolean param2) {
//! ```
//!
//! Parameter names are registered with their Java types so the body can
//! resolve them.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::cpp_type::{split_param, split_top_level};
use crate::java_type::{java_type_of, JavaType};
use crate::keywords::{is_reserved, starts_with_visibility};
use crate::translate::rule::{LineRule, RuleContext, RuleOutcome};

static FUNCTION_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(.*) (\w+)\((.*)\) \{$").expect("valid regex"));

/// Specifiers that may precede a return type
const SPECIFIERS: &[&str] = &["static", "inline", "virtual", "explicit", "constexpr"];

/// Translate a C++ parameter list into `(type, name)` pairs.
/// Default values are dropped.
pub fn translate_params(params: &str) -> Vec<(JavaType, String)> {
    split_top_level(params)
        .iter()
        .filter(|p| !p.is_empty() && p.as_str() != "void")
        .map(|p| {
            let without_default = p.split(" = ").next().unwrap_or(p);
            let (cpp_type, name) = split_param(without_default);
            (java_type_of(&cpp_type), name)
        })
        .collect()
}

/// Render translated parameters and register their names
pub fn emit_params(params: &[(JavaType, String)], cx: &mut RuleContext<'_>) -> String {
    for (ty, name) in params {
        cx.state.variable_types.set(name, ty.clone());
    }
    params
        .iter()
        .map(|(ty, name)| format!("{} {}", ty, name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `ret name(params) {` → `visibility ret' name(params') {`
pub struct FunctionDefRule;

impl LineRule for FunctionDefRule {
    fn name(&self) -> &'static str {
        "function-def"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = FUNCTION_DEF.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, return_type, func_name, params) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        if is_reserved(func_name)
            || starts_with_visibility(return_type)
            || return_type.contains(['=', '(', ')', ';', '}'])
            || return_type.split_whitespace().any(is_reserved)
        {
            return RuleOutcome::Passthrough;
        }

        let mut is_static = false;
        let mut rest = return_type.trim();
        while let Some((word, tail)) = rest.split_once(' ') {
            if !SPECIFIERS.contains(&word) {
                break;
            }
            is_static |= word == "static";
            rest = tail.trim_start();
        }

        let java_return = java_type_of(rest);
        let params = translate_params(params);
        let java_params = emit_params(&params, cx);
        let visibility = cx.state.method_visibility();
        let modifiers = if is_static {
            format!("{} static", visibility)
        } else {
            visibility.to_string()
        };

        trace!(function = func_name, params = params.len(), "function header");
        RuleOutcome::Translated(format!(
            "{}{} {} {}({}) {{",
            spaces, modifiers, java_return, func_name, java_params
        ))
    }
}
