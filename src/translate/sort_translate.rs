//! Sort Translation
//!
//! ```text
//! sort(begin(A), end(A));                 → Arrays.sort(A);
//! sort(begin(A), end(A), greater<>());    → Arrays.sort(A, (a, b) -> b - a);
//! sort(A.begin(), A.end());               → Arrays.sort(A);
//! ```
//!
//! A target registered as a `List` uses `Collections.sort` instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::java_type::Container;
use crate::translate::rule::{LineRule, RuleContext, RuleOutcome};

static SORT_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\s*)(?:std::)?sort\((?:begin\((\S+)\), end\(\S+\)|(\S+)\.begin\(\), \S+\.end\(\))(, greater<\w*>\(\))?\);$",
    )
    .expect("valid regex")
});

pub struct SortRule;

impl LineRule for SortRule {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = SORT_CALL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let spaces = &caps[1];
        let Some(target) = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str()) else {
            return RuleOutcome::Passthrough;
        };
        let descending = caps.get(4).is_some();

        let is_list = cx
            .state
            .variable_types
            .resolve(target)
            .and_then(|t| t.container())
            == Some(Container::List);

        let call = match (is_list, descending) {
            (false, false) => format!("Arrays.sort({});", target),
            (false, true) => format!("Arrays.sort({}, (a, b) -> b - a);", target),
            (true, false) => format!("Collections.sort({});", target),
            (true, true) => format!("{}.sort(Collections.reverseOrder());", target),
        };
        RuleOutcome::Translated(format!("{}{}", spaces, call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java_type::object_type_of;
    use crate::lowering::ConversionState;

    fn run(line: &str, state: &mut ConversionState) -> RuleOutcome {
        let mut cx = RuleContext { state, line_number: 1, indent: "  " };
        SortRule.apply(line, &mut cx)
    }

    fn translated(text: &str) -> RuleOutcome {
        RuleOutcome::Translated(text.to_string())
    }

    #[test]
    fn test_array_sorts() {
        let mut state = ConversionState::new();
        assert_eq!(run("sort(begin(nums), end(nums));", &mut state), translated("Arrays.sort(nums);"));
        assert_eq!(
            run("sort(begin(nums), end(nums), greater<>());", &mut state),
            translated("Arrays.sort(nums, (a, b) -> b - a);")
        );
        assert_eq!(
            run("  sort(begin(matrix[0]), end(matrix[0]));", &mut state),
            translated("  Arrays.sort(matrix[0]);")
        );
        assert_eq!(run("sort(A.begin(), A.end());", &mut state), translated("Arrays.sort(A);"));
    }

    #[test]
    fn test_list_sorts() {
        let mut state = ConversionState::new();
        state.variable_types.set("words", object_type_of("vector<string>"));
        assert_eq!(run("sort(words.begin(), words.end());", &mut state), translated("Collections.sort(words);"));
        assert_eq!(
            run("sort(begin(words), end(words), greater<string>());", &mut state),
            translated("words.sort(Collections.reverseOrder());")
        );
    }

    #[test]
    fn test_custom_comparator_is_left_alone() {
        let mut state = ConversionState::new();
        assert_eq!(
            run("sort(begin(A), end(A), [](int a, int b) { return a > b; });", &mut state),
            RuleOutcome::Passthrough
        );
    }
}
