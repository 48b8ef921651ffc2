//! Container Declaration Translation
//!
//! Translates standard-library container declarations into Java collection or
//! array declarations and records the declared type in the registry.
//!
//! ```text
//! unordered_map<char, int> count;            → Map<Character, Integer> count = new HashMap<>();
//! priority_queue<int> maxHeap;               → Queue<Integer> maxHeap = new PriorityQueue<>(Collections.reverseOrder());
//! vector<int> A{1, f(x)};                    → List<Integer> A = new ArrayList<>(Arrays.asList(1, f(x)));
//! vector<int> A(1 + B.size());               → int[] A = new int[1 + B.size()];
//! vector<vector<long long>> A(m, vector<long long>(n));
//!                                            → long[][] A = new long[m][n];
//! vector<vector<int>> graph(n);              → List<Integer>[] graph = new List[n];
//!                                              (blank line)
//!                                              for (int i = 0; i < n; ++i)
//!                                                graph[i] = new ArrayList<>();
//! string s;                                  → StringBuilder s = new StringBuilder();
//! ```
//!
//! A Java array of generic lists cannot be created with its element type, so
//! the outer-size-only nested vector needs an explicit per-row allocation.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::cpp_type::{split_top_level, CppType};
use crate::java_type::{
    java_type_of, object_type_of, translate, Container, Form, JavaType,
};
use crate::keywords::DEFAULT_CONSTRUCTED;
use crate::translate::rule::{LineRule, RuleContext, RuleOutcome};

static DEFAULT_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)((?:std::)?(\w+)<.*>) (\w+);$").expect("valid regex"));
static PRIORITY_QUEUE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)((?:std::)?priority_queue<.*>) (\w+);$").expect("valid regex")
});
static QUEUE_INIT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:std::)?queue<(.*)> (\w+)\{\{(.*)\}\};$").expect("valid regex")
});
static VECTOR_INIT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:std::)?vector<([^<>]+|pair<[^<>]+>)> (\w+)(?: = )?\{(.*)\};$")
        .expect("valid regex")
});
static SIZED_VECTOR_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:std::)?vector<([^<>]+)> (\w+)\((.*)\);$").expect("valid regex")
});
static SIZED_2D_VECTOR_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:std::)?vector<vector<([^<>]+)>> (\w+)\((.+), vector<[^<>]+>\((.*)\)\);$")
        .expect("valid regex")
});
static OUTER_SIZED_VECTOR_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(?:std::)?vector<vector<(.*)>> (\w+)\((.*)\);$").expect("valid regex")
});
static BEGIN_END_FREE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^begin\((\S+)\)$").expect("valid regex"));
static BEGIN_END_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)\.begin\(\)$").expect("valid regex"));
static ITERATOR_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\W)(?:c|r|cr)?(?:begin|end)\(").expect("valid regex"));
static STRING_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(?:std::)?string (\w+);$").expect("valid regex"));

/// Register `var` and emit the declaration line
fn declare(cx: &mut RuleContext<'_>, var: &str, ty: JavaType, text: String) -> RuleOutcome {
    trace!(var, ty = %ty, "container declaration");
    cx.state.variable_types.set(var, ty);
    RuleOutcome::Translated(text)
}

/// `{root, 1}, {node, 2}` → `new Pair<>(root, 1), new Pair<>(node, 2)`
pub fn to_java_initializer_list(initializer_list: &str) -> String {
    initializer_list
        .split("}, ")
        .map(|pair| pair.trim_start_matches('{').trim_end_matches('}'))
        .map(|pair| format!("new Pair<>({})", pair))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `B.begin()`, `begin(B)`, `B.end() - 1`, `rbegin(B)` ...
pub fn is_iterator_arg(arg: &str) -> bool {
    ITERATOR_CALL.is_match(arg)
}

/// The container `B` of a whole-range argument pair `begin(B), end(B)` or
/// `B.begin(), B.end()`
pub fn full_range(args: &[String]) -> Option<&str> {
    let [first, last] = args else {
        return None;
    };
    let (base, end) = if let Some(c) = BEGIN_END_FREE.captures(first) {
        let base = c.get(1)?.as_str();
        (base, format!("end({})", base))
    } else {
        let base = BEGIN_END_METHOD.captures(first)?.get(1)?.as_str();
        (base, format!("{}.end()", base))
    };
    (*last == end).then_some(base)
}

//=============================================================================
// DEFAULT-CONSTRUCTED CONTAINERS
//=============================================================================

/// `set<int> seen;`, `stack<char> st;`, `map<K, V> m;`, `vector<int> A;` ...
pub struct DefaultContainerDeclRule;

impl LineRule for DefaultContainerDeclRule {
    fn name(&self) -> &'static str {
        "default-container-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = DEFAULT_DECL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, cpp_type, head, var) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        let Some((_, container)) = DEFAULT_CONSTRUCTED.iter().find(|(name, _)| *name == head) else {
            return RuleOutcome::Passthrough;
        };

        let ty = object_type_of(cpp_type);
        if ty.container() != Some(*container) {
            return RuleOutcome::Passthrough;
        }
        let text = format!("{}{} {} = new {}<>();", spaces, ty, var, container.implementation());
        declare(cx, var, ty, text)
    }
}

//=============================================================================
// PRIORITY QUEUES
//=============================================================================

/// Max-heap by default; `greater<>` as comparator makes a min-heap
pub struct PriorityQueueDeclRule;

impl LineRule for PriorityQueueDeclRule {
    fn name(&self) -> &'static str {
        "priority-queue-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = PRIORITY_QUEUE_DECL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, cpp_type, var) = (&caps[1], &caps[2], &caps[3]);

        let CppType::Named { args, .. } = CppType::parse(cpp_type) else {
            return RuleOutcome::Passthrough;
        };
        let Some(elem) = args.first() else {
            return RuleOutcome::Passthrough;
        };
        let is_min_heap = args.get(2).and_then(CppType::head_name) == Some("greater");

        let ty = JavaType::generic(Container::PriorityQueue, vec![translate(elem, Form::Boxed)]);
        let ordering = if is_min_heap { "" } else { "Collections.reverseOrder()" };
        let text = format!("{}{} {} = new PriorityQueue<>({});", spaces, ty, var, ordering);
        declare(cx, var, ty, text)
    }
}

//=============================================================================
// INITIALIZER LISTS
//=============================================================================

/// `queue<T> q{{a, b}};` and `vector<T> v{a, b};`
pub struct InitializerListDeclRule;

impl LineRule for InitializerListDeclRule {
    fn name(&self) -> &'static str {
        "initializer-list-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        if let Some(caps) = QUEUE_INIT_DECL.captures(line) {
            let (spaces, elem, var, items) = (&caps[1], &caps[2], &caps[3], &caps[4]);
            let elem = object_type_of(elem);
            let items = if elem.pair_parts().is_some() {
                to_java_initializer_list(items)
            } else {
                items.to_string()
            };
            let ty = JavaType::generic(Container::Queue, vec![elem]);
            let text = format!("{}{} {} = new ArrayDeque<>(Arrays.asList({}));", spaces, ty, var, items);
            return declare(cx, var, ty, text);
        }

        if let Some(caps) = VECTOR_INIT_DECL.captures(line) {
            let (spaces, elem, var, items) = (&caps[1], &caps[2], &caps[3], &caps[4]);
            let elem = object_type_of(elem);
            let items = if elem.pair_parts().is_some() {
                to_java_initializer_list(items)
            } else {
                items.to_string()
            };
            let ty = JavaType::generic(Container::List, vec![elem]);
            let text = format!("{}{} {} = new ArrayList<>(Arrays.asList({}));", spaces, ty, var, items);
            return declare(cx, var, ty, text);
        }

        RuleOutcome::Passthrough
    }
}

//=============================================================================
// SIZED VECTORS → ARRAYS
//=============================================================================

/// `vector<T> v(n);` and `vector<T> v(n, fill);`
pub struct SizedVectorDeclRule;

impl LineRule for SizedVectorDeclRule {
    fn name(&self) -> &'static str {
        "sized-vector-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = SIZED_VECTOR_DECL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, elem, var, args) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        let args = split_top_level(args);
        if args.iter().any(|arg| is_iterator_arg(arg)) {
            return copy_range(spaces, elem, var, &args, cx);
        }

        let elem = java_type_of(elem);
        let ty = JavaType::array_of(elem.clone(), 1);
        let text = match args.as_slice() {
            [size] => format!("{}{} {} = new {}[{}];", spaces, ty, var, elem, size),
            [size, fill] => format!(
                "{}{} {} = new {}[{}];\n{}Arrays.fill({}, {});",
                spaces, ty, var, elem, size, spaces, var, fill
            ),
            _ => return RuleOutcome::Passthrough,
        };
        declare(cx, var, ty, text)
    }
}

/// `vector<T> v(B.begin(), B.end());` copies a registered container or array.
/// Partial ranges are left to the later phases.
fn copy_range(spaces: &str, elem: &str, var: &str, args: &[String], cx: &mut RuleContext<'_>) -> RuleOutcome {
    let Some(source) = full_range(args) else {
        return RuleOutcome::Passthrough;
    };
    let Some(source_type) = cx.state.variable_types.resolve(source) else {
        return RuleOutcome::Passthrough;
    };

    if source_type.is_array() {
        let ty = JavaType::array_of(java_type_of(elem), 1);
        if ty != *source_type.without_final() {
            return RuleOutcome::Passthrough;
        }
        let text = format!("{}{} {} = {}.clone();", spaces, ty, var, source);
        return declare(cx, var, ty, text);
    }
    if source_type.container().is_some() && !source_type.is_map() {
        let ty = JavaType::generic(Container::List, vec![object_type_of(elem)]);
        let text = format!("{}{} {} = new ArrayList<>({});", spaces, ty, var, source);
        return declare(cx, var, ty, text);
    }
    RuleOutcome::Passthrough
}

/// `vector<vector<T>> v(m, vector<T>(n));`, optionally with a fill value
pub struct Sized2DVectorDeclRule;

impl LineRule for Sized2DVectorDeclRule {
    fn name(&self) -> &'static str {
        "sized-2d-vector-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = SIZED_2D_VECTOR_DECL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, elem, var, rows, inner) = (&caps[1], &caps[2], &caps[3], &caps[4], &caps[5]);

        let elem = java_type_of(elem);
        let row_type = JavaType::array_of(elem.clone(), 1);
        let ty = JavaType::array_of(elem.clone(), 2);
        let text = match split_top_level(inner).as_slice() {
            [cols] => format!("{}{} {} = new {}[{}][{}];", spaces, ty, var, elem, rows, cols),
            [cols, fill] => format!(
                "{}{} {} = new {}[{}][{}];\n{}for ({} row : {})\n{}{}Arrays.fill(row, {});",
                spaces, ty, var, elem, rows, cols, spaces, row_type, var, spaces, cx.indent, fill
            ),
            _ => return RuleOutcome::Passthrough,
        };
        declare(cx, var, ty, text)
    }
}

/// `vector<vector<T>> graph(n);` → array of lists with explicit row allocation
pub struct OuterSizedVectorDeclRule;

impl LineRule for OuterSizedVectorDeclRule {
    fn name(&self) -> &'static str {
        "outer-sized-vector-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = OUTER_SIZED_VECTOR_DECL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, elem, var, size) = (&caps[1], &caps[2], &caps[3], &caps[4]);
        if split_top_level(size).len() != 1 {
            return RuleOutcome::Passthrough;
        }

        let row = JavaType::generic(Container::List, vec![object_type_of(elem)]);
        let ty = JavaType::array_of(row, 1);
        let text = format!(
            "{ws}{ty} {var} = new List[{size}];\n\n{ws}for (int i = 0; i < {size}; ++i)\n{ws}{indent}{var}[i] = new ArrayList<>();",
            ws = spaces,
            ty = ty,
            var = var,
            size = size,
            indent = cx.indent,
        );
        declare(cx, var, ty, text)
    }
}

//=============================================================================
// STRINGS
//=============================================================================

/// `string s;` → `StringBuilder s = new StringBuilder();`
pub struct StringDeclRule;

impl LineRule for StringDeclRule {
    fn name(&self) -> &'static str {
        "string-decl"
    }

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome {
        let Some(caps) = STRING_DECL.captures(line) else {
            return RuleOutcome::Passthrough;
        };
        let (spaces, var) = (&caps[1], &caps[2]);
        let ty = JavaType::Object("StringBuilder".to_string());
        let text = format!("{}{} {} = new StringBuilder();", spaces, ty, var);
        declare(cx, var, ty, text)
    }
}
