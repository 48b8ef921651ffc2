//! Java Type Model and Type Translator
//!
//! Target types are kept as a small tree and only rendered to text when a
//! rule emits a line. The translator maps a [`CppType`] to a [`JavaType`] in
//! one of two forms:
//!
//! ```text
//! Unboxed (declarations, parameters, array elements):
//!   vector<vector<int>>         → int[][]
//!   const string&               → final String
//!
//! Boxed (generic type arguments):
//!   vector<pair<int, long>>     → List<Pair<Integer, Long>>
//!   int                         → Integer
//! ```
//!
//! Generic arguments are always built in boxed form and array elements in
//! unboxed form, so the rendered text cannot mix the two.

use std::fmt;

use crate::cpp_type::CppType;

//=============================================================================
// PRIMITIVES
//=============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Long,
    Short,
    Byte,
    Char,
    Boolean,
    Double,
    Float,
    Void,
}

impl Primitive {
    /// Map a C++ (or Java) scalar spelling to a primitive
    pub fn from_name(name: &str) -> Option<Primitive> {
        let p = match name {
            "int" | "unsigned" | "unsigned int" | "signed" | "int32_t" | "uint32_t" => {
                Primitive::Int
            }
            "long" | "long long" | "unsigned long" | "unsigned long long" | "long int"
            | "long long int" | "int64_t" | "uint64_t" | "size_t" => Primitive::Long,
            "short" | "unsigned short" => Primitive::Short,
            "byte" | "uint8_t" | "int8_t" => Primitive::Byte,
            "char" | "unsigned char" => Primitive::Char,
            "bool" | "boolean" => Primitive::Boolean,
            "double" | "long double" => Primitive::Double,
            "float" => Primitive::Float,
            "void" => Primitive::Void,
            _ => return None,
        };
        Some(p)
    }

    pub fn java_name(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Short => "short",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Boolean => "boolean",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Void => "void",
        }
    }

    pub fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Short => "Short",
            Primitive::Byte => "Byte",
            Primitive::Char => "Character",
            Primitive::Boolean => "Boolean",
            Primitive::Double => "Double",
            Primitive::Float => "Float",
            Primitive::Void => "Void",
        }
    }
}

//=============================================================================
// CONTAINERS
//=============================================================================

/// Java collection families reachable from the C++ standard containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    List,
    HashSet,
    TreeSet,
    HashMap,
    TreeMap,
    Queue,
    PriorityQueue,
    Deque,
}

impl Container {
    /// C++ container name → Java collection family
    pub fn from_cpp(name: &str) -> Option<Container> {
        let c = match name {
            "vector" => Container::List,
            "unordered_set" => Container::HashSet,
            "set" => Container::TreeSet,
            "unordered_map" => Container::HashMap,
            "map" => Container::TreeMap,
            "queue" => Container::Queue,
            "priority_queue" => Container::PriorityQueue,
            "stack" | "deque" => Container::Deque,
            _ => return None,
        };
        Some(c)
    }

    /// Declared (interface) type name
    pub fn interface(self) -> &'static str {
        match self {
            Container::List => "List",
            Container::HashSet | Container::TreeSet => "Set",
            Container::HashMap => "Map",
            Container::TreeMap => "TreeMap",
            Container::Queue | Container::PriorityQueue => "Queue",
            Container::Deque => "Deque",
        }
    }

    /// Constructed (implementation) type name
    pub fn implementation(self) -> &'static str {
        match self {
            Container::List => "ArrayList",
            Container::HashSet => "HashSet",
            Container::TreeSet => "TreeSet",
            Container::HashMap => "HashMap",
            Container::TreeMap => "TreeMap",
            Container::Queue | Container::Deque => "ArrayDeque",
            Container::PriorityQueue => "PriorityQueue",
        }
    }

    /// Number of generic arguments the Java side takes
    pub fn arity(self) -> usize {
        match self {
            Container::HashMap | Container::TreeMap => 2,
            _ => 1,
        }
    }

    pub fn is_map(self) -> bool {
        matches!(self, Container::HashMap | Container::TreeMap)
    }
}

//=============================================================================
// JAVA TYPES
//=============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    /// `int`, `long`, ...
    Primitive(Primitive),
    /// `Integer`, `Long`, ...
    Boxed(Primitive),
    /// Any non-generic reference type: `String`, `TreeNode`, `StringBuilder`, `var`
    Object(String),
    /// `elem[]...[]`; `elem` is never itself an array
    Array { elem: Box<JavaType>, dims: usize },
    /// A known collection with boxed arguments
    Generic { container: Container, args: Vec<JavaType> },
    /// A user generic class with boxed arguments: `Foo<Integer>`
    Class { name: String, args: Vec<JavaType> },
    /// `Pair<K, V>` with boxed components
    Pair(Box<JavaType>, Box<JavaType>),
    /// `final T`
    Final(Box<JavaType>),
    /// Untranslated text
    Raw(String),
}

/// Which spelling of a type a position requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Unboxed,
    Boxed,
}

impl JavaType {
    pub fn array_of(elem: JavaType, dims: usize) -> JavaType {
        match elem {
            JavaType::Array { elem, dims: inner } => JavaType::Array { elem, dims: inner + dims },
            other => JavaType::Array { elem: Box::new(other), dims },
        }
    }

    pub fn generic(container: Container, args: Vec<JavaType>) -> JavaType {
        JavaType::Generic { container, args }
    }

    /// Strip a `final` qualifier
    pub fn without_final(&self) -> &JavaType {
        match self {
            JavaType::Final(inner) => inner.without_final(),
            other => other,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.without_final(), JavaType::Array { .. })
    }

    pub fn container(&self) -> Option<Container> {
        match self.without_final() {
            JavaType::Generic { container, .. } => Some(*container),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        self.container().map_or(false, Container::is_map)
    }

    /// Element type produced by indexing or iterating once.
    /// Maps have no single element type.
    pub fn element(&self) -> Option<JavaType> {
        match self.without_final() {
            JavaType::Array { elem, dims } if *dims > 1 => Some(JavaType::Array {
                elem: elem.clone(),
                dims: dims - 1,
            }),
            JavaType::Array { elem, .. } => Some((**elem).clone()),
            JavaType::Generic { container, args } if !container.is_map() => args.first().cloned(),
            _ => None,
        }
    }

    /// `(key, value)` types of a map
    pub fn map_parts(&self) -> Option<(&JavaType, &JavaType)> {
        match self.without_final() {
            JavaType::Generic { container, args } if container.is_map() && args.len() == 2 => {
                Some((&args[0], &args[1]))
            }
            _ => None,
        }
    }

    /// `(first, second)` types of a pair
    pub fn pair_parts(&self) -> Option<(&JavaType, &JavaType)> {
        match self.without_final() {
            JavaType::Pair(first, second) => Some((first, second)),
            _ => None,
        }
    }

    /// Primitive spelling of a boxed scalar, used for local bindings
    pub fn unboxed(&self) -> JavaType {
        match self {
            JavaType::Boxed(p) => JavaType::Primitive(*p),
            other => other.clone(),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(p) => write!(f, "{}", p.java_name()),
            JavaType::Boxed(p) => write!(f, "{}", p.boxed_name()),
            JavaType::Object(name) | JavaType::Raw(name) => write!(f, "{}", name),
            JavaType::Array { elem, dims } => write!(f, "{}{}", elem, "[]".repeat(*dims)),
            JavaType::Generic { container, args } => {
                write!(f, "{}<{}>", container.interface(), join(args))
            }
            JavaType::Class { name, args } => write!(f, "{}<{}>", name, join(args)),
            JavaType::Pair(first, second) => write!(f, "Pair<{}, {}>", first, second),
            JavaType::Final(inner) => write!(f, "final {}", inner),
        }
    }
}

fn join(args: &[JavaType]) -> String {
    args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

//=============================================================================
// TRANSLATION
//=============================================================================

/// Translate a parsed C++ type into the requested Java form
pub fn translate(ty: &CppType, form: Form) -> JavaType {
    match ty {
        CppType::Reference(inner) | CppType::Pointer(inner) => translate(inner, form),
        CppType::Const(inner) => {
            let translated = translate(inner, form);
            match (form, &translated) {
                (Form::Unboxed, JavaType::Primitive(_))
                | (Form::Unboxed, JavaType::Object(_))
                | (Form::Unboxed, JavaType::Boxed(_)) => JavaType::Final(Box::new(translated)),
                _ => translated,
            }
        }
        CppType::Named { name, args } => translate_named(name, args, form),
        CppType::Unparsed(text) => JavaType::Raw(text.clone()),
    }
}

fn translate_named(name: &str, args: &[CppType], form: Form) -> JavaType {
    if args.is_empty() {
        if let Some(p) = Primitive::from_name(name) {
            return match form {
                Form::Unboxed => JavaType::Primitive(p),
                Form::Boxed => JavaType::Boxed(p),
            };
        }
        return match name {
            "string" => JavaType::Object("String".to_string()),
            "auto" => JavaType::Object("var".to_string()),
            other => JavaType::Object(other.to_string()),
        };
    }

    let boxed_args = || args.iter().map(|a| translate(a, Form::Boxed)).collect::<Vec<_>>();

    if name == "pair" {
        return match boxed_args().as_slice() {
            [first, second] => JavaType::Pair(Box::new(first.clone()), Box::new(second.clone())),
            _ => JavaType::Raw(render_cpp(name, args)),
        };
    }

    match Container::from_cpp(name) {
        Some(Container::List) if form == Form::Unboxed && args.len() == 1 => {
            JavaType::array_of(translate(&args[0], Form::Unboxed), 1)
        }
        Some(container) => {
            let translated = boxed_args();
            if translated.len() < container.arity() {
                return JavaType::Raw(render_cpp(name, args));
            }
            // priority_queue<T, vector<T>, greater<>> keeps only T
            let kept = translated.into_iter().take(container.arity()).collect();
            JavaType::generic(container, kept)
        }
        None => JavaType::Class { name: name.to_string(), args: boxed_args() },
    }
}

fn render_cpp(name: &str, args: &[CppType]) -> String {
    format!("{}<{}>", name, args.iter().map(cpp_text).collect::<Vec<_>>().join(", "))
}

fn cpp_text(ty: &CppType) -> String {
    match ty {
        CppType::Named { name, args } if args.is_empty() => name.clone(),
        CppType::Named { name, args } => render_cpp(name, args),
        CppType::Pointer(inner) => format!("{}*", cpp_text(inner)),
        CppType::Reference(inner) => format!("{}&", cpp_text(inner)),
        CppType::Const(inner) => format!("const {}", cpp_text(inner)),
        CppType::Unparsed(text) => text.clone(),
    }
}

/// Unboxed translation of a C++ type spelling
pub fn java_type_of(cpp: &str) -> JavaType {
    translate(&CppType::parse(cpp), Form::Unboxed)
}

/// Boxed translation of a C++ type spelling
pub fn object_type_of(cpp: &str) -> JavaType {
    translate(&CppType::parse(cpp), Form::Boxed)
}

/// `const vector<int>&` → `int[]`
pub fn to_java_type(cpp: &str) -> String {
    java_type_of(cpp).to_string()
}

/// `int` → `Integer`, `pair<char, long>` → `Pair<Character, Long>`
pub fn to_object_type(cpp: &str) -> String {
    object_type_of(cpp).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(to_java_type("long long"), "long");
        assert_eq!(to_java_type("bool"), "boolean");
        assert_eq!(to_java_type("string"), "String");
        assert_eq!(to_java_type("const int"), "final int");
        assert_eq!(to_java_type("const string&"), "final String");
        assert_eq!(to_object_type("char"), "Character");
    }

    #[test]
    fn test_vectors_become_arrays_when_unboxed() {
        assert_eq!(to_java_type("const vector<int>&"), "int[]");
        assert_eq!(to_java_type("vector<vector<int>>&"), "int[][]");
        assert_eq!(to_java_type("vector<vector<vector<long long>>>"), "long[][][]");
        assert_eq!(to_java_type("vector<string>"), "String[]");
    }

    #[test]
    fn test_vectors_become_lists_when_boxed() {
        assert_eq!(to_object_type("vector<int>"), "List<Integer>");
        assert_eq!(
            to_object_type("vector<pair<int, long>>"),
            "List<Pair<Integer, Long>>"
        );
    }

    #[test]
    fn test_associative_containers() {
        assert_eq!(to_java_type("const unordered_map<char, int>&"), "Map<Character, Integer>");
        assert_eq!(to_java_type("map<string, vector<int>>"), "TreeMap<String, List<Integer>>");
        assert_eq!(to_java_type("unordered_set<int>"), "Set<Integer>");
        assert_eq!(to_java_type("deque<int>"), "Deque<Integer>");
    }

    #[test]
    fn test_pointers_and_pairs() {
        assert_eq!(to_java_type("TreeNode*"), "TreeNode");
        assert_eq!(to_object_type("pair<TreeNode*, int>"), "Pair<TreeNode, Integer>");
        assert_eq!(to_java_type("pair<int, int>"), "Pair<Integer, Integer>");
    }

    #[test]
    fn test_nested_container_of_pairs_composes() {
        let ty = java_type_of("vector<vector<pair<int, long>>>");
        assert_eq!(ty.to_string(), "Pair<Integer, Long>[][]");
        let ty = object_type_of("vector<vector<pair<int, long>>>");
        assert_eq!(ty.to_string(), "List<List<Pair<Integer, Long>>>");
    }

    #[test]
    fn test_triple_nesting_element_round_trip() {
        let ty = java_type_of("vector<vector<vector<int>>>");
        let leaf = ty
            .element()
            .and_then(|t| t.element())
            .and_then(|t| t.element())
            .expect("three levels");
        assert_eq!(leaf, java_type_of("int"));
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(to_java_type("UF"), "UF");
        assert_eq!(to_java_type("int (*)(int)"), "int (*)(int)");
        assert_eq!(to_java_type("Foo<int>"), "Foo<Integer>");
    }

    #[test]
    fn test_priority_queue_drops_comparator_arguments() {
        let ty = object_type_of("priority_queue<int, vector<int>, greater<>>");
        assert_eq!(ty.to_string(), "Queue<Integer>");
        assert_eq!(ty.container(), Some(Container::PriorityQueue));
    }

    #[test]
    fn test_map_and_pair_parts() {
        let ty = java_type_of("unordered_map<string, int>");
        let (k, v) = ty.map_parts().expect("map");
        assert_eq!(k.to_string(), "String");
        assert_eq!(v.unboxed().to_string(), "int");
        assert!(ty.element().is_none());
    }
}
