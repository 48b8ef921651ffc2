//! Variable Type Registry
//!
//! Maps variable names to the Java type their declaration produced. Rules
//! write it when they recognize a declaration and read it when a later line
//! needs the concrete type of a variable (peek/pop idioms, structured
//! bindings, `.size()` on arrays).
//!
//! Lookups for names that were never declared through a recognized shape
//! return `None`; callers report that as `UNKNOWN_TYPE`.

use std::collections::HashMap;

use crate::java_type::JavaType;

/// Spelling used in diagnostics for a name with no registered type
pub const UNKNOWN_TYPE: &str = "UNKNOWN_TYPE";

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, JavaType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self { types: HashMap::new() }
    }

    /// Record a declaration. Redeclaring a name overwrites it.
    pub fn set(&mut self, name: &str, ty: JavaType) {
        self.types.insert(name.to_string(), ty);
    }

    pub fn get(&self, name: &str) -> Option<&JavaType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve the type of a possibly subscripted expression such as
    /// `graph[u]` or `grid[i][j]`: look up the base name, then peel one
    /// element level per subscript.
    pub fn resolve(&self, expr: &str) -> Option<JavaType> {
        let (base, subscripts) = split_subscripts(expr);
        let mut ty = self.get(base)?.clone();
        for _ in 0..subscripts {
            ty = ty.element()?;
        }
        Some(ty)
    }

    /// Rendered type of `expr`, or [`UNKNOWN_TYPE`]
    pub fn describe(&self, expr: &str) -> String {
        self.resolve(expr)
            .map(|ty| ty.to_string())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }
}

/// `grid[0][j]` → (`grid`, 2). Only trailing `[...]` groups count.
pub fn split_subscripts(expr: &str) -> (&str, usize) {
    let expr = expr.trim();
    let base_end = expr.find('[').unwrap_or(expr.len());
    let base = &expr[..base_end];

    let mut count = 0;
    let mut depth = 0;
    for c in expr[base_end..].chars() {
        match c {
            '[' => {
                if depth == 0 {
                    count += 1;
                }
                depth += 1;
            }
            ']' => depth -= 1,
            _ => {}
        }
    }
    (base, count)
}
