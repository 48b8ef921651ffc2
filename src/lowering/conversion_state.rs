//! Conversion State Management
//!
//! Contains the `ConversionState` struct which holds all mutable state of
//! one conversion run. It is created at the start of a file, threaded
//! through every rule line by line, and dropped after the last line.

use crate::type_registry::TypeRegistry;

/// Main state container for one conversion run
#[derive(Debug, Default)]
pub struct ConversionState {
    /// Set once a `private:` marker is seen; never reset within a run
    pub in_private_section: bool,
    /// True between a converted `struct X {` line and its `};`
    pub in_class_body: bool,
    /// Brace depth inside the class body; 1 means member level
    pub class_depth: usize,
    /// Variable name → declared Java type
    pub variable_types: TypeRegistry,
}

impl ConversionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility for methods and constructors declared from here on
    pub fn method_visibility(&self) -> &'static str {
        if self.in_private_section {
            "private"
        } else {
            "public"
        }
    }

    /// Enter a converted class body
    pub fn enter_class_body(&mut self) {
        self.in_class_body = true;
        self.class_depth = 1;
    }

    /// Exit a converted class body
    pub fn exit_class_body(&mut self) {
        self.in_class_body = false;
        self.class_depth = 0;
    }

    /// Directly inside a class body, outside any method
    pub fn at_member_level(&self) -> bool {
        self.in_class_body && self.class_depth == 1
    }
}
