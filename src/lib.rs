//! cpp2java: line-by-line C++ to Java snippet converter
//!
//! Converts conventionally-styled C++ (competitive-programming and interview
//! snippets) into Java one line at a time. A small type registry built from
//! the declarations seen so far lets later lines pick the right Java idiom.
//!
//! ```text
//! queue<int> q;                  → Queue<Integer> q = new ArrayDeque<>();
//! ans += q.front(), q.pop();     → ans += q.poll();
//! ```

// Core modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod keywords;

// Type model
pub mod cpp_type;
pub mod java_type;
pub mod type_registry;

// Modularized converter components
pub mod helpers;
pub mod lowering;
pub mod translate;
pub mod transpile_main;
pub mod postprocess_output;
pub mod source_files;

pub use config::ConverterConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{Error, Result};
pub use java_type::{to_java_type, to_object_type, JavaType};
pub use lowering::ConversionState;
pub use source_files::{convert_file, convert_path, discover_sources, output_path_for, FileReport};
pub use transpile_main::{convert_source, convert_source_with, Conversion, ConvertedLine, CppConverter};
pub use type_registry::{TypeRegistry, UNKNOWN_TYPE};

/// Convert a C++ source buffer to Java text with the default configuration
pub fn convert(source: &str) -> String {
    convert_source(source).to_text()
}
