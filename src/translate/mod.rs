//! Translation Module
//!
//! Contains the line rules that translate C++ constructs to Java.
//! Each module handles one family of constructs; the functions at the bottom
//! return the rules of each phase in priority order.

pub mod rule;

// Definition translations
pub mod struct_def_translate;
pub mod constructor_translate;

// Declaration translations
pub mod container_decl_translate;

// Control flow translations
pub mod function_def_translate;
pub mod for_loop_translate;
pub mod sort_translate;

// Expression translations
pub mod expression_translate;

// Re-exports for convenience
pub use rule::{Fallback, LineRule, RuleContext, RuleOutcome};
pub use struct_def_translate::{ClassMemberRule, InitializerListConstructorRule, StructBoundaryRule};
pub use constructor_translate::{ConstructorDefRule, ObjectConstructionRule};
pub use container_decl_translate::{
    DefaultContainerDeclRule,
    InitializerListDeclRule,
    OuterSizedVectorDeclRule,
    PriorityQueueDeclRule,
    Sized2DVectorDeclRule,
    SizedVectorDeclRule,
    StringDeclRule,
};
pub use function_def_translate::FunctionDefRule;
pub use for_loop_translate::{RangeForRule, StructuredBindingForRule};
pub use sort_translate::SortRule;
pub use expression_translate::{
    AccumulateRule,
    ArrowFlattenRule,
    EmplaceBackPairRule,
    FunctionRenameRule,
    MinMaxElementRule,
    PeekPopRule,
    PointerStripRule,
    SizeToLengthRule,
    StackOpsRule,
    StdNamespaceRule,
    SubstrRule,
    TokenReplacementRule,
};

/// Rule list of one phase
pub type RuleSet = Vec<Box<dyn LineRule>>;

/// Declarations: struct/class shape first, then containers, then the generic
/// `T name(args);` construction which would otherwise claim container lines.
pub fn declaration_rules() -> RuleSet {
    vec![
        Box::new(StructBoundaryRule),
        Box::new(InitializerListConstructorRule),
        Box::new(ClassMemberRule),
        Box::new(ConstructorDefRule),
        Box::new(DefaultContainerDeclRule),
        Box::new(PriorityQueueDeclRule),
        Box::new(InitializerListDeclRule),
        Box::new(SizedVectorDeclRule),
        Box::new(Sized2DVectorDeclRule),
        Box::new(OuterSizedVectorDeclRule),
        Box::new(StringDeclRule),
        Box::new(ObjectConstructionRule),
    ]
}

pub fn control_flow_rules() -> RuleSet {
    vec![
        Box::new(FunctionDefRule),
        Box::new(RangeForRule),
        Box::new(StructuredBindingForRule),
        Box::new(SortRule),
    ]
}

/// Expression cascade, applied in order to every emitted line
pub fn expression_rules() -> RuleSet {
    vec![
        Box::new(StdNamespaceRule),
        Box::new(FunctionRenameRule),
        Box::new(SubstrRule),
        Box::new(PeekPopRule),
        Box::new(SizeToLengthRule),
        Box::new(MinMaxElementRule),
        Box::new(AccumulateRule),
        Box::new(PointerStripRule),
        Box::new(ArrowFlattenRule),
        Box::new(EmplaceBackPairRule),
        Box::new(StackOpsRule),
        Box::new(TokenReplacementRule),
    ]
}
