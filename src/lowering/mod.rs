//! Lowering Module
//!
//! Per-run state and the line-level trackers that run before any rule.

// State management
pub mod conversion_state;

// Section markers
pub mod access_modifier_lowering;

// Class body depth
pub mod depth_tracking_lowering;

// Re-exports for convenience
pub use conversion_state::ConversionState;
pub use access_modifier_lowering::{process_access_modifier_line, AccessModifierResult};
pub use depth_tracking_lowering::{count_braces_outside_literals, update_class_depth};
