//! Access Modifier Lowering
//!
//! C++ groups members under `public:` / `private:` section markers; Java puts
//! a keyword on each member. Marker lines are consumed here and produce no
//! output. Once `private:` has been seen, every method and constructor
//! translated afterwards in the same file is emitted `private`.

use crate::lowering::conversion_state::ConversionState;

const MARKERS: &[&str] = &["public:", "private:", "protected:"];

/// Result of inspecting a line for a section marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifierResult {
    /// The line is a section marker and must be suppressed
    Marker,
    /// Not a marker line
    NotMarker,
}

/// Update the tracker from `line`
pub fn process_access_modifier_line(line: &str, state: &mut ConversionState) -> AccessModifierResult {
    if line.contains("private:") {
        state.in_private_section = true;
    }

    if MARKERS.iter().any(|marker| line.contains(marker)) {
        AccessModifierResult::Marker
    } else {
        AccessModifierResult::NotMarker
    }
}
