//! Rule interface
//!
//! Every recognizer is a [`LineRule`]: it looks at one line together with the
//! run state and reports a [`RuleOutcome`]. The engine tries declaration and
//! control-flow rules until one claims the line, then folds the line through
//! every expression rule in order.

use crate::lowering::ConversionState;

/// Per-line context handed to a rule
pub struct RuleContext<'a> {
    pub state: &'a mut ConversionState,
    /// 1-based line number
    pub line_number: usize,
    /// Indentation unit for synthesized lines
    pub indent: &'a str,
}

/// What to do with a line whose rule could not resolve it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Emit the original line unchanged
    KeepLine,
    /// Emit nothing for this line
    DropLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule rewrote the line; the text may span several output lines
    Translated(String),
    /// The rule does not apply
    Passthrough,
    /// The line produces no output
    Suppressed,
    /// The rule applies but a needed type is unknown
    Diagnostic { message: String, fallback: Fallback },
}

impl RuleOutcome {
    pub fn unresolved(message: impl Into<String>, fallback: Fallback) -> Self {
        RuleOutcome::Diagnostic { message: message.into(), fallback }
    }
}

pub trait LineRule: Send + Sync {
    /// Short name used in trace logs
    fn name(&self) -> &'static str;

    fn apply(&self, line: &str, cx: &mut RuleContext<'_>) -> RuleOutcome;
}
