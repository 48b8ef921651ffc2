//! Main Conversion Loop
//!
//! Orchestrates the line-by-line conversion of C++ to Java. Every line goes
//! through the same fixed pipeline:
//!
//! 1. access-modifier tracker (section markers are suppressed)
//! 2. declaration rules, first claim wins
//! 3. control-flow rules, first claim wins
//! 4. the whole expression cascade, in order
//!
//! A rule that claims a line but cannot resolve a type reports a diagnostic;
//! the line is then kept or dropped as the rule asks, and conversion goes on.

use tracing::{debug, trace, warn};

use crate::config::ConverterConfig;
use crate::diagnostics::Diagnostic;
use crate::helpers::strip_line_ending;
use crate::lowering::{process_access_modifier_line, update_class_depth, AccessModifierResult, ConversionState};
use crate::postprocess_output::render_output;
use crate::translate::{
    control_flow_rules, declaration_rules, expression_rules, Fallback, LineRule, RuleContext,
    RuleOutcome, RuleSet,
};

/// One converted line. `Text` may hold several output lines joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedLine {
    Text(String),
    /// Produces no output
    Suppressed,
}

impl ConvertedLine {
    pub fn text(&self) -> Option<&str> {
        match self {
            ConvertedLine::Text(text) => Some(text),
            ConvertedLine::Suppressed => None,
        }
    }
}

/// Result of converting one buffer
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// One entry per input line
    pub lines: Vec<ConvertedLine>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Per-input-line text; suppressed lines become empty strings
    pub fn as_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.text().unwrap_or("").to_string())
            .collect()
    }

    /// Output file contents
    pub fn to_text(&self) -> String {
        render_output(&self.lines)
    }
}

/// How the claiming phase ended for a line
enum Claim {
    Text(String),
    Done(ConvertedLine),
}

/// Stateful converter for one C++ source buffer
pub struct CppConverter {
    config: ConverterConfig,
    state: ConversionState,
    declarations: RuleSet,
    control_flow: RuleSet,
    expressions: RuleSet,
    diagnostics: Vec<Diagnostic>,
}

impl Default for CppConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CppConverter {
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            config,
            state: ConversionState::new(),
            declarations: declaration_rules(),
            control_flow: control_flow_rules(),
            expressions: expression_rules(),
            diagnostics: Vec::new(),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Diagnostics reported since the last [`CppConverter::to_java`]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Convert a whole buffer. Diagnostics collected so far move into the
    /// result.
    pub fn to_java(&mut self, lines: &[&str]) -> Conversion {
        let converted = lines
            .iter()
            .enumerate()
            .map(|(i, line)| self.convert_line(line, i + 1))
            .collect();
        Conversion {
            lines: converted,
            diagnostics: std::mem::take(&mut self.diagnostics),
        }
    }

    /// Convert one line; `line_number` is 1-based
    pub fn convert_line(&mut self, line: &str, line_number: usize) -> ConvertedLine {
        let line = strip_line_ending(line).trim_start_matches('\u{FEFF}');
        if line.trim().is_empty() {
            return ConvertedLine::Text(line.to_string());
        }

        if process_access_modifier_line(line, &mut self.state) == AccessModifierResult::Marker {
            trace!(line = line_number, "section marker");
            return ConvertedLine::Suppressed;
        }

        let was_in_class = self.state.in_class_body;
        let converted = self.run_rules(line, line_number);
        if was_in_class {
            update_class_depth(&mut self.state, line);
        }
        converted
    }

    fn run_rules(&mut self, line: &str, line_number: usize) -> ConvertedLine {
        let mut cx = RuleContext {
            state: &mut self.state,
            line_number,
            indent: &self.config.indent,
        };

        //======================================================================
        // CLAIMING PHASES: declarations, then control flow
        //======================================================================
        let claim = match first_claim(&self.declarations, line, &mut cx)
            .or_else(|| first_claim(&self.control_flow, line, &mut cx))
        {
            Some((rule, RuleOutcome::Translated(text))) => {
                debug!(line = line_number, rule, "translated");
                Claim::Text(text)
            }
            Some((rule, RuleOutcome::Suppressed)) => {
                debug!(line = line_number, rule, "suppressed");
                Claim::Done(ConvertedLine::Suppressed)
            }
            Some((rule, RuleOutcome::Diagnostic { message, fallback })) => Claim::Done(report(
                &mut self.diagnostics,
                rule,
                line,
                line_number,
                message,
                fallback,
            )),
            Some((_, RuleOutcome::Passthrough)) | None => Claim::Text(line.to_string()),
        };
        let mut text = match claim {
            Claim::Text(text) => text,
            Claim::Done(done) => return done,
        };

        //======================================================================
        // EXPRESSION CASCADE: every rule, in order
        //======================================================================
        for rule in &self.expressions {
            match rule.apply(&text, &mut cx) {
                RuleOutcome::Passthrough => {}
                RuleOutcome::Translated(rewritten) => {
                    trace!(line = line_number, rule = rule.name(), "rewritten");
                    text = rewritten;
                }
                RuleOutcome::Suppressed => return ConvertedLine::Suppressed,
                RuleOutcome::Diagnostic { message, fallback } => {
                    return report(&mut self.diagnostics, rule.name(), line, line_number, message, fallback);
                }
            }
        }

        ConvertedLine::Text(text)
    }
}

/// First rule of `rules` that does not pass the line through
fn first_claim(
    rules: &[Box<dyn LineRule>],
    line: &str,
    cx: &mut RuleContext<'_>,
) -> Option<(&'static str, RuleOutcome)> {
    rules.iter().find_map(|rule| match rule.apply(line, cx) {
        RuleOutcome::Passthrough => None,
        outcome => Some((rule.name(), outcome)),
    })
}

fn report(
    diagnostics: &mut Vec<Diagnostic>,
    rule: &str,
    line: &str,
    line_number: usize,
    message: String,
    fallback: Fallback,
) -> ConvertedLine {
    let diagnostic = Diagnostic::unresolved(line_number, line, message);
    warn!(line = line_number, rule, "{}", diagnostic);
    diagnostics.push(diagnostic);
    match fallback {
        Fallback::KeepLine => ConvertedLine::Text(line.to_string()),
        Fallback::DropLine => ConvertedLine::Suppressed,
    }
}

/// Convert a source buffer with the default configuration
pub fn convert_source(source: &str) -> Conversion {
    convert_source_with(source, &ConverterConfig::default())
}

pub fn convert_source_with(source: &str, config: &ConverterConfig) -> Conversion {
    let lines: Vec<&str> = source.lines().collect();
    CppConverter::with_config(config.clone()).to_java(&lines)
}
