//! Output assembly
//!
//! Joins converted lines into the text written to the Java file.

use crate::transpile_main::ConvertedLine;

/// Every non-suppressed line followed by `\n`. Blank lines are kept;
/// suppressed lines leave no trace.
pub fn render_output(lines: &[ConvertedLine]) -> String {
    let mut out = String::new();
    for text in lines.iter().filter_map(ConvertedLine::text) {
        out.push_str(text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppressed_lines_are_omitted() {
        let lines = vec![
            ConvertedLine::Text("class A {".to_string()),
            ConvertedLine::Suppressed,
            ConvertedLine::Text(String::new()),
            ConvertedLine::Text("}".to_string()),
        ];
        assert_eq!(render_output(&lines), "class A {\n\n}\n");
    }

    #[test]
    fn test_multi_line_entry_gets_one_terminator() {
        let lines = vec![ConvertedLine::Text("int[] dp = new int[n];\nArrays.fill(dp, -1);".to_string())];
        assert_eq!(render_output(&lines), "int[] dp = new int[n];\nArrays.fill(dp, -1);\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_output(&[]), "");
    }
}
