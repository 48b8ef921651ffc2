//! Converter configuration

/// Options shared by every conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Indentation unit for synthesized lines (constructor assignments,
    /// binding locals, initialization loops)
    pub indent: String,
    /// Extension given to written output files
    pub output_extension: String,
}

impl ConverterConfig {
    /// Config with an indentation unit of `width` spaces
    pub fn with_indent_width(width: usize) -> Self {
        Self { indent: " ".repeat(width), ..Self::default() }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            output_extension: "java".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.indent, "  ");
        assert_eq!(config.output_extension, "java");
        assert_eq!(ConverterConfig::with_indent_width(4).indent, "    ");
    }
}
