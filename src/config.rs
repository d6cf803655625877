//! Options controlling how pattern criteria are compiled.

use regex::{Regex, RegexBuilder};

/// Options for compiling the regular expression of a `Matches` criterion.
///
/// # Examples
///
/// ```
/// use clove_criteria::{Expr, PatternConfig, Value};
///
/// let config = PatternConfig {
///     case_insensitive: true,
///     ..PatternConfig::default()
/// };
/// let expr = Expr::matches_with("^thomas", &config).unwrap();
/// assert!(expr.evaluate(&Value::from("Thomas Edison")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConfig {
    /// Match letters regardless of case (`i` flag)
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries (`m` flag)
    pub multi_line: bool,
    /// `.` also matches `\n` (`s` flag)
    pub dot_matches_new_line: bool,
    /// Unicode-aware character classes
    pub unicode: bool,
    /// Upper bound on the compiled program size, in bytes
    pub size_limit: Option<usize>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            unicode: true,
            size_limit: None,
        }
    }
}

impl PatternConfig {
    pub(crate) fn compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        let mut builder = RegexBuilder::new(pattern);
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .unicode(self.unicode);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        builder.build()
    }
}
