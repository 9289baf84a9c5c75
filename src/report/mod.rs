mod text;

pub use text::TextReport;

use serde::{Deserialize, Serialize};

/// Layout settings for the plain-text reports.
///
/// Passed explicitly to each presenter; nothing about presentation is kept in
/// global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTheme {
    pub label_width: usize,
    pub value_width: usize,
    pub rule_char: char,
    pub rule_width: usize,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            label_width: 40,
            value_width: 10,
            rule_char: '=',
            rule_width: 50,
        }
    }
}

impl ReportTheme {
    pub fn rule(&self) -> String {
        std::iter::repeat(self.rule_char)
            .take(self.rule_width)
            .collect()
    }
}
