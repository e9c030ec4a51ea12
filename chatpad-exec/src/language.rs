//! The closed set of snippet languages and the detection heuristic.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Language of a buffer. `Auto` defers to [`Language::detect`] at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Auto,
    JavaScript,
    Python,
    Java,
    Php,
}

static PHP_REGEX: OnceLock<Regex> = OnceLock::new();
static PYTHON_REGEX: OnceLock<Regex> = OnceLock::new();
static JAVA_REGEX: OnceLock<Regex> = OnceLock::new();

fn php_regex() -> &'static Regex {
    PHP_REGEX.get_or_init(|| {
        // Opening engine tag, or a `$name` variable anywhere
        Regex::new(r"(?i)^\s*<\?php|\$[a-zA-Z_][a-zA-Z0-9_]*").expect("Failed to compile PHP regex")
    })
}

fn python_regex() -> &'static Regex {
    PYTHON_REGEX.get_or_init(|| {
        Regex::new(r"^\s*import\s+\w+|def\s+\w+|print\(").expect("Failed to compile Python regex")
    })
}

fn java_regex() -> &'static Regex {
    JAVA_REGEX.get_or_init(|| {
        Regex::new(r"^\s*public\s+class|System\.out\.println")
            .expect("Failed to compile Java regex")
    })
}

impl Language {
    /// Every selector option, `Auto` first.
    pub const ALL: [Language; 5] = [
        Language::Auto,
        Language::JavaScript,
        Language::Python,
        Language::Java,
        Language::Php,
    ];

    /// Guess the language of `code`.
    ///
    /// Rules are tried in order and the first hit wins: PHP, Python, Java.
    /// Anything else, including empty text, is JavaScript.
    pub fn detect(code: &str) -> Language {
        if php_regex().is_match(code) {
            Language::Php
        } else if python_regex().is_match(code) {
            Language::Python
        } else if java_regex().is_match(code) {
            Language::Java
        } else {
            Language::JavaScript
        }
    }

    /// Resolve `Auto` against `code`; concrete languages are returned as-is.
    pub fn effective(self, code: &str) -> Language {
        match self {
            Language::Auto => Language::detect(code),
            concrete => concrete,
        }
    }

    /// Wire name, also used in status messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Php => "php",
        }
    }

    /// Label for the language selector
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Auto => "Auto Detect",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Php => "PHP",
        }
    }

    /// File extension used when saving; `txt` for anything unresolved.
    pub fn file_extension(self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Java => "java",
            Language::Php => "php",
            Language::Auto => "txt",
        }
    }

    /// Whether snippets in this language are evaluated in-process.
    pub fn runs_locally(self) -> bool {
        self == Language::JavaScript
    }

    /// Whether snippets in this language go to the remote service.
    pub fn runs_remotely(self) -> bool {
        matches!(self, Language::Python | Language::Java | Language::Php)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn test_detects_php_open_tag() {
        assert_eq!(Language::detect("<?php echo 1;"), Language::Php);
        assert_eq!(Language::detect("  <?PHP\necho 1;"), Language::Php);
    }

    #[test]
    fn test_detects_php_variable_sigil() {
        assert_eq!(Language::detect("$total = 3;"), Language::Php);
    }

    #[test]
    fn test_detects_python() {
        assert_eq!(Language::detect("def f(): print(1)"), Language::Python);
        assert_eq!(Language::detect("import os\nos.getcwd()"), Language::Python);
        assert_eq!(Language::detect("print('hi')"), Language::Python);
    }

    #[test]
    fn test_detects_java() {
        assert_eq!(
            Language::detect("public class X { System.out.println(1); }"),
            Language::Java
        );
    }

    #[test]
    fn test_detects_javascript() {
        assert_eq!(
            Language::detect("function f(){ console.log(1); }"),
            Language::JavaScript
        );
        assert_eq!(Language::detect("const x = 2;"), Language::JavaScript);
    }

    #[test]
    fn test_ambiguous_and_empty_default_to_javascript() {
        assert_eq!(Language::detect(""), Language::JavaScript);
        assert_eq!(Language::detect("2 + 2"), Language::JavaScript);
        assert_eq!(Language::detect("hello world"), Language::JavaScript);
    }

    #[test]
    fn test_php_rule_wins_over_python() {
        // First match wins: the sigil rule is checked before print(
        assert_eq!(Language::detect("print($x)"), Language::Php);
    }

    #[test]
    fn test_template_literal_is_not_php() {
        assert_eq!(
            Language::detect("const s = `${1 + 1}`;"),
            Language::JavaScript
        );
    }

    #[test]
    fn test_effective_only_resolves_auto() {
        assert_eq!(Language::Auto.effective("def f(): pass"), Language::Python);
        assert_eq!(Language::Java.effective("def f(): pass"), Language::Java);
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(Language::JavaScript.file_extension(), "js");
        assert_eq!(Language::Python.file_extension(), "py");
        assert_eq!(Language::Java.file_extension(), "java");
        assert_eq!(Language::Php.file_extension(), "php");
        assert_eq!(Language::Auto.file_extension(), "txt");
    }

    #[test]
    fn test_serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_string(&Language::JavaScript).unwrap(),
            "\"javascript\""
        );
        assert_eq!(serde_json::to_string(&Language::Php).unwrap(), "\"php\"");
    }
}
