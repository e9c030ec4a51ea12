//! Heuristic JavaScript reformatter.
//!
//! This is line-oriented rewriting, not a parser: braces, semicolons and
//! commas inside strings or comments are rewritten like any other. Callers
//! present it as a best-effort convenience.

use regex::Regex;
use std::sync::OnceLock;

struct Rewrites {
    statement_end: Regex,
    block_open: Regex,
    block_close: Regex,
    separator: Regex,
}

static REWRITES: OnceLock<Rewrites> = OnceLock::new();

fn rewrites() -> &'static Rewrites {
    REWRITES.get_or_init(|| Rewrites {
        statement_end: Regex::new(r";\s*").expect("Failed to compile statement regex"),
        block_open: Regex::new(r"\{\s*").expect("Failed to compile block-open regex"),
        block_close: Regex::new(r"\}\s*").expect("Failed to compile block-close regex"),
        separator: Regex::new(r",\s*").expect("Failed to compile separator regex"),
    })
}

/// Reformat JavaScript source.
///
/// Breaks the line after every `;`, opens an indented line after every `{`,
/// puts every `}` on its own line and normalises spacing after `,`. The
/// result is then trimmed line by line with blank lines dropped.
pub fn format_javascript(code: &str) -> String {
    let rw = rewrites();
    let code = rw.statement_end.replace_all(code, ";\n");
    let code = rw.block_open.replace_all(&code, " {\n    ");
    let code = rw.block_close.replace_all(&code, "\n}\n");
    let code = rw.separator.replace_all(&code, ", ");

    code.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::format_javascript;

    #[test]
    fn test_splits_statements_and_blocks() {
        let formatted = format_javascript("function f(a,b){ let x = a;return x; }");
        assert_eq!(
            formatted,
            "function f(a, b) {\nlet x = a;\nreturn x;\n}"
        );
    }

    #[test]
    fn test_drops_blank_lines() {
        let formatted = format_javascript("a();\n\n\n\nb();");
        assert_eq!(formatted, "a();\nb();");
    }

    #[test]
    fn test_normalises_separator_spacing() {
        let formatted = format_javascript("f(1,2,    3)");
        assert_eq!(formatted, "f(1, 2, 3)");
    }

    #[test]
    fn test_empty_input_formats_to_empty() {
        assert_eq!(format_javascript("   \n  "), "");
    }

    #[test]
    fn test_rewrites_inside_strings() {
        // Known limitation: string contents are not protected
        let formatted = format_javascript("console.log('a;b')");
        assert_eq!(formatted, "console.log('a;\nb')");
    }

    #[test]
    fn test_stray_close_brace_is_still_rewritten() {
        let formatted = format_javascript("let s = '}';let t = 1;");
        assert_eq!(formatted, "let s = '\n}\n';\nlet t = 1;");
    }

    #[test]
    fn test_unbalanced_braces_are_rewritten() {
        let formatted = format_javascript("let a = 1;\n}\n{");
        assert_eq!(formatted, "let a = 1;\n}\n{");
    }
}
