//! Pattern-based scanning of a shell library's source text.
//!
//! This module locates two kinds of construct inside otherwise-opaque shell
//! script text: a single marker-delimited boilerplate block, and top-level
//! no-argument function definitions of the shape `name() {` ... `}`. It is
//! deliberately not a shell parser; both constructs are found with fixed,
//! line-anchored patterns, and everything between the boundaries is carried
//! through untouched. Every returned fragment borrows from the input, so a
//! fragment is always a contiguous substring of the source text.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Line that opens the shared boilerplate block.
pub const BOILERPLATE_BEGIN: &str = "# BEGIN BOILERPLATE";

/// Line that closes the shared boilerplate block.
pub const BOILERPLATE_END: &str = "# END BOILERPLATE";

/// One function definition found in the library text.
///
/// `body` runs from the function name through the closing brace line,
/// inclusive, exactly as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionEntry<'src> {
    pub name: &'src str,
    pub body: &'src str,
}

fn boilerplate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?ms)^{BOILERPLATE_BEGIN}\n(.*?)\n{BOILERPLATE_END}$");
        Regex::new(&pattern).expect("boilerplate marker pattern is valid")
    })
}

fn function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A definition starts on a fresh line: identifier, empty parens, an
    // opening brace, then a lazy multi-line body up to the first line that
    // is exactly "}". The body capture does not balance braces; a nested
    // close brace at column zero ends the match early.
    RE.get_or_init(|| {
        Regex::new(r"(?ms)\n(\w+)\s*\(\)\s+\{\n.*?\n\}$").expect("function pattern is valid")
    })
}

/// Extract the boilerplate block, if the text carries one.
///
/// The block is everything strictly between the first `# BEGIN BOILERPLATE`
/// line and the nearest `# END BOILERPLATE` line after it, trimmed of
/// surrounding whitespace. Markers only count when they make up the whole
/// line. A missing or inverted marker pair is not an error; a library with
/// no shared setup code simply has no boilerplate.
pub fn extract_boilerplate(text: &str) -> Option<&str> {
    boilerplate_re()
        .captures(text)
        .map(|caps| caps.get(1).expect("pattern has one group").as_str().trim())
}

/// Index every function definition in the text by name.
///
/// Definitions are discovered in scan order; when the same name is defined
/// twice, the later definition replaces the earlier one in the map. Text
/// with no definitions yields an empty map.
pub fn extract_functions(text: &str) -> HashMap<&str, FunctionEntry<'_>> {
    let mut functions = HashMap::new();

    for caps in function_re().captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        let name = caps.get(1).expect("pattern has one group").as_str();
        // Skip the leading newline delimiter so the body starts at the name.
        let body = &text[whole.start() + 1..whole.end()];
        functions.insert(name, FunctionEntry { name, body });
    }

    functions
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = "\
# A tiny shell library.

# BEGIN BOILERPLATE
set -e
# END BOILERPLATE

greet() {
    echo hello
}

farewell() {
    echo bye
}
";

    #[test]
    fn test_boilerplate_is_trimmed_inner_text() {
        assert_eq!(extract_boilerplate(LIBRARY), Some("set -e"));
    }

    #[test]
    fn test_boilerplate_absent_without_markers() {
        assert_eq!(extract_boilerplate("greet() {\n    echo hello\n}\n"), None);
    }

    #[test]
    fn test_boilerplate_absent_when_end_precedes_begin() {
        let text = "# END BOILERPLATE\nset -e\n# BEGIN BOILERPLATE\n";
        assert_eq!(extract_boilerplate(text), None);
    }

    #[test]
    fn test_boilerplate_marker_must_fill_the_line() {
        let text = "x # BEGIN BOILERPLATE\nset -e\n# END BOILERPLATE\n";
        assert_eq!(extract_boilerplate(text), None);
    }

    #[test]
    fn test_boilerplate_honors_first_pair_only() {
        let text = "\
# BEGIN BOILERPLATE
set -e
# END BOILERPLATE
# BEGIN BOILERPLATE
set -u
# END BOILERPLATE
";
        assert_eq!(extract_boilerplate(text), Some("set -e"));
    }

    #[test]
    fn test_boilerplate_strips_surrounding_blank_lines() {
        let text = "# BEGIN BOILERPLATE\n\nset -e\n\n# END BOILERPLATE\n";
        assert_eq!(extract_boilerplate(text), Some("set -e"));
    }

    #[test]
    fn test_functions_indexed_by_name() {
        let functions = extract_functions(LIBRARY);

        assert_eq!(functions.len(), 2);
        assert_eq!(
            functions["greet"].body,
            "greet() {\n    echo hello\n}"
        );
        assert_eq!(
            functions["farewell"].body,
            "farewell() {\n    echo bye\n}"
        );
    }

    #[test]
    fn test_function_bodies_are_verbatim_substrings() {
        for entry in extract_functions(LIBRARY).values() {
            assert!(LIBRARY.contains(entry.body));
            assert!(entry.body.starts_with(entry.name));
            assert!(entry.body.ends_with('}'));
        }
    }

    #[test]
    fn test_no_functions_yields_empty_map() {
        assert!(extract_functions("echo hello\n").is_empty());
    }

    #[test]
    fn test_duplicate_name_keeps_later_definition() {
        let text = "\
# lib
dup() {
    echo one
}
dup() {
    echo two
}
";
        let functions = extract_functions(text);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions["dup"].body, "dup() {\n    echo two\n}");
    }

    #[test]
    fn test_indented_close_brace_does_not_end_the_body() {
        let text = "\
# lib
loop_over() {
    for x in a b; do
        echo \"$x\"
    done
    if true; then
        :
    fi
}
";
        let functions = extract_functions(text);
        assert_eq!(
            functions["loop_over"].body,
            "loop_over() {\n    for x in a b; do\n        echo \"$x\"\n    done\n    if true; then\n        :\n    fi\n}"
        );
    }

    #[test]
    fn test_column_zero_close_brace_truncates_the_body() {
        // Known limitation of the non-balancing scan: a nested close brace
        // at column zero ends the match at that line.
        let text = "\
# lib
outer() {
    sub() {
        echo nested
}
    echo after
}
";
        let functions = extract_functions(text);
        assert!(
            functions["outer"]
                .body
                .ends_with("        echo nested\n}")
        );
    }

    #[test]
    fn test_definition_requires_a_fresh_line() {
        // The scan keys on a newline before the identifier, so a definition
        // on the very first byte of the text is not picked up.
        let text = "first() {\n    echo hi\n}\n";
        assert!(extract_functions(text).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_functions(LIBRARY);
        let second = extract_functions(LIBRARY);
        assert_eq!(first, second);
        assert_eq!(extract_boilerplate(LIBRARY), extract_boilerplate(LIBRARY));
    }
}
