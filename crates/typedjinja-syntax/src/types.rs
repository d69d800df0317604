//! `@types` block parser — first block only, one linear scan over its lines.
//!
//! ```text
//! {# @types
//!    import datetime
//!    # comments are dropped
//!    """Logged-in user"""
//!    user: User
//!    created: datetime.datetime
//! #}
//! ```

use crate::lines::split_lines;
use crate::model::{Annotations, TypesBlock};
use regex::Regex;
use std::sync::LazyLock;

// Non-greedy: the first `#}` after the marker closes the block.
static RE_TYPES_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{#\s*@types(.*?)#\}").unwrap());

const DOCSTRING_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Separator between a type and the docstring attached to it.
pub const DOC_SEPARATOR: &str = "  # ";

/// Classification of one non-empty line inside a `@types` block.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Comment,
    Import(&'a str),
    Docstring(&'a str),
    Annotation { name: &'a str, ty: &'a str },
    Malformed,
}

/// Return the interior text of the first `@types` block, if any.
///
/// A start marker without a closing `#}` anywhere after it is not a block.
pub fn find_types_block(document: &str) -> Option<&str> {
    RE_TYPES_BLOCK
        .captures(document)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse the first `@types` block of a template.
///
/// Never fails: a document without a block yields an empty [`TypesBlock`],
/// and undecodable lines are collected in [`TypesBlock::malformed`].
pub fn parse_types_block(document: &str) -> TypesBlock {
    match find_types_block(document) {
        Some(interior) => decode_block(interior),
        None => TypesBlock::default(),
    }
}

/// Only the `name -> type` mapping of the first `@types` block; malformed
/// lines are dropped.
pub fn extract_type_annotations(document: &str) -> Annotations {
    parse_types_block(document).annotations
}

fn decode_block(interior: &str) -> TypesBlock {
    let mut block = TypesBlock::default();
    let mut pending_doc: Option<&str> = None;

    for raw in split_lines(interior) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match classify(line) {
            Line::Comment => {}
            Line::Import(import) => block.imports.push(import.to_string()),
            Line::Docstring(doc) => {
                // An unconsumed docstring is replaced, never attached.
                pending_doc = (!doc.is_empty()).then_some(doc);
            }
            Line::Annotation { name, ty } => {
                let ty = match pending_doc.take() {
                    Some(doc) => format!("{ty}{DOC_SEPARATOR}{doc}"),
                    None => ty.to_string(),
                };
                block.annotations.insert(name, ty);
            }
            Line::Malformed => {
                tracing::debug!(line = raw, "malformed @types line");
                block.malformed.push(raw.to_string());
            }
        }
    }

    block
}

/// Classify a trimmed, non-empty line. Rules are tried in priority order.
fn classify(line: &str) -> Line<'_> {
    if line.starts_with('#') {
        return Line::Comment;
    }
    if line.starts_with("import ") || line.starts_with("from ") {
        return Line::Import(line);
    }
    if let Some(doc) = docstring_content(line) {
        return Line::Docstring(doc);
    }
    if let Some((name, ty)) = line.split_once(':') {
        // A second colon (dict/slice-like syntax) is rejected outright.
        if ty.contains(':') {
            return Line::Malformed;
        }
        return Line::Annotation {
            name: name.trim(),
            ty: ty.trim(),
        };
    }
    Line::Malformed
}

/// Content of a line that is wholly one triple-quoted string.
fn docstring_content(line: &str) -> Option<&str> {
    DOCSTRING_DELIMITERS.iter().find_map(|delim| {
        if line.len() >= 2 * delim.len() && line.starts_with(delim) && line.ends_with(delim) {
            Some(line[delim.len()..line.len() - delim.len()].trim())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(interior: &str) -> String {
        format!("<h1>{{{{ title }}}}</h1>\n{{# @types\n{interior}\n#}}\n<p>body</p>\n")
    }

    #[test]
    fn no_block_is_empty() {
        let parsed = parse_types_block("<h1>No types here</h1>");
        assert!(parsed.is_empty());
    }

    #[test]
    fn empty_block() {
        let parsed = parse_types_block("{# @types\n#}\nContent");
        assert!(parsed.is_empty());
    }

    #[test]
    fn imports_and_annotations() {
        let parsed = parse_types_block(&block("import datetime\nuser: str\nage: int"));
        assert_eq!(parsed.imports, vec!["import datetime"]);
        assert_eq!(parsed.annotations.get("user"), Some("str"));
        assert_eq!(parsed.annotations.get("age"), Some("int"));
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn from_imports_kept_in_order() {
        let parsed = parse_types_block(&block(
            "  from typing import List  \nimport os\nimport os",
        ));
        assert_eq!(
            parsed.imports,
            vec!["from typing import List", "import os", "import os"]
        );
    }

    #[test]
    fn marker_allows_no_whitespace() {
        let parsed = parse_types_block("{#@types x: int #}");
        assert_eq!(parsed.annotations.get("x"), Some("int"));
    }

    #[test]
    fn unterminated_block_is_not_recognized() {
        let parsed = parse_types_block("{# @types\nuser: str\n<p>never closed</p>\n");
        assert!(parsed.is_empty());
    }

    #[test]
    fn first_closing_marker_ends_block() {
        let doc = "{# @types\nuser: str\n#}\n{# note #}\n{# @types\nlater: int\n#}";
        let parsed = parse_types_block(doc);
        assert!(parsed.annotations.contains("user"));
        assert!(!parsed.annotations.contains("later"));
    }

    #[test]
    fn comment_lines_vanish() {
        let parsed = parse_types_block(&block("# just a note\nuser: str\n  #: odd"));
        assert_eq!(parsed.annotations.len(), 1);
        assert!(parsed.imports.is_empty());
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn docstring_attaches_to_next_annotation() {
        let parsed = parse_types_block(&block("\"\"\"The current user\"\"\"\nuser: str\nage: int"));
        assert_eq!(parsed.annotations.get("user"), Some("str  # The current user"));
        assert_eq!(parsed.annotations.get("age"), Some("int"));
    }

    #[test]
    fn single_quote_docstring() {
        let parsed = parse_types_block(&block("'''  Age in years '''\nage: int"));
        assert_eq!(parsed.annotations.get("age"), Some("int  # Age in years"));
    }

    #[test]
    fn second_docstring_replaces_first() {
        let parsed = parse_types_block(&block("\"\"\"first\"\"\"\n\"\"\"second\"\"\"\nx: int"));
        assert_eq!(parsed.annotations.get("x"), Some("int  # second"));
    }

    #[test]
    fn trailing_docstring_attaches_to_nothing() {
        let parsed = parse_types_block(&block("x: int\n\"\"\"orphan\"\"\""));
        assert_eq!(parsed.annotations.get("x"), Some("int"));
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn unclosed_triple_quote_is_malformed() {
        let parsed = parse_types_block(&block("\"\"\"starts here"));
        assert_eq!(parsed.malformed, vec!["\"\"\"starts here"]);
    }

    #[test]
    fn second_colon_is_malformed() {
        let parsed = parse_types_block(&block("foo: bar:baz\nok: int"));
        assert!(!parsed.annotations.contains("foo"));
        assert_eq!(parsed.malformed, vec!["foo: bar:baz"]);
        assert_eq!(parsed.annotations.get("ok"), Some("int"));
    }

    #[test]
    fn dict_like_type_is_rejected() {
        let parsed = parse_types_block(&block("scores: {str: int}"));
        assert!(parsed.annotations.is_empty());
        assert_eq!(parsed.malformed.len(), 1);
    }

    #[test]
    fn malformed_lines_keep_indentation_and_duplicates() {
        let parsed = parse_types_block(&block("   invalid_line\nuser: User\n   invalid_line"));
        assert_eq!(parsed.malformed, vec!["   invalid_line", "   invalid_line"]);
        assert_eq!(parsed.annotations.get("user"), Some("User"));
    }

    #[test]
    fn later_duplicate_overwrites() {
        let parsed = parse_types_block(&block("x: int\ny: str\nx: float"));
        let entries: Vec<_> = parsed.annotations.iter().collect();
        assert_eq!(entries, vec![("x", "float"), ("y", "str")]);
    }

    #[test]
    fn parsing_is_repeatable() {
        let doc = block("import os\n\"\"\"doc\"\"\"\nx: int\nbad line");
        assert_eq!(parse_types_block(&doc), parse_types_block(&doc));
    }

    #[test]
    fn extract_ignores_invalid_lines() {
        let template = "{# @types\n   user: User\n   invalid_line\n   items: List[Item]\n#}";
        let annotations = extract_type_annotations(template);
        let entries: Vec<_> = annotations.iter().collect();
        assert_eq!(entries, vec![("user", "User"), ("items", "List[Item]")]);
    }

    #[test]
    fn carriage_return_line_endings() {
        let parsed = parse_types_block("{# @types\rx: int\ry: str\r#}");
        let entries: Vec<_> = parsed.annotations.iter().collect();
        assert_eq!(entries, vec![("x", "int"), ("y", "str")]);
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        let parsed = parse_types_block("{# @types\r\nimport os\r\nx: int\r\n#}");
        assert_eq!(parsed.imports, vec!["import os"]);
        assert_eq!(parsed.annotations.get("x"), Some("int"));
    }

    #[test]
    fn find_block_interior() {
        assert_eq!(find_types_block("a {# @types x: int #} b"), Some(" x: int "));
        assert_eq!(find_types_block("{# @typedmacro f() #}"), None);
    }

    #[test]
    fn classify_priority() {
        assert_eq!(classify("# a: b"), Line::Comment);
        assert_eq!(classify("from a import b"), Line::Import("from a import b"));
        assert_eq!(classify("\"\"\"a: b\"\"\""), Line::Docstring("a: b"));
        assert_eq!(
            classify("x : int"),
            Line::Annotation { name: "x", ty: "int" }
        );
        assert_eq!(classify("importer"), Line::Malformed);
    }
}
