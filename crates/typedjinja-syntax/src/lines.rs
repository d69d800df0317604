//! Line splitting that matches Python's `str.splitlines()`.
//!
//! Templates written on any platform decode the same way: besides `\n`, a
//! lone `\r`, `\r\n`, vertical tab, form feed, the file/group/record
//! separators, NEL and the Unicode line/paragraph separators all end a line.

/// `true` for every character that terminates a line.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` into lines without their terminators. A trailing
/// terminator does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            end += 1;
        }
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_and_windows_endings() {
        assert_eq!(split_lines("a\nb\r\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n"), vec!["a"]);
    }

    #[test]
    fn classic_mac_endings() {
        assert_eq!(split_lines("\rx: int\ry: str\r"), vec!["", "x: int", "y: str"]);
    }

    #[test]
    fn empty_lines_are_kept() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("\r\n\r\n"), vec!["", ""]);
    }

    #[test]
    fn unicode_separators() {
        assert_eq!(
            split_lines("a\u{2028}b\u{2029}c\u{85}d\x0be\x0cf\x1cg"),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(split_lines("").is_empty());
    }
}
