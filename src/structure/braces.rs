//! Closing-brace search that ignores braces inside strings and comments.

use std::ops::ControlFlow;

use super::lexer::ScanCursor;

/// Returns the 1-indexed line holding the brace that closes the `{` at byte
/// `brace_pos` of the 0-indexed line `start_line`.
///
/// Depth starts at one for the given brace. When the input runs out before
/// depth returns to zero the opening line itself (`start_line + 1`) is
/// returned, so the result is never earlier than the opening line.
#[must_use]
pub fn find_matching_brace(lines: &[&str], start_line: usize, brace_pos: usize) -> usize {
    let mut cursor = ScanCursor::new();
    let mut depth: usize = 1;

    for (idx, line) in lines.iter().enumerate().skip(start_line) {
        let from = if idx == start_line { brace_pos + 1 } else { 0 };
        let flow = cursor.scan_code(line, from, |_, ch| {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return ControlFlow::Break(());
                    }
                }
                _ => {}
            }
            ControlFlow::Continue(())
        });
        if flow.is_break() {
            return idx + 1;
        }
    }

    start_line + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<&str> {
        src.lines().collect()
    }

    #[test]
    fn matches_across_lines() {
        let src = lines("function f() {\n  if (x) {\n    y();\n  }\n}\n");
        assert_eq!(find_matching_brace(&src, 0, 13), 5);
    }

    #[test]
    fn matches_on_same_line() {
        let src = lines("const o = { a: 1 };");
        assert_eq!(find_matching_brace(&src, 0, 10), 1);
    }

    #[test]
    fn ignores_braces_in_strings_and_comments() {
        let src = lines(
            "function f() {\n  const s = \"{\";\n  // }\n  /* } {\n  */\n  const t = '}';\n}\n",
        );
        assert_eq!(find_matching_brace(&src, 0, 13), 7);
    }

    #[test]
    fn escaped_brace_in_code_does_not_change_depth() {
        assert_eq!(find_matching_brace(&["f() {", "  \\{", "}"], 0, 4), 3);
        assert_eq!(find_matching_brace(&["f() {", "  \\}", "}"], 0, 4), 3);
    }

    #[test]
    fn unterminated_block_falls_back_to_opening_line() {
        let src = lines("\n\nfunction f() {\n  return 1;\n");
        assert_eq!(find_matching_brace(&src, 2, 13), 3);
    }

    #[test]
    fn uses_raw_line_offsets_with_indentation() {
        let src = lines("class A {\n    foo(a) {\n        return a;\n    }\n}\n");
        let pos = src[1].find('{').unwrap();
        assert_eq!(find_matching_brace(&src, 1, pos), 4);
    }
}
