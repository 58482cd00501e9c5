//! End-line resolution for detected declarations.
//!
//! A declaration line is first classified into a [`BodyShape`], then the
//! shape decides how the end line is found. Every forward search is bounded
//! by a fixed window; when nothing is found the end line equals the start.

use super::braces::find_matching_brace;
use super::model::ClassKind;

/// Lines inspected after an arrow with an expression body.
pub const ARROW_LOOKAHEAD: usize = 3;
/// Lines inspected for the opening brace of a block declared without one.
pub const BLOCK_LOOKAHEAD: usize = 5;
/// Lines inspected for the end of an interface or type alias.
pub const DECLARATION_LOOKAHEAD: usize = 50;

/// How the body of a declaration is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// `=> {` with the byte offset of the brace following the arrow.
    ArrowBlock(usize),
    /// `=> expr` without a following brace.
    ArrowExpression,
    /// Function or method with a brace on the declaration line.
    Block(usize),
    /// Function or method whose brace, if any, is on a later line.
    BlockAhead,
    /// Class body; `None` when the line has no brace.
    ClassBody(Option<usize>),
    /// Interface or type alias, ended by `}` or `;`.
    TypeLike,
}

impl BodyShape {
    /// Shape of a function-family declaration line.
    #[must_use]
    pub fn of_function(line: &str) -> Self {
        if let Some(arrow) = line.find("=>") {
            let after = arrow + 2;
            return line[after..]
                .find('{')
                .map_or(Self::ArrowExpression, |rel| Self::ArrowBlock(after + rel));
        }
        line.find('{').map_or(Self::BlockAhead, Self::Block)
    }

    /// Shape of a class-family declaration line.
    #[must_use]
    pub fn of_class(line: &str, kind: ClassKind) -> Self {
        if kind.has_members() {
            Self::ClassBody(line.find('{'))
        } else {
            Self::TypeLike
        }
    }
}

/// Resolves the inclusive 1-indexed end line of the declaration starting on
/// the 1-indexed `start_line`. The result is never before `start_line`; a
/// `start_line` of 0 or past the end is returned unchanged.
#[must_use]
pub fn resolve_end(lines: &[&str], start_line: usize, shape: BodyShape) -> usize {
    if start_line == 0 || start_line > lines.len() {
        return start_line;
    }
    let idx = start_line - 1;

    match shape {
        BodyShape::ArrowBlock(pos) | BodyShape::Block(pos) | BodyShape::ClassBody(Some(pos)) => {
            find_matching_brace(lines, idx, pos)
        }
        BodyShape::ClassBody(None) => start_line,
        BodyShape::ArrowExpression => expression_end(lines, start_line),
        BodyShape::BlockAhead => lines
            .iter()
            .enumerate()
            .skip(start_line)
            .take(BLOCK_LOOKAHEAD)
            .find_map(|(i, line)| line.find('{').map(|pos| find_matching_brace(lines, i, pos)))
            .unwrap_or(start_line),
        BodyShape::TypeLike => declaration_end(lines, start_line),
    }
}

fn ends_statement(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.ends_with(';') || trimmed.ends_with(',')
}

fn expression_end(lines: &[&str], start_line: usize) -> usize {
    if ends_statement(lines[start_line - 1]) {
        return start_line;
    }
    lines
        .iter()
        .enumerate()
        .skip(start_line)
        .take(ARROW_LOOKAHEAD)
        .find(|(_, line)| ends_statement(line))
        .map_or(start_line, |(i, _)| i + 1)
}

fn declaration_end(lines: &[&str], start_line: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start_line)
        .take(DECLARATION_LOOKAHEAD)
        .find(|(_, line)| line.contains('}') || line.trim().ends_with(';'))
        .map_or(start_line, |(i, _)| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<&str> {
        src.lines().collect()
    }

    #[test]
    fn shapes_of_function_lines() {
        assert_eq!(BodyShape::of_function("const f = (x) => {"), BodyShape::ArrowBlock(17));
        assert_eq!(BodyShape::of_function("const f = (x) => x + 1;"), BodyShape::ArrowExpression);
        assert_eq!(BodyShape::of_function("const f = ({ a }) => a;"), BodyShape::ArrowExpression);
        assert_eq!(BodyShape::of_function("function f() {"), BodyShape::Block(13));
        assert_eq!(BodyShape::of_function("function f()"), BodyShape::BlockAhead);
    }

    #[test]
    fn shapes_of_class_lines() {
        assert_eq!(
            BodyShape::of_class("class A {", ClassKind::Class),
            BodyShape::ClassBody(Some(8))
        );
        assert_eq!(BodyShape::of_class("interface I {", ClassKind::Interface), BodyShape::TypeLike);
    }

    #[test]
    fn arrow_block_is_brace_matched() {
        let src = lines("const f = (x) => {\n  return x;\n};\n");
        assert_eq!(resolve_end(&src, 1, BodyShape::of_function(src[0])), 3);
    }

    #[test]
    fn arrow_expression_on_one_line() {
        let src = lines("const f = (x) => x + 1;");
        assert_eq!(resolve_end(&src, 1, BodyShape::ArrowExpression), 1);
    }

    #[test]
    fn arrow_expression_continues_within_window() {
        let src = lines("const f = (x) =>\n  x +\n  1;\nfoo();");
        assert_eq!(resolve_end(&src, 1, BodyShape::ArrowExpression), 3);
    }

    #[test]
    fn arrow_expression_outside_window_is_unresolved() {
        let src = lines("const f = (x) =>\n  a\n  b\n  c\n  d;");
        assert_eq!(resolve_end(&src, 1, BodyShape::ArrowExpression), 1);
    }

    #[test]
    fn block_brace_on_later_line() {
        let src = lines("function f(a,\n  b)\n{\n  return a;\n}\n");
        assert_eq!(resolve_end(&src, 1, BodyShape::BlockAhead), 5);
    }

    #[test]
    fn block_without_brace_in_window_is_unresolved() {
        let src = lines("function f()\n\n\n\n\n\n{\n}\n");
        assert_eq!(resolve_end(&src, 1, BodyShape::BlockAhead), 1);
    }

    #[test]
    fn interface_ends_at_closing_brace() {
        let src = lines("interface Props {\n  a: string;\n}\n");
        assert_eq!(resolve_end(&src, 1, BodyShape::TypeLike), 2);
    }

    #[test]
    fn type_alias_scan_starts_on_the_next_line() {
        let src = lines("type Id = string;\n\nfunction f() {\n  return 1;\n}\n");
        assert_eq!(resolve_end(&src, 1, BodyShape::TypeLike), 4);
    }

    #[test]
    fn one_line_interface_ends_at_next_terminator() {
        let src = lines("interface P { a: string }\nconst x = 1;\n");
        assert_eq!(resolve_end(&src, 1, BodyShape::TypeLike), 2);
    }

    #[test]
    fn type_alias_on_last_line_is_unresolved() {
        let src = lines("type Id = string;");
        assert_eq!(resolve_end(&src, 1, BodyShape::TypeLike), 1);
    }

    #[test]
    fn interface_without_terminator_in_window_is_unresolved() {
        let mut text = String::from("interface Open {\n");
        for i in 0..DECLARATION_LOOKAHEAD {
            text.push_str(&format!("  field{i}: string\n"));
        }
        text.push_str("}\n");
        let src = lines(&text);
        assert_eq!(resolve_end(&src, 1, BodyShape::TypeLike), 1);
    }

    #[test]
    fn out_of_range_start_is_returned_unchanged() {
        let src = lines("a");
        assert_eq!(resolve_end(&src, 7, BodyShape::BlockAhead), 7);
    }

    #[test]
    fn zero_start_is_returned_unchanged() {
        let src = lines("type Id = string;\nconst f = (x) =>\n  x;");
        assert_eq!(resolve_end(&src, 0, BodyShape::TypeLike), 0);
        assert_eq!(resolve_end(&src, 0, BodyShape::ArrowExpression), 0);
    }
}
