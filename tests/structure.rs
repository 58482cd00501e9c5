//! Structural extraction properties exercised through the public API.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use code_monitor::structure::braces::find_matching_brace;
use code_monitor::structure::{
    diff_extractions, extract_entities, signatures, CodeEntity, EntitySignature, FileExtraction,
    FunctionEntity, FunctionKind,
};

const SAMPLE: &str = r#"import { api } from "./api";

// Renders a { brace in a comment
function add(a, b) {
  return a + b;
}

const s = "{";

export class Store extends Base {
  constructor(db) {
    this.db = db;
  }

  async load(id) {
    const key = `item-${id}`;
    return this.db.get(key);
  }
}

interface Props {
  label: string;
}

const f = (x) => x + 1;
"#;

fn function(entity: &CodeEntity) -> &FunctionEntity {
    match entity {
        CodeEntity::Function(f) => f,
        CodeEntity::Class(c) => panic!("expected a function, got class {}", c.name),
    }
}

#[test]
fn plain_function_scenario() {
    let extraction = extract_entities("function add(a, b) {\n  return a + b;\n}\n");
    assert_eq!(extraction.entities.len(), 1);
    let add = function(&extraction.entities[0]);
    assert_eq!(add.name, "add");
    assert_eq!(add.kind, FunctionKind::Function);
    assert_eq!(add.args, vec!["a", "b"]);
    assert_eq!((add.line_start, add.line_end), (1, 3));
}

#[test]
fn expression_arrow_on_line_five() {
    let extraction = extract_entities("\n\n\n\nconst f = (x) => x + 1;\n");
    let f = function(&extraction.entities[0]);
    assert_eq!(f.name, "f");
    assert_eq!(f.kind.as_str(), "arrow_function");
    assert_eq!(f.args, vec!["x"]);
    assert_eq!((f.line_start, f.line_end), (5, 5));
}

#[test]
fn class_spanning_ten_to_twenty_with_method() {
    let mut lines: Vec<String> = (1..10).map(|i| format!("// line {i}")).collect();
    lines.extend(
        [
            "class Widget {",
            "  // fields",
            "  foo(a) {",
            "    return a;",
            "  }",
            "",
            "",
            "",
            "",
            "",
            "}",
        ]
        .map(String::from),
    );
    let extraction = extract_entities(&lines.join("\n"));

    let class = extraction.classes().next().expect("class found");
    assert_eq!((class.line_start, class.line_end), (10, 20));
    assert_eq!(class.methods.len(), 1);
    let foo = &class.methods[0];
    assert_eq!((foo.name.as_str(), foo.line_start, foo.line_end), ("foo", 12, 14));
}

#[test]
fn brace_in_string_does_not_perturb_enclosing_function() {
    let extraction = extract_entities("function f() {\n  const s = \"{\";\n  return s;\n}\nf();\n");
    let f = function(&extraction.entities[0]);
    assert_eq!((f.line_start, f.line_end), (1, 4));
}

#[test]
fn unterminated_interface_collapses_to_one_line() {
    let mut text = String::from("interface Open {\n");
    for i in 0..60 {
        text.push_str(&format!("  field{i}: string\n"));
    }
    let extraction = extract_entities(&text);
    let iface = extraction.classes().next().expect("interface found");
    assert_eq!((iface.line_start, iface.line_end), (1, 1));
    assert!(iface.methods.is_empty());
}

#[test]
fn every_span_is_well_formed() {
    let extraction = extract_entities(SAMPLE);
    assert!(!extraction.entities.is_empty());
    for entity in &extraction.entities {
        assert!(entity.line_end() >= entity.line_start(), "{}", entity.name());
        assert!(entity.line_end() <= extraction.total_lines);
    }
}

#[test]
fn sample_file_entities() {
    let extraction = extract_entities(SAMPLE);
    let found: Vec<(String, usize, usize)> = extraction
        .entities
        .iter()
        .map(|e| (e.name().to_string(), e.line_start(), e.line_end()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("add".to_string(), 4, 6),
            ("Store".to_string(), 10, 19),
            ("constructor".to_string(), 11, 13),
            ("Props".to_string(), 21, 22),
            ("f".to_string(), 25, 25),
        ]
    );
    // `async load(id) {` is only recognized by the class member pass.
    let store = extraction.classes().next().unwrap();
    let methods: Vec<(&str, usize, usize)> =
        store.methods.iter().map(|m| (m.name.as_str(), m.line_start, m.line_end)).collect();
    assert_eq!(methods, vec![("constructor", 11, 13), ("load", 15, 18)]);
}

#[test]
fn extraction_is_idempotent() {
    assert_eq!(extract_entities(SAMPLE), extract_entities(SAMPLE));
}

#[test]
fn signatures_survive_blank_line_shift() {
    let shifted = format!("\n\n\n\n\n\n\n{SAMPLE}");
    let before = extract_entities(SAMPLE);
    let after = extract_entities(&shifted);

    assert_ne!(before.entities, after.entities);
    assert_eq!(signatures(&before), signatures(&after));
    assert!(!diff_extractions(&after, &before).has_structural_changes());
}

#[test]
fn diff_reports_added_removed_unchanged() {
    let previous = extract_entities("function a() {}\nfunction b() {}\n");
    let current = extract_entities("function b() {}\nfunction c() {}\n");
    let changes = diff_extractions(&current, &previous);

    let names = |set: &BTreeSet<EntitySignature>| -> Vec<String> {
        set.iter().map(ToString::to_string).collect()
    };
    assert_eq!(names(&changes.added), vec!["function:c:1"]);
    assert_eq!(names(&changes.removed), vec!["function:a:1"]);
    assert_eq!(names(&changes.unchanged), vec!["function:b:1"]);
}

#[test]
fn growing_a_method_changes_the_class_signature() {
    let before = extract_entities("class A {\n  m() {\n  }\n}\n");
    let after = extract_entities("class A {\n  m() {\n    x();\n  }\n}\n");
    let changes = diff_extractions(&after, &before);

    let added: Vec<String> = changes.added.iter().map(ToString::to_string).collect();
    assert!(added.contains(&"class:A:5:{method:m:3}".to_string()));
    assert!(added.contains(&"method:m:3".to_string()));
}

#[test]
fn brace_matcher_balances_nested_blocks() {
    let lines = ["fn {", "  if {", "    '}'", "  }", "  /* { */", "}", "tail {"];
    let end = find_matching_brace(&lines, 0, 3);
    assert_eq!(end, 6);
    assert!(end >= 1);
}

#[test]
fn degenerate_input_is_a_valid_extraction() {
    let extraction = extract_entities("{{{{\n\"unterminated\n`template\n");
    assert_eq!(extraction, FileExtraction { total_lines: 3, ..FileExtraction::default() });
}

#[test]
fn type_like_end_is_searched_after_the_declaration_line() {
    let alias = extract_entities("type Id = string;\n\nfunction f() {\n  return 1;\n}\n");
    let id = alias.classes().next().expect("type alias found");
    assert_eq!((id.line_start, id.line_end), (1, 4));

    let iface = extract_entities("interface P { a: string }\nconst x = 1;\n");
    let p = iface.classes().next().expect("interface found");
    assert_eq!((p.line_start, p.line_end), (1, 2));
}

#[test]
fn escaped_brace_outside_strings_is_not_counted() {
    let extraction = extract_entities("function f() {\n  re = /\\{/;\n}\nconst x = 1;\n");
    let f = function(&extraction.entities[0]);
    assert_eq!((f.line_start, f.line_end), (1, 3));
}
