//! Python extraction
//!
//! Walks the tree-sitter parse tree by node kind and field name, which
//! keeps the extraction independent of the query cursor API.

use crate::analysis::analyzer::Extraction;
use crate::analysis::types::{ClassInfo, FunctionInfo, ImportInfo, ParameterInfo};
use crate::error::{ForgeError, ForgeResult};
use tree_sitter::{Node, Parser};

pub(super) fn extract(source: &str) -> ForgeResult<Extraction> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| {
            ForgeError::analysis(
                format!("Failed to load Python grammar: {}", e),
                Some("python".to_string()),
            )
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| {
        ForgeError::analysis("Failed to parse source", Some("python".to_string()))
    })?;

    let root = tree.root_node();
    let src = source.as_bytes();

    let mut out = Extraction {
        had_errors: root.has_error(),
        ..Default::default()
    };

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        visit_top_level(child, src, &mut out);
    }
    Ok(out)
}

fn visit_top_level(node: Node, src: &[u8], out: &mut Extraction) {
    match node.kind() {
        "function_definition" => {
            out.functions.push(extract_function(node, src, Vec::new(), None));
        }
        "decorated_definition" => {
            let decorators = collect_decorators(node, src);
            if let Some(definition) = node.child_by_field_name("definition") {
                match definition.kind() {
                    "function_definition" => {
                        out.functions
                            .push(extract_function(definition, src, decorators, None));
                    }
                    "class_definition" => extract_class(definition, src, out),
                    _ => {}
                }
            }
        }
        "class_definition" => extract_class(node, src, out),
        "import_statement" => extract_import(node, src, out),
        "import_from_statement" | "future_import_statement" => {
            extract_from_import(node, src, out)
        }
        _ => {}
    }
}

fn collect_decorators(node: Node, src: &[u8]) -> Vec<String> {
    let mut decorators = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "decorator" {
            decorators.push(text(child, src));
        }
    }
    decorators
}

fn extract_function(
    node: Node,
    src: &[u8],
    decorators: Vec<String>,
    class_name: Option<&str>,
) -> FunctionInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();

    let is_async = node.child(0).is_some_and(|c| c.kind() == "async");

    let mut parameters = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "identifier" => parameters.push(ParameterInfo::new(text(param, src))),
                "typed_parameter" => {
                    let pname = param
                        .named_child(0)
                        .map(|n| text(n, src))
                        .unwrap_or_default();
                    parameters.push(ParameterInfo {
                        name: pname,
                        type_hint: param.child_by_field_name("type").map(|n| text(n, src)),
                        has_default: false,
                    });
                }
                "default_parameter" => {
                    let pname = param
                        .child_by_field_name("name")
                        .map(|n| text(n, src))
                        .unwrap_or_default();
                    parameters.push(ParameterInfo {
                        name: pname,
                        type_hint: None,
                        has_default: true,
                    });
                }
                "typed_default_parameter" => {
                    let pname = param
                        .child_by_field_name("name")
                        .map(|n| text(n, src))
                        .unwrap_or_default();
                    parameters.push(ParameterInfo {
                        name: pname,
                        type_hint: param.child_by_field_name("type").map(|n| text(n, src)),
                        has_default: true,
                    });
                }
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    parameters.push(ParameterInfo::new(text(param, src)));
                }
                _ => {}
            }
        }
    }

    let docstring = node
        .child_by_field_name("body")
        .and_then(|body| body.named_child(0))
        .filter(|stmt| stmt.kind() == "expression_statement")
        .and_then(|stmt| stmt.named_child(0))
        .filter(|expr| expr.kind() == "string")
        .map(|s| clean_docstring(&text(s, src)));

    FunctionInfo {
        qualified_name: class_name.map(|class| format!("{}.{}", class, name)),
        name,
        parameters,
        return_type: node.child_by_field_name("return_type").map(|n| text(n, src)),
        is_async,
        is_method: class_name.is_some(),
        decorators,
        start_line: node.start_position().row as u32 + 1,
        end_line: node.end_position().row as u32 + 1,
        docstring,
    }
}

fn extract_class(node: Node, src: &[u8], out: &mut Extraction) {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();
    if name.is_empty() {
        return;
    }

    let extends = node
        .child_by_field_name("superclasses")
        .and_then(|args| args.named_child(0))
        .map(|n| text(n, src));

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            let (definition, decorators) = match child.kind() {
                "function_definition" => (Some(child), Vec::new()),
                "decorated_definition" => (
                    child
                        .child_by_field_name("definition")
                        .filter(|d| d.kind() == "function_definition"),
                    collect_decorators(child, src),
                ),
                _ => (None, Vec::new()),
            };
            if let Some(definition) = definition {
                let function = extract_function(definition, src, decorators, Some(&name));
                methods.push(function.name.clone());
                out.functions.push(function);
            }
        }
    }

    out.classes.push(ClassInfo {
        name,
        extends,
        methods,
        start_line: node.start_position().row as u32 + 1,
        end_line: node.end_position().row as u32 + 1,
    });
}

fn extract_import(node: Node, src: &[u8], out: &mut Extraction) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let source = match child.kind() {
            "dotted_name" => text(child, src),
            "aliased_import" => child
                .child_by_field_name("name")
                .map(|n| text(n, src))
                .unwrap_or_default(),
            _ => continue,
        };
        if !source.is_empty() {
            out.imports.push(ImportInfo {
                source,
                names: Vec::new(),
            });
        }
    }
}

fn extract_from_import(node: Node, src: &[u8], out: &mut Extraction) {
    let module = match node.child_by_field_name("module_name") {
        Some(m) => m,
        None => return,
    };
    let source = text(module, src);

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        // The module itself shows up as a named child; skip it by range
        if child.byte_range() == module.byte_range() {
            continue;
        }
        match child.kind() {
            "dotted_name" => names.push(text(child, src)),
            "aliased_import" => {
                if let Some(name) = child.child_by_field_name("name") {
                    names.push(text(name, src));
                }
            }
            "wildcard_import" => names.push("*".to_string()),
            _ => {}
        }
    }

    out.imports.push(ImportInfo { source, names });
}

fn clean_docstring(raw: &str) -> String {
    raw.trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_typed_function() {
        let out = extract("def add(a: int, b: int = 0) -> int:\n    return a + b\n").unwrap();
        assert_eq!(out.functions.len(), 1);
        let f = &out.functions[0];
        assert_eq!(f.name, "add");
        assert_eq!(f.parameters.len(), 2);
        assert_eq!(f.parameters[0].type_hint.as_deref(), Some("int"));
        assert!(f.parameters[1].has_default);
        assert_eq!(f.return_type.as_deref(), Some("int"));
        assert!(!f.is_async);
    }

    #[test]
    fn extracts_async_function_and_docstring() {
        let source = "async def fetch(url):\n    \"\"\"Fetch a URL.\"\"\"\n    return url\n";
        let out = extract(source).unwrap();
        let f = &out.functions[0];
        assert!(f.is_async);
        assert_eq!(f.docstring.as_deref(), Some("Fetch a URL."));
    }

    #[test]
    fn extracts_class_with_methods() {
        let source = "class Stack(Base):\n    def push(self, item):\n        pass\n\n    def pop(self):\n        pass\n";
        let out = extract(source).unwrap();
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.classes[0].name, "Stack");
        assert_eq!(out.classes[0].extends.as_deref(), Some("Base"));
        assert_eq!(out.classes[0].methods, vec!["push", "pop"]);
        assert_eq!(out.functions.len(), 2);
        assert_eq!(out.functions[0].qualified_name.as_deref(), Some("Stack.push"));
        assert!(out.functions[0].is_method);
    }

    #[test]
    fn extracts_decorated_function() {
        let source = "@staticmethod\ndef helper():\n    pass\n";
        let out = extract(source).unwrap();
        assert_eq!(out.functions[0].decorators, vec!["@staticmethod"]);
    }

    #[test]
    fn extracts_imports() {
        let source = "import os\nfrom typing import List, Dict\n";
        let out = extract(source).unwrap();
        assert_eq!(out.imports.len(), 2);
        assert_eq!(out.imports[0].source, "os");
        assert_eq!(out.imports[1].source, "typing");
        assert_eq!(out.imports[1].names, vec!["List", "Dict"]);
    }

    #[test]
    fn extracts_splat_parameters() {
        let out = extract("def call(*args, **kwargs):\n    pass\n").unwrap();
        let names: Vec<_> = out.functions[0]
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["*args", "**kwargs"]);
    }
}
