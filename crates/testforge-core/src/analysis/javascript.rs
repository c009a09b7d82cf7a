//! JavaScript extraction

use crate::analysis::analyzer::Extraction;
use crate::analysis::types::{ClassInfo, FunctionInfo, ImportInfo, ParameterInfo};
use crate::error::{ForgeError, ForgeResult};
use tree_sitter::{Node, Parser};

pub(super) fn extract(source: &str) -> ForgeResult<Extraction> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|e| {
            ForgeError::analysis(
                format!("Failed to load JavaScript grammar: {}", e),
                Some("javascript".to_string()),
            )
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| {
        ForgeError::analysis("Failed to parse source", Some("javascript".to_string()))
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
        "function_declaration" | "generator_function_declaration" => {
            if let Some(function) = extract_function(node, src, None) {
                out.functions.push(function);
            }
        }
        "class_declaration" => extract_class(node, src, out),
        "lexical_declaration" | "variable_declaration" => {
            extract_function_bindings(node, src, out)
        }
        "export_statement" => {
            // export default / export const f = ... wrap the declaration
            if let Some(declaration) = node.child_by_field_name("declaration") {
                visit_top_level(declaration, src, out);
            } else {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    visit_top_level(child, src, out);
                }
            }
        }
        "import_statement" => extract_import(node, src, out),
        _ => {}
    }
}

fn extract_function(node: Node, src: &[u8], class_name: Option<&str>) -> Option<FunctionInfo> {
    let name = node.child_by_field_name("name").map(|n| text(n, src))?;
    Some(build_function(node, src, name, class_name))
}

fn build_function(node: Node, src: &[u8], name: String, class_name: Option<&str>) -> FunctionInfo {
    let is_async = node.child(0).is_some_and(|c| c.kind() == "async");

    let mut parameters = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "identifier" => parameters.push(ParameterInfo::new(text(param, src))),
                "assignment_pattern" => {
                    let pname = param
                        .child_by_field_name("left")
                        .map(|n| text(n, src))
                        .unwrap_or_default();
                    parameters.push(ParameterInfo {
                        name: pname,
                        type_hint: None,
                        has_default: true,
                    });
                }
                "rest_pattern" | "object_pattern" | "array_pattern" => {
                    parameters.push(ParameterInfo::new(text(param, src)));
                }
                _ => {}
            }
        }
    }

    FunctionInfo {
        qualified_name: class_name.map(|class| format!("{}.{}", class, name)),
        name,
        parameters,
        return_type: None,
        is_async,
        is_method: class_name.is_some(),
        decorators: Vec::new(),
        start_line: node.start_position().row as u32 + 1,
        end_line: node.end_position().row as u32 + 1,
        docstring: None,
    }
}

/// `const f = (a) => ...` and `const f = function (a) {...}` bindings
fn extract_function_bindings(node: Node, src: &[u8], out: &mut Extraction) {
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let value = match declarator.child_by_field_name("value") {
            Some(v) => v,
            None => continue,
        };
        if !matches!(
            value.kind(),
            "arrow_function" | "function_expression" | "function" | "generator_function"
        ) {
            continue;
        }
        let name = declarator
            .child_by_field_name("name")
            .map(|n| text(n, src))
            .unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let mut function = build_function(value, src, name, None);
        // Arrow functions put async before the binding value
        if !function.is_async {
            function.is_async = text(value, src).starts_with("async");
        }
        // Single-parameter arrows omit the parens and the parameters field
        if function.parameters.is_empty() {
            if let Some(param) = value.child_by_field_name("parameter") {
                function.parameters.push(ParameterInfo::new(text(param, src)));
            }
        }
        function.start_line = declarator.start_position().row as u32 + 1;
        function.end_line = declarator.end_position().row as u32 + 1;
        out.functions.push(function);
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

    // class_heritage is `extends Expr`
    let mut extends = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "class_heritage" {
            if let Some(expr) = child.named_child(0) {
                extends = Some(text(expr, src));
            }
        }
    }

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if member.kind() != "method_definition" {
                continue;
            }
            let method_name = member
                .child_by_field_name("name")
                .map(|n| text(n, src))
                .unwrap_or_default();
            if method_name.is_empty() {
                continue;
            }
            let function = build_function(member, src, method_name.clone(), Some(&name));
            methods.push(method_name);
            out.functions.push(function);
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
    let source = node
        .child_by_field_name("source")
        .map(|n| text(n, src))
        .unwrap_or_default()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    if source.is_empty() {
        return;
    }

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for item in child.named_children(&mut clause_cursor) {
            match item.kind() {
                "identifier" => names.push(text(item, src)),
                "named_imports" => {
                    let mut imports_cursor = item.walk();
                    for specifier in item.named_children(&mut imports_cursor) {
                        if specifier.kind() == "import_specifier" {
                            if let Some(name) = specifier.child_by_field_name("name") {
                                names.push(text(name, src));
                            }
                        }
                    }
                }
                "namespace_import" => names.push(text(item, src)),
                _ => {}
            }
        }
    }

    out.imports.push(ImportInfo { source, names });
}

fn text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_function_declaration() {
        let out = extract("function add(a, b = 0) {\n  return a + b;\n}\n").unwrap();
        assert_eq!(out.functions.len(), 1);
        let f = &out.functions[0];
        assert_eq!(f.name, "add");
        assert_eq!(f.parameters.len(), 2);
        assert!(f.parameters[1].has_default);
    }

    #[test]
    fn extracts_async_arrow_binding() {
        let out = extract("const fetchUser = async (id) => {\n  return id;\n};\n").unwrap();
        assert_eq!(out.functions.len(), 1);
        let f = &out.functions[0];
        assert_eq!(f.name, "fetchUser");
        assert!(f.is_async);
        assert_eq!(f.parameters[0].name, "id");
    }

    #[test]
    fn extracts_exported_class() {
        let source = "export class Queue extends Base {\n  push(item) {}\n  pop() {}\n}\n";
        let out = extract(source).unwrap();
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.classes[0].name, "Queue");
        assert_eq!(out.classes[0].extends.as_deref(), Some("Base"));
        assert_eq!(out.classes[0].methods, vec!["push", "pop"]);
        assert_eq!(out.functions[0].qualified_name.as_deref(), Some("Queue.push"));
    }

    #[test]
    fn extracts_imports() {
        let source = "import fs from 'fs';\nimport { join, resolve } from 'path';\n";
        let out = extract(source).unwrap();
        assert_eq!(out.imports.len(), 2);
        assert_eq!(out.imports[0].source, "fs");
        assert_eq!(out.imports[0].names, vec!["fs"]);
        assert_eq!(out.imports[1].names, vec!["join", "resolve"]);
    }
}
