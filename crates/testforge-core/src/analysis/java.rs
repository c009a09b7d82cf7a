//! Java extraction

use crate::analysis::analyzer::Extraction;
use crate::analysis::types::{ClassInfo, FunctionInfo, ImportInfo, ParameterInfo};
use crate::error::{ForgeError, ForgeResult};
use tree_sitter::{Node, Parser};

pub(super) fn extract(source: &str) -> ForgeResult<Extraction> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| {
            ForgeError::analysis(
                format!("Failed to load Java grammar: {}", e),
                Some("java".to_string()),
            )
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| {
        ForgeError::analysis("Failed to parse source", Some("java".to_string()))
    })?;

    let root = tree.root_node();
    let src = source.as_bytes();

    let mut out = Extraction {
        had_errors: root.has_error(),
        ..Default::default()
    };

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "class_declaration" | "interface_declaration" | "enum_declaration" => {
                extract_type(child, src, &mut out);
            }
            "import_declaration" => extract_import(child, src, &mut out),
            _ => {}
        }
    }
    Ok(out)
}

fn extract_type(node: Node, src: &[u8], out: &mut Extraction) {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();
    if name.is_empty() {
        return;
    }

    // `superclass` is the `extends X` clause
    let extends = node
        .child_by_field_name("superclass")
        .and_then(|sc| sc.named_child(0))
        .map(|n| text(n, src));

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_declaration" | "constructor_declaration" => {
                    let function = extract_method(member, src, &name);
                    methods.push(function.name.clone());
                    out.functions.push(function);
                }
                // Nested types keep their own method inventory
                "class_declaration" | "interface_declaration" | "enum_declaration" => {
                    extract_type(member, src, out);
                }
                _ => {}
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

fn extract_method(node: Node, src: &[u8], class_name: &str) -> FunctionInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();

    let mut modifiers = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" {
            modifiers = text(child, src)
                .split_whitespace()
                .map(|s| s.to_string())
                .collect();
        }
    }

    let mut parameters = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "formal_parameter" | "spread_parameter" => {
                    let pname = param
                        .child_by_field_name("name")
                        .or_else(|| {
                            // spread_parameter has no name field; take the
                            // trailing variable_declarator / identifier
                            param.named_child(param.named_child_count().saturating_sub(1))
                        })
                        .map(|n| text(n, src))
                        .unwrap_or_default();
                    parameters.push(ParameterInfo {
                        name: pname,
                        type_hint: param.child_by_field_name("type").map(|n| text(n, src)),
                        has_default: false,
                    });
                }
                _ => {}
            }
        }
    }

    FunctionInfo {
        qualified_name: Some(format!("{}.{}", class_name, name)),
        name,
        parameters,
        return_type: node.child_by_field_name("type").map(|n| text(n, src)),
        is_async: false,
        is_method: true,
        decorators: modifiers,
        start_line: node.start_position().row as u32 + 1,
        end_line: node.end_position().row as u32 + 1,
        docstring: None,
    }
}

fn extract_import(node: Node, src: &[u8], out: &mut Extraction) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if matches!(child.kind(), "scoped_identifier" | "identifier") {
            out.imports.push(ImportInfo {
                source: text(child, src),
                names: Vec::new(),
            });
            return;
        }
    }
}

fn text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}
