//! Scan pass (spec §4.2.1): a single sweep over a `ClassDecl`'s children
//! that buckets them by kind before any text is emitted. `__init__` needs to
//! mention fields declared later in source order than the constructors
//! themselves, so emission can't be a single top-to-bottom walk (§9).

use javapy_ast::{Node, NodeKind};

use super::decl::parse_decl_value;

pub(super) struct ClassInfo<'a> {
    pub(super) name: &'a str,
    pub(super) base: Option<&'a str>,
    pub(super) ctors: Vec<&'a Node>,
    pub(super) instance_fields: Vec<&'a Node>,
    pub(super) static_fields: Vec<&'a Node>,
    pub(super) methods: Vec<&'a Node>,
}

pub(super) fn scan_class(class: &Node) -> ClassInfo<'_> {
    let mut info = ClassInfo {
        name: &class.value,
        base: None,
        ctors: Vec::new(),
        instance_fields: Vec::new(),
        static_fields: Vec::new(),
        methods: Vec::new(),
    };
    for child in &class.children {
        match child.kind {
            NodeKind::Extends => info.base = Some(&child.value),
            NodeKind::FieldDecl => {
                let (modifiers, _, _) = parse_decl_value(&child.value);
                if modifiers.iter().any(|m| *m == "static") {
                    info.static_fields.push(child);
                } else {
                    info.instance_fields.push(child);
                }
            }
            NodeKind::ConstructorDecl => info.ctors.push(child),
            NodeKind::MethodDecl => info.methods.push(child),
            _ => {}
        }
    }
    info
}
