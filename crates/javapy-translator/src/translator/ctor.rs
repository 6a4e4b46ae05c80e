//! Constructor overload collapsing into a single `__init__` (spec §4.2.3).

use std::collections::{HashMap, HashSet};

use javapy_ast::{Node, NodeKind};

use super::decl::parse_decl_value;
use super::emitter::Emitter;
use super::expr::expr_to_string;
use super::scan::ClassInfo;
use super::stmt::emit_stmt;
use super::types::{default_value_for, map_type};
use crate::Config;

pub(super) fn emit_init(em: &mut Emitter, info: &ClassInfo, config: &Config) {
    if info.ctors.is_empty() {
        emit_synthetic_init(em, info, config);
        return;
    }

    let longest = select_longest(&info.ctors);
    let longest_params = &longest.children[0].children;
    let min_len = info
        .ctors
        .iter()
        .map(|c| c.children[0].children.len())
        .min()
        .unwrap_or(0);

    em.line(&format!("def __init__({}):", build_header(longest_params, min_len, config)));
    em.indent();

    let body_stmts = &longest.children[1].children;
    let (chain, rest) = split_chain_call(body_stmts);
    let mut wrote = false;

    if let Some(chain) = chain {
        emit_chain_call(em, chain);
        wrote = true;
    }

    let assigned = collect_assigned_fields(&longest.children[1]);
    for field in &info.instance_fields {
        let (_, ty, name) = parse_decl_value(&field.value);
        if assigned.contains(name) {
            continue;
        }
        emit_field_assignment(em, name, ty, field.children.first(), config);
        wrote = true;
    }

    if !rest.is_empty() {
        emit_ctor_rest(em, rest, &info.instance_fields, config);
        wrote = true;
    }

    if !wrote {
        em.line("pass");
    }
    em.dedent();
}

/// A class with fields but no declared constructor still needs every field
/// defined by the time `__init__` returns (spec §8.1's field-initialization-
/// completeness invariant) -- synthesize a zero-argument one.
fn emit_synthetic_init(em: &mut Emitter, info: &ClassInfo, config: &Config) {
    if info.instance_fields.is_empty() {
        return;
    }
    em.line("def __init__(self):");
    em.indent();
    for field in &info.instance_fields {
        let (_, ty, name) = parse_decl_value(&field.value);
        emit_field_assignment(em, name, ty, field.children.first(), config);
    }
    em.dedent();
}

/// Emits the constructor-body statements that remain after the optional
/// this()/super() chain call. A top-level `this.<field> = expr` assignment
/// to a known instance field is rendered through [`emit_field_assignment`]
/// (the annotated `self.field: Type = expr` form) on its first occurrence,
/// same as an injected default -- Python only wants one annotated
/// assignment per attribute, and the scan pass already guarantees this
/// field was excluded from injection because this assignment exists.
/// Anything else (nested assignments, other statement kinds) falls back to
/// the ordinary statement emitter.
fn emit_ctor_rest(em: &mut Emitter, stmts: &[Node], instance_fields: &[&Node], config: &Config) {
    let field_types: HashMap<&str, &str> = instance_fields
        .iter()
        .map(|f| {
            let (_, ty, name) = parse_decl_value(&f.value);
            (name, ty)
        })
        .collect();
    let mut annotated: HashSet<String> = HashSet::new();
    for stmt in stmts {
        if let Some(name) = direct_field_assign_target(stmt) {
            if let Some(ty) = field_types.get(name) {
                if annotated.insert(name.to_string()) {
                    emit_field_assignment(em, name, ty, Some(&stmt.children[1]), config);
                    continue;
                }
            }
        }
        emit_stmt(em, stmt, config);
    }
}

/// The field name assigned by a top-level `this.<name> = <expr>` statement,
/// or `None` for any other statement shape (including compound assignment
/// operators like `+=`, which can't stand in for a field's first
/// annotated declaration).
fn direct_field_assign_target(stmt: &Node) -> Option<&str> {
    if stmt.kind != NodeKind::Assign || stmt.value != "=" {
        return None;
    }
    let lhs = &stmt.children[0];
    if lhs.kind == NodeKind::MemberAccess && lhs.children.first().map(|t| t.kind) == Some(NodeKind::This) {
        Some(lhs.value.as_str())
    } else {
        None
    }
}

fn emit_field_assignment(em: &mut Emitter, name: &str, ty: &str, init: Option<&Node>, config: &Config) {
    let value = init.map(expr_to_string).unwrap_or_else(|| default_value_for(ty));
    let hint = if config.emit_type_hints {
        format!(": {}", map_type(ty))
    } else {
        String::new()
    };
    em.line(&format!("self.{name}{hint} = {value}"));
}

fn build_header(params: &[Node], min_len: usize, config: &Config) -> String {
    let mut parts = vec!["self".to_string()];
    for (i, param) in params.iter().enumerate() {
        let (_, ty, name) = parse_decl_value(&param.value);
        let mut piece = if config.emit_type_hints {
            format!("{name}: {}", map_type(ty))
        } else {
            name.to_string()
        };
        if i >= min_len {
            piece.push_str(&format!(" = {}", default_value_for(ty)));
        }
        parts.push(piece);
    }
    parts.join(", ")
}

fn select_longest<'a>(ctors: &[&'a Node]) -> &'a Node {
    let mut longest = ctors[0];
    for c in &ctors[1..] {
        if c.children[0].children.len() > longest.children[0].children.len() {
            longest = c;
        }
    }
    longest
}

fn split_chain_call(stmts: &[Node]) -> (Option<&Node>, &[Node]) {
    match stmts.first() {
        Some(first) if is_chain_call(first) => (Some(first), &stmts[1..]),
        _ => (None, stmts),
    }
}

fn is_chain_call(stmt: &Node) -> bool {
    let Some(call) = unwrap_expr_stmt(stmt) else {
        return false;
    };
    call.kind == NodeKind::Call
        && call
            .children
            .first()
            .is_some_and(|c| matches!(c.kind, NodeKind::This | NodeKind::Super))
}

fn unwrap_expr_stmt(stmt: &Node) -> Option<&Node> {
    if stmt.kind == NodeKind::ExprStmt {
        stmt.children.first()
    } else {
        None
    }
}

/// `this(...)` becomes `self.__init__(...)`; `super(...)` becomes
/// `super().__init__(...)` (spec §4.2.3's chaining rule, §4.2.5's super rule).
fn emit_chain_call(em: &mut Emitter, stmt: &Node) {
    let call = unwrap_expr_stmt(stmt).expect("split_chain_call only returns ExprStmt-wrapped calls");
    let callee = &call.children[0];
    let args: Vec<String> = call.children[1..].iter().map(expr_to_string).collect();
    let args_text = args.join(", ");
    let line = match callee.kind {
        NodeKind::This => format!("self.__init__({args_text})"),
        NodeKind::Super => format!("super().__init__({args_text})"),
        _ => unreachable!("is_chain_call only matches This/Super callees"),
    };
    em.line(&line);
}

/// Fields explicitly assigned via `this.name = ...` anywhere in the
/// constructor body don't need an injected default (spec §4.2.3).
fn collect_assigned_fields(body_block: &Node) -> HashSet<String> {
    let mut set = HashSet::new();
    walk_for_assignments(body_block, &mut set);
    set
}

fn walk_for_assignments(node: &Node, set: &mut HashSet<String>) {
    if node.kind == NodeKind::Assign {
        if let Some(name) = this_field_name(&node.children[0]) {
            set.insert(name);
        }
    }
    for child in &node.children {
        walk_for_assignments(child, set);
    }
}

fn this_field_name(lhs: &Node) -> Option<String> {
    if lhs.kind == NodeKind::MemberAccess && lhs.children.first().map(|t| t.kind) == Some(NodeKind::This) {
        Some(lhs.value.clone())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param_list(params: Vec<&str>) -> Node {
        Node::new(
            NodeKind::ParamList,
            "",
            params.into_iter().map(|p| Node::leaf(NodeKind::Param, p)).collect(),
        )
    }

    #[test]
    fn select_longest_keeps_first_on_tie() {
        let a = Node::new(NodeKind::ConstructorDecl, "C", vec![param_list(vec!["int x"]), Node::new(NodeKind::Block, "", vec![])]);
        let b = Node::new(NodeKind::ConstructorDecl, "C", vec![param_list(vec!["int y"]), Node::new(NodeKind::Block, "", vec![])]);
        let refs = vec![&a, &b];
        let longest = select_longest(&refs);
        assert_eq!(longest.children[0].children[0].value, "int x");
    }

    #[test]
    fn detects_this_chain_call() {
        let call = Node::new(
            NodeKind::Call,
            "",
            vec![Node::leaf(NodeKind::This, ""), Node::leaf(NodeKind::Literal, "0")],
        );
        let stmt = Node::new(NodeKind::ExprStmt, "", vec![call]);
        assert!(is_chain_call(&stmt));
    }

    #[test]
    fn collects_this_dot_field_assignments() {
        let lhs = Node::new(NodeKind::MemberAccess, "x", vec![Node::leaf(NodeKind::This, "")]);
        let assign = Node::new(NodeKind::Assign, "=", vec![lhs, Node::leaf(NodeKind::Identifier, "x")]);
        let body = Node::new(NodeKind::Block, "", vec![assign]);
        let assigned = collect_assigned_fields(&body);
        assert!(assigned.contains("x"));
    }

    #[test]
    fn direct_field_assign_target_matches_plain_this_dot_field() {
        let lhs = Node::new(NodeKind::MemberAccess, "x", vec![Node::leaf(NodeKind::This, "")]);
        let assign = Node::new(NodeKind::Assign, "=", vec![lhs, Node::leaf(NodeKind::Identifier, "x")]);
        assert_eq!(direct_field_assign_target(&assign), Some("x"));
    }

    #[test]
    fn direct_field_assign_target_rejects_compound_assignment() {
        let lhs = Node::new(NodeKind::MemberAccess, "x", vec![Node::leaf(NodeKind::This, "")]);
        let assign = Node::new(NodeKind::Assign, "+=", vec![lhs, Node::leaf(NodeKind::Literal, "1")]);
        assert_eq!(direct_field_assign_target(&assign), None);
    }

    #[test]
    fn emit_ctor_rest_annotates_first_assignment_only() {
        let field = Node::leaf(NodeKind::FieldDecl, "private int x");
        let lhs = Node::new(NodeKind::MemberAccess, "x", vec![Node::leaf(NodeKind::This, "")]);
        let first = Node::new(NodeKind::Assign, "=", vec![lhs.clone(), Node::leaf(NodeKind::Literal, "1")]);
        let second = Node::new(NodeKind::Assign, "=", vec![lhs, Node::leaf(NodeKind::Literal, "2")]);
        let mut em = Emitter::new("    ".to_string());
        emit_ctor_rest(&mut em, &[first, second], &[&field], &Config::default());
        assert_eq!(em.finish(), "self.x: int = 1\nself.x = 2\n");
    }
}
