//! Statement and control-flow rewrites (spec §4.2.6).

use javapy_ast::{Node, NodeKind};

use super::decl::parse_decl_value;
use super::emitter::Emitter;
use super::exceptions::map_exception_type;
use super::expr::{emit_hoists, expr_to_string, render_assign, render_expr};
use super::types::default_value_for;
use crate::Config;

pub(super) fn emit_block(em: &mut Emitter, stmts: &[Node], config: &Config) {
    for stmt in stmts {
        emit_stmt(em, stmt, config);
    }
}

pub(super) fn emit_stmt(em: &mut Emitter, node: &Node, config: &Config) {
    match node.kind {
        NodeKind::Block => emit_block(em, &node.children, config),
        NodeKind::FieldDecl => emit_local_decl(em, node, config),
        NodeKind::Assign => emit_assign_stmt(em, node),
        NodeKind::ExprStmt => emit_bare_expr_as_stmt(em, &node.children[0]),
        NodeKind::If => emit_if(em, node, config),
        NodeKind::While => emit_while(em, node, config),
        NodeKind::DoWhile => emit_do_while(em, node, config),
        NodeKind::For => emit_for(em, node, config),
        NodeKind::ForEach => emit_for_each(em, node, config),
        NodeKind::Switch => emit_switch(em, node, config),
        NodeKind::Try => emit_try(em, node, config),
        NodeKind::Return => emit_return(em, node),
        NodeKind::Break => em.line("break"),
        NodeKind::Continue => em.line("continue"),
        other => em.line(&format!("# TODO: unknown {other:?}")),
    }
}

fn emit_local_decl(em: &mut Emitter, node: &Node, config: &Config) {
    let (_, ty, name) = parse_decl_value(&node.value);
    let (hoists, value) = match node.children.first() {
        Some(init) => render_expr(init),
        None => (Vec::new(), default_value_for(ty)),
    };
    emit_hoists(em, hoists);
    let hint = if config.emit_type_hints {
        format!(": {}", super::types::map_type(ty))
    } else {
        String::new()
    };
    em.line(&format!("{name}{hint} = {value}"));
}

fn emit_assign_stmt(em: &mut Emitter, node: &Node) {
    let (lhs_hoists, lhs) = render_expr(&node.children[0]);
    let (rhs_hoists, rhs) = render_expr(&node.children[1]);
    emit_hoists(em, lhs_hoists);
    emit_hoists(em, rhs_hoists);
    em.line(&render_assign(&node.value, &lhs, &rhs));
}

/// Emits a bare expression (not wrapped in `Assign`) as a statement: a
/// standalone `i++`/`i--` becomes its own `+= 1`/`-= 1` line rather than
/// going through the hoist-and-replace machinery meant for nested use.
fn emit_bare_expr_as_stmt(em: &mut Emitter, node: &Node) {
    if matches!(node.kind, NodeKind::PrefixOp | NodeKind::PostfixOp) && (node.value == "++" || node.value == "--") {
        let target = expr_to_string(&node.children[0]);
        let sign = if node.value == "++" { "+" } else { "-" };
        em.line(&format!("{target} {sign}= 1"));
        return;
    }
    let (hoists, text) = render_expr(node);
    emit_hoists(em, hoists);
    em.line(&text);
}

fn emit_return(em: &mut Emitter, node: &Node) {
    match node.children.first() {
        None => em.line("return"),
        Some(e) => {
            let (hoists, text) = render_expr(e);
            emit_hoists(em, hoists);
            em.line(&format!("return {text}"));
        }
    }
}

fn emit_if(em: &mut Emitter, node: &Node, config: &Config) {
    emit_if_chain(em, node, config, "if");
}

/// Java nests an `else if` as a child `If` node; Python wants a flat
/// `elif` chain (spec §4.2.6's table), so this recurses through the else
/// branch rather than emitting a nested `else: if ...:` block.
fn emit_if_chain(em: &mut Emitter, node: &Node, config: &Config, keyword: &str) {
    let cond = &node.children[0];
    let then_branch = &node.children[1];
    let (hoists, cond_text) = render_expr(cond);

    if keyword == "elif" && !hoists.is_empty() {
        // A hoisted statement has nowhere legal to live between sibling
        // `elif` arms, so fall back to a nested `else:`/`if:` here -- the
        // increment gets a real statement position inside the `else` suite.
        em.line("else:");
        em.indent();
        emit_hoists(em, hoists);
        em.line(&format!("if {cond_text}:"));
        em.indent();
        emit_block(em, &then_branch.children, config);
        em.dedent();
        emit_else_tail(em, node.children.get(2), config);
        em.dedent();
        return;
    }

    emit_hoists(em, hoists);
    em.line(&format!("{keyword} {cond_text}:"));
    em.indent();
    emit_block(em, &then_branch.children, config);
    em.dedent();
    emit_else_tail(em, node.children.get(2), config);
}

fn emit_else_tail(em: &mut Emitter, else_branch: Option<&Node>, config: &Config) {
    match else_branch {
        Some(n) if n.kind == NodeKind::If => emit_if_chain(em, n, config, "elif"),
        Some(n) => {
            em.line("else:");
            em.indent();
            emit_block(em, &n.children, config);
            em.dedent();
        }
        None => {}
    }
}

fn emit_while(em: &mut Emitter, node: &Node, config: &Config) {
    let cond = &node.children[0];
    let body = &node.children[1];
    let (hoists, cond_text) = render_expr(cond);
    // A hoist here only runs once, before the loop starts, not every
    // iteration -- see the module-level note in expr.rs.
    emit_hoists(em, hoists);
    em.line(&format!("while {cond_text}:"));
    em.indent();
    emit_block(em, &body.children, config);
    em.dedent();
}

fn emit_do_while(em: &mut Emitter, node: &Node, config: &Config) {
    let body = &node.children[0];
    let cond = &node.children[1];
    em.line("while True:");
    em.indent();
    emit_block(em, &body.children, config);
    let (hoists, cond_text) = render_expr(cond);
    emit_hoists(em, hoists); // runs every iteration: the condition lives inside the loop body
    em.line(&format!("if not ({cond_text}):"));
    em.indent();
    em.line("break");
    em.dedent();
    em.dedent();
}

fn is_empty_clause(n: &Node) -> bool {
    n.kind == NodeKind::Block && n.value == "empty"
}

fn emit_for(em: &mut Emitter, node: &Node, config: &Config) {
    let init = &node.children[0];
    let cond = &node.children[1];
    let update = &node.children[2];
    let body = &node.children[3];

    if !is_empty_clause(init) && !is_empty_clause(cond) && !is_empty_clause(update) {
        if let Some((var, range_expr)) = try_build_range(init, cond, update) {
            em.line(&format!("for {var} in {range_expr}:"));
            em.indent();
            emit_block(em, &body.children, config);
            em.dedent();
            return;
        }
    }

    if !is_empty_clause(init) {
        emit_stmt(em, init, config);
    }
    let cond_text = if is_empty_clause(cond) {
        "True".to_string()
    } else {
        let (hoists, text) = render_expr(cond);
        emit_hoists(em, hoists);
        text
    };
    em.line(&format!("while {cond_text}:"));
    em.indent();
    emit_block(em, &body.children, config);
    if !is_empty_clause(update) {
        emit_bare_expr_as_stmt(em, update);
    }
    em.dedent();
}

/// Recognizes the exact shape spec §4.2.6 calls out: `for (T i = a; i <op>
/// b; i++|i--) body` with an int-family `T`, a bound comparison against the
/// same loop variable, and an RHS-free `i++`/`i--` update. Anything else
/// falls back to the `while` form in the caller.
fn try_build_range(init: &Node, cond: &Node, update: &Node) -> Option<(String, String)> {
    if init.kind != NodeKind::FieldDecl {
        return None;
    }
    let (_, ty, name) = parse_decl_value(&init.value);
    if !matches!(ty, "int" | "long" | "short" | "byte") {
        return None;
    }
    let start = expr_to_string(init.children.first()?);

    if cond.kind != NodeKind::BinaryOp {
        return None;
    }
    if cond.children[0].kind != NodeKind::Identifier || cond.children[0].value != name {
        return None;
    }
    let end_expr = expr_to_string(&cond.children[1]);

    if !matches!(update.kind, NodeKind::PostfixOp | NodeKind::PrefixOp) {
        return None;
    }
    if update.children[0].kind != NodeKind::Identifier || update.children[0].value != name {
        return None;
    }

    let (end, range_expr) = match (cond.value.as_str(), update.value.as_str()) {
        ("<", "++") => (end_expr, None),
        ("<=", "++") => (format!("{end_expr} + 1"), None),
        (">", "--") => (end_expr, Some(-1)),
        (">=", "--") => (format!("{end_expr} - 1"), Some(-1)),
        _ => return None,
    };
    let range_expr = match range_expr {
        Some(step) => format!("range({start}, {end}, {step})"),
        None => format!("range({start}, {end})"),
    };
    Some((name.to_string(), range_expr))
}

fn emit_for_each(em: &mut Emitter, node: &Node, config: &Config) {
    let param = &node.children[0];
    let iterable = &node.children[1];
    let body = &node.children[2];
    let (_, _, name) = parse_decl_value(&param.value);
    let (hoists, iter_text) = render_expr(iterable);
    emit_hoists(em, hoists);
    em.line(&format!("for {name} in {iter_text}:"));
    em.indent();
    emit_block(em, &body.children, config);
    em.dedent();
}

fn emit_switch(em: &mut Emitter, node: &Node, config: &Config) {
    let scrutinee = &node.children[0];
    let (hoists, scrutinee_text) = render_expr(scrutinee);
    emit_hoists(em, hoists);
    em.line(&format!("match {scrutinee_text}:"));
    em.indent();
    for arm in &node.children[1..] {
        match arm.kind {
            NodeKind::CaseLabel => {
                let label = &arm.children[0];
                let stmts = &arm.children[1..];
                emit_case_pattern(em, label, &scrutinee_text);
                em.indent();
                emit_case_body(em, stmts, config);
                em.dedent();
            }
            NodeKind::DefaultLabel => {
                em.line("case _:");
                em.indent();
                emit_case_body(em, &arm.children, config);
                em.dedent();
            }
            _ => {}
        }
    }
    em.dedent();
}

fn emit_case_body(em: &mut Emitter, stmts: &[Node], config: &Config) {
    if stmts.is_empty() {
        em.line("pass");
    } else {
        emit_block(em, stmts, config);
    }
}

/// A literal case label (`case 1:`, `case "x":`) maps directly to a Python
/// match pattern. Anything else -- a bare identifier especially -- would be
/// read by `match` as a capture pattern rather than an equality test, so it
/// becomes a guard on the wildcard arm instead.
fn emit_case_pattern(em: &mut Emitter, label: &Node, scrutinee_text: &str) {
    let label_text = expr_to_string(label);
    if label.kind == NodeKind::Literal {
        em.line(&format!("case {label_text}:"));
    } else {
        em.line(&format!("case _ if {scrutinee_text} == {label_text}:"));
    }
}

fn emit_try(em: &mut Emitter, node: &Node, config: &Config) {
    em.line("try:");
    em.indent();
    let try_block = &node.children[0].children[0];
    emit_block(em, &try_block.children, config);
    em.dedent();

    for child in &node.children[1..] {
        match child.kind {
            NodeKind::Catch => {
                let param = &child.children[0];
                let body = &child.children[1];
                let (_, ty, name) = parse_decl_value(&param.value);
                em.line(&format!("except {} as {name}:", map_exception_type(ty)));
                em.indent();
                emit_block(em, &body.children, config);
                em.dedent();
            }
            NodeKind::Finally => {
                em.line("finally:");
                em.indent();
                emit_block(em, &child.children[0].children, config);
                em.dedent();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(stmts: Vec<Node>) -> String {
        let mut em = Emitter::new("    ".to_string());
        emit_block(&mut em, &stmts, &Config::default());
        em.finish()
    }

    #[test]
    fn emits_break_and_continue() {
        let out = run(vec![Node::leaf(NodeKind::Break, ""), Node::leaf(NodeKind::Continue, "")]);
        assert_eq!(out, "break\ncontinue\n");
    }

    #[test]
    fn flattens_else_if_chain_to_elif() {
        let inner_if = Node::new(
            NodeKind::If,
            "",
            vec![
                Node::leaf(NodeKind::Identifier, "d"),
                Node::new(NodeKind::Block, "", vec![Node::leaf(NodeKind::Break, "")]),
            ],
        );
        let outer_if = Node::new(
            NodeKind::If,
            "",
            vec![
                Node::leaf(NodeKind::Identifier, "c"),
                Node::new(NodeKind::Block, "", vec![Node::leaf(NodeKind::Continue, "")]),
                inner_if,
            ],
        );
        let out = run(vec![outer_if]);
        assert_eq!(out, "if c:\n    continue\nelif d:\n    break\n");
    }

    #[test]
    fn builds_range_for_simple_increment_loop() {
        let init = Node::new(NodeKind::FieldDecl, "int i", vec![Node::leaf(NodeKind::Literal, "0")]);
        let cond = Node::new(
            NodeKind::BinaryOp,
            "<",
            vec![Node::leaf(NodeKind::Identifier, "i"), Node::leaf(NodeKind::Literal, "3")],
        );
        let update = Node::new(NodeKind::PostfixOp, "++", vec![Node::leaf(NodeKind::Identifier, "i")]);
        let body = Node::new(NodeKind::Block, "", vec![Node::leaf(NodeKind::Break, "")]);
        let for_node = Node::new(NodeKind::For, "", vec![init, cond, update, body]);
        let out = run(vec![for_node]);
        assert_eq!(out, "for i in range(0, 3):\n    break\n");
    }

    #[test]
    fn do_while_hoists_condition_inside_loop_body() {
        let body = Node::new(NodeKind::Block, "", vec![Node::leaf(NodeKind::Break, "")]);
        let cond = Node::leaf(NodeKind::Identifier, "done");
        let node = Node::new(NodeKind::DoWhile, "", vec![body, cond]);
        let out = run(vec![node]);
        assert_eq!(out, "while True:\n    break\n    if not (done):\n        break\n");
    }
}
