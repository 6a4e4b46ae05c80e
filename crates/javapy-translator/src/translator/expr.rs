//! Expression rewrites (spec §4.2.5): operator rewrites, literal mapping,
//! and the handful of standard-library call shapes (`System.out.println`,
//! `List.of`) that get special-cased text instead of a literal transliteration.
//!
//! `i++`/`i--` used anywhere but a standalone statement has no direct Python
//! expression equivalent, so a nested increment is *hoisted*: `to_py_expr`
//! threads a `hoists` accumulator that collects `"name += 1"` statement text
//! as it walks, and returns the plain identifier in the expression's place.
//! Callers flush `hoists` as sibling lines immediately before the statement
//! that contains the expression (see `render_expr`/`emit_hoists`). Hoisting
//! out of a loop *condition* only runs the increment once, before the loop
//! starts, not on every iteration -- a known gap, undocumented upstream
//! because the scenario corpus never nests an increment inside a loop test.

use javapy_ast::{Node, NodeKind};

use super::emitter::Emitter;
use super::types::map_primitive_cast;

pub(super) fn expr_to_string(node: &Node) -> String {
    let mut hoists = Vec::new();
    to_py_expr(node, &mut hoists)
}

pub(super) fn render_expr(node: &Node) -> (Vec<String>, String) {
    let mut hoists = Vec::new();
    let text = to_py_expr(node, &mut hoists);
    (hoists, text)
}

pub(super) fn emit_hoists(em: &mut Emitter, hoists: Vec<String>) {
    for h in hoists {
        em.line(&h);
    }
}

pub(super) fn to_py_expr(node: &Node, hoists: &mut Vec<String>) -> String {
    match node.kind {
        NodeKind::Literal => literal_to_py(&node.value),
        NodeKind::Identifier => node.value.clone(),
        NodeKind::This => "self".to_string(),
        NodeKind::Super => "super()".to_string(),
        NodeKind::PrefixOp | NodeKind::PostfixOp if is_incr_decr(&node.value) => {
            let target = to_py_expr(&node.children[0], hoists);
            let sign = if node.value == "++" { "+" } else { "-" };
            hoists.push(format!("{target} {sign}= 1"));
            target
        }
        NodeKind::PrefixOp => {
            let operand = atom_or_paren(&node.children[0], hoists);
            match node.value.as_str() {
                "!" => format!("not {operand}"),
                op => format!("{op}{operand}"),
            }
        }
        NodeKind::PostfixOp => to_py_expr(&node.children[0], hoists),
        NodeKind::BinaryOp if node.value == "[]" => {
            let target = to_py_expr(&node.children[0], hoists);
            let index = to_py_expr(&node.children[1], hoists);
            format!("{target}[{index}]")
        }
        NodeKind::BinaryOp if node.value == "instanceof" => {
            let lhs = to_py_expr(&node.children[0], hoists);
            format!("isinstance({lhs}, {})", node.children[1].value)
        }
        NodeKind::BinaryOp if node.value == ">>>" => {
            let lhs = atom_or_paren(&node.children[0], hoists);
            let rhs = to_py_expr(&node.children[1], hoists);
            format!("(({lhs} & 0xFFFFFFFF) >> {rhs})")
        }
        NodeKind::BinaryOp => {
            let lhs = atom_or_paren(&node.children[0], hoists);
            let rhs = atom_or_paren(&node.children[1], hoists);
            format!("{lhs} {} {rhs}", map_binary_op(&node.value))
        }
        NodeKind::Ternary => {
            let cond = atom_or_paren(&node.children[0], hoists);
            let then_branch = atom_or_paren(&node.children[1], hoists);
            let else_branch = atom_or_paren(&node.children[2], hoists);
            format!("{then_branch} if {cond} else {else_branch}")
        }
        NodeKind::Cast => {
            let operand = to_py_expr(&node.children[0], hoists);
            match map_primitive_cast(&node.value) {
                Some(callable) => format!("{callable}({operand})"),
                None => operand,
            }
        }
        NodeKind::MemberAccess => {
            let target = to_py_expr(&node.children[0], hoists);
            format!("{target}.{}", node.value)
        }
        NodeKind::Call => call_to_py(node, hoists),
        NodeKind::NewArray => new_array_to_py(node, hoists),
        NodeKind::ArrayInit => {
            let elems = join_exprs(&node.children, hoists);
            format!("[{elems}]")
        }
        NodeKind::Assign => {
            let lhs = to_py_expr(&node.children[0], hoists);
            let rhs = to_py_expr(&node.children[1], hoists);
            render_assign(&node.value, &lhs, &rhs)
        }
        other => format!("# TODO: unknown expression {other:?}"),
    }
}

/// Wraps a sub-expression in parens when leaving it bare could change how
/// it groups relative to Python's own operator precedence, which doesn't
/// line up with Java's for several operators (`&`/`|`/`^` sit below
/// comparisons in Python but above them in Java). Plain literals,
/// identifiers, calls, and member accesses never need it.
fn atom_or_paren(node: &Node, hoists: &mut Vec<String>) -> String {
    let text = to_py_expr(node, hoists);
    match node.kind {
        NodeKind::BinaryOp if node.value != "[]" => format!("({text})"),
        NodeKind::Ternary => format!("({text})"),
        _ => text,
    }
}

fn is_incr_decr(op: &str) -> bool {
    op == "++" || op == "--"
}

fn map_binary_op(op: &str) -> &str {
    match op {
        "&&" => "and",
        "||" => "or",
        other => other,
    }
}

pub(super) fn render_assign(op: &str, lhs: &str, rhs: &str) -> String {
    if op == ">>>=" {
        format!("{lhs} = (({lhs} & 0xFFFFFFFF) >> {rhs})")
    } else {
        format!("{lhs} {op} {rhs}")
    }
}

fn join_exprs(nodes: &[Node], hoists: &mut Vec<String>) -> String {
    nodes
        .iter()
        .map(|n| to_py_expr(n, hoists))
        .collect::<Vec<_>>()
        .join(", ")
}

fn call_to_py(node: &Node, hoists: &mut Vec<String>) -> String {
    let callee = &node.children[0];
    let args = &node.children[1..];

    if let Some(which) = println_kind(callee) {
        let args_text = join_exprs(args, hoists);
        return match which {
            PrintKind::Println => format!("print({args_text})"),
            PrintKind::Print => format!("print({args_text}, end='')"),
        };
    }
    if is_list_literal_call(callee) {
        return format!("[{}]", join_exprs(args, hoists));
    }

    let callee_text = to_py_expr(callee, hoists);
    format!("{callee_text}({})", join_exprs(args, hoists))
}

enum PrintKind {
    Println,
    Print,
}

/// Recognizes `System.out.println(...)`/`System.out.print(...)` by shape:
/// `MemberAccess("println"|"print", MemberAccess("out", Identifier("System")))`.
fn println_kind(callee: &Node) -> Option<PrintKind> {
    if callee.kind != NodeKind::MemberAccess {
        return None;
    }
    let kind = match callee.value.as_str() {
        "println" => PrintKind::Println,
        "print" => PrintKind::Print,
        _ => return None,
    };
    let target = callee.children.first()?;
    if target.kind != NodeKind::MemberAccess || target.value != "out" {
        return None;
    }
    let system = target.children.first()?;
    if system.kind == NodeKind::Identifier && system.value == "System" {
        Some(kind)
    } else {
        None
    }
}

/// Recognizes `List.of(...)` and `Arrays.asList(...)`, both of which become
/// a plain Python list literal.
fn is_list_literal_call(callee: &Node) -> bool {
    if callee.kind != NodeKind::MemberAccess {
        return false;
    }
    let Some(target) = callee.children.first() else {
        return false;
    };
    if target.kind != NodeKind::Identifier {
        return false;
    }
    (callee.value == "of" && target.value == "List") || (callee.value == "asList" && target.value == "Arrays")
}

fn new_array_to_py(node: &Node, hoists: &mut Vec<String>) -> String {
    if let Some(element_ty) = node.value.strip_prefix("size:") {
        let size = to_py_expr(&node.children[0], hoists);
        let default = super::types::default_value_for(element_ty);
        format!("[{default}] * ({size})")
    } else {
        format!("[{}]", join_exprs(&node.children, hoists))
    }
}

fn literal_to_py(text: &str) -> String {
    match text {
        "null" => "None".to_string(),
        "true" => "True".to_string(),
        "false" => "False".to_string(),
        _ if text.starts_with('"') || text.starts_with('\'') => text.to_string(),
        _ => map_numeric_literal(text),
    }
}

/// Strips Java's trailing numeric-literal type suffix (`10L`, `3.14f`),
/// which Python has no equivalent for. Hex/binary literals are left alone
/// even though they may end in a letter that looks like a suffix (`0x1F`).
fn map_numeric_literal(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") || lower.starts_with("0b") {
        return text.to_string();
    }
    match text.chars().last() {
        Some(c) if matches!(c, 'l' | 'L' | 'f' | 'F' | 'd' | 'D') => text[..text.len() - 1].to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind, value: &str) -> Node {
        Node::leaf(kind, value)
    }

    #[test]
    fn maps_literals() {
        assert_eq!(literal_to_py("true"), "True");
        assert_eq!(literal_to_py("null"), "None");
        assert_eq!(literal_to_py("\"hi\""), "\"hi\"");
        assert_eq!(literal_to_py("10L"), "10");
        assert_eq!(literal_to_py("3.14f"), "3.14");
        assert_eq!(literal_to_py("0x1F"), "0x1F");
        assert_eq!(literal_to_py("0b101"), "0b101");
    }

    #[test]
    fn hoists_nested_postfix_increment() {
        let arg = Node::new(NodeKind::PostfixOp, "++", vec![leaf(NodeKind::Identifier, "i")]);
        let call = Node::new(
            NodeKind::Call,
            "",
            vec![leaf(NodeKind::Identifier, "use"), arg],
        );
        let mut hoists = Vec::new();
        let text = to_py_expr(&call, &mut hoists);
        assert_eq!(text, "use(i)");
        assert_eq!(hoists, vec!["i += 1".to_string()]);
    }

    #[test]
    fn rewrites_println_and_print() {
        let out = Node::new(NodeKind::MemberAccess, "out", vec![leaf(NodeKind::Identifier, "System")]);
        let println = Node::new(NodeKind::MemberAccess, "println", vec![out]);
        let call = Node::new(
            NodeKind::Call,
            "",
            vec![println, leaf(NodeKind::Literal, "42")],
        );
        assert_eq!(expr_to_string(&call), "print(42)");
    }

    #[test]
    fn parenthesizes_nested_binary_operands() {
        let inner = Node::new(
            NodeKind::BinaryOp,
            "*",
            vec![leaf(NodeKind::Literal, "2"), leaf(NodeKind::Literal, "3")],
        );
        let outer = Node::new(NodeKind::BinaryOp, "+", vec![leaf(NodeKind::Literal, "1"), inner]);
        assert_eq!(expr_to_string(&outer), "1 + (2 * 3)");
    }

    #[test]
    fn maps_unsigned_shift_to_masked_expression() {
        let e = Node::new(
            NodeKind::BinaryOp,
            ">>>",
            vec![leaf(NodeKind::Identifier, "x"), leaf(NodeKind::Literal, "2")],
        );
        assert_eq!(expr_to_string(&e), "((x & 0xFFFFFFFF) >> 2)");
    }

    #[test]
    fn maps_this_and_super_member_access() {
        let this_x = Node::new(NodeKind::MemberAccess, "x", vec![leaf(NodeKind::This, "")]);
        assert_eq!(expr_to_string(&this_x), "self.x");
        let super_foo = Node::new(NodeKind::MemberAccess, "foo", vec![leaf(NodeKind::Super, "")]);
        let call = Node::new(NodeKind::Call, "", vec![super_foo]);
        assert_eq!(expr_to_string(&call), "super().foo()");
    }
}
