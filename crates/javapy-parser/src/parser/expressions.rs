//! Expression parsing (spec §4.1.3): a chain of precedence levels from
//! assignment (lowest) to postfix (highest), matching the teacher's
//! `snow-parser` layout of one function per binding-power tier rather than
//! a single generic binding-power loop -- the precedence table here has
//! few enough levels that writing them out reads more clearly than a table
//! of (op, lbp, rbp) triples would.

use javapy_ast::{Node, NodeKind};
use javapy_common::TokenKind;

use crate::error::ParseError;

use super::types::parse_type;
use super::Parser;

const ASSIGN_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
];

/// Entry point used wherever the grammar wants a full expression (the
/// assignment level -- spec §4.1.3 puts assignment at the bottom of the
/// precedence table).
pub(super) fn parse_expr(p: &mut Parser) -> Result<Node, ParseError> {
    parse_assignment(p)
}

pub(super) fn parse_assignment(p: &mut Parser) -> Result<Node, ParseError> {
    let lhs = parse_ternary(p)?;
    if let Some(op) = ASSIGN_OPS.iter().find(|op| p.at(op)) {
        let op = (*op).to_string();
        p.bump();
        let rhs = parse_assignment(p)?; // right-associative
        return Ok(Node::new(NodeKind::Assign, op, vec![lhs, rhs]));
    }
    Ok(lhs)
}

fn parse_ternary(p: &mut Parser) -> Result<Node, ParseError> {
    let cond = parse_logical_or(p)?;
    if p.eat("?") {
        let then_branch = parse_assignment(p)?;
        p.expect(":")?;
        let else_branch = parse_ternary(p)?; // right-associative chain
        return Ok(Node::new(NodeKind::Ternary, "", vec![cond, then_branch, else_branch]));
    }
    Ok(cond)
}

macro_rules! left_assoc_level {
    ($name:ident, $next:ident, [$($op:literal),+ $(,)?]) => {
        fn $name(p: &mut Parser) -> Result<Node, ParseError> {
            let mut left = $next(p)?;
            loop {
                let Some(op) = [$($op),+].iter().find(|op| p.at(op)) else { break };
                let op = (*op).to_string();
                p.bump();
                let right = $next(p)?;
                left = Node::new(NodeKind::BinaryOp, op, vec![left, right]);
            }
            Ok(left)
        }
    };
}

left_assoc_level!(parse_logical_or, parse_logical_and, ["||"]);
left_assoc_level!(parse_logical_and, parse_bit_or, ["&&"]);
left_assoc_level!(parse_bit_or, parse_bit_xor, ["|"]);
left_assoc_level!(parse_bit_xor, parse_bit_and, ["^"]);
left_assoc_level!(parse_bit_and, parse_equality, ["&"]);
left_assoc_level!(parse_equality, parse_relational, ["==", "!="]);
left_assoc_level!(parse_shift, parse_additive, ["<<", ">>>", ">>"]);
left_assoc_level!(parse_additive, parse_multiplicative, ["+", "-"]);
left_assoc_level!(parse_multiplicative, parse_unary, ["*", "/", "%"]);

/// Relational is hand-written rather than going through the macro because
/// `instanceof` is a keyword operator, not a symbol, and sits at this level.
fn parse_relational(p: &mut Parser) -> Result<Node, ParseError> {
    let mut left = parse_shift(p)?;
    loop {
        if p.at("instanceof") {
            p.bump();
            let ty = parse_type(p)?;
            left = Node::new(NodeKind::BinaryOp, "instanceof", vec![left, Node::leaf(NodeKind::Identifier, ty)]);
            continue;
        }
        let Some(op) = ["<=", ">=", "<", ">"].iter().find(|op| p.at(op)) else { break };
        let op = (*op).to_string();
        p.bump();
        let right = parse_shift(p)?;
        left = Node::new(NodeKind::BinaryOp, op, vec![left, right]);
    }
    Ok(left)
}

const PREFIX_OPS: &[&str] = &["++", "--", "+", "-", "!", "~"];

fn parse_unary(p: &mut Parser) -> Result<Node, ParseError> {
    if let Some(op) = PREFIX_OPS.iter().find(|op| p.at(op)) {
        let op = (*op).to_string();
        p.bump();
        let operand = parse_unary(p)?;
        return Ok(Node::new(NodeKind::PrefixOp, op, vec![operand]));
    }
    if p.at("(") {
        if let Some(cast) = try_parse_cast(p)? {
            return Ok(cast);
        }
    }
    parse_postfix(p)
}

const PRIMITIVE_TYPES: &[&str] = &["int", "long", "short", "byte", "float", "double", "boolean", "char"];

/// Tentatively parse `(Type) operand`. Java's grammar makes a parenthesized
/// cast ambiguous with a parenthesized expression at this lookahead depth,
/// so this speculatively parses a type inside the parens and only commits
/// if what follows `)` can start an operand; otherwise the cursor is
/// restored and `parse_postfix` handles the `(` as plain grouping.
fn try_parse_cast(p: &mut Parser) -> Result<Option<Node>, ParseError> {
    let mark = p.mark();
    p.bump(); // "("
    let ty = match parse_type(p) {
        Ok(ty) => ty,
        Err(_) => {
            p.restore(mark);
            return Ok(None);
        }
    };
    if !p.at(")") {
        p.restore(mark);
        return Ok(None);
    }
    p.bump(); // ")"
    // Per the JLS, a reference-type cast may not be followed by a unary `+`
    // or `-` (that's a binary operator on the parenthesized expression
    // instead); only a primitive-type cast can, since a primitive type name
    // can never itself be the start of a binary expression's LHS.
    if !starts_unary_operand(p, PRIMITIVE_TYPES.contains(&ty.as_str())) {
        p.restore(mark);
        return Ok(None);
    }
    let operand = parse_unary(p)?;
    Ok(Some(Node::new(NodeKind::Cast, ty, vec![operand])))
}

fn starts_unary_operand(p: &Parser, allow_plus_minus: bool) -> bool {
    if !allow_plus_minus && (p.at("+") || p.at("-")) {
        return false;
    }
    if PREFIX_OPS.iter().any(|op| p.at(op)) {
        return true;
    }
    matches!(
        p.current().kind,
        TokenKind::Ident | TokenKind::Number | TokenKind::String | TokenKind::Char
    ) || p.at("(")
        || p.at("this")
        || p.at("super")
        || p.at("new")
        || p.at("true")
        || p.at("false")
        || p.at("null")
}

fn parse_postfix(p: &mut Parser) -> Result<Node, ParseError> {
    let mut expr = parse_primary(p)?;
    loop {
        if p.at("++") || p.at("--") {
            let op = p.bump().text;
            expr = Node::new(NodeKind::PostfixOp, op, vec![expr]);
            continue;
        }
        if p.eat(".") {
            let name = p.expect_kind(TokenKind::Ident, "a member name")?.text;
            expr = Node::new(NodeKind::MemberAccess, name, vec![expr]);
            continue;
        }
        if p.at("(") {
            let args = parse_args(p)?;
            let mut children = vec![expr];
            children.extend(args);
            expr = Node::new(NodeKind::Call, "", children);
            continue;
        }
        if p.eat("[") {
            let index = parse_expr(p)?;
            p.expect("]")?;
            // The catalogue has no dedicated subscript kind; array indexing
            // reuses `BinaryOp` with a synthetic "[]" operator (see DESIGN.md).
            expr = Node::new(NodeKind::BinaryOp, "[]", vec![expr, index]);
            continue;
        }
        break;
    }
    Ok(expr)
}

fn parse_args(p: &mut Parser) -> Result<Vec<Node>, ParseError> {
    p.expect("(")?;
    let mut args = Vec::new();
    if !p.at(")") {
        args.push(parse_assignment(p)?);
        while p.eat(",") {
            args.push(parse_assignment(p)?);
        }
    }
    p.expect(")")?;
    Ok(args)
}

fn parse_primary(p: &mut Parser) -> Result<Node, ParseError> {
    let tok = p.current().clone();
    match tok.kind {
        TokenKind::Number | TokenKind::String | TokenKind::Char => {
            p.bump();
            Ok(Node::leaf(NodeKind::Literal, tok.text))
        }
        TokenKind::Ident => {
            p.bump();
            Ok(Node::leaf(NodeKind::Identifier, tok.text))
        }
        _ if p.at("true") || p.at("false") || p.at("null") => {
            p.bump();
            Ok(Node::leaf(NodeKind::Literal, tok.text))
        }
        _ if p.at("this") => {
            p.bump();
            Ok(Node::leaf(NodeKind::This, ""))
        }
        _ if p.at("super") => {
            p.bump();
            Ok(Node::leaf(NodeKind::Super, ""))
        }
        _ if p.at("new") => parse_new(p),
        _ if p.at("{") => parse_array_init(p),
        _ if p.at("(") => {
            p.bump();
            let inner = parse_expr(p)?;
            p.expect(")")?;
            Ok(inner) // no grouping wrapper node -- precedence is already baked into the tree shape
        }
        _ => Err(p.error("an expression")),
    }
}

/// `new Type(args)` (object construction), `new Type[size]`, or
/// `new Type[]{ elems }` (array construction, §4.1.2 / §4.2.5).
///
/// The catalogue gives `NewArray` a single `value` slot for the element
/// type, but the two array forms need to stay distinguishable downstream
/// (`new int[5]` repeats a default value; `new int[]{1,2}` lists elements
/// verbatim). The size form tags its value with a `"size:"` prefix; see
/// DESIGN.md.
fn parse_new(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "new"
    let ty = parse_type(p)?;
    if p.at("(") {
        let args = parse_args(p)?;
        let mut children = vec![Node::leaf(NodeKind::Identifier, ty)];
        children.extend(args);
        return Ok(Node::new(NodeKind::Call, "", children));
    }
    if p.eat("[") {
        if p.eat("]") {
            p.expect("{")?;
            let elements = parse_init_elements(p)?;
            p.expect("}")?;
            return Ok(Node::new(NodeKind::NewArray, ty, elements));
        }
        let size = parse_expr(p)?;
        p.expect("]")?;
        return Ok(Node::new(NodeKind::NewArray, format!("size:{ty}"), vec![size]));
    }
    Err(p.error("`(` or `[` after a `new` type"))
}

fn parse_array_init(p: &mut Parser) -> Result<Node, ParseError> {
    p.expect("{")?;
    let elements = parse_init_elements(p)?;
    p.expect("}")?;
    Ok(Node::new(NodeKind::ArrayInit, "", elements))
}

fn parse_init_elements(p: &mut Parser) -> Result<Vec<Node>, ParseError> {
    let mut elements = Vec::new();
    if !p.at("}") {
        elements.push(parse_assignment(p)?);
        while p.eat(",") {
            if p.at("}") {
                break; // trailing comma
            }
            elements.push(parse_assignment(p)?);
        }
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use javapy_lexer::tokenize;

    use super::*;

    fn parse_one(src: &str) -> Node {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty(), "{errors:?}");
        let mut p = Parser::new(tokens);
        let e = parse_expr(&mut p).unwrap();
        assert!(p.at_eof(), "leftover tokens after parsing {src:?}: {:?}", p.current());
        e
    }

    #[test]
    fn respects_additive_over_multiplicative_precedence() {
        let e = parse_one("1 + 2 * 3");
        assert_eq!(e.kind, NodeKind::BinaryOp);
        assert_eq!(e.value, "+");
        assert_eq!(e.children[1].value, "*");
    }

    #[test]
    fn ternary_is_right_associative() {
        let e = parse_one("a ? b : c ? d : e");
        assert_eq!(e.kind, NodeKind::Ternary);
        assert_eq!(e.children[2].kind, NodeKind::Ternary);
    }

    #[test]
    fn assignment_is_right_associative() {
        let e = parse_one("a = b = 1");
        assert_eq!(e.kind, NodeKind::Assign);
        assert_eq!(e.children[1].kind, NodeKind::Assign);
    }

    #[test]
    fn parses_method_call_chain() {
        let e = parse_one("System.out.println(42)");
        assert_eq!(e.kind, NodeKind::Call);
        assert_eq!(e.children[0].kind, NodeKind::MemberAccess);
        assert_eq!(e.children[0].value, "println");
    }

    #[test]
    fn parses_array_index_as_binary_op() {
        let e = parse_one("arr[i]");
        assert_eq!(e.kind, NodeKind::BinaryOp);
        assert_eq!(e.value, "[]");
    }

    #[test]
    fn parses_cast_not_confused_with_grouping() {
        let e = parse_one("(int) x");
        assert_eq!(e.kind, NodeKind::Cast);
        assert_eq!(e.value, "int");
    }

    #[test]
    fn parenthesized_expression_is_not_a_cast() {
        let e = parse_one("(a + b) * c");
        assert_eq!(e.kind, NodeKind::BinaryOp);
        assert_eq!(e.value, "*");
    }

    /// A reference-type parenthesized expression followed by `-`/`+` is a
    /// binary operator, not a cast -- `(a) - b` is `a - b`, not `Cast(a,
    /// PrefixOp(-, b))`. Only a primitive-type cast may be followed by a
    /// unary `+`/`-` (JLS cast-expression grammar).
    #[test]
    fn reference_type_parens_followed_by_minus_is_subtraction_not_a_cast() {
        let e = parse_one("(a) - b");
        assert_eq!(e.kind, NodeKind::BinaryOp);
        assert_eq!(e.value, "-");
        assert_eq!(e.children[0].kind, NodeKind::Identifier);
        assert_eq!(e.children[0].value, "a");
    }

    #[test]
    fn reference_type_parens_followed_by_plus_is_addition_not_a_cast() {
        let e = parse_one("(a) + b");
        assert_eq!(e.kind, NodeKind::BinaryOp);
        assert_eq!(e.value, "+");
    }

    #[test]
    fn primitive_cast_may_be_followed_by_unary_minus() {
        let e = parse_one("(int) -x");
        assert_eq!(e.kind, NodeKind::Cast);
        assert_eq!(e.value, "int");
        assert_eq!(e.children[0].kind, NodeKind::PrefixOp);
        assert_eq!(e.children[0].value, "-");
    }

    #[test]
    fn parses_new_object() {
        let e = parse_one("new Foo(1, 2)");
        assert_eq!(e.kind, NodeKind::Call);
        assert_eq!(e.children.len(), 3);
    }

    #[test]
    fn parses_new_array_with_size() {
        let e = parse_one("new int[10]");
        assert_eq!(e.kind, NodeKind::NewArray);
        assert_eq!(e.value, "size:int");
    }

    #[test]
    fn parses_new_array_with_initializer() {
        let e = parse_one("new int[]{1, 2, 3}");
        assert_eq!(e.kind, NodeKind::NewArray);
        assert_eq!(e.children.len(), 3);
    }
}
