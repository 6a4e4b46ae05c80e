//! Class and member parsing (spec §4.1.2): class headers, fields, methods,
//! and constructors, including the constructor/method/field disambiguation
//! that runs after modifiers are consumed.

use javapy_ast::{Node, NodeKind};
use javapy_common::TokenKind;

use super::statements::{decl_value, finish_decl_list, parse_block};
use super::types::parse_type;
use super::Parser;
use crate::error::ParseError;

const CLASS_MODIFIERS: &[&str] = &["public", "private", "protected", "static", "final", "abstract"];

fn consume_modifiers(p: &mut Parser) -> Vec<String> {
    let mut modifiers = Vec::new();
    while CLASS_MODIFIERS.iter().any(|m| p.at(m)) {
        modifiers.push(p.bump().text);
    }
    modifiers
}

pub(super) fn parse_class_decl(p: &mut Parser) -> Result<Node, ParseError> {
    consume_modifiers(p); // class-level modifiers carry no meaning in the Python output
    p.expect("class")?;
    let name = p.expect_kind(TokenKind::Ident, "a class name")?.text;

    let mut children = Vec::new();
    if p.eat("extends") {
        let base = p.expect_kind(TokenKind::Ident, "a base class name")?.text;
        children.push(Node::leaf(NodeKind::Extends, base));
    }

    p.expect("{")?;
    while !p.at("}") && !p.at_eof() {
        children.extend(parse_member(p, &name)?);
    }
    p.expect("}")?;

    Ok(Node::new(NodeKind::ClassDecl, name, children))
}

/// Parses one member declaration, which may expand to several sibling
/// `FieldDecl`s for a multi-declarator field (`int a = 1, b = 2;`).
///
/// Disambiguation (§4.1.2): after modifiers, parse a type-or-identifier
/// sequence. If `(` follows immediately, that sequence *is* the member
/// name and this is a constructor (valid only when it matches the
/// enclosing class name -- Java has no other bare-name member form).
/// Otherwise the sequence was a return/field type, and the identifier that
/// follows is the member's name; `(` after that makes it a method, anything
/// else makes it a field.
fn parse_member(p: &mut Parser, class_name: &str) -> Result<Vec<Node>, ParseError> {
    let modifiers = consume_modifiers(p);
    let leading = parse_type(p)?;

    if p.at("(") {
        if leading != class_name {
            return Err(p.error(format!("a constructor named `{class_name}`")));
        }
        let params = parse_param_list(p)?;
        let body = parse_block(p)?;
        return Ok(vec![Node::new(NodeKind::ConstructorDecl, class_name, vec![params, body])]);
    }

    let name = p.expect_kind(TokenKind::Ident, "a member name")?.text;
    if p.at("(") {
        let params = parse_param_list(p)?;
        let body = parse_block(p)?;
        let value = decl_value(&modifiers, &leading, &name);
        return Ok(vec![Node::new(NodeKind::MethodDecl, value, vec![params, body])]);
    }

    let decls = finish_decl_list(p, &modifiers, &leading, name)?;
    p.expect(";")?;
    Ok(decls)
}

fn parse_param_list(p: &mut Parser) -> Result<Node, ParseError> {
    p.expect("(")?;
    let mut params = Vec::new();
    if !p.at(")") {
        params.push(parse_param(p)?);
        while p.eat(",") {
            params.push(parse_param(p)?);
        }
    }
    p.expect(")")?;
    Ok(Node::new(NodeKind::ParamList, "", params))
}

fn parse_param(p: &mut Parser) -> Result<Node, ParseError> {
    while p.at("final") {
        p.bump();
    }
    let ty = parse_type(p)?;
    let name = p.expect_kind(TokenKind::Ident, "a parameter name")?.text;
    Ok(Node::leaf(NodeKind::Param, format!("{ty} {name}")))
}

#[cfg(test)]
mod tests {
    use javapy_lexer::tokenize;

    use super::*;

    fn parse_one_class(src: &str) -> Node {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty(), "{errors:?}");
        let mut p = Parser::new(tokens);
        let class = parse_class_decl(&mut p).unwrap();
        assert!(p.at_eof());
        class
    }

    #[test]
    fn parses_class_with_extends() {
        let class = parse_one_class("class Dog extends Animal { }");
        assert_eq!(class.kind, NodeKind::ClassDecl);
        assert_eq!(class.value, "Dog");
        assert_eq!(class.children[0].kind, NodeKind::Extends);
        assert_eq!(class.children[0].value, "Animal");
    }

    #[test]
    fn disambiguates_constructor_from_method() {
        let class = parse_one_class(
            "public class Point { private int x; public Point(int x) { this.x = x; } public int getX() { return x; } }",
        );
        let kinds: Vec<_> = class.children.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::FieldDecl, NodeKind::ConstructorDecl, NodeKind::MethodDecl]
        );
    }

    #[test]
    fn flattens_multi_declarator_fields_into_class_children() {
        let class = parse_one_class("class K { int a = 1, b = 2; }");
        assert_eq!(class.children.len(), 2);
        assert!(class.children.iter().all(|n| n.kind == NodeKind::FieldDecl));
    }

    #[test]
    fn parses_method_params() {
        let class = parse_one_class("class C { void m(int a, String b) { } }");
        let method = &class.children[0];
        assert_eq!(method.kind, NodeKind::MethodDecl);
        let params = &method.children[0];
        assert_eq!(params.kind, NodeKind::ParamList);
        assert_eq!(params.children[0].value, "int a");
        assert_eq!(params.children[1].value, "String b");
    }
}
