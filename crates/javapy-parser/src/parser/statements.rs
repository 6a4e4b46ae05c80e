//! Statement parsing (spec §4.1.2 statement grammar, §4.1.4 disambiguation).

use javapy_ast::{Node, NodeKind};
use javapy_common::TokenKind;

use crate::error::ParseError;

use super::expressions::{parse_assignment, parse_expr};
use super::types::parse_type;
use super::Parser;

pub(super) fn parse_block(p: &mut Parser) -> Result<Node, ParseError> {
    p.expect("{")?;
    let mut stmts = Vec::new();
    while !p.at("}") && !p.at_eof() {
        stmts.extend(parse_statement(p)?);
    }
    p.expect("}")?;
    Ok(Node::new(NodeKind::Block, "", stmts))
}

/// A single brace-less statement body (`if (c) stmt;`) is wrapped in a
/// `Block` of one so the translator always sees a uniform body shape.
fn parse_body(p: &mut Parser) -> Result<Node, ParseError> {
    if p.at("{") {
        return parse_block(p);
    }
    let stmts = parse_statement(p)?;
    Ok(Node::new(NodeKind::Block, "", stmts))
}

/// Parses one source statement, which may expand to zero (empty `;`) or
/// several (`int a = 1, b = 2;`) AST statement nodes -- see
/// `finish_local_decls` for the multi-declarator splice.
pub(super) fn parse_statement(p: &mut Parser) -> Result<Vec<Node>, ParseError> {
    if p.eat(";") {
        return Ok(Vec::new());
    }
    if p.at("{") {
        return Ok(vec![parse_block(p)?]);
    }
    if p.at("if") {
        return Ok(vec![parse_if(p)?]);
    }
    if p.at("while") {
        return Ok(vec![parse_while(p)?]);
    }
    if p.at("do") {
        return Ok(vec![parse_do_while(p)?]);
    }
    if p.at("for") {
        return Ok(vec![parse_for(p)?]);
    }
    if p.at("switch") {
        return Ok(vec![parse_switch(p)?]);
    }
    if p.at("try") {
        return Ok(vec![parse_try(p)?]);
    }
    if p.at("return") {
        return Ok(vec![parse_return(p)?]);
    }
    if p.at("break") {
        p.bump();
        p.expect(";")?;
        return Ok(vec![Node::leaf(NodeKind::Break, "")]);
    }
    if p.at("continue") {
        p.bump();
        p.expect(";")?;
        return Ok(vec![Node::leaf(NodeKind::Continue, "")]);
    }

    if let Some(decls) = try_parse_local_decl(p)? {
        return Ok(decls);
    }
    Ok(vec![parse_expr_statement(p)?])
}

fn parse_if(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "if"
    p.expect("(")?;
    let cond = parse_expr(p)?;
    p.expect(")")?;
    let then_branch = parse_body(p)?;
    let mut children = vec![cond, then_branch];
    if p.eat("else") {
        if p.at("if") {
            children.push(parse_if(p)?);
        } else {
            children.push(parse_body(p)?);
        }
    }
    Ok(Node::new(NodeKind::If, "", children))
}

fn parse_while(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "while"
    p.expect("(")?;
    let cond = parse_expr(p)?;
    p.expect(")")?;
    let body = parse_body(p)?;
    Ok(Node::new(NodeKind::While, "", vec![cond, body]))
}

fn parse_do_while(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "do"
    let body = parse_body(p)?;
    p.expect("while")?;
    p.expect("(")?;
    let cond = parse_expr(p)?;
    p.expect(")")?;
    p.expect(";")?;
    Ok(Node::new(NodeKind::DoWhile, "", vec![body, cond]))
}

/// Marker used for an omitted C-style `for` clause (no init, no condition,
/// or no update). It is an empty `Block` node, distinguishable from a real
/// nested block by its reserved `"empty"` value -- see DESIGN.md.
fn empty_clause() -> Node {
    Node::new(NodeKind::Block, "empty", Vec::new())
}

/// Dispatches between C-style `for (init; cond; update)` and `for (Type x :
/// iterable)`, using a speculative parse to tell them apart (both start
/// with `for (Type ident`).
fn parse_for(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "for"
    p.expect("(")?;

    let mark = p.mark();
    if let Some(node) = try_parse_for_each(p)? {
        return Ok(node);
    }
    p.restore(mark);

    let init = if p.at(";") {
        empty_clause()
    } else if let Some(mut decls) = try_parse_local_decl_no_semi(p)? {
        p.expect(";")?;
        if decls.len() == 1 {
            decls.pop().unwrap()
        } else {
            Node::new(NodeKind::Block, "", decls)
        }
    } else {
        let e = parse_assignment(p)?;
        p.expect(";")?;
        e
    };

    let cond = if p.at(";") {
        empty_clause()
    } else {
        parse_expr(p)?
    };
    p.expect(";")?;

    let update = if p.at(")") {
        empty_clause()
    } else {
        parse_assignment(p)?
    };
    p.expect(")")?;

    let body = parse_body(p)?;
    Ok(Node::new(NodeKind::For, "", vec![init, cond, update, body]))
}

fn try_parse_for_each(p: &mut Parser) -> Result<Option<Node>, ParseError> {
    let Ok(ty) = parse_type(p) else {
        return Ok(None);
    };
    if !p.at_kind(TokenKind::Ident) {
        return Ok(None);
    }
    let name = p.bump().text;
    if !p.eat(":") {
        return Ok(None);
    }
    let iterable = parse_expr(p)?;
    p.expect(")")?;
    let body = parse_body(p)?;
    Ok(Some(Node::new(
        NodeKind::ForEach,
        "",
        vec![Node::leaf(NodeKind::Param, format!("{ty} {name}")), iterable, body],
    )))
}

fn parse_switch(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "switch"
    p.expect("(")?;
    let scrutinee = parse_expr(p)?;
    p.expect(")")?;
    p.expect("{")?;

    let mut children = vec![scrutinee];
    while !p.at("}") && !p.at_eof() {
        if p.eat("case") {
            let label = parse_expr(p)?;
            p.expect(":")?;
            let body = parse_case_body(p)?;
            let mut case_children = vec![label];
            case_children.extend(body);
            children.push(Node::new(NodeKind::CaseLabel, "", case_children));
        } else if p.eat("default") {
            p.expect(":")?;
            let body = parse_case_body(p)?;
            children.push(Node::new(NodeKind::DefaultLabel, "", body));
        } else {
            return Err(p.error("`case` or `default`"));
        }
    }
    p.expect("}")?;
    Ok(Node::new(NodeKind::Switch, "", children))
}

/// Statements belonging to one `case`/`default` arm, up to (but not
/// including) the next label, `}`, or a trailing `break;` which is
/// consumed and dropped -- Python `match` arms don't fall through, so
/// `break` is purely a terminator here, never emitted (§9 design note:
/// fall-through past a case without `break` is silently dropped too).
fn parse_case_body(p: &mut Parser) -> Result<Vec<Node>, ParseError> {
    let mut stmts = Vec::new();
    while !p.at("case") && !p.at("default") && !p.at("}") && !p.at_eof() {
        if p.at("break") {
            p.bump();
            p.expect(";")?;
            break;
        }
        stmts.extend(parse_statement(p)?);
    }
    Ok(stmts)
}

fn parse_try(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "try"
    let try_block = parse_block(p)?;
    let mut children = vec![Node::new(NodeKind::TryBlock, "", vec![try_block])];

    while p.eat("catch") {
        p.expect("(")?;
        let ty = parse_type(p)?;
        let name = p.expect_kind(TokenKind::Ident, "a catch variable name")?.text;
        p.expect(")")?;
        let body = parse_block(p)?;
        let param = Node::leaf(NodeKind::Param, format!("{ty} {name}"));
        children.push(Node::new(NodeKind::Catch, "", vec![param, body]));
    }
    if p.eat("finally") {
        let body = parse_block(p)?;
        children.push(Node::new(NodeKind::Finally, "", vec![body]));
    }
    if children.len() == 1 {
        return Err(p.error("`catch` or `finally`"));
    }
    Ok(Node::new(NodeKind::Try, "", children))
}

fn parse_return(p: &mut Parser) -> Result<Node, ParseError> {
    p.bump(); // "return"
    if p.eat(";") {
        return Ok(Node::leaf(NodeKind::Return, ""));
    }
    let e = parse_expr(p)?;
    p.expect(";")?;
    Ok(Node::new(NodeKind::Return, "", vec![e]))
}

fn parse_expr_statement(p: &mut Parser) -> Result<Node, ParseError> {
    let e = parse_assignment(p)?;
    p.expect(";")?;
    match e.kind {
        NodeKind::Assign => Ok(e),
        _ => Ok(Node::new(NodeKind::ExprStmt, "", vec![e])),
    }
}

/// Speculatively parse `[final] Type name (= init)? (, name (= init)?)* ;`.
/// Returns `None` (cursor restored) if the lookahead doesn't confirm a
/// declaration, per the disambiguation rule in §4.1.4: parse a type then an
/// identifier, and only commit once `=`, `,`, or `;` follows.
fn try_parse_local_decl(p: &mut Parser) -> Result<Option<Vec<Node>>, ParseError> {
    let mark = p.mark();
    match try_parse_local_decl_no_semi(p)? {
        Some(decls) => {
            if p.expect(";").is_err() {
                p.restore(mark);
                return Ok(None);
            }
            Ok(Some(decls))
        }
        None => {
            p.restore(mark);
            Ok(None)
        }
    }
}

/// Like [`try_parse_local_decl`] but does not consume the trailing `;` --
/// used by the C-style `for` init clause, which is itself `;`-terminated
/// by the surrounding loop header rather than by the declaration.
fn try_parse_local_decl_no_semi(p: &mut Parser) -> Result<Option<Vec<Node>>, ParseError> {
    let mark = p.mark();
    let mut modifiers = Vec::new();
    while p.at("final") {
        modifiers.push(p.bump().text);
    }

    let Ok(ty) = parse_type(p) else {
        p.restore(mark);
        return Ok(None);
    };
    if !p.at_kind(TokenKind::Ident) {
        p.restore(mark);
        return Ok(None);
    }
    let name = p.bump().text;
    if !(p.at("=") || p.at(",") || p.at(";")) {
        p.restore(mark);
        return Ok(None);
    }

    Ok(Some(finish_decl_list(p, &modifiers, &ty, name)?))
}

/// Consumes `name (= init)? (, name (= init)?)*` given the type/modifiers
/// already parsed, producing one `FieldDecl` per declarator. Does not
/// consume a trailing `;` -- callers that need one (class members, local
/// declarations) call [`Parser::expect`] themselves afterward.
pub(super) fn finish_decl_list(
    p: &mut Parser,
    modifiers: &[String],
    ty: &str,
    first_name: String,
) -> Result<Vec<Node>, ParseError> {
    let mut decls = Vec::new();
    let mut name = first_name;
    loop {
        let init = if p.eat("=") { Some(parse_assignment(p)?) } else { None };
        let value = decl_value(modifiers, ty, &name);
        let children = init.into_iter().collect();
        decls.push(Node::new(NodeKind::FieldDecl, value, children));
        if p.eat(",") {
            name = p.expect_kind(TokenKind::Ident, "a declarator name")?.text;
            continue;
        }
        break;
    }
    Ok(decls)
}

pub(super) fn decl_value(modifiers: &[String], ty: &str, name: &str) -> String {
    if modifiers.is_empty() {
        format!("{ty} {name}")
    } else {
        format!("{} {ty} {name}", modifiers.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use javapy_lexer::tokenize;

    use super::*;

    fn parse_block_src(src: &str) -> Node {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty(), "{errors:?}");
        let mut p = Parser::new(tokens);
        let block = parse_block(&mut p).unwrap();
        assert!(p.at_eof());
        block
    }

    #[test]
    fn local_decl_disambiguates_from_assignment() {
        let block = parse_block_src("{ int x = 1; x = 2; }");
        assert_eq!(block.children.len(), 2);
        assert_eq!(block.children[0].kind, NodeKind::FieldDecl);
        assert_eq!(block.children[1].kind, NodeKind::Assign);
    }

    #[test]
    fn multi_declarator_splices_siblings() {
        let block = parse_block_src("{ int a = 1, b = 2; }");
        assert_eq!(block.children.len(), 2);
        assert!(block.children.iter().all(|n| n.kind == NodeKind::FieldDecl));
        assert_eq!(block.children[0].value, "int a");
        assert_eq!(block.children[1].value, "int b");
    }

    #[test]
    fn parses_if_else_chain() {
        let block = parse_block_src("{ if (a) { x(); } else if (b) { y(); } else { z(); } }");
        let if_node = &block.children[0];
        assert_eq!(if_node.kind, NodeKind::If);
        assert_eq!(if_node.children.len(), 3);
        assert_eq!(if_node.children[2].kind, NodeKind::If);
    }

    #[test]
    fn parses_do_while() {
        let block = parse_block_src("{ do { x(); } while (cond); }");
        assert_eq!(block.children[0].kind, NodeKind::DoWhile);
    }

    #[test]
    fn parses_c_style_for_with_empty_clauses() {
        let block = parse_block_src("{ for (;;) { x(); } }");
        let for_node = &block.children[0];
        assert_eq!(for_node.kind, NodeKind::For);
        assert_eq!(for_node.children[0].value, "empty");
        assert_eq!(for_node.children[1].value, "empty");
        assert_eq!(for_node.children[2].value, "empty");
    }

    #[test]
    fn parses_for_each() {
        let block = parse_block_src("{ for (int x : xs) { use(x); } }");
        assert_eq!(block.children[0].kind, NodeKind::ForEach);
        assert_eq!(block.children[0].children[0].value, "int x");
    }

    #[test]
    fn parses_switch_with_fallthrough_and_default() {
        let block = parse_block_src(
            "{ switch (n) { case 1: a(); case 2: b(); break; default: c(); } }",
        );
        let sw = &block.children[0];
        assert_eq!(sw.kind, NodeKind::Switch);
        assert_eq!(sw.children.len(), 4); // scrutinee + 2 cases + default
        assert_eq!(sw.children[1].kind, NodeKind::CaseLabel);
        assert_eq!(sw.children[3].kind, NodeKind::DefaultLabel);
    }

    #[test]
    fn parses_try_catch_finally() {
        let block = parse_block_src(
            "{ try { risky(); } catch (Exception e) { handle(); } finally { cleanup(); } }",
        );
        let t = &block.children[0];
        assert_eq!(t.kind, NodeKind::Try);
        assert_eq!(t.children.len(), 3);
        assert_eq!(t.children[1].kind, NodeKind::Catch);
        assert_eq!(t.children[2].kind, NodeKind::Finally);
    }
}
