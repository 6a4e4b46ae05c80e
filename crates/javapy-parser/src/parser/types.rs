//! Type parsing (spec §4.1.2). Types are represented as plain normalized
//! strings (e.g. `List<String>[]`), not AST nodes -- the catalogue has no
//! `Type` node kind, so the translator's type mapper (§4.2.2) works off
//! the string form directly. Generic argument lists are joined without a
//! space (`Map<String,Integer>`) so a normalized type spelling never
//! contains whitespace; `FieldDecl`/`MethodDecl`/`Param` values pack
//! modifiers, type, and name as whitespace-separated text (§3.2), and a
//! space-free type keeps that packing unambiguous to split back apart.

use javapy_common::TokenKind;

use crate::error::ParseError;

use super::Parser;

/// A primitive or reference type name, optionally generic (`List<String>`)
/// and optionally array-suffixed (`int[]`, `String[][]`). Whitespace is
/// normalized away by rebuilding the string ourselves rather than slicing
/// source text, so `List < String >` and `List<String>` parse identically.
pub(super) fn parse_type(p: &mut Parser) -> Result<String, ParseError> {
    let base = if p.at_kind(TokenKind::Ident) || p.at_kind(TokenKind::Keyword) {
        p.bump().text
    } else {
        return Err(p.error("a type name"));
    };

    let mut name = base;
    if p.eat("<") {
        let mut args = vec![parse_type(p)?];
        while p.eat(",") {
            args.push(parse_type(p)?);
        }
        p.expect_close_angle()?;
        name = format!("{name}<{}>", args.join(","));
    }

    while p.at("[") {
        p.expect("[")?;
        p.expect("]")?;
        name.push_str("[]");
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use javapy_lexer::tokenize;

    use super::*;

    fn parse_one_type(src: &str) -> String {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty());
        let mut p = Parser::new(tokens);
        parse_type(&mut p).unwrap()
    }

    #[test]
    fn parses_plain_type() {
        assert_eq!(parse_one_type("int"), "int");
    }

    #[test]
    fn parses_array_type() {
        assert_eq!(parse_one_type("String[]"), "String[]");
    }

    #[test]
    fn parses_generic_type_normalizing_whitespace() {
        assert_eq!(parse_one_type("List < String >"), "List<String>");
        assert_eq!(parse_one_type("Map<String, Integer>"), "Map<String,Integer>");
    }

    /// The lexer tokenizes `>>`/`>>>` as single shift operators, so closing
    /// nested generic levels must split them rather than expecting a lone
    /// `>` at each level.
    #[test]
    fn parses_nested_generics_that_close_with_a_shift_token() {
        assert_eq!(parse_one_type("List<List<Integer>>"), "List<List<Integer>>");
        assert_eq!(
            parse_one_type("Map<String, List<Integer>>"),
            "Map<String,List<Integer>>"
        );
        assert_eq!(
            parse_one_type("Map<String, Map<String, Integer>>"),
            "Map<String,Map<String,Integer>>"
        );
    }

    #[test]
    fn parses_triple_nested_generic_closing_with_right_shift_unsigned_token() {
        assert_eq!(
            parse_one_type("List<List<List<Integer>>>"),
            "List<List<List<Integer>>>"
        );
    }
}
