//! Recursive-descent parser for the Java subset translated by javapy
//! (spec §4.1). Consumes a token stream from `javapy-lexer` (or any source
//! honoring the same kind/text contract) and produces a `javapy_ast::Node`
//! tree, or the first [`ParseError`] encountered -- parsing has no
//! recovery mode (spec §5).

pub mod error;
mod parser;

pub use error::ParseError;
pub use parser::parse;

#[cfg(test)]
mod tests {
    use javapy_ast::NodeKind;
    use javapy_lexer::tokenize;

    use super::*;

    fn parse_src(src: &str) -> javapy_ast::Node {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty(), "{errors:?}");
        parse(tokens).unwrap()
    }

    #[test]
    fn parses_multiple_top_level_classes() {
        let unit = parse_src("class A { } class B { }");
        assert_eq!(unit.kind, NodeKind::CompilationUnit);
        assert_eq!(unit.children.len(), 2);
        assert_eq!(unit.children[0].value, "A");
        assert_eq!(unit.children[1].value, "B");
    }

    #[test]
    fn reports_error_on_unclosed_class() {
        let (tokens, _) = tokenize("class A {");
        let err = parse(tokens).unwrap_err();
        assert!(err.message.contains("end of input") || err.message.contains("`}`"));
    }

    #[test]
    fn parses_a_small_realistic_class() {
        let unit = parse_src(
            r#"
            public class Counter {
                private int count;

                public Counter(int start) {
                    this.count = start;
                }

                public void increment() {
                    count = count + 1;
                }

                public int getCount() {
                    return count;
                }
            }
            "#,
        );
        let class = &unit.children[0];
        assert_eq!(class.value, "Counter");
        let kinds: Vec<_> = class.children.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::FieldDecl, NodeKind::ConstructorDecl, NodeKind::MethodDecl, NodeKind::MethodDecl]
        );
    }
}
