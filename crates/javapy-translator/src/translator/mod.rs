//! The two-pass AST-to-Python translator (spec §4.2): one scan pass per
//! class to collect constructors and fields, then one emit pass that writes
//! the class header, static fields, synthesized `__init__`, and methods.

mod class;
mod ctor;
mod decl;
mod emitter;
mod exceptions;
mod expr;
mod scan;
mod stmt;
mod types;

use javapy_ast::Node;

use self::class::emit_class;
use self::emitter::Emitter;
use crate::Config;

/// Translates a `CompilationUnit` AST into a Python source string. Total
/// over any schema-conforming AST (spec §4.2.1) -- unrecognized node kinds
/// fall back to a `# TODO` comment line rather than a panic or an `Err`.
pub fn translate(unit: &Node, config: &Config) -> String {
    let mut em = Emitter::new(config.indent.clone());
    for (i, class) in unit.children.iter().enumerate() {
        if i > 0 {
            em.blank();
        }
        emit_class(&mut em, class, config);
    }
    em.finish()
}
