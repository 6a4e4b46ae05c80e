//! Class header and member emission (spec §4.2.1's emit pass).

use javapy_ast::Node;

use super::ctor::emit_init;
use super::decl::parse_decl_value;
use super::emitter::Emitter;
use super::expr::expr_to_string;
use super::scan::scan_class;
use super::stmt::emit_block;
use super::types::{default_value_for, map_type};
use crate::Config;

pub(crate) fn emit_class(em: &mut Emitter, class: &Node, config: &Config) {
    let info = scan_class(class);
    let header = match info.base {
        Some(base) => format!("class {}({base}):", info.name),
        None => format!("class {}:", info.name),
    };
    em.line(&header);
    em.indent();

    let mut wrote = false;
    if !info.static_fields.is_empty() {
        for field in &info.static_fields {
            emit_static_field(em, field, config);
        }
        wrote = true;
    }

    if !info.ctors.is_empty() || !info.instance_fields.is_empty() {
        if wrote {
            em.blank();
        }
        emit_init(em, &info, config);
        wrote = true;
    }

    for method in &info.methods {
        if wrote {
            em.blank();
        }
        emit_method(em, method, config);
        wrote = true;
    }

    if !wrote {
        em.line("pass");
    }
    em.dedent();
}

fn emit_static_field(em: &mut Emitter, field: &Node, config: &Config) {
    let (_, ty, name) = parse_decl_value(&field.value);
    let value = field.children.first().map(expr_to_string).unwrap_or_else(|| default_value_for(ty));
    let hint = if config.emit_type_hints {
        format!(": {}", map_type(ty))
    } else {
        String::new()
    };
    em.line(&format!("{name}{hint} = {value}"));
}

fn emit_method(em: &mut Emitter, method: &Node, config: &Config) {
    let (modifiers, ret_ty, name) = parse_decl_value(&method.value);
    let is_static = modifiers.iter().any(|m| *m == "static");
    if is_static {
        em.line("@staticmethod");
    }
    let params = &method.children[0];
    let body = &method.children[1];

    let mut parts = Vec::new();
    if !is_static {
        parts.push("self".to_string());
    }
    for param in &params.children {
        parts.push(format_param(param, config));
    }
    let ret = if config.emit_type_hints {
        format!(" -> {}", map_type(ret_ty))
    } else {
        String::new()
    };
    em.line(&format!("def {name}({}){ret}:", parts.join(", ")));
    em.indent();
    if body.children.is_empty() {
        em.line("pass");
    } else {
        emit_block(em, &body.children, config);
    }
    em.dedent();
}

fn format_param(param: &Node, config: &Config) -> String {
    let (_, ty, name) = parse_decl_value(&param.value);
    if config.emit_type_hints {
        format!("{name}: {}", map_type(ty))
    } else {
        name.to_string()
    }
}
