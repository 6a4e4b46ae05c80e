//! Shared parsing for the `"<modifiers> <type> <name>"` value convention
//! that `FieldDecl`, `MethodDecl`, and `Param` all pack into a single string
//! (javapy-ast catalogue, §3.2). Type spellings never contain whitespace
//! (javapy-parser normalizes them), so splitting on whitespace and taking
//! the last two tokens as name/type is unambiguous regardless of how many
//! modifiers precede them.

/// Splits a packed declaration value into `(modifiers, type, name)`.
pub(super) fn parse_decl_value(value: &str) -> (Vec<&str>, &str, &str) {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let name = tokens.last().copied().unwrap_or("");
    let ty = if tokens.len() >= 2 {
        tokens[tokens.len() - 2]
    } else {
        "Any"
    };
    let modifiers = if tokens.len() > 2 {
        tokens[..tokens.len() - 2].to_vec()
    } else {
        Vec::new()
    };
    (modifiers, ty, name)
}
