//! Java-to-Python type mapping (spec §4.2.2), applied recursively to
//! generic arguments and array element types.

/// Maps a normalized Java type spelling (no internal whitespace; see
/// `javapy-parser`'s type parser) to its Python annotation text.
pub(super) fn map_type(ty: &str) -> String {
    if let Some(element) = ty.strip_suffix("[]") {
        return format!("list[{}]", map_type(element));
    }
    match generic_parts(ty) {
        Some((name, args)) => map_generic(name, &args),
        None => map_scalar(ty).unwrap_or_else(|| "Any".to_string()),
    }
}

/// The type-appropriate default value (spec §4.2.2's "Default value"
/// column), used both for injected constructor fields and for parameters
/// that gain a default under overload collapsing (§4.2.3).
pub(super) fn default_value_for(ty: &str) -> String {
    if ty.ends_with("[]") {
        return "[]".to_string();
    }
    if let Some((name, _)) = generic_parts(ty) {
        return match name {
            "List" | "ArrayList" => "[]".to_string(),
            "Map" | "HashMap" => "{}".to_string(),
            "Set" => "set()".to_string(),
            "Optional" => "None".to_string(),
            _ => "None".to_string(),
        };
    }
    match ty {
        "int" | "long" | "short" | "byte" => "0".to_string(),
        "float" | "double" => "0.0".to_string(),
        "boolean" => "False".to_string(),
        "char" | "String" => "\"\"".to_string(),
        "void" => "None".to_string(),
        "List" | "ArrayList" => "[]".to_string(),
        "Map" | "HashMap" => "{}".to_string(),
        "Set" => "set()".to_string(),
        _ => "None".to_string(),
    }
}

/// A Python builtin cast callable for primitive-typed casts (`(int) x`
/// becomes `int(x)`); `None` for a cast to a class type, which is a no-op
/// in Python and passes its operand through unchanged.
pub(super) fn map_primitive_cast(ty: &str) -> Option<&'static str> {
    match ty {
        "int" | "long" | "short" | "byte" => Some("int"),
        "float" | "double" => Some("float"),
        "boolean" => Some("bool"),
        "char" | "String" => Some("str"),
        _ => None,
    }
}

fn map_scalar(ty: &str) -> Option<String> {
    let mapped = match ty {
        "int" | "long" | "short" | "byte" => "int",
        "float" | "double" => "float",
        "boolean" => "bool",
        "char" | "String" => "str",
        "void" => "None",
        "List" | "ArrayList" => "list[Any]",
        _ => return None,
    };
    Some(mapped.to_string())
}

fn map_generic(name: &str, args: &[&str]) -> String {
    match (name, args) {
        ("List" | "ArrayList", [t]) => format!("list[{}]", map_type(t)),
        ("Map" | "HashMap", [k, v]) => format!("dict[{}, {}]", map_type(k), map_type(v)),
        ("Set", [t]) => format!("set[{}]", map_type(t)),
        ("Optional", [t]) => format!("{} | None", map_type(t)),
        _ => "Any".to_string(),
    }
}

/// Splits `Name<Arg,Arg>` into `(Name, [Arg, Arg])`, or `None` for a
/// non-generic spelling. Arguments are split on top-level commas only, so
/// nested generics (`Map<String,List<Integer>>`) split correctly.
fn generic_parts(ty: &str) -> Option<(&str, Vec<&str>)> {
    let open = ty.find('<')?;
    let close = ty.rfind('>')?;
    if close < open {
        return None;
    }
    let name = &ty[..open];
    let args = split_top_level_commas(&ty[open + 1..close]);
    Some((name, args))
}

fn split_top_level_commas(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_primitives() {
        assert_eq!(map_type("int"), "int");
        assert_eq!(map_type("boolean"), "bool");
        assert_eq!(map_type("double"), "float");
        assert_eq!(map_type("String"), "str");
        assert_eq!(map_type("void"), "None");
    }

    #[test]
    fn maps_arrays_recursively() {
        assert_eq!(map_type("int[]"), "list[int]");
        assert_eq!(map_type("String[][]"), "list[list[str]]");
    }

    #[test]
    fn maps_generics_recursively() {
        assert_eq!(map_type("List<String>"), "list[str]");
        assert_eq!(map_type("Map<String,Integer>"), "dict[str, Any]");
        assert_eq!(map_type("Map<String,List<Integer>>"), "dict[str, list[Any]]");
        assert_eq!(map_type("Optional<String>"), "str | None");
        assert_eq!(map_type("Set<Integer>"), "set[Any]");
    }

    #[test]
    fn maps_bare_generic_and_unknown() {
        assert_eq!(map_type("List"), "list[Any]");
        assert_eq!(map_type("Widget"), "Any");
    }

    #[test]
    fn defaults_match_type_table() {
        assert_eq!(default_value_for("int"), "0");
        assert_eq!(default_value_for("boolean"), "False");
        assert_eq!(default_value_for("String"), "\"\"");
        assert_eq!(default_value_for("int[]"), "[]");
        assert_eq!(default_value_for("List<String>"), "[]");
        assert_eq!(default_value_for("Map<String,Integer>"), "{}");
        assert_eq!(default_value_for("Optional<String>"), "None");
        assert_eq!(default_value_for("Widget"), "None");
    }
}
