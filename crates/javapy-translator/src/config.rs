//! Translator configuration (spec §6.3): the small set of knobs the core
//! exposes to callers, independent of how the CLI surfaces them.

/// Output tuning for [`crate::translate`]. Carries no file paths and touches
/// no environment state -- the core stays a pure function of `(AST, Config)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prepended once per indentation depth level on every emitted line.
    pub indent: String,
    /// Only `"3.10"` is currently supported (required for `match` emission).
    pub target_python: String,
    /// When false, parameter and return annotations are omitted entirely.
    pub emit_type_hints: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            target_python: "3.10".to_string(),
            emit_type_hints: true,
        }
    }
}
