//! Java standard-library exception names to Python builtin exception names,
//! for `catch` clauses (spec §4.2.6's `try/except` row). Not part of the
//! node-kind catalogue's contract -- an honest best-effort mapping for the
//! handful of exception types that come up constantly; anything else is
//! assumed to be a user-defined class carried over by name unchanged.
pub(super) fn map_exception_type(java_type: &str) -> &str {
    match java_type {
        "RuntimeException" => "RuntimeError",
        "IllegalArgumentException" => "ValueError",
        "IllegalStateException" => "RuntimeError",
        "NullPointerException" => "TypeError",
        "ArrayIndexOutOfBoundsException" | "IndexOutOfBoundsException" => "IndexError",
        "NumberFormatException" => "ValueError",
        "ArithmeticException" => "ArithmeticError",
        "ClassCastException" => "TypeError",
        "UnsupportedOperationException" => "NotImplementedError",
        "IOException" => "OSError",
        "InterruptedException" => "RuntimeError",
        other => other,
    }
}
