pub(crate) const GREEN_CHECK: &str = "✅";
pub(crate) const RED_X: &str = "❌";

/// Render each error on its own bullet line.
pub(crate) fn format_error_list<E: std::fmt::Display>(errors: &[E]) -> String {
    errors.iter()
        .map(|err| format!("  * {err}"))
        .collect::<Vec<_>>()
        .join("\n")
}
