//! Best-effort rendering of a fragment with its arguments inlined.
//!
//! The output is for logs and debugging only. It is not guaranteed to be valid
//! SQL and must never be executed, least of all with untrusted input.

use crate::fragment::Fragment;
use crate::placeholder::scan_markers;

/// Render `fragment` and substitute each `?` marker with its quoted argument.
///
/// Never fails. Problems are reported inline:
/// - `[ToSql error: <error>]` when the fragment fails to render
/// - `[DebugSqlizer error: <mismatch>]` when markers and arguments disagree
///
/// # Example
/// ```ignore
/// let raw = Raw::with_args("x = ? AND y = ?", [Value::from(1), Value::from("text")]);
/// assert_eq!(debug_sql(&raw), "x = '1' AND y = 'text'");
/// ```
pub fn debug_sql<F: Fragment + ?Sized>(fragment: &F) -> String {
    let (sql, args) = match fragment.to_sql() {
        Ok(rendered) => rendered,
        Err(err) => return format!("[ToSql error: {err}]"),
    };

    let inlined = scan_markers(&sql, |position, out| match args.get(position - 1) {
        Some(arg) => {
            out.push('\'');
            out.push_str(&arg.to_string());
            out.push('\'');
            Ok(())
        }
        None => Err(format!(
            "too many placeholders in {sql:?} for {} args",
            args.len()
        )),
    });

    match inlined {
        Ok((_, used)) if used < args.len() => format!(
            "[DebugSqlizer error: not enough placeholders in {sql:?} for {} args]",
            args.len()
        ),
        Ok((text, _)) => text,
        Err(mismatch) => format!("[DebugSqlizer error: {mismatch}]"),
    }
}
