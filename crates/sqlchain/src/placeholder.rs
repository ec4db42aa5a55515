//! Placeholder rewriting.
//!
//! Fragments render with the dialect-neutral marker `?`; a doubled `??` is a
//! literal question mark. The last step of building a statement rewrites every
//! marker into the target dialect's parameter syntax.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{self, Write};
use std::str::FromStr;

/// The dialect-neutral argument marker.
pub const MARKER: char = '?';

/// A rule producing the parameter token for a 1-based argument position.
///
/// Adding a dialect means implementing this trait; the scan itself lives in
/// [`replace_placeholders`].
pub trait PlaceholderStyle {
    fn write_placeholder(&self, position: usize, out: &mut String);
}

/// Built-in placeholder styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderFormat {
    /// `?` (MySQL, SQLite)
    #[default]
    Question,
    /// `$1, $2, ...` (PostgreSQL)
    Dollar,
    /// `:1, :2, ...` (Oracle)
    Colon,
    /// `@p1, @p2, ...` (SQL Server)
    AtP,
}

impl PlaceholderStyle for PlaceholderFormat {
    fn write_placeholder(&self, position: usize, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            PlaceholderFormat::Question => out.write_char(MARKER),
            PlaceholderFormat::Dollar => write!(out, "${position}"),
            PlaceholderFormat::Colon => write!(out, ":{position}"),
            PlaceholderFormat::AtP => write!(out, "@p{position}"),
        };
    }
}

impl PlaceholderFormat {
    /// Rewrite neutral markers in `sql` into this format.
    pub fn replace_placeholders(&self, sql: &str) -> String {
        replace_placeholders(sql, self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderFormat::Question => "question",
            PlaceholderFormat::Dollar => "dollar",
            PlaceholderFormat::Colon => "colon",
            PlaceholderFormat::AtP => "at_p",
        }
    }
}

impl fmt::Display for PlaceholderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceholderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "question" | "?" => Ok(PlaceholderFormat::Question),
            "dollar" | "$" => Ok(PlaceholderFormat::Dollar),
            "colon" | ":" => Ok(PlaceholderFormat::Colon),
            "at_p" | "atp" | "@p" => Ok(PlaceholderFormat::AtP),
            other => Err(format!("unknown placeholder format: {other}")),
        }
    }
}

/// Rewrite every neutral marker in `sql` using `style`.
pub fn replace_placeholders<S: PlaceholderStyle + ?Sized>(sql: &str, style: &S) -> String {
    let rewritten = scan_markers(sql, |position, out| {
        style.write_placeholder(position, out);
        Ok::<(), Infallible>(())
    });
    match rewritten {
        Ok((out, count)) => {
            tracing::trace!(target: "sqlchain.sql", placeholders = count, "rewrote placeholders");
            out
        }
        Err(never) => match never {},
    }
}

/// Count the argument markers in `sql`, ignoring `??` escapes.
pub fn count_markers(sql: &str) -> usize {
    match scan_markers(sql, |_, _| Ok::<(), Infallible>(())) {
        Ok((_, count)) => count,
        Err(never) => match never {},
    }
}

/// Scan `sql` left to right, copying text and collapsing `??` into `?`.
///
/// Every other marker is handed to `on_marker` with its 1-based position.
/// Returns the rewritten text and the number of markers seen.
pub(crate) fn scan_markers<E>(
    sql: &str,
    mut on_marker: impl FnMut(usize, &mut String) -> Result<(), E>,
) -> Result<(String, usize), E> {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut count = 0;
    let mut rest = sql;

    while let Some(p) = rest.find(MARKER) {
        out.push_str(&rest[..p]);
        let after = &rest[p + MARKER.len_utf8()..];
        if after.starts_with(MARKER) {
            out.push(MARKER);
            rest = &after[MARKER.len_utf8()..];
        } else {
            count += 1;
            on_marker(count, &mut out)?;
            rest = after;
        }
    }
    out.push_str(rest);
    Ok((out, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_keeps_markers() {
        assert_eq!(
            PlaceholderFormat::Question.replace_placeholders("a = ? AND b = ?"),
            "a = ? AND b = ?"
        );
    }

    #[test]
    fn dollar_numbers_markers() {
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders("a = ? AND b IN (?,?)"),
            "a = $1 AND b IN ($2,$3)"
        );
    }

    #[test]
    fn colon_and_at_p() {
        assert_eq!(PlaceholderFormat::Colon.replace_placeholders("x = ?, y = ?"), "x = :1, y = :2");
        assert_eq!(PlaceholderFormat::AtP.replace_placeholders("x = ?, y = ?"), "x = @p1, y = @p2");
    }

    #[test]
    fn escape_is_literal_and_not_counted() {
        let sql = "x = ? AND y = '??' AND z = ?";
        assert_eq!(
            PlaceholderFormat::Dollar.replace_placeholders(sql),
            "x = $1 AND y = '?' AND z = $2"
        );
        assert_eq!(count_markers(sql), 2);
    }

    #[test]
    fn escape_collapses_in_every_style() {
        for format in [
            PlaceholderFormat::Question,
            PlaceholderFormat::Dollar,
            PlaceholderFormat::Colon,
            PlaceholderFormat::AtP,
        ] {
            assert_eq!(format.replace_placeholders("'??'"), "'?'");
        }
    }

    #[test]
    fn trailing_marker() {
        assert_eq!(PlaceholderFormat::Dollar.replace_placeholders("LIMIT ?"), "LIMIT $1");
        assert_eq!(PlaceholderFormat::Dollar.replace_placeholders("???"), "?$1");
    }

    #[test]
    fn custom_style() {
        struct Named;
        impl PlaceholderStyle for Named {
            fn write_placeholder(&self, position: usize, out: &mut String) {
                out.push_str(&format!(":arg{position}"));
            }
        }
        assert_eq!(replace_placeholders("a = ? OR b = ?", &Named), "a = :arg1 OR b = :arg2");
    }

    #[test]
    fn parse_and_serde() {
        assert_eq!("dollar".parse::<PlaceholderFormat>(), Ok(PlaceholderFormat::Dollar));
        assert_eq!("AT_P".parse::<PlaceholderFormat>(), Ok(PlaceholderFormat::AtP));
        assert!("hash".parse::<PlaceholderFormat>().is_err());

        let json = serde_json::to_string(&PlaceholderFormat::AtP).unwrap();
        assert_eq!(json, "\"at_p\"");
        let back: PlaceholderFormat = serde_json::from_str("\"colon\"").unwrap();
        assert_eq!(back, PlaceholderFormat::Colon);
    }
}
