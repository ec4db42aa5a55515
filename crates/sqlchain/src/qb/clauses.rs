//! Clause storage and the fixed-order clause assembler shared by every statement.
//!
//! Rendering order:
//! prefixes, head (written by the statement), joins, WHERE, GROUP BY, HAVING,
//! ORDER BY, LIMIT, OFFSET, RETURNING (written by the statement), suffixes.

use crate::error::SqlResult;
use crate::fragment::{Raw, write_joined};
use crate::qb::expr::{Expr, write_conjunction};
use crate::value::Value;
use std::sync::Arc;

/// Append to a shared list, copying it first only if another snapshot holds it.
pub(crate) fn push_shared<T: Clone>(list: &mut Arc<Vec<T>>, item: T) {
    Arc::make_mut(list).push(item);
}

/// Extend a shared list, copying it first only if another snapshot holds it.
pub(crate) fn extend_shared<T: Clone>(list: &mut Arc<Vec<T>>, items: impl IntoIterator<Item = T>) {
    Arc::make_mut(list).extend(items);
}

/// ` RETURNING a, b` when any columns were requested.
pub(crate) fn write_returning(columns: &[String], out: &mut String) {
    if !columns.is_empty() {
        out.push_str(" RETURNING ");
        out.push_str(&columns.join(", "));
    }
}

/// Per-category clause lists of one statement.
///
/// Lists live behind `Arc` so cloning a builder is cheap and a clone never
/// observes later additions made through the other copy.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClauseSet {
    pub(crate) prefixes: Arc<Vec<Raw>>,
    pub(crate) joins: Arc<Vec<Raw>>,
    pub(crate) where_parts: Arc<Vec<Expr>>,
    pub(crate) group_bys: Arc<Vec<String>>,
    pub(crate) having_parts: Arc<Vec<Expr>>,
    pub(crate) order_bys: Arc<Vec<String>>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) suffixes: Arc<Vec<Raw>>,
}

impl ClauseSet {
    /// Prefixes, space-joined and followed by a space.
    pub(crate) fn write_prefixes(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        if write_joined(&self.prefixes, " ", out, args)? {
            out.push(' ');
        }
        Ok(())
    }

    /// Join clauses, each preceded by a space.
    pub(crate) fn write_joins(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        for join in self.joins.iter() {
            if join.is_empty() {
                continue;
            }
            out.push(' ');
            out.push_str(join.sql());
            args.extend(join.args().iter().cloned());
        }
        Ok(())
    }

    /// WHERE through OFFSET.
    pub(crate) fn write_tail(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        write_condition(" WHERE ", &self.where_parts, out, args)?;

        if !self.group_bys.is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(&self.group_bys.join(", "));
        }

        write_condition(" HAVING ", &self.having_parts, out, args)?;

        if !self.order_bys.is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(&self.order_bys.join(", "));
        }

        // OFFSET without a LIMIT is dropped.
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            out.push_str(" LIMIT ");
            out.push_str(&limit.to_string());
            if let Some(offset) = self.offset.filter(|o| *o > 0) {
                out.push_str(" OFFSET ");
                out.push_str(&offset.to_string());
            }
        }
        Ok(())
    }

    /// Suffixes, each preceded by a space.
    pub(crate) fn write_suffixes(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        let mut suffix = String::new();
        if write_joined(&self.suffixes, " ", &mut suffix, args)? {
            out.push(' ');
            out.push_str(&suffix);
        }
        Ok(())
    }
}

fn write_condition(
    keyword: &str,
    parts: &[Expr],
    out: &mut String,
    args: &mut Vec<Value>,
) -> SqlResult<()> {
    if parts.is_empty() {
        return Ok(());
    }
    let mut text = String::new();
    let mut part_args = Vec::new();
    write_conjunction(parts, &mut text, &mut part_args)?;
    if !text.is_empty() {
        out.push_str(keyword);
        out.push_str(&text);
        args.append(&mut part_args);
    }
    Ok(())
}
