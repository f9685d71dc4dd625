//! Argument registry and placeholder compilation.
//!
//! Builders stage values on an [`Args`] registry and embed the returned tokens
//! in their SQL templates. [`Args::compile`] then turns the template into SQL
//! with `$1, $2, ...` placeholders plus the matching parameter list.
//!
//! # Template syntax
//!
//! - `$?` refers to successive arguments, similar to `{}` in `format!`.
//! - `$0`, `$1`, ... `$n` refer to the argument at that position. The next `$?`
//!   uses argument `n + 1`.
//! - `${name}` refers to an argument registered under `name`. The next `$?`
//!   uses the argument registered right after it.
//! - `$$` is a literal `$`.
//!
//! Any other `$` is kept as a literal `$`.
//!
//! # Example
//!
//! ```ignore
//! use pgbuild::Args;
//!
//! let mut args = Args::new();
//! let a = args.add(10);
//! let b = args.add(20);
//! let (sql, params) = args.compile(&format!("a = {a} OR b = {b}"), Vec::new());
//! assert_eq!(sql, "a = $1 OR b = $2");
//! assert_eq!(params.len(), 2);
//! ```

mod arg;
mod compile;

#[cfg(test)]
mod tests;

pub use arg::{Arg, list, nested, raw};

use crate::error::{SqlError, SqlResult};
use std::collections::HashMap;

/// Ordered store of staged arguments for one builder.
///
/// Positions are assigned in staging order and never change. A registry is
/// owned by a single builder; staging needs `&mut self` while compiling only
/// reads, so the same registry can be compiled any number of times.
#[derive(Clone, Debug, Default)]
pub struct Args {
    /// Staged arguments, indexed by position.
    args: Vec<Arg>,
    /// Name -> position for `${name}` lookups.
    named: HashMap<String, usize>,
    /// Named arguments whose values are appended after the statement unless a
    /// `${name}` reference consumes them.
    deferred: HashMap<String, usize>,
    /// Disable `$n` and `$?` parsing.
    only_named: bool,
}

impl Args {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that only understands `${name}` and `$$`.
    ///
    /// Useful for templates that contain `$` followed by digits belonging to
    /// unrelated SQL, e.g. dollar-quoted bodies.
    pub fn only_named() -> Self {
        Self {
            only_named: true,
            ..Self::default()
        }
    }

    /// Enable or disable `$n` / `$?` parsing.
    pub fn set_only_named(&mut self, only_named: bool) -> &mut Self {
        self.only_named = only_named;
        self
    }

    /// Whether `$n` / `$?` parsing is disabled.
    pub fn is_only_named(&self) -> bool {
        self.only_named
    }

    /// Number of staged arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get the staged argument at `position`.
    pub fn get(&self, position: usize) -> Option<&Arg> {
        self.args.get(position)
    }

    /// Stage an argument and return its `$<position>` token.
    ///
    /// # Example
    /// ```ignore
    /// let mut args = Args::new();
    /// assert_eq!(args.add(1), "$0");
    /// assert_eq!(args.add("a"), "$1");
    /// ```
    pub fn add(&mut self, arg: impl Into<Arg>) -> String {
        let position = self.push(arg.into());
        format!("${}", position)
    }

    /// Stage a named argument and return its `${name}` token.
    ///
    /// If the statement never references `${name}`, the value is appended to
    /// the parameter list after every inline placeholder, in registration order.
    /// Only [`Arg::Value`]s can be appended that way, so any other variant fails
    /// with [`SqlError::DeferredNotValue`]; use [`Args::add_alias`] for raw SQL,
    /// lists and nested builders.
    ///
    /// Fails with [`SqlError::NamedArgConflict`] when `name` is already taken.
    /// The registry is left unchanged on error.
    pub fn add_named(&mut self, name: impl Into<String>, arg: impl Into<Arg>) -> SqlResult<String> {
        self.register(name.into(), arg.into(), true)
    }

    /// Stage an argument that is only reachable through `${name}`.
    ///
    /// Unlike [`Args::add_named`], an alias that is never referenced binds
    /// nothing.
    pub fn add_alias(&mut self, name: impl Into<String>, arg: impl Into<Arg>) -> SqlResult<String> {
        self.register(name.into(), arg.into(), false)
    }

    fn register(&mut self, name: String, arg: Arg, deferred: bool) -> SqlResult<String> {
        if name.contains('}') {
            return Err(SqlError::invalid_arg_name(name));
        }
        if self.named.contains_key(&name) {
            return Err(SqlError::named_arg_conflict(name));
        }
        if deferred && !matches!(arg, Arg::Value(_)) {
            return Err(SqlError::deferred_not_value(name));
        }

        let position = self.push(arg);
        let token = format!("${{{}}}", name);
        if deferred {
            self.deferred.insert(name.clone(), position);
        }
        self.named.insert(name, position);
        Ok(token)
    }

    fn push(&mut self, arg: Arg) -> usize {
        let position = self.args.len();
        self.args.push(arg);
        position
    }
}
