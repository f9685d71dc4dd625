//! The `Builder` capability and format-string builders.

use crate::args::{Arg, Args};
use crate::error::SqlResult;
use crate::param::Param;
use std::sync::Arc;

/// Anything that renders to SQL plus parameters.
///
/// Every clause builder implements this trait, which is also what lets a
/// builder be nested inside another one: the outer compilation passes its
/// parameters so far as `initial`, and the nested builder numbers its own
/// placeholders after them.
pub trait Builder: Send + Sync {
    /// Build SQL whose placeholders continue after `initial`.
    ///
    /// The returned parameter list starts with `initial`.
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>);

    /// Build SQL and parameters, ready for `client.query(&sql, &params_ref(&params))`.
    fn build(&self) -> (String, Vec<Param>) {
        self.build_with(Vec::new())
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> String {
        self.build().0
    }
}

/// A builder made of a template and its own registry.
///
/// Created by [`build`] and [`build_named`].
#[derive(Clone, Debug)]
pub struct CompiledBuilder {
    args: Args,
    format: String,
}

impl Builder for CompiledBuilder {
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>) {
        self.args.compile(&self.format, initial)
    }
}

/// Create a builder from a template and positional arguments.
///
/// See [`Args`](crate::Args) for the template syntax.
///
/// # Example
/// ```ignore
/// let b = pgbuild::build("SELECT * FROM users WHERE id = $? OR name = $?", [Arg::from(1), Arg::from("alice")]);
/// assert_eq!(b.to_sql(), "SELECT * FROM users WHERE id = $1 OR name = $2");
/// ```
pub fn build<I>(format: impl Into<String>, args: I) -> CompiledBuilder
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let mut registry = Args::new();
    for arg in args {
        registry.add(arg);
    }
    CompiledBuilder {
        args: registry,
        format: format.into(),
    }
}

/// Create a builder whose template only understands `${name}` and `$$`.
///
/// `$1`, `$?` and friends are left untouched, so the template may contain
/// them as ordinary text. Names that are never referenced bind nothing.
///
/// # Example
/// ```ignore
/// let b = pgbuild::build_named(
///     "SELECT * FROM users WHERE status = ${status} AND age > ${age}",
///     [("status", Arg::from("active")), ("age", Arg::from(18))],
/// )?;
/// ```
pub fn build_named<I, N, A>(format: impl Into<String>, named: I) -> SqlResult<CompiledBuilder>
where
    I: IntoIterator<Item = (N, A)>,
    N: Into<String>,
    A: Into<Arg>,
{
    let mut registry = Args::only_named();
    for (name, arg) in named {
        registry.add_alias(name, arg)?;
    }
    Ok(CompiledBuilder {
        args: registry,
        format: format.into(),
    })
}

/// Implement `From<$ty> for Arg` so builders can be staged as nested queries.
macro_rules! impl_into_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(builder: $ty) -> Self {
                    Arg::Builder(Arc::new(builder))
                }
            }
        )*
    };
}

impl_into_arg!(
    CompiledBuilder,
    crate::select::SelectBuilder,
    crate::insert::InsertBuilder,
    crate::update::UpdateBuilder,
    crate::delete::DeleteBuilder,
    crate::union::UnionBuilder,
);
