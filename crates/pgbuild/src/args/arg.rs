//! Staged argument variants.

use crate::builder::Builder;
use crate::param::Param;
use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// An argument staged on an [`Args`](super::Args) registry.
///
/// Any `ToSql` value converts into [`Arg::Value`], and every builder in this
/// crate converts into [`Arg::Builder`], so most call sites never name the
/// variants directly.
#[derive(Clone)]
pub enum Arg {
    /// A value bound as a `$n` placeholder.
    Value(Param),

    /// A SQL fragment written verbatim. Binds nothing.
    Raw(String),

    /// A nested query. Its placeholders continue the enclosing numbering and
    /// its parameters are spliced in at the point of reference.
    Builder(Arc<dyn Builder>),

    /// Comma-separated sequence of arguments, e.g. the body of `IN (...)`.
    List(Vec<Arg>),
}

impl<T: ToSql + Send + Sync + 'static> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::Value(Param::new(value))
    }
}

impl From<Param> for Arg {
    fn from(param: Param) -> Self {
        Arg::Value(param)
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(param) => f.debug_tuple("Value").field(param).finish(),
            Arg::Raw(expr) => f.debug_tuple("Raw").field(expr).finish(),
            Arg::Builder(_) => f.debug_tuple("Builder").field(&"<dyn Builder>").finish(),
            Arg::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

/// Mark `expr` as raw SQL so it is written as-is instead of being bound.
///
/// # Example
/// ```ignore
/// ib.values([Arg::from(1), raw("NOW()")]);
/// ```
pub fn raw(expr: impl Into<String>) -> Arg {
    Arg::Raw(expr.into())
}

/// Expand `items` into a comma-separated list of placeholders.
///
/// # Example
/// ```ignore
/// let cond = sb.in_("id", [list([1, 2, 3])]); // id IN ($1, $2, $3)
/// ```
pub fn list<I>(items: I) -> Arg
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    Arg::List(items.into_iter().map(Into::into).collect())
}

/// Stage any [`Builder`] as a nested query.
pub fn nested<B: Builder + 'static>(builder: B) -> Arg {
    Arg::Builder(Arc::new(builder))
}
