//! Condition helpers shared by SELECT, UPDATE and DELETE.
//!
//! Each helper stages its values on the builder's registry and returns a SQL
//! fragment to pass to `and_where` / `having`. Fragments only make sense on the
//! builder that created them.
//!
//! ```ignore
//! use pgbuild::{Builder, Cond, SelectBuilder};
//!
//! let mut sb = SelectBuilder::new();
//! let active = sb.eq("status", "active");
//! let adult = sb.ge("age", 18);
//! sb.select(["id", "name"]).from(["users"]).and_where([active, adult]);
//!
//! let (sql, params) = sb.build();
//! // SELECT id, name FROM users WHERE status = $1 AND age >= $2
//! ```

use crate::args::{Arg, Args};

/// Staging helpers for WHERE / HAVING fragments.
pub trait Cond {
    /// The registry values are staged on.
    fn args_mut(&mut self) -> &mut Args;

    /// Stage `arg` and return its token, for hand-written SQL.
    fn var(&mut self, arg: impl Into<Arg>) -> String {
        self.args_mut().add(arg)
    }

    /// `field op value` with an arbitrary operator.
    fn expr(&mut self, field: &str, op: &str, value: impl Into<Arg>) -> String {
        format!("{} {} {}", field, op, self.var(value))
    }

    /// `field = value`
    fn eq(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.expr(field, "=", value)
    }

    /// `field <> value`
    fn ne(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.expr(field, "<>", value)
    }

    /// `field > value`
    fn gt(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.expr(field, ">", value)
    }

    /// `field >= value`
    fn ge(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.expr(field, ">=", value)
    }

    /// `field < value`
    fn lt(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.expr(field, "<", value)
    }

    /// `field <= value`
    fn le(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.expr(field, "<=", value)
    }

    /// `field LIKE pattern`
    fn like(&mut self, field: &str, pattern: impl Into<Arg>) -> String {
        self.expr(field, "LIKE", pattern)
    }

    /// `field NOT LIKE pattern`
    fn not_like(&mut self, field: &str, pattern: impl Into<Arg>) -> String {
        self.expr(field, "NOT LIKE", pattern)
    }

    /// `field ILIKE pattern`
    fn ilike(&mut self, field: &str, pattern: impl Into<Arg>) -> String {
        self.expr(field, "ILIKE", pattern)
    }

    /// `field NOT ILIKE pattern`
    fn not_ilike(&mut self, field: &str, pattern: impl Into<Arg>) -> String {
        self.expr(field, "NOT ILIKE", pattern)
    }

    /// `field IS NULL`
    fn is_null(&self, field: &str) -> String {
        format!("{} IS NULL", field)
    }

    /// `field IS NOT NULL`
    fn is_not_null(&self, field: &str) -> String {
        format!("{} IS NOT NULL", field)
    }

    /// `field BETWEEN lower AND upper`
    fn between(&mut self, field: &str, lower: impl Into<Arg>, upper: impl Into<Arg>) -> String {
        let lower = self.var(lower);
        let upper = self.var(upper);
        format!("{} BETWEEN {} AND {}", field, lower, upper)
    }

    /// `field NOT BETWEEN lower AND upper`
    fn not_between(&mut self, field: &str, lower: impl Into<Arg>, upper: impl Into<Arg>) -> String {
        let lower = self.var(lower);
        let upper = self.var(upper);
        format!("{} NOT BETWEEN {} AND {}", field, lower, upper)
    }

    /// `field IN (values...)`. An empty list renders `1=0`.
    ///
    /// Items may be values, [`list`](crate::list)s or nested builders.
    fn in_<I>(&mut self, field: &str, values: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let items: Vec<Arg> = values.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return "1=0".to_string();
        }
        format!("{} IN ({})", field, self.var(Arg::List(items)))
    }

    /// `field NOT IN (values...)`. An empty list renders `1=1`.
    fn not_in<I>(&mut self, field: &str, values: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let items: Vec<Arg> = values.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return "1=1".to_string();
        }
        format!("{} NOT IN ({})", field, self.var(Arg::List(items)))
    }

    /// `EXISTS (subquery)`
    fn exists(&mut self, subquery: impl Into<Arg>) -> String {
        format!("EXISTS ({})", self.var(subquery))
    }

    /// `NOT EXISTS (subquery)`
    fn not_exists(&mut self, subquery: impl Into<Arg>) -> String {
        format!("NOT EXISTS ({})", self.var(subquery))
    }

    /// `(a AND b AND ...)`
    fn and<I>(&self, exprs: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        join_group(exprs, " AND ")
    }

    /// `(a OR b OR ...)`
    fn or<I>(&self, exprs: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        join_group(exprs, " OR ")
    }

    /// `NOT expr`
    fn not(&self, expr: &str) -> String {
        format!("NOT {}", expr)
    }
}

fn join_group<I>(exprs: I, sep: &str) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let parts: Vec<String> = exprs
        .into_iter()
        .map(|e| e.as_ref().to_string())
        .filter(|e| !e.is_empty())
        .collect();
    format!("({})", parts.join(sep))
}
