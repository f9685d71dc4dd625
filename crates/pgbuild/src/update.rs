//! UPDATE builder.

use crate::args::{Arg, Args};
use crate::builder::Builder;
use crate::cond::Cond;
use crate::param::Param;

/// UPDATE builder.
#[derive(Clone, Debug, Default)]
pub struct UpdateBuilder {
    args: Args,
    table: String,
    assignments: Vec<String>,
    where_exprs: Vec<String>,
    order_by_cols: Vec<String>,
    order: Option<&'static str>,
    limit: Option<i64>,
    returning: Vec<String>,
}

impl UpdateBuilder {
    /// Create an empty UPDATE builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn update(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    // ==================== SET ====================

    /// Replace the SET assignments.
    pub fn set<I>(&mut self, assignments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.assignments = assignments.into_iter().map(Into::into).collect();
        self
    }

    /// Append SET assignments.
    pub fn set_more<I>(&mut self, assignments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.assignments
            .extend(assignments.into_iter().map(Into::into));
        self
    }

    /// `field = value`
    pub fn assign(&mut self, field: &str, value: impl Into<Arg>) -> String {
        format!("{} = {}", field, self.var(value))
    }

    /// `field = field + 1`
    pub fn incr(&self, field: &str) -> String {
        format!("{} = {} + 1", field, field)
    }

    /// `field = field - 1`
    pub fn decr(&self, field: &str) -> String {
        format!("{} = {} - 1", field, field)
    }

    /// `field = field + value`
    pub fn add(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.arith(field, "+", value)
    }

    /// `field = field - value`
    pub fn sub(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.arith(field, "-", value)
    }

    /// `field = field * value`
    pub fn mul(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.arith(field, "*", value)
    }

    /// `field = field / value`
    pub fn div(&mut self, field: &str, value: impl Into<Arg>) -> String {
        self.arith(field, "/", value)
    }

    fn arith(&mut self, field: &str, op: &str, value: impl Into<Arg>) -> String {
        format!("{} = {} {} {}", field, field, op, self.var(value))
    }

    // ==================== WHERE ====================

    /// Add WHERE expressions, joined with AND.
    pub fn and_where<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.where_exprs.extend(exprs.into_iter().map(Into::into));
        self
    }

    // ==================== ORDER BY / LIMIT / RETURNING ====================

    /// Add ORDER BY columns.
    pub fn order_by<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by_cols.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Set ORDER BY direction to ASC.
    pub fn asc(&mut self) -> &mut Self {
        self.order = Some("ASC");
        self
    }

    /// Set ORDER BY direction to DESC.
    pub fn desc(&mut self) -> &mut Self {
        self.order = Some("DESC");
        self
    }

    /// Set LIMIT.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Set RETURNING columns.
    pub fn returning<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.returning = cols.into_iter().map(Into::into).collect();
        self
    }

    fn template(&self) -> String {
        let mut sql = String::from("UPDATE ");
        sql.push_str(&self.table);

        sql.push_str(" SET ");
        sql.push_str(&self.assignments.join(", "));

        if !self.where_exprs.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_exprs.join(" AND "));
        }

        if !self.order_by_cols.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by_cols.join(", "));
            if let Some(order) = self.order {
                sql.push(' ');
                sql.push_str(order);
            }
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        if !self.returning.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning.join(", "));
        }

        sql
    }
}

impl Cond for UpdateBuilder {
    fn args_mut(&mut self) -> &mut Args {
        &mut self.args
    }
}

impl Builder for UpdateBuilder {
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>) {
        self.args.compile(&self.template(), initial)
    }
}

/// Create an UPDATE builder for `table`.
pub fn update(table: &str) -> UpdateBuilder {
    let mut ub = UpdateBuilder::new();
    ub.update(table);
    ub
}
