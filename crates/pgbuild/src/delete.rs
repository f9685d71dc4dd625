//! DELETE builder.

use crate::args::Args;
use crate::builder::Builder;
use crate::cond::Cond;
use crate::param::Param;

/// DELETE builder.
///
/// Unlike higher-level query builders, a DELETE without WHERE is rendered as
/// written; nothing here validates the statement.
#[derive(Clone, Debug, Default)]
pub struct DeleteBuilder {
    args: Args,
    table: String,
    where_exprs: Vec<String>,
    order_by_cols: Vec<String>,
    order: Option<&'static str>,
    limit: Option<i64>,
    returning: Vec<String>,
}

impl DeleteBuilder {
    /// Create an empty DELETE builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn delete_from(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    /// Add WHERE expressions, joined with AND.
    pub fn and_where<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.where_exprs.extend(exprs.into_iter().map(Into::into));
        self
    }

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
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(&self.table);

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

impl Cond for DeleteBuilder {
    fn args_mut(&mut self) -> &mut Args {
        &mut self.args
    }
}

impl Builder for DeleteBuilder {
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>) {
        self.args.compile(&self.template(), initial)
    }
}

/// Create a DELETE builder for `table`.
pub fn delete_from(table: &str) -> DeleteBuilder {
    let mut db = DeleteBuilder::new();
    db.delete_from(table);
    db
}
