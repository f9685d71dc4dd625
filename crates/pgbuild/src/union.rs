//! UNION / UNION ALL builder.

use crate::args::{Arg, Args};
use crate::builder::Builder;
use crate::param::Param;

/// Combines builders with UNION or UNION ALL.
///
/// Each member is staged as a nested builder, so its placeholders are numbered
/// after those of the members before it.
#[derive(Clone, Debug, Default)]
pub struct UnionBuilder {
    args: Args,
    opt: &'static str,
    members: Vec<String>,
    order_by_cols: Vec<String>,
    order: Option<&'static str>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl UnionBuilder {
    /// Create an empty UNION builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the members, combined with UNION.
    pub fn union<I>(&mut self, builders: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.set_members(" UNION ", builders)
    }

    /// Replace the members, combined with UNION ALL.
    pub fn union_all<I>(&mut self, builders: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.set_members(" UNION ALL ", builders)
    }

    fn set_members<I>(&mut self, opt: &'static str, builders: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        self.opt = opt;
        self.members = builders.into_iter().map(|b| self.args.add(b)).collect();
        self
    }

    /// Stage `arg` and return its token, for use in ORDER BY expressions.
    pub fn var(&mut self, arg: impl Into<Arg>) -> String {
        self.args.add(arg)
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

    /// Set OFFSET.
    pub fn offset(&mut self, n: i64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    fn template(&self) -> String {
        let mut sql = String::new();

        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                sql.push_str(self.opt);
            }
            sql.push('(');
            sql.push_str(member);
            sql.push(')');
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

        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&offset.to_string());
        }

        sql
    }
}

impl Builder for UnionBuilder {
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>) {
        self.args.compile(&self.template(), initial)
    }
}

/// Combine builders with UNION.
pub fn union<I>(builders: I) -> UnionBuilder
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let mut ub = UnionBuilder::new();
    ub.union(builders);
    ub
}

/// Combine builders with UNION ALL.
pub fn union_all<I>(builders: I) -> UnionBuilder
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let mut ub = UnionBuilder::new();
    ub.union_all(builders);
    ub
}
