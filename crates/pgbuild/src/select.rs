//! SELECT builder.

use crate::args::{Arg, Args};
use crate::builder::Builder;
use crate::cond::Cond;
use crate::param::Param;

/// JOIN flavour used by [`SelectBuilder::join_with_option`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOption {
    Full,
    FullOuter,
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
}

impl JoinOption {
    /// SQL keyword(s) written before `JOIN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinOption::Full => "FULL",
            JoinOption::FullOuter => "FULL OUTER",
            JoinOption::Inner => "INNER",
            JoinOption::Left => "LEFT",
            JoinOption::LeftOuter => "LEFT OUTER",
            JoinOption::Right => "RIGHT",
            JoinOption::RightOuter => "RIGHT OUTER",
        }
    }
}

#[derive(Clone, Debug)]
struct Join {
    option: Option<JoinOption>,
    table: String,
    on: Vec<String>,
}

/// SELECT builder.
///
/// Clause methods record fragments; values are staged through [`Cond`] helpers
/// (or [`Cond::var`]) and only turned into `$n` placeholders by [`Builder::build`].
#[derive(Clone, Debug, Default)]
pub struct SelectBuilder {
    args: Args,
    distinct: bool,
    select_cols: Vec<String>,
    tables: Vec<String>,
    joins: Vec<Join>,
    where_exprs: Vec<String>,
    group_by_cols: Vec<String>,
    having_exprs: Vec<String>,
    order_by_cols: Vec<String>,
    order: Option<&'static str>,
    limit: Option<i64>,
    offset: Option<i64>,
    for_what: Option<&'static str>,
}

impl SelectBuilder {
    /// Create an empty SELECT builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== SELECT / FROM ====================

    /// Set SELECT columns.
    pub fn select<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.select_cols = cols.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as SELECT DISTINCT.
    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// Set table names (or FROM expressions) in FROM.
    pub fn from<I>(&mut self, tables: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Render `(builder) AS alias`, e.g. for a derived table in FROM.
    pub fn builder_as(&mut self, builder: impl Into<Arg>, alias: &str) -> String {
        format!("({}) AS {}", self.var(builder), alias)
    }

    // ==================== JOIN ====================

    /// Add `JOIN table ON on[0] AND on[1] ...`.
    pub fn join<I>(&mut self, table: &str, on: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.push_join(None, table, on)
    }

    /// Add `LEFT JOIN table ON ...`.
    pub fn left_join<I>(&mut self, table: &str, on: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.push_join(Some(JoinOption::Left), table, on)
    }

    /// Add `<option> JOIN table ON ...`.
    pub fn join_with_option<I>(&mut self, option: JoinOption, table: &str, on: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.push_join(Some(option), table, on)
    }

    fn push_join<I>(&mut self, option: Option<JoinOption>, table: &str, on: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.joins.push(Join {
            option,
            table: table.to_string(),
            on: on.into_iter().map(Into::into).collect(),
        });
        self
    }

    // ==================== WHERE / GROUP BY / HAVING ====================

    /// Add WHERE expressions, joined with AND.
    pub fn and_where<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.where_exprs.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Add GROUP BY columns.
    pub fn group_by<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.group_by_cols.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Add HAVING expressions, joined with AND. Only rendered with GROUP BY.
    pub fn having<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.having_exprs.extend(exprs.into_iter().map(Into::into));
        self
    }

    // ==================== ORDER BY / LIMIT ====================

    /// Add ORDER BY columns.
    pub fn order_by<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by_cols.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Add ORDER BY columns sorted ascending.
    pub fn order_by_asc<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by(cols).asc()
    }

    /// Add ORDER BY columns sorted descending.
    pub fn order_by_desc<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by(cols).desc()
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

    // ==================== Locking ====================

    /// Append `FOR UPDATE`.
    pub fn for_update(&mut self) -> &mut Self {
        self.for_what = Some("UPDATE");
        self
    }

    /// Append `FOR SHARE`.
    pub fn for_share(&mut self) -> &mut Self {
        self.for_what = Some("SHARE");
        self
    }

    fn template(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.select_cols.join(", "));

        sql.push_str(" FROM ");
        sql.push_str(&self.tables.join(", "));

        for join in &self.joins {
            if let Some(option) = join.option {
                sql.push(' ');
                sql.push_str(option.as_str());
            }
            sql.push_str(" JOIN ");
            sql.push_str(&join.table);
            if !join.on.is_empty() {
                sql.push_str(" ON ");
                sql.push_str(&join.on.join(" AND "));
            }
        }

        if !self.where_exprs.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_exprs.join(" AND "));
        }

        if !self.group_by_cols.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by_cols.join(", "));

            if !self.having_exprs.is_empty() {
                sql.push_str(" HAVING ");
                sql.push_str(&self.having_exprs.join(" AND "));
            }
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

        if let Some(what) = self.for_what {
            sql.push_str(" FOR ");
            sql.push_str(what);
        }

        sql
    }
}

impl Cond for SelectBuilder {
    fn args_mut(&mut self) -> &mut Args {
        &mut self.args
    }
}

impl Builder for SelectBuilder {
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>) {
        self.args.compile(&self.template(), initial)
    }
}

/// Create a SELECT builder with the given columns.
///
/// # Example
/// ```ignore
/// let (sql, params) = pgbuild::select(["id", "name"]).from(["users"]).limit(10).build();
/// ```
pub fn select<I>(cols: I) -> SelectBuilder
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut sb = SelectBuilder::new();
    sb.select(cols);
    sb
}
