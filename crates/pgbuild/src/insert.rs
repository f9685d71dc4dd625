//! INSERT builder.

use crate::args::{Arg, Args};
use crate::builder::Builder;
use crate::param::Param;

/// Conflict resolution action.
#[derive(Clone, Debug)]
enum ConflictAction {
    /// DO NOTHING
    DoNothing,
    /// DO UPDATE SET assignments
    DoUpdate(Vec<String>),
}

/// INSERT builder.
///
/// Each call to [`values`](InsertBuilder::values) adds one row; cells may mix
/// bound values, [`raw`](crate::raw) SQL and nested builders.
#[derive(Clone, Debug, Default)]
pub struct InsertBuilder {
    args: Args,
    table: String,
    cols: Vec<String>,
    rows: Vec<Vec<String>>,
    conflict_cols: Vec<String>,
    conflict_action: Option<ConflictAction>,
    returning: Vec<String>,
}

impl InsertBuilder {
    /// Create an empty INSERT builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn insert_into(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    /// Set the column list.
    pub fn cols<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.cols = cols.into_iter().map(Into::into).collect();
        self
    }

    /// Add one row of values.
    pub fn values<I>(&mut self, row: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let placeholders = row.into_iter().map(|v| self.args.add(v)).collect();
        self.rows.push(placeholders);
        self
    }

    /// Stage `arg` and return its token, for hand-written SQL.
    pub fn var(&mut self, arg: impl Into<Arg>) -> String {
        self.args.add(arg)
    }

    // ==================== ON CONFLICT ====================

    /// Set the ON CONFLICT target columns.
    pub fn on_conflict<I>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.conflict_cols = cols.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve conflicts with `DO UPDATE SET assignments`.
    ///
    /// Build assignments with [`assign`](InsertBuilder::assign) and
    /// [`set_excluded`](InsertBuilder::set_excluded).
    pub fn do_update<I>(&mut self, assignments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let assignments = assignments.into_iter().map(Into::into).collect();
        self.conflict_action = Some(ConflictAction::DoUpdate(assignments));
        self
    }

    /// Resolve conflicts with `DO NOTHING`.
    pub fn do_nothing(&mut self) -> &mut Self {
        self.conflict_action = Some(ConflictAction::DoNothing);
        self
    }

    /// `col = EXCLUDED.col`
    pub fn set_excluded(&self, col: &str) -> String {
        format!("{} = EXCLUDED.{}", col, col)
    }

    /// `field = value`
    pub fn assign(&mut self, field: &str, value: impl Into<Arg>) -> String {
        format!("{} = {}", field, self.args.add(value))
    }

    // ==================== RETURNING ====================

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
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&self.table);

        if !self.cols.is_empty() {
            sql.push_str(" (");
            sql.push_str(&self.cols.join(", "));
            sql.push(')');
        }

        sql.push_str(" VALUES ");
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("({})", row.join(", ")))
            .collect();
        sql.push_str(&rows.join(", "));

        if !self.conflict_cols.is_empty() || self.conflict_action.is_some() {
            sql.push_str(" ON CONFLICT");
            if !self.conflict_cols.is_empty() {
                sql.push_str(" (");
                sql.push_str(&self.conflict_cols.join(", "));
                sql.push(')');
            }
            match &self.conflict_action {
                Some(ConflictAction::DoUpdate(assignments)) if !assignments.is_empty() => {
                    sql.push_str(" DO UPDATE SET ");
                    sql.push_str(&assignments.join(", "));
                }
                Some(ConflictAction::DoNothing) => sql.push_str(" DO NOTHING"),
                _ => {}
            }
        }

        if !self.returning.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning.join(", "));
        }

        sql
    }
}

impl Builder for InsertBuilder {
    fn build_with(&self, initial: Vec<Param>) -> (String, Vec<Param>) {
        self.args.compile(&self.template(), initial)
    }
}

/// Create an INSERT builder for `table`.
///
/// # Example
/// ```ignore
/// let (sql, params) = pgbuild::insert_into("users")
///     .cols(["id", "name"])
///     .values([Arg::from(1), Arg::from("alice")])
///     .build();
/// ```
pub fn insert_into(table: &str) -> InsertBuilder {
    let mut ib = InsertBuilder::new();
    ib.insert_into(table);
    ib
}
