//! # pgbuild
//!
//! Placeholder compilation for hand-assembled Postgres SQL.
//!
//! ## Features
//!
//! - **Template macros**: `$?`, `$0`, `${name}` and `$$` in format strings,
//!   compiled to contiguous `$1..$n` placeholders
//! - **Nested builders**: a builder staged as an argument is expanded inline and
//!   its placeholders are renumbered after the outer ones
//! - **Clause builders**: SELECT / INSERT / UPDATE / DELETE / UNION on top of the
//!   same compiler
//! - **Driver-ready parameters**: values are `tokio-postgres` `ToSql` objects
//!
//! ## Example
//!
//! ```ignore
//! use pgbuild::{Builder, Cond, params_ref};
//!
//! let mut sb = pgbuild::select(["id", "name"]);
//! let status = sb.in_("status", [1, 2, 5]);
//! sb.from(["users"]).and_where([status]).limit(10);
//!
//! let (sql, params) = sb.build();
//! assert_eq!(sql, "SELECT id, name FROM users WHERE status IN ($1, $2, $3) LIMIT 10");
//! let rows = client.query(&sql, &params_ref(&params)).await?;
//! ```

pub mod args;
pub mod builder;
pub mod cond;
pub mod delete;
pub mod error;
pub mod insert;
pub mod param;
pub mod select;
pub mod union;
pub mod update;

pub use args::{Arg, Args, list, nested, raw};
pub use builder::{Builder, CompiledBuilder, build, build_named};
pub use cond::Cond;
pub use delete::{DeleteBuilder, delete_from};
pub use error::{SqlError, SqlResult};
pub use insert::{InsertBuilder, insert_into};
pub use param::{Param, params_ref};
pub use select::{JoinOption, SelectBuilder, select};
pub use union::{UnionBuilder, union, union_all};
pub use update::{UpdateBuilder, update};
