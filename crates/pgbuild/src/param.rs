//! Parameter storage using Arc for clone-friendly builders.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly parameter wrapper using Arc.
///
/// Builders keep their staged values as `Param`s so that a builder can be
/// cloned, nested into another builder and compiled repeatedly without copying
/// the underlying values. Referencing the same staged value twice yields two
/// entries in the output parameter list that share one allocation.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }

    /// Returns `true` if both params point at the same staged value.
    pub fn ptr_eq(&self, other: &Param) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// Transparent so that `{:?}` on a parameter list reads like the bound values.
impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Get parameters as references compatible with tokio-postgres.
///
/// # Example
/// ```ignore
/// let (sql, params) = sb.build();
/// let rows = client.query(&sql, &pgbuild::params_ref(&params)).await?;
/// ```
pub fn params_ref(params: &[Param]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p.as_ref()).collect()
}
