//! Evaluation of registered operations.

use tracing::{debug, instrument};

use crate::error::{OpError, OpResult};
use crate::outcome::Outcome;
use crate::operand::Operand;
use crate::prepared::PreparedCache;
use crate::registry::{Implementation, Operation, Registry};

/// Run `operation` on A, plus B and N when it takes them.
///
/// Prepared operations build (or reuse) the prepared form of A in `cache`.
/// Arguments the operation does not take are ignored; errors from the
/// implementation come back unchanged.
#[instrument(level = "debug", skip_all, fields(operation = operation.name()))]
pub fn execute(
    operation: &Operation,
    cache: &mut PreparedCache,
    a: &Operand,
    b: Option<&Operand>,
    n: Option<f64>,
) -> OpResult<Outcome> {
    let require_b = || {
        b.ok_or_else(|| OpError::MissingArgument {
            operation: operation.name().to_string(),
            argument: "geometry B",
        })
    };
    let require_n = || {
        n.ok_or_else(|| OpError::MissingArgument {
            operation: operation.name().to_string(),
            argument: "numeric argument N",
        })
    };

    let outcome = match operation.implementation() {
        Implementation::Unary(f) => f(a.geometry()),
        Implementation::UnaryWithParam(f) => f(a.geometry(), require_n()?),
        Implementation::Binary(f) => f(a.geometry(), require_b()?.geometry()),
        Implementation::BinaryWithParam(f) => {
            f(a.geometry(), require_b()?.geometry(), require_n()?)
        }
        Implementation::Prepared(f) => {
            let b = require_b()?;
            f(cache.prepare(a), b.geometry())
        }
    }?;
    debug!(result = %outcome.metadata(), "operation complete");
    Ok(outcome)
}

/// A registry paired with the prepared-geometry cache of one evaluation
/// context.
///
/// The cache is single-slot and not shared: concurrent evaluations each
/// need their own `Dispatcher`.
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    cache: PreparedCache,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            cache: PreparedCache::new(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn find(&self, name: &str) -> Option<&'r Operation> {
        self.registry.find(name)
    }

    pub fn execute(
        &mut self,
        operation: &Operation,
        a: &Operand,
        b: Option<&Operand>,
        n: Option<f64>,
    ) -> OpResult<Outcome> {
        execute(operation, &mut self.cache, a, b, n)
    }

    pub fn cache(&self) -> &PreparedCache {
        &self.cache
    }
}
