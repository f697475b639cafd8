//! Named geometry operations.
//!
//! Each [`Operation`] pairs a name and description with an
//! [`Implementation`]. The implementation's family fixes how many geometry
//! and numeric arguments the operation takes, so a descriptor can never
//! disagree with its callable.

use std::collections::BTreeMap;

use geo::Geometry;
use tracing::warn;

use crate::error::OpResult;
use crate::functions::BUILTINS;
use crate::outcome::Outcome;
use crate::prepared::PreparedGeometry;

pub type UnaryFn = fn(&Geometry<f64>) -> OpResult<Outcome>;
pub type UnaryWithParamFn = fn(&Geometry<f64>, f64) -> OpResult<Outcome>;
pub type BinaryFn = fn(&Geometry<f64>, &Geometry<f64>) -> OpResult<Outcome>;
pub type BinaryWithParamFn = fn(&Geometry<f64>, &Geometry<f64>, f64) -> OpResult<Outcome>;
pub type PreparedFn = fn(&PreparedGeometry, &Geometry<f64>) -> OpResult<Outcome>;

/// The callable behind an operation, one case per operation family.
#[derive(Clone, Copy)]
pub enum Implementation {
    Unary(UnaryFn),
    UnaryWithParam(UnaryWithParamFn),
    Binary(BinaryFn),
    BinaryWithParam(BinaryWithParamFn),
    /// Binary operation evaluated against a cached prepared form of A.
    Prepared(PreparedFn),
}

impl Implementation {
    pub fn geometry_arity(&self) -> usize {
        match self {
            Self::Unary(_) | Self::UnaryWithParam(_) => 1,
            Self::Binary(_) | Self::BinaryWithParam(_) | Self::Prepared(_) => 2,
        }
    }

    pub fn numeric_arity(&self) -> usize {
        match self {
            Self::UnaryWithParam(_) | Self::BinaryWithParam(_) => 1,
            Self::Unary(_) | Self::Binary(_) | Self::Prepared(_) => 0,
        }
    }
}

/// A registered operation.
#[derive(Clone)]
pub struct Operation {
    name: String,
    description: String,
    implementation: Implementation,
}

impl Operation {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        implementation: Implementation,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            implementation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn implementation(&self) -> Implementation {
        self.implementation
    }

    pub fn geometry_arity(&self) -> usize {
        self.implementation.geometry_arity()
    }

    pub fn numeric_arity(&self) -> usize {
        self.implementation.numeric_arity()
    }

    pub fn is_binary(&self) -> bool {
        self.geometry_arity() == 2
    }

    /// `name A`, then ` B` for binary operations and ` N` when a numeric
    /// parameter is taken.
    pub fn signature(&self) -> String {
        let mut sig = format!("{} A", self.name);
        if self.is_binary() {
            sig.push_str(" B");
        }
        if self.numeric_arity() > 0 {
            sig.push_str(" N");
        }
        sig
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("signature", &self.signature())
            .field("description", &self.description)
            .finish()
    }
}

/// Name to operation mapping. Names are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    operations: BTreeMap<String, Operation>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in operation.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for builtin in BUILTINS {
            match builtin.description {
                Some(description) => {
                    registry.register(builtin.name, description, builtin.implementation);
                }
                None => {
                    registry.register(
                        builtin.name,
                        default_description(builtin.name),
                        builtin.implementation,
                    );
                }
            }
        }
        registry
    }

    /// Add an operation. A name that is already taken is overwritten and the
    /// displaced operation returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        implementation: Implementation,
    ) -> Option<Operation> {
        let operation = Operation::new(name, description, implementation);
        let displaced = self
            .operations
            .insert(operation.name.clone(), operation);
        if let Some(old) = &displaced {
            warn!(name = old.name(), "operation re-registered, replacing previous definition");
        }
        displaced
    }

    /// Register a one-geometry, no-parameter operation with a generated
    /// description.
    pub fn register_unary(&mut self, name: &str, implementation: UnaryFn) -> Option<Operation> {
        self.register(
            name,
            default_description(name),
            Implementation::Unary(implementation),
        )
    }

    pub fn find(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// `<signature> - <description>` for every operation, sorted by name.
    pub fn list(&self) -> Vec<String> {
        self.operations
            .values()
            .map(|op| format!("{} - {}", op.signature(), op.description()))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn default_description(name: &str) -> String {
    format!("computes {} for geometry A", name)
}
