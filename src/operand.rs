use std::sync::atomic::{AtomicU64, Ordering};

use geo::Geometry;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an [`Operand`].
///
/// Prepared geometries are cached against this id, never against an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(u64);

impl GeometryId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An immutable geometry argument with an identity.
///
/// Clones share the id; since there is no mutable access, equal ids always
/// mean equal content.
#[derive(Debug, Clone)]
pub struct Operand {
    id: GeometryId,
    geometry: Geometry<f64>,
}

impl Operand {
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            id: GeometryId::next(),
            geometry,
        }
    }

    pub fn id(&self) -> GeometryId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    pub fn into_geometry(self) -> Geometry<f64> {
        self.geometry
    }
}

impl From<Geometry<f64>> for Operand {
    fn from(geometry: Geometry<f64>) -> Self {
        Self::new(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;

    #[test]
    fn test_ids_are_unique_per_construction() {
        let a = Operand::new(point!(x: 1.0, y: 1.0).into());
        let b = Operand::new(point!(x: 1.0, y: 1.0).into());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.geometry(), b.geometry());
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = Operand::new(point!(x: 1.0, y: 1.0).into());
        assert_eq!(a.clone().id(), a.id());
    }
}
