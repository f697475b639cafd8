//! DE-9IM based predicates shared by the plain and prepared operations.
//!
//! Empty operands never reach `geo::Relate`: an empty geometry intersects
//! nothing, and its matrix is built from the other side's dimensions.

use geo::{Geometry, Intersects, Relate};
use geo::relate::IntersectionMatrix;

use crate::error::{OpError, OpResult};
use crate::geometry::without_empty_points;

pub(crate) const CONTAINS: &[&str] = &["T*****FF*"];
pub(crate) const CONTAINS_PROPERLY: &[&str] = &["T**FF*FF*"];
pub(crate) const COVERS: &[&str] = &["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"];

fn matches(matrix: &IntersectionMatrix, pattern: &str) -> OpResult<bool> {
    matrix
        .matches(pattern)
        .map_err(|e| OpError::Relate(format!("{:?}", e)))
}

/// True when the matrix of `a` and `b` matches any of `patterns`.
///
/// Every pattern used here demands a non-empty intersection, so an empty
/// operand never matches.
pub fn relate_matches(a: &Geometry<f64>, b: &Geometry<f64>, patterns: &[&str]) -> OpResult<bool> {
    let (Some(a), Some(b)) = (without_empty_points(a), without_empty_points(b)) else {
        return Ok(false);
    };
    let matrix = a.relate(b.as_ref());
    for pattern in patterns {
        if matches(&matrix, pattern)? {
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn intersects(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    match (without_empty_points(a), without_empty_points(b)) {
        (Some(a), Some(b)) => a.intersects(b.as_ref()),
        _ => false,
    }
}

/// Nine-character DE-9IM string, row-major over interior, boundary and
/// exterior.
fn matrix_string(matrix: &IntersectionMatrix) -> OpResult<String> {
    let mut out = String::with_capacity(9);
    for cell in 0..9 {
        let mut symbol = None;
        for candidate in ['F', '0', '1', '2'] {
            let pattern: String = (0..9)
                .map(|i| if i == cell { candidate } else { '*' })
                .collect();
            if matches(matrix, &pattern)? {
                symbol = Some(candidate);
                break;
            }
        }
        out.push(symbol.ok_or_else(|| OpError::Relate(format!("no dimension for cell {}", cell)))?);
    }
    Ok(out)
}

/// Interior and boundary dimension symbols of a non-empty geometry.
fn dimensions(g: &Geometry<f64>) -> OpResult<(char, char)> {
    let own: Vec<char> = matrix_string(&g.relate(g))?.chars().collect();
    Ok((own[0], own[4]))
}

pub fn relate_matrix(a: &Geometry<f64>, b: &Geometry<f64>) -> OpResult<String> {
    match (without_empty_points(a), without_empty_points(b)) {
        (Some(a), Some(b)) => matrix_string(&a.relate(b.as_ref())),
        (None, Some(b)) => {
            let (interior, boundary) = dimensions(&b)?;
            Ok(format!("FFFFFF{}{}2", interior, boundary))
        }
        (Some(a), None) => {
            let (interior, boundary) = dimensions(&a)?;
            Ok(format!("FF{}FF{}FF2", interior, boundary))
        }
        (None, None) => Ok("FFFFFFFF2".to_string()),
    }
}
