mod frame;

pub use frame::PlaneFrame;

use crate::error::GeometryError;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalizes a vector, rejecting zero-length input.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the vector is shorter
/// than [`TOLERANCE`].
pub fn unit(v: Vector3) -> Result<Vector3, GeometryError> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector);
    }
    Ok(v / len)
}
