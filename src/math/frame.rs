use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// A 2D coordinate system embedded in 3D space.
///
/// Defined by an origin point and two orthogonal unit vectors `e1`, `e2`
/// spanning a plane. Points on the plane are addressed by `(u, v)`
/// coordinates: `P(u, v) = origin + u * e1 + v * e2`.
#[derive(Debug, Clone)]
pub struct PlaneFrame {
    origin: Point3,
    e1: Vector3,
    e2: Vector3,
}

impl PlaneFrame {
    /// Creates a new frame from an origin and two axis vectors.
    ///
    /// The axes are normalized; they are expected to be orthogonal
    /// (callers construct `e2` from a cross product).
    ///
    /// # Errors
    ///
    /// Returns an error if either axis is zero-length, or if the axes
    /// are parallel (degenerate frame).
    pub fn new(origin: Point3, e1: Vector3, e2: Vector3) -> Result<Self> {
        let e1_len = e1.norm();
        if e1_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let e2_len = e2.norm();
        if e2_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let e1 = e1 / e1_len;
        let e2 = e2 / e2_len;

        if e1.cross(&e2).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("frame axes are parallel".into()).into());
        }

        Ok(Self { origin, e1, e2 })
    }

    /// Projects a point onto the frame, returning its `(u, v)` coordinates.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let d = point - self.origin;
        Point2::new(d.dot(&self.e1), d.dot(&self.e2))
    }

    /// Embeds `(u, v)` plane coordinates back into 3D space.
    #[must_use]
    pub fn to_global(&self, local: &Point2) -> Point3 {
        self.origin + self.e1 * local.x + self.e2 * local.y
    }

    /// Returns the origin of the frame.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the first axis.
    #[must_use]
    pub fn e1(&self) -> &Vector3 {
        &self.e1
    }

    /// Returns the second axis.
    #[must_use]
    pub fn e2(&self) -> &Vector3 {
        &self.e2
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn axes_are_normalized() {
        let frame = PlaneFrame::new(p(0.0, 0.0, 0.0), v(3.0, 0.0, 0.0), v(0.0, 0.0, 5.0)).unwrap();
        assert_relative_eq!(frame.e1().norm(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(frame.e2().norm(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn zero_axis_is_rejected() {
        let result = PlaneFrame::new(p(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn parallel_axes_are_rejected() {
        let result = PlaneFrame::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn local_global_round_trip() {
        let frame =
            PlaneFrame::new(p(1.0, 2.0, 3.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        let point = p(4.0, 6.0, 3.0);
        let local = frame.to_local(&point);
        let back = frame.to_global(&local);
        assert_relative_eq!(back, point, epsilon = TOLERANCE);
    }

    #[test]
    fn to_local_projects_from_origin() {
        let frame =
            PlaneFrame::new(p(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 0.0, 1.0)).unwrap();
        let local = frame.to_local(&p(1.0, 2.5, -1.0));
        assert_relative_eq!(local.x, 2.5, epsilon = TOLERANCE);
        assert_relative_eq!(local.y, -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn out_of_plane_component_is_dropped() {
        let frame =
            PlaneFrame::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)).unwrap();
        let local = frame.to_local(&p(2.0, 3.0, 7.0));
        assert_relative_eq!(local.x, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(local.y, 3.0, epsilon = TOLERANCE);
    }
}
