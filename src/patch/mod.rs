mod triangulate;

pub use triangulate::{TriangleMesh, TriangulatingPatchBuilder};

use crate::math::Point3;
use crate::topology::FaceId;

/// Consumer of flattened face geometry.
///
/// The flattener calls [`add_face`] once per boundary or hole cycle, in
/// tree-traversal order. The first call for a given face carries its outer
/// boundary; any further calls for the same face carry hole cycles.
///
/// [`add_face`]: Self::add_face
pub trait PatchBuilder {
    /// Receives one flattened cycle of a face.
    fn add_face(&mut self, face: FaceId, cycle: &[Point3]);
}

/// One recorded cycle of a flattened face.
#[derive(Debug, Clone)]
pub struct FlatCycle {
    /// The source face.
    pub face: FaceId,
    /// The flattened cycle vertices, in traversal order.
    pub points: Vec<Point3>,
}

/// A [`PatchBuilder`] that buffers everything it receives.
///
/// Used for per-component atomicity: flatten into a recorder, then
/// [`replay`] into the real builder only once the whole component
/// succeeded. Also the inspection probe the tests use.
///
/// [`replay`]: Self::replay
#[derive(Debug, Default)]
pub struct PatchRecorder {
    cycles: Vec<FlatCycle>,
}

impl PatchRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded cycles in arrival order.
    #[must_use]
    pub fn cycles(&self) -> &[FlatCycle] {
        &self.cycles
    }

    /// Number of recorded cycles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Feeds every recorded cycle into `target`, in arrival order.
    pub fn replay(&self, target: &mut dyn PatchBuilder) {
        for cycle in &self.cycles {
            target.add_face(cycle.face, &cycle.points);
        }
    }
}

impl PatchBuilder for PatchRecorder {
    fn add_face(&mut self, face: FaceId, cycle: &[Point3]) {
        self.cycles.push(FlatCycle {
            face,
            points: cycle.to_vec(),
        });
    }
}
