pub mod edge;
pub mod face;
pub mod mesh;
pub mod query;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use mesh::PolygonMesh;
pub use query::MeshQuery;
pub use vertex::{VertexData, VertexId};
