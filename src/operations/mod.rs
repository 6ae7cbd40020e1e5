mod connected_faces;
mod flatten;
mod unfold;

pub use connected_faces::ConnectedFaces;
pub use flatten::FlattenTree;
pub use unfold::{PatchFailure, Unfold, UnfoldReport};
