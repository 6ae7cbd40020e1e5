//! Unfolds an open box and prints the flattened layout.
//!
//! Usage:
//! ```text
//! cargo run --example unfold_box
//! ```
//!
//! The box has no top face, so the patch unfolds into a plus-shaped cross
//! of five unit squares. The layout is printed cycle by cycle, followed by
//! the triangulated mesh statistics.

use unfolder::operations::Unfold;
use unfolder::patch::TriangulatingPatchBuilder;
use unfolder::topology::PolygonMesh;
use unfolder::Result;

use nalgebra::Point3;

fn main() -> Result<()> {
    // Default: INFO for unfolder. Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("unfolder=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut mesh = PolygonMesh::new();
    let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
    let v: Vec<_> = [
        p(0.0, 0.0, 0.0),
        p(1.0, 0.0, 0.0),
        p(1.0, 1.0, 0.0),
        p(0.0, 1.0, 0.0),
        p(0.0, 0.0, 1.0),
        p(1.0, 0.0, 1.0),
        p(1.0, 1.0, 1.0),
        p(0.0, 1.0, 1.0),
    ]
    .into_iter()
    .map(|q| mesh.add_vertex(q))
    .collect();

    // Outward-wound sides and bottom; the top stays open.
    let quads = [
        [0, 3, 2, 1], // bottom
        [0, 1, 5, 4], // front
        [2, 3, 7, 6], // back
        [1, 2, 6, 5], // right
        [3, 0, 4, 7], // left
    ];
    for q in quads {
        mesh.add_face(&[v[q[0]], v[q[1]], v[q[2]], v[q[3]]])?;
    }

    let selection: Vec<_> = mesh.face_ids().collect();
    let mut builder = TriangulatingPatchBuilder::new();
    let report = Unfold::new(selection).execute(&mesh, &mut builder)?;

    println!("unfolded {} patch(es)", report.patches);
    for failure in &report.failures {
        println!("failed near face {:?}: {}", failure.seed, failure.error);
    }

    println!("{} polygon(s) in the layout", builder.polygon_count());
    let triangles = builder.into_mesh()?;
    println!(
        "triangulated layout: {} vertices, {} triangles",
        triangles.vertices.len(),
        triangles.indices.len()
    );
    for (i, triangle) in triangles.indices.iter().enumerate() {
        let [a, b, c] = triangle.map(|idx| triangles.vertices[idx as usize]);
        println!(
            "  t{i}: ({:.2}, {:.2}) ({:.2}, {:.2}) ({:.2}, {:.2})",
            a.x, a.z, b.x, b.z, c.x, c.z
        );
    }
    Ok(())
}
