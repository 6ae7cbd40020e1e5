use tracing::{info, warn};

use crate::error::{Result, UnfoldError};
use crate::operations::{ConnectedFaces, FlattenTree};
use crate::patch::{PatchBuilder, PatchRecorder};
use crate::topology::{FaceId, MeshQuery};
use crate::tree::{DepthFirst, SpanningStrategy};

/// A patch that failed to flatten.
#[derive(Debug)]
pub struct PatchFailure {
    /// The first face of the failed component, for highlighting.
    pub seed: FaceId,
    /// What went wrong.
    pub error: UnfoldError,
}

/// Outcome of an [`Unfold`] run.
#[derive(Debug)]
pub struct UnfoldReport {
    /// Number of patches committed to the builder.
    pub patches: usize,
    /// Components that failed, with enough context to highlight them.
    pub failures: Vec<PatchFailure>,
}

/// Unfolds a face selection into flat patches.
///
/// The selection is partitioned into connected components; each component
/// gets a spanning tree and is flattened independently. A component is
/// committed to the builder only if it flattens completely, and one bad
/// component never aborts its siblings: failures are collected in the
/// report instead.
pub struct Unfold<'a> {
    selection: Vec<FaceId>,
    strategy: &'a dyn SpanningStrategy,
}

impl<'a> Unfold<'a> {
    /// Creates an `Unfold` operation with the baseline depth-first
    /// spanning strategy.
    #[must_use]
    pub fn new(selection: Vec<FaceId>) -> Self {
        Self {
            selection,
            strategy: &DepthFirst,
        }
    }

    /// Creates an `Unfold` operation with a caller-chosen spanning
    /// strategy.
    #[must_use]
    pub fn with_strategy(selection: Vec<FaceId>, strategy: &'a dyn SpanningStrategy) -> Self {
        Self {
            selection,
            strategy,
        }
    }

    /// Executes the unfold, committing each successful patch to `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the partition itself fails (a selected
    /// face missing from the mesh). Per-component geometry and topology
    /// failures end up in the report, not in `Err`.
    pub fn execute(
        &self,
        mesh: &dyn MeshQuery,
        builder: &mut dyn PatchBuilder,
    ) -> Result<UnfoldReport> {
        let components = ConnectedFaces::new(self.selection.clone()).execute(mesh)?;
        info!(
            faces = self.selection.len(),
            components = components.len(),
            "unfolding selection"
        );

        let mut report = UnfoldReport {
            patches: 0,
            failures: Vec::new(),
        };
        for component in components {
            let Some(&seed) = component.first() else {
                continue;
            };
            match self.flatten_component(&component, mesh) {
                Ok(recorder) => {
                    recorder.replay(builder);
                    report.patches += 1;
                }
                Err(error) => {
                    warn!(?seed, %error, "patch failed to flatten");
                    report.failures.push(PatchFailure { seed, error });
                }
            }
        }
        Ok(report)
    }

    /// Flattens one component into a buffer, so nothing is committed on
    /// failure.
    fn flatten_component(
        &self,
        component: &[FaceId],
        mesh: &dyn MeshQuery,
    ) -> Result<PatchRecorder> {
        let tree = self.strategy.build(component, mesh)?;
        let mut recorder = PatchRecorder::new();
        FlattenTree::new(&tree).execute(mesh, &mut recorder)?;
        Ok(recorder)
    }
}
