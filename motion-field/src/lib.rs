mod config;
mod error;
mod estimation;
mod export;
mod frame;
mod preprocess;
mod utils;

pub use config::{
    EstimatorConfig, UpdateScheme, DEFAULT_BLOCK_SIZE, DEFAULT_ITERATIONS, DEFAULT_LAMBDA, DEFAULT_LAMBDA_TEMPORAL,
    DEFAULT_NU, DEFAULT_STEP,
};
pub use error::ConfigError;
pub use estimation::{
    block_grid::{Adjacency, BlockGrid, GridGeometry, Neighbor},
    candidates::{weighted_average, CandidateGenerator},
    cost::{CostBreakdown, CostEvaluator},
    relaxation::RelaxationSolver,
    vector_field::{MotionVector, VectorField},
};
pub use export::{FieldExport, FieldExporter, Marker, DEFAULT_RENDER_SCALE, STILL_THRESHOLD};
pub use frame::Frame;
pub use preprocess::preprocess_image;
pub use utils::gray_to_dmatrix;

pub struct MotionEstimator {
    config: EstimatorConfig,
}

impl MotionEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn estimate<F: Frame + Sync>(&self, frames: &[F]) -> Result<Vec<FieldExport>, ConfigError> {
        let mut exports = Vec::with_capacity(frames.len().saturating_sub(1));
        self.estimate_into(frames, &mut exports)?;
        Ok(exports)
    }

    pub fn estimate_into<F, E>(&self, frames: &[F], exporter: &mut E) -> Result<(), ConfigError>
    where
        F: Frame + Sync,
        E: FieldExporter + ?Sized,
    {
        let solver = RelaxationSolver::new(frames, self.config.clone())?;
        log::info!(
            "Estimating motion over {} transitions on a {}x{} block grid",
            solver.transition_count(),
            solver.grid().width_in_blocks(),
            solver.grid().height_in_blocks()
        );

        solver.solve(exporter);
        Ok(())
    }
}

impl Default for MotionEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}
