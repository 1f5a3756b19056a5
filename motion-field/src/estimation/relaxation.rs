use itertools::Itertools;
use rayon::prelude::*;

use super::{
    block_grid::BlockGrid,
    candidates::CandidateGenerator,
    cost::CostEvaluator,
    vector_field::{MotionVector, VectorField},
};
use crate::{
    config::{EstimatorConfig, UpdateScheme},
    error::ConfigError,
    export::{FieldExport, FieldExporter},
    frame::Frame,
};

// Seed, sweep `iterations` times, export. Repeated for every frame transition.
pub struct RelaxationSolver<'a, F: Frame> {
    frames: &'a [F],
    grid: BlockGrid,
    config: EstimatorConfig,
    generator: CandidateGenerator,
}

impl<'a, F: Frame + Sync> RelaxationSolver<'a, F> {
    pub fn new(frames: &'a [F], config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let Some(first) = frames.first() else {
            return Err(ConfigError::TooFewFrames(0));
        };
        if frames.len() < 2 {
            return Err(ConfigError::TooFewFrames(frames.len()));
        }

        let expected = (first.width(), first.height());
        for (index, frame) in frames.iter().enumerate().skip(1) {
            let actual = (frame.width(), frame.height());
            if actual != expected {
                return Err(ConfigError::FrameSizeMismatch { index, expected, actual });
            }
        }

        let grid = BlockGrid::new(expected.0, expected.1, config.block_size)?;
        let generator = CandidateGenerator::new(config.step);

        Ok(Self {
            frames,
            grid,
            config,
            generator,
        })
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn transition_count(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn evaluator(&self, t: usize) -> CostEvaluator<'_, F> {
        CostEvaluator::new(
            &self.frames[t],
            &self.frames[t + 1],
            &self.grid,
            self.config.nu,
            self.config.lambda,
            self.config.lambda_temporal,
        )
    }

    pub fn solve<E: FieldExporter + ?Sized>(&self, exporter: &mut E) {
        let mut seed = VectorField::zeros(self.grid.number_of_blocks());

        for t in 0..self.transition_count() {
            let field = self.solve_transition(t, seed);
            seed = field.clone();

            log::debug!("Exporting motion field of transition {t}");
            exporter.export(FieldExport::new(t, field, self.grid.geometry()));
        }

        log::info!("Motion estimation finished after {} transitions", self.transition_count());
    }

    pub fn solve_transition(&self, t: usize, seed: VectorField) -> VectorField {
        let seed_mean = seed.mean();
        log::debug!(
            "Seeding transition {t} with {} blocks, mean motion ({:.3}, {:.3})",
            seed.len(),
            seed_mean.x,
            seed_mean.y
        );

        let evaluator = self.evaluator(t);
        let mut field = seed;
        for iteration in 0..self.config.iterations {
            self.sweep(&evaluator, &mut field);
            log::trace!("Transition {t} sweep {iteration}: max motion {:.3}", field.max_magnitude());
        }

        let mean = field.mean();
        log::debug!(
            "Transition {t} converged: mean motion ({:.3}, {:.3}), max {:.3}, energy {:.3}",
            mean.x,
            mean.y,
            field.max_magnitude(),
            self.field_energy(&evaluator, &field)
        );

        field
    }

    pub fn sweep(&self, evaluator: &CostEvaluator<'_, F>, field: &mut VectorField) {
        let snapshot = field.clone();

        match self.config.scheme {
            UpdateScheme::GaussSeidel => {
                for k in self.grid.blocks() {
                    field[k] = self.best_candidate(evaluator, k, field, &snapshot);
                }
            }
            UpdateScheme::Jacobi => {
                let updated = self
                    .grid
                    .blocks()
                    .into_par_iter()
                    .map(|k| self.best_candidate(evaluator, k, &snapshot, &snapshot))
                    .collect();
                *field = VectorField::from_vec(updated);
            }
        }
    }

    /// Cheapest candidate for block `k`; the earliest one wins a tie.
    fn best_candidate(
        &self,
        evaluator: &CostEvaluator<'_, F>,
        k: usize,
        field: &VectorField,
        snapshot: &VectorField,
    ) -> MotionVector {
        let window = self.grid.neighbor_window(k);
        let candidates = self.generator.candidates(k, &window, field, snapshot);

        let best = candidates
            .iter()
            .map(|v| evaluator.cost(k, v, &window, field, snapshot))
            .position_min_by(|a, b| a.total_cmp(b))
            .unwrap_or(0);

        candidates[best]
    }

    fn field_energy(&self, evaluator: &CostEvaluator<'_, F>, field: &VectorField) -> f64 {
        self.grid
            .blocks()
            .map(|k| evaluator.cost(k, &field[k], &self.grid.neighbor_window(k), field, field))
            .sum()
    }
}
