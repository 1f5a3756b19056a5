use itertools::iproduct;

use super::{
    block_grid::{BlockGrid, Neighbor},
    vector_field::{MotionVector, VectorField},
};
use crate::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub data: f64,
    pub spatial: f64,
    pub temporal: f64,
    pub total: f64,
}

/// Scores candidate vectors for the blocks of one frame transition.
///
/// `E(k, v) = D(k, v)² + λ·S(k, v) + λ_T·T(k, v)^ν`
///
/// Evaluation only reads the frames and the fields it is given.
pub struct CostEvaluator<'a, F: Frame> {
    previous: &'a F,
    current: &'a F,
    grid: &'a BlockGrid,
    nu: f64,
    lambda: f64,
    lambda_temporal: f64,
}

impl<'a, F: Frame> CostEvaluator<'a, F> {
    pub fn new(previous: &'a F, current: &'a F, grid: &'a BlockGrid, nu: f64, lambda: f64, lambda_temporal: f64) -> Self {
        Self {
            previous,
            current,
            grid,
            nu,
            lambda,
            lambda_temporal,
        }
    }

    // Pixel positions are recomputed from the block origin every time
    pub fn data_term(&self, k: usize, v: &MotionVector) -> f64 {
        let (block_x, block_y) = self.grid.block_origin(k);
        let block_size = self.grid.block_size();

        iproduct!(0..block_size, 0..block_size)
            .map(|(i, j)| {
                let x = (block_x + j) as f64;
                let y = (block_y + i) as f64;
                self.current.sample(x, y) - self.previous.sample(x + v.x, y + v.y)
            })
            .sum()
    }

    pub fn spatial_coherence(&self, v: &MotionVector, neighbors: &[Neighbor], field: &VectorField) -> f64 {
        neighbors
            .iter()
            .map(|n| n.weight() * (v - field[n.index]).norm().powf(self.nu))
            .sum()
    }

    pub fn temporal_coherence(&self, k: usize, v: &MotionVector, snapshot: &VectorField) -> f64 {
        (snapshot[k] - v).norm()
    }

    pub fn breakdown(
        &self,
        k: usize,
        v: &MotionVector,
        neighbors: &[Neighbor],
        field: &VectorField,
        snapshot: &VectorField,
    ) -> CostBreakdown {
        let data = self.data_term(k, v);
        let spatial = self.spatial_coherence(v, neighbors, field);
        let temporal = self.temporal_coherence(k, v, snapshot);
        let total = data * data + self.lambda * spatial + self.lambda_temporal * temporal.powf(self.nu);

        CostBreakdown {
            data,
            spatial,
            temporal,
            total,
        }
    }

    pub fn cost(
        &self,
        k: usize,
        v: &MotionVector,
        neighbors: &[Neighbor],
        field: &VectorField,
        snapshot: &VectorField,
    ) -> f64 {
        self.breakdown(k, v, neighbors, field, snapshot).total
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    use super::*;

    fn textured(width: usize, height: usize) -> DMatrix<f64> {
        DMatrix::from_fn(height, width, |y, x| ((x * 7 + y * 13) % 11) as f64 / 10.0)
    }

    #[test]
    fn zero_motion_on_identical_frames_costs_nothing() {
        let frame = textured(24, 16);
        let grid = BlockGrid::new(24, 16, 8).unwrap();
        let evaluator = CostEvaluator::new(&frame, &frame, &grid, 1.3, 2.0, 1.0);
        let field = VectorField::zeros(grid.number_of_blocks());

        for k in grid.blocks() {
            let window = grid.neighbor_window(k);
            assert_eq!(evaluator.data_term(k, &MotionVector::zeros()), 0.0);
            assert_eq!(evaluator.cost(k, &MotionVector::zeros(), &window, &field, &field), 0.0);
        }
    }

    #[test]
    fn data_term_is_a_signed_sum() {
        // previous is constant 1, current is constant 3: every pixel contributes +2
        let previous = DMatrix::from_element(8, 8, 1.0);
        let current = DMatrix::from_element(8, 8, 3.0);
        let grid = BlockGrid::new(8, 8, 8).unwrap();
        let evaluator = CostEvaluator::new(&previous, &current, &grid, 1.3, 2.0, 1.0);

        assert_relative_eq!(evaluator.data_term(0, &MotionVector::zeros()), 128.0);
        // displacement far outside the frame is clamped, not an error
        assert_relative_eq!(evaluator.data_term(0, &MotionVector::new(-50.0, 90.0)), 128.0);

        let field = VectorField::zeros(1);
        assert_relative_eq!(evaluator.cost(0, &MotionVector::zeros(), &[], &field, &field), 128.0 * 128.0);
    }

    #[test]
    fn data_term_follows_a_horizontal_ramp() {
        let previous = DMatrix::from_fn(8, 16, |_, x| x as f64);
        let current = DMatrix::from_fn(8, 16, |_, x| x as f64 + 1.0);
        let grid = BlockGrid::new(16, 8, 8).unwrap();
        let evaluator = CostEvaluator::new(&previous, &current, &grid, 1.3, 2.0, 1.0);

        assert_relative_eq!(evaluator.data_term(0, &MotionVector::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(evaluator.data_term(0, &MotionVector::new(0.5, 0.0)), 32.0);
        // vertical motion does not change a horizontal ramp
        assert_relative_eq!(evaluator.data_term(0, &MotionVector::new(1.0, 3.0)), 0.0);
    }

    #[test]
    fn spatial_term_weights_diagonals_by_half() {
        let frame = textured(16, 16);
        let grid = BlockGrid::new(16, 16, 8).unwrap();
        let evaluator = CostEvaluator::new(&frame, &frame, &grid, 1.0, 1.0, 1.0);
        let field = VectorField::from_vec(vec![
            MotionVector::zeros(),
            MotionVector::new(1.0, 0.0),
            MotionVector::new(0.0, 2.0),
            MotionVector::new(3.0, 4.0),
        ]);

        // block 0: right (axis), below (axis), below-right (diagonal)
        let window = grid.neighbor_window(0);
        let spatial = evaluator.spatial_coherence(&MotionVector::zeros(), &window, &field);
        assert_relative_eq!(spatial, 1.0 + 2.0 + 0.5 * 5.0);
    }

    #[test]
    fn single_block_has_no_spatial_cost() {
        let frame = textured(8, 8);
        let grid = BlockGrid::new(8, 8, 8).unwrap();
        let evaluator = CostEvaluator::new(&frame, &frame, &grid, 1.3, 2.0, 1.0);
        let field = VectorField::zeros(1);
        assert_eq!(evaluator.spatial_coherence(&MotionVector::new(4.0, -2.0), &[], &field), 0.0);
    }

    #[test]
    fn temporal_term_uses_exponent_in_total() {
        let frame = DMatrix::from_element(8, 8, 0.5);
        let grid = BlockGrid::new(8, 8, 8).unwrap();
        let evaluator = CostEvaluator::new(&frame, &frame, &grid, 1.3, 2.0, 3.0);
        let snapshot = VectorField::zeros(1);
        let v = MotionVector::new(3.0, 4.0);

        let breakdown = evaluator.breakdown(0, &v, &[], &snapshot, &snapshot);
        assert_relative_eq!(breakdown.data, 0.0);
        assert_relative_eq!(breakdown.temporal, 5.0);
        assert_relative_eq!(breakdown.total, 3.0 * 5.0_f64.powf(1.3));
    }
}
