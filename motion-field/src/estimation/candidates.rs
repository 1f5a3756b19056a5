use super::{block_grid::Neighbor, vector_field::{MotionVector, VectorField}};

/// Proposes the alternative vectors a block chooses from during one sweep.
///
/// For block `k` the list is, in order:
/// 1. its vector from the start of the iteration (temporal anchor)
/// 2. the current vector of every neighbor, in window order
/// 3. the weighted average of those neighbor vectors (only when there are neighbors)
/// 4. its own current vector moved by `step` to the right, left, down and up
///
/// The order matters: the solver keeps the first of several equally cheap candidates.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator {
    step: f64,
}

impl CandidateGenerator {
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    pub fn candidate_count(neighbor_count: usize) -> usize {
        let average = usize::from(neighbor_count > 0);
        1 + neighbor_count + average + 4
    }

    pub fn candidates(
        &self,
        k: usize,
        neighbors: &[Neighbor],
        current: &VectorField,
        snapshot: &VectorField,
    ) -> Vec<MotionVector> {
        let mut candidates = Vec::with_capacity(Self::candidate_count(neighbors.len()));

        candidates.push(snapshot[k]);
        candidates.extend(neighbors.iter().map(|n| current[n.index]));

        if let Some(average) = weighted_average(neighbors.iter().map(|n| (current[n.index], n.weight()))) {
            candidates.push(average);
        }

        let own = current[k];
        candidates.push(own + MotionVector::new(self.step, 0.0));
        candidates.push(own - MotionVector::new(self.step, 0.0));
        candidates.push(own + MotionVector::new(0.0, self.step));
        candidates.push(own - MotionVector::new(0.0, self.step));

        candidates
    }
}

// Σ w·v / Σ w, `None` without positive weight
pub fn weighted_average(weighted: impl IntoIterator<Item = (MotionVector, f64)>) -> Option<MotionVector> {
    let (sum, total_weight) = weighted
        .into_iter()
        .fold((MotionVector::zeros(), 0.0), |(sum, total), (v, w)| (sum + v * w, total + w));

    (total_weight > 0.0).then(|| sum / total_weight)
}
