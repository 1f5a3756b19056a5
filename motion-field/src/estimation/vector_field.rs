use std::ops::{Index, IndexMut};

use nalgebra::Vector2;

/// Displacement (dx, dy) of one block between two frames, in pixels
pub type MotionVector = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    vectors: Vec<MotionVector>,
}

impl VectorField {
    pub fn zeros(number_of_blocks: usize) -> Self {
        Self {
            vectors: vec![MotionVector::zeros(); number_of_blocks],
        }
    }

    pub fn from_vec(vectors: Vec<MotionVector>) -> Self {
        Self { vectors }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn as_slice(&self) -> &[MotionVector] {
        &self.vectors
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionVector> + '_ {
        self.vectors.iter()
    }

    pub fn into_vec(self) -> Vec<MotionVector> {
        self.vectors
    }

    pub fn mean(&self) -> MotionVector {
        if self.vectors.is_empty() {
            return MotionVector::zeros();
        }
        self.vectors.iter().sum::<MotionVector>() / self.vectors.len() as f64
    }

    pub fn max_magnitude(&self) -> f64 {
        self.vectors.iter().map(|v| v.norm()).fold(0.0, f64::max)
    }
}

impl Index<usize> for VectorField {
    type Output = MotionVector;

    fn index(&self, k: usize) -> &MotionVector {
        &self.vectors[k]
    }
}

impl IndexMut<usize> for VectorField {
    fn index_mut(&mut self, k: usize) -> &mut MotionVector {
        &mut self.vectors[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let field = VectorField::zeros(4);
        assert_eq!(field.len(), 4);
        assert!(field.iter().all(|v| *v == MotionVector::zeros()));
    }

    #[test]
    fn in_place_updates_do_not_touch_snapshots() {
        let mut field = VectorField::zeros(2);
        let snapshot = field.clone();
        field[1] = MotionVector::new(1.5, -0.5);
        assert_eq!(field[1], MotionVector::new(1.5, -0.5));
        assert_eq!(snapshot[1], MotionVector::zeros());
    }

    #[test]
    fn statistics() {
        let field = VectorField::from_vec(vec![
            MotionVector::new(3.0, 4.0),
            MotionVector::new(1.0, 0.0),
        ]);
        assert_eq!(field.mean(), MotionVector::new(2.0, 2.0));
        assert_eq!(field.max_magnitude(), 5.0);
        assert_eq!(VectorField::zeros(0).mean(), MotionVector::zeros());
    }
}
