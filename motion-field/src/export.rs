use nalgebra::Point2;

use crate::estimation::{
    block_grid::GridGeometry,
    vector_field::VectorField,
};

/// Output canvas scale of the arrow rendering: 32 px per 8 px block
pub const DEFAULT_RENDER_SCALE: f64 = 4.0;
/// Vectors shorter than this are drawn as a still marker instead of an arrow
pub const STILL_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldExport {
    pub transition: usize,
    pub field: VectorField,
    pub geometry: GridGeometry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Arrow { from: Point2<f64>, to: Point2<f64> },
    Still { at: Point2<f64> },
}

impl FieldExport {
    pub fn new(transition: usize, field: VectorField, geometry: GridGeometry) -> Self {
        Self {
            transition,
            field,
            geometry,
        }
    }

    pub fn block_center(&self, k: usize) -> Point2<f64> {
        self.geometry.block_center(k)
    }

    pub fn markers(&self, scale: f64) -> Vec<Marker> {
        self.field
            .iter()
            .enumerate()
            .map(|(k, v)| {
                let from = self.block_center(k) * scale;
                if v.norm() < STILL_THRESHOLD {
                    Marker::Still { at: from }
                } else {
                    Marker::Arrow { from, to: from + v * scale }
                }
            })
            .collect()
    }
}

/// Receives finished fields, once per transition and in transition order.
///
/// Exporting cannot fail from the estimator's point of view. Implementations deal with
/// their own errors.
pub trait FieldExporter {
    fn export(&mut self, export: FieldExport);
}

impl FieldExporter for Vec<FieldExport> {
    fn export(&mut self, export: FieldExport) {
        self.push(export);
    }
}
