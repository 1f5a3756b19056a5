use nalgebra::Point2;

use crate::error::ConfigError;

const AXIS_WEIGHT: f64 = 1.0;
const DIAGONAL_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    Axis,
    Diagonal,
}

impl Adjacency {
    pub fn weight(self) -> f64 {
        match self {
            Adjacency::Axis => AXIS_WEIGHT,
            Adjacency::Diagonal => DIAGONAL_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    pub adjacency: Adjacency,
}

impl Neighbor {
    pub fn weight(&self) -> f64 {
        self.adjacency.weight()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub block_size: usize,
    pub width_in_blocks: usize,
    pub height_in_blocks: usize,
}

impl GridGeometry {
    pub fn number_of_blocks(&self) -> usize {
        self.width_in_blocks * self.height_in_blocks
    }

    pub fn block_center(&self, k: usize) -> Point2<f64> {
        let row = k / self.width_in_blocks;
        let col = k % self.width_in_blocks;
        let half = self.block_size as f64 / 2.0;
        Point2::new(
            (col * self.block_size) as f64 + half,
            (row * self.block_size) as f64 + half,
        )
    }
}

// Row-major from the upper left corner. Pixels past the last complete block are not covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    block_size: usize,
    width_in_blocks: usize,
    height_in_blocks: usize,
}

impl BlockGrid {
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self, ConfigError> {
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }

        let width_in_blocks = width / block_size;
        let height_in_blocks = height / block_size;
        if width_in_blocks == 0 || height_in_blocks == 0 {
            return Err(ConfigError::FrameTooSmall { width, height, block_size });
        }

        Ok(Self {
            block_size,
            width_in_blocks,
            height_in_blocks,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn width_in_blocks(&self) -> usize {
        self.width_in_blocks
    }

    pub fn height_in_blocks(&self) -> usize {
        self.height_in_blocks
    }

    pub fn number_of_blocks(&self) -> usize {
        self.width_in_blocks * self.height_in_blocks
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry {
            block_size: self.block_size,
            width_in_blocks: self.width_in_blocks,
            height_in_blocks: self.height_in_blocks,
        }
    }

    pub fn blocks(&self) -> std::ops::Range<usize> {
        0..self.number_of_blocks()
    }

    pub fn block_index(&self, row: usize, col: usize) -> usize {
        row * self.width_in_blocks + col
    }

    pub fn row_col(&self, k: usize) -> (usize, usize) {
        (k / self.width_in_blocks, k % self.width_in_blocks)
    }

    pub fn block_origin(&self, k: usize) -> (usize, usize) {
        let (row, col) = self.row_col(k);
        (col * self.block_size, row * self.block_size)
    }

    /// The 4- and diagonally-connected blocks around `k` that lie inside the grid.
    ///
    /// Neighbors come in raster order of the surrounding 3x3 window: above-left, above,
    /// above-right, left, right, below-left, below, below-right. Interior blocks have 8,
    /// blocks on an edge 5 and corner blocks 3.
    pub fn neighbor_window(&self, k: usize) -> Vec<Neighbor> {
        let (row, col) = self.row_col(k);
        let (row, col) = (row as isize, col as isize);
        let rows = self.height_in_blocks as isize;
        let cols = self.width_in_blocks as isize;

        let mut neighbors = Vec::with_capacity(8);
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let (r, c) = (row + dr, col + dc);
                if r < 0 || r >= rows || c < 0 || c >= cols {
                    continue;
                }

                let adjacency = if dr == 0 || dc == 0 { Adjacency::Axis } else { Adjacency::Diagonal };
                neighbors.push(Neighbor {
                    index: self.block_index(r as usize, c as usize),
                    adjacency,
                });
            }
        }

        neighbors
    }
}
