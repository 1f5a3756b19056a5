pub mod block_grid;
pub mod candidates;
pub mod cost;
pub mod relaxation;
pub mod vector_field;
