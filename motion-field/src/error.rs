use thiserror::Error;

/// Rejected estimator setups. All of these are detected before the first sweep runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("block size must be positive")]
    ZeroBlockSize,

    #[error("frame of {width}x{height} pixels holds no complete {block_size}x{block_size} block")]
    FrameTooSmall {
        width: usize,
        height: usize,
        block_size: usize,
    },

    #[error("motion estimation needs at least 2 frames, got {0}")]
    TooFewFrames(usize),

    #[error("frame {index} is {actual:?} but the sequence is {expected:?} (width, height)")]
    FrameSizeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("{name} must be finite and positive, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}
