use crate::error::ConfigError;

pub const DEFAULT_BLOCK_SIZE: usize = 8;
pub const DEFAULT_ITERATIONS: usize = 8;
/// Exponent applied to the spatial and temporal vector distances
pub const DEFAULT_NU: f64 = 1.3;
pub const DEFAULT_LAMBDA: f64 = 2.0;
pub const DEFAULT_LAMBDA_TEMPORAL: f64 = 1.0;
pub const DEFAULT_STEP: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateScheme {
    #[default]
    GaussSeidel,
    Jacobi,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub block_size: usize,
    /// Sweeps per frame transition. This is the only stopping rule.
    pub iterations: usize,
    pub nu: f64,
    pub lambda: f64,
    pub lambda_temporal: f64,
    pub step: f64,
    pub scheme: UpdateScheme,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            iterations: DEFAULT_ITERATIONS,
            nu: DEFAULT_NU,
            lambda: DEFAULT_LAMBDA,
            lambda_temporal: DEFAULT_LAMBDA_TEMPORAL,
            step: DEFAULT_STEP,
            scheme: UpdateScheme::GaussSeidel,
        }
    }
}

impl EstimatorConfig {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_nu(mut self, nu: f64) -> Self {
        self.nu = nu;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_lambda_temporal(mut self, lambda_temporal: f64) -> Self {
        self.lambda_temporal = lambda_temporal;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_scheme(mut self, scheme: UpdateScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        let weights = [
            ("nu", self.nu),
            ("lambda", self.lambda),
            ("lambda_temporal", self.lambda_temporal),
            ("step", self.step),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        Ok(())
    }
}
