//! Construction-time settings shared by both tree variants.

use crate::{KdError, Result};

/// Default tolerance for boundary comparisons.
/// Points within this distance outside a query rectangle are still reported.
pub const DEFAULT_EPS: f64 = 1e-9;

/// Settings fixed when a tree is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdConfig {
    eps: f64,
}

impl Default for KdConfig {
    fn default() -> Self {
        Self { eps: DEFAULT_EPS }
    }
}

impl KdConfig {
    /// Creates a configuration with [`DEFAULT_EPS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the boundary tolerance.
    ///
    /// Zero selects exact comparisons. Negative, NaN and infinite values are
    /// rejected with [`KdError::InvalidEpsilon`].
    pub fn with_eps(mut self, eps: f64) -> Result<Self> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(KdError::InvalidEpsilon(eps));
        }
        self.eps = eps;
        Ok(self)
    }

    /// Returns the boundary tolerance.
    #[inline]
    pub fn eps(&self) -> f64 {
        self.eps
    }
}
