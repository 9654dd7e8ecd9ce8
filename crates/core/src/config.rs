//! Optimizer configuration.

use crate::balancer::DEFAULT_MAX_ROUNDS;
use crate::error::{ensure_non_negative, ensure_positive, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default blade kerf in millimeters.
pub const DEFAULT_KERF: f64 = 3.0;

/// Default length of synthesized stock in millimeters.
pub const DEFAULT_STOCK_LENGTH: f64 = 3600.0;

/// Configuration parameters for cutting plan optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Material lost to each cut between two consecutive parts.
    pub kerf: f64,

    /// Length of the stock pieces synthesized when supplied stock runs out.
    pub default_stock_length: f64,

    /// Upper bound on waste balancing rounds.
    pub max_balance_rounds: usize,

    /// Whether to run the waste balancing pass at all.
    pub balance_waste: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kerf: DEFAULT_KERF,
            default_stock_length: DEFAULT_STOCK_LENGTH,
            max_balance_rounds: DEFAULT_MAX_ROUNDS,
            balance_waste: true,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kerf.
    pub fn with_kerf(mut self, kerf: f64) -> Self {
        self.kerf = kerf;
        self
    }

    /// Sets the default stock length.
    pub fn with_default_stock_length(mut self, length: f64) -> Self {
        self.default_stock_length = length;
        self
    }

    /// Sets the maximum number of balancing rounds.
    pub fn with_max_balance_rounds(mut self, rounds: usize) -> Self {
        self.max_balance_rounds = rounds;
        self
    }

    /// Enables or disables the balancing pass.
    pub fn with_balancing(mut self, enabled: bool) -> Self {
        self.balance_waste = enabled;
        self
    }

    /// Checks kerf and default stock length.
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("kerf", self.kerf)?;
        ensure_positive("default stock length", self.default_stock_length)
    }
}
