//! The cutting plan optimizer: validation, allocation, balancing, finalization.

use std::collections::HashSet;

use crate::allocator::allocate;
use crate::balancer::{balance, BalanceReport};
use crate::config::OptimizerConfig;
use crate::error::{ensure_positive, Error, Result};
use crate::layout::finalize;
use crate::model::{Part, StockPiece};
use crate::plan::Plan;

/// Computes cutting plans with a fixed configuration.
///
/// Every call works on private copies of its input and returns a fresh
/// [`Plan`]; nothing carries over between calls.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Creates an optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Computes a cutting plan.
    pub fn solve(&self, parts: &[Part], stock: &[StockPiece]) -> Result<Plan> {
        self.solve_with_report(parts, stock).map(|(plan, _)| plan)
    }

    /// Computes a cutting plan and reports what the balancing pass did.
    pub fn solve_with_report(
        &self,
        parts: &[Part],
        stock: &[StockPiece],
    ) -> Result<(Plan, BalanceReport)> {
        self.validate(parts, stock)?;

        let kerf = self.config.kerf;
        let mut allocation = allocate(parts, stock, kerf, self.config.default_stock_length);

        let report = if self.config.balance_waste {
            balance(
                &mut allocation.assignments,
                &mut allocation.waste,
                kerf,
                self.config.max_balance_rounds,
            )
        } else {
            BalanceReport::disabled()
        };

        finalize(&mut allocation.assignments, kerf);
        let plan = Plan::new(allocation.assignments, kerf);

        log::debug!(
            "plan ready: {} stock pieces, {:.1} mm waste ({:.1}%)",
            plan.len(),
            plan.total_waste(),
            plan.waste_percent()
        );

        Ok((plan, report))
    }

    /// Rejects input the allocation stages cannot handle.
    fn validate(&self, parts: &[Part], stock: &[StockPiece]) -> Result<()> {
        self.config.validate()?;

        let mut seen = HashSet::with_capacity(parts.len());
        for part in parts {
            ensure_positive(&format!("length of part {}", part.id), part.length)?;
            if !seen.insert(part.id.as_str()) {
                return Err(Error::invalid(format!("duplicate part id {}", part.id)));
            }
        }

        for piece in stock {
            ensure_positive(&format!("length of stock {}", piece.id), piece.length)?;
        }

        let default_length = self.config.default_stock_length;
        if let Some(part) = parts.iter().find(|p| p.length > default_length) {
            return Err(Error::UnplaceablePart {
                part_id: part.id.clone(),
                length: part.length,
                default_stock_length: default_length,
            });
        }

        Ok(())
    }
}

/// Computes a cutting plan with the default balancing round cap.
///
/// Fails with [`Error::InvalidInput`] for a negative kerf, a non-positive
/// default stock length or any non-positive part or stock length, and with
/// [`Error::UnplaceablePart`] when a part is longer than
/// `default_stock_length`.
pub fn optimize(
    parts: &[Part],
    stock: &[StockPiece],
    kerf: f64,
    default_stock_length: f64,
) -> Result<Plan> {
    let config = OptimizerConfig::new()
        .with_kerf(kerf)
        .with_default_stock_length(default_stock_length);
    Optimizer::new(config).solve(parts, stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balancer::BalanceStop;

    #[test]
    fn test_rejects_negative_kerf() {
        let parts = vec![Part::new("p1", 100.0)];
        let err = optimize(&parts, &[], -1.0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_zero_part_length() {
        let parts = vec![Part::new("p1", 0.0)];
        let err = optimize(&parts, &[], 0.0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_negative_stock_length() {
        let parts = vec![Part::new("p1", 100.0)];
        let stock = vec![StockPiece::new("s1", -3000.0)];
        let err = optimize(&parts, &stock, 0.0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_part_ids() {
        let parts = vec![Part::new("p1", 100.0), Part::new("p1", 200.0)];
        let err = optimize(&parts, &[], 0.0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_input_checked_before_unplaceable() {
        let parts = vec![Part::new("p1", 5000.0), Part::new("p2", -1.0)];
        let err = optimize(&parts, &[], 0.0, 1000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_part_equal_to_default_length_fits() {
        let parts = vec![Part::new("p1", 2400.0)];
        let plan = optimize(&parts, &[], 3.0, 2400.0).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.assignments[0].remaining_length, 0.0);
    }

    #[test]
    fn test_balancing_can_be_disabled() {
        let parts = vec![Part::new("a", 700.0), Part::new("b", 250.0), Part::new("c", 150.0)];
        let stock = vec![StockPiece::new("s1", 800.0), StockPiece::new("s2", 1000.0)];
        let optimizer = Optimizer::new(
            OptimizerConfig::new()
                .with_kerf(0.0)
                .with_balancing(false),
        );

        let (_, report) = optimizer.solve_with_report(&parts, &stock).unwrap();

        assert_eq!(report.stop, BalanceStop::Disabled);
        assert_eq!(report.rounds, 0);
    }

    #[test]
    fn test_inputs_untouched() {
        let parts = vec![Part::new("a", 500.0), Part::new("b", 900.0)];
        let stock = vec![StockPiece::new("s1", 1000.0)];
        let parts_before = parts.clone();
        let stock_before = stock.clone();

        let _ = optimize(&parts, &stock, 3.0, 1000.0).unwrap();

        assert_eq!(parts, parts_before);
        assert_eq!(stock, stock_before);
    }
}
