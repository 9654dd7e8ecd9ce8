//! Cutting plan representation.

use crate::model::{PartId, StockId, StockPiece};

/// Largest rounding residue treated as an exact fit, in millimeters.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Snaps a leftover that is negative only by rounding residue to zero.
pub(crate) fn settle_remaining(remaining: f64) -> f64 {
    if remaining < 0.0 && remaining > -LENGTH_EPSILON {
        0.0
    } else {
        remaining
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A part cut from a stock piece at a given offset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cut {
    /// ID of the part this cut produces.
    pub part_id: PartId,

    /// Length of the cut piece.
    pub length: f64,

    /// Offset of the cut piece from the start of the stock.
    pub position: f64,

    /// Display name of the part.
    pub name: String,
}

impl Cut {
    /// Offset just past the end of this cut piece.
    pub fn end(&self) -> f64 {
        self.position + self.length
    }
}

/// The cuts assigned to one stock piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuttingAssignment {
    /// ID of the stock piece (`additional-N` for synthesized pieces).
    pub stock_id: StockId,

    /// Full length of the stock piece.
    pub stock_length: f64,

    /// Whether the stock piece was a default-length piece.
    pub is_default: bool,

    /// Whether the stock piece was synthesized because supplied stock ran out.
    pub is_additional: bool,

    /// Cuts ordered by ascending position.
    pub cuts: Vec<Cut>,

    /// Leftover length after all cuts and kerf losses.
    pub remaining_length: f64,
}

impl CuttingAssignment {
    /// Creates an empty assignment for a supplied stock piece.
    pub fn from_stock(stock: &StockPiece) -> Self {
        Self {
            stock_id: stock.id.clone(),
            stock_length: stock.length,
            is_default: stock.is_default,
            is_additional: false,
            cuts: Vec::new(),
            remaining_length: stock.length,
        }
    }

    /// Creates an empty assignment for the `ordinal`-th synthesized stock piece (1-based).
    pub fn additional(ordinal: usize, length: f64) -> Self {
        Self {
            stock_id: format!("additional-{ordinal}"),
            stock_length: length,
            is_default: false,
            is_additional: true,
            cuts: Vec::new(),
            remaining_length: length,
        }
    }

    /// Kerf charged before the next appended cut.
    pub fn kerf_needed(&self, kerf: f64) -> f64 {
        if self.cuts.is_empty() {
            0.0
        } else {
            kerf
        }
    }

    /// Returns true if a piece of `length` can be appended to this stock.
    pub fn fits(&self, length: f64, kerf: f64) -> bool {
        self.remaining_length >= length + self.kerf_needed(kerf)
    }

    /// Appends a cut after the existing ones and charges its kerf and length.
    ///
    /// The caller is responsible for checking [`fits`](Self::fits) first.
    pub fn push_cut(&mut self, part_id: PartId, name: String, length: f64, kerf: f64) {
        self.append_cut(
            Cut {
                part_id,
                length,
                position: 0.0,
                name,
            },
            kerf,
        );
    }

    /// Takes ownership of `cut` and places it after the existing cuts.
    pub fn append_cut(&mut self, mut cut: Cut, kerf: f64) {
        self.remaining_length -= self.kerf_needed(kerf);
        cut.position = self.stock_length - self.remaining_length;
        self.remaining_length = settle_remaining(self.remaining_length - cut.length);
        self.cuts.push(cut);
    }

    /// Removes and returns the cut producing `part_id`.
    ///
    /// Positions of the remaining cuts are left untouched.
    pub fn take_cut(&mut self, part_id: &str) -> Option<Cut> {
        let idx = self.cuts.iter().position(|c| c.part_id == part_id)?;
        Some(self.cuts.remove(idx))
    }

    /// Sum of the lengths of all cuts.
    pub fn cut_length(&self) -> f64 {
        self.cuts.iter().map(|c| c.length).sum()
    }

    /// Total kerf consumed between cuts.
    pub fn kerf_loss(&self, kerf: f64) -> f64 {
        kerf * self.cuts.len().saturating_sub(1) as f64
    }

    /// Returns true if nothing is cut from this stock piece.
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }
}

/// A leftover entry tracked between allocation and balancing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasteEntry {
    /// Index of the assignment in the plan.
    pub assignment_index: usize,
    /// Current leftover length of that assignment.
    pub waste_length: f64,
}

/// The complete output of an optimization run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan {
    /// Assignments in allocation order: supplied stock first, then synthesized stock.
    pub assignments: Vec<CuttingAssignment>,

    /// Kerf used to build this plan.
    pub kerf: f64,
}

impl Plan {
    /// Creates a plan from finalized assignments.
    pub fn new(assignments: Vec<CuttingAssignment>, kerf: f64) -> Self {
        Self { assignments, kerf }
    }

    /// Number of stock pieces used.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns true if the plan uses no stock.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates over the assignments.
    pub fn iter(&self) -> std::slice::Iter<'_, CuttingAssignment> {
        self.assignments.iter()
    }

    /// Sum of leftover lengths across all assignments.
    pub fn total_waste(&self) -> f64 {
        self.assignments.iter().map(|a| a.remaining_length).sum()
    }

    /// Sum of the lengths of all stock pieces used.
    pub fn total_stock_length(&self) -> f64 {
        self.assignments.iter().map(|a| a.stock_length).sum()
    }

    /// Sum of all kerf losses.
    pub fn total_kerf_loss(&self) -> f64 {
        self.assignments.iter().map(|a| a.kerf_loss(self.kerf)).sum()
    }

    /// Waste as a fraction of total stock length (0.0 - 1.0).
    pub fn waste_ratio(&self) -> f64 {
        let total = self.total_stock_length();
        if total > 0.0 {
            self.total_waste() / total
        } else {
            0.0
        }
    }

    /// Waste as a percentage of total stock length.
    pub fn waste_percent(&self) -> f64 {
        self.waste_ratio() * 100.0
    }

    /// Number of synthesized stock pieces.
    pub fn additional_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_additional).count()
    }

    /// Total number of cuts across all assignments.
    pub fn cut_count(&self) -> usize {
        self.assignments.iter().map(|a| a.cuts.len()).sum()
    }

    /// Finds the assignment index and cut for a part.
    pub fn find_part(&self, part_id: &str) -> Option<(usize, &Cut)> {
        self.assignments.iter().enumerate().find_map(|(i, a)| {
            a.cuts
                .iter()
                .find(|c| c.part_id == part_id)
                .map(|cut| (i, cut))
        })
    }

    /// Computes summary statistics.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from(self)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a CuttingAssignment;
    type IntoIter = std::slice::Iter<'a, CuttingAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

/// Summary statistics for a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSummary {
    /// Number of stock pieces used.
    pub stock_used: usize,
    /// Number of synthesized stock pieces.
    pub additional_stock: usize,
    /// Number of parts cut.
    pub parts_cut: usize,
    /// Total stock length used.
    pub total_stock_length: f64,
    /// Total leftover length.
    pub total_waste: f64,
    /// Total kerf loss.
    pub total_kerf_loss: f64,
    /// Waste as a percentage of total stock length.
    pub waste_percent: f64,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            stock_used: plan.len(),
            additional_stock: plan.additional_count(),
            parts_cut: plan.cut_count(),
            total_stock_length: plan.total_stock_length(),
            total_waste: plan.total_waste(),
            total_kerf_loss: plan.total_kerf_loss(),
            waste_percent: plan.waste_percent(),
        }
    }
}
