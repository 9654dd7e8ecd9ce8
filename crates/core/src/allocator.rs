//! Initial allocation: First-Fit Decreasing with overflow stock.
//!
//! Parts are sorted by descending length (stable) and poured into the
//! supplied stock pieces in the order given. Every stock piece scans the
//! whole list of still-unplaced parts, so a shorter part can fill the gap a
//! longer one skipped. Once supplied stock is used up, additional pieces of
//! the default length are synthesized until every part is placed.

use crate::model::{Part, StockPiece};
use crate::plan::{CuttingAssignment, WasteEntry};

/// Result of the allocation stage.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// One assignment per stock piece used, in allocation order.
    pub assignments: Vec<CuttingAssignment>,

    /// Leftover entries for every assignment with positive waste.
    pub waste: Vec<WasteEntry>,
}

impl Allocation {
    /// Number of synthesized stock pieces.
    pub fn additional_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_additional).count()
    }
}

/// Places every part onto the supplied stock, synthesizing default-length
/// pieces for the overflow.
///
/// Expects validated input: every part must be no longer than
/// `default_stock_length`, which guarantees each synthesized piece takes at
/// least one part and the overflow loop terminates.
pub fn allocate(
    parts: &[Part],
    stock: &[StockPiece],
    kerf: f64,
    default_stock_length: f64,
) -> Allocation {
    let mut remaining: Vec<&Part> = parts.iter().collect();
    remaining.sort_by(|a, b| b.length.total_cmp(&a.length));

    let mut allocation = Allocation::default();

    for piece in stock {
        if remaining.is_empty() {
            break;
        }
        let assignment = CuttingAssignment::from_stock(piece);
        allocation.place(assignment, &mut remaining, kerf);
    }

    let mut ordinal = 0;
    while !remaining.is_empty() {
        ordinal += 1;
        let assignment = CuttingAssignment::additional(ordinal, default_stock_length);
        allocation.place(assignment, &mut remaining, kerf);
    }

    log::debug!(
        "allocated {} parts onto {} stock pieces ({} synthesized)",
        parts.len(),
        allocation.assignments.len(),
        ordinal
    );

    allocation
}

impl Allocation {
    /// Fills one stock piece from the unplaced list and records it.
    fn place(&mut self, mut assignment: CuttingAssignment, remaining: &mut Vec<&Part>, kerf: f64) {
        remaining.retain(|part| {
            if assignment.fits(part.length, kerf) {
                assignment.push_cut(part.id.clone(), part.name.clone(), part.length, kerf);
                false
            } else {
                true
            }
        });

        if assignment.remaining_length > 0.0 {
            self.waste.push(WasteEntry {
                assignment_index: self.assignments.len(),
                waste_length: assignment.remaining_length,
            });
        }
        self.assignments.push(assignment);
    }
}
