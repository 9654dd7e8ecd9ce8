//! Waste balancing: a bounded local search over the allocation.
//!
//! Each round looks only at the stock piece with the least leftover and the
//! one with the most. If their spread exceeds twice the kerf, the shortest
//! cut of the high-waste piece that fits into the low-waste piece is moved
//! there. At most one cut moves per round, and the pass stops as soon as the
//! spread is small enough, no cut fits, or the round cap is hit.

use crate::layout::repack;
use crate::plan::{CuttingAssignment, WasteEntry};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of balancing rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Why the balancing pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BalanceStop {
    /// Balancing was switched off in the configuration.
    Disabled,
    /// Fewer than two stock pieces had positive waste.
    #[default]
    TooFewWastePieces,
    /// Largest and smallest waste differ by no more than twice the kerf.
    SpreadWithinKerf,
    /// No cut of the largest-waste piece fits into the smallest-waste piece.
    NoEligibleCut,
    /// The round cap was reached.
    RoundLimit,
}

/// Outcome of a balancing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BalanceReport {
    /// Rounds started.
    pub rounds: usize,
    /// Cuts moved between stock pieces.
    pub relocations: usize,
    /// Reason the pass ended.
    pub stop: BalanceStop,
}

impl BalanceReport {
    /// Report for a pass that was never run.
    pub fn disabled() -> Self {
        Self {
            stop: BalanceStop::Disabled,
            ..Self::default()
        }
    }
}

/// Runs the balancing pass over `assignments`, keeping `waste` in sync.
///
/// `waste` must reference valid, distinct assignment indices. Assignments
/// touched by a relocation are repacked on the spot.
pub fn balance(
    assignments: &mut [CuttingAssignment],
    waste: &mut [WasteEntry],
    kerf: f64,
    max_rounds: usize,
) -> BalanceReport {
    let mut report = BalanceReport::default();
    if waste.len() < 2 {
        return report;
    }

    report.stop = BalanceStop::RoundLimit;
    let last = waste.len() - 1;

    while report.rounds < max_rounds {
        report.rounds += 1;
        waste.sort_by(|a, b| a.waste_length.total_cmp(&b.waste_length));

        let smallest = waste[0];
        let largest = waste[last];

        if largest.waste_length - smallest.waste_length <= 2.0 * kerf {
            report.stop = BalanceStop::SpreadWithinKerf;
            break;
        }

        let target = &assignments[smallest.assignment_index];
        let Some(part_id) = smallest_fitting_cut(
            &assignments[largest.assignment_index],
            smallest.waste_length,
            target.kerf_needed(kerf),
        ) else {
            report.stop = BalanceStop::NoEligibleCut;
            break;
        };

        relocate(
            assignments,
            largest.assignment_index,
            smallest.assignment_index,
            &part_id,
            kerf,
        );
        report.relocations += 1;

        waste[0].waste_length = assignments[smallest.assignment_index].remaining_length;
        waste[last].waste_length = assignments[largest.assignment_index].remaining_length;
    }

    log::debug!(
        "waste balancing: {} rounds, {} relocations, stopped: {:?}",
        report.rounds,
        report.relocations,
        report.stop
    );

    report
}

/// Returns the part ID of the shortest cut in `source` that fits into
/// `available` length with `kerf_needed` charged in front of it.
fn smallest_fitting_cut(
    source: &CuttingAssignment,
    available: f64,
    kerf_needed: f64,
) -> Option<String> {
    let mut by_length: Vec<_> = source.cuts.iter().collect();
    by_length.sort_by(|a, b| a.length.total_cmp(&b.length));

    by_length
        .into_iter()
        .find(|cut| available >= cut.length + kerf_needed)
        .map(|cut| cut.part_id.clone())
}

/// Moves the cut for `part_id` from one assignment to another.
fn relocate(
    assignments: &mut [CuttingAssignment],
    from: usize,
    to: usize,
    part_id: &str,
    kerf: f64,
) {
    let Some(cut) = assignments[from].take_cut(part_id) else {
        return;
    };
    repack(&mut assignments[from], kerf);

    log::trace!(
        "moving cut {} ({} mm) from {} to {}",
        cut.name,
        cut.length,
        assignments[from].stock_id,
        assignments[to].stock_id
    );

    assignments[to].append_cut(cut, kerf);
}
