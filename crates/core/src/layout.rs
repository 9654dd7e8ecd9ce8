//! Layout finalization: canonical cut positions and leftover lengths.
//!
//! Every stock piece is packed sequentially from its start: the first cut at
//! offset 0 and each following cut one kerf past the end of the previous one.
//! The leftover is what remains after all cuts and the kerf losses between them.

use crate::plan::{settle_remaining, CuttingAssignment};

/// Repacks the cuts of one assignment in their current order.
///
/// Positions are reassigned sequentially and `remaining_length` is
/// recomputed from scratch.
pub fn repack(assignment: &mut CuttingAssignment, kerf: f64) {
    let mut running = 0.0;
    let mut remaining = assignment.stock_length;

    for (i, cut) in assignment.cuts.iter_mut().enumerate() {
        if i > 0 {
            running += kerf;
            remaining -= kerf;
        }
        cut.position = running;
        running += cut.length;
        remaining -= cut.length;
    }

    assignment.remaining_length = settle_remaining(remaining);
}

/// Brings every assignment into canonical form.
///
/// Cuts are ordered by ascending position (ties keep their order) and then
/// repacked. Running this twice yields the same layout.
pub fn finalize(assignments: &mut [CuttingAssignment], kerf: f64) {
    for assignment in assignments.iter_mut() {
        assignment
            .cuts
            .sort_by(|a, b| a.position.total_cmp(&b.position));
        repack(assignment, kerf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StockPiece;
    use crate::plan::Cut;

    fn cut(id: &str, length: f64, position: f64) -> Cut {
        Cut {
            part_id: id.to_string(),
            length,
            position,
            name: id.to_string(),
        }
    }

    #[test]
    fn test_repack_sequential() {
        let mut a = CuttingAssignment::from_stock(&StockPiece::new("s1", 3000.0));
        a.cuts = vec![cut("a", 1000.0, 77.0), cut("b", 500.0, 3.0)];

        repack(&mut a, 10.0);

        assert_eq!(a.cuts[0].part_id, "a");
        assert_eq!(a.cuts[0].position, 0.0);
        assert_eq!(a.cuts[1].position, 1010.0);
        assert_eq!(a.remaining_length, 3000.0 - 1500.0 - 10.0);
    }

    #[test]
    fn test_repack_decimal_exact_fit() {
        let mut a = CuttingAssignment::from_stock(&StockPiece::new("s1", 179.5));
        a.cuts = vec![cut("a", 115.2, 0.0), cut("b", 60.2, 119.3)];

        repack(&mut a, 4.1);

        assert_eq!(a.remaining_length, 0.0);
    }

    #[test]
    fn test_repack_empty() {
        let mut a = CuttingAssignment::from_stock(&StockPiece::new("s1", 1200.0));
        a.remaining_length = 0.0;
        repack(&mut a, 3.0);
        assert_eq!(a.remaining_length, 1200.0);
    }

    #[test]
    fn test_finalize_orders_by_position() {
        let mut a = CuttingAssignment::from_stock(&StockPiece::new("s1", 2000.0));
        a.cuts = vec![cut("late", 300.0, 900.0), cut("early", 400.0, 0.0)];
        let mut assignments = vec![a];

        finalize(&mut assignments, 5.0);

        let cuts = &assignments[0].cuts;
        assert_eq!(cuts[0].part_id, "early");
        assert_eq!(cuts[0].position, 0.0);
        assert_eq!(cuts[1].part_id, "late");
        assert_eq!(cuts[1].position, 405.0);
        assert_eq!(assignments[0].remaining_length, 1295.0);
    }

    #[test]
    fn test_finalize_idempotent() {
        let mut a = CuttingAssignment::from_stock(&StockPiece::new("s1", 2400.0));
        a.cuts = vec![
            cut("x", 610.0, 1300.0),
            cut("y", 455.5, 12.0),
            cut("z", 800.0, 620.0),
        ];
        let mut assignments = vec![a];

        finalize(&mut assignments, 3.2);
        let once = assignments.clone();
        finalize(&mut assignments, 3.2);

        assert_eq!(once, assignments);
    }
}
