//! Plain-text rendering of cutting plans.

use std::fmt;

use cutlist_core::{CuttingAssignment, Plan};

/// Width of the stock bar in characters.
const BAR_WIDTH: usize = 50;

/// Human-readable report for a plan.
pub struct PlanReport<'a>(pub &'a Plan);

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;

        writeln!(f, "{:=<64}", "")?;
        writeln!(f, "CUTTING PLAN (kerf {} mm)", plan.kerf)?;
        writeln!(f, "{:=<64}", "")?;

        for (i, assignment) in plan.iter().enumerate() {
            write_assignment(f, i + 1, assignment)?;
        }

        writeln!(f, "{:-<64}", "")?;
        writeln!(
            f,
            "Stock used: {} ({} additional)",
            plan.len(),
            plan.additional_count()
        )?;
        writeln!(
            f,
            "Total waste: {:.1} mm ({:.1}% of total stock)",
            plan.total_waste(),
            plan.waste_percent()
        )
    }
}

/// Renders a plan as a human-readable report.
pub fn render_plan(plan: &Plan) -> String {
    PlanReport(plan).to_string()
}

fn write_assignment(
    f: &mut fmt::Formatter<'_>,
    number: usize,
    a: &CuttingAssignment,
) -> fmt::Result {
    let kind = if a.is_additional {
        " - additional"
    } else if a.is_default {
        " - default"
    } else {
        ""
    };
    writeln!(
        f,
        "\nStock #{number}: {} ({} mm{kind})",
        a.stock_id, a.stock_length
    )?;
    writeln!(f, "  [{}]", stock_bar(a, BAR_WIDTH))?;

    for cut in &a.cuts {
        writeln!(
            f,
            "  {:<6} {:>10.1} mm  @ {:.1}",
            cut.name, cut.length, cut.position
        )?;
    }
    writeln!(f, "  Waste: {:.1} mm", a.remaining_length)
}

/// Draws the stock as a bar: alternating `#`/`=` for cuts, `.` for the rest.
pub fn stock_bar(a: &CuttingAssignment, width: usize) -> String {
    let mut bar = String::with_capacity(width);
    if a.stock_length <= 0.0 {
        return ".".repeat(width);
    }

    for (i, cut) in a.cuts.iter().enumerate() {
        let cells = ((cut.length / a.stock_length) * width as f64).round() as usize;
        let fill = if i % 2 == 0 { '#' } else { '=' };
        let room = width - bar.len();
        bar.extend(std::iter::repeat(fill).take(cells.max(1).min(room)));
    }

    let room = width - bar.len();
    bar.extend(std::iter::repeat('.').take(room));
    bar
}
