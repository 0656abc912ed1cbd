use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use rejig::Solution;

pub fn print_solution_summary(solution: &Solution, seed: u64) {
    let outcome = &solution.outcome;

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Grid").add_attribute(Attribute::Bold),
        Cell::new(format!("{} x {}", solution.rows, solution.cols)),
    ]);
    table.add_row(vec![
        Cell::new("Piece size").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} px ({})",
            solution.piece_size,
            if solution.detected {
                "detected"
            } else {
                "specified"
            }
        )),
    ]);
    table.add_row(vec![
        Cell::new("Pieces").add_attribute(Attribute::Bold),
        Cell::new(solution.pieces.len().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Seed").add_attribute(Attribute::Bold),
        Cell::new(seed.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Generations").add_attribute(Attribute::Bold),
        Cell::new(outcome.generations_run.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Stop reason").add_attribute(Attribute::Bold),
        Cell::new(outcome.stop_reason.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Best fitness").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}", outcome.best_fitness)),
    ]);
    table.add_row(vec![
        Cell::new("Mutual buddies").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", outcome.buddy_ratio * 100.0)),
    ]);

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    println!("\n=== 🏆 RESULT ===");
    println!("{}", table);
}
