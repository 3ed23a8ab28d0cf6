//! Optimal assignment of track columns to matrix rows
//!
//! The engine treats the solver as a pluggable primitive behind
//! [`AssignmentSolver`]: any exact rectangular linear-assignment routine
//! satisfies the contract. The implementation provided here is the
//! Jonker-Volgenant shortest augmenting path method, which grows an optimal
//! matching one column at a time by Dijkstra searches over reduced costs.
//! It is exact, deterministic, and cubic in the matrix dimension.

use nalgebra::DMatrix;

use crate::errors::AssociationError;

/// Minimum-cost bipartite assignment of every column to a distinct row.
///
/// The cost matrix must have at least as many rows as columns. `solve`
/// returns, for each column index, its assigned row index; the assignment
/// is globally cost-optimal, and any lowest-cost perfect matching over the
/// columns is acceptable when ties exist.
pub trait AssignmentSolver: std::fmt::Debug {
    /// Solve the rectangular linear assignment problem.
    fn solve(&self, cost: &DMatrix<f64>) -> Result<Vec<usize>, AssociationError>;
}

/// Jonker-Volgenant shortest augmenting path solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct JonkerVolgenant;

impl AssignmentSolver for JonkerVolgenant {
    fn solve(&self, cost: &DMatrix<f64>) -> Result<Vec<usize>, AssociationError> {
        let (rows, cols) = cost.shape();
        if cols > rows {
            return Err(AssociationError::ShapeMismatch { rows, cols });
        }
        if cols == 0 {
            return Ok(Vec::new());
        }
        for col in 0..cols {
            for row in 0..rows {
                if !cost[(row, col)].is_finite() {
                    return Err(AssociationError::NonFiniteCost { row, col });
                }
            }
        }
        Ok(augmenting_path_assign(cost))
    }
}

/// Grow the matching one column at a time.
///
/// For each unmatched column, a Dijkstra search over reduced costs finds
/// the cheapest alternating path to an unmatched row; potentials are then
/// updated so reduced costs stay non-negative and the path is flipped into
/// the matching. All costs are finite and every column can reach every
/// row, so each search terminates at a sink.
fn augmenting_path_assign(cost: &DMatrix<f64>) -> Vec<usize> {
    let num_rows = cost.nrows();
    let num_cols = cost.ncols();

    // Dual potentials for columns and rows.
    let mut u = vec![0.0_f64; num_cols];
    let mut v = vec![0.0_f64; num_rows];
    // Matching, in both directions. usize::MAX marks "unmatched".
    let mut row_of_col = vec![usize::MAX; num_cols];
    let mut col_of_row = vec![usize::MAX; num_rows];

    for start_col in 0..num_cols {
        // Shortest alternating-path distance to each row, and the column
        // from which that row is best reached.
        let mut shortest = vec![f64::INFINITY; num_rows];
        let mut reached_from = vec![start_col; num_rows];
        let mut col_scanned = vec![false; num_cols];
        let mut row_done = vec![false; num_rows];
        let mut remaining: Vec<usize> = (0..num_rows).collect();

        let mut min_val = 0.0_f64;
        let mut col = start_col;
        let mut sink = usize::MAX;

        while sink == usize::MAX {
            col_scanned[col] = true;
            let mut lowest = f64::INFINITY;
            let mut lowest_pos = 0;

            for (pos, &row) in remaining.iter().enumerate() {
                let reduced = min_val + cost[(row, col)] - u[col] - v[row];
                if reduced < shortest[row] {
                    shortest[row] = reduced;
                    reached_from[row] = col;
                }
                // Prefer an unmatched row on ties.
                if shortest[row] < lowest
                    || (shortest[row] == lowest && col_of_row[row] == usize::MAX)
                {
                    lowest = shortest[row];
                    lowest_pos = pos;
                }
            }

            min_val = lowest;
            let row = remaining.swap_remove(lowest_pos);
            row_done[row] = true;
            if col_of_row[row] == usize::MAX {
                sink = row;
            } else {
                col = col_of_row[row];
            }
        }

        // Update potentials so the new matching stays tight.
        u[start_col] += min_val;
        for c in 0..num_cols {
            if col_scanned[c] && c != start_col {
                u[c] += min_val - shortest[row_of_col[c]];
            }
        }
        for r in 0..num_rows {
            if row_done[r] {
                v[r] -= min_val - shortest[r];
            }
        }

        // Flip the augmenting path into the matching.
        let mut row = sink;
        loop {
            let c = reached_from[row];
            col_of_row[row] = c;
            let previous = row_of_col[c];
            row_of_col[c] = row;
            if c == start_col {
                break;
            }
            row = previous;
        }
    }

    row_of_col
}
