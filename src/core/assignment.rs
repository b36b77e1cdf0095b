//! Rectangular linear assignment.
//!
//! Given an m x n cost matrix, pick min(m, n) cells with no row or column used
//! twice so the total cost is as small as possible.

use crate::core::cost::CostMatrix;

/// Anything that can solve the rectangular linear assignment problem
pub trait AssignmentSolver {
    /// Return `(row, col)` pairs sorted by row, `min(rows, cols)` of them,
    /// minimizing the summed cost. An empty matrix yields no pairs.
    fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)>;
}

/// Shortest augmenting path solver (Jonker-Volgenant family)
///
/// Rows are assigned one at a time; each step runs a Dijkstra-style search
/// over reduced costs for the cheapest path to a free column, then flips the
/// path. Among equally short paths the lowest free column wins, so results
/// are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestAugmentingPath;

impl AssignmentSolver for ShortestAugmentingPath {
    fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)> {
        if costs.is_empty() {
            return Vec::new();
        }

        // The search needs at least as many columns as rows
        let transposed = costs.rows() > costs.cols();
        let mut state = SearchState::new(costs, transposed);

        for cur_row in 0..state.nr {
            if !state.assign_row(cur_row) {
                tracing::warn!(row = cur_row, "no augmenting path found, assignment is partial");
                break;
            }
        }

        let mut pairs: Vec<(usize, usize)> = state
            .col4row
            .iter()
            .enumerate()
            .filter_map(|(i, col)| col.map(|j| if transposed { (j, i) } else { (i, j) }))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

struct SearchState<'a> {
    costs: &'a CostMatrix,
    transposed: bool,
    /// Subtracted from every cell so reduced costs start non-negative
    offset: f64,
    nr: usize,
    nc: usize,
    u: Vec<f64>,
    v: Vec<f64>,
    shortest: Vec<f64>,
    path: Vec<usize>,
    col4row: Vec<Option<usize>>,
    row4col: Vec<Option<usize>>,
    visited_rows: Vec<bool>,
    visited_cols: Vec<bool>,
    remaining: Vec<usize>,
}

impl<'a> SearchState<'a> {
    fn new(costs: &'a CostMatrix, transposed: bool) -> Self {
        let (nr, nc) = if transposed {
            (costs.cols(), costs.rows())
        } else {
            (costs.rows(), costs.cols())
        };

        Self {
            costs,
            transposed,
            offset: costs.min(),
            nr,
            nc,
            u: vec![0.0; nr],
            v: vec![0.0; nc],
            shortest: vec![f64::INFINITY; nc],
            path: vec![0; nc],
            col4row: vec![None; nr],
            row4col: vec![None; nc],
            visited_rows: vec![false; nr],
            visited_cols: vec![false; nc],
            remaining: vec![0; nc],
        }
    }

    #[inline]
    fn cost(&self, i: usize, j: usize) -> f64 {
        let raw = if self.transposed {
            self.costs.get(j, i)
        } else {
            self.costs.get(i, j)
        };
        raw - self.offset
    }

    /// Extend the current matching by `cur_row`; false when no path exists
    fn assign_row(&mut self, cur_row: usize) -> bool {
        let Some((sink, min_val)) = self.augmenting_path(cur_row) else {
            return false;
        };

        // Dual update
        self.u[cur_row] += min_val;
        for i in 0..self.nr {
            if self.visited_rows[i] && i != cur_row {
                if let Some(j) = self.col4row[i] {
                    self.u[i] += min_val - self.shortest[j];
                }
            }
        }
        for j in 0..self.nc {
            if self.visited_cols[j] {
                self.v[j] -= min_val - self.shortest[j];
            }
        }

        // Flip the path back from the sink
        let mut j = sink;
        loop {
            let i = self.path[j];
            self.row4col[j] = Some(i);
            let previous = self.col4row[i].replace(j);
            if i == cur_row {
                break;
            }
            match previous {
                Some(col) => j = col,
                None => break,
            }
        }

        true
    }

    /// Cheapest path from `cur_row` to an unassigned column: `(sink, path length)`
    fn augmenting_path(&mut self, cur_row: usize) -> Option<(usize, f64)> {
        let mut min_val = 0.0;
        let mut num_remaining = self.nc;

        // Scan columns high to low so swap-removal keeps low indices in play
        for (it, slot) in self.remaining.iter_mut().enumerate() {
            *slot = self.nc - it - 1;
        }
        self.visited_rows.fill(false);
        self.visited_cols.fill(false);
        self.shortest.fill(f64::INFINITY);

        let mut i = cur_row;
        loop {
            let mut index = None;
            let mut lowest = f64::INFINITY;
            self.visited_rows[i] = true;

            for it in 0..num_remaining {
                let j = self.remaining[it];
                let reduced = min_val + self.cost(i, j) - self.u[i] - self.v[j];
                if reduced < self.shortest[j] {
                    self.path[j] = i;
                    self.shortest[j] = reduced;
                }

                if self.shortest[j] < lowest
                    || (self.shortest[j] == lowest && self.row4col[j].is_none())
                {
                    lowest = self.shortest[j];
                    index = Some(it);
                }
            }

            if !lowest.is_finite() {
                return None;
            }
            let index = index?;
            min_val = lowest;

            let j = self.remaining[index];
            self.visited_cols[j] = true;
            num_remaining -= 1;
            self.remaining[index] = self.remaining[num_remaining];

            match self.row4col[j] {
                None => return Some((j, min_val)),
                Some(row) => i = row,
            }
        }
    }
}
