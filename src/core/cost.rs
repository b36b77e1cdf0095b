use crate::core::loads::MentorLoads;
use crate::core::scoring::calculate_similarity_with;
use crate::models::{Mentee, Mentor, ScoringWeights};
use thiserror::Error;

/// Default cost added per unit of load at or past a mentor's target
pub const DEFAULT_CAPACITY_PENALTY: f64 = 0.5;

/// Errors raised while building a cost matrix
#[derive(Debug, Error, PartialEq)]
pub enum CostMatrixError {
    #[error("cost at ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    #[error("expected {expected} cells for a {rows}x{cols} matrix, got {actual}")]
    Shape {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },
}

/// Dense row-major cost matrix: rows are mentors, columns are mentees
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Wrap row-major cells, rejecting a wrong cell count or any NaN/infinite cost
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, CostMatrixError> {
        if data.len() != rows * cols {
            return Err(CostMatrixError::Shape {
                rows,
                cols,
                expected: rows * cols,
                actual: data.len(),
            });
        }
        if let Some(idx) = data.iter().position(|c| !c.is_finite()) {
            return Err(CostMatrixError::NonFinite {
                row: idx / cols,
                col: idx % cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows; all rows must have the same length
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, CostMatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(CostMatrixError::RaggedRow {
                row,
                expected: cols,
                actual: cells.len(),
            });
        }
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(rows.len(), cols, data)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Lowest cell, or 0 for an empty matrix
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(None, |acc: Option<f64>, c| {
            Some(acc.map_or(c, |a| a.min(c)))
        }).unwrap_or(0.0)
    }

    /// Total cost of a set of (row, col) pairs
    pub fn total(&self, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(r, c)| self.get(r, c)).sum()
    }
}

/// Penalty a mentor carries on every cell of their row for this iteration
#[inline]
pub fn capacity_penalty(mentor: &Mentor, loads: &MentorLoads, penalty_per_unit: f64) -> f64 {
    loads.excess(mentor) as f64 * penalty_per_unit
}

/// Build the minimization matrix for one iteration
///
/// cell(i, j) = -similarity(mentor_i, mentee_j, iteration) + capacity_penalty(mentor_i)
pub fn build_cost_matrix(
    mentors: &[Mentor],
    mentees: &[&Mentee],
    loads: &MentorLoads,
    iteration: usize,
    weights: &ScoringWeights,
    multipliers: &[f64],
    penalty_per_unit: f64,
) -> Result<CostMatrix, CostMatrixError> {
    let mut data = Vec::with_capacity(mentors.len() * mentees.len());

    for mentor in mentors {
        let penalty = capacity_penalty(mentor, loads, penalty_per_unit);
        for mentee in mentees {
            let similarity = calculate_similarity_with(mentor, mentee, iteration, weights, multipliers);
            data.push(-similarity + penalty);
        }
    }

    CostMatrix::new(mentors.len(), mentees.len(), data)
}
