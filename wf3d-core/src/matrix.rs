/// Checked dense matrices and row vectors over f64
///
/// nalgebra panics on mismatched shapes; these wrappers report the mismatch
/// as a `GeometryError` instead, so callers can propagate it with `?`.
use nalgebra::{DMatrix, DVector};
use std::ops::{Index, IndexMut};

use crate::error::{GeometryError, Result};

/// A real-valued vector of fixed length.
///
/// Used as a row vector when premultiplying a matrix (`v * M`).
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: DVector<f64>,
}

impl Vector {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            data: DVector::from_vec(values),
        }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            data: DVector::zeros(len),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.data.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Dot product with another vector of the same length
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        if self.len() != other.len() {
            return Err(GeometryError::DimensionMismatch {
                operation: "dot",
                left: (1, self.len()),
                right: (1, other.len()),
            });
        }
        Ok(self.data.dot(&other.data))
    }

    /// Multiply every entry by `factor`
    pub fn scaled(&self, factor: f64) -> Vector {
        Self {
            data: &self.data * factor,
        }
    }
}

impl From<[f64; 4]> for Vector {
    fn from(values: [f64; 4]) -> Self {
        Self::new(values.to_vec())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}

/// A real-valued matrix of fixed shape
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: DMatrix::zeros(rows, cols),
        }
    }

    pub fn identity(n: usize) -> Self {
        Self {
            data: DMatrix::identity(n, n),
        }
    }

    /// Build a matrix from fixed-width rows
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        Self {
            data: DMatrix::from_fn(rows.len(), N, |r, c| rows[r][c]),
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let (rows, cols) = self.shape();
        match self.data.get_mut((row, col)) {
            Some(entry) => {
                *entry = value;
                Ok(())
            }
            None => Err(GeometryError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            }),
        }
    }

    pub fn row(&self, i: usize) -> Result<Vector> {
        if i >= self.rows() {
            return Err(self.out_of_bounds(i, 0));
        }
        Ok(Vector {
            data: self.data.row(i).transpose(),
        })
    }

    pub fn column(&self, j: usize) -> Result<Vector> {
        if j >= self.cols() {
            return Err(self.out_of_bounds(0, j));
        }
        Ok(Vector {
            data: self.data.column(j).into_owned(),
        })
    }

    pub fn set_column(&mut self, j: usize, values: &Vector) -> Result<()> {
        if j >= self.cols() {
            return Err(self.out_of_bounds(0, j));
        }
        if values.len() != self.rows() {
            return Err(GeometryError::DimensionMismatch {
                operation: "set_column",
                left: self.shape(),
                right: (values.len(), 1),
            });
        }
        self.data.set_column(j, &values.data);
        Ok(())
    }

    /// Standard matrix product `self * rhs`
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols() != rhs.rows() {
            return Err(GeometryError::DimensionMismatch {
                operation: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(Matrix {
            data: &self.data * &rhs.data,
        })
    }

    /// Row vector times matrix, `v * self`
    pub fn pre_multiply(&self, v: &Vector) -> Result<Vector> {
        if v.len() != self.rows() {
            return Err(GeometryError::DimensionMismatch {
                operation: "pre_multiply",
                left: (1, v.len()),
                right: self.shape(),
            });
        }
        Ok(Vector {
            data: (v.data.transpose() * &self.data).transpose(),
        })
    }

    /// Multiply every entry by `factor`
    pub fn scaled(&self, factor: f64) -> Matrix {
        Matrix {
            data: &self.data * factor,
        }
    }

    pub fn as_nalgebra(&self) -> &DMatrix<f64> {
        &self.data
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> GeometryError {
        GeometryError::OutOfBounds {
            row,
            col,
            rows: self.rows(),
            cols: self.cols(),
        }
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(data: DMatrix<f64>) -> Self {
        Self { data }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[index]
    }
}
