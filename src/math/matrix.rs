use rand::Rng;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::{NetError, Result};

/// Axis selector for reductions such as [`Matrix::mean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Reduce down each column; the result has one entry per column.
    Columns,
    /// Reduce across each row; the result has one entry per row.
    Rows,
}

/// Dense row-major matrix of `f64`.
///
/// `data.len() == rows * cols` holds for every matrix this type hands out.
/// Arithmetic never mutates its operands; the only in-place mutation is
/// through [`Matrix::set`] and the `*_assign` helpers used by layer updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix{
    rows: usize,
    cols: usize,
    data: Vec<f64>
}

impl Matrix{
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive, got {}x{}", rows, cols);
        Matrix{
            rows,
            cols,
            data: vec![0.0; rows * cols]
        }
    }

    /// Builds a matrix from row-major `data`. Fails if the length does not
    /// equal `rows * cols` or either dimension is zero.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(NetError::InvalidArgument(format!(
                "matrix dimensions must be positive, got {}x{}", rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(NetError::shape("from_vec", (rows, cols), (1, data.len())));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(NetError::shape("from_rows", (n_rows, n_cols), (1, bad.len())));
        }
        Matrix::from_vec(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// Single-row matrix of shape `(1, values.len())`.
    pub fn row(values: &[f64]) -> Result<Matrix> {
        Matrix::from_vec(1, values.len(), values.to_vec())
    }

    /// Single-column matrix of shape `(values.len(), 1)`.
    pub fn column(values: &[f64]) -> Result<Matrix> {
        Matrix::from_vec(values.len(), 1, values.to_vec())
    }

    /// Uniform samples in `[-1, 1)` drawn from `rng`.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for x in res.data.iter_mut() {
            *x = rng.gen::<f64>() * 2.0 - 1.0;
        }
        res
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// # Panics
    /// Panics if `(r, c)` lies outside the matrix.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[self.offset(r, c)]
    }

    pub fn try_get(&self, r: usize, c: usize) -> Option<f64> {
        if r < self.rows && c < self.cols {
            Some(self.data[r * self.cols + c])
        } else {
            None
        }
    }

    /// # Panics
    /// Panics if `(r, c)` lies outside the matrix.
    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        let i = self.offset(r, c);
        self.data[i] = value;
    }

    fn offset(&self, r: usize, c: usize) -> usize {
        assert!(
            r < self.rows && c < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix", r, c, self.rows, self.cols
        );
        r * self.cols + c
    }

    /// Element-wise sum. Shapes must be identical.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("add", rhs, |a, b| a + b)
    }

    /// Element-wise difference. Shapes must be identical.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("sub", rhs, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product. Shapes must be identical.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with("hadamard", rhs, |a, b| a * b)
    }

    fn zip_with<F>(&self, op: &'static str, rhs: &Matrix, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(NetError::shape(op, self.shape(), rhs.shape()));
        }
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix { rows: self.rows, cols: self.cols, data })
    }

    /// In-place `self -= rhs`. Shapes must be identical; on error `self` is untouched.
    pub(crate) fn sub_assign(&mut self, rhs: &Matrix) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(NetError::shape("sub_assign", self.shape(), rhs.shape()));
        }
        for (a, b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a -= b;
        }
        Ok(())
    }

    /// Matrix product. Requires `self.cols == rhs.rows`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(NetError::shape("dot", self.shape(), rhs.shape()));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }

                res.data[i * res.cols + j] = sum;
            }
        }

        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i * res.cols + j] = self.data[j * self.cols + i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Like [`Matrix::map`], but `functor` also receives `(row, col)`.
    pub fn map_indexed<F>(&self, functor: F) -> Matrix
    where
        F: Fn(usize, usize, f64) -> f64,
    {
        let cols = self.cols;
        Matrix {
            rows: self.rows,
            cols,
            data: self.data.iter().enumerate()
                .map(|(i, &x)| functor(i / cols, i % cols, x))
                .collect(),
        }
    }

    pub fn for_each_indexed<F>(&self, mut action: F)
    where
        F: FnMut(usize, usize, f64),
    {
        for (i, &x) in self.data.iter().enumerate() {
            action(i / self.cols, i % self.cols, x);
        }
    }

    /// Row-major copy of every value.
    pub fn flatten(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// New matrix holding the listed rows in the given order. Repeated
    /// indices produce repeated rows.
    pub fn slice_rows(&self, indices: &[usize]) -> Result<Matrix> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.rows) {
            return Err(NetError::InvalidArgument(format!(
                "row index {} out of bounds for {} rows", bad, self.rows
            )));
        }
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &i in indices {
            data.extend_from_slice(&self.data[i * self.cols..(i + 1) * self.cols]);
        }
        Matrix::from_vec(indices.len(), self.cols, data)
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Mean along `axis`, always returned as a single row.
    ///
    /// `Axis::Columns` gives shape `(1, cols)`; `Axis::Rows` gives `(1, rows)`.
    pub fn mean(&self, axis: Axis) -> Matrix {
        match axis {
            Axis::Columns => {
                let mut res = Matrix::zeros(1, self.cols);
                self.for_each_indexed(|_, c, x| res.data[c] += x);
                res.map(|s| s / self.rows as f64)
            }
            Axis::Rows => {
                let mut res = Matrix::zeros(1, self.rows);
                self.for_each_indexed(|r, _, x| res.data[r] += x);
                res.map(|s| s / self.cols as f64)
            }
        }
    }
}

impl Add<f64> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: f64) -> Matrix {
        self.map(|x| x + rhs)
    }
}

impl Sub<f64> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: f64) -> Matrix {
        self.map(|x| x - rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.map(|x| x * rhs)
    }
}

/// Console rendering: one bracketed row per line, two decimals, tab separated.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let row = &self.data[r * self.cols..(r + 1) * self.cols];
            let cells: Vec<String> = row.iter()
                .map(|x| format!("{}", (x * 100.0).round() / 100.0))
                .collect();
            writeln!(f, "[{}]", cells.join("\t"))?;
        }
        writeln!(f)
    }
}
