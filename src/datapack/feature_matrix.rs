use polars::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};


/// A sparse row: pairs of feature index and non-zero value,
/// sorted by feature index.
pub type SparseRow = Vec<(usize, f64)>;


/// Sparse feature matrix with one row per pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: Vec<SparseRow>,
    n_features: usize,
}


impl FeatureMatrix {
    /// Construct a matrix from dense rows.
    /// Every row must have the same length.
    pub fn from_dense<T: AsRef<[f64]>>(rows: &[T]) -> Result<Self> {
        let n_features = rows.first()
            .map(|row| row.as_ref().len())
            .unwrap_or(0);

        let rows = rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let row = row.as_ref();
                if row.len() != n_features {
                    return Err(Error::shape_mismatch(format!(
                        "row {i} has {} features, expected {n_features}",
                        row.len()
                    )));
                }
                let sparse = row.iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, x)| *x != 0f64)
                    .collect::<SparseRow>();
                Ok(sparse)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows, n_features })
    }


    /// Construct a matrix from sparse rows over `n_features` columns.
    /// Indices are sorted; an index `>= n_features` is an error.
    pub fn from_sparse(rows: Vec<SparseRow>, n_features: usize)
        -> Result<Self>
    {
        let rows = rows.into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                if let Some(&(j, _)) = row.iter().find(|(j, _)| *j >= n_features) {
                    return Err(Error::shape_mismatch(format!(
                        "row {i} refers to feature {j}, \
                        but there are only {n_features} features"
                    )));
                }
                row.sort_by_key(|(j, _)| *j);
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rows, n_features })
    }


    /// Convert a `polars::DataFrame` into a feature matrix.
    /// Each column becomes a feature; the column names are
    /// available from `data.get_column_names()`.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let (n_rows, n_features) = data.shape();
        let mut rows = vec![SparseRow::new(); n_rows];

        for (j, series) in data.get_columns().iter().enumerate() {
            let values = series.cast(&DataType::Float64)
                .map_err(|e| Error::shape_mismatch(e.to_string()))?;
            let values = values.f64()
                .map_err(|e| Error::shape_mismatch(e.to_string()))?;

            for (i, x) in values.into_iter().enumerate() {
                let x = x.ok_or_else(|| {
                    Error::shape_mismatch(format!(
                        "column {} has a missing value at row {i}",
                        series.name()
                    ))
                })?;
                if x != 0f64 {
                    rows[i].push((j, x));
                }
            }
        }

        Ok(Self { rows, n_features })
    }


    /// Returns the pair of the number of rows and
    /// the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.n_features)
    }


    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }


    /// Number of features (columns).
    pub fn n_features(&self) -> usize {
        self.n_features
    }


    /// Returns the `i`-th row.
    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i][..]
    }


    /// Returns the `i`-th row as a dense vector.
    pub fn dense_row(&self, i: usize) -> Vec<f64> {
        let mut x = vec![0f64; self.n_features];
        self.add_row_to(i, 1f64, &mut x);
        x
    }


    /// Inner product of the `i`-th row with `weights`.
    ///
    /// Time complexity: `O(nnz(row))`.
    #[inline]
    pub fn dot(&self, i: usize, weights: &[f64]) -> f64 {
        self.rows[i].iter()
            .map(|&(j, x)| x * weights[j])
            .sum::<f64>()
    }


    /// Inner products of every row with `weights`.
    pub fn dots(&self, weights: &[f64]) -> Vec<f64> {
        assert_eq!(weights.len(), self.n_features);
        (0..self.rows.len()).into_par_iter()
            .map(|i| self.dot(i, weights))
            .collect()
    }


    /// Performs `buf <- buf + scale * row(i)`.
    #[inline]
    pub fn add_row_to(&self, i: usize, scale: f64, buf: &mut [f64]) {
        self.rows[i].iter()
            .for_each(|&(j, x)| { buf[j] += scale * x; });
    }


    /// Squared euclidean norm of the `i`-th row.
    pub fn row_squared_norm(&self, i: usize) -> f64 {
        self.rows[i].iter()
            .map(|(_, x)| x * x)
            .sum::<f64>()
    }


    /// Returns the matrix made of the given rows, in the given order.
    /// Indices are assumed to be in range.
    pub(crate) fn selected(&self, indices: &[usize]) -> Self {
        let rows = indices.iter()
            .map(|&i| self.rows[i].clone())
            .collect();
        Self { rows, n_features: self.n_features }
    }


    /// Stack the rows of several matrices with the same width.
    pub fn vstack(matrices: &[&FeatureMatrix]) -> Result<Self> {
        let first = matrices.first()
            .ok_or_else(|| Error::EmptyInput("no matrix to stack".into()))?;
        let n_features = first.n_features;

        if let Some(m) = matrices.iter().find(|m| m.n_features != n_features) {
            return Err(Error::shape_mismatch(format!(
                "cannot stack a matrix of width {} under one of width {n_features}",
                m.n_features
            )));
        }

        let rows = matrices.iter()
            .flat_map(|m| m.rows.iter().cloned())
            .collect();
        Ok(Self { rows, n_features })
    }
}
