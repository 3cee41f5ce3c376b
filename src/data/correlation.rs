use super::model::NumericTable;

// ---------------------------------------------------------------------------
// Pearson correlation (pairwise-complete)
// ---------------------------------------------------------------------------

/// Pearson coefficient between two aligned columns.
///
/// Only rows where both sides are present take part. Returns NaN when fewer
/// than two such rows remain or either side has zero variance over them.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    // Deviations are scaled to [-1, 1] so the sums of squares cannot overflow.
    let scale_x = pairs.iter().fold(0.0_f64, |m, (a, _)| m.max((a - mean_x).abs()));
    let scale_y = pairs.iter().fold(0.0_f64, |m, (_, b)| m.max((b - mean_y).abs()));
    if scale_x == 0.0 || scale_y == 0.0 || !scale_x.is_finite() || !scale_y.is_finite() {
        return f64::NAN;
    }

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = (a - mean_x) / scale_x;
        let dy = (b - mean_y) / scale_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// CorrelationMatrix
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of Pearson coefficients labelled by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    /// Row-major, `labels.len()²` entries.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Compute the full matrix over every numeric column.
    ///
    /// The upper triangle is computed once and mirrored, so symmetry is
    /// exact. The diagonal is 1.0 for columns with nonzero variance and NaN
    /// otherwise.
    pub fn from_table(table: &NumericTable) -> Self {
        let n = table.n_columns();
        let mut values = vec![f64::NAN; n * n];

        for i in 0..n {
            let xi = &table.columns[i].values;
            if pearson(xi, xi).is_finite() {
                values[i * n + i] = 1.0;
            }
            for j in (i + 1)..n {
                let r = pearson(xi, &table.columns[j].values);
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        CorrelationMatrix {
            labels: table.columns.iter().map(|c| c.name.clone()).collect(),
            values,
        }
    }

    /// Number of rows (= columns).
    pub fn dim(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Coefficient at `(i, j)`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let n = self.dim();
        assert!(i < n && j < n, "index ({i}, {j}) out of range for {n}x{n}");
        self.values[i * n + j]
    }

    /// One row of the matrix.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.dim();
        &self.values[i * n..(i + 1) * n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnType, NumericColumn};

    fn numeric(cols: &[(&str, Vec<Option<f64>>)]) -> NumericTable {
        let n_rows = cols.first().map(|(_, v)| v.len()).unwrap_or(0);
        NumericTable {
            columns: cols
                .iter()
                .map(|(name, values)| NumericColumn {
                    name: name.to_string(),
                    dtype: ColumnType::Float,
                    values: values.clone(),
                })
                .collect(),
            n_rows,
        }
    }

    fn full(v: &[f64]) -> Vec<Option<f64>> {
        v.iter().copied().map(Some).collect()
    }

    #[test]
    fn perfect_positive_and_negative() {
        let table = numeric(&[
            ("A", full(&[1.0, 2.0, 3.0, 4.0])),
            ("B", full(&[2.0, 4.0, 6.0, 8.0])),
            ("C", full(&[4.0, 3.0, 2.0, 1.0])),
        ]);
        let m = CorrelationMatrix::from_table(&table);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(0, 2), -1.0);
        assert_eq!(m.get(1, 2), -1.0);
        assert_eq!(m.labels(), ["A", "B", "C"]);
    }

    #[test]
    fn positive_scale_gives_exactly_one() {
        let table = numeric(&[
            ("A", full(&[1.0, 2.0, 3.0, 4.0])),
            ("A3", full(&[3.0, 6.0, 9.0, 12.0])),
        ]);
        let m = CorrelationMatrix::from_table(&table);
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn diagonal_symmetry_and_range() {
        let table = numeric(&[
            ("a", full(&[1.0, 5.0, 2.0, 8.0, 3.0])),
            ("b", full(&[0.3, 0.1, 0.9, 0.4, 0.2])),
            ("c", full(&[10.0, 12.0, 9.0, 15.0, 11.0])),
            ("d", full(&[-2.0, 4.0, 4.0, 1.0, 0.0])),
        ]);
        let m = CorrelationMatrix::from_table(&table);
        for i in 0..m.dim() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.dim() {
                let r = m.get(i, j);
                assert!((r - m.get(j, i)).abs() < 1e-9);
                assert!((-1.0..=1.0).contains(&r), "{r} out of range");
            }
        }
    }

    #[test]
    fn huge_magnitudes_still_correlate() {
        let a = [1e160, 2e160, 3e160];
        let b: Vec<f64> = a.iter().map(|v| 2.0 * v).collect();
        let c: Vec<f64> = a.iter().map(|v| -v).collect();
        let table = numeric(&[("a", full(&a)), ("b", full(&b)), ("c", full(&c))]);
        let m = CorrelationMatrix::from_table(&table);
        for i in 0..m.dim() {
            assert_eq!(m.get(i, i), 1.0);
        }
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(0, 2), -1.0);
    }

    #[test]
    fn tiny_magnitudes_still_correlate() {
        let a = [1e-170, 2e-170, 3e-170];
        let b = [3e-170, 2e-170, 1e-170];
        let table = numeric(&[("a", full(&a)), ("b", full(&b))]);
        let m = CorrelationMatrix::from_table(&table);
        assert_eq!(m.get(0, 0), 1.0);
        assert!((m.get(0, 1) + 1.0).abs() < 1e-12, "{}", m.get(0, 1));
    }

    #[test]
    fn zero_variance_gives_nan_diagonal() {
        let table = numeric(&[
            ("flat", full(&[7.0, 7.0, 7.0])),
            ("x", full(&[1.0, 2.0, 3.0])),
        ]);
        let m = CorrelationMatrix::from_table(&table);
        assert!(m.get(0, 0).is_nan());
        assert!(m.get(0, 1).is_nan());
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn missing_cells_are_dropped_pairwise() {
        // Row 4 is missing only in `c`; it must still count for (a, b).
        let a = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)];
        let b = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(-100.0)];
        let c = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), None];

        let table = numeric(&[("a", a.clone()), ("b", b.clone()), ("c", c)]);
        let m = CorrelationMatrix::from_table(&table);

        assert_eq!(m.get(0, 2), 1.0);
        let ab = m.get(0, 1);
        assert!(ab < 0.0, "outlier row must take part in (a, b): {ab}");
        assert_eq!(ab, pearson(&a, &b));
    }

    #[test]
    fn fewer_than_two_complete_rows_is_nan() {
        assert!(pearson(&[Some(1.0), None], &[Some(2.0), Some(3.0)]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }

    #[test]
    fn empty_table_gives_empty_matrix() {
        let m = CorrelationMatrix::from_table(&NumericTable::default());
        assert!(m.is_empty());
        assert_eq!(m.dim(), 0);
    }
}
