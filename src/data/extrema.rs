use thiserror::Error;

use super::correlation::CorrelationMatrix;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("no correlation pair available ({columns} numeric column(s))")]
    NoData { columns: usize },
}

/// Two distinct columns and their coefficient. `first` precedes `second` in
/// column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPair {
    pub first: String,
    pub second: String,
    pub coefficient: f64,
}

/// The strongest positive and strongest negative off-diagonal entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Extrema {
    pub max: CorrelationPair,
    pub min: CorrelationPair,
}

/// Find the largest and smallest coefficients strictly above the diagonal.
///
/// Pairs are visited row-major (`i` then `j`, `i < j`) and a later pair only
/// replaces the current best when it is strictly better, so ties resolve to
/// the first pair visited. NaN coefficients are skipped.
pub fn find_extrema(matrix: &CorrelationMatrix) -> Result<Extrema, AnalysisError> {
    let n = matrix.dim();
    let no_data = AnalysisError::NoData { columns: n };
    if n < 2 {
        return Err(no_data);
    }

    let mut max: Option<(usize, usize, f64)> = None;
    let mut min: Option<(usize, usize, f64)> = None;

    for i in 0..n {
        for j in (i + 1)..n {
            let r = matrix.get(i, j);
            if r.is_nan() {
                continue;
            }
            if max.map_or(true, |(_, _, best)| r > best) {
                max = Some((i, j, r));
            }
            if min.map_or(true, |(_, _, best)| r < best) {
                min = Some((i, j, r));
            }
        }
    }

    let labels = matrix.labels();
    let pair = |(i, j, r): (usize, usize, f64)| CorrelationPair {
        first: labels[i].clone(),
        second: labels[j].clone(),
        coefficient: r,
    };

    match (max, min) {
        (Some(hi), Some(lo)) => Ok(Extrema {
            max: pair(hi),
            min: pair(lo),
        }),
        _ => Err(no_data),
    }
}
