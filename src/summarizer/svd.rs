//! Singular value decomposition by one-sided Jacobi rotations.
//!
//! Summaries only need singular values and right singular vectors of small
//! term-by-sentence matrices, so the columns are orthogonalized in place and
//! the rotations accumulated into V.

use nalgebra::DMatrix;

const MAX_SWEEPS: usize = 60;
const ORTHOGONALITY_TOLERANCE: f64 = 1e-12;
const RANK_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Svd {
    /// Descending.
    pub singular_values: Vec<f64>,
    /// Column `i` is the right singular vector of `singular_values[i]`.
    pub right_vectors: DMatrix<f64>,
}

impl Svd {
    /// Count of singular values that are not negligible next to the largest.
    pub fn rank(&self) -> usize {
        let Some(&largest) = self.singular_values.first() else {
            return 0;
        };
        if largest <= f64::EPSILON {
            return 0;
        }
        self.singular_values
            .iter()
            .take_while(|&&sigma| sigma > largest * RANK_TOLERANCE)
            .count()
    }
}

fn rotate(m: &mut DMatrix<f64>, p: usize, q: usize, c: f64, s: f64) {
    for i in 0..m.nrows() {
        let mp = m[(i, p)];
        let mq = m[(i, q)];
        m[(i, p)] = c * mp - s * mq;
        m[(i, q)] = s * mp + c * mq;
    }
}

pub fn decompose(a: &DMatrix<f64>) -> Svd {
    let n = a.ncols();
    let mut w = a.clone();
    let mut v = DMatrix::<f64>::identity(n, n);

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let alpha = w.column(p).norm_squared();
                let beta = w.column(q).norm_squared();
                let gamma = w.column(p).dot(&w.column(q));
                if gamma.abs() <= ORTHOGONALITY_TOLERANCE * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;
                rotate(&mut w, p, q, c, s);
                rotate(&mut v, p, q, c, s);
            }
        }
        if !rotated {
            break;
        }
    }

    let norms: Vec<f64> = (0..n).map(|j| w.column(j).norm()).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| norms[b].total_cmp(&norms[a]).then(a.cmp(&b)));

    Svd {
        singular_values: order.iter().map(|&j| norms[j]).collect(),
        right_vectors: DMatrix::from_fn(n, n, |row, col| v[(row, order[col])]),
    }
}
