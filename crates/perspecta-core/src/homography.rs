//! Projective transforms derived from a four-point correspondence.
//!
//! The matrix is normalized so its bottom-right entry is 1, which leaves eight
//! unknowns `[a b c d e f g h]`:
//!
//! ```text
//! x' = (a·x + b·y + c) / (g·x + h·y + 1)
//! y' = (d·x + e·y + f) / (g·x + h·y + 1)
//! ```
//!
//! Each point pair contributes two rows of an 8×8 linear system, solved by
//! Gaussian elimination with partial pivoting in `f64`.

use perspecta_engine::coords::Vec2;

use crate::error::{Degeneracy, HomographyError};
use crate::registry::Quad;

/// Relative pivot magnitude below which the 8×8 system counts as singular.
const PIVOT_EPS: f64 = 1e-12;

/// Sine of a triple's widest angle below which its points count as collinear.
const COLLINEAR_EPS: f64 = 1e-9;

/// Homogeneous weights at or below this map to the origin.
const W_EPS: f64 = f32::EPSILON as f64;

/// A 3×3 projective transform, row-major, acting on `(x, y, 1)` column vectors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Homography {
    m: [[f64; 3]; 3],
}

impl Homography {
    /// Derives the transform mapping each `src[i]` onto `dst[i]`.
    ///
    /// Fails when any three points of either quad are collinear (coincident
    /// points included), when the linear system is singular, or when the solved
    /// matrix is not invertible.
    pub fn derive(src: &Quad, dst: &Quad) -> Result<Homography, HomographyError> {
        let degenerate = HomographyError::DegenerateCorrespondence;

        if !src.iter().chain(dst.iter()).all(|p| p.is_finite()) {
            return Err(degenerate(Degeneracy::NonFinite));
        }
        if has_collinear_triple(src) {
            return Err(degenerate(Degeneracy::CollinearSource));
        }
        if has_collinear_triple(dst) {
            return Err(degenerate(Degeneracy::CollinearDestination));
        }

        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            let (x, y) = (s.x as f64, s.y as f64);
            let (xp, yp) = (d.x as f64, d.y as f64);

            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * xp, -y * xp];
            b[2 * i] = xp;

            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * yp, -y * yp];
            b[2 * i + 1] = yp;
        }

        let h = solve_linear_system(&mut a, &mut b)
            .ok_or(degenerate(Degeneracy::SingularSystem))?;

        if !h.iter().all(|v| v.is_finite()) {
            return Err(degenerate(Degeneracy::NonFinite));
        }

        let homography = Homography {
            m: [[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], 1.0]],
        };

        let scale = homography
            .m
            .iter()
            .flatten()
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        if homography.determinant().abs() <= f64::EPSILON * scale.powi(3) {
            return Err(degenerate(Degeneracy::SingularMatrix));
        }

        Ok(homography)
    }

    /// Row-major matrix entries.
    #[inline]
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        self.m
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Maps one point: lift to `(x, y, 1)`, multiply, divide by the third
    /// coordinate. Points on the line at infinity (`w ≈ 0`) map to the origin.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let m = &self.m;
        let (x, y) = (p.x as f64, p.y as f64);

        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        if w.abs() <= W_EPS {
            return Vec2::zero();
        }

        let xp = (m[0][0] * x + m[0][1] * y + m[0][2]) / w;
        let yp = (m[1][0] * x + m[1][1] * y + m[1][2]) / w;
        Vec2::new(xp as f32, yp as f32)
    }

    /// Maps every point independently; output order matches input order.
    pub fn apply_batch(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

/// True when any three of the four points lie on one line.
///
/// Each triple is judged by the sine of its widest angle, so one far-away
/// point does not loosen the test for the others. Coincident points are
/// collinear with anything.
fn has_collinear_triple(q: &Quad) -> bool {
    let p: [(f64, f64); 4] = q.map(|v| (v.x as f64, v.y as f64));

    const TRIPLES: [(usize, usize, usize); 4] = [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)];
    TRIPLES.iter().any(|&(i, j, k)| {
        let (ax, ay) = (p[j].0 - p[i].0, p[j].1 - p[i].1);
        let (bx, by) = (p[k].0 - p[i].0, p[k].1 - p[i].1);
        let (cx, cy) = (p[k].0 - p[j].0, p[k].1 - p[j].1);

        let mut sides = [ax.hypot(ay), bx.hypot(by), cx.hypot(cy)];
        sides.sort_by(f64::total_cmp);

        // |cross| = product of the two shorter sides × sine of the angle between them.
        (ax * by - ay * bx).abs() <= COLLINEAR_EPS * sides[0] * sides[1]
    })
}

/// Solves `a · x = b` in place by Gaussian elimination with partial pivoting.
///
/// Returns `None` when a pivot vanishes relative to the largest coefficient.
fn solve_linear_system(a: &mut [[f64; 8]; 8], b: &mut [f64; 8]) -> Option<[f64; 8]> {
    let n = 8;

    let max_abs = a.iter().flatten().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return None;
    }
    let threshold = PIVOT_EPS * max_abs;

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a[col][col].abs();
        for row in (col + 1)..n {
            if a[row][col].abs() > max_val {
                max_val = a[row][col].abs();
                max_row = row;
            }
        }

        if max_row != col {
            a.swap(col, max_row);
            b.swap(col, max_row);
        }

        let pivot = a[col][col];
        if pivot.abs() <= threshold {
            return None;
        }

        for row in (col + 1)..n {
            let factor = a[row][col] / pivot;
            for j in col..n {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}
