//! The Minkowski p-metric family: true distance `d_p` and its cheaper
//! "reduced" form `rho_p`, plus the conversions between them.
//!
//! The traversal engine in [`crate::query`] compares reduced distances
//! against reduced bounds everywhere it can, and only converts back to true
//! distance at the boundary when handing a result to the caller.

use crate::error::BuildError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Manhattan,
    Euclidean,
    Chebyshev,
    General(f64),
}

/// A Minkowski p-metric, `p` fixed at construction.
///
/// ```
/// use minkball::Minkowski;
///
/// let m = Minkowski::euclidean();
/// assert!((m.distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minkowski {
    p: f64,
    kind: Kind,
}

impl Minkowski {
    /// Builds a Minkowski metric for the given exponent.
    ///
    /// # Errors
    /// Returns [`BuildError::InvalidParameter`] unless `p >= 1.0` or `p` is `+inf`.
    pub fn new(p: f64) -> Result<Self, BuildError> {
        if p.is_infinite() && p.is_sign_positive() {
            return Ok(Minkowski { p, kind: Kind::Chebyshev });
        }
        if !(p >= 1.0) {
            return Err(BuildError::invalid_p(p));
        }
        let kind = if p == 1.0 {
            Kind::Manhattan
        } else if p == 2.0 {
            Kind::Euclidean
        } else {
            Kind::General(p)
        };
        Ok(Minkowski { p, kind })
    }

    /// The Euclidean (p=2) metric.
    pub fn euclidean() -> Self {
        Minkowski { p: 2.0, kind: Kind::Euclidean }
    }

    /// The Manhattan (p=1) metric.
    pub fn manhattan() -> Self {
        Minkowski { p: 1.0, kind: Kind::Manhattan }
    }

    /// The Chebyshev (p=inf) metric.
    pub fn chebyshev() -> Self {
        Minkowski { p: f64::INFINITY, kind: Kind::Chebyshev }
    }

    /// The exponent this metric was built with.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// The true distance `d_p(x, y)`.
    pub fn distance(&self, x: &[f64], y: &[f64]) -> f64 {
        match self.kind {
            Kind::Euclidean => self.reduced_distance(x, y).sqrt(),
            Kind::Manhattan | Kind::Chebyshev => self.reduced_distance(x, y),
            Kind::General(p) => self.reduced_distance(x, y).powf(1.0 / p),
        }
    }

    /// The reduced distance `rho_p(x, y)`: identical to `d_p` for p=1 and
    /// p=inf, the sum of squares for p=2, and the pre-root sum of `p`-th
    /// powers otherwise.
    pub fn reduced_distance(&self, x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        match self.kind {
            Kind::Manhattan => x.iter().zip(y).map(|(&a, &b)| (a - b).abs()).sum(),
            Kind::Euclidean => x.iter().zip(y).map(|(&a, &b)| (a - b) * (a - b)).sum(),
            Kind::Chebyshev => x
                .iter()
                .zip(y)
                .map(|(&a, &b)| (a - b).abs())
                .fold(0.0_f64, f64::max),
            Kind::General(p) => x.iter().zip(y).map(|(&a, &b)| (a - b).abs().powf(p)).sum(),
        }
    }

    /// Converts a reduced distance back into a true distance.
    pub fn to_true(&self, rho: f64) -> f64 {
        match self.kind {
            Kind::Euclidean => rho.sqrt(),
            Kind::Manhattan | Kind::Chebyshev => rho,
            Kind::General(p) => rho.powf(1.0 / p),
        }
    }

    /// Converts a true distance into its reduced form.
    pub fn to_reduced(&self, d: f64) -> f64 {
        match self.kind {
            Kind::Euclidean => d * d,
            Kind::Manhattan | Kind::Chebyshev => d,
            Kind::General(p) => d.powf(p),
        }
    }
}
