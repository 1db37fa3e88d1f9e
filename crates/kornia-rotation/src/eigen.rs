//! Non-iterative eigendecomposition of real symmetric 3x3 matrices.
//!
//! The eigenvalues come from the trigonometric solution of the characteristic cubic. The first
//! eigenvector is read off the null space of the shifted matrix, the second is found inside the
//! plane orthogonal to the first, and the third is their cross product, so the three vectors are
//! orthonormal by construction.
//!
//! The input is scaled by its largest entry before solving, which keeps the cubic well conditioned
//! for matrices with very large or very small entries.
//!
//! Only the upper triangle of the input is read.

use nalgebra::{Matrix3, Vector3};

use crate::scalar::Real;

/// An eigenvalue together with its unit eigenvector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenPair<T: Real> {
    /// The eigenvalue.
    pub value: T,
    /// The unit eigenvector.
    pub vector: Vector3<T>,
}

/// Eigendecomposition `A = sum(value * vector * vector^T)` of a symmetric 3x3 matrix.
///
/// For diagonal input the pairs follow the diagonal order. Otherwise the order follows the
/// solver's internal branch and is not sorted; consumers should rely on the eigen equation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSolver<T: Real> {
    pairs: [EigenPair<T>; 3],
}

impl<T: Real> EigenSolver<T> {
    /// Decomposes the symmetric matrix `a`.
    pub fn new(a: &Matrix3<T>) -> Self {
        let zero = T::zero();
        let one = T::one();

        let max_abs = [
            a[(0, 0)],
            a[(0, 1)],
            a[(0, 2)],
            a[(1, 1)],
            a[(1, 2)],
            a[(2, 2)],
        ]
        .iter()
        .fold(zero, |acc, x| acc.max(x.abs()));

        if max_abs == zero {
            log::debug!("EigenSolver: zero matrix, returning the standard basis");
            return Self::from_diagonal(zero, zero, zero);
        }

        let s = Matrix3::new(
            a[(0, 0)],
            a[(0, 1)],
            a[(0, 2)],
            a[(0, 1)],
            a[(1, 1)],
            a[(1, 2)],
            a[(0, 2)],
            a[(1, 2)],
            a[(2, 2)],
        ) / max_abs;

        let norm = s[(0, 1)] * s[(0, 1)] + s[(0, 2)] * s[(0, 2)] + s[(1, 2)] * s[(1, 2)];
        if norm <= zero {
            log::debug!("EigenSolver: diagonal matrix, no iteration needed");
            return Self::from_diagonal(
                s[(0, 0)] * max_abs,
                s[(1, 1)] * max_abs,
                s[(2, 2)] * max_abs,
            );
        }

        let three = T::lit(3.0);
        let q = s.trace() / three;
        let b00 = s[(0, 0)] - q;
        let b11 = s[(1, 1)] - q;
        let b22 = s[(2, 2)] - q;
        let p = ((b00 * b00 + b11 * b11 + b22 * b22 + T::lit(2.0) * norm) / T::lit(6.0)).sqrt();

        let c00 = b11 * b22 - s[(1, 2)] * s[(1, 2)];
        let c01 = s[(0, 1)] * b22 - s[(1, 2)] * s[(0, 2)];
        let c02 = s[(0, 1)] * s[(1, 2)] - b11 * s[(0, 2)];
        let det = (b00 * c00 - s[(0, 1)] * c01 + s[(0, 2)] * c02) / (p * p * p);

        let half_det = crate::linalg::clamp(det * T::lit(0.5), -one, one);
        let angle = half_det.acos() / three;

        // roots of the normalized cubic, beta0 <= beta1 <= beta2
        let beta2 = angle.cos() * T::lit(2.0);
        let beta0 = (angle + T::two_pi() / three).cos() * T::lit(2.0);
        let beta1 = -(beta0 + beta2);

        let values = [q + p * beta0, q + p * beta1, q + p * beta2];

        // start from the root that is best separated from the other two
        let (v0, v1, v2) = if half_det >= zero {
            let v2 = null_vector(&s, values[2]);
            let v1 = complement_vector(&s, values[1], &v2);
            (v1.cross(&v2), v1, v2)
        } else {
            let v0 = null_vector(&s, values[0]);
            let v1 = complement_vector(&s, values[1], &v0);
            (v0, v1, v0.cross(&v1))
        };

        Self {
            pairs: [
                EigenPair {
                    value: values[0] * max_abs,
                    vector: v0,
                },
                EigenPair {
                    value: values[1] * max_abs,
                    vector: v1,
                },
                EigenPair {
                    value: values[2] * max_abs,
                    vector: v2,
                },
            ],
        }
    }

    fn from_diagonal(d0: T, d1: T, d2: T) -> Self {
        Self {
            pairs: [
                EigenPair {
                    value: d0,
                    vector: Vector3::x(),
                },
                EigenPair {
                    value: d1,
                    vector: Vector3::y(),
                },
                EigenPair {
                    value: d2,
                    vector: Vector3::z(),
                },
            ],
        }
    }

    /// The three eigenpairs.
    pub fn pairs(&self) -> &[EigenPair<T>; 3] {
        &self.pairs
    }

    /// The eigenvalues, in the same order as [`EigenSolver::pairs`].
    pub fn eigenvalues(&self) -> Vector3<T> {
        Vector3::new(
            self.pairs[0].value,
            self.pairs[1].value,
            self.pairs[2].value,
        )
    }

    /// The eigenvectors as the columns of a matrix.
    pub fn eigenvectors(&self) -> Matrix3<T> {
        Matrix3::from_columns(&[
            self.pairs[0].vector,
            self.pairs[1].vector,
            self.pairs[2].vector,
        ])
    }

    /// Rebuilds `sum(f(value) * vector * vector^T)`.
    ///
    /// `f = |x| x` reproduces the input; `f = |x| 1 / sqrt(|x|)` gives the inverse square root
    /// used to orthonormalize rotation matrices.
    pub fn compose(&self, f: impl Fn(T) -> T) -> Matrix3<T> {
        self.pairs
            .iter()
            .fold(Matrix3::zeros(), |acc, pair| {
                acc + pair.vector * pair.vector.transpose() * f(pair.value)
            })
    }
}

impl<T: Real> std::ops::Index<usize> for EigenSolver<T> {
    type Output = EigenPair<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.pairs[index]
    }
}

/// Unit vector spanning the null space of `a - value * I`.
///
/// Any two rows of the shifted matrix are orthogonal to the eigenvector, so their cross product
/// is parallel to it. The pair with the largest cross product is the best conditioned.
fn null_vector<T: Real>(a: &Matrix3<T>, value: T) -> Vector3<T> {
    let shifted = a - Matrix3::from_diagonal_element(value);
    let r0: Vector3<T> = shifted.row(0).transpose();
    let r1: Vector3<T> = shifted.row(1).transpose();
    let r2: Vector3<T> = shifted.row(2).transpose();

    let r0xr1 = r0.cross(&r1);
    let r0xr2 = r0.cross(&r2);
    let r1xr2 = r1.cross(&r2);
    let d0 = r0xr1.norm_squared();
    let d1 = r0xr2.norm_squared();
    let d2 = r1xr2.norm_squared();

    if d0 > d1 && d0 > d2 {
        r0xr1 / d0.sqrt()
    } else if d1 > d2 {
        r0xr2 / d1.sqrt()
    } else {
        r1xr2 / d2.sqrt()
    }
}

/// Orthonormal basis `(u, v)` of the plane orthogonal to the unit vector `w`.
fn orthogonal_complement<T: Real>(w: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let u = if w.x.abs() > w.y.abs() {
        let inv_length = T::one() / (w.x * w.x + w.z * w.z).sqrt();
        Vector3::new(-w.z * inv_length, T::zero(), w.x * inv_length)
    } else {
        let inv_length = T::one() / (w.y * w.y + w.z * w.z).sqrt();
        Vector3::new(T::zero(), w.z * inv_length, -w.y * inv_length)
    };
    let v = w.cross(&u);
    (u, v)
}

/// Eigenvector for `value` restricted to the plane orthogonal to the known eigenvector `w`.
///
/// In the basis `(u, v)` of that plane the shifted matrix reduces to the symmetric 2x2 block
/// `[m00 m01; m01 m11]`, which is singular; the eigenvector is its null direction. The larger
/// row is normalized without squaring large values.
fn complement_vector<T: Real>(a: &Matrix3<T>, value: T, w: &Vector3<T>) -> Vector3<T> {
    let (u, v) = orthogonal_complement(w);
    let au = a * u;
    let av = a * v;

    let mut m00 = u.dot(&au) - value;
    let mut m01 = u.dot(&av);
    let mut m11 = v.dot(&av) - value;

    let one = T::one();
    let zero = T::zero();

    if m00.abs() >= m11.abs() {
        if m00.abs().max(m01.abs()) <= zero {
            return u;
        }
        if m00.abs() >= m01.abs() {
            m01 /= m00;
            m00 = one / (one + m01 * m01).sqrt();
            m01 *= m00;
        } else {
            m00 /= m01;
            m01 = one / (one + m00 * m00).sqrt();
            m00 *= m01;
        }
        u * m01 - v * m00
    } else {
        if m11.abs().max(m01.abs()) <= zero {
            return u;
        }
        if m11.abs() >= m01.abs() {
            m01 /= m11;
            m11 = one / (one + m01 * m01).sqrt();
            m01 *= m11;
        } else {
            m11 /= m01;
            m01 = one / (one + m11 * m11).sqrt();
            m11 *= m01;
        }
        u * m11 - v * m01
    }
}
