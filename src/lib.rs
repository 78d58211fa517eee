//! The `m2c` library provides a value type for complex 2-by-2 matrices, the
//! operators acting on 2-dimensional states (qubits, polarization modes).
//! It relies on `num-complex` for the scalar arithmetic, so every entry is an
//! IEEE `f64` pair and equality is exact.
//!
//! ```
//! use m2c::{Complex64, CpxMat};
//!
//! let a = CpxMat::new(
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(1.0, 0.0),
//!     Complex64::new(0.0, 1.0),
//!     Complex64::new(0.0, 0.0),
//! );
//! assert_eq!(a.det(), Complex64::new(0.0, -1.0));
//! assert_eq!(a * a.inv().unwrap(), CpxMat::IDENTITY);
//! ```

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

pub mod error;

pub use error::{M2cError, Result};
pub use num_complex::Complex64;

const C_ZERO: Complex64 = Complex64::new(0.0, 0.0);
const C_ONE: Complex64 = Complex64::new(1.0, 0.0);
const C_NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

/// Complex division by Smith's method.
///
/// Scales by the ratio of the divisor's parts instead of dividing by its
/// squared norm, so the result stays finite whenever the quotient is
/// representable, even for divisors near the edges of the `f64` range.
fn smith_div(num: Complex64, den: Complex64) -> Complex64 {
    let (a, b, c, d) = (num.re, num.im, den.re, den.im);
    if c.abs() >= d.abs() {
        let r = d / c;
        let t = c + d * r;
        Complex64::new((a + b * r) / t, (b - a * r) / t)
    } else {
        let r = c / d;
        let t = c * r + d;
        Complex64::new((a * r + b) / t, (b * r - a) / t)
    }
}

/// A complex 2-by-2 matrix stored row-major.
///
/// `CpxMat` is a plain `Copy` value: none of its operations mutate an operand,
/// each returns a new matrix. Equality compares the four entries exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpxMat {
    /// Top-left entry.
    pub tl: Complex64,
    /// Top-right entry.
    pub tr: Complex64,
    /// Bottom-left entry.
    pub bl: Complex64,
    /// Bottom-right entry.
    pub br: Complex64,
}

impl CpxMat {
    /// The multiplicative identity.
    pub const IDENTITY: CpxMat = CpxMat {
        tl: C_ONE,
        tr: C_ZERO,
        bl: C_ZERO,
        br: C_ONE,
    };
    /// The additive identity.
    pub const ZERO: CpxMat = CpxMat {
        tl: C_ZERO,
        tr: C_ZERO,
        bl: C_ZERO,
        br: C_ZERO,
    };
    /// The symplectic form `[[0, 1], [-1, 0]]`.
    pub const SYMPLECTIC: CpxMat = CpxMat {
        tl: C_ZERO,
        tr: C_ONE,
        bl: C_NEG_ONE,
        br: C_ZERO,
    };

    /// Constructs a matrix from its entries in row-major order.
    pub const fn new(tl: Complex64, tr: Complex64, bl: Complex64, br: Complex64) -> Self {
        CpxMat { tl, tr, bl, br }
    }

    /// Constructs the diagonal matrix `[[d0, 0], [0, d1]]`.
    pub const fn diag(d0: Complex64, d1: Complex64) -> Self {
        CpxMat {
            tl: d0,
            tr: C_ZERO,
            bl: C_ZERO,
            br: d1,
        }
    }

    /// Returns [`CpxMat::IDENTITY`].
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns [`CpxMat::ZERO`].
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns [`CpxMat::SYMPLECTIC`].
    pub const fn symplectic() -> Self {
        Self::SYMPLECTIC
    }

    /// Multiplies every entry by `k`.
    pub fn scale(&self, k: Complex64) -> Self {
        CpxMat {
            tl: self.tl * k,
            tr: self.tr * k,
            bl: self.bl * k,
            br: self.br * k,
        }
    }

    /// Swaps the off-diagonal entries.
    pub fn transpose(&self) -> Self {
        CpxMat {
            tl: self.tl,
            tr: self.bl,
            bl: self.tr,
            br: self.br,
        }
    }

    /// Complex-conjugates every entry.
    pub fn conj(&self) -> Self {
        CpxMat {
            tl: self.tl.conj(),
            tr: self.tr.conj(),
            bl: self.bl.conj(),
            br: self.br.conj(),
        }
    }

    /// Apply a Hermitian conjugate (dagger): conjugate, then transpose.
    pub fn dag(&self) -> Self {
        self.conj().transpose()
    }

    /// Returns the determinant `tl * br - tr * bl`.
    pub fn det(&self) -> Complex64 {
        self.tl * self.br - self.tr * self.bl
    }

    /// Returns the trace `tl + br`.
    pub fn trace(&self) -> Complex64 {
        self.tl + self.br
    }

    /// Returns `true` if the determinant is exactly zero.
    pub fn is_singular(&self) -> bool {
        self.det() == C_ZERO
    }

    /// Computes the multiplicative inverse with the closed-form adjugate formula.
    ///
    /// Each entry of `[[br, -tr], [-bl, tl]]` is divided by the determinant.
    /// There is no tolerance: only a matrix for which [`CpxMat::is_singular`]
    /// holds is rejected, with [`M2cError::SingularMatrix`] carrying `self`.
    /// A NaN determinant is not zero, so it yields NaN entries instead.
    pub fn inv(&self) -> Result<Self> {
        if self.is_singular() {
            tracing::debug!(matrix = %self, "rejecting inversion of a singular matrix");
            return Err(M2cError::SingularMatrix { matrix: *self });
        }
        let det = self.det();
        Ok(CpxMat {
            tl: smith_div(self.br, det),
            tr: smith_div(-self.tr, det),
            bl: smith_div(-self.bl, det),
            br: smith_div(self.tl, det),
        })
    }

    /// Checks whether every entry is exactly zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Checks whether this matrix is exactly the identity.
    pub fn is_id(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Convert the matrix into a [[Complex64; 2]; 2] form.
    pub fn to_mat(self) -> [[Complex64; 2]; 2] {
        [[self.tl, self.tr], [self.bl, self.br]]
    }
}

impl Default for CpxMat {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[[Complex64; 2]; 2]> for CpxMat {
    fn from(rows: [[Complex64; 2]; 2]) -> Self {
        let [[tl, tr], [bl, br]] = rows;
        CpxMat { tl, tr, bl, br }
    }
}

impl From<CpxMat> for [[Complex64; 2]; 2] {
    fn from(mat: CpxMat) -> Self {
        mat.to_mat()
    }
}

impl fmt::Display for CpxMat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}, {}]", self.tl, self.tr)?;
        write!(f, "[{}, {}]", self.bl, self.br)
    }
}

impl Neg for CpxMat {
    type Output = Self;
    fn neg(self) -> Self::Output {
        CpxMat {
            tl: -self.tl,
            tr: -self.tr,
            bl: -self.bl,
            br: -self.br,
        }
    }
}

impl Add for CpxMat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        CpxMat {
            tl: self.tl + rhs.tl,
            tr: self.tr + rhs.tr,
            bl: self.bl + rhs.bl,
            br: self.br + rhs.br,
        }
    }
}
impl AddAssign for CpxMat {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl Sub for CpxMat {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        CpxMat {
            tl: self.tl - rhs.tl,
            tr: self.tr - rhs.tr,
            bl: self.bl - rhs.bl,
            br: self.br - rhs.br,
        }
    }
}
impl SubAssign for CpxMat {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Matrix product. Not commutative: `a * b` applies `b` first.
impl Mul for CpxMat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        CpxMat {
            tl: self.tl * rhs.tl + self.tr * rhs.bl,
            tr: self.tl * rhs.tr + self.tr * rhs.br,
            bl: self.bl * rhs.tl + self.br * rhs.bl,
            br: self.bl * rhs.tr + self.br * rhs.br,
        }
    }
}

impl Mul<Complex64> for CpxMat {
    type Output = Self;
    fn mul(self, rhs: Complex64) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<CpxMat> for Complex64 {
    type Output = CpxMat;
    fn mul(self, rhs: CpxMat) -> Self::Output {
        rhs.scale(self)
    }
}
impl Mul<f64> for CpxMat {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(Complex64::from(rhs))
    }
}
impl Mul<CpxMat> for f64 {
    type Output = CpxMat;
    fn mul(self, rhs: CpxMat) -> Self::Output {
        rhs.scale(Complex64::from(self))
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for CpxMat {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        <f64 as approx::AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.to_mat()
            .iter()
            .flatten()
            .zip(other.to_mat().iter().flatten())
            .all(|(x, y)| {
                approx::AbsDiffEq::abs_diff_eq(&x.re, &y.re, epsilon)
                    && approx::AbsDiffEq::abs_diff_eq(&x.im, &y.im, epsilon)
            })
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for CpxMat {
    fn default_max_relative() -> Self::Epsilon {
        <f64 as approx::RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.to_mat()
            .iter()
            .flatten()
            .zip(other.to_mat().iter().flatten())
            .all(|(x, y)| {
                approx::RelativeEq::relative_eq(&x.re, &y.re, epsilon, max_relative)
                    && approx::RelativeEq::relative_eq(&x.im, &y.im, epsilon, max_relative)
            })
    }
}
