use {
  super::{P2, V2, WorldSpace},
  crate::error::{Error, Result},
  euclid::Transform2D,
  num_traits::Float,
  std::ops::Mul
};

/// Inversion refuses matrices whose determinant is smaller than this in magnitude.
pub const SINGULAR_EPS: f64 = 1e-10;

/// Row-major 2×2 matrix, acting on column vectors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat2<T = f64>(pub [[T; 2]; 2]);

impl <T: Float> Mat2<T> {
  pub fn new(m00: T, m01: T, m10: T, m11: T) -> Self {
    Self([[m00, m01], [m10, m11]])
  }

  pub fn identity() -> Self {
    Self::scale(T::one())
  }

  pub fn scale(s: T) -> Self {
    Self::new(s, T::zero(), T::zero(), s)
  }

  pub fn det(&self) -> T {
    let [[a, b], [c, d]] = self.0;
    a * d - b * c
  }

  pub fn inverse(&self) -> Result<Self> {
    let det = self.det();
    let eps = T::from(SINGULAR_EPS).unwrap_or_else(T::epsilon);
    // NaN determinants fail too
    if !(det.abs() >= eps) {
      return Err(Error::SingularMatrix { det: det.to_f64().unwrap_or(f64::NAN) });
    }
    let [[a, b], [c, d]] = self.0;
    let inv = T::one() / det;
    Ok(Self::new(d * inv, -b * inv, -c * inv, a * inv))
  }

  pub fn apply(&self, v: V2<T>) -> V2<T> {
    let [[a, b], [c, d]] = self.0;
    V2::new(a * v.x + b * v.y, c * v.x + d * v.y)
  }

  /// Read a matrix from nested rows, checking that they form exactly 2×2.
  pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
    let found = shape(rows);
    match rows {
      [r0, r1] if r0.len() == 2 && r1.len() == 2 => Ok(Self::new(r0[0], r0[1], r1[0], r1[1])),
      _ => Err(Error::DimensionMismatch { expected: (2, 2), found })
    }
  }
}

impl <T: Float> Mul for Mat2<T> {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    let [[a, b], [c, d]] = self.0;
    let [[e, f], [g, h]] = rhs.0;
    Self::new(
      a * e + b * g, a * f + b * h,
      c * e + d * g, c * f + d * h
    )
  }
}

impl <T: Float> Mul<V2<T>> for Mat2<T> {
  type Output = V2<T>;

  fn mul(self, rhs: V2<T>) -> V2<T> {
    self.apply(rhs)
  }
}

/// `p ↦ linear·p + translation`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineMap<T = f64> {
  pub linear: Mat2<T>,
  pub translation: V2<T>
}

impl <T: Float> AffineMap<T> {
  pub fn new(linear: Mat2<T>, translation: V2<T>) -> Self {
    Self { linear, translation }
  }

  pub fn identity() -> Self {
    Self::from_linear(Mat2::identity())
  }

  pub fn from_linear(linear: Mat2<T>) -> Self {
    Self::new(linear, V2::new(T::zero(), T::zero()))
  }

  /// The same map with its translation dropped.
  pub fn linear_part(&self) -> Self {
    Self::from_linear(self.linear)
  }

  /// `self ∘ other`, i.e. `other` is applied first.
  pub fn compose(&self, other: &Self) -> Self {
    Self::new(
      self.linear * other.linear,
      self.linear * other.translation + self.translation
    )
  }

  pub fn inverse(&self) -> Result<Self> {
    let linear = self.linear.inverse()?;
    Ok(Self::new(linear, -(linear * self.translation)))
  }

  pub fn apply(&self, p: P2<T>) -> P2<T> {
    (self.linear * p.to_vector() + self.translation).to_point()
  }

  /// Read a map from a 2×3 matrix `[A | t]`, or from its 3×3 homogeneous form, in which case the
  /// last row is dropped.
  pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
    let found = shape(rows);
    let affine_rows = match rows.len() {
      2 | 3 => &rows[..2],
      _ => return Err(Error::DimensionMismatch { expected: (2, 3), found })
    };
    if rows.iter().any(|row| row.len() != 3) {
      return Err(Error::DimensionMismatch { expected: (rows.len(), 3), found });
    }
    let [r0, r1] = [&affine_rows[0], &affine_rows[1]];
    Ok(Self::new(
      Mat2::new(r0[0], r0[1], r1[0], r1[1]),
      V2::new(r0[2], r1[2])
    ))
  }

  /// Same map as an euclid transform (row-vector convention), retargeted to another space.
  pub fn to_transform<Dst>(&self) -> Transform2D<T, WorldSpace, Dst> {
    let [[a, b], [c, d]] = self.linear.0;
    Transform2D::new(
      a, c,
      b, d,
      self.translation.x, self.translation.y
    )
  }
}

/// `(rows, widest row)` of a nested matrix.
fn shape<T>(rows: &[Vec<T>]) -> (usize, usize) {
  (rows.len(), rows.iter().map(Vec::len).max().unwrap_or(0))
}
