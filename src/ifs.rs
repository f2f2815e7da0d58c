//! Iterated function system definitions: a generator matrix `g` and the maps `H_0 .. H_{m-1}`.
//!
//! Definitions are read from JSON of the form
//! ```text
//! { "g": [[2, 0], [0, 2]],
//!   "H": [ [[1, 0, 0], [0, 1, 0]],
//!          [[1, 0, 1], [0, 1, 0], [0, 0, 1]] ] }
//! ```
//! where every map is either a 2×3 matrix `[A | t]` or its 3×3 homogeneous form.

use {
  crate::{
    error::{Error, Result},
    geometry::{AffineMap, Mat2, V2}
  },
  serde::Deserialize,
  std::path::Path
};

#[derive(Debug, Clone, PartialEq)]
pub struct Ifs {
  g: Mat2,
  maps: Vec<AffineMap>
}

#[derive(Deserialize)]
struct RawIfs {
  g: Vec<Vec<f64>>,
  #[serde(rename = "H")]
  h: Vec<Vec<Vec<f64>>>
}

impl Ifs {
  pub fn new(g: Mat2, maps: Vec<AffineMap>) -> Result<Self> {
    if maps.len() <= 1 {
      return Err(Error::InvalidTransformCount(maps.len()));
    }
    Ok(Self { g, maps })
  }

  pub fn from_json_str(json: &str) -> Result<Self> {
    let raw: RawIfs = serde_json::from_str(json)?;
    let g = Mat2::from_rows(&raw.g)?;
    let maps = raw.h.iter()
      .map(|rows| AffineMap::from_rows(rows))
      .collect::<Result<Vec<_>>>()?;
    Self::new(g, maps)
  }

  pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    Self::from_json_str(&json)
  }

  /// Sierpinski triangle from three half-scale maps offset by 0 and 1/2, with `g = 2I`. The
  /// attractor is the triangle (0, 0), (1/3, 0), (0, 1/3).
  pub fn half_scale_triangle() -> Self {
    let h = |x: f64, y: f64| AffineMap::new(Mat2::scale(0.5), V2::new(x, y));
    Self {
      g: Mat2::scale(2.0),
      maps: vec![h(0.0, 0.0), h(0.5, 0.0), h(0.0, 0.5)]
    }
  }

  /// Sierpinski triangle with unit-scale maps: three copies offset by 0 and 1, shrunk only by
  /// the generator `g = 2I`.
  pub fn sierpinski() -> Self {
    Self::translates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
  }

  /// The unit square split into four quarters; every piece touches all of its siblings.
  pub fn square_tiling() -> Self {
    Self::translates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)])
  }

  fn translates(offsets: &[(f64, f64)]) -> Self {
    Self {
      g: Mat2::scale(2.0),
      maps: offsets.iter()
        .map(|&(x, y)| AffineMap::new(Mat2::identity(), V2::new(x, y)))
        .collect()
    }
  }

  pub fn g(&self) -> &Mat2 {
    &self.g
  }

  pub fn maps(&self) -> &[AffineMap] {
    &self.maps
  }

  /// Number of maps, `m`.
  pub fn len(&self) -> usize {
    self.maps.len()
  }

  /// `R = sqrt(|det g|)`, the linear scale of one subdivision step.
  pub fn scale_factor(&self) -> f64 {
    self.g.det().abs().sqrt()
  }
}
