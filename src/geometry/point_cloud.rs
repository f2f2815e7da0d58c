use {
  super::{AffineMap, P2, WorldSpace, norm_sq},
  euclid::Box2D,
  std::fmt::{Debug, Formatter}
};

/// Points stored as two parallel coordinate sequences.
#[derive(Clone, Default, PartialEq)]
pub struct PointCloud {
  pub xs: Vec<f64>,
  pub ys: Vec<f64>
}

impl PointCloud {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      xs: Vec::with_capacity(capacity),
      ys: Vec::with_capacity(capacity)
    }
  }

  pub fn push(&mut self, p: P2<f64>) {
    self.xs.push(p.x);
    self.ys.push(p.y);
  }

  pub fn len(&self) -> usize {
    self.xs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.xs.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<P2<f64>> {
    Some(P2::new(*self.xs.get(index)?, *self.ys.get(index)?))
  }

  pub fn iter(&self) -> impl Iterator<Item = P2<f64>> + '_ {
    self.xs.iter()
      .zip(self.ys.iter())
      .map(|(&x, &y)| P2::new(x, y))
  }

  /// Image of every point under `map`.
  pub fn transform(&self, map: &AffineMap) -> Self {
    self.iter().map(|p| map.apply(p)).collect()
  }

  /// Image under `map`, restricted to the open square `|x| < half_width, |y| < half_width`.
  pub fn transform_within(&self, map: &AffineMap, half_width: f64) -> Self {
    self.iter()
      .map(|p| map.apply(p))
      .filter(|p| p.x.abs() < half_width && p.y.abs() < half_width)
      .collect()
  }

  /// Points generated by piece `piece` of an `m`-map system: indices `piece, piece + m, ...`
  pub fn piece(&self, piece: usize, m: usize) -> Self {
    self.iter()
      .skip(piece)
      .step_by(m.max(1))
      .collect()
  }

  /// Largest distance from the origin.
  pub fn max_radius(&self) -> f64 {
    self.iter()
      .map(|p| norm_sq(p.to_vector()))
      .fold(0.0, f64::max)
      .sqrt()
  }

  pub fn bounding_box(&self) -> Box2D<f64, WorldSpace> {
    Box2D::from_points(self.iter())
  }

  /// Half of the longer side of the bounding box.
  pub fn half_range(&self) -> f64 {
    let size = self.bounding_box().size();
    size.width.max(size.height) / 2.0
  }
}

impl FromIterator<P2<f64>> for PointCloud {
  fn from_iter<I: IntoIterator<Item = P2<f64>>>(iter: I) -> Self {
    let iter = iter.into_iter();
    let mut cloud = Self::with_capacity(iter.size_hint().0);
    iter.for_each(|p| cloud.push(p));
    cloud
  }
}

impl Debug for PointCloud {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    use humansize::{FileSize, file_size_opts as options};

    let size = (self.xs.capacity() + self.ys.capacity()) * std::mem::size_of::<f64>();
    f.debug_struct("PointCloud")
      .field("len", &self.len())
      .field("size", &size.file_size(options::BINARY).unwrap_or_default())
      .finish()
  }
}
