//! Planar geometry: typed coordinate spaces, affine maps and point clouds.
//!
//! All attractor geometry lives in [`WorldSpace`], with the y axis pointing up. Renderers map it
//! into [`PixelSpace`] themselves.

use {
  euclid::{Point2D, Vector2D},
  num_traits::Float
};

pub mod affine;
pub mod point_cloud;
pub use {affine::*, point_cloud::*};

/// Pixel coordinate basis
#[derive(Debug, Copy, Clone)]
pub struct PixelSpace;
/// Coordinate basis of the attractor and its magnifications
#[derive(Debug, Copy, Clone)]
pub struct WorldSpace;

pub type P2<T> = Point2D<T, WorldSpace>;
pub type V2<T> = Vector2D<T, WorldSpace>;

/// Squared euclidean norm. Bounding tests compare against squared radii, so no square root is taken.
#[inline]
pub fn norm_sq<T: Float>(v: V2<T>) -> T {
  v.x * v.x + v.y * v.y
}
