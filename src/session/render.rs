use crate::{
  error::Result,
  geometry::{P2, PointCloud}
};

pub type Color = [u8; 3];

pub const WHITE: Color = [255, 255, 255];
pub const RED: Color = [255, 0, 0];

/// Colours of the pieces of the central cloud, cycled by piece index.
pub const PIECE_PALETTE: [Color; 6] = [
  [255, 255, 0],   // yellow
  [255, 0, 255],   // magenta
  [204, 128, 128], // light red
  [204, 179, 51],  // orange
  [204, 51, 179],  // pink
  [204, 204, 204]  // light gray
];

pub fn piece_color(piece: usize) -> Color {
  PIECE_PALETTE[piece % PIECE_PALETTE.len()]
}

/// Draw surface of a session. Coordinates are in world space, centered on the magnified piece.
pub trait Renderer {
  fn clear(&mut self);
  fn draw_points(&mut self, points: &PointCloud, color: Color);
  /// Outline of the axis-aligned square with top-left `corner` and side `size`.
  fn draw_rect_outline(&mut self, corner: P2<f64>, size: f64, color: Color);
  /// The current frame is complete.
  fn present(&mut self) -> Result<()> {
    Ok(())
  }
}

/// Discards everything.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
  fn clear(&mut self) {}
  fn draw_points(&mut self, _: &PointCloud, _: Color) {}
  fn draw_rect_outline(&mut self, _: P2<f64>, _: f64, _: Color) {}
}
