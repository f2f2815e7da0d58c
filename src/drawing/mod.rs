//! Raster [`Renderer`] backed by an [`RgbaImage`].

use {
  crate::{
    error::Result,
    geometry::{AffineMap, Mat2, P2, PixelSpace, PointCloud, V2, WorldSpace},
    session::{Color, Renderer, ZoomSession}
  },
  euclid::{Point2D, Transform2D},
  image::{Rgba, RgbaImage},
  std::path::{Path, PathBuf}
};


pub struct Canvas {
  image: RgbaImage,
  view: Transform2D<f64, WorldSpace, PixelSpace>,
  point_size: i64,
  frames_dir: Option<PathBuf>,
  frame_count: usize
}

impl Canvas {
  /// Canvas showing the square of half-width `half_width` around the origin, fit to the shorter
  /// side, with the y axis pointing up.
  pub fn new(width: u32, height: u32, half_width: f64) -> Self {
    let scale = width.min(height) as f64 / (2.0 * half_width);
    let view = AffineMap::new(
      Mat2::new(scale, 0.0, 0.0, -scale),
      V2::new(width as f64 / 2.0, height as f64 / 2.0)
    ).to_transform();
    Self {
      image: RgbaImage::from_pixel(width, height, rgba([0, 0, 0])),
      view,
      point_size: (scale / 10.0).clamp(1.0, 3.0) as i64,
      frames_dir: None,
      frame_count: 0
    }
  }

  /// Canvas framing the large window of `session`.
  pub fn for_session(session: &ZoomSession, width: u32, height: u32) -> Self {
    Self::new(width, height, session.windows().1)
  }

  /// Save every presented frame into `dir` as `frame_NNNNN.png`.
  pub fn record_to(mut self, dir: impl AsRef<Path>) -> Result<Self> {
    std::fs::create_dir_all(dir.as_ref())?;
    self.frames_dir = Some(dir.as_ref().to_path_buf());
    Ok(self)
  }

  pub fn image(&self) -> &RgbaImage {
    &self.image
  }

  /// Number of frames presented so far.
  pub fn frame_count(&self) -> usize {
    self.frame_count
  }

  pub fn to_pixel(&self, p: P2<f64>) -> Point2D<f64, PixelSpace> {
    self.view.transform_point(p)
  }

  /// Fill pixels `[x0, x1) × [y0, y1)`, clipped to the image.
  fn fill_rect(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Color) {
    let (width, height) = self.image.dimensions();
    let xs = x0.max(0)..x1.min(width as i64);
    let ys = y0.max(0)..y1.min(height as i64);
    let color = rgba(color);
    itertools::iproduct!(ys, xs)
      .for_each(|(y, x)| self.image.put_pixel(x as u32, y as u32, color));
  }

  fn pixel(&self, p: P2<f64>) -> (i64, i64) {
    let q = self.to_pixel(p);
    (q.x.floor() as i64, q.y.floor() as i64)
  }
}

impl Renderer for Canvas {
  fn clear(&mut self) {
    let black = rgba([0, 0, 0]);
    self.image.pixels_mut().for_each(|pixel| *pixel = black);
  }

  fn draw_points(&mut self, points: &PointCloud, color: Color) {
    let size = self.point_size;
    points.iter().for_each(|p| {
      let (x, y) = self.pixel(p);
      self.fill_rect((x, y), (x + size, y + size), color);
    });
  }

  fn draw_rect_outline(&mut self, corner: P2<f64>, size: f64, color: Color) {
    let (x0, y0) = self.pixel(corner);
    let (x1, y1) = self.pixel(corner + V2::new(size, -size));
    self.fill_rect((x0, y0), (x1 + 1, y0 + 1), color);
    self.fill_rect((x0, y1), (x1 + 1, y1 + 1), color);
    self.fill_rect((x0, y0), (x0 + 1, y1 + 1), color);
    self.fill_rect((x1, y0), (x1 + 1, y1 + 1), color);
  }

  fn present(&mut self) -> Result<()> {
    if let Some(dir) = &self.frames_dir {
      let path = dir.join(format!("frame_{:05}.png", self.frame_count));
      self.image.save(&path)?;
      log::debug!("saved {}", path.display());
    }
    self.frame_count += 1;
    Ok(())
  }
}

fn rgba([r, g, b]: Color) -> Rgba<u8> {
  Rgba([r, g, b, 255])
}
