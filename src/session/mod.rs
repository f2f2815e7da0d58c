//! The zoom driver.
//!
//! A [`ZoomSession`] generates the attractor cloud once, then repeatedly picks a piece, magnifies
//! it to the size of the whole attractor and redraws it together with every neighboring piece
//! still visible in the window of half-width `b`. The tracked neighbors of one iteration are the
//! seed of the next one's neighbor maps.
//!
//! ```text
//!  Ready ──run──▶ Running ──nit iterations──▶ Completed
//!                   │ ├──should_stop──────────▶ Stopped
//!                   │ └──neighbors > ceiling──▶ EmergencyStopped
//!                   └──error──────────────────▶ Failed
//! ```

use {
  crate::{
    error::{Error, Result},
    geometry::{AffineMap, Mat2, P2, PointCloud, V2},
    ifs::Ifs,
    profile,
    solver::{self, NeighborEntry, PieceSelector}
  },
  rand::{Rng, SeedableRng},
  rand_pcg::Pcg64,
  std::time::Duration
};

pub mod clock;
pub mod render;
pub use {
  clock::{FrameClock, Immediate, SleepClock, StopHandle, CancelWith},
  render::{Color, NullRenderer, Renderer},
  crate::solver::Selection
};

/// Retained neighbor count above which a session stops on its own.
pub const NEIGHBOR_CEILING: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
  /// Number of magnifications, `nit`.
  pub iterations: usize,
  /// Delay between frames, for clocks built from the config.
  pub pause: Duration,
  pub selection: Selection,
  /// Ratio `b / a` of the large and the small window.
  pub ratio: f64,
  pub seed: u64,
  pub neighbor_ceiling: usize
}

impl Default for SessionConfig {
  fn default() -> Self {
    SessionConfig {
      iterations: 50,
      pause: Duration::from_millis(500),
      selection: Selection::default(),
      ratio: 3.0,
      seed: 0,
      neighbor_ceiling: NEIGHBOR_CEILING
    }}}

impl SessionConfig {
  pub fn validate(&self, m: usize) -> Result<()> {
    let invalid = |msg: String| Err(Error::InvalidParameter(msg));
    if self.iterations == 0 {
      return invalid("iteration count must be positive".into());
    }
    if !(self.ratio.is_finite() && self.ratio > 0.0) {
      return invalid(format!("window ratio must be positive, got {}", self.ratio));
    }
    match &self.selection {
      Selection::Weight(w) if !w.is_finite() =>
        invalid(format!("selection weight must be finite, got {}", w)),
      Selection::Scripted(script) => match script.iter().find(|&&i| i >= m) {
        Some(i) => invalid(format!("scripted piece {} out of range 0..{}", i, m)),
        None => Ok(())
      },
      _ => Ok(())
    }
  }

  /// A [`SleepClock`] pausing for [`pause`](Self::pause).
  pub fn clock(&self) -> SleepClock {
    SleepClock::new(self.pause)
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionStatus {
  Ready,
  Running,
  /// Ran all configured iterations.
  Completed,
  /// The frame clock asked to stop.
  Stopped,
  /// Too many neighbors to keep following; not an error.
  EmergencyStopped,
  /// Aborted by an error, which has been returned to the caller.
  Failed
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IterationRecord {
  /// 1-based
  pub iteration: usize,
  pub piece: usize,
  /// Neighbors retained after this iteration.
  pub neighbors: usize,
  pub scripted: bool
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
  pub status: SessionStatus,
  pub history: Vec<IterationRecord>
}

/// Mutable part of a session.
#[derive(Debug, Clone)]
pub struct ZoomState {
  /// Accumulated magnification `D`.
  pub magnification: AffineMap,
  pub neighbors: Vec<NeighborEntry>,
  /// The magnified piece, as last drawn.
  pub central: PointCloud
}

pub struct ZoomSession {
  ifs: Ifs,
  config: SessionConfig,
  base: PointCloud,
  /// half-width of the small window
  a: f64,
  /// half-width of the large window
  b: f64,
  /// `R · g⁻¹`
  normalizer: Mat2,
  selector: PieceSelector,
  rng: Pcg64,
  state: ZoomState,
  status: SessionStatus
}

impl ZoomSession {
  /// Validate the parameters and generate the attractor cloud.
  pub fn new(ifs: Ifs, config: SessionConfig) -> Result<Self> {
    let m = ifs.len();
    if m <= 1 {
      return Err(Error::InvalidTransformCount(m));
    }
    config.validate(m)?;
    let base = profile!("generate", solver::generate(ifs.g(), ifs.maps())?);

    let a = match base.max_radius() {
      a if a > 0.0 && a.is_finite() => a,
      _ => match base.half_range() {
        a if a > 0.0 && a.is_finite() => a,
        _ => 1.0
      }
    };
    let b = config.ratio * a;
    let normalizer = Mat2::scale(ifs.scale_factor()) * ifs.g().inverse()?;
    log::info!("zoom session: m = {}, a = {:.3}, b = {:.3}, {:?}", m, a, b, config.selection);

    Ok(Self {
      selector: PieceSelector::new(config.selection.clone()),
      rng: Pcg64::seed_from_u64(config.seed),
      state: ZoomState {
        magnification: AffineMap::identity(),
        neighbors: vec![],
        central: base.clone()
      },
      status: SessionStatus::Ready,
      ifs, config, base, a, b, normalizer
    })
  }

  pub fn ifs(&self) -> &Ifs {
    &self.ifs
  }

  pub fn config(&self) -> &SessionConfig {
    &self.config
  }

  /// The attractor cloud every projection starts from.
  pub fn base(&self) -> &PointCloud {
    &self.base
  }

  /// Half-widths `(a, b)` of the small and the large window.
  pub fn windows(&self) -> (f64, f64) {
    (self.a, self.b)
  }

  pub fn state(&self) -> &ZoomState {
    &self.state
  }

  pub fn status(&self) -> SessionStatus {
    self.status
  }

  /// Run the film to its end. `progress` receives `(iteration, retained neighbors)` after every
  /// iteration.
  pub fn run(
    &mut self,
    renderer: &mut dyn Renderer,
    clock: &mut dyn FrameClock,
    mut progress: impl FnMut(usize, usize)
  ) -> Result<SessionReport> {
    if self.status != SessionStatus::Ready {
      return Err(Error::InvalidParameter(format!("session already {:?}", self.status)));
    }
    self.status = SessionStatus::Running;
    match self.run_iterations(renderer, clock, &mut progress) {
      Ok(history) => {
        if self.status == SessionStatus::Running {
          self.status = SessionStatus::Completed;
        }
        log::info!("zoom session finished: {:?} after {} iterations", self.status, history.len());
        Ok(SessionReport { status: self.status, history })
      }
      Err(e) => {
        self.status = SessionStatus::Failed;
        Err(e)
      }
    }
  }

  fn run_iterations(
    &mut self,
    renderer: &mut dyn Renderer,
    clock: &mut dyn FrameClock,
    progress: &mut dyn FnMut(usize, usize)
  ) -> Result<Vec<IterationRecord>> {
    renderer.clear();
    self.draw_central(renderer, &self.state.central);
    self.draw_windows(renderer);
    renderer.present()?;
    clock.pause();

    let mut history = Vec::with_capacity(self.config.iterations);
    for iteration in 0..self.config.iterations {
      if clock.should_stop() {
        self.status = SessionStatus::Stopped;
        break;
      }
      let record = self.step(iteration, renderer)?;
      progress(record.iteration, record.neighbors);
      history.push(record);

      if record.neighbors > self.config.neighbor_ceiling {
        log::warn!(
          "{} neighbors after iteration {}, exceeding {}: stopping",
          record.neighbors, record.iteration, self.config.neighbor_ceiling
        );
        self.status = SessionStatus::EmergencyStopped;
        break;
      }
      clock.pause();
    }
    Ok(history)
  }

  /// One magnification: choose a piece, zoom into it and redraw.
  fn step(&mut self, iteration: usize, renderer: &mut dyn Renderer) -> Result<IterationRecord> {
    use rayon::prelude::*;

    let (a, b) = (self.a, self.b);
    let m = self.ifs.len();
    let pick = self.selector.select(iteration, &self.ifs, &self.state.neighbors, a, &mut self.rng);
    let i = pick.piece;

    // mark the chosen piece on the current frame
    let chosen = self.state.central.piece(i, m);
    renderer.draw_points(&chosen, render::RED);
    if let Some(p) = chosen.get(0) {
      let rr = b / self.ifs.scale_factor();
      renderer.draw_rect_outline(p + V2::new(-rr, rr), 2.0 * rr, render::RED);
    }
    renderer.present()?;

    let zoom = AffineMap::from_linear(self.normalizer * self.ifs.maps()[i].linear);
    self.state.magnification = self.state.magnification.compose(&zoom);
    let d = self.state.magnification;

    let candidates = solver::neighbor_maps(&self.ifs, i, &self.state.neighbors, a + b)?;
    let base = &self.base;
    let visible: Vec<PointCloud> = profile!("project", candidates.par_iter()
      .map(|entry| base.transform_within(&d.compose(&entry.map), b))
      .collect());

    renderer.clear();
    let mut retained = Vec::with_capacity(candidates.len());
    for (entry, points) in candidates.iter().zip(visible.iter()) {
      if points.is_empty() {
        continue;
      }
      let color = [0, self.rng.gen_range(0..255), self.rng.gen_range(0..255)];
      renderer.draw_points(points, color);
      retained.push(*entry);
    }
    self.draw_windows(renderer);
    let central = self.base.transform(&d);
    self.draw_central(renderer, &central);
    renderer.present()?;

    log::debug!(
      "iteration {}: piece {}{}, {} candidates, {} retained",
      iteration + 1, i, if pick.scripted { " (scripted)" } else { "" },
      candidates.len(), retained.len()
    );
    let record = IterationRecord {
      iteration: iteration + 1,
      piece: i,
      neighbors: retained.len(),
      scripted: pick.scripted
    };
    self.state.neighbors = retained;
    self.state.central = central;
    Ok(record)
  }

  /// Central cloud coloured by piece.
  fn draw_central(&self, renderer: &mut dyn Renderer, central: &PointCloud) {
    let m = self.ifs.len();
    (0..m).for_each(|j| renderer.draw_points(&central.piece(j, m), render::piece_color(j)));
  }

  fn draw_windows(&self, renderer: &mut dyn Renderer) {
    for &half in [self.b, self.a].iter() {
      renderer.draw_rect_outline(P2::new(-half, half), 2.0 * half, render::WHITE);
    }
  }
}
