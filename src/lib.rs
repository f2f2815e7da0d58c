//! Zoom films through the attractors of planar iterated function systems.
//!
//! An IFS is given by a generator matrix `g` and `m ≥ 2` affine maps `H_0 .. H_{m-1}`; each map
//! places one self-similar piece of the attractor. The crate explores the attractor one
//! magnification at a time: a piece is chosen, blown up to the size of the whole, and drawn
//! together with every neighboring piece that is still visible. Neighbors of the next level are
//! derived from the ones tracked so far, so the film can go arbitrarily deep.
//!
//! It is split into [`solver`], with the three algorithms (cloud generation, neighbor maps,
//! piece selection), and [`session`], which drives them and talks to a [`Renderer`] and a
//! [`FrameClock`]. An image-backed renderer lives in `drawing` (requires the `drawing` feature).
//!
//! # Basic usage
//! ```no_run
//! # use ifs_zoom::{
//! #   error::Result,
//! #   ifs::Ifs,
//! #   session::{NullRenderer, SessionConfig, ZoomSession, Selection}
//! # };
//! # fn main() -> Result<()> {
//! let config = SessionConfig {
//!   iterations: 20,
//!   // magnify pieces 0 and 2 first, then choose at random
//!   selection: Selection::Scripted(vec![0, 2]),
//!   ..Default::default()
//! };
//! // generates the attractor cloud, at least 40000 points
//! let mut session = ZoomSession::new(Ifs::sierpinski(), config)?;
//! let mut clock = session.config().clock();
//! let report = session.run(&mut NullRenderer, &mut clock, |iteration, neighbors| {
//!   println!("#{}: {} neighbors", iteration, neighbors);
//! })?;
//! println!("{:?}", report.status);
//! # Ok(())
//! # }
//! ```
//!
//! [`Renderer`]: session::Renderer
//! [`FrameClock`]: session::FrameClock

pub mod error;
mod util;
pub mod geometry;
pub mod ifs;
pub mod solver;
pub mod session;
#[cfg(feature = "drawing")]
pub mod drawing;
