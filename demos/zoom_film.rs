/// Zoom into the half-scale Sierpinski triangle, or into the IFS given as a JSON file, and write
/// the film as numbered PNG frames.
///
/// cargo run --release --features drawing --example zoom_film -- [definition.json]

use {
  ifs_zoom::{
    drawing::Canvas,
    ifs::Ifs,
    session::{SessionConfig, ZoomSession}
  },
  anyhow::Result,
  std::time::Duration
};

fn main() -> Result<()> {
  let ifs = match std::env::args().nth(1) {
    Some(path) => Ifs::from_json_file(path)?,
    None => Ifs::half_scale_triangle()
  };
  let config = SessionConfig {
    iterations: 30,
    pause: Duration::from_millis(0),
    seed: 1,
    ..Default::default()
  };
  let out = "film";

  let mut session = ZoomSession::new(ifs, config)?;
  let mut canvas = Canvas::for_session(&session, 800, 800).record_to(out)?;
  let mut clock = session.config().clock();

  let t0 = std::time::Instant::now();
  let report = session.run(&mut canvas, &mut clock, |iteration, neighbors| {
    println!("#{}: {} neighbors", iteration, neighbors);
  })?;
  println!("{:?} after {} iterations, {}ms", report.status, report.history.len(), t0.elapsed().as_millis());
  for record in report.history.iter() {
    println!("{:>4} piece {} -> {} neighbors", record.iteration, record.piece, record.neighbors);
  }

  open::that(format!("{}/frame_00000.png", out))?;
  Ok(())
}
