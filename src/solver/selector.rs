use {
  super::neighbors::{NeighborEntry, neighbor_counts},
  crate::ifs::Ifs,
  rand::Rng
};

/// Weight used once a scripted sequence runs out.
pub const SCRIPT_FALLBACK_WEIGHT: f64 = 3.0;

/// How the next piece to magnify is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
  /// Random choice, weighting piece `i` by `u_i^w` where `u_i` counts its neighbors.
  Weight(f64),
  /// Pieces taken in order for the first iterations, then
  /// `Weight(`[`SCRIPT_FALLBACK_WEIGHT`]`)`.
  Scripted(Vec<usize>)
}

impl Default for Selection {
  fn default() -> Self {
    Selection::Weight(3.0)
  }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pick {
  pub piece: usize,
  pub scripted: bool
}

#[derive(Debug, Clone)]
pub struct PieceSelector {
  selection: Selection
}

impl PieceSelector {
  pub fn new(selection: Selection) -> Self {
    Self { selection }
  }

  /// Weight of the random choice at `iteration` (0-based), `None` while scripted.
  pub fn weight(&self, iteration: usize) -> Option<f64> {
    match &self.selection {
      Selection::Weight(w) => Some(*w),
      Selection::Scripted(script) if iteration < script.len() => None,
      Selection::Scripted(_) => Some(SCRIPT_FALLBACK_WEIGHT)
    }
  }

  /// Choose the piece to magnify at `iteration` (0-based), given the neighbors tracked so far and
  /// the half-width `a` of the base window.
  pub fn select(
    &self,
    iteration: usize,
    ifs: &Ifs,
    previous: &[NeighborEntry],
    a: f64,
    rng: &mut impl Rng
  ) -> Pick {
    match (&self.selection, self.weight(iteration)) {
      (Selection::Scripted(script), None) => Pick { piece: script[iteration], scripted: true },
      (_, weight) => {
        let counts = neighbor_counts(ifs, previous, a);
        Pick {
          piece: weighted_choice(&counts, weight.unwrap_or(SCRIPT_FALLBACK_WEIGHT), rng),
          scripted: false
        }
      }
    }
  }
}

/// `u_i^w` for every count. `0^0 = 1`, so `w = 0` weights every piece equally.
pub fn piece_weights(counts: &[usize], weight: f64) -> Vec<f64> {
  counts.iter()
    .map(|&u| (u as f64).powf(weight))
    .collect()
}

/// Draw an index with probability proportional to `counts[i]^weight`.
///
/// Falls back to a uniform draw when the weights sum to zero or do not sum at all.
pub fn weighted_choice(counts: &[usize], weight: f64, rng: &mut impl Rng) -> usize {
  let m = counts.len();
  if m == 0 {
    return 0;
  }
  let weights = piece_weights(counts, weight);
  let sum: f64 = weights.iter().sum();
  let r: f64 = rng.gen();

  if !(sum > 0.0 && sum.is_finite()) {
    return ((r * m as f64) as usize).min(m - 1);
  }
  let mut cumulative = 0.0;
  weights.iter()
    .position(|w| {
      cumulative += w;
      cumulative / sum > r
    })
    .unwrap_or(m - 1)
}
