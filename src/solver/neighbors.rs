use {
  crate::{
    error::{Error, Result},
    geometry::{AffineMap, V2, norm_sq},
    ifs::Ifs
  },
  itertools::iproduct
};

/// Where a neighbor entry was derived from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Provenance {
  /// Another piece of the same parent.
  Sibling,
  /// A child of a neighbor tracked on the previous level.
  Inherited
}

/// Placement of a neighboring piece in the local frame of the magnified piece.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NeighborEntry {
  pub map: AffineMap,
  pub provenance: Provenance
}

/// A piece near piece `i`, before the radius test.
struct Candidate<'a> {
  via: Option<&'a AffineMap>,
  j: usize,
  offset: V2<f64>
}

/// Every piece that can neighbor piece `i`, with its offset from `t(H_i)`: siblings `j ≠ i`
/// first, then the children `j` of each tracked neighbor, neighbor-major.
fn candidates<'a>(
  ifs: &'a Ifs,
  i: usize,
  previous: &'a [NeighborEntry]
) -> impl Iterator<Item = Candidate<'a>> + 'a {
  let maps = ifs.maps();
  let g = *ifs.g();
  let origin = maps[i].translation;

  let siblings = (0..maps.len())
    .filter(move |&j| j != i)
    .map(move |j| Candidate {
      via: None,
      j,
      offset: maps[j].translation - origin
    });
  let inherited = iproduct!(previous.iter(), 0..maps.len())
    .map(move |(nb, j)| Candidate {
      via: Some(&nb.map),
      j,
      offset: nb.map.linear * maps[j].translation + g * nb.map.translation - origin
    });
  siblings.chain(inherited)
}

fn check_piece(ifs: &Ifs, i: usize) -> Result<()> {
  match i < ifs.len() {
    true => Ok(()),
    false => Err(Error::InvalidParameter(format!("piece {} out of range 0..{}", i, ifs.len())))
  }
}

/// Neighbor maps of piece `i` on the next level, expressed in the frame of piece `i`
/// (i.e. `H_i⁻¹ ∘ H_j` and `H_i⁻¹ ∘ nb ∘ H_j`), keeping the candidates whose offset satisfies
/// `|v|² ≤ 2r²`.
///
/// The bound is conservative; exact visibility is decided by projecting the cloud.
pub fn neighbor_maps(
  ifs: &Ifs,
  i: usize,
  previous: &[NeighborEntry],
  radius: f64
) -> Result<Vec<NeighborEntry>> {
  check_piece(ifs, i)?;
  let li = ifs.maps()[i].linear.inverse()?;
  let bound = 2.0 * radius * radius;

  Ok(candidates(ifs, i, previous)
    .filter(|c| norm_sq(c.offset) <= bound)
    .map(|c| {
      let hj = ifs.maps()[c.j].linear;
      let (linear, provenance) = match c.via {
        None => (li * hj, Provenance::Sibling),
        Some(nb) => (li * nb.linear * hj, Provenance::Inherited)
      };
      NeighborEntry {
        map: AffineMap::new(linear, li * c.offset),
        provenance
      }
    })
    .collect())
}

/// Number of pieces near piece `i`, siblings and inherited alike, with offsets `|v|² < 4a²`.
pub fn neighbor_count(ifs: &Ifs, i: usize, previous: &[NeighborEntry], a: f64) -> Result<usize> {
  check_piece(ifs, i)?;
  Ok(count_within(ifs, i, previous, 4.0 * a * a))
}

/// [`neighbor_count`] of every piece.
pub fn neighbor_counts(ifs: &Ifs, previous: &[NeighborEntry], a: f64) -> Vec<usize> {
  (0..ifs.len())
    .map(|i| count_within(ifs, i, previous, 4.0 * a * a))
    .collect()
}

fn count_within(ifs: &Ifs, i: usize, previous: &[NeighborEntry], bound: f64) -> usize {
  candidates(ifs, i, previous)
    .filter(|c| norm_sq(c.offset) < bound)
    .count()
}
