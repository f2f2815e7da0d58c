use {
  crate::{
    error::{Error, Result},
    geometry::{AffineMap, Mat2, P2, PointCloud}
  },
  rayon::prelude::*
};

/// Lower bound on the number of points in a generated cloud.
pub const MIN_POINTS: usize = 40_000;

/// Smallest `L` with `m^L >= min_points`, together with `m^L`.
pub fn level_count(m: usize, min_points: usize) -> Result<(u32, usize)> {
  if m <= 1 {
    return Err(Error::InvalidTransformCount(m));
  }
  let (mut levels, mut count) = (0u32, 1usize);
  while count < min_points {
    levels += 1;
    count = count.checked_mul(m)
      .ok_or(Error::PointBudgetOverflow { m, levels })?;
  }
  Ok((levels, count))
}

/// Index of the first point of `level` in the arena: `(m^level - 1) / (m - 1)`.
pub fn level_start(m: usize, level: u32) -> Option<usize> {
  if m <= 1 {
    return None;
  }
  Some((m.checked_pow(level)? - 1) / (m - 1))
}

/// Generate the attractor cloud with at least [`MIN_POINTS`] points.
pub fn generate(g: &Mat2, maps: &[AffineMap]) -> Result<PointCloud> {
  generate_with_budget(g, maps, MIN_POINTS)
}

/// Generate the finest level `L` of the subdivision tree rooted at the origin, where `L` is the
/// shallowest level holding at least `min_points` points.
///
/// The tree is stored level by level in one arena: child `j` of the point with local index `p` on
/// level `k` lives at `level_start(k + 1) + p * m + j`, so point `n` of the result has been produced
/// last by map `n mod m`. Every map is applied in the frame normalized by the generator,
/// `F_j = g⁻¹ ∘ H_j`.
pub fn generate_with_budget(g: &Mat2, maps: &[AffineMap], min_points: usize) -> Result<PointCloud> {
  let m = maps.len();
  let (levels, last_count) = level_count(m, min_points)?;
  let overflow = || Error::PointBudgetOverflow { m, levels };
  let total = level_start(m, levels + 1)
    .filter(|&total| total > 0)
    .ok_or_else(overflow)?;

  let gi = AffineMap::from_linear(g.inverse()?);
  let normalized: Vec<_> = maps.iter()
    .map(|h| gi.compose(h))
    .collect();

  let mut arena = vec![P2::origin(); total];
  let (mut start, mut count) = (0usize, 1usize);
  for _ in 0..levels {
    let (head, tail) = arena.split_at_mut(start + count);
    let parents = &head[start..];
    let children = &mut tail[..count * m];
    children.par_chunks_mut(m)
      .zip(parents.par_iter())
      .for_each(|(siblings, &parent)| siblings.iter_mut()
        .zip(normalized.iter())
        .for_each(|(child, f)| *child = f.apply(parent))
      );
    start += count;
    count *= m;
  }
  debug_assert_eq!(count, last_count);

  let cloud: PointCloud = arena[start..start + count].iter().copied().collect();
  log::info!(
    "generated attractor cloud: m = {}, L = {}, {} arena points, {:?}",
    m, levels, total, cloud
  );
  Ok(cloud)
}
