use {
  super::*,
  crate::{
    error::Error,
    geometry::{AffineMap, Mat2, V2},
    ifs::Ifs
  },
  super::{point_cloud::{level_count, level_start}, selector::piece_weights},
  anyhow::Result,
  rand::SeedableRng,
  rand_pcg::Pcg64
};

fn translates(offsets: &[(f64, f64)]) -> Result<Ifs> {
  let maps = offsets.iter()
    .map(|&(x, y)| AffineMap::new(Mat2::identity(), V2::new(x, y)))
    .collect();
  Ok(Ifs::new(Mat2::scale(2.0), maps)?)
}

#[test] fn triangle_cloud() -> Result<()> {
  let ifs = Ifs::half_scale_triangle();
  let cloud = generate(ifs.g(), ifs.maps())?;
  assert_eq!(cloud.len(), 59049);
  assert_eq!(cloud.xs.len(), cloud.ys.len());
  for p in cloud.iter() {
    assert!(p.x.is_finite() && p.y.is_finite());
    // attractor is the triangle (0, 0), (1/3, 0), (0, 1/3)
    assert!(p.x >= -1e-12 && p.y >= -1e-12);
    assert!(p.x + p.y <= 1.0 / 3.0 + 1e-12);
  }
  Ok(())
}

#[test] fn cloud_sizes() -> Result<()> {
  assert_eq!(level_count(2, MIN_POINTS)?, (16, 65536));
  assert_eq!(level_count(3, MIN_POINTS)?, (10, 59049));
  assert_eq!(level_count(200, MIN_POINTS)?, (2, 40000));

  let square = Ifs::square_tiling();
  let cloud = generate(square.g(), square.maps())?;
  assert_eq!(cloud.len(), 65536);
  assert!(cloud.iter().all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y)));

  let five = translates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.5, 0.5)])?;
  assert_eq!(generate(five.g(), five.maps())?.len(), 78125);
  Ok(())
}

#[test] fn level_indexing() -> Result<()> {
  assert_eq!(level_start(3, 0), Some(0));
  assert_eq!(level_start(3, 1), Some(1));
  assert_eq!(level_start(3, 2), Some(4));
  assert_eq!(level_start(3, 3), Some(13));
  assert_eq!(level_start(1, 3), None);

  // children of parent p sit at p * m + j
  let maps = vec![
    AffineMap::from_linear(Mat2::scale(0.5)),
    AffineMap::new(Mat2::scale(0.5), V2::new(1.0, 0.0))
  ];
  let cloud = generate_with_budget(&Mat2::identity(), &maps, 4)?;
  assert_eq!(cloud.xs, vec![0.0, 1.0, 0.5, 1.5]);
  assert_eq!(cloud.ys, vec![0.0; 4]);
  Ok(())
}

#[test] fn transform_count_checked_first() {
  let one = vec![AffineMap::identity()];
  let singular = Mat2::scale(0.0);
  assert!(matches!(generate(&singular, &one), Err(Error::InvalidTransformCount(1))));
  assert!(matches!(generate(&Mat2::identity(), &[]), Err(Error::InvalidTransformCount(0))));
  assert!(matches!(level_count(1, MIN_POINTS), Err(Error::InvalidTransformCount(1))));
}

#[test] fn point_budget_overflow() {
  assert!(matches!(level_count(2, usize::MAX), Err(Error::PointBudgetOverflow { m: 2, .. })));
  assert_eq!(level_start(usize::MAX, 2), None);
}

#[test] fn singular_generator() -> Result<()> {
  let ifs = Ifs::half_scale_triangle();
  assert!(matches!(
    generate(&Mat2::new(1.0, 1.0, 1.0, 1.0), ifs.maps()),
    Err(Error::SingularMatrix { .. })
  ));
  Ok(())
}

#[test] fn piece_inverse_round_trip() -> Result<()> {
  for ifs in [Ifs::half_scale_triangle(), Ifs::sierpinski(), Ifs::square_tiling()].iter() {
    for h in ifs.maps() {
      let id = h.inverse()?.compose(h);
      assert!((id.linear.det() - 1.0).abs() < 1e-12);
      assert!((id.linear.0[0][1]).abs() < 1e-12 && (id.linear.0[1][0]).abs() < 1e-12);
      assert!(id.translation.x.abs() < 1e-12 && id.translation.y.abs() < 1e-12);
    }
  }
  Ok(())
}

#[test] fn sibling_and_inherited_maps() -> Result<()> {
  let ifs = Ifs::sierpinski();
  let siblings = neighbor_maps(&ifs, 0, &[], 10.0)?;
  assert_eq!(siblings.len(), 2);
  assert!(siblings.iter().all(|e| e.provenance == Provenance::Sibling));
  assert_eq!(siblings[0].map.translation, V2::new(1.0, 0.0));
  assert_eq!(siblings[1].map.translation, V2::new(0.0, 1.0));

  // children of the right-hand neighbor: offsets (2, 0), (3, 0), (2, 1); 2r² = 8 drops (3, 0)
  let previous = [siblings[0]];
  let entries = neighbor_maps(&ifs, 0, &previous, 2.0)?;
  let offsets: Vec<_> = entries.iter().map(|e| e.map.translation).collect();
  assert_eq!(offsets, vec![
    V2::new(1.0, 0.0), V2::new(0.0, 1.0),
    V2::new(2.0, 0.0), V2::new(2.0, 1.0)
  ]);
  assert_eq!(entries[2].provenance, Provenance::Inherited);
  assert_eq!(entries[3].map.linear, Mat2::identity());
  Ok(())
}

#[test] fn maps_live_in_piece_frame() -> Result<()> {
  let ifs = Ifs::half_scale_triangle();
  let entries = neighbor_maps(&ifs, 1, &[], 10.0)?;
  let hi = ifs.maps()[1];
  for (entry, j) in entries.iter().zip([0usize, 2].iter()) {
    // H_i ∘ entry = H_j
    let placed = hi.compose(&entry.map);
    let hj = ifs.maps()[*j];
    assert!((placed.translation - hj.translation).length() < 1e-12);
    assert_eq!(placed.linear, hj.linear);
  }
  Ok(())
}

#[test] fn zero_radius_is_empty() -> Result<()> {
  for ifs in [Ifs::half_scale_triangle(), Ifs::sierpinski(), Ifs::square_tiling()].iter() {
    for i in 0..ifs.len() {
      assert!(neighbor_maps(ifs, i, &[], 0.0)?.is_empty());
    }
  }
  Ok(())
}

#[test] fn radius_monotone() -> Result<()> {
  let ifs = Ifs::square_tiling();
  let previous = neighbor_maps(&ifs, 3, &[], 5.0)?;
  let previous = neighbor_maps(&ifs, 0, &previous, 5.0)?;
  let radii = [0.0, 0.4, 0.8, 1.5, 2.5, 4.0, 8.0];
  for i in 0..ifs.len() {
    let found = radii.iter()
      .map(|&r| neighbor_maps(&ifs, i, &previous, r))
      .collect::<crate::error::Result<Vec<_>>>()?;
    for pair in found.windows(2) {
      assert!(pair[0].len() <= pair[1].len());
      assert!(pair[0].iter().all(|e| pair[1].contains(e)));
    }
  }
  Ok(())
}

#[test] fn bound_inclusivity() -> Result<()> {
  // offset (0.5, 0.5): |v|² = 0.5 = 2 * 0.5²
  let ifs = translates(&[(0.0, 0.0), (0.5, 0.5)])?;
  assert_eq!(neighbor_maps(&ifs, 0, &[], 0.5)?.len(), 1);

  // offset (1, 0): |v|² = 1 = 4 * 0.5², not counted
  let ifs = Ifs::sierpinski();
  assert_eq!(neighbor_count(&ifs, 0, &[], 0.5)?, 0);
  assert_eq!(neighbor_count(&ifs, 0, &[], 0.51)?, 2);
  assert_eq!(neighbor_counts(&ifs, &[], 0.51), vec![2, 1, 1]);
  Ok(())
}

#[test] fn piece_out_of_range() {
  let ifs = Ifs::sierpinski();
  assert!(matches!(neighbor_maps(&ifs, 3, &[], 1.0), Err(Error::InvalidParameter(_))));
}

fn frequencies(counts: &[usize], weight: f64, trials: usize) -> Vec<f64> {
  let mut rng = Pcg64::seed_from_u64(0);
  let mut hits = vec![0usize; counts.len()];
  (0..trials).for_each(|_| hits[weighted_choice(counts, weight, &mut rng)] += 1);
  hits.iter().map(|&h| h as f64 / trials as f64).collect()
}

#[test] fn equal_counts_uniform() {
  for f in frequencies(&[4, 4, 4], 3.0, 30000) {
    assert!((f - 1.0 / 3.0).abs() < 0.02, "{}", f);
  }
  // all-zero weights fall back to a uniform draw
  for f in frequencies(&[0, 0, 0, 0], 3.0, 30000) {
    assert!((f - 0.25).abs() < 0.02, "{}", f);
  }
}

#[test] fn zero_weight_uniform() {
  assert_eq!(piece_weights(&[0, 3, 10], 0.0), vec![1.0, 1.0, 1.0]);
  for f in frequencies(&[0, 3, 10], 0.0, 30000) {
    assert!((f - 1.0 / 3.0).abs() < 0.02, "{}", f);
  }
}

#[test] fn weight_sharpens_bias() {
  assert_eq!(frequencies(&[0, 5], 1.0, 1000), vec![0.0, 1.0]);
  let mild = frequencies(&[1, 2], 1.0, 30000);
  let sharp = frequencies(&[1, 2], 4.0, 30000);
  assert!((mild[1] - 2.0 / 3.0).abs() < 0.02);
  assert!((sharp[1] - 16.0 / 17.0).abs() < 0.02);
}

#[test] fn scripted_then_weighted() {
  let ifs = Ifs::sierpinski();
  let selector = PieceSelector::new(Selection::Scripted(vec![2, 1]));
  let mut rng = Pcg64::seed_from_u64(7);
  assert_eq!(selector.weight(0), None);
  assert_eq!(selector.weight(1), None);
  assert_eq!(selector.weight(2), Some(selector::SCRIPT_FALLBACK_WEIGHT));

  assert_eq!(selector.select(0, &ifs, &[], 1.0, &mut rng), Pick { piece: 2, scripted: true });
  assert_eq!(selector.select(1, &ifs, &[], 1.0, &mut rng), Pick { piece: 1, scripted: true });
  let pick = selector.select(2, &ifs, &[], 1.0, &mut rng);
  assert!(!pick.scripted);
  assert!(pick.piece < ifs.len());
}

#[test] fn single_entry_script() {
  let ifs = Ifs::sierpinski();
  let selector = PieceSelector::new(Selection::Scripted(vec![1]));
  let mut rng = Pcg64::seed_from_u64(3);
  assert_eq!(selector.select(0, &ifs, &[], 1.0, &mut rng), Pick { piece: 1, scripted: true });
  assert_eq!(selector.weight(1), Some(selector::SCRIPT_FALLBACK_WEIGHT));
  assert!(!selector.select(1, &ifs, &[], 1.0, &mut rng).scripted);
}
