//! The three algorithms behind a zoom: attractor generation, neighbor tracking and piece choice.

pub mod point_cloud;
pub use point_cloud::{generate, generate_with_budget, MIN_POINTS};

pub mod neighbors;
pub use neighbors::{NeighborEntry, Provenance, neighbor_maps, neighbor_count, neighbor_counts};

pub mod selector;
pub use selector::{PieceSelector, Pick, Selection, weighted_choice};

#[cfg(test)] mod tests;
