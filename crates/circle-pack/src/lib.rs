//! # circle-pack
//!
//! Packs circles, given only by their radii, into a non-overlapping planar
//! arrangement and finds the smallest circle enclosing it.
//!
//! Layers, leaf first:
//! - [`geometry`] / [`precision`]: the `Circle` value and its predicates
//! - [`construct`]: tangent, circumscribed and Apollonius circles
//! - [`enclosing`]: brute-force minimal enclosing circle over pairs/triples
//! - [`placement`]: the two greedy placement strategies
//!
//! ```
//! use circle_pack::Strategy;
//!
//! let placement = Strategy::Greedy.place(&[10.0, 10.0, 10.0]).unwrap();
//! assert_eq!(placement.circles.len(), 3);
//! assert!(placement.enclosing.circle.radius > 20.0);
//! ```

pub mod construct;
pub mod enclosing;
pub mod geometry;
pub mod placement;
pub mod precision;

// Re-export common types at crate root for convenience.
pub use construct::{apollonian_circle, circumscribed_of_two, tangent_circles_of_radius};
pub use enclosing::{minimal_enclosing_circle, EnclosingCircle};
pub use geometry::{distance_of_centers, Circle, Intersection, Point};
pub use placement::{
    is_placeable, optimal_enclosing_radius, place_greedy, place_holding_enclosing, Placement,
    PlacementStats, Strategy, Unplaced,
};

/// Result type for packing operations
pub type Result<T> = std::result::Result<T, PackError>;

/// Misuse of the packing API. Geometric dead ends are not errors: they
/// show up as `None` from the constructors or as unplaced radii.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("no radii or circles given")]
    EmptyInput,

    #[error("radius #{index} must be a positive finite number, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("no enclosing circle found for {count} circles")]
    NoEnclosingCircle { count: usize },
}
