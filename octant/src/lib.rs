#![warn(missing_docs)]
//! # Octant
//!
//! Octant is a crate providing a bucketed octree to find all the points of a static 3D point cloud
//! within a given radius of query points, under a distance metric of your choosing.
//!
//! ## Goals
//!
//! The main goal of this crate is to answer many fixed-radius searches over the same point cloud
//! quickly, as needed when computing local features of laser scans or meshes. The [`Octree`] is
//! built once over a borrowed buffer of points, which it never moves nor copies, and then queried
//! as many times as needed with `&self`, possibly from multiple threads.
//!
//! It does not support inserting or removing points after a build, nor nearest-k or approximate
//! searches.
//!
//! ## Using Octant
//!
//! ### Points
//!
//! Points are values implementing the [`Position`] trait, which returns their `x`, `y` and `z`
//! coordinates. It is implemented for arrays and tuples of three `f32` or `f64`, and for the
//! vector types of `glam`, `ultraviolet` and `nalgebra` with the corresponding features enabled.
//! When your type has a field named `position`, you can derive it.
//!
//! ```
//! use octant::prelude::*;
//!
//! #[derive(Position)]
//! struct LaserPoint {
//!     position: [f64; 3],
//!     remission: f32,
//! }
//! ```
//!
//! ### Searching neighbors
//!
//! Searches are performed through the [`RadiusSearch`] trait with any [`Metric`]: the built-in
//! [`Euclidean`], [`Manhattan`] and [`Chebyshev`] metrics, the runtime-selectable [`MetricKind`],
//! or your own. The radius is exclusive, so only the points strictly closer than `radius` to the
//! query are returned.
//!
//! ```
//! use octant::prelude::*;
//!
//! # #[derive(Position)]
//! # struct LaserPoint {
//! #     position: [f64; 3],
//! #     remission: f32,
//! # }
//! let scan: Vec<LaserPoint> = (0..1000)
//!     .map(|i| LaserPoint {
//!         position: [(i % 10) as f64, (i / 10 % 10) as f64, (i / 100) as f64],
//!         remission: 0.5,
//!     })
//!     .collect();
//!
//! let mut octree = Octree::new();
//! octree.build(&scan);
//!
//! // The 6 direct neighbors of a point on a unit grid, and the point itself.
//! let neighbors = octree.radius_neighbors(&scan[555], 1.2, &Euclidean);
//! assert_eq!(neighbors.len(), 7);
//!
//! // The metric can be chosen at runtime.
//! let metric: MetricKind = "chebyshev".parse().unwrap();
//! assert_eq!(octree.radius_neighbors(&[4.5, 4.5, 4.5], 1.0, &metric).len(), 8);
//!
//! // Reuse a buffer across many queries.
//! let mut buffer = Vec::new();
//! for point in &scan[..10] {
//!     octree.radius_neighbors_into(point, 1.1, &Manhattan, &mut buffer);
//!     assert!(buffer.len() <= 7);
//! }
//! ```
//!
//! [`BruteForce`] implements the same traits with a linear scan. It is useful as a reference or
//! for very small point clouds, and any code generic over [`NeighborSearch`] works with both.
//!
//! Enable the `parallel` feature to search the neighbors of many queries using
//! [rayon](https://github.com/rayon-rs/rayon) with
//! [`par_radius_neighbors`](parallel::ParallelRadiusSearch::par_radius_neighbors).
//!
//! ### Logging
//!
//! Octant reports build summaries and unexpected degenerate inputs through the
//! [`log`](https://docs.rs/log) facade. No logger is installed by the crate.
//!
//! [`Metric`]: metric::Metric
//! [`Euclidean`]: metric::Euclidean
//! [`Manhattan`]: metric::Manhattan
//! [`Chebyshev`]: metric::Chebyshev
//! [`MetricKind`]: metric::MetricKind

extern crate self as octant;

/// Construction parameters of the octree.
pub mod config;
/// Distance functions used to compare points.
pub mod metric;
/// The octree search structure.
pub mod octree;
/// Searches that use multiple CPU threads.
#[cfg(feature = "parallel")]
pub mod parallel;
/// Trait for types located in 3D space and its implementations.
pub mod position;
/// Traits shared by the search structures and the brute-force search.
pub mod search;
/// Octant nodes and space partitioning implementation.
pub mod tree;

pub use config::{ConfigError, OctreeConfig};
pub use octant_derive::Position;
pub use octree::Octree;
pub use position::Position;
pub use search::{BruteForce, NeighborSearch, Neighborhoods, RadiusSearch};
pub use tree::OctreeStats;

/// Most commonly used traits, types and derive macros.
pub mod prelude {
    // Common traits and their derive macros.
    pub use crate::{position::Position, NeighborSearch, RadiusSearch};
    pub use octant_derive::Position;

    pub use crate::{
        metric::{Chebyshev, Euclidean, Manhattan, Metric, MetricKind},
        BruteForce, Octree, OctreeConfig,
    };

    #[cfg(feature = "parallel")]
    pub use {crate::parallel::ParallelRadiusSearch, rayon::prelude::*};
}
