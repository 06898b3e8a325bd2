//! Medoid-based clustering over the composite distance matrix.
//!
//! Stations are grouped around representative stations (medoids). The run
//! seeds medoids, then alternates assignment and medoid update until the
//! medoids stop moving or the iteration limit is hit:
//!
//! ```text
//! Uninitialized -> Initialized -> Assigned -> Converged
//!                                          \-> MaxIterationsReached
//! ```
//!
//! The trade-off between travel cost and complementarity is fixed by
//! `alpha`/`beta` when the matrix is built; the clustering run takes no
//! further blending weight.

mod config;
mod kmedoids;
mod seed;

pub use config::ClusterConfig;
pub use kmedoids::{ClusterMembership, ClusteringOutcome, ClusteringState, KMedoids};
pub use seed::SeedStrategy;
