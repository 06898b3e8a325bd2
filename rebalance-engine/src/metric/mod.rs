//! Station metrics: BCRF scores and the composite distance matrix.
//!
//! BCRF (benefit-cost ratio) measures how much utility a station recovers
//! per unit of loading cost when it is brought back to its optimum.
//! The composite distance blends travel time with how well two stations
//! complement each other (one surplus, one deficit):
//!
//! ```text
//! d(i, j) = alpha * travel(i, j) / max_j travel(i, j)
//!         - beta  * comp(i, j)   / max_j comp(i, j)
//! ```
//!
//! Both maxima are taken per row, so the matrix is directed and generally
//! not symmetric. Lower values mean more attractive pairings.

mod bcrf;
mod distance;
mod params;

pub use bcrf::{complementarity, compute_bcrf};
pub use distance::{
    CompositeDistanceMatrix, SENTINEL, composite_distance, composite_distance_matrix,
};
pub use params::MetricParams;
