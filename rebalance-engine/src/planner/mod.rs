//! Rebalancing planner.
//!
//! Runs the whole analysis for one network snapshot: BCRF scoring, the
//! composite distance matrix, k-medoids clustering and the per-cluster
//! transfer-tuple search. The result can be flattened into export rows.

mod config;
mod export;
mod pipeline;
mod summary;

pub use config::PlannerConfig;
pub use export::ExportRow;
pub use pipeline::{PlannedCluster, Planner, RebalancePlan};
pub use summary::ClusterSummary;
