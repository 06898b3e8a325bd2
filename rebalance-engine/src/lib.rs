//! Bike-share rebalancing engine.
//!
//! Answers two questions for a network snapshot: which stations belong
//! together for rebalancing, and which bikes should move between them.
//!
//! - [`metric`] scores stations (BCRF) and builds the composite distance
//!   matrix.
//! - [`clustering`] groups stations with k-medoids over that matrix.
//! - [`transfer`] searches each cluster for transfer tuples.
//! - [`planner`] runs the whole pipeline and exports the result.

pub mod clustering;
pub mod domain;
pub mod error;
pub mod instance;
pub mod metric;
pub mod planner;
pub mod transfer;
