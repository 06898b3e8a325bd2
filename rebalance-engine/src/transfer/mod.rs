//! Transfer-tuple search inside one cluster.
//!
//! A tuple is a small group of surplus stations and deficit stations
//! between which bikes are moved. The search works in three steps:
//!
//! 1. Split the cluster into surplus and deficit stations.
//! 2. Enumerate every surplus/deficit combination up to the configured
//!    group sizes, score each with an exact stepwise utility walk, and drop
//!    tuples that gain nothing or only repeat part of an earlier tuple.
//! 3. Greedily keep the best tuples that share no station.
//!
//! The group-size bounds are what keep step 2 tractable; the number of
//! combinations grows combinatorially with both of them.

mod combinations;
mod config;
mod evaluator;
mod search;
mod select;
mod tuple;

pub use config::{MAX_GROUP_SIZE, TupleSearchConfig};
pub use evaluator::TupleClusterEvaluator;
pub use search::{evaluate_tuple, generate_tuples, partition_by_status};
pub use select::{greedy_select_exclusive_tuples, rank_tuples};
pub use tuple::{ClusterEvaluationResult, TransferTuple};
