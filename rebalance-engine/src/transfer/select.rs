//! Tuple ranking and exclusive selection.

use tracing::debug;

use super::TransferTuple;

/// Rank tuples best-first.
///
/// Tuples are ranked by:
/// 1. Utility gain (larger is better)
/// 2. Number of stations involved (more is better)
///
/// The sort is stable, so equal tuples keep their generation order.
pub fn rank_tuples(mut tuples: Vec<TransferTuple>) -> Vec<TransferTuple> {
    tuples.sort_by(|a, b| {
        b.delta_udf
            .total_cmp(&a.delta_udf)
            .then_with(|| b.station_count().cmp(&a.station_count()))
    });
    tuples
}

/// Pick station-disjoint tuples greedily in rank order.
///
/// A tuple is accepted only if none of its stations was claimed by a tuple
/// accepted before it. The result is a heuristic, not the best possible
/// packing.
pub fn greedy_select_exclusive_tuples(tuples: Vec<TransferTuple>) -> Vec<TransferTuple> {
    let candidates = tuples.len();
    let mut selected: Vec<TransferTuple> = Vec::new();

    for tuple in rank_tuples(tuples) {
        if selected.iter().any(|s| s.shares_station_with(&tuple)) {
            continue;
        }
        selected.push(tuple);
    }

    debug!(candidates, selected = selected.len(), "exclusive tuples selected");
    selected
}
