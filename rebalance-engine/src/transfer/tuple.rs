//! Transfer tuples and per-cluster results.

use std::collections::{BTreeMap, BTreeSet};

/// A candidate group of bike transfers between surplus and deficit stations.
///
/// Only stations that actually give or receive bikes are listed. Station
/// lists are ordered by descending BCRF, the order the allocation walk
/// visited them in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferTuple {
    /// Stations giving bikes.
    pub surplus: Vec<usize>,

    /// Stations receiving bikes.
    pub deficit: Vec<usize>,

    /// Bikes moved per (from, to) pair; every entry is nonzero.
    pub allocations: BTreeMap<(usize, usize), u32>,

    /// Total drop in utility-curve value across all stations involved.
    pub delta_udf: f64,
}

impl TransferTuple {
    /// Every station that moves bikes in this tuple.
    pub fn stations(&self) -> BTreeSet<usize> {
        self.surplus.iter().chain(&self.deficit).copied().collect()
    }

    /// Number of participating stations.
    pub fn station_count(&self) -> usize {
        self.surplus.len() + self.deficit.len()
    }

    /// Total bikes moved.
    pub fn units_moved(&self) -> u32 {
        self.allocations.values().sum()
    }

    /// Returns true if the two tuples have a station in common.
    pub fn shares_station_with(&self, other: &TransferTuple) -> bool {
        let ours = self.stations();
        other
            .surplus
            .iter()
            .chain(&other.deficit)
            .any(|s| ours.contains(s))
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

/// Selected, station-disjoint tuples for one cluster.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClusterEvaluationResult {
    /// Accepted tuples, best first.
    pub tuples: Vec<TransferTuple>,

    /// Sum of `delta_udf` over the accepted tuples.
    pub delta_udf: f64,
}

impl ClusterEvaluationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap tuples that are already known to be station-disjoint.
    pub fn from_selected(tuples: Vec<TransferTuple>) -> Self {
        let delta_udf = tuples.iter().map(|t| t.delta_udf).sum();
        Self { tuples, delta_udf }
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Total bikes moved by the selected tuples.
    pub fn units_moved(&self) -> u32 {
        self.tuples.iter().map(TransferTuple::units_moved).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(
        surplus: &[usize],
        deficit: &[usize],
        moves: &[(usize, usize, u32)],
        delta: f64,
    ) -> TransferTuple {
        TransferTuple {
            surplus: surplus.to_vec(),
            deficit: deficit.to_vec(),
            allocations: moves.iter().map(|&(f, t, n)| ((f, t), n)).collect(),
            delta_udf: delta,
        }
    }

    #[test]
    fn station_set_and_counts() {
        let t = tuple(&[1, 2], &[5], &[(1, 5, 2), (2, 5, 1)], 4.0);

        assert_eq!(t.stations(), BTreeSet::from([1, 2, 5]));
        assert_eq!(t.station_count(), 3);
        assert_eq!(t.units_moved(), 3);
        assert!(!t.is_empty());
    }

    #[test]
    fn shared_stations() {
        let a = tuple(&[1], &[5], &[(1, 5, 1)], 1.0);
        let b = tuple(&[2], &[5], &[(2, 5, 1)], 1.0);
        let c = tuple(&[3], &[6], &[(3, 6, 1)], 1.0);

        assert!(a.shares_station_with(&b));
        assert!(b.shares_station_with(&a));
        assert!(!a.shares_station_with(&c));
    }

    #[test]
    fn result_sums_selected_only() {
        let result = ClusterEvaluationResult::from_selected(vec![
            tuple(&[1], &[5], &[(1, 5, 2)], 3.5),
            tuple(&[2], &[6], &[(2, 6, 1)], 1.5),
        ]);

        assert_eq!(result.delta_udf, 5.0);
        assert_eq!(result.units_moved(), 3);
        assert!(!result.is_empty());
    }

    #[test]
    fn empty_result() {
        let result = ClusterEvaluationResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.delta_udf, 0.0);
        assert_eq!(result.units_moved(), 0);
    }
}
