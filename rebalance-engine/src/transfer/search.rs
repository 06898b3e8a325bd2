//! Tuple evaluation and bounded generation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace, warn};

use crate::domain::{Station, StationStatus};

use super::combinations::Combinations;
use super::{TransferTuple, TupleSearchConfig};

/// Split cluster members into surplus and deficit stations.
///
/// Balanced stations are dropped silently; the depot, repeated indices and
/// indices outside `stations` are dropped with a warning. Input order is
/// preserved.
pub fn partition_by_status(stations: &[Station], cluster: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let mut surplus = Vec::new();
    let mut deficit = Vec::new();
    let mut seen = BTreeSet::new();

    for &i in cluster {
        let Some(station) = stations.get(i) else {
            warn!(station = i, "cluster member out of range, skipped");
            continue;
        };
        if i == 0 || station.is_depot() {
            warn!(station = i, "depot listed as cluster member, skipped");
            continue;
        }
        if !seen.insert(i) {
            warn!(station = i, "cluster member repeated, skipped");
            continue;
        }
        match station.status() {
            StationStatus::Surplus => surplus.push(i),
            StationStatus::Deficit => deficit.push(i),
            StationStatus::Balanced => {}
        }
    }

    (surplus, deficit)
}

/// Score one surplus/deficit grouping.
///
/// Both sides are visited in descending BCRF order. Each surplus station
/// hands `min(remaining surplus, remaining need)` bikes to each deficit
/// station in turn, and every single bike adds the exact change of the
/// utility curve at both ends. Stations that end up moving nothing are
/// left out of the returned tuple.
pub fn evaluate_tuple(
    stations: &[Station],
    surplus: &[usize],
    deficit: &[usize],
) -> TransferTuple {
    let mut seen = BTreeSet::new();
    let surplus = by_bcrf_desc(stations, surplus, &mut seen);
    let deficit = by_bcrf_desc(stations, deficit, &mut seen);

    let mut surplus_level: Vec<u32> = surplus
        .iter()
        .map(|&i| stations[i].current_inventory())
        .collect();
    let mut deficit_level: Vec<u32> = deficit
        .iter()
        .map(|&i| stations[i].current_inventory())
        .collect();
    let mut surplus_moved = vec![0u32; surplus.len()];
    let mut deficit_moved = vec![0u32; deficit.len()];

    let mut allocations = BTreeMap::new();
    let mut delta_udf = 0.0;

    for (a, &from) in surplus.iter().enumerate() {
        let giver = &stations[from];

        for (b, &to) in deficit.iter().enumerate() {
            let taker = &stations[to];

            let available = surplus_level[a].saturating_sub(giver.optimal_inventory());
            let needed = taker.optimal_inventory().saturating_sub(deficit_level[b]);
            let units = available.min(needed);
            if units == 0 {
                continue;
            }

            for _ in 0..units {
                let level = surplus_level[a];
                delta_udf += giver.udf_at(level) - giver.udf_at(level - 1);
                surplus_level[a] = level - 1;

                let level = deficit_level[b];
                delta_udf += taker.udf_at(level) - taker.udf_at(level + 1);
                deficit_level[b] = level + 1;
            }

            surplus_moved[a] += units;
            deficit_moved[b] += units;
            allocations.insert((from, to), units);
            trace!(from, to, units, "bikes allocated");
        }
    }

    TransferTuple {
        surplus: moved_only(&surplus, &surplus_moved),
        deficit: moved_only(&deficit, &deficit_moved),
        allocations,
        delta_udf,
    }
}

/// Enumerate and score tuples up to the configured group sizes.
///
/// Larger groups are tried first. A tuple is kept only if it gains
/// something and its stations are not all covered by a tuple kept earlier.
pub fn generate_tuples(
    stations: &[Station],
    surplus: &[usize],
    deficit: &[usize],
    config: &TupleSearchConfig,
) -> Vec<TransferTuple> {
    let mut tuples: Vec<TransferTuple> = Vec::new();
    let mut covered: Vec<BTreeSet<usize>> = Vec::new();
    let mut evaluated = 0usize;

    let max_s = config.max_surplus().min(surplus.len());
    let max_d = config.max_deficit().min(deficit.len());

    for s in (1..=max_s).rev() {
        for d in (1..=max_d).rev() {
            for givers in Combinations::new(surplus, s) {
                for takers in Combinations::new(deficit, d) {
                    evaluated += 1;
                    let tuple = evaluate_tuple(stations, &givers, &takers);
                    if tuple.delta_udf <= 0.0 {
                        continue;
                    }

                    let used = tuple.stations();
                    if covered.iter().any(|c| used.is_subset(c)) {
                        continue;
                    }

                    covered.push(used);
                    tuples.push(tuple);
                }
            }
        }
    }

    debug!(
        surplus = surplus.len(),
        deficit = deficit.len(),
        evaluated,
        kept = tuples.len(),
        "tuples generated"
    );

    tuples
}

/// Valid members in descending BCRF order. `seen` spans both sides of the
/// tuple, so a station is only ever used once.
fn by_bcrf_desc(stations: &[Station], indices: &[usize], seen: &mut BTreeSet<usize>) -> Vec<usize> {
    let mut sorted: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| {
            if i >= stations.len() {
                warn!(station = i, "tuple member out of range, skipped");
                return false;
            }
            if !seen.insert(i) {
                warn!(station = i, "tuple member repeated, skipped");
                return false;
            }
            true
        })
        .collect();
    sorted.sort_by(|&a, &b| stations[b].bcrf().total_cmp(&stations[a].bcrf()));
    sorted
}

fn moved_only(indices: &[usize], moved: &[u32]) -> Vec<usize> {
    indices
        .iter()
        .zip(moved)
        .filter(|&(_, &m)| m > 0)
        .map(|(&i, _)| i)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    /// Cluster of random stations with arbitrary curves and BCRF values.
    fn cluster_strategy() -> impl Strategy<Value = Vec<Station>> {
        prop::collection::vec(
            (
                0u32..=6,
                0u32..=6,
                prop::collection::vec(0.0f64..20.0, 7),
                -5.0f64..5.0,
            ),
            1..8,
        )
        .prop_map(|specs| {
            let mut stations = vec![Station::depot(Coordinate::default())];
            for (k, (cur, opt, udf, bcrf)) in specs.into_iter().enumerate() {
                let id = k as u32 + 1;
                let mut s = Station::new(
                    format!("p{id}"),
                    id,
                    Coordinate::default(),
                    6,
                    cur,
                    opt,
                    udf,
                )
                .unwrap();
                s.set_bcrf(bcrf);
                stations.push(s);
            }
            stations
        })
    }

    fn final_level(station: &Station, moved: u32) -> u32 {
        match station.status() {
            StationStatus::Surplus => station.current_inventory() - moved,
            _ => station.current_inventory() + moved,
        }
    }

    proptest! {
        /// The stepwise sum telescopes to the curve change at each station
        #[test]
        fn delta_matches_endpoints(stations in cluster_strategy()) {
            let members: Vec<usize> = (1..stations.len()).collect();
            let (surplus, deficit) = partition_by_status(&stations, &members);
            let tuple = evaluate_tuple(&stations, &surplus, &deficit);

            let mut expected = 0.0;
            for &i in surplus.iter().chain(&deficit) {
                let moved: u32 = tuple
                    .allocations
                    .iter()
                    .filter(|((f, t), _)| *f == i || *t == i)
                    .map(|(_, &n)| n)
                    .sum();
                let s = &stations[i];
                expected += s.udf_at(s.current_inventory()) - s.udf_at(final_level(s, moved));
            }
            prop_assert!((tuple.delta_udf - expected).abs() < 1e-9);
        }

        /// No station moves past its optimum
        #[test]
        fn allocations_respect_inventory(stations in cluster_strategy()) {
            let members: Vec<usize> = (1..stations.len()).collect();
            let (surplus, deficit) = partition_by_status(&stations, &members);
            let tuple = evaluate_tuple(&stations, &surplus, &deficit);

            for &i in &surplus {
                let given: u32 = tuple
                    .allocations
                    .iter()
                    .filter(|((f, _), _)| *f == i)
                    .map(|(_, &n)| n)
                    .sum();
                prop_assert!(given <= stations[i].surplus());
            }
            for &i in &deficit {
                let taken: u32 = tuple
                    .allocations
                    .iter()
                    .filter(|((_, t), _)| *t == i)
                    .map(|(_, &n)| n)
                    .sum();
                prop_assert!(taken <= stations[i].deficit());
            }
            prop_assert!(tuple.allocations.values().all(|&n| n > 0));
        }

        /// Generated tuples gain utility and never repeat a covered station set
        #[test]
        fn generated_tuples_are_useful(
            stations in cluster_strategy(),
            ms in 1usize..4,
            md in 1usize..4
        ) {
            let members: Vec<usize> = (1..stations.len()).collect();
            let (surplus, deficit) = partition_by_status(&stations, &members);
            let config = TupleSearchConfig::new(ms, md).unwrap();
            let tuples = generate_tuples(&stations, &surplus, &deficit, &config);

            for (k, tuple) in tuples.iter().enumerate() {
                prop_assert!(tuple.delta_udf > 0.0);
                prop_assert!(tuple.surplus.len() <= ms);
                prop_assert!(tuple.deficit.len() <= md);
                let used = tuple.stations();
                for earlier in &tuples[..k] {
                    prop_assert!(!used.is_subset(&earlier.stations()));
                }
            }
        }
    }
}
