//! BCRF and pairwise complementarity.

use tracing::debug;

use crate::domain::{Station, StationStatus};

use super::MetricParams;

/// Compute and store the BCRF of every non-depot station.
///
/// `cost = t_load * |current - optimal|`, and when the cost is positive
/// `bcrf = (udf[current] - udf[optimal]) / cost`. Balanced stations (and a
/// zero `t_load`) get a BCRF of 0. The depot is left untouched.
pub fn compute_bcrf(stations: &mut [Station], params: &MetricParams) {
    let mut scored = 0usize;

    for station in stations.iter_mut().filter(|s| !s.is_depot()) {
        let current = station.current_inventory();
        let optimal = station.optimal_inventory();
        let cost = params.t_load * current.abs_diff(optimal) as f64;

        let bcrf = if cost > 0.0 {
            (station.udf_at(current) - station.udf_at(optimal)) / cost
        } else {
            0.0
        };

        station.set_bcrf(bcrf);
        scored += 1;
    }

    debug!(stations = scored, t_load = params.t_load, "BCRF computed");
}

/// Utility recovered by pairing two stations.
///
/// Zero unless exactly one station is in surplus and the other in deficit.
/// Otherwise the largest mutually feasible number of bikes is moved from
/// the surplus station to the deficit station and the drop in `udf` at
/// both ends is returned.
pub fn complementarity(s1: &Station, s2: &Station) -> f64 {
    match (s1.status(), s2.status()) {
        (StationStatus::Surplus, StationStatus::Deficit) => transfer_gain(s1, s2),
        (StationStatus::Deficit, StationStatus::Surplus) => transfer_gain(s2, s1),
        _ => 0.0,
    }
}

fn transfer_gain(surplus: &Station, deficit: &Station) -> f64 {
    let moved = surplus.surplus().min(deficit.deficit());
    let from = surplus.current_inventory();
    let to = deficit.current_inventory();

    (surplus.udf_at(from) - surplus.udf_at(from - moved))
        + (deficit.udf_at(to) - deficit.udf_at(to + moved))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    fn station_strategy(id: u32) -> impl Strategy<Value = Station> {
        (1u32..20)
            .prop_flat_map(|cap| {
                (
                    Just(cap),
                    0..=cap,
                    0..=cap,
                    prop::collection::vec(-50.0f64..50.0, cap as usize + 1),
                )
            })
            .prop_map(move |(cap, cur, opt, udf)| {
                Station::new(
                    format!("p{id}"),
                    id,
                    Coordinate::default(),
                    cap,
                    cur,
                    opt,
                    udf,
                )
                .unwrap()
            })
    }

    proptest! {
        /// Matching status or a balanced station always scores zero
        #[test]
        fn zero_unless_complementary(a in station_strategy(1), b in station_strategy(2)) {
            let same = a.status() == b.status();
            let balanced = a.status() == StationStatus::Balanced
                || b.status() == StationStatus::Balanced;
            if same || balanced {
                prop_assert_eq!(complementarity(&a, &b), 0.0);
            }
        }

        /// Complementarity does not depend on argument order
        #[test]
        fn order_independent(a in station_strategy(1), b in station_strategy(2)) {
            prop_assert_eq!(complementarity(&a, &b), complementarity(&b, &a));
        }

        /// Balanced stations always get a zero BCRF
        #[test]
        fn balanced_bcrf_zero(s in station_strategy(1), t_load in 0.0f64..100.0) {
            let balanced = s.status() == StationStatus::Balanced;
            let mut stations = vec![s];
            compute_bcrf(&mut stations, &MetricParams::new(t_load, 1.0, 1.0));
            if balanced {
                prop_assert_eq!(stations[0].bcrf(), 0.0);
            }
        }
    }
}
