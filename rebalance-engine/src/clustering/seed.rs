//! Initial medoid selection.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::KMedoids;

/// Strategy for choosing the initial medoids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// The k stations with the highest BCRF.
    ByScore,
    /// The k stations with the smallest absolute BCRF.
    Balanced,
    /// Highest-BCRF station first, then repeatedly the station furthest
    /// (by minimum composite distance) from the medoids chosen so far.
    #[default]
    Dispersion,
}

impl KMedoids<'_> {
    /// Choose up to `k` initial medoids with the given strategy.
    pub fn seed(&self, strategy: SeedStrategy, k: usize) -> Vec<usize> {
        match strategy {
            SeedStrategy::ByScore => self.seed_by_score(k),
            SeedStrategy::Balanced => self.seed_balanced(k),
            SeedStrategy::Dispersion => self.seed_dispersion(k),
        }
    }

    /// Top-k stations by descending BCRF. Ties keep index order.
    pub fn seed_by_score(&self, k: usize) -> Vec<usize> {
        let mut ranked = self.candidates();
        ranked.sort_by(|&a, &b| {
            self.stations[b]
                .bcrf()
                .total_cmp(&self.stations[a].bcrf())
        });
        ranked.truncate(k);
        ranked
    }

    /// The k stations closest to equilibrium (smallest |BCRF|).
    pub fn seed_balanced(&self, k: usize) -> Vec<usize> {
        let mut ranked = self.candidates();
        ranked.sort_by(|&a, &b| {
            self.stations[a]
                .bcrf()
                .abs()
                .total_cmp(&self.stations[b].bcrf().abs())
        });
        ranked.truncate(k);
        ranked
    }

    /// Furthest-point seeding starting from the highest-BCRF station.
    ///
    /// Candidates with a missing matrix entry towards any chosen medoid are
    /// skipped. Returns fewer than `k` medoids when candidates run out.
    pub fn seed_dispersion(&self, k: usize) -> Vec<usize> {
        let candidates = self.candidates();
        let mut medoids: Vec<usize> = Vec::with_capacity(k);

        if k == 0 {
            return medoids;
        }
        if self.matrix.is_empty() {
            warn!("composite distance matrix is empty, no medoids seeded");
            return medoids;
        }

        let mut first: Option<usize> = None;
        for &i in &candidates {
            if first.is_none_or(|f| self.stations[i].bcrf() > self.stations[f].bcrf()) {
                first = Some(i);
            }
        }
        let Some(first) = first else {
            return medoids;
        };
        medoids.push(first);
        debug!(slot = 0, station = first, "first medoid seeded");

        for slot in 1..k {
            let mut best: Option<(usize, f64)> = None;

            for &j in &candidates {
                if medoids.contains(&j) {
                    continue;
                }

                let mut min_distance = f64::INFINITY;
                let mut complete = true;
                for &m in &medoids {
                    match self.matrix.get(j, m) {
                        Some(d) => min_distance = min_distance.min(d),
                        None => {
                            warn!(
                                station = j,
                                medoid = m,
                                "missing composite distance, candidate skipped"
                            );
                            complete = false;
                            break;
                        }
                    }
                }
                if !complete {
                    continue;
                }

                if best.is_none_or(|(_, d)| min_distance > d) {
                    best = Some((j, min_distance));
                }
            }

            match best {
                Some((station, distance)) => {
                    debug!(slot, station, distance, "medoid seeded");
                    medoids.push(station);
                }
                None => {
                    warn!(slot, "no valid candidate left for medoid");
                    break;
                }
            }
        }

        if medoids.len() < k {
            warn!(
                seeded = medoids.len(),
                requested = k,
                "fewer medoids than requested"
            );
        }

        medoids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station};
    use crate::metric::{CompositeDistanceMatrix, SENTINEL, composite_distance_matrix};

    /// Stations on a line with the given inventory offsets from an optimum of 5.
    /// BCRF is set to |offset| directly.
    fn line_network(offsets: &[i64]) -> Vec<Station> {
        let mut stations = vec![Station::depot(Coordinate::default())];
        for (k, &offset) in offsets.iter().enumerate() {
            let id = k as u32 + 1;
            let current = (5 + offset) as u32;
            let udf = (0..=10).map(|l: i64| ((l - 5) * (l - 5)) as f64).collect();
            let mut s = Station::new(
                format!("s{id}"),
                id,
                Coordinate::default(),
                10,
                current,
                5,
                udf,
            )
            .unwrap();
            s.set_bcrf(offset.unsigned_abs() as f64);
            stations.push(s);
        }
        stations
    }

    fn travel(positions: &[f64]) -> Vec<Vec<f64>> {
        let mut all = vec![0.0];
        all.extend_from_slice(positions);
        all.iter()
            .map(|a| all.iter().map(|b| (a - b).abs()).collect())
            .collect()
    }

    fn two_groups() -> (Vec<Station>, CompositeDistanceMatrix) {
        let stations = line_network(&[1, 3, -1, 2, -2, 1]);
        let matrix = composite_distance_matrix(
            &stations,
            &travel(&[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]),
            1.0,
            0.0,
        );
        (stations, matrix)
    }

    #[test]
    fn by_score_picks_highest_bcrf() {
        let (stations, matrix) = two_groups();
        let engine = KMedoids::new(&stations, &matrix);

        assert_eq!(engine.seed_by_score(2), vec![2, 4]);
        assert_eq!(engine.seed(SeedStrategy::ByScore, 1), vec![2]);
    }

    #[test]
    fn balanced_picks_smallest_magnitude() {
        let (stations, matrix) = two_groups();
        let engine = KMedoids::new(&stations, &matrix);

        assert_eq!(engine.seed_balanced(2), vec![1, 3]);
        assert_eq!(engine.seed_balanced(3), vec![1, 3, 6]);
    }

    #[test]
    fn dispersion_spreads_medoids() {
        let (stations, matrix) = two_groups();
        let engine = KMedoids::new(&stations, &matrix);

        assert_eq!(engine.seed_dispersion(1), vec![2]);
        assert_eq!(engine.seed_dispersion(2), vec![2, 6]);
        assert_eq!(engine.seed_dispersion(3), vec![2, 6, 4]);
        assert_eq!(engine.seed(SeedStrategy::default(), 2), vec![2, 6]);
    }

    #[test]
    fn seeding_never_picks_depot() {
        let (stations, matrix) = two_groups();
        let engine = KMedoids::new(&stations, &matrix);

        for strategy in [SeedStrategy::ByScore, SeedStrategy::Balanced, SeedStrategy::Dispersion] {
            let medoids = engine.seed(strategy, 10);
            assert_eq!(medoids.len(), 6);
            assert!(!medoids.contains(&0));
        }
    }

    #[test]
    fn dispersion_handles_negative_distances() {
        // Every candidate sits below -1 from the first medoid.
        let stations = line_network(&[3, 1, 2]);
        let rows = vec![
            vec![SENTINEL; 4],
            vec![SENTINEL, 0.0, -3.0, -2.0],
            vec![SENTINEL, -3.0, 0.0, -2.5],
            vec![SENTINEL, -1.5, -2.5, 0.0],
        ];
        let matrix = CompositeDistanceMatrix::from_rows(rows);
        let engine = KMedoids::new(&stations, &matrix);

        assert_eq!(engine.seed_dispersion(2), vec![1, 3]);
    }

    #[test]
    fn dispersion_skips_missing_entries() {
        let stations = line_network(&[3, 1, 2]);
        let rows = vec![
            vec![SENTINEL; 4],
            vec![SENTINEL, 0.0, 0.5, 0.4],
            vec![SENTINEL, 0.9],
            vec![SENTINEL],
        ];
        let matrix = CompositeDistanceMatrix::from_rows(rows);
        let engine = KMedoids::new(&stations, &matrix);

        // Station 3 has no entry towards medoid 1.
        assert_eq!(engine.seed_dispersion(2), vec![1, 2]);
        assert_eq!(engine.seed_dispersion(3), vec![1, 2]);
    }

    #[test]
    fn dispersion_on_empty_matrix() {
        let (stations, _) = two_groups();
        let matrix = CompositeDistanceMatrix::default();
        let engine = KMedoids::new(&stations, &matrix);

        assert!(engine.seed_dispersion(3).is_empty());
    }
}
