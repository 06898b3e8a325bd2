//! Assignment, medoid update and the convergence loop.

use tracing::{debug, warn};

use crate::domain::Station;
use crate::error::ConfigError;
use crate::metric::CompositeDistanceMatrix;

use super::ClusterConfig;

/// Progress of a clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusteringState {
    /// No run started yet.
    #[default]
    Uninitialized,
    /// Initial medoids chosen.
    Initialized,
    /// Stations assigned to the current medoids.
    Assigned,
    /// Medoids moved less than the convergence threshold.
    Converged,
    /// Stopped by the iteration limit.
    MaxIterationsReached,
}

impl ClusteringState {
    /// Returns true for the two terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClusteringState::Converged | ClusteringState::MaxIterationsReached
        )
    }
}

/// Station indices grouped by medoid slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterMembership {
    clusters: Vec<Vec<usize>>,
}

impl ClusterMembership {
    /// Membership with `slots` empty clusters.
    pub fn with_slots(slots: usize) -> Self {
        Self {
            clusters: vec![Vec::new(); slots],
        }
    }

    pub fn from_clusters(clusters: Vec<Vec<usize>>) -> Self {
        Self { clusters }
    }

    /// Members of the cluster in `slot`.
    pub fn get(&self, slot: usize) -> Option<&[usize]> {
        self.clusters.get(slot).map(Vec::as_slice)
    }

    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.clusters.iter().map(Vec::as_slice)
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total number of assigned stations.
    pub fn station_count(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Slot holding `station`, if it was assigned.
    pub fn slot_of(&self, station: usize) -> Option<usize> {
        self.clusters.iter().position(|c| c.contains(&station))
    }

    fn push(&mut self, slot: usize, station: usize) {
        self.clusters[slot].push(station);
    }
}

/// Result of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringOutcome {
    /// Final station assignment.
    pub membership: ClusterMembership,

    /// Medoid per slot after the last update; `None` for a slot that lost
    /// all of its members.
    pub medoids: Vec<Option<usize>>,

    /// Number of assign/update rounds performed.
    pub iterations: usize,

    /// Terminal state of the run.
    pub state: ClusteringState,
}

impl ClusteringOutcome {
    pub fn converged(&self) -> bool {
        self.state == ClusteringState::Converged
    }
}

/// K-medoids clustering engine.
///
/// Reads stations (with BCRF already computed) and a composite distance
/// matrix aligned to them. Index 0 and any depot station are never
/// clustered. Missing matrix entries are skipped with a warning; they can
/// leave stations unassigned or slots empty but never abort the run.
pub struct KMedoids<'a> {
    pub(super) stations: &'a [Station],
    pub(super) matrix: &'a CompositeDistanceMatrix,
    state: ClusteringState,
}

impl<'a> KMedoids<'a> {
    pub fn new(stations: &'a [Station], matrix: &'a CompositeDistanceMatrix) -> Self {
        Self {
            stations,
            matrix,
            state: ClusteringState::Uninitialized,
        }
    }

    /// State reached by the most recent run.
    pub fn state(&self) -> ClusteringState {
        self.state
    }

    /// Indices of every clusterable station.
    pub(super) fn candidates(&self) -> Vec<usize> {
        self.stations
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, s)| !s.is_depot())
            .map(|(i, _)| i)
            .collect()
    }

    /// Assign every station to its nearest medoid.
    ///
    /// Ties go to the earliest slot. Slots without a medoid stay empty.
    pub fn assign(&self, medoids: &[Option<usize>]) -> ClusterMembership {
        let mut membership = ClusterMembership::with_slots(medoids.len());

        if self.matrix.is_empty() {
            warn!("composite distance matrix is empty, nothing assigned");
            return membership;
        }

        for i in self.candidates() {
            let mut closest: Option<(usize, f64)> = None;

            for (slot, medoid) in medoids.iter().enumerate() {
                let Some(medoid) = *medoid else {
                    continue;
                };
                let Some(distance) = self.matrix.get(i, medoid) else {
                    warn!(station = i, medoid, "missing composite distance, medoid skipped");
                    continue;
                };
                if closest.is_none_or(|(_, best)| distance < best) {
                    closest = Some((slot, distance));
                }
            }

            match closest {
                Some((slot, _)) => membership.push(slot, i),
                None => warn!(station = i, "no reachable medoid, station left unassigned"),
            }
        }

        membership
    }

    /// Pick the most central member of each cluster as its new medoid.
    ///
    /// Centrality is the sum of composite distances to the other members.
    /// An empty cluster yields `None`.
    pub fn update(&self, membership: &ClusterMembership) -> Vec<Option<usize>> {
        membership
            .iter()
            .enumerate()
            .map(|(slot, members)| {
                let mut best: Option<(usize, f64)> = None;

                for &s in members {
                    if s >= self.stations.len() {
                        warn!(slot, station = s, "member index out of range, skipped");
                        continue;
                    }

                    let mut total = 0.0;
                    for &other in members.iter().filter(|&&o| o != s) {
                        match self.matrix.get(s, other) {
                            Some(d) => total += d,
                            None => warn!(
                                station = s,
                                other,
                                "missing composite distance, pair skipped"
                            ),
                        }
                    }

                    if best.is_none_or(|(_, b)| total < b) {
                        best = Some((s, total));
                    }
                }

                if best.is_none() {
                    warn!(slot, "no valid medoid for cluster");
                }
                best.map(|(s, _)| s)
            })
            .collect()
    }

    /// Run clustering to convergence or the iteration limit.
    ///
    /// After each update the largest distance between a slot's previous and
    /// new medoid is compared against the threshold. Fails only on an
    /// invalid configuration.
    pub fn run(&mut self, config: &ClusterConfig) -> Result<ClusteringOutcome, ConfigError> {
        config.validate()?;

        let mut medoids: Vec<Option<usize>> = self
            .seed(config.seed, config.clusters)
            .into_iter()
            .map(Some)
            .collect();
        self.state = ClusteringState::Initialized;
        debug!(
            medoids = medoids.len(),
            strategy = ?config.seed,
            "medoids initialized"
        );

        let mut membership = ClusterMembership::with_slots(medoids.len());
        let mut iterations = 0;
        let mut converged = false;

        while !converged && iterations < config.max_iterations {
            membership = self.assign(&medoids);
            self.state = ClusteringState::Assigned;

            let updated = self.update(&membership);
            let max_change = self.max_medoid_shift(&medoids, &updated);
            converged = max_change < config.convergence_threshold;

            iterations += 1;
            debug!(iteration = iterations, max_change, converged, "medoids updated");
            medoids = updated;
        }

        self.state = if converged {
            ClusteringState::Converged
        } else {
            ClusteringState::MaxIterationsReached
        };
        debug!(
            iterations,
            state = ?self.state,
            assigned = membership.station_count(),
            "clustering finished"
        );

        Ok(ClusteringOutcome {
            membership,
            medoids,
            iterations,
            state: self.state,
        })
    }

    /// Largest distance from an old medoid to its replacement, starting at 0.
    fn max_medoid_shift(&self, previous: &[Option<usize>], updated: &[Option<usize>]) -> f64 {
        let mut max_change = 0.0f64;

        for (slot, (prev, next)) in previous.iter().zip(updated).enumerate() {
            let (Some(prev), Some(next)) = (*prev, *next) else {
                continue;
            };
            match self.matrix.get(prev, next) {
                Some(d) => max_change = max_change.max(d),
                None => warn!(slot, prev, next, "missing composite distance in convergence check"),
            }
        }

        max_change
    }
}
