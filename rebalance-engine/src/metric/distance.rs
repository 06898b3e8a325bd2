//! Composite distance matrix.

use tracing::{debug, warn};

use crate::domain::Station;

use super::complementarity;

/// Value stored in row and column 0, which belong to the depot.
pub const SENTINEL: f64 = -1.0;

/// Directed, row-normalized distance between stations.
///
/// Indexed by station position. Row and column 0 hold [`SENTINEL`]. A row
/// can be shorter than the station list when the travel-time data it was
/// built from was short, but always keeps its depot column;
/// [`CompositeDistanceMatrix::get`] reports the cut-off entries as missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeDistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl CompositeDistanceMatrix {
    /// Wrap precomputed rows. Rows may have differing lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Distance from station `from` to station `to`, if the entry exists.
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from)?.get(to).copied()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Combine normalized travel time and complementarity into one distance.
///
/// A zero maximum is replaced by 1 so the corresponding term vanishes
/// instead of dividing by zero.
pub fn composite_distance(
    travel_time: f64,
    max_travel_time: f64,
    complementarity: f64,
    max_complementarity: f64,
    alpha: f64,
    beta: f64,
) -> f64 {
    let max_travel_time = if max_travel_time == 0.0 {
        1.0
    } else {
        max_travel_time
    };
    let max_complementarity = if max_complementarity == 0.0 {
        1.0
    } else {
        max_complementarity
    };

    alpha * (travel_time / max_travel_time) - beta * (complementarity / max_complementarity)
}

/// Build the composite distance matrix for all non-depot station pairs.
///
/// `travel_time_matrix` must be aligned with `stations` (depot at index 0).
/// Each row is normalized by its own maximum travel time and maximum
/// complementarity over the non-depot columns. Short or missing travel-time
/// rows produce short composite rows and a warning rather than an error.
pub fn composite_distance_matrix(
    stations: &[Station],
    travel_time_matrix: &[Vec<f64>],
    alpha: f64,
    beta: f64,
) -> CompositeDistanceMatrix {
    let n = stations.len();
    if n == 0 {
        return CompositeDistanceMatrix::default();
    }

    let mut comp = vec![vec![SENTINEL; n]; n];
    for i in 1..n {
        for j in 1..n {
            comp[i][j] = complementarity(&stations[i], &stations[j]);
        }
    }
    debug!(stations = n, "complementarity matrix computed");

    let mut rows = Vec::with_capacity(n);
    rows.push(vec![SENTINEL; n]);

    for (i, comp_row) in comp.iter().enumerate().skip(1) {
        let travel_row = travel_time_matrix.get(i).map(Vec::as_slice).unwrap_or(&[]);
        // Column 0 is the depot sentinel even when the travel row is empty.
        let width = travel_row.len().min(n).max(1);
        if width < n {
            warn!(
                row = i,
                expected = n,
                found = travel_row.len(),
                "travel-time row is short, composite row truncated"
            );
        }

        let mut max_travel_time = 0.0f64;
        let mut max_complementarity = 0.0f64;
        for j in 1..width {
            max_travel_time = max_travel_time.max(travel_row[j]);
            max_complementarity = max_complementarity.max(comp_row[j]);
        }

        let mut row = vec![SENTINEL; width];
        for j in 1..width {
            row[j] = composite_distance(
                travel_row[j],
                max_travel_time,
                comp_row[j],
                max_complementarity,
                alpha,
                beta,
            );
        }
        rows.push(row);
    }

    CompositeDistanceMatrix { rows }
}
