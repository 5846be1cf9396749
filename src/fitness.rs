//! The fitness provider seam.
//!
//! The evolutionary core never inspects coordinates or road data; it
//! consumes pairwise distances and directional speeds through
//! [`FitnessProvider`]. The provider must be deterministic and immutable
//! for the lifetime of a run — fitness is computed once per individual
//! and never revisited.

use crate::error::GaError;

/// Supplies pairwise travel data for a fixed set of locations.
///
/// # Contract
///
/// - `distance(i, j)` is non-negative, symmetric, and `distance(i, i) == 0`.
/// - `speed(i, j)` is strictly positive and may be asymmetric (directional).
/// - Both are deterministic and stable for the lifetime of a run.
///
/// `Send + Sync` is required so individuals can be evaluated in parallel;
/// the provider is only ever read during a run.
pub trait FitnessProvider: Send + Sync {
    /// Number of locations. Genomes are permutations of `0..location_count()`.
    fn location_count(&self) -> usize;

    /// Travel distance between two locations.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Travel speed along the directed edge `from -> to`.
    fn speed(&self, from: usize, to: usize) -> f64;
}

impl<'a, P: FitnessProvider + ?Sized> FitnessProvider for &'a P {
    fn location_count(&self) -> usize {
        (**self).location_count()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        (**self).distance(from, to)
    }

    fn speed(&self, from: usize, to: usize) -> f64 {
        (**self).speed(from, to)
    }
}

/// Table-backed [`FitnessProvider`].
///
/// Stores dense row-major distance and speed tables, validated at
/// construction. Building the tables (placing locations, assigning speed
/// limits) is the integrator's job; this type only holds and serves them.
///
/// # Example
///
/// ```
/// use pareto_tour::{FitnessProvider, TravelMatrix};
///
/// let distances = vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ];
/// let speeds = vec![vec![1.0; 3]; 3];
///
/// let matrix = TravelMatrix::new(distances, speeds).unwrap();
/// assert_eq!(matrix.location_count(), 3);
/// assert_eq!(matrix.distance(1, 2), 5.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelMatrix {
    location_count: usize,
    distances: Vec<f64>,
    speeds: Vec<f64>,
}

impl TravelMatrix {
    /// Builds a provider from dense distance and speed tables.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidTables`] when the tables are not square
    /// matrices of the same order, a distance is negative, non-finite,
    /// asymmetric, or non-zero on the diagonal, or an off-diagonal speed
    /// is not strictly positive and finite.
    pub fn new(distances: Vec<Vec<f64>>, speeds: Vec<Vec<f64>>) -> Result<Self, GaError> {
        let n = distances.len();
        if n == 0 {
            return Err(GaError::InvalidTables("distance table is empty".into()));
        }
        if speeds.len() != n {
            return Err(GaError::InvalidTables(format!(
                "speed table has {} rows, distance table has {n}",
                speeds.len()
            )));
        }

        for (i, row) in distances.iter().enumerate() {
            if row.len() != n {
                return Err(GaError::InvalidTables(format!(
                    "distance row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(GaError::InvalidTables(format!(
                        "distance({i}, {j}) = {d} is not a finite non-negative value"
                    )));
                }
                if i == j && d != 0.0 {
                    return Err(GaError::InvalidTables(format!(
                        "distance({i}, {i}) = {d}, diagonal must be zero"
                    )));
                }
                if distances[j].len() == n && distances[j][i] != d {
                    return Err(GaError::InvalidTables(format!(
                        "distance({i}, {j}) = {d} differs from distance({j}, {i}) = {}",
                        distances[j][i]
                    )));
                }
            }
        }

        for (i, row) in speeds.iter().enumerate() {
            if row.len() != n {
                return Err(GaError::InvalidTables(format!(
                    "speed row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            for (j, &s) in row.iter().enumerate() {
                if i != j && (!s.is_finite() || s <= 0.0) {
                    return Err(GaError::InvalidTables(format!(
                        "speed({i}, {j}) = {s} is not a finite positive value"
                    )));
                }
            }
        }

        Ok(Self {
            location_count: n,
            distances: distances.into_iter().flatten().collect(),
            speeds: speeds.into_iter().flatten().collect(),
        })
    }

    /// Builds a provider from 2-D positions and a speed table.
    ///
    /// Distances are Euclidean, so the distance table is symmetric with a
    /// zero diagonal by construction. Speeds remain directional and are
    /// validated as in [`TravelMatrix::new`].
    pub fn from_positions(
        positions: &[(f64, f64)],
        speeds: Vec<Vec<f64>>,
    ) -> Result<Self, GaError> {
        let distances = positions
            .iter()
            .map(|&(x1, y1)| {
                positions
                    .iter()
                    .map(|&(x2, y2)| (x2 - x1).hypot(y2 - y1))
                    .collect()
            })
            .collect();
        Self::new(distances, speeds)
    }
}

impl FitnessProvider for TravelMatrix {
    fn location_count(&self) -> usize {
        self.location_count
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.location_count + to]
    }

    fn speed(&self, from: usize, to: usize) -> f64 {
        self.speeds[from * self.location_count + to]
    }
}
