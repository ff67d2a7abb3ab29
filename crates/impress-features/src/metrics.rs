//! Densify and distance over whole vectors.
//!
//! - **Densify** maps a vector to a fixed-width numeric array whose width is
//!   determined by the schema alone, so every vector of one schema can be
//!   handed to a numeric consumer without further shape negotiation.
//! - **Distance** is an aggregate dissimilarity. Non-numeric features only
//!   contribute a mismatch penalty, so over mixed vectors the result is a
//!   score rather than a certified metric.
//!
//! The batch variants run per-vector work on the rayon pool. Failures are
//! reported as the error of the lowest failing index, so results are the
//! same on every run.

use crate::error::Result;
use crate::policy::{DistancePolicy, Norm};
use crate::vector::FeatureVector;
use rayon::prelude::*;

pub fn densify(vector: &FeatureVector) -> Result<Vec<f64>> {
    vector.densify()
}

pub fn distance(a: &FeatureVector, b: &FeatureVector, norm: Norm) -> Result<f64> {
    a.distance(b, norm)
}

pub fn distance_with(
    a: &FeatureVector,
    b: &FeatureVector,
    norm: Norm,
    policy: &DistancePolicy,
) -> Result<f64> {
    a.distance_with(b, norm, policy)
}

/// Densify many vectors in parallel.
pub fn densify_batch(vectors: &[FeatureVector]) -> Result<Vec<Vec<f64>>> {
    let results: Vec<Result<Vec<f64>>> = vectors.par_iter().map(FeatureVector::densify).collect();
    first_error_wins(results)
}

/// Symmetric matrix of distances between every pair of `vectors`.
pub fn pairwise_distances(
    vectors: &[FeatureVector],
    norm: Norm,
    policy: &DistancePolicy,
) -> Result<Vec<Vec<f64>>> {
    let n = vectors.len();
    let rows: Vec<Result<Vec<f64>>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        Ok(0.0)
                    } else {
                        vectors[i].distance_with(&vectors[j], norm, policy)
                    }
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect();
    tracing::debug!(vectors = n, ?norm, "computed pairwise distances");
    first_error_wins(rows)
}

fn first_error_wins<T>(results: Vec<Result<T>>) -> Result<Vec<T>> {
    results.into_iter().collect()
}
