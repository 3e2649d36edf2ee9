// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use std::num::NonZeroUsize;

use crate::error::{EmpiricalError, Result};
use crate::sample::Sample;

/// Shared dataset container with KD-tree for fast neighbor queries.
pub struct NdDataset<const K: usize> {
    pub points: Vec<[f64; K]>,
    pub n: usize,
    pub tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> NdDataset<K> {
    pub fn from_points(points: Vec<[f64; K]>) -> Self {
        let n = points.len();
        let tree = ImmutableKdTree::new_from_slice(&points);
        Self { points, n, tree }
    }

    fn neighbour_count(k: usize) -> Result<NonZeroUsize> {
        NonZeroUsize::new(k).ok_or_else(|| EmpiricalError::invalid("k", k, "must be at least 1"))
    }

    /// Euclidean distance to the k-th neighbor per point (self excluded).
    pub fn kth_neighbor_radii(&self, k: usize) -> Result<Vec<f64>> {
        Self::neighbour_count(k)?;
        if k >= self.n {
            return Err(EmpiricalError::InsufficientSamples {
                required: k + 1,
                actual: self.n,
            });
        }
        // Query k+1 neighbors (including self), take index k (0-based) and sqrt distance
        let qty = Self::neighbour_count(k + 1)?;
        let radii = self
            .points
            .iter()
            .map(|p| {
                let mut neigh = self.tree.nearest_n::<SquaredEuclidean>(p, qty);
                let kth = neigh.remove(k);
                let (dist2, _idx): (f64, u64) = kth.into();
                dist2.sqrt()
            })
            .collect();
        Ok(radii)
    }

    /// Euclidean distance from each query point to its k-th neighbor in this dataset.
    pub fn kth_neighbor_distances_from(&self, queries: &[[f64; K]], k: usize) -> Result<Vec<f64>> {
        let qty = Self::neighbour_count(k)?;
        if k > self.n {
            return Err(EmpiricalError::InsufficientSamples {
                required: k,
                actual: self.n,
            });
        }
        let distances = queries
            .iter()
            .map(|p| {
                let mut neigh = self.tree.nearest_n::<SquaredEuclidean>(p, qty);
                let kth = neigh.remove(k - 1);
                let (dist2, _idx): (f64, u64) = kth.into();
                dist2.sqrt()
            })
            .collect();
        Ok(distances)
    }
}

impl NdDataset<1> {
    pub fn from_sample(sample: &Sample) -> Self {
        Self::from_points(sample.values().iter().map(|&x| [x]).collect())
    }
}
