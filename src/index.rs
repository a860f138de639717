//! Flat vector index with brute-force squared-L2 search.
//!
//! The index exclusively owns one embedding per chunk and addresses them
//! by insertion position: position `i` is the permanent identifier for
//! vector `i` for the lifetime of the index. There is no update or delete
//! operation — when the corpus changes, the index is rebuilt wholesale.
//! Brute force is the right trade for the target corpora (tens to low
//! thousands of chunks); this is not designed for dynamic or large-scale
//! collections.

use anyhow::{bail, Result};
use std::cmp::Ordering;

use crate::embedding::squared_l2;

/// One search hit: a stored vector's position and its squared-L2
/// distance from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// Immutable flat index over a corpus's embedding vectors.
pub struct FlatIndex {
    dims: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index over exactly this vector sequence, in this order.
    ///
    /// Fails on an empty sequence and on mixed dimensionalities — both are
    /// configuration errors, not searchable states.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dims = match vectors.first() {
            Some(first) => first.len(),
            None => bail!("cannot build an index over zero vectors"),
        };
        if dims == 0 {
            bail!("cannot build an index over zero-dimension vectors");
        }
        for (position, vector) in vectors.iter().enumerate() {
            if vector.len() != dims {
                bail!(
                    "vector at position {} has {} dims, expected {}",
                    position,
                    vector.len(),
                    dims
                );
            }
        }

        Ok(Self { dims, vectors })
    }

    /// Dimensionality every stored (and query) vector must have.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Return the `k` nearest stored vectors to `query`, nearest first.
    ///
    /// Distances are squared Euclidean. Equal distances order by lower
    /// position. A query whose dimensionality does not match the index is
    /// a fatal configuration error (mixed embedding models), not a
    /// recoverable miss.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dims {
            bail!(
                "query vector has {} dims, index has {} — corpus and query must use the same embedding model",
                query.len(),
                self.dims
            );
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position,
                distance: squared_l2(query, vector),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }
}
