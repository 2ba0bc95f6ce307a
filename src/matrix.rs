// ---------------------------------------------------------------------------
// SimilarityMatrix — N×N precomputed pairwise similarities
// ---------------------------------------------------------------------------
//
// Row i refers to the same property as row i of the catalogue. Entries are
// real-valued similarities produced upstream (cosine in the original
// pipeline, so [-1, 1] with maximal self-similarity on the diagonal).
// The matrix is immutable after load.
// ---------------------------------------------------------------------------

use crate::error::RecommenderError;

#[derive(Debug)]
pub struct SimilarityMatrix {
	n: usize,
	values: Vec<f64>,
}

impl SimilarityMatrix {
	/// Build from row vectors, validating squareness and finiteness.
	pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RecommenderError> {
		let n = rows.len();
		let mut values = Vec::with_capacity(n * n);
		for (i, row) in rows.into_iter().enumerate() {
			if row.len() != n {
				return Err(RecommenderError::Corruption(format!(
					"Matrix is not square: row {} has {} entries, expected {}",
					i,
					row.len(),
					n
				)));
			}
			for (j, value) in row.iter().enumerate() {
				if !value.is_finite() {
					return Err(RecommenderError::Corruption(format!(
						"Non-finite similarity at ({}, {})",
						i, j
					)));
				}
			}
			values.extend(row);
		}
		Ok(Self { n, values })
	}

	/// Matrix dimension N (catalogue size).
	pub fn len(&self) -> usize {
		self.n
	}

	pub fn is_empty(&self) -> bool {
		self.n == 0
	}

	pub fn get(&self, i: usize, j: usize) -> Result<f64, RecommenderError> {
		if i >= self.n {
			return Err(RecommenderError::IndexOutOfRange(i));
		}
		if j >= self.n {
			return Err(RecommenderError::IndexOutOfRange(j));
		}
		Ok(self.values[i * self.n + j])
	}

	/// Similarities of property `i` against the whole catalogue.
	pub fn row(&self, i: usize) -> Result<&[f64], RecommenderError> {
		if i >= self.n {
			return Err(RecommenderError::IndexOutOfRange(i));
		}
		Ok(&self.values[i * self.n..(i + 1) * self.n])
	}

	/// Row vectors, used by the artifact writer.
	pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
		self.values.chunks_exact(self.n.max(1))
	}
}
