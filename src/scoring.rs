// ---------------------------------------------------------------------------
// Weighted similarity combiner — scoring across the three matrices
// ---------------------------------------------------------------------------
//
// Pure functions combining the facilities, price, and location similarity
// rows for an anchor property into one weight-normalized score per
// candidate. No side effects; deterministic for identical inputs.
// ---------------------------------------------------------------------------

use crate::error::RecommenderError;
use crate::matrix::SimilarityMatrix;
use crate::types::WeightTriple;

/// One candidate's combined score, paired with its catalogue index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredIndex {
	pub index: usize,
	pub score: f64,
}

/// Check that the weight total is strictly positive. Individual weights
/// may be zero, but not all three simultaneously; a non-finite total also
/// fails here rather than poisoning every downstream score.
pub fn validate_weights(weights: &WeightTriple) -> Result<(), RecommenderError> {
	let total = weights.total();
	if total > 0.0 && total.is_finite() {
		Ok(())
	} else {
		Err(RecommenderError::InvalidWeights)
	}
}

/// Score every catalogue property against the anchor.
///
/// For each candidate `i` the combined score is the weight-normalized
/// convex combination
/// `(wf*F[a][i] + wp*P[a][i] + wl*L[a][i]) / (wf + wp + wl)`,
/// so the result is a weighted average: comparable across weight settings
/// and invariant under uniform scaling of all three weights.
///
/// Returns all N `(index, score)` pairs in catalogue order, unsorted.
pub fn combine_scores(
	anchor: usize,
	weights: &WeightTriple,
	facilities: &SimilarityMatrix,
	price: &SimilarityMatrix,
	location: &SimilarityMatrix,
) -> Result<Vec<ScoredIndex>, RecommenderError> {
	validate_weights(weights)?;
	if anchor >= facilities.len() {
		return Err(RecommenderError::NotFound(format!(
			"anchor index {}",
			anchor
		)));
	}

	let facilities_row = facilities.row(anchor)?;
	let price_row = price.row(anchor)?;
	let location_row = location.row(anchor)?;
	let total = weights.total();

	let scores = (0..facilities.len())
		.map(|i| ScoredIndex {
			index: i,
			score: (weights.facilities * facilities_row[i]
				+ weights.price * price_row[i]
				+ weights.location * location_row[i])
				/ total,
		})
		.collect();
	Ok(scores)
}
