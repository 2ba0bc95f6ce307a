// ---------------------------------------------------------------------------
// RecommenderEngine — catalogue + three matrices behind one query surface
// ---------------------------------------------------------------------------
//
// Integrates the catalogue store, the three similarity matrices, the
// location filter, the weighted combiner, and the ranker into the single
// externally-meaningful operation: recommend().
//
// Everything here is read-only after construction; per-request state
// (anchor, weights, filter, k) lives on the call, never on the engine.
// ---------------------------------------------------------------------------

use crate::catalogue::CatalogueStore;
use crate::error::RecommenderError;
use crate::filter::{filter_indices, SectorFilter};
use crate::matrix::SimilarityMatrix;
use crate::ranking::rank;
use crate::scoring::combine_scores;
use crate::types::{Recommendation, ScoreBreakdown, WeightTriple};

/// Default result count, matching the original "top 5 societies" surface.
pub const DEFAULT_K: usize = 5;

#[derive(Debug)]
pub struct RecommenderEngine {
	catalogue: CatalogueStore,
	facilities: SimilarityMatrix,
	price: SimilarityMatrix,
	location: SimilarityMatrix,
}

impl RecommenderEngine {
	/// Assemble the engine, validating that every matrix is aligned with
	/// the catalogue (same N, same row ordering is the loader's contract).
	pub fn new(
		catalogue: CatalogueStore,
		facilities: SimilarityMatrix,
		price: SimilarityMatrix,
		location: SimilarityMatrix,
	) -> Result<Self, RecommenderError> {
		let n = catalogue.len();
		for (label, matrix) in [
			("facilities", &facilities),
			("price", &price),
			("location", &location),
		] {
			if matrix.len() != n {
				return Err(RecommenderError::Corruption(format!(
					"{} matrix is {}x{} but the catalogue has {} properties",
					label,
					matrix.len(),
					matrix.len(),
					n
				)));
			}
		}
		Ok(Self {
			catalogue,
			facilities,
			price,
			location,
		})
	}

	pub fn catalogue(&self) -> &CatalogueStore {
		&self.catalogue
	}

	pub fn facilities(&self) -> &SimilarityMatrix {
		&self.facilities
	}

	pub fn price(&self) -> &SimilarityMatrix {
		&self.price
	}

	pub fn location(&self) -> &SimilarityMatrix {
		&self.location
	}

	/// Top-`k` properties most similar to `anchor_name` under the given
	/// weights, drawn from the sector-filtered candidate set. The anchor
	/// itself is never returned; an empty list is a valid success outcome.
	pub fn recommend(
		&self,
		anchor_name: &str,
		filter: &SectorFilter,
		weights: &WeightTriple,
		k: usize,
	) -> Result<Vec<Recommendation>, RecommenderError> {
		let anchor = self.catalogue.lookup_index(anchor_name)?;
		let candidates = filter_indices(&self.catalogue, filter);
		let scores = combine_scores(
			anchor,
			weights,
			&self.facilities,
			&self.price,
			&self.location,
		)?;
		let top = rank(&scores, &candidates, anchor, k);

		let mut recommendations = Vec::with_capacity(top.len());
		for hit in top {
			let property = self.catalogue.property_at(hit.index)?;
			recommendations.push(Recommendation {
				name: property.name.clone(),
				subtitle: property.subtitle.clone(),
				link: property.link.clone(),
				score: hit.score,
				scores: ScoreBreakdown {
					facilities: self.facilities.get(anchor, hit.index)?,
					price: self.price.get(anchor, hit.index)?,
					location: self.location.get(anchor, hit.index)?,
				},
			});
		}
		Ok(recommendations)
	}
}
