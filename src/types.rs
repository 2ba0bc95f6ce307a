use serde::{Deserialize, Serialize};

/// One catalogue row. The property's position in the catalogue vector is
/// its 0-based index, shared with every similarity matrix row/column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
	pub name: String,
	pub subtitle: String,
	pub sector: String,
	pub link: String,
}

/// Per-request importance weights for the three feature dimensions.
/// Not persisted; no required sum — scores are normalized by the total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightTriple {
	pub facilities: f64,
	pub price: f64,
	pub location: f64,
}

impl WeightTriple {
	pub fn total(&self) -> f64 {
		self.facilities + self.price + self.location
	}
}

impl Default for WeightTriple {
	/// Equal weights for all three dimensions.
	fn default() -> Self {
		Self {
			facilities: 1.0,
			price: 1.0,
			location: 1.0,
		}
	}
}

/// Per-dimension similarity of a candidate to the anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
	pub facilities: f64,
	pub price: f64,
	pub location: f64,
}

/// One ranked hit: the candidate property's display fields, its combined
/// score, and the per-dimension breakdown behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
	pub name: String,
	pub subtitle: String,
	pub link: String,
	pub score: f64,
	pub scores: ScoreBreakdown,
}
