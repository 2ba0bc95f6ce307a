// ---------------------------------------------------------------------------
// Location filter — sector-based candidate narrowing
// ---------------------------------------------------------------------------

use std::collections::HashSet;

use crate::catalogue::CatalogueStore;

/// The wire sentinel for "no sector filter" (the original UI's
/// "Overall" option).
pub const ALL_SECTORS: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectorFilter {
	All,
	Sector(String),
}

impl SectorFilter {
	/// Map the `"ALL"` sentinel to `All`; any other string is an exact,
	/// case-sensitive sector match (including the literal `"Unknown"`).
	pub fn parse(selector: &str) -> Self {
		if selector == ALL_SECTORS {
			Self::All
		} else {
			Self::Sector(selector.to_string())
		}
	}
}

/// Indices of catalogue properties matching the filter. An empty set is a
/// valid outcome (a sector with no properties), not an error.
pub fn filter_indices(catalogue: &CatalogueStore, filter: &SectorFilter) -> HashSet<usize> {
	match filter {
		SectorFilter::All => (0..catalogue.len()).collect(),
		SectorFilter::Sector(sector) => catalogue
			.all_properties()
			.iter()
			.enumerate()
			.filter(|(_, p)| p.sector == *sector)
			.map(|(i, _)| i)
			.collect(),
	}
}
