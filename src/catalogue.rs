// ---------------------------------------------------------------------------
// CatalogueStore — ordered property table with O(1) name lookup
// ---------------------------------------------------------------------------
//
// Read-only reference data: the property table is loaded once from a
// persisted artifact and never mutated. Display names are unique, so the
// name→index map is a bijection onto 0..N-1.
// ---------------------------------------------------------------------------

use std::collections::HashMap;

use crate::error::RecommenderError;
use crate::types::Property;

/// Sector label for properties without an assigned sector. Omitted from
/// the advertised sector list but still filterable as a literal string.
pub const UNKNOWN_SECTOR: &str = "Unknown";

#[derive(Debug)]
pub struct CatalogueStore {
	properties: Vec<Property>,
	index_by_name: HashMap<String, usize>,
}

impl CatalogueStore {
	/// Build the store and its name→index map. Fails with `Corruption`
	/// if two properties share a display name.
	pub fn new(properties: Vec<Property>) -> Result<Self, RecommenderError> {
		let mut index_by_name = HashMap::with_capacity(properties.len());
		for (index, property) in properties.iter().enumerate() {
			if index_by_name.insert(property.name.clone(), index).is_some() {
				return Err(RecommenderError::Corruption(format!(
					"Duplicate property name: {}",
					property.name
				)));
			}
		}
		Ok(Self {
			properties,
			index_by_name,
		})
	}

	pub fn len(&self) -> usize {
		self.properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	/// Resolve a display name to its catalogue index.
	pub fn lookup_index(&self, name: &str) -> Result<usize, RecommenderError> {
		self.index_by_name
			.get(name)
			.copied()
			.ok_or_else(|| RecommenderError::NotFound(name.to_string()))
	}

	pub fn property_at(&self, index: usize) -> Result<&Property, RecommenderError> {
		self.properties
			.get(index)
			.ok_or(RecommenderError::IndexOutOfRange(index))
	}

	pub fn all_properties(&self) -> &[Property] {
		&self.properties
	}

	/// Sorted unique sector labels, with the "Unknown" placeholder left
	/// out of the listing.
	pub fn sectors(&self) -> Vec<String> {
		let mut sectors: Vec<String> = self
			.properties
			.iter()
			.map(|p| p.sector.clone())
			.filter(|s| s != UNKNOWN_SECTOR)
			.collect();
		sectors.sort();
		sectors.dedup();
		sectors
	}
}
