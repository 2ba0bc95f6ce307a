// ---------------------------------------------------------------------------
// Artifact persistence — gzipped JSON catalogue + matrices
// ---------------------------------------------------------------------------
//
// The catalogue and the three similarity matrices are produced by the
// upstream preparation pipeline and loaded here exactly once at startup.
//
// File format (v1): gzipped JSON
//   { "version": 1, "properties": [...],
//     "facilities": { "n": N, "rows": [b64, ...] },
//     "price": {...}, "location": {...} }
// where each matrix row is base64 of f64 little-endian bytes. Plain
// (uncompressed) JSON is accepted on load.
// ---------------------------------------------------------------------------

use std::io::Read;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::{GzDecoder, GzEncoder};
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::catalogue::CatalogueStore;
use crate::error::RecommenderError;
use crate::matrix::SimilarityMatrix;
use crate::recommender::RecommenderEngine;
use crate::types::Property;

pub const ARTIFACT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Wire structs
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct ArtifactFile {
	version: u32,
	properties: Vec<Property>,
	facilities: MatrixSection,
	price: MatrixSection,
	location: MatrixSection,
}

#[derive(Serialize, Deserialize)]
struct MatrixSection {
	n: usize,
	rows: Vec<String>,
}

// ---------------------------------------------------------------------------
// Row encode / decode
// ---------------------------------------------------------------------------

/// Encode a matrix row as base64 of f64 little-endian bytes.
pub fn encode_row(row: &[f64]) -> String {
	let bytes: Vec<u8> = row.iter().flat_map(|v| v.to_le_bytes()).collect();
	STANDARD.encode(&bytes)
}

/// Decode a base64-encoded f64 LE byte string back to `Vec<f64>`.
pub fn decode_row(encoded: &str) -> Result<Vec<f64>, RecommenderError> {
	let bytes = STANDARD
		.decode(encoded)
		.map_err(|e| RecommenderError::Corruption(format!("Invalid base64: {}", e)))?;
	if bytes.len() % 8 != 0 {
		return Err(RecommenderError::Corruption(
			"Invalid matrix row length".into(),
		));
	}
	let mut row = Vec::with_capacity(bytes.len() / 8);
	for chunk in bytes.chunks_exact(8) {
		let mut buf = [0u8; 8];
		buf.copy_from_slice(chunk);
		row.push(f64::from_le_bytes(buf));
	}
	Ok(row)
}

// ---------------------------------------------------------------------------
// Gzip compress / decompress
// ---------------------------------------------------------------------------

/// Gzip-compress a byte slice (level 6).
pub fn compress(data: &[u8]) -> Result<Vec<u8>, RecommenderError> {
	let mut encoder = GzEncoder::new(data, Compression::new(6));
	let mut compressed = Vec::new();
	encoder
		.read_to_end(&mut compressed)
		.map_err(RecommenderError::Io)?;
	Ok(compressed)
}

/// Gunzip-decompress a byte slice.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, RecommenderError> {
	let mut decoder = GzDecoder::new(data);
	let mut decompressed = Vec::new();
	decoder
		.read_to_end(&mut decompressed)
		.map_err(RecommenderError::Io)?;
	Ok(decompressed)
}

/// Check if data starts with gzip magic bytes (0x1f, 0x8b).
pub fn is_gzipped(data: &[u8]) -> bool {
	data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

fn matrix_section(matrix: &SimilarityMatrix) -> MatrixSection {
	MatrixSection {
		n: matrix.len(),
		rows: matrix.rows().map(encode_row).collect(),
	}
}

fn section_matrix(label: &str, section: &MatrixSection) -> Result<SimilarityMatrix, RecommenderError> {
	if section.rows.len() != section.n {
		return Err(RecommenderError::Corruption(format!(
			"{} matrix declares n={} but has {} rows",
			label,
			section.n,
			section.rows.len()
		)));
	}
	let rows = section
		.rows
		.iter()
		.map(|encoded| decode_row(encoded))
		.collect::<Result<Vec<_>, _>>()?;
	SimilarityMatrix::from_rows(rows)
}

/// Write the engine's catalogue and matrices to a gzipped artifact file.
pub fn save_artifact(engine: &RecommenderEngine, path: &Path) -> Result<(), RecommenderError> {
	let file = ArtifactFile {
		version: ARTIFACT_VERSION,
		properties: engine.catalogue().all_properties().to_vec(),
		facilities: matrix_section(engine.facilities()),
		price: matrix_section(engine.price()),
		location: matrix_section(engine.location()),
	};
	let json = serde_json::to_vec(&file)
		.map_err(|e| RecommenderError::Serialization(e.to_string()))?;
	std::fs::write(path, compress(&json)?)?;
	Ok(())
}

/// Load an artifact file and assemble a ready-to-serve engine.
pub fn load_artifact(path: &Path) -> Result<RecommenderEngine, RecommenderError> {
	let raw = std::fs::read(path)?;
	let json = if is_gzipped(&raw) {
		decompress(&raw)?
	} else {
		raw
	};
	let file: ArtifactFile = serde_json::from_slice(&json)
		.map_err(|e| RecommenderError::Corruption(format!("Invalid artifact JSON: {}", e)))?;
	if file.version != ARTIFACT_VERSION {
		return Err(RecommenderError::Corruption(format!(
			"Unsupported artifact version: {}",
			file.version
		)));
	}

	let catalogue = CatalogueStore::new(file.properties)?;
	let facilities = section_matrix("facilities", &file.facilities)?;
	let price = section_matrix("price", &file.price)?;
	let location = section_matrix("location", &file.location)?;
	RecommenderEngine::new(catalogue, facilities, price, location)
}
