use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommenderError {
	#[error("Engine not initialized: call engine/initialize first")]
	NotInitialized,
	#[error("Property not found: {0}")]
	NotFound(String),
	#[error("Index out of range: {0}")]
	IndexOutOfRange(usize),
	#[error("Invalid weights: at least one weight must be positive")]
	InvalidWeights,
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Artifact corruption: {0}")]
	Corruption(String),
}

impl RecommenderError {
	pub fn code(&self) -> &str {
		match self {
			Self::NotInitialized => "ENGINE_NOT_LOADED",
			Self::NotFound(_) => "PROPERTY_NOT_FOUND",
			Self::IndexOutOfRange(_) => "INDEX_OUT_OF_RANGE",
			Self::InvalidWeights => "INVALID_WEIGHTS",
			Self::Io(_) => "ENGINE_IO",
			Self::Serialization(_) => "ENGINE_SERIALIZATION",
			Self::Corruption(_) => "ARTIFACT_CORRUPT",
		}
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		serde_json::json!({
			"recommenderCode": self.code(),
			"message": self.to_string(),
		})
	}
}
