// ---------------------------------------------------------------------------
// RecommenderServer — JSON-RPC dispatcher
// ---------------------------------------------------------------------------
//
// Routes incoming JSON-RPC 2.0 requests (NDJSON over stdin) to the
// recommender engine: a main `run()` loop, a `dispatch()` match, a
// `with_engine` helper, and free-standing handler functions per method.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead};

use serde::Deserialize;

use crate::error::RecommenderError;
use crate::filter::{filter_indices, SectorFilter, ALL_SECTORS};
use crate::persistence::load_artifact;
use crate::protocol::*;
use crate::recommender::{RecommenderEngine, DEFAULT_K};
use crate::transport::NdjsonTransport;
use crate::types::WeightTriple;

pub struct RecommenderServer {
	transport: NdjsonTransport,
	engine: Option<RecommenderEngine>,
}

impl RecommenderServer {
	/// Create a new server. The engine is created when `engine/initialize`
	/// loads an artifact.
	pub fn new(transport: NdjsonTransport) -> Self {
		Self {
			transport,
			engine: None,
		}
	}

	/// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
	pub fn run(&mut self) -> Result<(), RecommenderError> {
		let stdin = io::stdin();
		let reader = stdin.lock();

		for line_result in reader.lines() {
			let line = line_result?;
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(&line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			self.dispatch(request);
		}

		Ok(())
	}

	fn dispatch(&mut self, req: JsonRpcRequest) {
		let id = req.id;
		let result = match req.method.as_str() {
			// -- Lifecycle -----------------------------------------------
			"engine/initialize" => self.handle_initialize(req.params),
			"engine/size" => self.with_engine(|e| {
				Ok(serde_json::json!({ "count": e.catalogue().len() }))
			}),

			// -- Catalogue browsing --------------------------------------
			"catalogue/sectors" => self.with_engine(|e| {
				Ok(serde_json::json!({ "sectors": e.catalogue().sectors() }))
			}),
			"catalogue/properties" => {
				self.with_engine(|e| handle_properties(e, req.params))
			}
			"catalogue/lookup" => self.with_engine(|e| handle_lookup(e, req.params)),

			// -- Recommendation ------------------------------------------
			"recommender/recommend" => {
				self.with_engine(|e| handle_recommend(e, req.params))
			}

			// -- Unknown -------------------------------------------------
			_ => {
				self.transport.write_error(
					id,
					METHOD_NOT_FOUND,
					format!("Unknown method: {}", req.method),
					None,
				);
				return;
			}
		};

		match result {
			Ok(value) => self.transport.write_response(id, value),
			Err(e) => self.transport.write_error(
				id,
				RECOMMENDER_ERROR,
				e.to_string(),
				Some(e.to_json_rpc_error()),
			),
		}
	}

	fn with_engine<F>(&self, f: F) -> Result<serde_json::Value, RecommenderError>
	where
		F: FnOnce(&RecommenderEngine) -> Result<serde_json::Value, RecommenderError>,
	{
		match &self.engine {
			Some(e) => f(e),
			None => Err(RecommenderError::NotInitialized),
		}
	}

	fn handle_initialize(
		&mut self,
		params: serde_json::Value,
	) -> Result<serde_json::Value, RecommenderError> {
		let p: InitializeParams = parse_params(params)?;
		let engine = load_artifact(std::path::Path::new(&p.artifact_path))?;
		let count = engine.catalogue().len();
		tracing::info!("Loaded catalogue with {} properties", count);
		self.engine = Some(engine);
		Ok(serde_json::json!({ "count": count }))
	}
}

// ---------------------------------------------------------------------------
// Param types
// ---------------------------------------------------------------------------

fn parse_params<T: serde::de::DeserializeOwned>(
	params: serde_json::Value,
) -> Result<T, RecommenderError> {
	serde_json::from_value(params)
		.map_err(|e| RecommenderError::Serialization(format!("Invalid params: {}", e)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
	artifact_path: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesParams {
	sector: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupParams {
	name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendParams {
	anchor: String,
	sector: Option<String>,
	weights: Option<WeightTriple>,
	k: Option<usize>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn sector_filter(sector: Option<&str>) -> SectorFilter {
	SectorFilter::parse(sector.unwrap_or(ALL_SECTORS))
}

fn handle_properties(
	engine: &RecommenderEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommenderError> {
	let p: PropertiesParams = parse_params(params)?;
	let filter = sector_filter(p.sector.as_deref());
	let candidates = filter_indices(engine.catalogue(), &filter);

	// Catalogue order, like the original sector-filtered listing.
	let names: Vec<&str> = engine
		.catalogue()
		.all_properties()
		.iter()
		.enumerate()
		.filter(|(i, _)| candidates.contains(i))
		.map(|(_, p)| p.name.as_str())
		.collect();
	Ok(serde_json::json!({ "count": names.len(), "properties": names }))
}

fn handle_lookup(
	engine: &RecommenderEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommenderError> {
	let p: LookupParams = parse_params(params)?;
	let index = engine.catalogue().lookup_index(&p.name)?;
	let property = engine.catalogue().property_at(index)?;
	Ok(serde_json::json!({ "index": index, "property": property }))
}

fn handle_recommend(
	engine: &RecommenderEngine,
	params: serde_json::Value,
) -> Result<serde_json::Value, RecommenderError> {
	let p: RecommendParams = parse_params(params)?;
	let filter = sector_filter(p.sector.as_deref());
	let weights = p.weights.unwrap_or_default();
	let k = p.k.unwrap_or(DEFAULT_K);

	let recommendations = engine.recommend(&p.anchor, &filter, &weights, k)?;
	Ok(serde_json::json!({ "recommendations": recommendations }))
}
