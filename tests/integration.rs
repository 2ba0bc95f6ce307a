// ---------------------------------------------------------------------------
// Integration tests for estate-recommender-engine JSON-RPC 2.0 / NDJSON
// ---------------------------------------------------------------------------
//
// Each test spawns a fresh estate-recommender-engine binary and communicates
// via stdin/stdout using newline-delimited JSON-RPC 2.0 messages, against an
// artifact file written into a temp directory.
// ---------------------------------------------------------------------------

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};
use tempfile::TempDir;

use estate_recommender_engine::catalogue::CatalogueStore;
use estate_recommender_engine::matrix::SimilarityMatrix;
use estate_recommender_engine::persistence::save_artifact;
use estate_recommender_engine::recommender::RecommenderEngine;
use estate_recommender_engine::types::Property;

// ---------------------------------------------------------------------------
// Fixture artifact
// ---------------------------------------------------------------------------

/// P0..P2 in sector "A", P3 unassigned. Anchor-row similarities from P0
/// follow the documented scenario: combined(P1) = (0.8+0.5+0.3)/3 and
/// combined(P2) = (0.2+0.9+0.6)/3 under equal weights.
fn write_fixture(dir: &TempDir) -> String {
	let props = [
		("P0", "A"),
		("P1", "A"),
		("P2", "A"),
		("P3", "Unknown"),
	]
	.iter()
	.map(|(name, sector)| Property {
		name: name.to_string(),
		subtitle: format!("{} residences", name),
		sector: sector.to_string(),
		link: format!("https://example.com/{}", name),
	})
	.collect();
	let catalogue = CatalogueStore::new(props).unwrap();

	let m = |rows: Vec<Vec<f64>>| SimilarityMatrix::from_rows(rows).unwrap();
	let facilities = m(vec![
		vec![1.0, 0.8, 0.2, 0.1],
		vec![0.8, 1.0, 0.4, 0.1],
		vec![0.2, 0.4, 1.0, 0.1],
		vec![0.1, 0.1, 0.1, 1.0],
	]);
	let price = m(vec![
		vec![1.0, 0.5, 0.9, 0.2],
		vec![0.5, 1.0, 0.7, 0.2],
		vec![0.9, 0.7, 1.0, 0.2],
		vec![0.2, 0.2, 0.2, 1.0],
	]);
	let location = m(vec![
		vec![1.0, 0.3, 0.6, 0.3],
		vec![0.3, 1.0, 0.2, 0.3],
		vec![0.6, 0.2, 1.0, 0.3],
		vec![0.3, 0.3, 0.3, 1.0],
	]);

	let engine = RecommenderEngine::new(catalogue, facilities, price, location).unwrap();
	let path = dir.path().join("catalogue.bin");
	save_artifact(&engine, &path).unwrap();
	path.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

struct EngineProcess {
	child: Child,
	reader: BufReader<std::process::ChildStdout>,
	next_id: AtomicU64,
}

#[derive(Debug)]
enum RpcResponse {
	Ok(Value),
	Error(Value),
}

impl EngineProcess {
	fn spawn() -> Self {
		let bin = env!("CARGO_BIN_EXE_estate-recommender-engine");
		let mut child = Command::new(bin)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::null())
			.spawn()
			.expect("failed to spawn estate-recommender-engine");

		let stdout = child.stdout.take().expect("no stdout");
		let reader = BufReader::new(stdout);

		Self {
			child,
			reader,
			next_id: AtomicU64::new(1),
		}
	}

	fn send(&mut self, method: &str, params: Value) -> RpcResponse {
		let id = self.next_id.fetch_add(1, Ordering::SeqCst);
		let request = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});

		let stdin = self.child.stdin.as_mut().expect("no stdin");
		let mut line = serde_json::to_string(&request).unwrap();
		line.push('\n');
		stdin.write_all(line.as_bytes()).unwrap();
		stdin.flush().unwrap();

		loop {
			let mut buf = String::new();
			let bytes_read = self
				.reader
				.read_line(&mut buf)
				.expect("failed to read from stdout");
			if bytes_read == 0 {
				panic!("unexpected EOF while waiting for response to id={}", id);
			}
			let buf = buf.trim();
			if buf.is_empty() {
				continue;
			}
			let parsed: Value = serde_json::from_str(buf)
				.unwrap_or_else(|e| panic!("invalid JSON from engine: {e}\nline: {buf}"));
			if parsed.get("id").is_none() {
				continue;
			}
			let resp_id = parsed["id"].as_u64().expect("response id is not u64");
			assert_eq!(resp_id, id, "response id mismatch");
			if let Some(error) = parsed.get("error") {
				return RpcResponse::Error(error.clone());
			}
			return RpcResponse::Ok(parsed.get("result").cloned().unwrap_or(Value::Null));
		}
	}

	fn call(&mut self, method: &str, params: Value) -> Value {
		match self.send(method, params) {
			RpcResponse::Ok(v) => v,
			RpcResponse::Error(e) => panic!("expected success, got error: {e}"),
		}
	}

	fn call_err(&mut self, method: &str, params: Value) -> Value {
		match self.send(method, params) {
			RpcResponse::Error(e) => e,
			RpcResponse::Ok(v) => panic!("expected error, got success: {v}"),
		}
	}

	fn initialize(&mut self, artifact_path: &str) -> Value {
		self.call("engine/initialize", json!({ "artifactPath": artifact_path }))
	}
}

impl Drop for EngineProcess {
	fn drop(&mut self) {
		drop(self.child.stdin.take());
		let _ = self.child.wait();
	}
}

fn recommender_code(error: &Value) -> &str {
	error["data"]["recommenderCode"]
		.as_str()
		.expect("error carries recommenderCode")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn initialize_reports_catalogue_size() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();

	let result = engine.initialize(&artifact);
	assert_eq!(result["count"], 4);
	assert_eq!(engine.call("engine/size", json!({}))["count"], 4);
}

#[test]
fn calls_before_initialize_are_rejected() {
	let mut engine = EngineProcess::spawn();
	let error = engine.call_err("recommender/recommend", json!({ "anchor": "P0" }));
	assert_eq!(recommender_code(&error), "ENGINE_NOT_LOADED");
}

#[test]
fn unknown_method_is_method_not_found() {
	let mut engine = EngineProcess::spawn();
	let error = engine.call_err("engine/frobnicate", json!({}));
	assert_eq!(error["code"], -32601);
}

#[test]
fn sectors_omit_unknown() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let result = engine.call("catalogue/sectors", json!({}));
	assert_eq!(result["sectors"], json!(["A"]));
}

#[test]
fn properties_respect_sector_filter() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let all = engine.call("catalogue/properties", json!({}));
	assert_eq!(all["count"], 4);

	let sector_a = engine.call("catalogue/properties", json!({ "sector": "A" }));
	assert_eq!(sector_a["properties"], json!(["P0", "P1", "P2"]));

	let unknown = engine.call("catalogue/properties", json!({ "sector": "Unknown" }));
	assert_eq!(unknown["properties"], json!(["P3"]));

	let empty = engine.call("catalogue/properties", json!({ "sector": "B" }));
	assert_eq!(empty["count"], 0);
}

#[test]
fn lookup_resolves_name_to_index() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let result = engine.call("catalogue/lookup", json!({ "name": "P2" }));
	assert_eq!(result["index"], 2);
	assert_eq!(result["property"]["sector"], "A");

	let error = engine.call_err("catalogue/lookup", json!({ "name": "P9" }));
	assert_eq!(recommender_code(&error), "PROPERTY_NOT_FOUND");
}

#[test]
fn recommend_ranks_by_combined_score() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let result = engine.call(
		"recommender/recommend",
		json!({
			"anchor": "P0",
			"sector": "A",
			"weights": { "facilities": 1.0, "price": 1.0, "location": 1.0 },
			"k": 5,
		}),
	);
	let recs = result["recommendations"].as_array().unwrap();
	assert_eq!(recs.len(), 2);
	assert_eq!(recs[0]["name"], "P2");
	assert!((recs[0]["score"].as_f64().unwrap() - (0.2 + 0.9 + 0.6) / 3.0).abs() < 1e-9);
	assert_eq!(recs[1]["name"], "P1");
	assert!((recs[1]["score"].as_f64().unwrap() - (0.8 + 0.5 + 0.3) / 3.0).abs() < 1e-9);
	// Breakdown mirrors the matrix entries for the top hit.
	assert!((recs[0]["scores"]["price"].as_f64().unwrap() - 0.9).abs() < 1e-9);
}

#[test]
fn recommend_defaults_to_whole_catalogue_top_five() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let result = engine.call("recommender/recommend", json!({ "anchor": "P0" }));
	let recs = result["recommendations"].as_array().unwrap();
	// Whole catalogue minus the anchor.
	assert_eq!(recs.len(), 3);
	assert!(recs.iter().all(|r| r["name"] != "P0"));
}

#[test]
fn recommend_empty_sector_is_success() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let result = engine.call(
		"recommender/recommend",
		json!({ "anchor": "P0", "sector": "B" }),
	);
	assert_eq!(result["recommendations"], json!([]));
}

#[test]
fn recommend_rejects_all_zero_weights() {
	let dir = tempfile::tempdir().unwrap();
	let artifact = write_fixture(&dir);
	let mut engine = EngineProcess::spawn();
	engine.initialize(&artifact);

	let error = engine.call_err(
		"recommender/recommend",
		json!({
			"anchor": "P0",
			"weights": { "facilities": 0.0, "price": 0.0, "location": 0.0 },
		}),
	);
	assert_eq!(recommender_code(&error), "INVALID_WEIGHTS");
}

#[test]
fn initialize_with_missing_artifact_fails() {
	let mut engine = EngineProcess::spawn();
	let error = engine.call_err(
		"engine/initialize",
		json!({ "artifactPath": "/nonexistent/catalogue.bin" }),
	);
	assert_eq!(recommender_code(&error), "ENGINE_IO");
}
