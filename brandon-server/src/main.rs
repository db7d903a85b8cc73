use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::Deserialize;

use brandon_core::config::{CaseFolding, ModelConfig};
use brandon_core::error::BrandonError;
use brandon_core::io::list_files;
use brandon_core::model::name_model::{NameModel, NameModelBuilder};
use brandon_core::model::sampler::UniformSource;
use brandon_core::model::search::search;
use brandon_core::model::search_input::SearchInput;

const DATA_FOLDER: &str = "./data";

// Upper bounds of a single `/v1/generate` request
const MAX_TOP_K: usize = 1000;
const MAX_ROUNDS: usize = 10_000;
const MAX_BATCH_FACTOR: usize = 1000;
const MAX_LENGTH: usize = 64;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	top_k: Option<usize>,
	rounds: Option<usize>,
	length: Option<usize>,
	batch_factor: Option<usize>,
	exclude_known: Option<bool>,
	distinct: Option<bool>,
	seed: Option<u64> // -> reproducible search, random if missing
}

#[derive(Deserialize)]
struct ScoreQuery {
	word: Option<String>
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>
}

struct SharedData {
	config: ModelConfig,
	model: Option<Arc<NameModel>>,
	model_names: Vec<String>
}

impl GenerateParams {
	/// Builds a validated search input, missing values keep their defaults.
	///
	/// Values above the server limits are rejected as configuration errors.
	fn search_input(&self) -> Result<SearchInput, BrandonError> {
		let defaults = SearchInput::default();
		let input = SearchInput {
			top_k: self.top_k.unwrap_or(defaults.top_k),
			rounds: self.rounds.unwrap_or(defaults.rounds),
			word_length: self.length.unwrap_or(defaults.word_length),
			batch_factor: self.batch_factor.unwrap_or(defaults.batch_factor),
			exclude_known: self.exclude_known.unwrap_or(defaults.exclude_known),
			distinct: self.distinct.unwrap_or(defaults.distinct),
		};
		input.validate()?;

		for (name, value, max) in [
			("top_k", input.top_k, MAX_TOP_K),
			("rounds", input.rounds, MAX_ROUNDS),
			("batch_factor", input.batch_factor, MAX_BATCH_FACTOR),
			("length", input.word_length, MAX_LENGTH),
		] {
			if value > max {
				return Err(BrandonError::Configuration(format!("{name} must be <= {max}")));
			}
		}
		Ok(input)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Runs a Monte Carlo search against the loaded model.
/// Returns the retained candidates as JSON, best first.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.search_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string())
	};

	// The search runs on a shared handle, without holding the lock
	let model = match data.lock() {
		Ok(shared_data) => shared_data.model.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let model = match model {
		Some(model) => model,
		None => return HttpResponse::Conflict().body("No model loaded"),
	};

	let mut source = UniformSource::from_seed(query.seed);
	match search(&model, &input, &mut source) {
		Ok(mut candidates) => {
			candidates.sort_by(|a, b| a.score().total_cmp(&b.score()));
			HttpResponse::Ok().json(candidates)
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/score`
///
/// Returns the energy of a word according to the loaded model.
#[get("/v1/score")]
async fn get_score(data: web::Data<Mutex<SharedData>>, query: web::Query<ScoreQuery>) -> impl Responder {
	let word = match &query.word {
		Some(w) if !w.is_empty() => w,
		_ => return HttpResponse::BadRequest().body("Missing or empty word"),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match &shared_data.model {
		Some(model) => match model.score(word) {
			Ok(energy) => HttpResponse::Ok().body(energy.to_string()),
			Err(e) => HttpResponse::BadRequest().body(e.to_string()),
		},
		None => HttpResponse::Conflict().body("No model loaded"),
	}
}

#[get("/v1/models")]
async fn get_models() -> impl Responder {
	match list_files(DATA_FOLDER, "dat") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".dat", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models")
	}
}

#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model_names.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_models`
///
/// Trains a single model on the union of the named corpora and replaces
/// the current one. The current model is kept if anything fails.
#[put("/v1/load_models")]
async fn put_model(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let model_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let mut builder = match NameModelBuilder::new(&shared_data.config) {
		Ok(b) => b,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Invalid configuration: {e}"))
	};
	for name in &model_names {
		let model_path = format!("{DATA_FOLDER}/{name}.dat");
		let partial_model = match NameModelBuilder::from_file(&model_path, &shared_data.config) {
			Ok(m) => m,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}"))
		};
		if let Err(e) = builder.merge(&partial_model) {
			return HttpResponse::InternalServerError().body(format!("Failed to merge model: {e}"));
		}
	}

	match builder.finish() {
		Ok(model) => {
			info!("loaded models: {}", model_names.join(", "));
			shared_data.model = Some(Arc::new(model));
			shared_data.model_names = model_names.iter().map(|s| s.to_string()).collect();
			HttpResponse::Ok().body("Models loaded successfully")
		}
		Err(e) => {
			error!("failed to build model from {}: {e}", model_names.join(", "));
			HttpResponse::BadRequest().body(format!("Failed to build model: {e}"))
		}
	}
}

/// Main entry point for the server.
///
/// Starts without any model, `PUT /v1/load_models` trains one from the
/// corpora found in `./data`. Searches share the current model through an
/// `Arc` and do not hold the lock while sampling.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Logging is controlled with `RUST_LOG`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		config: ModelConfig { case_folding: CaseFolding::Lowercase, ..ModelConfig::default() },
		model: None,
		model_names: Vec::new(),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on 127.0.0.1:5000, corpora from {DATA_FOLDER}");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(middleware::Logger::default())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_score)
			.service(get_models)
			.service(put_model)
			.service(get_loaded_models)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
