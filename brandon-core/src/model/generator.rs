use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::config::ModelConfig;
use crate::error::{BrandonError, BrandonResult};
use crate::io;
use crate::model::name_model::NameModel;
use crate::model::retainer::Candidate;
use crate::model::sampler::StringSource;
use crate::model::search::search;
use crate::model::search_input::SearchInput;

/// High-level generator managing one `NameModel` per corpus.
///
/// # Responsibilities
/// - Train a model for every corpus file of a folder
/// - Run Monte Carlo searches against a named model
/// - Rank the results, best first
#[derive(Debug)]
pub struct Generator {
	config: ModelConfig,
	models: HashMap<String, NameModel>,
}

impl Generator {
	/// Creates a generator without any model.
	pub fn empty(config: ModelConfig) -> BrandonResult<Self> {
		config.validate()?;
		Ok(Self { config, models: HashMap::new() })
	}

	/// Creates a generator by training a model on every `.dat` file of a directory.
	///
	/// # Parameters
	/// - `filepath`: Path to a directory containing corpus files.
	///   Both `"folder"` and `"folder/"` are accepted.
	/// - `config`: Alphabet, vowels and case policy shared by all models.
	///
	/// # Behavior
	/// - Lists all files with the `.dat` extension in the given directory.
	/// - Trains one model per file, named after the file (without extension).
	/// - Files that cannot be turned into a model (empty corpus, characters
	///   outside the alphabet) are skipped with a warning.
	///
	/// # Errors
	/// - Returns an error if the path does not exist or is not a directory.
	/// - Returns an error if a file cannot be read.
	pub fn new<P: AsRef<Path>>(filepath: P, config: ModelConfig) -> BrandonResult<Self> {
		let mut generator = Self::empty(config)?;

		let string_path = match filepath.as_ref().to_str() {
			Some(s) => s,
			None => return Err(BrandonError::config("Invalid filepath")),
		};
		// Normalize "folder" / "folder/"
		let folder = io::normalize_folder(string_path);

		if !folder.is_dir() {
			return Err(BrandonError::config(format!("Expected a directory, got: {}", folder.display())));
		}

		for file in io::list_files(&folder, "dat")? {
			let full_path = folder.join(&file);
			match generator.load_model(&full_path) {
				Ok(()) => (),
				Err(BrandonError::Io(e)) => return Err(BrandonError::Io(e)),
				Err(e) => warn!("skipping {}: {e}", full_path.display()),
			}
		}

		info!("generator ready with {} models", generator.models.len());
		Ok(generator)
	}

	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	/// Returns the names of the loaded models, sorted.
	pub fn get_model_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.models.keys().cloned().collect();
		names.sort();
		names
	}

	/// Trains a model from a corpus file and registers it under the file name.
	///
	/// # Errors
	/// Returns an error if a model with this name is already loaded, or if
	/// the corpus cannot be read or trained on.
	pub fn load_model<P: AsRef<Path>>(&mut self, filepath: P) -> BrandonResult<()> {
		let key = io::get_filename(&filepath)?;
		if self.models.contains_key(&key) {
			return Err(BrandonError::config(format!("Model {key} already loaded")));
		}
		let model = NameModel::from_file(filepath, &self.config)?;
		self.insert_model(key, model);
		Ok(())
	}

	/// Registers an already trained model, replacing any model with this name.
	pub fn insert_model<S: Into<String>>(&mut self, name: S, model: NameModel) {
		self.models.insert(name.into(), model);
	}

	/// # Errors
	/// Returns `ModelNotFound` if no model has this name.
	pub fn model(&self, name: &str) -> BrandonResult<&NameModel> {
		self.models.get(name).ok_or_else(|| BrandonError::ModelNotFound(name.to_owned()))
	}

	/// Energy of `word` according to the named model.
	pub fn score(&self, name: &str, word: &str) -> BrandonResult<f64> {
		self.model(name)?.score(word)
	}

	/// Runs a search against the named model.
	///
	/// Unlike `search`, the candidates are sorted by ascending energy.
	pub fn generate<S>(&self, name: &str, input: &SearchInput, source: &mut S) -> BrandonResult<Vec<Candidate>>
	where
		S: StringSource + ?Sized,
	{
		let mut candidates = search(self.model(name)?, input, source)?;
		candidates.sort_by(|a, b| a.score().total_cmp(&b.score()));
		Ok(candidates)
	}
}
