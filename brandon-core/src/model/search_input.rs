use serde::{Deserialize, Serialize};

use crate::error::{BrandonError, BrandonResult};

/// Input parameters of a Monte Carlo search.
///
/// `SearchInput` mixes the **size of the search** (`rounds`, `batch_factor`)
/// with the **shape of the result** (`top_k`, `word_length`) and optional
/// filters.
///
/// # Responsibilities
/// - Hold the search parameters with sensible defaults
/// - Validate them before a search starts
///
/// # Invariants
/// - A validated input has `top_k`, `rounds`, `word_length` and
///   `batch_factor` all >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SearchInput {
	/// Number of candidates to retain.
	pub top_k: usize,

	/// Number of sampling rounds. The retained set persists across rounds.
	pub rounds: usize,

	/// Length (in characters) of every sampled candidate.
	pub word_length: usize,

	/// Each round draws `top_k * batch_factor` candidates.
	pub batch_factor: usize,

	/// Skip candidates that appear in the training corpus.
	pub exclude_known: bool,

	/// Skip candidates already retained.
	pub distinct: bool,
}

impl Default for SearchInput {
	fn default() -> Self {
		Self {
			top_k: 10,
			rounds: 50,
			word_length: 6,
			batch_factor: 10,
			exclude_known: false,
			distinct: false,
		}
	}
}

impl SearchInput {
	/// Creates a validated input, other parameters keep their defaults.
	///
	/// # Errors
	/// Returns a configuration error if any value is 0.
	pub fn new(top_k: usize, rounds: usize, word_length: usize) -> BrandonResult<Self> {
		let input = Self { top_k, rounds, word_length, ..Self::default() };
		input.validate()?;
		Ok(input)
	}

	/// Number of candidates drawn per round.
	pub fn batch_size(&self) -> usize {
		self.top_k.saturating_mul(self.batch_factor)
	}

	/// Checks that every count is at least 1.
	pub fn validate(&self) -> BrandonResult<()> {
		for (name, value) in [
			("top_k", self.top_k),
			("rounds", self.rounds),
			("word_length", self.word_length),
			("batch_factor", self.batch_factor),
		] {
			if value == 0 {
				return Err(BrandonError::config(format!("{name} must be >= 1")));
			}
		}
		Ok(())
	}

	/// Sets the number of retained candidates.
	///
	/// # Errors
	/// Returns an error if `top_k` is 0.
	pub fn set_top_k(&mut self, top_k: usize) -> BrandonResult<()> {
		if top_k == 0 {
			return Err(BrandonError::config("top_k must be >= 1"));
		}
		self.top_k = top_k;
		Ok(())
	}

	/// Sets the number of rounds.
	///
	/// # Errors
	/// Returns an error if `rounds` is 0.
	pub fn set_rounds(&mut self, rounds: usize) -> BrandonResult<()> {
		if rounds == 0 {
			return Err(BrandonError::config("rounds must be >= 1"));
		}
		self.rounds = rounds;
		Ok(())
	}

	/// Sets the candidate length.
	///
	/// # Errors
	/// Returns an error if `word_length` is 0.
	pub fn set_word_length(&mut self, word_length: usize) -> BrandonResult<()> {
		if word_length == 0 {
			return Err(BrandonError::config("word_length must be >= 1"));
		}
		self.word_length = word_length;
		Ok(())
	}
}
