use thiserror::Error;

/// Root error type of the name generation library.
///
/// Configuration and alphabet errors are fatal to the call that raised them.
/// Numerical degeneracies (zero probabilities, unseen vowel patterns) are
/// modeled outcomes of the scoring functions and never surface here.
#[derive(Error, Debug)]
pub enum BrandonError {
	/// Invalid parameters: empty alphabet, zero capacity, empty corpus...
	#[error("configuration error: {0}")]
	Configuration(String),

	/// A training or query word contains a character the alphabet does not know.
	#[error("character {character:?} at position {position} of {word:?} is not in the alphabet")]
	OutOfAlphabet {
		word: String,
		character: char,
		position: usize,
	},

	/// The generator has no model registered under this name.
	#[error("model {0} not found")]
	ModelNotFound(String),

	/// Corpus loading failed.
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}

impl BrandonError {
	/// Shorthand for `BrandonError::Configuration`.
	pub(crate) fn config<S: Into<String>>(message: S) -> Self {
		BrandonError::Configuration(message.into())
	}
}

pub type BrandonResult<T> = Result<T, BrandonError>;
