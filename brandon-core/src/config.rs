use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::BrandonResult;
use crate::model::alphabet::{Alphabet, LATIN_LOWERCASE};
use crate::model::trigram_model::ShortWordPolicy;
use crate::model::vowel_model::{VowelSet, DEFAULT_VOWELS};

/// How words are cased before they reach the statistical models.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseFolding {
	/// Words are used as given; `A` and `a` are different symbols.
	#[default]
	Preserve,
	/// Words are lowercased, both when training and when scoring.
	Lowercase,
}

impl CaseFolding {
	pub fn apply(self, word: &str) -> Cow<'_, str> {
		match self {
			CaseFolding::Preserve => Cow::Borrowed(word),
			CaseFolding::Lowercase => Cow::Owned(word.to_lowercase()),
		}
	}
}

/// Settings shared by every model trained from a corpus.
///
/// The same alphabet indexes the frequency tables and bounds the random
/// candidates, which is why it lives here rather than in the search input.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
	/// Symbols a word may contain. Default: `a..z`.
	pub alphabet: String,

	/// Characters counted as vowels by the skeleton model. Default: `aeiouy`.
	pub vowels: String,

	/// Case policy applied to training and query words. Default: preserve.
	pub case_folding: CaseFolding,

	/// Units of the 1 to 3 character probabilities. Default: raw counts.
	pub short_words: ShortWordPolicy,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			alphabet: LATIN_LOWERCASE.to_owned(),
			vowels: DEFAULT_VOWELS.to_owned(),
			case_folding: CaseFolding::default(),
			short_words: ShortWordPolicy::default(),
		}
	}
}

impl ModelConfig {
	/// Builds the alphabet lookup table.
	///
	/// # Errors
	/// Returns a configuration error if the alphabet is empty, too large or
	/// has duplicates.
	pub fn alphabet(&self) -> BrandonResult<Alphabet> {
		Alphabet::new(&self.alphabet)
	}

	pub fn vowel_set(&self) -> VowelSet {
		VowelSet::new(&self.vowels)
	}

	/// Checks the configuration without building anything else.
	pub fn validate(&self) -> BrandonResult<()> {
		self.alphabet().map(|_| ())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::error::BrandonError;

	#[test]
	fn defaults() {
		let config = ModelConfig::default();
		assert_eq!(config.alphabet, "abcdefghijklmnopqrstuvwxyz");
		assert_eq!(config.vowels, "aeiouy");
		assert_eq!(config.case_folding, CaseFolding::Preserve);
		assert_eq!(config.short_words, ShortWordPolicy::RawCounts);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn invalid_alphabet_fails_validation() {
		let config = ModelConfig { alphabet: String::new(), ..ModelConfig::default() };
		assert!(config.validate().is_err());
	}

	#[test]
	fn oversized_alphabet_fails_validation() {
		let config = ModelConfig { alphabet: ('\u{4e00}'..).take(4000).collect(), ..ModelConfig::default() };
		assert!(matches!(config.validate(), Err(BrandonError::Configuration(_))));
	}

	#[test]
	fn lowercase_folding() {
		assert_eq!(CaseFolding::Lowercase.apply("Anna"), "anna");
		assert_eq!(CaseFolding::Preserve.apply("Anna"), "Anna");
	}
}
