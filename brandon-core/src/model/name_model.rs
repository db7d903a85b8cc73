use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};

use super::alphabet::Alphabet;
use super::trigram_model::{TrigramModel, IMPOSSIBLE_ENERGY};
use super::vowel_model::{VowelModel, VowelPatternCounts};
use crate::config::{CaseFolding, ModelConfig};
use crate::error::{BrandonError, BrandonResult};
use crate::io::read_corpus;

/// Training side of a `NameModel`.
///
/// Feeds every word to a trigram model and to a vowel skeleton counter.
/// `finish` freezes the result into an immutable `NameModel`, so a model
/// can never be trained again once it is used for scoring.
///
/// # Responsibilities
/// - Apply the configured case policy to training words
/// - Reject words containing characters outside the alphabet
/// - Merge with a builder trained on another corpus (same configuration)
#[derive(Clone, Debug)]
pub struct NameModelBuilder {
	config: ModelConfig,
	trigram: TrigramModel,
	vowels: VowelPatternCounts,
	/// Distinct training words (after case folding).
	sentences: HashSet<String>,
	/// Number of training words, duplicates included.
	words: usize,
}

impl NameModelBuilder {
	/// Creates an empty builder.
	///
	/// # Errors
	/// Returns a configuration error if the configured alphabet is invalid.
	pub fn new(config: &ModelConfig) -> BrandonResult<Self> {
		let trigram = TrigramModel::new(config.alphabet()?)?.with_short_words(config.short_words);
		Ok(Self {
			config: config.clone(),
			trigram,
			vowels: VowelPatternCounts::new(config.vowel_set()),
			sentences: HashSet::new(),
			words: 0,
		})
	}

	/// Creates a builder trained on a corpus file (one word per line).
	///
	/// # Errors
	/// Returns an I/O error if the file cannot be read, or `OutOfAlphabet`
	/// on the first word the alphabet cannot represent.
	pub fn from_file<P: AsRef<Path>>(filepath: P, config: &ModelConfig) -> BrandonResult<Self> {
		let corpus = read_corpus(&filepath)?;
		info!("read {} words from {}", corpus.len(), filepath.as_ref().display());

		let mut builder = Self::new(config)?;
		builder.build(&corpus)?;
		Ok(builder)
	}

	/// Adds a training word to both models.
	///
	/// # Errors
	/// Returns `OutOfAlphabet` if the word has a character outside the
	/// alphabet. Nothing is recorded in that case.
	pub fn add(&mut self, word: &str) -> BrandonResult<()> {
		let word = self.config.case_folding.apply(word);
		self.trigram.add(&word)?;
		self.vowels.add(&word);
		self.sentences.insert(word.into_owned());
		self.words += 1;
		Ok(())
	}

	/// Adds every word of a corpus, stopping at the first invalid one.
	pub fn build<I, S>(&mut self, words: I) -> BrandonResult<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.add(word.as_ref())?;
		}
		Ok(())
	}

	/// Merges the statistics of another builder into this one.
	///
	/// # Errors
	/// Returns a configuration error if both builders were not created with
	/// the same configuration.
	pub fn merge(&mut self, other: &Self) -> BrandonResult<()> {
		if self.config != other.config {
			return Err(BrandonError::config("cannot merge models with different configurations"));
		}

		self.trigram.merge(&other.trigram)?;
		self.vowels.merge(&other.vowels);
		self.sentences.extend(other.sentences.iter().cloned());
		self.words += other.words;
		Ok(())
	}

	/// Number of training words seen so far, duplicates included.
	pub fn len(&self) -> usize {
		self.words
	}

	pub fn is_empty(&self) -> bool {
		self.words == 0
	}

	/// Freezes the builder into a scoring model.
	///
	/// # Errors
	/// Returns a configuration error if no word was added: such a model
	/// would give every short word a zero probability.
	pub fn finish(self) -> BrandonResult<NameModel> {
		if self.is_empty() {
			return Err(BrandonError::config("cannot build a model from an empty corpus"));
		}

		let vowels = self.vowels.normalize();
		debug!(
			"model trained on {} words ({} distinct), {} vowel patterns",
			self.words,
			self.sentences.len(),
			vowels.len()
		);

		Ok(NameModel {
			case_folding: self.config.case_folding,
			trigram: self.trigram,
			vowels,
			sentences: self.sentences,
		})
	}
}

/// Trained model scoring how name-like a word is.
///
/// The score is the sum of the trigram energy and the vowel skeleton
/// energy of the word, without weighting. Lower is better.
#[derive(Clone, Debug)]
pub struct NameModel {
	case_folding: CaseFolding,
	trigram: TrigramModel,
	vowels: VowelModel,
	sentences: HashSet<String>,
}

impl NameModel {
	/// Trains a model on a corpus in one go.
	pub fn train<I, S>(config: &ModelConfig, corpus: I) -> BrandonResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut builder = NameModelBuilder::new(config)?;
		builder.build(corpus)?;
		builder.finish()
	}

	/// Trains a model on a corpus file (one word per line).
	pub fn from_file<P: AsRef<Path>>(filepath: P, config: &ModelConfig) -> BrandonResult<Self> {
		NameModelBuilder::from_file(filepath, config)?.finish()
	}

	pub fn alphabet(&self) -> &Alphabet {
		self.trigram.alphabet()
	}

	pub fn trigram(&self) -> &TrigramModel {
		&self.trigram
	}

	pub fn vowels(&self) -> &VowelModel {
		&self.vowels
	}

	/// Number of distinct training words.
	pub fn corpus_size(&self) -> usize {
		self.sentences.len()
	}

	/// Returns true if `word` was part of the training corpus.
	pub fn is_known(&self, word: &str) -> bool {
		self.sentences.contains(&*self.case_folding.apply(word))
	}

	/// Combined energy of a word, capped at `IMPOSSIBLE_ENERGY`.
	///
	/// # Errors
	/// Returns `OutOfAlphabet` if the word has a character outside the alphabet.
	pub fn score(&self, word: &str) -> BrandonResult<f64> {
		let word = self.case_folding.apply(word);
		let energy = self.vowels.energy(&word) + self.trigram.energy(&word)?;
		Ok(energy.min(IMPOSSIBLE_ENERGY))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::model::trigram_model::ShortWordPolicy;

	const CORPUS: [&str; 3] = ["anna", "emma", "lola"];

	#[test]
	fn score_is_the_sum_of_both_energies() {
		let model = NameModel::train(&ModelConfig::default(), CORPUS).unwrap();
		for word in ["anna", "lila", "zzzz", "xqaw"] {
			let expected = model.vowels().energy(word) + model.trigram().energy(word).unwrap();
			assert_eq!(model.score(word).unwrap(), expected);
		}
	}

	#[test]
	fn training_words_score_better_than_noise() {
		let model = NameModel::train(&ModelConfig::default(), CORPUS).unwrap();
		assert!(model.score("anna").unwrap() < model.score("xqzw").unwrap());
		assert!(model.score("lola").unwrap() < model.score("lolq").unwrap());
	}

	#[test]
	fn scores_of_four_letter_words_are_finite_and_non_negative() {
		let model = NameModel::train(&ModelConfig::default(), CORPUS).unwrap();
		for word in ["anna", "abcd", "zzzz", "emmy"] {
			let score = model.score(word).unwrap();
			assert!(score.is_finite() && score >= 0.0, "{word}: {score}");
		}
	}

	#[test]
	fn unseen_short_words_are_capped() {
		let model = NameModel::train(&ModelConfig::default(), CORPUS).unwrap();
		assert_eq!(model.score("qq").unwrap(), IMPOSSIBLE_ENERGY);
	}

	#[test]
	fn empty_corpus_is_a_configuration_error() {
		let empty: [&str; 0] = [];
		assert!(matches!(
			NameModel::train(&ModelConfig::default(), empty),
			Err(BrandonError::Configuration(_))
		));
	}

	#[test]
	fn out_of_alphabet_training_word_fails_fast() {
		let result = NameModel::train(&ModelConfig::default(), ["anna", "Emma"]);
		assert!(matches!(result, Err(BrandonError::OutOfAlphabet { character: 'E', .. })));
	}

	#[test]
	fn lowercase_policy_folds_training_and_queries() {
		let config = ModelConfig { case_folding: CaseFolding::Lowercase, ..ModelConfig::default() };
		let model = NameModel::train(&config, ["Anna", "EMMA", "lola"]).unwrap();

		assert!(model.is_known("anna"));
		assert!(model.is_known("Emma"));
		assert_eq!(model.score("ANNA").unwrap(), model.score("anna").unwrap());
	}

	#[test]
	fn oversized_alphabet_fails_before_allocating() {
		let config = ModelConfig { alphabet: ('\u{4e00}'..).take(4000).collect(), ..ModelConfig::default() };
		assert!(matches!(NameModelBuilder::new(&config), Err(BrandonError::Configuration(_))));
	}

	#[test]
	fn known_words() {
		let model = NameModel::train(&ModelConfig::default(), ["anna", "anna", "emma"]).unwrap();
		assert!(model.is_known("anna"));
		assert!(!model.is_known("lola"));
		assert_eq!(model.corpus_size(), 2);
	}

	#[test]
	fn merged_builders_score_like_a_single_corpus() {
		let config = ModelConfig::default();
		let mut left = NameModelBuilder::new(&config).unwrap();
		left.build(["anna", "emma"]).unwrap();
		let mut right = NameModelBuilder::new(&config).unwrap();
		right.add("lola").unwrap();
		left.merge(&right).unwrap();
		assert_eq!(left.len(), 3);

		let merged = left.finish().unwrap();
		let single = NameModel::train(&config, CORPUS).unwrap();
		for word in ["anna", "lila", "mola"] {
			assert_eq!(merged.score(word).unwrap(), single.score(word).unwrap());
		}
	}

	#[test]
	fn merge_requires_the_same_configuration() {
		let mut left = NameModelBuilder::new(&ModelConfig::default()).unwrap();
		let config = ModelConfig { short_words: ShortWordPolicy::Normalized, ..ModelConfig::default() };
		let right = NameModelBuilder::new(&config).unwrap();
		assert!(matches!(left.merge(&right), Err(BrandonError::Configuration(_))));
	}
}
