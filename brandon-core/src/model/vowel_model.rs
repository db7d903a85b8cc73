//! Vowel skeleton statistics.
//!
//! The skeleton of a word keeps its vowels only. Vowels that follow each
//! other without being the same character are separated by `-`:
//!
//! ```text
//! |K|A|T|A|  ->  a-a
//! |M|O|O|N|  ->  oo
//! ```

use std::collections::{HashMap, HashSet};

use super::trigram_model::finite_energy;

/// Vowels used when none are configured.
pub const DEFAULT_VOWELS: &str = "aeiouy";

/// Marker inserted between two distinct vowels of a skeleton.
pub const SKELETON_SEPARATOR: char = '-';

/// Probability given to a skeleton never seen during training.
pub const UNSEEN_PATTERN_PROBABILITY: f64 = 0.0001;

/// Set of characters treated as vowels. Matching is case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VowelSet(HashSet<char>);

impl VowelSet {
	pub fn new(vowels: &str) -> Self {
		Self(vowels.chars().collect())
	}

	pub fn is_vowel(&self, c: char) -> bool {
		self.0.contains(&c)
	}

	/// Extracts the vowel skeleton of `word`.
	///
	/// A separator is pushed before a vowel when the skeleton is not empty
	/// and the character just before it *in the word* is different. The
	/// comparison is made with the previous character of the word, not the
	/// previous vowel, so `kata` gives `a-a` while `moon` gives `oo`.
	pub fn extract_skeleton(&self, word: &str) -> String {
		let chars: Vec<char> = word.chars().collect();
		let mut skeleton = String::new();

		for (i, &c) in chars.iter().enumerate() {
			if !self.is_vowel(c) {
				continue;
			}
			// A non-empty skeleton implies i > 0
			if !skeleton.is_empty() && chars[i - 1] != c {
				skeleton.push(SKELETON_SEPARATOR);
			}
			skeleton.push(c);
		}

		skeleton
	}
}

impl Default for VowelSet {
	fn default() -> Self {
		Self::new(DEFAULT_VOWELS)
	}
}

/// Raw occurrence counts of vowel skeletons, accumulated during training.
///
/// Call `normalize` once training is over to obtain a `VowelModel`.
#[derive(Clone, Debug, Default)]
pub struct VowelPatternCounts {
	vowels: VowelSet,
	counts: HashMap<String, u64>,
}

impl VowelPatternCounts {
	pub fn new(vowels: VowelSet) -> Self {
		Self { vowels, counts: HashMap::new() }
	}

	pub fn vowels(&self) -> &VowelSet {
		&self.vowels
	}

	/// Counts the skeleton of `word`. Words without vowels are ignored.
	pub fn add(&mut self, word: &str) {
		let skeleton = self.vowels.extract_skeleton(word);
		if skeleton.is_empty() {
			return;
		}
		*self.counts.entry(skeleton).or_insert(0) += 1;
	}

	pub fn build<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.add(word.as_ref());
		}
	}

	/// Sums the counts of another set of patterns into this one.
	pub fn merge(&mut self, other: &Self) {
		for (pattern, count) in &other.counts {
			*self.counts.entry(pattern.clone()).or_insert(0) += *count;
		}
	}

	/// Number of times `pattern` was seen.
	pub fn count(&self, pattern: &str) -> u64 {
		self.counts.get(pattern).copied().unwrap_or(0)
	}

	/// Number of counted words.
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Builds the probability distribution of the skeletons.
	///
	/// Every count is divided by the total. The counts themselves are left
	/// untouched, so this can be called again after more training.
	/// An empty set of counts gives an empty distribution.
	pub fn normalize(&self) -> VowelModel {
		let total = self.total();
		let probabilities = if total > 0 {
			self.counts
				.iter()
				.map(|(pattern, count)| (pattern.clone(), *count as f64 / total as f64))
				.collect()
		} else {
			HashMap::new()
		};

		VowelModel { vowels: self.vowels.clone(), probabilities }
	}
}

/// Probability distribution of vowel skeletons.
///
/// # Invariants
/// - Probabilities are in `(0, 1]` and sum to 1 unless the map is empty
#[derive(Clone, Debug)]
pub struct VowelModel {
	vowels: VowelSet,
	probabilities: HashMap<String, f64>,
}

impl VowelModel {
	pub fn vowels(&self) -> &VowelSet {
		&self.vowels
	}

	/// Probability of a skeleton, `None` if it was never seen.
	pub fn probability(&self, pattern: &str) -> Option<f64> {
		self.probabilities.get(pattern).copied()
	}

	/// Iterates over `(skeleton, probability)` pairs.
	pub fn patterns(&self) -> impl Iterator<Item = (&str, f64)> {
		self.probabilities.iter().map(|(k, v)| (k.as_str(), *v))
	}

	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// Energy of the skeleton of `word`.
	///
	/// Unseen (or empty) skeletons get the fixed penalty `-ln(0.0001)`.
	pub fn energy(&self, word: &str) -> f64 {
		let skeleton = self.vowels.extract_skeleton(word);
		let p = self.probability(&skeleton).unwrap_or(UNSEEN_PATTERN_PROBABILITY);
		finite_energy(-p.ln())
	}
}
