use serde::{Deserialize, Serialize};

use super::alphabet::Alphabet;
use crate::error::{BrandonError, BrandonResult};

/// Energy given to a word whose probability is zero.
///
/// Finite so that it can be summed and compared like any other score: an
/// impossible word is never better than a possible one.
pub const IMPOSSIBLE_ENERGY: f64 = f64::MAX;

/// Maps a non-finite energy (zero probability) to `IMPOSSIBLE_ENERGY`.
pub(crate) fn finite_energy(energy: f64) -> f64 {
	if energy.is_finite() { energy } else { IMPOSSIBLE_ENERGY }
}

/// Units returned by `TrigramModel::probability` for words of 1 to 3 characters.
///
/// Words longer than 3 characters always get a smoothed probability.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShortWordPolicy {
	/// The raw n-gram count is returned as is. It may exceed 1, in which
	/// case the energy of the word is negative.
	#[default]
	RawCounts,
	/// The n-gram count is divided by the total of its table.
	Normalized,
}

/// Order-2 Markov model over the characters of an alphabet.
///
/// Counts every character, pair and triple seen in the training words and
/// scores a word with add-one smoothed trigram probabilities.
///
/// # Responsibilities
/// - Accumulate unigram, bigram and trigram counts during training
/// - Merge with another model trained over the same alphabet
/// - Compute the probability and energy (`-ln p`) of a word
///
/// # Invariants
/// - `unigrams.len() == n`, `bigrams.len() == n²`, `trigrams.len() == n³`
/// - Each total equals the sum of its table
/// - Tables are only mutated through `&mut self` training methods
#[derive(Clone, Debug)]
pub struct TrigramModel {
	alphabet: Alphabet,
	short_words: ShortWordPolicy,
	unigrams: Vec<u64>,
	bigrams: Vec<u64>,
	trigrams: Vec<u64>,
	unigram_total: u64,
	bigram_total: u64,
	trigram_total: u64,
}

impl TrigramModel {
	/// Creates an untrained model over `alphabet`.
	///
	/// # Errors
	/// Returns a configuration error if the `n³` trigram table cannot be
	/// addressed.
	pub fn new(alphabet: Alphabet) -> BrandonResult<Self> {
		let n = alphabet.len();
		let too_large = || BrandonError::config(format!("alphabet of {n} symbols is too large for a trigram table"));
		let pairs = n.checked_mul(n).ok_or_else(too_large)?;
		let triples = pairs.checked_mul(n).ok_or_else(too_large)?;

		Ok(Self {
			alphabet,
			short_words: ShortWordPolicy::default(),
			unigrams: vec![0; n],
			bigrams: vec![0; pairs],
			trigrams: vec![0; triples],
			unigram_total: 0,
			bigram_total: 0,
			trigram_total: 0,
		})
	}

	pub fn with_short_words(mut self, policy: ShortWordPolicy) -> Self {
		self.short_words = policy;
		self
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	pub fn short_words(&self) -> ShortWordPolicy {
		self.short_words
	}

	#[inline]
	fn pair(&self, a: usize, b: usize) -> usize {
		a * self.alphabet.len() + b
	}

	#[inline]
	fn triple(&self, a: usize, b: usize, c: usize) -> usize {
		(a * self.alphabet.len() + b) * self.alphabet.len() + c
	}

	pub fn unigram_count(&self, a: usize) -> u64 {
		self.unigrams[a]
	}

	pub fn bigram_count(&self, a: usize, b: usize) -> u64 {
		self.bigrams[self.pair(a, b)]
	}

	pub fn trigram_count(&self, a: usize, b: usize, c: usize) -> u64 {
		self.trigrams[self.triple(a, b, c)]
	}

	/// Totals `(F1, F2, F3)` of the unigram, bigram and trigram tables.
	pub fn totals(&self) -> (u64, u64, u64) {
		(self.unigram_total, self.bigram_total, self.trigram_total)
	}

	/// Adds a word to the model.
	///
	/// # Errors
	/// Returns `OutOfAlphabet` if the word contains an unknown character.
	/// The tables are left untouched in that case.
	pub fn add(&mut self, word: &str) -> BrandonResult<()> {
		let indices = self.alphabet.indices(word)?;
		self.add_indices(&indices);
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

	fn add_indices(&mut self, indices: &[usize]) {
		for (i, &v) in indices.iter().enumerate() {
			self.unigrams[v] += 1;
			self.unigram_total += 1;

			if i > 0 {
				let u = indices[i - 1];
				let pair = self.pair(u, v);
				self.bigrams[pair] += 1;
				self.bigram_total += 1;

				if i > 1 {
					let triple = self.triple(indices[i - 2], u, v);
					self.trigrams[triple] += 1;
					self.trigram_total += 1;
				}
			}
		}
	}

	/// Merges another model into this one by summing every table.
	///
	/// # Errors
	/// Returns a configuration error if the alphabets differ.
	pub fn merge(&mut self, other: &Self) -> BrandonResult<()> {
		if self.alphabet != other.alphabet {
			return Err(BrandonError::config(format!(
				"alphabet mismatch: self={:?}, other={:?}",
				self.alphabet.as_string(),
				other.alphabet.as_string()
			)));
		}

		for (count, theirs) in self.unigrams.iter_mut().zip(&other.unigrams) {
			*count += theirs;
		}
		for (count, theirs) in self.bigrams.iter_mut().zip(&other.bigrams) {
			*count += theirs;
		}
		for (count, theirs) in self.trigrams.iter_mut().zip(&other.trigrams) {
			*count += theirs;
		}
		self.unigram_total += other.unigram_total;
		self.bigram_total += other.bigram_total;
		self.trigram_total += other.trigram_total;

		Ok(())
	}

	/// Size of the trigram space, `n³`.
	fn space(&self) -> f64 {
		let n = self.alphabet.len() as f64;
		n * n * n
	}

	/// Smoothed probability of `next` following the pair `context`.
	///
	/// `(count(context, next) + 1) / (count(context) + n³)`
	pub fn conditional_probability(&self, context: [usize; 2], next: usize) -> f64 {
		let [a, b] = context;
		(self.trigram_count(a, b, next) as f64 + 1.0) / (self.bigram_count(a, b) as f64 + self.space())
	}

	fn short_word_log(&self, count: u64, total: u64) -> f64 {
		match self.short_words {
			ShortWordPolicy::RawCounts => (count as f64).ln(),
			ShortWordPolicy::Normalized if total == 0 => f64::NEG_INFINITY,
			ShortWordPolicy::Normalized => (count as f64 / total as f64).ln(),
		}
	}

	/// Natural logarithm of `probability(word)`.
	///
	/// Long words are scored as a sum of logarithms so that the product of
	/// many small conditional probabilities never underflows to zero.
	/// A zero probability gives `-inf`.
	///
	/// # Errors
	/// Returns `OutOfAlphabet` if the word contains an unknown character.
	pub fn log_probability(&self, word: &str) -> BrandonResult<f64> {
		let idx = self.alphabet.indices(word)?;

		let lp = match idx.len() {
			0 => f64::NEG_INFINITY,
			1 => self.short_word_log(self.unigram_count(idx[0]), self.unigram_total),
			2 => self.short_word_log(self.bigram_count(idx[0], idx[1]), self.bigram_total),
			3 => self.short_word_log(self.trigram_count(idx[0], idx[1], idx[2]), self.trigram_total),
			_ => {
				let head = (self.trigram_count(idx[0], idx[1], idx[2]) as f64 + 1.0)
					/ (self.trigram_total as f64 + self.space());
				idx.windows(3)
					.skip(1)
					.map(|w| self.conditional_probability([w[0], w[1]], w[2]).ln())
					.fold(head.ln(), |acc, lp| acc + lp)
			}
		};

		Ok(lp)
	}

	/// Probability of a word.
	///
	/// - Empty word: 0
	/// - 1 to 3 characters: the n-gram count, raw or normalized depending on
	///   the short word policy
	/// - Longer: smoothed trigram probability of the first three characters
	///   times the conditional probability of every following character
	pub fn probability(&self, word: &str) -> BrandonResult<f64> {
		Ok(self.log_probability(word)?.exp())
	}

	/// `-ln(probability(word))`, or `IMPOSSIBLE_ENERGY` when the probability is zero.
	pub fn energy(&self, word: &str) -> BrandonResult<f64> {
		Ok(finite_energy(-self.log_probability(word)?))
	}
}
