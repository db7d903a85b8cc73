use std::collections::HashMap;

use crate::error::{BrandonError, BrandonResult};

/// Lowercase latin letters, the alphabet used when none is configured.
pub const LATIN_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Largest alphabet accepted. The trigram table holds `n³` counters.
pub const MAX_ALPHABET_SIZE: usize = 128;

/// Ordered set of symbols with a dense index for each of them.
///
/// The index of a symbol is its position in the alphabet string. Frequency
/// tables are addressed with these indices, so the alphabet used to train a
/// model and the one used to sample candidates must be the same.
///
/// # Invariants
/// - The alphabet is never empty and has at most `MAX_ALPHABET_SIZE` symbols
/// - Every symbol appears exactly once
/// - `index[symbols[i]] == i`
#[derive(Clone, Debug)]
pub struct Alphabet {
	symbols: Vec<char>,
	index: HashMap<char, usize>,
}

impl Alphabet {
	/// Builds the lookup table of an alphabet.
	///
	/// # Errors
	/// Returns a configuration error if the alphabet is empty, longer than
	/// `MAX_ALPHABET_SIZE` or if a character is listed twice.
	pub fn new(symbols: &str) -> BrandonResult<Self> {
		let symbols: Vec<char> = symbols.chars().collect();
		if symbols.is_empty() {
			return Err(BrandonError::config("alphabet cannot be empty"));
		}
		if symbols.len() > MAX_ALPHABET_SIZE {
			return Err(BrandonError::config(format!(
				"alphabet has {} symbols, at most {MAX_ALPHABET_SIZE} are supported",
				symbols.len()
			)));
		}

		let mut index = HashMap::with_capacity(symbols.len());
		for (i, c) in symbols.iter().enumerate() {
			if index.insert(*c, i).is_some() {
				return Err(BrandonError::config(format!("alphabet lists {c:?} more than once")));
			}
		}

		Ok(Self { symbols, index })
	}

	/// Number of symbols.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// Always false, kept for API symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Symbols in index order.
	pub fn symbols(&self) -> &[char] {
		&self.symbols
	}

	/// Symbol stored at `index`, if any.
	pub fn symbol(&self, index: usize) -> Option<char> {
		self.symbols.get(index).copied()
	}

	/// Dense index of `c`, or `None` if `c` is not part of the alphabet.
	pub fn index_of(&self, c: char) -> Option<usize> {
		self.index.get(&c).copied()
	}

	pub fn contains(&self, c: char) -> bool {
		self.index.contains_key(&c)
	}

	/// Maps every character of `word` to its index.
	///
	/// # Errors
	/// Returns `OutOfAlphabet` on the first unknown character, naming its
	/// position (in characters, not bytes).
	pub fn indices(&self, word: &str) -> BrandonResult<Vec<usize>> {
		word.chars()
			.enumerate()
			.map(|(position, character)| {
				self.index_of(character).ok_or_else(|| BrandonError::OutOfAlphabet {
					word: word.to_owned(),
					character,
					position,
				})
			})
			.collect()
	}

	/// The alphabet as a string, in index order.
	pub fn as_string(&self) -> String {
		self.symbols.iter().collect()
	}
}

impl PartialEq for Alphabet {
	fn eq(&self, other: &Self) -> bool {
		self.symbols == other.symbols
	}
}

impl Eq for Alphabet {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn indices_follow_declaration_order() {
		let alphabet = Alphabet::new("cab").unwrap();
		assert_eq!(alphabet.len(), 3);
		assert_eq!(alphabet.index_of('c'), Some(0));
		assert_eq!(alphabet.index_of('a'), Some(1));
		assert_eq!(alphabet.index_of('b'), Some(2));
		assert_eq!(alphabet.symbol(2), Some('b'));
		assert_eq!(alphabet.indices("abc").unwrap(), vec![1, 2, 0]);
	}

	#[test]
	fn unknown_characters_have_no_index() {
		let alphabet = Alphabet::new(LATIN_LOWERCASE).unwrap();
		assert_eq!(alphabet.index_of('A'), None);
		assert!(!alphabet.contains('-'));
	}

	#[test]
	fn indices_reports_the_offending_character() {
		let alphabet = Alphabet::new(LATIN_LOWERCASE).unwrap();
		match alphabet.indices("héllo") {
			Err(BrandonError::OutOfAlphabet { character, position, .. }) => {
				assert_eq!(character, 'é');
				assert_eq!(position, 1);
			}
			other => panic!("expected OutOfAlphabet, got {other:?}"),
		}
	}

	#[test]
	fn empty_alphabet_is_rejected() {
		assert!(matches!(Alphabet::new(""), Err(BrandonError::Configuration(_))));
	}

	#[test]
	fn oversized_alphabet_is_rejected() {
		let symbols: String = ('\u{4e00}'..).take(4000).collect();
		assert!(matches!(Alphabet::new(&symbols), Err(BrandonError::Configuration(_))));

		let largest: String = ('\u{4e00}'..).take(MAX_ALPHABET_SIZE).collect();
		assert_eq!(Alphabet::new(&largest).unwrap().len(), MAX_ALPHABET_SIZE);
	}

	#[test]
	fn duplicate_symbols_are_rejected() {
		assert!(matches!(Alphabet::new("abca"), Err(BrandonError::Configuration(_))));
	}
}
