use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::alphabet::Alphabet;

/// Source of candidate strings for the Monte Carlo search.
///
/// The search only assumes that the returned string has the requested
/// length and is drawn from `alphabet`. Any `FnMut(usize, &Alphabet) -> String`
/// closure is a source.
pub trait StringSource {
	fn sample(&mut self, length: usize, alphabet: &Alphabet) -> String;
}

impl<F> StringSource for F
where
	F: FnMut(usize, &Alphabet) -> String,
{
	fn sample(&mut self, length: usize, alphabet: &Alphabet) -> String {
		self(length, alphabet)
	}
}

/// Draws a string of `length` symbols, each uniformly and independently.
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, length: usize, alphabet: &Alphabet) -> String {
	let symbols = alphabet.symbols();
	(0..length)
		.map(|_| symbols[rng.random_range(0..symbols.len())])
		.collect()
}

/// Uniform i.i.d. sampling of alphabet symbols.
///
/// Seeded sources produce the same strings on every run, which makes
/// searches reproducible.
#[derive(Clone, Debug)]
pub struct UniformSource<R = StdRng> {
	rng: R,
}

impl<R: Rng> UniformSource<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl UniformSource<StdRng> {
	/// Deterministic source.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}

	/// Source seeded by the operating system.
	pub fn from_os_rng() -> Self {
		Self::new(StdRng::from_os_rng())
	}

	/// Seeded when `seed` is given, random otherwise.
	pub fn from_seed(seed: Option<u64>) -> Self {
		match seed {
			Some(seed) => Self::seeded(seed),
			None => Self::from_os_rng(),
		}
	}
}

impl<R: Rng> StringSource for UniformSource<R> {
	fn sample(&mut self, length: usize, alphabet: &Alphabet) -> String {
		random_string(&mut self.rng, length, alphabet)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn samples_have_the_requested_length_and_symbols() {
		let alphabet = Alphabet::new("xyz").unwrap();
		let mut source = UniformSource::seeded(1);
		for length in [1, 4, 17] {
			let word = source.sample(length, &alphabet);
			assert_eq!(word.chars().count(), length);
			assert!(word.chars().all(|c| alphabet.contains(c)));
		}
		assert_eq!(source.sample(0, &alphabet), "");
	}

	#[test]
	fn seeded_sources_are_reproducible() {
		let alphabet = Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap();
		let mut a = UniformSource::seeded(42);
		let mut b = UniformSource::seeded(42);
		for _ in 0..20 {
			assert_eq!(a.sample(8, &alphabet), b.sample(8, &alphabet));
		}
	}

	#[test]
	fn every_symbol_gets_drawn() {
		let alphabet = Alphabet::new("abcd").unwrap();
		let word = UniformSource::seeded(3).sample(400, &alphabet);
		for c in alphabet.symbols() {
			assert!(word.contains(*c), "{c} never drawn");
		}
	}

	#[test]
	fn closures_are_sources() {
		let alphabet = Alphabet::new("ab").unwrap();
		let mut source = |length: usize, _: &Alphabet| "a".repeat(length);
		assert_eq!(source.sample(3, &alphabet), "aaa");
	}
}
