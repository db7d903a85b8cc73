use log::{debug, info};

use super::name_model::NameModel;
use super::retainer::{Candidate, TopKRetainer};
use super::sampler::StringSource;
use super::search_input::SearchInput;
use crate::error::BrandonResult;

/// Monte Carlo search for the most name-like strings.
///
/// Every round draws `input.batch_size()` random strings of
/// `input.word_length` characters from `source`, scores them with `model`
/// and offers them to a top-k retainer. The retainer is shared by all
/// rounds, so the result improves with the number of rounds.
///
/// # Returns
/// At most `input.top_k` candidates, in heap order (not sorted).
///
/// # Errors
/// - Configuration error if `input` is invalid
/// - `OutOfAlphabet` if `source` produces a character outside the model's
///   alphabet
pub fn search<S>(model: &NameModel, input: &SearchInput, source: &mut S) -> BrandonResult<Vec<Candidate>>
where
	S: StringSource + ?Sized,
{
	input.validate()?;

	let mut solutions = TopKRetainer::new(input.top_k)?;
	let batch_size = input.batch_size();

	for round in 0..input.rounds {
		for _ in 0..batch_size {
			let word = source.sample(input.word_length, model.alphabet());

			if input.exclude_known && model.is_known(&word) {
				continue;
			}
			if input.distinct && solutions.contains(&word) {
				continue;
			}

			let energy = model.score(&word)?;
			solutions.insert(energy, word);
		}

		if let Some(worst) = solutions.peek_worst() {
			debug!("round {}/{}: worst retained energy {:.4}", round + 1, input.rounds, worst.score());
		}
	}

	info!(
		"search done: {} candidates kept out of {} sampled",
		solutions.len(),
		batch_size.saturating_mul(input.rounds)
	);

	Ok(solutions.into_vec())
}
