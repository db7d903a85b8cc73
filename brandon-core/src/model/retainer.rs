use serde::{Deserialize, Serialize};

use crate::error::{BrandonError, BrandonResult};

/// Slots reserved up front. Larger retainers grow as candidates arrive.
const PREALLOCATED: usize = 1024;

/// A scored word.
///
/// The score is an energy: the lower, the more plausible the word.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Candidate {
	score: f64,
	#[serde(rename = "word")]
	payload: String,
}

impl Candidate {
	pub fn new<S: Into<String>>(score: f64, payload: S) -> Self {
		Self { score, payload: payload.into() }
	}

	pub fn score(&self) -> f64 {
		self.score
	}

	pub fn payload(&self) -> &str {
		&self.payload
	}

	pub fn into_payload(self) -> String {
		self.payload
	}
}

/// Bounded retainer keeping the `capacity` lowest-scoring candidates of a stream.
///
/// Candidates are stored in a binary max-heap keyed by score: the root is
/// always the worst of the retained candidates, so deciding whether a new
/// candidate deserves a place is a single comparison.
///
/// # Invariants
/// - `buffer.len() <= capacity` and `capacity >= 1`
/// - For every `i > 0`, `buffer[i].score <= buffer[(i - 1) / 2].score`
/// - No retained score is NaN
///
/// Order among equal scores is unspecified.
#[derive(Clone, Debug)]
pub struct TopKRetainer {
	buffer: Vec<Candidate>,
	capacity: usize,
}

impl TopKRetainer {
	/// Creates an empty retainer.
	///
	/// # Errors
	/// Returns a configuration error if `capacity` is 0.
	pub fn new(capacity: usize) -> BrandonResult<Self> {
		if capacity == 0 {
			return Err(BrandonError::config("retainer capacity must be >= 1"));
		}
		Ok(Self { buffer: Vec::with_capacity(capacity.min(PREALLOCATED)), capacity })
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	pub fn is_full(&self) -> bool {
		self.buffer.len() >= self.capacity
	}

	/// The worst retained candidate (highest score), if any.
	pub fn peek_worst(&self) -> Option<&Candidate> {
		self.buffer.first()
	}

	/// Offers a candidate to the retainer.
	///
	/// - While the retainer is not full, the candidate is always kept.
	/// - Once full, it is kept only if its score is strictly lower than the
	///   current worst, which it replaces.
	///
	/// Returns whether the candidate was kept. NaN scores are never kept.
	pub fn insert<S: Into<String>>(&mut self, score: f64, payload: S) -> bool {
		if score.is_nan() {
			return false;
		}

		if !self.is_full() {
			self.buffer.push(Candidate::new(score, payload));
			self.sift_up(self.buffer.len() - 1);
			return true;
		}

		match self.buffer.first() {
			Some(worst) if score < worst.score => {
				self.buffer[0] = Candidate::new(score, payload);
				self.sift_down(0);
				true
			}
			_ => false,
		}
	}

	/// Removes and returns the worst retained candidate.
	///
	/// The last element takes the root slot and is sifted down.
	pub fn remove_worst(&mut self) -> Option<Candidate> {
		if self.buffer.is_empty() {
			return None;
		}
		let worst = self.buffer.swap_remove(0);
		self.sift_down(0);
		Some(worst)
	}

	/// Returns true if a candidate with this payload is retained.
	///
	/// Linear scan, the retainer is expected to stay small.
	pub fn contains(&self, payload: &str) -> bool {
		self.buffer.iter().any(|c| c.payload == payload)
	}

	/// Retained candidates in heap order (not sorted).
	pub fn as_slice(&self) -> &[Candidate] {
		&self.buffer
	}

	/// Consumes the retainer, candidates in heap order.
	pub fn into_vec(self) -> Vec<Candidate> {
		self.buffer
	}

	/// Consumes the retainer, candidates sorted by ascending score (best first).
	pub fn into_sorted_vec(self) -> Vec<Candidate> {
		let mut candidates = self.buffer;
		candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
		candidates
	}

	/// Moves the element at `i` up while it beats its parent.
	fn sift_up(&mut self, mut i: usize) {
		while i > 0 {
			let parent = (i - 1) / 2;
			if self.buffer[i].score <= self.buffer[parent].score {
				break;
			}
			self.buffer.swap(i, parent);
			i = parent;
		}
	}

	/// Moves the element at `i` down, swapping with its larger child.
	fn sift_down(&mut self, mut i: usize) {
		let len = self.buffer.len();
		loop {
			let left = 2 * i + 1;
			let right = left + 1;
			if left >= len {
				break;
			}

			let largest = if right < len && self.buffer[right].score > self.buffer[left].score {
				right
			} else {
				left
			};

			if self.buffer[largest].score <= self.buffer[i].score {
				break;
			}
			self.buffer.swap(i, largest);
			i = largest;
		}
	}
}
