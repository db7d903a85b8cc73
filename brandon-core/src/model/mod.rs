//! Scoring and selection engine.
//!
//! - Alphabet index table (`Alphabet`)
//! - Trigram energy model (`TrigramModel`)
//! - Vowel skeleton energy model (`VowelPatternCounts`, `VowelModel`)
//! - Combined model (`NameModelBuilder`, `NameModel`)
//! - Bounded top-k retainer (`TopKRetainer`)
//! - Random candidate sources (`StringSource`, `UniformSource`)
//! - Monte Carlo search (`search`) and the multi-corpus `Generator`

/// Ordered symbol set and its char to index lookup table.
pub mod alphabet;

/// Fixed-capacity max-heap keeping the lowest-scoring candidates of a stream.
pub mod retainer;

/// Order-2 Markov model over characters, with add-one smoothing.
pub mod trigram_model;

/// Vowel skeleton extraction and pattern frequency model.
pub mod vowel_model;

/// Sum of the trigram and vowel energies, trained on one corpus.
pub mod name_model;

/// Random candidate strings.
pub mod sampler;

/// Search parameters and their validation.
pub mod search_input;

/// Monte Carlo search loop.
pub mod search;

/// High-level interface managing one model per corpus file.
pub mod generator;
