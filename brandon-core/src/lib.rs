//! Brand name generation library.
//!
//! Plausible names are found by sampling random strings and keeping the
//! ones that look most like a corpus of example names. This crate provides:
//! - A character trigram model with add-one smoothing
//! - A vowel skeleton model
//! - A bounded top-k retainer (binary max-heap)
//! - The Monte Carlo search combining them
//! - Corpus loading and a multi-corpus generator
//!
//! Training, scoring and searching are single-threaded and in-memory.
//! Trained models are never persisted.

/// Statistical models, retainer and search.
pub mod model;

/// Model configuration (alphabet, vowels, case policy).
pub mod config;

/// Error taxonomy shared by the whole crate.
pub mod error;

/// I/O utilities (corpus loading, folder listing).
pub mod io;
