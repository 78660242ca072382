//! Top-level module for the n-gram trie.
//!
//! This module provides:
//! - The symbol alphabet with its blank padding marker (`Symbol`)
//! - The sliding context of the last `n-1` symbols (`ContextWindow`)
//! - The shared counting trie and its training (`NGramTrie`)
//! - Lazy weighted-random generation (`Generator`, `GenerationInput`)
//! - Serializable copies of trained tries (`TrieSnapshot`)

/// Symbol of a sequence, or the blank marking its boundaries.
pub mod symbol;

/// Fixed-size ring buffer of the most recent `n-1` symbols.
///
/// Used to seed and drive generation.
pub mod context;

/// Trie node: occurrence count, children and weighted sampling.
///
/// Not exposed publicly.
mod gram_node;

/// Counting trie shared between training threads.
///
/// Handles padded window counting, parallel batch training,
/// diagnostics and generator creation.
pub mod trie;

/// Generation parameters (length bound, seed context).
pub mod generation_input;

/// Iterator producing one generated sequence.
pub mod generator;

/// Serializable snapshot of a trie, with `postcard` encoding.
pub mod snapshot;
