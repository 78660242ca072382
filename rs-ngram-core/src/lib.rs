//! N-gram trie training and sequence generation.
//!
//! This crate provides:
//! - A counting trie over fixed-size windows of any hashable symbol type
//! - Lock-light training from many threads into one shared trie
//! - Lazy, weighted-random generation through a sliding context window
//! - Binary snapshots of trained tries
//!
//! Reading corpora, splitting text into sequences and printing results are
//! left to the caller: the crate only consumes and produces plain
//! sequences of symbols.
//!
//! ```
//! use rs_ngram_core::NGramTrie;
//!
//! let trie = NGramTrie::new(3)?;
//! let words: Vec<Vec<char>> = ["rust", "trust"].iter().map(|w| w.chars().collect()).collect();
//! trie.train_all(&words);
//!
//! let generated: String = trie.generate()?.collect();
//! assert!(!generated.is_empty());
//! # Ok::<(), rs_ngram_core::NGramError>(())
//! ```

/// Trie, context window, generator and snapshot types.
pub mod model;

/// Error type shared by all fallible operations.
pub mod error;

pub use error::NGramError;
pub use model::context::ContextWindow;
pub use model::generation_input::GenerationInput;
pub use model::generator::Generator;
pub use model::snapshot::TrieSnapshot;
pub use model::symbol::Symbol;
pub use model::trie::NGramTrie;
