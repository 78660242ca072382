use thiserror::Error;

/// Errors produced while building, restoring, or sampling an n-gram trie.
///
/// Configuration and usage errors are reported immediately. The
/// `ContextNotFound` and `InvariantViolation` variants indicate a trie
/// that is inconsistent with the windowing convention and are not
/// recoverable.
#[derive(Error, Debug)]
pub enum NGramError {
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	#[error("generator must be trained before it can generate sequences")]
	UntrainedModel,

	#[error("context not found in n-gram tree: {context}")]
	ContextNotFound { context: String },

	#[error("generator is exhausted")]
	IteratorExhausted,

	#[error("seed context has {actual} symbols, expected {expected}")]
	ContextSizeMismatch { expected: usize, actual: usize },

	#[error("n-gram tree invariant violated: {0}")]
	InvariantViolation(String),

	#[error("snapshot serialization failed: {0}")]
	Serialization(#[from] postcard::Error),

	#[error("corrupt snapshot: {0}")]
	CorruptSnapshot(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		let err = NGramError::ContextSizeMismatch { expected: 2, actual: 3 };
		assert_eq!(err.to_string(), "seed context has 3 symbols, expected 2");

		let err = NGramError::ContextNotFound { context: "[Blank]".to_owned() };
		assert!(err.to_string().contains("[Blank]"));
	}
}
