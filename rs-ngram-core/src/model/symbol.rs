use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in a training or generated sequence.
///
/// `Blank` marks the padding before the first and after the last symbol of
/// a sequence. It is distinct from every value of `T`, so any alphabet can
/// be used without reserving a sentinel character.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol<T> {
	Blank,
	Token(T),
}

impl<T> Symbol<T> {
	pub fn is_blank(&self) -> bool {
		matches!(self, Symbol::Blank)
	}

	pub fn token(&self) -> Option<&T> {
		match self {
			Symbol::Blank => None,
			Symbol::Token(token) => Some(token),
		}
	}

	pub fn into_token(self) -> Option<T> {
		match self {
			Symbol::Blank => None,
			Symbol::Token(token) => Some(token),
		}
	}
}

impl<T> From<T> for Symbol<T> {
	fn from(token: T) -> Self {
		Symbol::Token(token)
	}
}

impl<T> From<Option<T>> for Symbol<T> {
	fn from(value: Option<T>) -> Self {
		value.map_or(Symbol::Blank, Symbol::Token)
	}
}

/// Blank renders as an empty string.
impl<T: fmt::Display> fmt::Display for Symbol<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Blank => Ok(()),
			Symbol::Token(token) => token.fmt(f),
		}
	}
}
