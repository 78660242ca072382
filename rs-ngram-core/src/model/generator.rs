use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use rand::Rng;

use crate::error::NGramError;
use super::context::ContextWindow;
use super::symbol::Symbol;
use super::trie::NGramTrie;

enum State<T> {
	/// The next symbol is already picked; a blank ends the sequence.
	Ready(Symbol<T>),
	Done,
	/// A lookahead failed; the error is handed out by the next `try_next`.
	Failed(NGramError),
}

/// Lazy, single-pass generation of one sequence.
///
/// The generator owns its context window and walks the trie from the root
/// along that window to sample each symbol. The next symbol is always
/// picked one step ahead, so `has_next` is known before it is pulled.
///
/// # Notes
/// - The trie must not be trained while generators are alive; the borrow
///   only guarantees it outlives them.
/// - `Iterator::next` ends the sequence on an invariant violation (logged
///   at error level); `try_next` reports it.
pub struct Generator<'a, T, R> {
	trie: &'a NGramTrie<T>,
	context: ContextWindow<T>,
	max_length: Option<usize>,
	emitted: usize,
	rng: R,
	state: State<T>,
}

impl<'a, T, R> Generator<'a, T, R>
where
	T: Eq + Hash + Clone + fmt::Debug,
	R: Rng,
{
	pub(crate) fn new(
		trie: &'a NGramTrie<T>,
		context: ContextWindow<T>,
		max_length: Option<usize>,
		rng: R,
	) -> Result<Self, NGramError> {
		let mut generator = Self {
			trie,
			context,
			max_length,
			emitted: 0,
			rng,
			state: State::Done,
		};
		let next = generator.lookahead()?;
		generator.state = State::Ready(next);
		Ok(generator)
	}

	/// Picks the symbol following the current context.
	fn lookahead(&mut self) -> Result<Symbol<T>, NGramError> {
		let mut node = Arc::clone(self.trie.root());
		for symbol in self.context.iter() {
			node = node.child(symbol).ok_or_else(|| NGramError::ContextNotFound {
				context: format!("{:?}", self.context),
			})?;
		}

		let picked = node.pick(&mut self.rng)?;
		log::trace!("context {:?} -> {:?}", self.context, picked.symbol());
		Ok(picked.symbol().clone())
	}

	fn within_bound(&self) -> bool {
		self.max_length.is_none_or(|max| self.emitted < max)
	}

	/// Returns `true` if another symbol can be pulled.
	pub fn has_next(&self) -> bool {
		match &self.state {
			State::Ready(next) => !next.is_blank() && self.within_bound(),
			State::Done | State::Failed(_) => false,
		}
	}

	/// Pulls the next symbol.
	///
	/// # Errors
	/// - `IteratorExhausted` once the sequence has ended
	/// - the lookahead error (`ContextNotFound`, `InvariantViolation`) if the
	///   previous step could not pick a successor
	pub fn try_next(&mut self) -> Result<T, NGramError> {
		if !self.has_next() {
			return Err(match mem::replace(&mut self.state, State::Done) {
				State::Failed(err) => err,
				State::Ready(_) | State::Done => NGramError::IteratorExhausted,
			});
		}

		let State::Ready(Symbol::Token(token)) = mem::replace(&mut self.state, State::Done) else {
			return Err(NGramError::IteratorExhausted);
		};

		self.context.push(Symbol::Token(token.clone()));
		self.emitted += 1;

		// The successor is only picked while it can still be pulled
		if self.within_bound() {
			self.state = match self.lookahead() {
				Ok(next) => State::Ready(next),
				Err(err) => {
					log::error!("generation stopped after {} symbols: {err}", self.emitted);
					State::Failed(err)
				}
			};
		}

		Ok(token)
	}

	/// Number of symbols emitted so far.
	pub fn emitted(&self) -> usize {
		self.emitted
	}

	/// The live context (last `n-1` emitted or seeded symbols).
	pub fn context(&self) -> &ContextWindow<T> {
		&self.context
	}
}

impl<T, R> Iterator for Generator<'_, T, R>
where
	T: Eq + Hash + Clone + fmt::Debug,
	R: Rng,
{
	type Item = T;

	fn next(&mut self) -> Option<T> {
		if self.has_next() {
			self.try_next().ok()
		} else {
			None
		}
	}
}
