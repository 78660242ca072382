use std::fmt;

use super::symbol::Symbol;

/// Fixed-size window over the most recent `n-1` symbols.
///
/// The window is a ring buffer: pushing a symbol discards the oldest one.
/// Logical index 0 is always the oldest symbol, so iterating the window
/// yields exactly the path to follow from the trie root.
///
/// # Invariants
/// - The size never changes after construction
/// - `pos` always points at the oldest symbol (or is 0 for an empty window)
#[derive(Clone)]
pub struct ContextWindow<T> {
	symbols: Vec<Symbol<T>>,
	pos: usize,
}

impl<T: Clone> ContextWindow<T> {
	/// Creates a window of `size` blanks, the context of a sequence start.
	pub fn blank(size: usize) -> Self {
		Self {
			symbols: vec![Symbol::Blank; size],
			pos: 0,
		}
	}

	/// Creates a window holding a prefix as training would have seen it.
	///
	/// Keeps the last `size` tokens of `prefix`; a shorter prefix is
	/// left-padded with blanks.
	pub fn from_tokens(size: usize, prefix: &[T]) -> Self {
		let mut window = Self::blank(size);
		let skip = prefix.len().saturating_sub(size);
		for token in &prefix[skip..] {
			window.push(Symbol::Token(token.clone()));
		}
		window
	}
}

impl<T> ContextWindow<T> {
	/// Creates a window with exactly the given contents, oldest first.
	pub fn from_symbols(symbols: Vec<Symbol<T>>) -> Self {
		Self { symbols, pos: 0 }
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Returns the symbol at logical index `i` (0 = oldest).
	pub fn get(&self, i: usize) -> Option<&Symbol<T>> {
		if i >= self.symbols.len() {
			return None;
		}
		self.symbols.get((i + self.pos) % self.symbols.len())
	}

	/// Appends a symbol, discarding the oldest one.
	///
	/// A zero-sized window (n = 1) ignores pushes.
	pub fn push(&mut self, symbol: Symbol<T>) {
		if self.symbols.is_empty() {
			return;
		}
		self.symbols[self.pos] = symbol;
		self.pos = (self.pos + 1) % self.symbols.len();
	}

	/// Iterates from the oldest to the newest symbol.
	pub fn iter(&self) -> impl Iterator<Item = &Symbol<T>> {
		let (newest, oldest) = self.symbols.split_at(self.pos);
		oldest.iter().chain(newest.iter())
	}
}

/// Windows are equal when they hold the same symbols, oldest first,
/// whatever their ring layout.
impl<T: PartialEq> PartialEq for ContextWindow<T> {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl<T: Eq> Eq for ContextWindow<T> {}

impl<T: fmt::Debug> fmt::Debug for ContextWindow<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contents(window: &ContextWindow<char>) -> Vec<Option<char>> {
		window.iter().map(|s| s.token().copied()).collect()
	}

	#[test]
	fn starts_blank() {
		let window = ContextWindow::<char>::blank(3);
		assert_eq!(window.len(), 3);
		assert!(window.iter().all(Symbol::is_blank));
	}

	#[test]
	fn push_discards_oldest() {
		let mut window = ContextWindow::blank(3);
		for c in "abcd".chars() {
			window.push(Symbol::Token(c));
		}
		assert_eq!(contents(&window), vec![Some('b'), Some('c'), Some('d')]);
		assert_eq!(window.get(0), Some(&Symbol::Token('b')));
		assert_eq!(window.get(2), Some(&Symbol::Token('d')));
		assert_eq!(window.get(3), None);
	}

	#[test]
	fn from_tokens_pads_short_prefix() {
		let window = ContextWindow::from_tokens(3, &['x']);
		assert_eq!(contents(&window), vec![None, None, Some('x')]);

		let window = ContextWindow::from_tokens(2, &['a', 'b', 'c']);
		assert_eq!(contents(&window), vec![Some('b'), Some('c')]);
	}

	#[test]
	fn zero_sized_window_ignores_pushes() {
		let mut window = ContextWindow::<char>::blank(0);
		window.push(Symbol::Token('a'));
		assert!(window.is_empty());
		assert_eq!(window.iter().count(), 0);
		assert_eq!(window.get(0), None);
	}

	#[test]
	fn equality_ignores_ring_layout() {
		let mut wrapped = ContextWindow::blank(2);
		for c in "abc".chars() {
			wrapped.push(Symbol::Token(c));
		}
		let built = ContextWindow::from_symbols(vec![Symbol::Token('b'), Symbol::Token('c')]);
		assert_eq!(wrapped, built);
		assert_eq!(wrapped, ContextWindow::from_tokens(2, &['a', 'b', 'c']));

		let shifted = ContextWindow::from_symbols(vec![Symbol::Token('c'), Symbol::Token('b')]);
		assert_ne!(wrapped, shifted);
		assert_ne!(ContextWindow::<char>::blank(2), ContextWindow::blank(3));
	}

	#[test]
	fn debug_uses_logical_order() {
		let mut window = ContextWindow::blank(2);
		window.push(Symbol::Token('a'));
		window.push(Symbol::Token('b'));
		window.push(Symbol::Token('c'));
		assert_eq!(format!("{window:?}"), "[Token('b'), Token('c')]");
	}
}
