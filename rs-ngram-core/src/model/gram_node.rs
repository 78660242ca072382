use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;

use crate::error::NGramError;
use super::symbol::Symbol;

/// Children of a node, keyed by the next symbol (blank included).
pub(crate) type Children<T> = HashMap<Symbol<T>, Arc<GramNode<T>>>;

/// A node of the n-gram trie.
///
/// The path from the root to a node is an observed context; `count` is the
/// number of times that exact path was walked during training. Conceptually
/// the outgoing edges form a weighted distribution over the next symbol.
///
/// ## Responsibilities:
/// - Count a child symbol during training, creating the child on first use
/// - Pick a child using weighted random sampling during generation
///
/// ## Invariants
/// - Child keys are unique; a key is inserted at most once even under
///   concurrent training
/// - Once all writers are done, `child_sum` equals the sum of the
///   children's `count`
pub(crate) struct GramNode<T> {
	/// Last symbol of the path leading to this node.
	symbol: Symbol<T>,
	count: AtomicU64,
	/// Sum of the direct children's counts; total weight for `pick`.
	child_sum: AtomicU64,
	children: RwLock<Children<T>>,
}

impl<T> GramNode<T> {
	pub(crate) fn new(symbol: Symbol<T>) -> Self {
		Self::with_count(symbol, 0)
	}

	pub(crate) fn with_count(symbol: Symbol<T>, count: u64) -> Self {
		Self {
			symbol,
			count: AtomicU64::new(count),
			child_sum: AtomicU64::new(0),
			children: RwLock::new(HashMap::new()),
		}
	}

	pub(crate) fn symbol(&self) -> &Symbol<T> {
		&self.symbol
	}

	pub(crate) fn count(&self) -> u64 {
		self.count.load(Ordering::Relaxed)
	}

	pub(crate) fn child_sum(&self) -> u64 {
		self.child_sum.load(Ordering::Relaxed)
	}

	// Writers only insert whole entries, a poisoned map is still usable
	pub(crate) fn read_children(&self) -> RwLockReadGuard<'_, Children<T>> {
		self.children.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_children(&self) -> RwLockWriteGuard<'_, Children<T>> {
		self.children.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl<T: Eq + Hash + Clone> GramNode<T> {
	/// Returns the child reached by `symbol`, if it was ever counted.
	pub(crate) fn child(&self, symbol: &Symbol<T>) -> Option<Arc<GramNode<T>>> {
		self.read_children().get(symbol).cloned()
	}

	/// Records one more occurrence of `symbol` after this node's context.
	///
	/// - If the child exists, its count is increased.
	/// - Otherwise it is created (and `tree_size` incremented) under this
	///   node's write lock, so concurrent first encounters of the same
	///   symbol create exactly one child.
	///
	/// Returns the child so training can keep walking the window.
	pub(crate) fn count_symbol(&self, symbol: &Symbol<T>, tree_size: &AtomicU64) -> Arc<GramNode<T>> {
		let child = match self.child(symbol) {
			Some(child) => child,
			None => {
				let mut children = self.write_children();
				let child = children.entry(symbol.clone()).or_insert_with(|| {
					tree_size.fetch_add(1, Ordering::Relaxed);
					Arc::new(GramNode::new(symbol.clone()))
				});
				Arc::clone(child)
			}
		};

		child.count.fetch_add(1, Ordering::Relaxed);
		self.child_sum.fetch_add(1, Ordering::Relaxed);
		child
	}

	/// Attaches an already built child, used when restoring a snapshot.
	///
	/// Returns `false` if a child with the same symbol already exists.
	pub(crate) fn attach(&self, child: GramNode<T>) -> bool {
		let mut children = self.write_children();
		if children.contains_key(&child.symbol) {
			return false;
		}
		self.child_sum.fetch_add(child.count(), Ordering::Relaxed);
		children.insert(child.symbol.clone(), Arc::new(child));
		true
	}

	/// Picks a child using weighted random sampling.
	///
	/// Draws `r` uniformly in `[1, child_sum]` and walks the children in map
	/// order, accumulating counts until the running sum reaches `r`.
	///
	/// # Errors
	/// Returns `InvariantViolation` if the node has no weighted children or
	/// if the children's counts do not add up to `child_sum`.
	pub(crate) fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Arc<GramNode<T>>, NGramError> {
		let total = self.child_sum();
		if total == 0 {
			return Err(NGramError::InvariantViolation(
				"cannot pick from a node without children".to_owned(),
			));
		}

		let r = rng.random_range(1..=total);
		let mut running = 0;
		for child in self.read_children().values() {
			running += child.count();
			if running >= r {
				return Ok(Arc::clone(child));
			}
		}

		Err(NGramError::InvariantViolation(format!(
			"children weights sum to {running}, expected {total}"
		)))
	}
}

impl<T: fmt::Display> fmt::Display for GramNode<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]={} (subsum={})", self.symbol, self.count(), self.child_sum())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn count_symbol_creates_child_once() {
		let tree_size = AtomicU64::new(1);
		let node = GramNode::new(Symbol::Blank);

		node.count_symbol(&Symbol::Token('a'), &tree_size);
		node.count_symbol(&Symbol::Token('a'), &tree_size);
		node.count_symbol(&Symbol::Blank, &tree_size);

		assert_eq!(tree_size.load(Ordering::Relaxed), 3);
		assert_eq!(node.child_sum(), 3);
		assert_eq!(node.child(&Symbol::Token('a')).map(|c| c.count()), Some(2));
		assert_eq!(node.child(&Symbol::Blank).map(|c| c.count()), Some(1));
	}

	#[test]
	fn pick_on_empty_node_fails() {
		let node = GramNode::<char>::new(Symbol::Blank);
		let mut rng = StdRng::seed_from_u64(7);
		assert!(matches!(node.pick(&mut rng), Err(NGramError::InvariantViolation(_))));
	}

	#[test]
	fn pick_single_child_is_deterministic() {
		let tree_size = AtomicU64::new(1);
		let node = GramNode::new(Symbol::Blank);
		for _ in 0..5 {
			node.count_symbol(&Symbol::Token('z'), &tree_size);
		}
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..20 {
			let picked = node.pick(&mut rng).expect("node has children");
			assert_eq!(picked.symbol(), &Symbol::Token('z'));
		}
	}

	#[test]
	fn pick_never_returns_unweighted_child() {
		let node = GramNode::new(Symbol::Blank);
		assert!(node.attach(GramNode::with_count(Symbol::Token('a'), 4)));
		assert!(node.attach(GramNode::with_count(Symbol::Token('b'), 0)));
		assert!(!node.attach(GramNode::with_count(Symbol::Token('a'), 1)));
		assert_eq!(node.child_sum(), 4);

		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..50 {
			let picked = node.pick(&mut rng).expect("node has children");
			assert_eq!(picked.symbol(), &Symbol::Token('a'));
		}
	}

	#[test]
	fn display_matches_tree_format() {
		let tree_size = AtomicU64::new(1);
		let node = GramNode::with_count(Symbol::Token('q'), 2);
		node.count_symbol(&Symbol::Token('u'), &tree_size);
		assert_eq!(node.to_string(), "[q]=2 (subsum=1)");
	}
}
