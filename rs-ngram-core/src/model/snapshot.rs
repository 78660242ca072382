use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::NGramError;
use super::gram_node::GramNode;
use super::symbol::Symbol;
use super::trie::NGramTrie;

/// Owned, serializable copy of a trained trie.
///
/// Used to cache a trained model (ex. next to its corpus) and skip
/// training on the next run. Only counts are stored; child sums and the
/// tree size are recomputed on restore.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TrieSnapshot<T> {
	n: usize,
	root: NodeSnapshot<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct NodeSnapshot<T> {
	symbol: Symbol<T>,
	count: u64,
	children: Vec<NodeSnapshot<T>>,
}

impl<T: Clone> NodeSnapshot<T> {
	fn capture(node: &GramNode<T>) -> Self {
		Self {
			symbol: node.symbol().clone(),
			count: node.count(),
			children: node.read_children().values().map(|child| Self::capture(child)).collect(),
		}
	}
}

impl<T: Eq + Hash + Clone> NodeSnapshot<T> {
	/// Rebuilds the node and its subtree, returning it with its node count.
	fn restore(self, depth: usize, n: usize) -> Result<(GramNode<T>, u64), NGramError> {
		if depth == n && !self.children.is_empty() {
			return Err(NGramError::CorruptSnapshot(format!(
				"path deeper than the window size {n}"
			)));
		}
		if depth > 0 && depth < n && self.children.is_empty() {
			return Err(NGramError::CorruptSnapshot(format!(
				"inner node at depth {depth} has no children"
			)));
		}

		let node = GramNode::with_count(self.symbol, self.count);
		let mut size = 1;
		for child in self.children {
			let (child, child_size) = child.restore(depth + 1, n)?;
			if !node.attach(child) {
				return Err(NGramError::CorruptSnapshot("duplicate child symbol".to_owned()));
			}
			size += child_size;
		}

		// Every window runs to depth n, so inner nodes pass their whole count down
		if depth > 0 && depth < n && node.child_sum() != node.count() {
			return Err(NGramError::CorruptSnapshot(format!(
				"inner node counts {} but its children add up to {}",
				node.count(),
				node.child_sum()
			)));
		}
		Ok((node, size))
	}
}

impl<T> TrieSnapshot<T> {
	/// Window size of the captured trie.
	pub fn n(&self) -> usize {
		self.n
	}
}

impl<T: Clone> NGramTrie<T> {
	/// Captures the current state of the trie.
	///
	/// Must not run while the trie is being trained.
	pub fn snapshot(&self) -> TrieSnapshot<T> {
		TrieSnapshot {
			n: self.n(),
			root: NodeSnapshot::capture(self.root()),
		}
	}
}

impl<T: Eq + Hash + Clone> NGramTrie<T> {
	/// Rebuilds a trie from a snapshot.
	///
	/// The restored trie can be trained further.
	///
	/// # Errors
	/// Returns `CorruptSnapshot` if `n` is 0, the root is not blank, two
	/// siblings share a symbol, a path is longer than `n`, or a node above
	/// depth `n` (root excluded) is childless or its count differs from the
	/// sum of its children's counts.
	pub fn from_snapshot(snapshot: TrieSnapshot<T>) -> Result<Self, NGramError> {
		let n = snapshot.n;
		if n == 0 {
			return Err(NGramError::CorruptSnapshot("n must be positive".to_owned()));
		}
		if !snapshot.root.symbol.is_blank() {
			return Err(NGramError::CorruptSnapshot("root symbol must be blank".to_owned()));
		}

		let (root, tree_size) = snapshot.root.restore(0, n)?;
		Ok(Self::from_parts(n, root, tree_size))
	}
}

impl<T: Eq + Hash + Clone + Serialize> NGramTrie<T> {
	/// Encodes the trie with `postcard`.
	///
	/// # Errors
	/// Returns `Serialization` if encoding fails.
	pub fn to_bytes(&self) -> Result<Vec<u8>, NGramError> {
		Ok(postcard::to_stdvec(&self.snapshot())?)
	}
}

impl<T: Eq + Hash + Clone + DeserializeOwned> NGramTrie<T> {
	/// Decodes a trie encoded by [`NGramTrie::to_bytes`].
	///
	/// # Errors
	/// Returns `Serialization` for malformed bytes and `CorruptSnapshot`
	/// for a structurally invalid tree.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, NGramError> {
		let snapshot: TrieSnapshot<T> = postcard::from_bytes(bytes)?;
		let trie = Self::from_snapshot(snapshot)?;
		log::debug!("restored trie of {} nodes (n = {})", trie.tree_size(), trie.n());
		Ok(trie)
	}
}
