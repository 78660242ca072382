use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::error::NGramError;
use super::context::ContextWindow;
use super::generation_input::GenerationInput;
use super::generator::Generator;
use super::gram_node::GramNode;
use super::symbol::Symbol;

/// Number of training chunks per CPU in `train_all`.
const CHUNKS_PER_CPU: usize = 8;

/// Counting trie over windows of `n` symbols.
///
/// Every path from the root is an observed window (or a prefix of one)
/// and each node counts how often its path was walked. Generation follows
/// the last `n-1` symbols from the root and samples the next symbol from
/// the reached node's children.
///
/// # Responsibilities
/// - Count every padded window of a training sequence
/// - Accept training from many threads at once through `&self`
/// - Hand out generators once training is complete
///
/// # Invariants
/// - `n` is always >= 1
/// - `tree_size` is incremented exactly once per created node
/// - No path is longer than `n`
pub struct NGramTrie<T> {
	/// Window size, predicted symbol included.
	n: usize,
	root: Arc<GramNode<T>>,
	tree_size: AtomicU64,
}

impl<T> NGramTrie<T> {
	/// Window size this trie was built for.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Total number of nodes, root included.
	pub fn tree_size(&self) -> u64 {
		self.tree_size.load(Ordering::Relaxed)
	}

	/// Returns `true` once at least one sequence was trained.
	pub fn is_trained(&self) -> bool {
		!self.root.read_children().is_empty()
	}

	pub(crate) fn root(&self) -> &Arc<GramNode<T>> {
		&self.root
	}

	/// Assembles a trie from an already populated root.
	pub(crate) fn from_parts(n: usize, root: GramNode<T>, tree_size: u64) -> Self {
		Self {
			n,
			root: Arc::new(root),
			tree_size: AtomicU64::new(tree_size),
		}
	}
}

impl<T: Eq + Hash + Clone> NGramTrie<T> {
	/// Creates an empty trie for windows of `n` symbols.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `n == 0`.
	pub fn new(n: usize) -> Result<Self, NGramError> {
		if n == 0 {
			return Err(NGramError::InvalidConfiguration("n must be positive".to_owned()));
		}
		Ok(Self::from_parts(n, GramNode::with_count(Symbol::Blank, 1), 1))
	}

	/// Adds one sequence to the trie.
	///
	/// For a sequence of length `L` this counts `L + 1` windows of `n`
	/// symbols. The first window is `n-1` blanks followed by the first
	/// symbol, the last one is the final `n-1` symbols followed by a blank.
	///
	/// Safe to call from several threads on the same trie.
	pub fn train(&self, sequence: &[T]) {
		let pad = self.n - 1;
		for start in 0..=sequence.len() {
			let mut node = Arc::clone(&self.root);
			for offset in 0..self.n {
				// `start + offset - pad` is the sequence index, blank outside of it
				let symbol = (start + offset)
					.checked_sub(pad)
					.and_then(|index| sequence.get(index))
					.map_or(Symbol::Blank, |token| Symbol::Token(token.clone()));
				node = node.count_symbol(&symbol, &self.tree_size);
			}
		}
		log::debug!("trained {} windows of {} symbols", sequence.len() + 1, self.n);
	}

	/// Trains a batch of sequences in parallel.
	///
	/// The batch is split into chunks (CPU count * 8); each chunk is trained
	/// by its own scoped thread against this shared trie. Returns once every
	/// worker has finished.
	pub fn train_all<S>(&self, sequences: &[S])
	where
		S: AsRef<[T]> + Sync,
		T: Send + Sync,
	{
		if sequences.is_empty() {
			return;
		}

		let chunks = num_cpus::get() * CHUNKS_PER_CPU;
		let chunk_size = sequences.len().div_ceil(chunks);
		log::info!(
			"training {} sequences in chunks of {} (n = {})",
			sequences.len(),
			chunk_size,
			self.n
		);

		thread::scope(|scope| {
			for chunk in sequences.chunks(chunk_size) {
				scope.spawn(move || {
					for sequence in chunk {
						self.train(sequence.as_ref());
					}
				});
			}
		});

		log::info!("training done, tree size: {}", self.tree_size());
	}

	/// Count of the node reached by following `path` from the root.
	///
	/// Returns `None` if the path was never observed. The empty path yields
	/// the root's count.
	pub fn path_count(&self, path: &[Symbol<T>]) -> Option<u64> {
		let mut node = Arc::clone(&self.root);
		for symbol in path {
			node = node.child(symbol)?;
		}
		Some(node.count())
	}

	/// Checks the counting invariants over the whole tree.
	///
	/// # Errors
	/// Returns `InvariantViolation` if a node's `child_sum` differs from the
	/// sum of its children's counts, or if a path is longer than `n`.
	pub fn verify(&self) -> Result<(), NGramError> {
		Self::verify_node(&self.root, 0, self.n)
	}

	fn verify_node(node: &GramNode<T>, depth: usize, n: usize) -> Result<(), NGramError> {
		let children = node.read_children();
		if depth == n && !children.is_empty() {
			return Err(NGramError::InvariantViolation(format!(
				"path deeper than the window size {n}"
			)));
		}

		let sum: u64 = children.values().map(|child| child.count()).sum();
		if sum != node.child_sum() {
			return Err(NGramError::InvariantViolation(format!(
				"child sum is {}, children counts add up to {sum}",
				node.child_sum()
			)));
		}

		children
			.values()
			.try_for_each(|child| Self::verify_node(child, depth + 1, n))
	}
}

impl<T: Eq + Hash + Clone + fmt::Debug> NGramTrie<T> {
	/// Starts an unbounded generation from the beginning of a sequence.
	///
	/// # Errors
	/// See [`NGramTrie::generate_with_rng`].
	pub fn generate(&self) -> Result<Generator<'_, T, ThreadRng>, NGramError> {
		self.generate_with(&GenerationInput::default())
	}

	/// Starts a generation using the thread-local random generator.
	///
	/// # Errors
	/// See [`NGramTrie::generate_with_rng`].
	pub fn generate_with(&self, input: &GenerationInput<T>) -> Result<Generator<'_, T, ThreadRng>, NGramError> {
		self.generate_with_rng(input, rand::rng())
	}

	/// Starts a generation driven by `rng`.
	///
	/// The seed context defaults to `n-1` blanks. The first symbol is
	/// determined before this returns.
	///
	/// # Errors
	/// - `UntrainedModel` if nothing was trained yet
	/// - `ContextSizeMismatch` if the seed does not hold `n-1` symbols
	/// - `ContextNotFound` if the seed context was never observed
	pub fn generate_with_rng<R: Rng>(&self, input: &GenerationInput<T>, rng: R) -> Result<Generator<'_, T, R>, NGramError> {
		if !self.is_trained() {
			return Err(NGramError::UntrainedModel);
		}

		let context = match input.seed() {
			Some(seed) if seed.len() != self.n - 1 => {
				return Err(NGramError::ContextSizeMismatch {
					expected: self.n - 1,
					actual: seed.len(),
				});
			}
			Some(seed) => seed.clone(),
			None => ContextWindow::blank(self.n - 1),
		};

		Generator::new(self, context, input.max_length(), rng)
	}
}

impl<T: fmt::Display> NGramTrie<T> {
	/// Renders the tree, one node per line, indented by depth.
	pub fn render_tree(&self) -> String {
		let mut out = String::new();
		Self::render_node(&self.root, 0, &mut out);
		out
	}

	fn render_node(node: &GramNode<T>, depth: usize, out: &mut String) {
		out.push_str(&"\t".repeat(depth));
		out.push_str(&node.to_string());
		out.push('\n');
		for child in node.read_children().values() {
			Self::render_node(child, depth + 1, out);
		}
	}
}
