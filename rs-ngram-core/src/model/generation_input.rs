use super::context::ContextWindow;

/// Parameters of a single generation.
///
/// # Fields
/// - `max_length`: upper bound on the number of emitted symbols, `None`
///   for no bound (generation then stops only on a blank).
/// - `seed`: starting context; `None` starts from `n-1` blanks, i.e. from
///   the beginning of a sequence.
#[derive(Clone, Debug)]
pub struct GenerationInput<T> {
	max_length: Option<usize>,
	seed: Option<ContextWindow<T>>,
}

impl<T> Default for GenerationInput<T> {
	fn default() -> Self {
		Self {
			max_length: None,
			seed: None,
		}
	}
}

impl<T> GenerationInput<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bounds the generated length.
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Starts generation from `seed` instead of the blank context.
	///
	/// The seed must hold exactly `n-1` symbols; this is checked when the
	/// generator is created.
	pub fn with_seed(mut self, seed: ContextWindow<T>) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Sets the length bound from a signed value.
	///
	/// Any negative value means unbounded.
	pub fn set_max_length(&mut self, max_length: i64) {
		self.max_length = usize::try_from(max_length).ok();
	}

	pub fn max_length(&self) -> Option<usize> {
		self.max_length
	}

	pub fn seed(&self) -> Option<&ContextWindow<T>> {
		self.seed.as_ref()
	}
}
