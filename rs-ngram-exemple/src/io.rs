use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads a whole text file into memory.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Path of the cached model trained on `corpus` with windows of `n`.
///
/// The cache sits next to the corpus: `data/hp1.txt` with `n = 10` is
/// cached as `data/hp1.10gram.bin`.
pub(crate) fn cache_path(corpus: &Path, n: usize) -> io::Result<PathBuf> {
	let stem = corpus
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "corpus path has no file name"))?;
	Ok(corpus.with_file_name(format!("{}.{n}gram.bin", stem.to_string_lossy())))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_sits_next_to_the_corpus() {
		let path = cache_path(Path::new("data/hp1.txt"), 10).expect("path has a file name");
		assert_eq!(path, PathBuf::from("data/hp1.10gram.bin"));
	}

	#[test]
	fn cache_name_keeps_inner_dots() {
		let path = cache_path(Path::new("corpus.v2.txt"), 3).expect("path has a file name");
		assert_eq!(path, PathBuf::from("corpus.v2.3gram.bin"));
	}

	#[test]
	fn cache_needs_a_file_name() {
		assert!(cache_path(Path::new(".."), 3).is_err());
	}
}
