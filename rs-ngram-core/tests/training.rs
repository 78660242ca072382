use std::collections::HashSet;
use std::thread;

use rs_ngram_core::{NGramTrie, Symbol};

fn chars(s: &str) -> Vec<char> {
	s.chars().collect()
}

/// Every padded window of `n` symbols in `sequence`.
fn padded_windows(sequence: &[char], n: usize) -> Vec<Vec<Symbol<char>>> {
	let mut padded = vec![Symbol::Blank; n - 1];
	padded.extend(sequence.iter().copied().map(Symbol::Token));
	padded.push(Symbol::Blank);
	padded.windows(n).map(<[Symbol<char>]>::to_vec).collect()
}

#[test]
fn every_window_is_a_counted_path() {
	let corpus = ["the cat sat", "the hat", "a bat sat on the mat"];
	for n in 1..=5 {
		let trie = NGramTrie::new(n).expect("n is positive");
		for sentence in corpus {
			trie.train(&chars(sentence));
		}
		for sentence in corpus {
			for window in padded_windows(&chars(sentence), n) {
				let count = trie.path_count(&window);
				assert!(count.is_some_and(|c| c >= 1), "n = {n}, window {window:?}");
			}
		}
		trie.verify().expect("child sums match");
	}
}

#[test]
fn tree_size_counts_distinct_context_paths() {
	let corpus = ["abracadabra", "cadabra", "abba"];
	let n = 4;
	let trie = NGramTrie::new(n).expect("n is positive");
	let mut prefixes: HashSet<Vec<Symbol<char>>> = HashSet::new();
	for word in corpus {
		let word = chars(word);
		trie.train(&word);
		for window in padded_windows(&word, n) {
			for len in 1..=n {
				prefixes.insert(window[..len].to_vec());
			}
		}
	}
	assert_eq!(trie.tree_size(), 1 + prefixes.len() as u64);
}

#[test]
fn concurrent_training_loses_no_updates() {
	let n = 3;
	let threads = 8;
	let repetitions = 200;
	let word = chars("mississippi");

	let trie = NGramTrie::new(n).expect("n is positive");
	thread::scope(|scope| {
		for _ in 0..threads {
			scope.spawn(|| {
				for _ in 0..repetitions {
					trie.train(&word);
				}
			});
		}
	});

	let reference = NGramTrie::new(n).expect("n is positive");
	reference.train(&word);

	let runs = (threads * repetitions) as u64;
	for window in padded_windows(&word, n) {
		for len in 1..=n {
			let path = &window[..len];
			let expected = reference.path_count(path).map(|c| c * runs);
			assert_eq!(trie.path_count(path), expected, "path {path:?}");
		}
	}
	assert_eq!(trie.tree_size(), reference.tree_size());
	trie.verify().expect("child sums match");
}

#[test]
fn train_all_is_order_independent() {
	let words: Vec<Vec<char>> = (0..500)
		.map(|i| chars(&format!("w{}x{}", i % 37, i % 11)))
		.collect();
	let mut reversed = words.clone();
	reversed.reverse();

	let forward = NGramTrie::new(3).expect("n is positive");
	forward.train_all(&words);
	let backward = NGramTrie::new(3).expect("n is positive");
	for word in &reversed {
		backward.train(word);
	}

	assert_eq!(forward.tree_size(), backward.tree_size());
	for word in &words {
		for window in padded_windows(word, 3) {
			assert_eq!(forward.path_count(&window), backward.path_count(&window));
		}
	}
	forward.verify().expect("child sums match");
}
