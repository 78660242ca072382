use std::path::PathBuf;

use clap::Parser;
use rs_ngram_core::{GenerationInput, NGramTrie};

mod io;
mod sentences;

use sentences::SentenceSplitter;

/// Trains an n-gram trie on the sentences of a text file and prints
/// generated sentences.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Text file to learn from
	input: PathBuf,

	/// Window size, predicted symbol included
	#[arg(short, default_value_t = 10)]
	n: usize,

	/// Number of sentences to generate
	#[arg(short, long, default_value_t = 5)]
	count: usize,

	/// Maximum generated length, negative for unbounded
	#[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
	max_length: i64,

	/// Always retrain, ignoring and overwriting the cached model
	#[arg(long)]
	no_cache: bool,

	/// Print the trained tree (large for big corpora)
	#[arg(long)]
	print_tree: bool,
}

/// Loads the cached trie for this input and `n`, or trains and caches it.
fn load_or_train(args: &Args) -> Result<NGramTrie<char>, Box<dyn std::error::Error>> {
	let cache_path = io::cache_path(&args.input, args.n)?;
	if !args.no_cache && cache_path.exists() {
		log::info!("loading cached model {}", cache_path.display());
		let trie = NGramTrie::from_bytes(&std::fs::read(&cache_path)?)?;
		if trie.n() == args.n {
			return Ok(trie);
		}
		log::warn!("cached model has n = {}, retraining", trie.n());
	}

	let text = io::read_text(&args.input)?;
	println!("Data size: {:.1} KB", text.len() as f64 / 1024.0);

	let sentences = SentenceSplitter::new()?.split(&text);
	if sentences.is_empty() {
		return Err(format!("no sentence found in {}", args.input.display()).into());
	}
	let average = sentences.iter().map(Vec::len).sum::<usize>() as f64 / sentences.len() as f64;
	println!("Number of sentences: {}", sentences.len());
	println!("Average sentence length: {average:.1}");

	let trie = NGramTrie::new(args.n)?;
	trie.train_all(&sentences);

	std::fs::write(&cache_path, trie.to_bytes()?)?;
	log::info!("model cached to {}", cache_path.display());
	Ok(trie)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let args = Args::parse();

	let trie = load_or_train(&args)?;
	println!("Tree size: {}", trie.tree_size());
	if args.print_tree {
		print!("{}", trie.render_tree());
	}

	let mut input = GenerationInput::new();
	input.set_max_length(args.max_length);
	for i in 0..args.count {
		let generated: String = trie.generate_with(&input)?.collect();
		println!("{:2}: {}", i + 1, generated);
	}

	Ok(())
}
