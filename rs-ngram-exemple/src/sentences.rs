use regex::Regex;

/// Splits free text into sentences of characters.
///
/// A sentence runs up to and including its terminal punctuation (and a
/// closing quote, if any). Runs of whitespace collapse to one space and
/// empty sentences are dropped. Trailing text without punctuation is kept
/// as a last sentence.
///
/// A piece ending in an ellipsis or in a capitalised word followed by a
/// period (`Mr.`, `Dr.`) does not end the sentence and is joined with the
/// next piece.
pub(crate) struct SentenceSplitter {
	sentence: Regex,
	whitespace: Regex,
	continued: Regex,
}

impl SentenceSplitter {
	pub(crate) fn new() -> Result<Self, regex::Error> {
		Ok(Self {
			sentence: Regex::new(r#"[^.!?]+(?:[.!?]+"?|$)"#)?,
			whitespace: Regex::new(r"\s+")?,
			continued: Regex::new(r"(?:\b[A-Z][a-z]{0,15}\.|\.{3,})$")?,
		})
	}

	pub(crate) fn split(&self, text: &str) -> Vec<Vec<char>> {
		let mut sentences: Vec<String> = Vec::new();
		let mut pending = false;
		for piece in self.sentence.find_iter(text) {
			let piece = self.whitespace.replace_all(piece.as_str().trim(), " ");
			if piece.is_empty() {
				continue;
			}
			match sentences.last_mut() {
				Some(last) if pending => {
					last.push(' ');
					last.push_str(&piece);
				}
				_ => sentences.push(piece.into_owned()),
			}
			pending = sentences.last().is_some_and(|last| self.continued.is_match(last));
		}
		sentences.into_iter().map(|sentence| sentence.chars().collect()).collect()
	}
}
