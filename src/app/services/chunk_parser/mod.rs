//! Chunk parser for keyword-delimited model files
//!
//! Splits raw file text into ordered chunks. A chunk starts at a line whose
//! first word is one of the recognized keywords and runs up to the next such
//! line or the end of input. Lines inside a chunk are kept verbatim (blank
//! lines included) alongside their tokenized form.
//!
//! ## Usage
//!
//! ```rust
//! use gssha_io::app::services::chunk_parser::chunk;
//!
//! let text = "EVENT \"Storm\"\nNRGAG 0\nNRPDS 0\n";
//! let chunks = chunk(text, &["EVENT"]).unwrap();
//! assert_eq!(chunks.get("EVENT").count(), 1);
//! ```

pub mod tokenizer;

#[cfg(test)]
pub mod tests;

use crate::{Error, Result};
use tracing::debug;

pub use tokenizer::tokenize;

/// One source line inside a chunk
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkLine {
    /// 1-based line number in the source text
    pub number: usize,

    /// Line text exactly as read
    pub raw: String,

    /// Whitespace tokens with quotes stripped
    pub tokens: Vec<String>,
}

impl ChunkLine {
    fn new(number: usize, raw: &str) -> Self {
        Self {
            number,
            raw: raw.to_string(),
            tokens: tokenize(raw),
        }
    }

    /// Whether the line has no tokens
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Contiguous span of lines governed by one keyword
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub keyword: String,

    /// Lines of the chunk, starting with the keyword line
    pub lines: Vec<ChunkLine>,
}

impl Chunk {
    /// Chunk text with the original line breaks
    pub fn raw(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 1-based line number of the keyword line
    pub fn start_line(&self) -> usize {
        self.lines.first().map(|l| l.number).unwrap_or(0)
    }
}

/// Chunks of a file in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunks {
    chunks: Vec<Chunk>,
}

impl Chunks {
    /// Chunks opened by `keyword`, in source order
    pub fn get<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.chunks.iter().filter(move |c| c.keyword == keyword)
    }

    /// All chunks in source order
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl IntoIterator for Chunks {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

/// Split text into chunks opened by the given keywords
///
/// Blank lines before the first keyword are ignored. Any other content
/// before the first keyword is a format error.
pub fn chunk(text: &str, keywords: &[&str]) -> Result<Chunks> {
    let mut chunks: Vec<Chunk> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let opens = tokenizer::first_word(raw).filter(|word| keywords.contains(word));

        if let Some(keyword) = opens {
            chunks.push(Chunk {
                keyword: keyword.to_string(),
                lines: vec![ChunkLine::new(number, raw)],
            });
            continue;
        }

        match chunks.last_mut() {
            Some(current) => current.lines.push(ChunkLine::new(number, raw)),
            None if raw.trim().is_empty() => {}
            None => {
                return Err(Error::Format {
                    file: String::new(),
                    line: Some(number),
                    message: format!(
                        "content before first keyword (expected one of {})",
                        keywords.join(", ")
                    ),
                });
            }
        }
    }

    debug!("Split input into {} chunks", chunks.len());
    Ok(Chunks { chunks })
}
