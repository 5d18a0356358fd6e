//! Recursive character splitting of document text into bounded,
//! overlapping chunks.
//!
//! The splitter prefers breaking on paragraph boundaries, then lines, then
//! words, and only cuts mid-word when a fragment has no separator at all.
//! Chunk sizes and overlap are measured in characters.

use crate::domain::AppError;

const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Chunking parameters for the document splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl SplitConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 600;
    pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

    /// Create a validated configuration.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, AppError> {
        if chunk_size == 0 {
            return Err(AppError::config_error("chunk_size must be greater than zero"));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::config_error(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { chunk_size: Self::DEFAULT_CHUNK_SIZE, chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP }
    }
}

/// Split `text` into ordered chunks of at most `chunk_size` characters,
/// with up to `chunk_overlap` characters repeated between neighbors.
pub fn split_text(text: &str, config: &SplitConfig) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    split_with_separators(trimmed, &SEPARATORS, config)
}

fn split_with_separators(text: &str, separators: &[&str], config: &SplitConfig) -> Vec<String> {
    if char_count(text) <= config.chunk_size {
        return vec![text.to_string()];
    }

    let Some((&separator, rest)) = separators.split_first() else {
        return hard_split(text, config);
    };

    if !text.contains(separator) {
        return split_with_separators(text, rest, config);
    }

    let pieces: Vec<&str> = text.split(separator).filter(|p| !p.is_empty()).collect();
    merge_pieces(&pieces, separator, rest, config)
}

/// Merge small pieces back into chunks close to `chunk_size`, carrying the
/// trailing pieces of each finished chunk into the next one as overlap.
fn merge_pieces(
    pieces: &[&str],
    separator: &str,
    rest: &[&str],
    config: &SplitConfig,
) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut window: Vec<&str> = Vec::new();

    for &piece in pieces {
        if char_count(piece) > config.chunk_size {
            if !window.is_empty() {
                chunks.push(window.join(separator));
                window.clear();
            }
            chunks.extend(split_with_separators(piece, rest, config));
            continue;
        }

        if !window.is_empty() && joined_len(&window, separator) + sep_len(separator) + char_count(piece) > config.chunk_size
        {
            chunks.push(window.join(separator));

            // Retain a tail of the finished window as overlap for the next chunk.
            while !window.is_empty()
                && (joined_len(&window, separator) > config.chunk_overlap
                    || joined_len(&window, separator) + sep_len(separator) + char_count(piece)
                        > config.chunk_size)
            {
                window.remove(0);
            }
        }

        window.push(piece);
    }

    if !window.is_empty() {
        chunks.push(window.join(separator));
    }

    chunks
}

/// Last resort for separator-free fragments: fixed windows on char boundaries.
fn hard_split(text: &str, config: &SplitConfig) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = config.chunk_size - config.chunk_overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + config.chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn sep_len(separator: &str) -> usize {
    separator.chars().count()
}

fn joined_len(window: &[&str], separator: &str) -> usize {
    if window.is_empty() {
        return 0;
    }
    window.iter().map(|p| char_count(p)).sum::<usize>() + sep_len(separator) * (window.len() - 1)
}
