//! Transcript relevance scoring.
//!
//! Case-insensitive substring counting of configured phrases against each
//! chunk's transcript, a positive-minus-negative sentiment term, then min-max
//! normalization across all chunks.

use tracing::debug;

use vodreel_models::{Chunk, KeywordConfig, SentimentCounts};

use crate::error::{EngineError, EngineResult};

/// Score all chunks from their merged `transcript` field.
///
/// Writes `keyword_counts`, `sentiment`, `raw_text_score`, and `text_score`
/// onto every chunk. A missing or empty transcript yields zero counts, not an
/// error. If every raw score is equal, every chunk scores 0.
pub fn score_text(chunks: &mut [Chunk], keywords: &KeywordConfig) -> EngineResult<()> {
    if chunks.is_empty() {
        return Err(EngineError::NoChunks);
    }

    debug!(
        chunks = chunks.len(),
        categories = keywords.categories.len(),
        "Scoring transcript relevance"
    );

    for chunk in chunks.iter_mut() {
        let text = chunk.transcript.as_deref().unwrap_or("").to_lowercase();

        chunk.keyword_counts = keywords
            .categories
            .iter()
            .map(|(category, phrases)| {
                let count = phrases
                    .iter()
                    .map(|phrase| count_occurrences(&text, &phrase.to_lowercase()))
                    .sum();
                (category.clone(), count)
            })
            .collect();

        chunk.sentiment = count_sentiment(&text, keywords);

        let total_keywords: u32 = chunk.keyword_counts.values().sum();
        chunk.raw_text_score = total_keywords as f64 + chunk.sentiment.raw() as f64;
    }

    normalize_scores(chunks);

    Ok(())
}

fn count_sentiment(text: &str, keywords: &KeywordConfig) -> SentimentCounts {
    let count = |phrases: &[String]| -> u32 {
        phrases
            .iter()
            .map(|phrase| count_occurrences(text, &phrase.to_lowercase()))
            .sum()
    };

    SentimentCounts {
        positive_hits: count(&keywords.sentiment.positive),
        negative_hits: count(&keywords.sentiment.negative),
    }
}

/// Non-overlapping occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut rest = haystack;
    while let Some(pos) = rest.find(needle) {
        count += 1;
        rest = &rest[pos + needle.len()..];
    }
    count
}

/// Min-max normalize raw text scores into [0, 1]; degenerate-equal scores 0.
fn normalize_scores(chunks: &mut [Chunk]) {
    let min = chunks
        .iter()
        .map(|c| c.raw_text_score)
        .fold(f64::INFINITY, f64::min);
    let max = chunks
        .iter()
        .map(|c| c.raw_text_score)
        .fold(f64::NEG_INFINITY, f64::max);

    for chunk in chunks.iter_mut() {
        if max == min {
            chunk.text_score = 0.0;
        } else {
            chunk.text_score = (chunk.raw_text_score - min) / (max - min);
        }
    }
}
