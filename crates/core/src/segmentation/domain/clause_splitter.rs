use crate::audio::domain::transcript::{words_to_text, TranscriptWord};
use crate::parsing::domain::clause_parser::{ClauseParser, ParsedToken, TokenRole};

/// Surface forms accepted as split candidates regardless of assigned role.
const SPLIT_SURFACE_FORMS: &[&str] = &[",", "and", "but", "or", "so"];

/// Split an over-long word run into clause-sized chunks.
///
/// Candidate boundaries come from the parser: coordinating conjunctions and
/// the fixed surface forms. Each candidate is located in the word list through
/// a monotonic cursor, a comma closes the chunk it ends, a conjunction opens
/// the next one. With no usable candidate the run is bisected at the midpoint
/// word index. Chunks are returned in original word order and are never empty.
pub fn split_at_clause_boundaries(
    parser: &dyn ClauseParser,
    words: &[TranscriptWord],
) -> Result<Vec<Vec<TranscriptWord>>, Box<dyn std::error::Error>> {
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let tokens = parser.parse(&words_to_text(words))?;
    let mut boundaries = boundary_indices(&tokens, words);

    if boundaries.is_empty() {
        boundaries.push(words.len() / 2);
    }

    Ok(partition(words, &boundaries))
}

/// Map candidate tokens to word-list boundary indices.
///
/// The cursor only moves forward, so a surface form that repeats is matched
/// against successive words instead of re-matching the first occurrence.
/// Degenerate boundaries (index 0 or the list end) survive here; `partition`
/// drops the empty chunks they would produce.
fn boundary_indices(tokens: &[ParsedToken], words: &[TranscriptWord]) -> Vec<usize> {
    let mut cursor = WordCursor::new(words);
    let mut boundaries = Vec::new();

    for token in tokens {
        if !is_split_candidate(token) {
            continue;
        }
        if let Some(idx) = cursor.find(&token.text) {
            let boundary = match token.role {
                TokenRole::CoordinatingConjunction => idx,
                _ => idx + 1,
            };
            boundaries.push(boundary);
        }
    }

    boundaries.sort_unstable();
    boundaries.dedup();
    boundaries
}

fn is_split_candidate(token: &ParsedToken) -> bool {
    token.role == TokenRole::CoordinatingConjunction
        || SPLIT_SURFACE_FORMS.contains(&token.text.to_lowercase().as_str())
}

fn partition(words: &[TranscriptWord], boundaries: &[usize]) -> Vec<Vec<TranscriptWord>> {
    let mut chunks = Vec::new();
    let mut prev = 0;
    for boundary in boundaries.iter().copied().chain(std::iter::once(words.len())) {
        if boundary > prev {
            chunks.push(words[prev..boundary].to_vec());
            prev = boundary;
        }
    }
    chunks
}

/// Monotonic forward cursor over the word list.
struct WordCursor<'a> {
    words: &'a [TranscriptWord],
    pos: usize,
}

impl<'a> WordCursor<'a> {
    fn new(words: &'a [TranscriptWord]) -> Self {
        Self { words, pos: 0 }
    }

    /// Find the next word matching the surface form, consuming it.
    fn find(&mut self, surface: &str) -> Option<usize> {
        let target = surface.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }
        for idx in self.pos..self.words.len() {
            if word_matches(&self.words[idx].word, &target) {
                self.pos = idx + 1;
                return Some(idx);
            }
        }
        None
    }
}

/// Case-insensitive match; single-character punctuation also matches a word
/// it is attached to ("tired," matches ",").
fn word_matches(word: &str, target: &str) -> bool {
    let w = word.trim().to_lowercase();
    if w == target {
        return true;
    }
    target.len() == 1
        && target.chars().all(|c| c.is_ascii_punctuation())
        && w.ends_with(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::infrastructure::heuristic_clause_parser::HeuristicClauseParser;

    fn word(w: &str, start: f64, end: f64) -> TranscriptWord {
        TranscriptWord {
            word: w.to_string(),
            start_time: start,
            end_time: end,
            confidence: 0.9,
        }
    }

    fn evenly_spaced(texts: &[&str], step: f64) -> Vec<TranscriptWord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| word(t, i as f64 * step, (i + 1) as f64 * step))
            .collect()
    }

    fn split(words: &[TranscriptWord]) -> Vec<Vec<TranscriptWord>> {
        split_at_clause_boundaries(&HeuristicClauseParser::new(), words).unwrap()
    }

    fn chunk_texts(chunks: &[Vec<TranscriptWord>]) -> Vec<String> {
        chunks.iter().map(|c| words_to_text(c)).collect()
    }

    #[test]
    fn test_no_candidates_bisects_at_midpoint() {
        let words = evenly_spaced(&["one", "two", "three", "four"], 2.5);
        let chunks = split(&words);
        assert_eq!(chunk_texts(&chunks), vec!["one two", "three four"]);
    }

    #[test]
    fn test_conjunction_opens_next_chunk() {
        let words = evenly_spaced(&["I", "walked", "and", "she", "ran."], 2.0);
        let chunks = split(&words);
        assert_eq!(chunk_texts(&chunks), vec!["I walked", "and she ran."]);
    }

    #[test]
    fn test_attached_comma_closes_chunk() {
        let words = evenly_spaced(&["I", "was", "tired,", "we", "left."], 2.0);
        let chunks = split(&words);
        assert_eq!(chunk_texts(&chunks), vec!["I was tired,", "we left."]);
    }

    #[test]
    fn test_comma_then_conjunction_yields_no_empty_chunk() {
        let words = evenly_spaced(&["I", "was", "tired,", "so", "I", "left."], 2.0);
        let chunks = split(&words);
        assert_eq!(chunk_texts(&chunks), vec!["I was tired,", "so I left."]);
    }

    #[test]
    fn test_repeated_conjunctions_matched_in_order() {
        let words = evenly_spaced(&["cats", "and", "dogs", "and", "birds"], 2.0);
        let chunks = split(&words);
        assert_eq!(
            chunk_texts(&chunks),
            vec!["cats", "and dogs", "and birds"]
        );
    }

    #[test]
    fn test_leading_conjunction_produces_no_zero_boundary() {
        let words = evenly_spaced(&["and", "then", "we", "left"], 2.0);
        let chunks = split(&words);
        // boundary before index 0 is discarded, leaving the midpoint untouched
        assert_eq!(chunk_texts(&chunks), vec!["and then we left"]);
    }

    #[test]
    fn test_empty_word_list() {
        assert!(split(&[]).is_empty());
    }

    #[test]
    fn test_single_word_never_splits() {
        let words = evenly_spaced(&["hello"], 10.0);
        let chunks = split(&words);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_chunks_preserve_word_order_and_times() {
        let words = evenly_spaced(&["a", "b,", "c", "d"], 2.0);
        let chunks = split(&words);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0][0].start_time, 0.0);
        assert_eq!(chunks[1][0].word, "c");
        assert_eq!(chunks[1][1].end_time, 8.0);
    }

    #[test]
    fn test_cursor_does_not_rematch_consumed_word() {
        let mut cursor = WordCursor::new(&[]);
        assert_eq!(cursor.find("and"), None);

        let words = evenly_spaced(&["and", "and"], 1.0);
        let mut cursor = WordCursor::new(&words);
        assert_eq!(cursor.find("and"), Some(0));
        assert_eq!(cursor.find("and"), Some(1));
        assert_eq!(cursor.find("and"), None);
    }
}
