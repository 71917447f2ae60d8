use crate::audio::domain::transcript::{words_to_text, TranscriptWord};

/// Characters that close a sentence.
pub const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// An ordered run of words ending at a sentence terminator, or the trailing
/// remainder with no terminator. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct SentenceGroup {
    words: Vec<TranscriptWord>,
}

impl SentenceGroup {
    pub fn words(&self) -> &[TranscriptWord] {
        &self.words
    }

    pub fn start_time(&self) -> f64 {
        self.words[0].start_time
    }

    pub fn end_time(&self) -> f64 {
        self.words[self.words.len() - 1].end_time
    }

    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    pub fn text(&self) -> String {
        words_to_text(&self.words)
    }
}

/// Scan left to right, closing a group at every word whose trailing text ends
/// in a sentence terminator. Trailing words with no terminator form a final
/// incomplete group.
pub fn group_into_sentences(words: &[TranscriptWord]) -> Vec<SentenceGroup> {
    let mut groups = Vec::new();
    let mut current: Vec<TranscriptWord> = Vec::new();

    for word in words {
        current.push(word.clone());
        if ends_sentence(&word.word) {
            groups.push(SentenceGroup {
                words: std::mem::take(&mut current),
            });
        }
    }

    if !current.is_empty() {
        groups.push(SentenceGroup { words: current });
    }

    groups
}

fn ends_sentence(word: &str) -> bool {
    word.trim_end().ends_with(SENTENCE_TERMINATORS)
}
