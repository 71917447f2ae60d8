/// A single transcribed token with its time span.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptWord {
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f32,
}

impl TranscriptWord {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One decoder segment: its time span, text, and word-level timestamps
/// when the model produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub words: Option<Vec<TranscriptWord>>,
}

/// Reassemble transcript text from a word run, one space between tokens.
pub fn words_to_text(words: &[TranscriptWord]) -> String {
    words
        .iter()
        .map(|w| w.word.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
