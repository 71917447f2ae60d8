use crate::audio::domain::transcript::{words_to_text, TranscriptSegment, TranscriptWord};
use crate::parsing::domain::clause_parser::ClauseParser;
use crate::segmentation::domain::clause_splitter::split_at_clause_boundaries;
use crate::segmentation::domain::output_segment::OutputSegment;
use crate::segmentation::domain::sentence_grouper::group_into_sentences;

/// Sentences longer than this are split at clause boundaries (seconds).
pub const MAX_SENTENCE_DURATION: f64 = 7.0;

/// Added to every emitted segment end so trailing speech isn't clipped (seconds).
pub const SEGMENT_END_PADDING: f64 = 0.2;

/// Partitions a transcript into sentence-level output segments.
///
/// With word timestamps available, words are grouped at sentence terminators
/// and over-long groups are split at clause boundaries. Without any word
/// timestamps, each transcript segment maps to one output segment and only
/// the last end is left unpadded.
pub struct SegmentPartitioner {
    parser: Box<dyn ClauseParser>,
}

impl SegmentPartitioner {
    pub fn new(parser: Box<dyn ClauseParser>) -> Self {
        Self { parser }
    }

    pub fn partition(
        &self,
        segments: &[TranscriptSegment],
    ) -> Result<Vec<OutputSegment>, Box<dyn std::error::Error>> {
        let words: Vec<TranscriptWord> = segments
            .iter()
            .filter_map(|s| s.words.as_deref())
            .flatten()
            .cloned()
            .collect();

        if words.is_empty() {
            return Ok(per_segment_fallback(segments));
        }

        let mut out = Vec::new();
        for group in group_into_sentences(&words) {
            // Unrounded comparison; rounding happens at output construction
            if group.duration() > MAX_SENTENCE_DURATION {
                for chunk in split_at_clause_boundaries(self.parser.as_ref(), group.words())? {
                    out.push(segment_from_words(&chunk));
                }
            } else {
                out.push(segment_from_words(group.words()));
            }
        }
        Ok(out)
    }
}

/// One output segment per transcript segment; every end but the last padded.
fn per_segment_fallback(segments: &[TranscriptSegment]) -> Vec<OutputSegment> {
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(idx, seg)| {
            let end = if idx == last {
                seg.end_time
            } else {
                seg.end_time + SEGMENT_END_PADDING
            };
            OutputSegment::from_span(seg.start_time, end, seg.text.trim())
        })
        .collect()
}

fn segment_from_words(words: &[TranscriptWord]) -> OutputSegment {
    let start = words.first().map(|w| w.start_time).unwrap_or(0.0);
    let end = words.last().map(|w| w.end_time).unwrap_or(start);
    OutputSegment::from_span(start, end + SEGMENT_END_PADDING, words_to_text(words))
}
