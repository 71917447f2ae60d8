use super::audio_segment::AudioSegment;
use super::transcript::TranscriptSegment;

/// Domain interface for speech-to-text transcription.
///
/// Implementations run inference on audio and produce ordered transcript
/// segments, carrying word-level timestamps when the model provides them.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
    ) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>>;
}
