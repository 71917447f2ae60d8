use std::path::Path;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::segmentation::domain::output_segment::OutputSegment;
use crate::segmentation::domain::segment_partitioner::SegmentPartitioner;
use crate::shared::constants::WHISPER_SAMPLE_RATE;

/// Stage callback, reporting a human-readable progress line.
pub type ProgressFn = Box<dyn Fn(&str) + Send>;

/// Transcribe one audio file and partition it into sentence-level segments.
pub struct SegmentSpeechUseCase {
    reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    partitioner: SegmentPartitioner,
    progress: Option<ProgressFn>,
}

impl SegmentSpeechUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        partitioner: SegmentPartitioner,
        progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            reader,
            recognizer,
            partitioner,
            progress,
        }
    }

    pub fn run(&self, audio_path: &Path) -> Result<Vec<OutputSegment>, Box<dyn std::error::Error>> {
        self.report("Decoding audio...");
        let audio = match self.reader.read_audio(audio_path, WHISPER_SAMPLE_RATE)? {
            Some(audio) => audio,
            None => {
                return Err(format!("No audio stream in {}", audio_path.display()).into());
            }
        };
        log::info!("Decoded {:.1}s of audio", audio.duration());

        self.report("Transcribing audio...");
        let transcript = self.recognizer.transcribe(&audio)?;
        log::info!("Transcription produced {} segments", transcript.len());

        self.report("Partitioning transcript...");
        let segments = self.partitioner.partition(&transcript)?;
        log::info!("Partitioned into {} output segments", segments.len());

        Ok(segments)
    }

    fn report(&self, stage: &str) {
        if let Some(ref progress) = self.progress {
            progress(stage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_segment::AudioSegment;
    use crate::audio::domain::transcript::{TranscriptSegment, TranscriptWord};
    use crate::parsing::infrastructure::heuristic_clause_parser::HeuristicClauseParser;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct StubAudioReader {
        segment: Option<AudioSegment>,
    }

    impl AudioReader for StubAudioReader {
        fn read_audio(
            &self,
            _: &Path,
            _: u32,
        ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
            Ok(self.segment.clone())
        }
    }

    struct FailingAudioReader;

    impl AudioReader for FailingAudioReader {
        fn read_audio(
            &self,
            path: &Path,
            _: u32,
        ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
            Err(format!("cannot open {}", path.display()).into())
        }
    }

    struct StubRecognizer {
        segments: Vec<TranscriptSegment>,
    }

    impl SpeechRecognizer for StubRecognizer {
        fn transcribe(
            &self,
            _: &AudioSegment,
        ) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>> {
            Ok(self.segments.clone())
        }
    }

    struct FailingRecognizer;

    impl SpeechRecognizer for FailingRecognizer {
        fn transcribe(
            &self,
            _: &AudioSegment,
        ) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>> {
            Err("inference failed".into())
        }
    }

    fn silent_audio() -> AudioSegment {
        AudioSegment::new(vec![0.0; 16000], 16000, 1)
    }

    fn word(w: &str, start: f64, end: f64) -> TranscriptWord {
        TranscriptWord {
            word: w.to_string(),
            start_time: start,
            end_time: end,
            confidence: 0.9,
        }
    }

    fn partitioner() -> SegmentPartitioner {
        SegmentPartitioner::new(Box::new(HeuristicClauseParser::new()))
    }

    fn use_case(
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
    ) -> SegmentSpeechUseCase {
        SegmentSpeechUseCase::new(reader, recognizer, partitioner(), None)
    }

    #[test]
    fn test_run_produces_partitioned_segments() {
        let uc = use_case(
            Box::new(StubAudioReader {
                segment: Some(silent_audio()),
            }),
            Box::new(StubRecognizer {
                segments: vec![TranscriptSegment {
                    start_time: 0.0,
                    end_time: 0.65,
                    text: "Hi there.".to_string(),
                    words: Some(vec![
                        word("Hi", 0.0, 0.3),
                        word("there", 0.3, 0.6),
                        word(".", 0.6, 0.65),
                    ]),
                }],
            }),
        );
        let out = uc.run(Path::new("in.wav")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Hi there .");
    }

    #[test]
    fn test_run_empty_transcript_gives_empty_output() {
        let uc = use_case(
            Box::new(StubAudioReader {
                segment: Some(silent_audio()),
            }),
            Box::new(StubRecognizer { segments: vec![] }),
        );
        let out = uc.run(Path::new("in.wav")).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_no_audio_stream_is_error() {
        let uc = use_case(
            Box::new(StubAudioReader { segment: None }),
            Box::new(StubRecognizer { segments: vec![] }),
        );
        let err = uc.run(Path::new("in.wav")).unwrap_err().to_string();
        assert!(err.contains("No audio stream"), "got: {err}");
    }

    #[test]
    fn test_run_reader_error_propagates() {
        let uc = use_case(
            Box::new(FailingAudioReader),
            Box::new(StubRecognizer { segments: vec![] }),
        );
        assert!(uc.run(Path::new("in.wav")).is_err());
    }

    #[test]
    fn test_run_recognizer_error_propagates() {
        let uc = use_case(
            Box::new(StubAudioReader {
                segment: Some(silent_audio()),
            }),
            Box::new(FailingRecognizer),
        );
        let err = uc.run(Path::new("in.wav")).unwrap_err().to_string();
        assert!(err.contains("inference failed"), "got: {err}");
    }

    #[test]
    fn test_progress_reports_each_stage() {
        let stages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = stages.clone();
        let uc = SegmentSpeechUseCase::new(
            Box::new(StubAudioReader {
                segment: Some(silent_audio()),
            }),
            Box::new(StubRecognizer { segments: vec![] }),
            partitioner(),
            Some(Box::new(move |stage| {
                sink.lock().unwrap().push(stage.to_string());
            })),
        );
        uc.run(Path::new("in.wav")).unwrap();
        let stages = stages.lock().unwrap();
        assert_eq!(stages.len(), 3);
        assert!(stages[1].contains("Transcribing"));
    }
}
