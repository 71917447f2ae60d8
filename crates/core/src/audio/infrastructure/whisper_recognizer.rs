use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::recognizer_config::ComputeDevice;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::audio::domain::transcript::{TranscriptSegment, TranscriptWord};

/// Beam width for decoding.
const BEAM_SIZE: i32 = 10;
/// Beam-search patience factor.
const BEAM_PATIENCE: f32 = 2.0;
/// Deterministic decoding.
const DECODE_TEMPERATURE: f32 = 0.0;
/// Segments whose token entropy exceeds this are treated as decoder loops.
const ENTROPY_THRESHOLD: f32 = 2.4;
/// Segments with mean log-probability below this are dropped.
const LOGPROB_THRESHOLD: f32 = -1.0;
/// Probability above which a segment counts as silence.
const NO_SPEECH_THRESHOLD: f32 = 0.6;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Loads the GGML model on every transcription call and decodes with a fixed
/// beam-search configuration, producing token-level timestamps.
#[derive(Debug)]
pub struct WhisperRecognizer {
    model_path: PathBuf,
    device: ComputeDevice,
    initial_prompt: String,
}

impl WhisperRecognizer {
    pub fn new(
        model_path: &Path,
        device: ComputeDevice,
        initial_prompt: String,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
            device,
            initial_prompt,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
    ) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>> {
        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu = self.device.use_gpu();
        ctx_params.gpu_device = self.device.gpu_device();

        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            ctx_params,
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: BEAM_SIZE,
            patience: BEAM_PATIENCE,
        });
        params.set_language(Some("en"));
        params.set_translate(false);
        params.set_temperature(DECODE_TEMPERATURE);
        params.set_entropy_thold(ENTROPY_THRESHOLD);
        params.set_logprob_thold(LOGPROB_THRESHOLD);
        params.set_no_speech_thold(NO_SPEECH_THRESHOLD);
        // Keep conditioning on previously decoded text for cross-segment context
        params.set_no_context(false);
        params.set_token_timestamps(true);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);
        if !self.initial_prompt.is_empty() {
            params.set_initial_prompt(&self.initial_prompt);
        }

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = segment.to_string();
            if text.trim().is_empty() {
                continue;
            }

            let mut words = Vec::new();
            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let token_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens (start with [, like [_BEG_], [_SOT_], etc.)
                let trimmed = token_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                let token_data = token.token_data();
                let prob = token.token_probability();

                // Token timestamps are in centiseconds (10ms units)
                let start_time = token_data.t0 as f64 / 100.0;
                let end_time = token_data.t1 as f64 / 100.0;

                // Skip tokens with invalid timestamps
                if end_time <= start_time {
                    continue;
                }

                words.push(TranscriptWord {
                    word: trimmed.to_string(),
                    start_time,
                    end_time,
                    confidence: prob,
                });
            }

            segments.push(TranscriptSegment {
                start_time: segment.start_timestamp() as f64 / 100.0,
                end_time: segment.end_timestamp() as f64 / 100.0,
                text: text.trim().to_string(),
                words: if words.is_empty() { None } else { Some(words) },
            });
        }

        Ok(segments)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
