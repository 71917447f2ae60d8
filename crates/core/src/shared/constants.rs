/// Sample rate the Whisper models expect; all decoded audio is resampled to this.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Upstream GGML conversions of the OpenAI Whisper checkpoints.
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Application directory under the user cache where models are stored.
pub const MODEL_CACHE_APP_DIR: &str = "SpeechSplit";
