pub mod audio_reader;
pub mod audio_segment;
pub mod recognizer_config;
pub mod speech_recognizer;
pub mod transcript;
