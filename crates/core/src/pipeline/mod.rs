pub mod segment_speech_use_case;
