mod response;

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;

use speechsplit_core::audio::domain::recognizer_config::{ComputeDevice, ModelSize};
use speechsplit_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use speechsplit_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use speechsplit_core::parsing::infrastructure::heuristic_clause_parser::HeuristicClauseParser;
use speechsplit_core::pipeline::segment_speech_use_case::{ProgressFn, SegmentSpeechUseCase};
use speechsplit_core::segmentation::domain::segment_partitioner::SegmentPartitioner;
use speechsplit_core::shared::model_resolver;

use crate::response::{ErrorResponse, SegmentationResponse};

/// Sentence-level speech segmentation for audio files.
#[derive(Parser)]
#[command(name = "speechsplit")]
struct Cli {
    /// Audio file to transcribe.
    audio_path: PathBuf,

    /// Whisper model size: tiny, base, small, medium or large.
    #[arg(default_value = "small")]
    model_size: String,

    /// Free-text prompt biasing the decoder; empty for no bias.
    #[arg(default_value = "")]
    initial_prompt: String,

    /// Compute device: cuda, cuda:N or cpu.
    #[arg(default_value = "cuda")]
    device: String,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion => {
            let _ = e.print();
            return;
        }
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            fail("No audio file specified");
        }
        Err(e) => fail(&e.to_string()),
    };

    match run(cli) {
        Ok(response) => print_json(&response),
        Err(e) => fail(&e.to_string()),
    }
}

fn run(cli: Cli) -> Result<SegmentationResponse, Box<dyn std::error::Error>> {
    let model_size: ModelSize = cli.model_size.parse()?;
    let device: ComputeDevice = cli.device.parse()?;

    log::info!("Resolving model: {}", model_size.file_name());
    let model_path =
        model_resolver::resolve(model_size, None, Some(Box::new(download_progress)))?;
    eprintln!();

    eprintln!("Loading Whisper model '{model_size}' on {device}...");
    let recognizer =
        WhisperRecognizer::new(&model_path, device, cli.initial_prompt.clone())?;

    let partitioner = SegmentPartitioner::new(Box::new(HeuristicClauseParser::new()));
    let progress: ProgressFn = Box::new(|stage| eprintln!("{stage}"));

    let use_case = SegmentSpeechUseCase::new(
        Box::new(FfmpegAudioReader),
        Box::new(recognizer),
        partitioner,
        Some(progress),
    );
    let segments = use_case.run(&cli.audio_path)?;

    Ok(SegmentationResponse::new(segments, cli.initial_prompt))
}

fn fail(message: &str) -> ! {
    print_json(&ErrorResponse::new(message));
    process::exit(1);
}

/// The JSON payload is the only thing ever written to stdout.
fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize response: {e}");
            println!("{{\"success\": false, \"error\": \"internal serialization failure\"}}");
            process::exit(1);
        }
    }
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
