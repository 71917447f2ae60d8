use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::shared::constants::WHISPER_MODEL_BASE_URL;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorParseError {
    #[error("Unknown model size '{0}', expected one of: tiny, base, small, medium, large")]
    ModelSize(String),
    #[error("Unknown device '{0}', expected 'cuda', 'cuda:<index>' or 'cpu'")]
    Device(String),
}

/// Whisper checkpoint size selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// GGML model file name for this size.
    pub fn file_name(&self) -> String {
        format!("ggml-{}.bin", self.as_str())
    }

    pub fn download_url(&self) -> String {
        format!("{}/{}", WHISPER_MODEL_BASE_URL, self.file_name())
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            _ => Err(SelectorParseError::ModelSize(s.to_string())),
        }
    }
}

/// Compute device the model runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComputeDevice {
    /// GPU, addressed by device index.
    Cuda(i32),
    Cpu,
}

impl ComputeDevice {
    pub fn use_gpu(&self) -> bool {
        matches!(self, ComputeDevice::Cuda(_))
    }

    pub fn gpu_device(&self) -> i32 {
        match self {
            ComputeDevice::Cuda(index) => *index,
            ComputeDevice::Cpu => 0,
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeDevice::Cuda(0) => f.write_str("CUDA"),
            ComputeDevice::Cuda(index) => write!(f, "CUDA:{index}"),
            ComputeDevice::Cpu => f.write_str("CPU"),
        }
    }
}

impl FromStr for ComputeDevice {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "cpu" {
            return Ok(ComputeDevice::Cpu);
        }
        if lower == "cuda" {
            return Ok(ComputeDevice::Cuda(0));
        }
        if let Some(index) = lower.strip_prefix("cuda:") {
            if let Ok(index) = index.parse::<i32>() {
                if index >= 0 {
                    return Ok(ComputeDevice::Cuda(index));
                }
            }
        }
        Err(SelectorParseError::Device(s.to_string()))
    }
}
