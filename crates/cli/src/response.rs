use serde::Serialize;

use speechsplit_core::segmentation::domain::output_segment::OutputSegment;

/// Successful run payload written to stdout.
#[derive(Debug, Serialize)]
pub struct SegmentationResponse {
    pub success: bool,
    pub segments: Vec<OutputSegment>,
    pub count: usize,
    pub prompt_used: String,
}

impl SegmentationResponse {
    pub fn new(segments: Vec<OutputSegment>, prompt_used: String) -> Self {
        Self {
            success: true,
            count: segments.len(),
            segments,
            prompt_used,
        }
    }
}

/// Failure payload written to stdout.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
