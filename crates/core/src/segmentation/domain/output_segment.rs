use serde::Serialize;

/// A final timestamped segment of the transcript.
///
/// Times are rounded to milliseconds here and nowhere earlier; duration is
/// derived from the unrounded span, then rounded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutputSegment {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub text: String,
}

impl OutputSegment {
    pub fn from_span(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start: round_ms(start),
            end: round_ms(end),
            duration: round_ms(end - start),
            text: text.into(),
        }
    }
}

/// Round to 3 decimal places (millisecond precision).
fn round_ms(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
