//! Interpretation of the text printed by the brightness utilities.

use thiserror::Error;

/// Output of a utility didn't have the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("expected a number, got {0:?}")]
    NotANumber(String),

    #[error("malformed VCP reply {0:?}")]
    MalformedReply(String),

    #[error("maximum brightness reported as 0")]
    ZeroMaximum,

    #[error("no serial number in display record {0:?}")]
    MissingSerial(String),
}

pub fn parse_number(output: &str) -> Result<u32, ParseError> {
    let trimmed = output.trim();
    trimmed
        .parse()
        .map_err(|_| ParseError::NotANumber(trimmed.to_owned()))
}

/// Convert a raw (current, max) pair into a normalized brightness
pub fn normalize(current: u32, max: u32) -> Result<f64, ParseError> {
    if max == 0 {
        return Err(ParseError::ZeroMaximum);
    }
    Ok((current as f64 / max as f64).clamp(0.0, 1.0))
}

/// Express a normalized brightness as a whole percentage
pub fn to_percentage(value: f64) -> u32 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u32
}
