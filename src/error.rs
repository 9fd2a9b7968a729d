use std::path::PathBuf;

use thiserror::Error;

/// Rejected `calculate` input. Returned as a value, never raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Please enter all required values: {field} is missing")]
    MissingValue { field: &'static str },

    #[error("Please enter all required values: {field} must be a positive number, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Why a resolution record could not be read from an image buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("Unsupported MIME type: {0}")]
    UnsupportedFormat(String),

    #[error("Missing {format} signature")]
    BadSignature { format: &'static str },

    #[error("Read of {len} bytes at offset {offset} runs past buffer end ({available} bytes)")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("Offset arithmetic overflowed")]
    OffsetOverflow,

    #[error("Expected segment marker at offset {offset}, found {found:#04x}")]
    MalformedSegment { offset: usize, found: u8 },

    #[error("APP1 segment at offset {offset} does not carry an Exif header")]
    NotExif { offset: usize },

    #[error("Resolution rational has a zero denominator")]
    ZeroDenominator,

    #[error("Image data reached before a {0} record")]
    ImageDataReached(&'static str),

    #[error("No resolution record found")]
    MissingResolution,
}

#[derive(Debug, Error)]
pub enum PrintScoreError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to read image {path}: {message}")]
    ImageRead { path: PathBuf, message: String },

    #[error("Unsupported image type {mime} for {path}; expected JPEG, PNG or WebP")]
    UnsupportedImage { path: PathBuf, mime: String },

    #[error("File too large: {size} bytes exceeds maximum {max_bytes} bytes")]
    FileTooLarge { size: u64, max_bytes: u64 },

    #[error("Print dimensions {width} x {height} in exceed maximum {max_inches} in")]
    PrintTooLarge {
        width: f64,
        height: f64,
        max_inches: f64,
    },

    #[error("Invalid pixel dimensions {0:?}; expected WIDTHxHEIGHT")]
    InvalidPixels(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrintScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_names_field() {
        let err = InputError::MissingValue { field: "pixel_width" };
        let msg = err.to_string();
        assert!(msg.contains("Please enter all required values"));
        assert!(msg.contains("pixel_width"));
    }

    #[test]
    fn input_error_shows_value() {
        let err = InputError::InvalidValue { field: "target_width_in", value: -2.0 };
        assert!(err.to_string().contains("-2"));
    }

    #[test]
    fn input_error_converts_into_crate_error() {
        let err: PrintScoreError = InputError::MissingValue { field: "pixel_height" }.into();
        assert!(matches!(err, PrintScoreError::Input(_)));
        assert!(err.to_string().contains("pixel_height"));
    }

    #[test]
    fn metadata_error_out_of_bounds_display() {
        let err = MetadataError::OutOfBounds { offset: 30, len: 4, available: 32 };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("32"));
    }

    #[test]
    fn metadata_error_malformed_segment_hex() {
        let err = MetadataError::MalformedSegment { offset: 2, found: 0x12 };
        assert!(err.to_string().contains("0x12"));
    }

    #[test]
    fn error_display_print_too_large() {
        let err = PrintScoreError::PrintTooLarge { width: 3000.0, height: 10.0, max_inches: 2400.0 };
        let msg = err.to_string();
        assert!(msg.contains("3000"));
        assert!(msg.contains("2400"));
    }

    #[test]
    fn error_display_file_too_large() {
        let err = PrintScoreError::FileTooLarge { size: 60_000_000, max_bytes: 52_428_800 };
        assert!(err.to_string().contains("52428800"));
    }
}
