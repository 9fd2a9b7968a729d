//! Embedded print-resolution hints, read straight from container bytes.
//!
//! Advisory only: a missing or unreadable record is `None`, never an error
//! surfaced to the caller.

pub mod jpeg;
pub mod png;
pub mod reader;

use crate::error::MetadataError;
use crate::types::ResolutionMetadata;

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";

/// Like [`read_resolution_metadata`], but says why nothing was found.
pub fn try_read_resolution_metadata(bytes: &[u8], mime_type: &str) -> Result<ResolutionMetadata, MetadataError> {
    match mime_type {
        MIME_JPEG => jpeg::read_resolution(bytes),
        MIME_PNG => png::read_resolution(bytes),
        other => Err(MetadataError::UnsupportedFormat(other.to_string())),
    }
}

/// Resolution record for a JPEG (Exif) or PNG (`pHYs`) buffer.
pub fn read_resolution_metadata(bytes: &[u8], mime_type: &str) -> Option<ResolutionMetadata> {
    try_read_resolution_metadata(bytes, mime_type)
        .inspect_err(|e| tracing::debug!(mime_type, error = %e, "no resolution metadata"))
        .ok()
}
