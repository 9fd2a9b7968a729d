//! File intake for the command-line caller: read an image file, take its
//! pixel dimensions from the header, and score it.

use image::{ImageFormat, ImageReader};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::config::CalculatorConfig;
use crate::error::{PrintScoreError, Result};
use crate::metadata::read_resolution_metadata;
use crate::scorer::calculate;
use crate::types::{CalculationInput, CalculationResult, Extent, ResolutionMetadata};

const ACCEPTED: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProbe {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub pixels: Extent<u32>,
    /// Embedded DPI, kept only when plausible.
    pub detected_dpi: Option<ResolutionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredImage {
    #[serde(flatten)]
    pub probe: ImageProbe,
    pub result: CalculationResult,
}

/// Read an image file, refusing anything over `max_file_bytes`.
pub fn read_image_bytes(path: &Path, config: &CalculatorConfig) -> Result<Vec<u8>> {
    let image_err = |message: String| PrintScoreError::ImageRead {
        path: path.to_path_buf(),
        message,
    };

    let size = std::fs::metadata(path).map_err(|e| image_err(e.to_string()))?.len();
    config.check_file_size(size)?;
    std::fs::read(path).map_err(|e| image_err(e.to_string()))
}

/// Dimensions, MIME type and embedded DPI of the image at `path`.
pub fn probe_file(path: &Path, config: &CalculatorConfig) -> Result<ImageProbe> {
    let bytes = read_image_bytes(path, config)?;
    probe_bytes(path, &bytes, config)
}

pub fn probe_bytes(path: &Path, bytes: &[u8], config: &CalculatorConfig) -> Result<ImageProbe> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PrintScoreError::ImageRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let format = reader.format().filter(|f| ACCEPTED.contains(f)).ok_or_else(|| {
        PrintScoreError::UnsupportedImage {
            path: path.to_path_buf(),
            mime: reader
                .format()
                .map_or_else(|| "unknown".to_string(), |f| f.to_mime_type().to_string()),
        }
    })?;
    let mime_type = format.to_mime_type();

    let (w, h) = reader.into_dimensions().map_err(|e| PrintScoreError::ImageRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let detected_dpi = read_resolution_metadata(bytes, mime_type).filter(|m| {
        let plausible = m.is_plausible(config.max_plausible_dpi);
        if !plausible {
            tracing::debug!(path = %path.display(), x = m.x_dpi, y = m.y_dpi, "ignoring implausible DPI");
        }
        plausible
    });

    Ok(ImageProbe {
        path: path.to_path_buf(),
        mime_type,
        pixels: Extent::new(w, h),
        detected_dpi,
    })
}

/// Probe and score one image against `request`, whose pixel fields are ignored.
pub fn score_image(path: &Path, request: &CalculationInput, config: &CalculatorConfig) -> Result<ScoredImage> {
    let probe = probe_file(path, config)?;
    let input = CalculationInput {
        pixel_width: Some(probe.pixels.w),
        pixel_height: Some(probe.pixels.h),
        ..request.clone()
    };
    let result = calculate(&input)?;
    tracing::debug!(path = %path.display(), score = result.ppqs.score, "scored image");
    Ok(ScoredImage { probe, result })
}

/// Score several images in parallel; results keep the order of `paths`.
pub fn score_images(paths: &[PathBuf], request: &CalculationInput, config: &CalculatorConfig) -> Vec<Result<ScoredImage>> {
    paths
        .par_iter()
        .map(|path| score_image(path, request, config))
        .collect()
}
