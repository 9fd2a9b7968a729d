use crate::error::InputError;
use crate::profiles::{self, HUMAN_EYE_CONSTANT};
use crate::suggest::{SuggestionContext, suggestions};
use crate::types::{
    Calculation, CalculationInput, CalculationResult, Dimensions, Extent, InputEcho, MaxPrint,
    QualityScore, Rating, RequiredPixels,
};
use crate::units::{CM_PER_INCH, MM_PER_INCH, round_to};

/// Upscaled density may exceed the medium's recommended DPI by at most 10%.
const AI_CAP_RATIO: f64 = 1.1;

/// Score an image's pixel dimensions against a print size, medium and viewing distance.
///
/// Unknown profile keys resolve to their defaults. Missing, zero or
/// non-finite numeric inputs yield an `InputError` and nothing is computed.
pub fn calculate(input: &CalculationInput) -> Result<CalculationResult, InputError> {
    let pixel_width = positive_pixels("pixel_width", input.pixel_width)?;
    let pixel_height = positive_pixels("pixel_height", input.pixel_height)?;
    let target_width = positive_inches("target_width_in", input.target_width_in)?;
    let target_height = positive_inches("target_height_in", input.target_height_in)?;

    let medium = profiles::medium(&input.medium);
    let view = profiles::viewing_distance(&input.viewing_distance);
    let ai = profiles::upscale(&input.upscale);

    // Narrower axis is the binding constraint.
    let raw_dpi = (f64::from(pixel_width) / target_width).min(f64::from(pixel_height) / target_height);

    let gain = raw_dpi * (ai.pixel_multiplier - 1.0) * ai.quality_retention;
    let ai_raw_dpi = (raw_dpi + gain).min(f64::from(medium.recommended_dpi) * AI_CAP_RATIO);

    let effective_dpi = ai_raw_dpi * medium.maf;
    let min_perceptible_dpi = min_perceptible_dpi(view.inches);
    let threshold = min_perceptible_dpi * medium.quality_threshold_multiplier;

    let score = score(effective_dpi, threshold);
    let rating = Rating::from_score(score);

    let required = required_pixels(target_width, target_height, medium.recommended_dpi, medium.maf);
    let pixels = Extent::new(pixel_width, pixel_height);
    let suggestions = suggestions(&SuggestionContext {
        score,
        medium,
        upscale: ai,
        required: &required,
        pixels,
    });

    Ok(CalculationResult {
        input: InputEcho {
            pixels,
            megapixels: round_to(f64::from(pixel_width) * f64::from(pixel_height) / 1e6, 2),
            target_print: Extent::new(target_width, target_height),
            medium_key: medium.key,
            medium: medium.label,
            viewing_distance_key: view.key,
            viewing_distance: view.label,
            upscale_key: ai.key,
            ai_upscaling: ai.label,
        },
        calculation: Calculation {
            raw_dpi: whole(raw_dpi),
            ai_adjusted_raw_dpi: whole(ai_raw_dpi),
            effective_dpi: whole(effective_dpi),
            min_perceptible_dpi: whole(min_perceptible_dpi),
            quality_threshold: whole(threshold),
            medium_maf: medium.maf,
        },
        ppqs: QualityScore {
            score,
            rating,
            color: rating.color(),
            icon: rating.icon(),
            message: rating.message(medium.label),
        },
        dimensions: dimensions(target_width, target_height),
        max_print: max_print(pixel_width, pixel_height, medium.recommended_dpi),
        required_pixels: required,
        suggestions,
        medium_note: medium.note,
    })
}

/// Finest detail the eye resolves at `viewing_inches`, in DPI.
pub fn min_perceptible_dpi(viewing_inches: f64) -> f64 {
    HUMAN_EYE_CONSTANT / viewing_inches
}

/// `effective / threshold` as a whole percentage, capped at 100.
fn score(effective_dpi: f64, threshold: f64) -> u8 {
    ((effective_dpi / threshold) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Source pixels needed so that `dpi` survives the medium's absorption.
///
/// Dividing by `maf` is the inverse of the `effective = raw * maf` model
/// used for scoring: it asks for more pixels on absorptive media.
pub fn required_pixels(width_in: f64, height_in: f64, dpi: u32, maf: f64) -> RequiredPixels {
    let compensated = f64::from(dpi) / maf;
    let w = width_in * compensated;
    let h = height_in * compensated;
    RequiredPixels {
        width: w.ceil() as u64,
        height: h.ceil() as u64,
        megapixels: round_to(w * h / 1e6, 2),
        at_dpi: dpi,
    }
}

/// Largest print the pixels support at `dpi`.
pub fn max_print(pixel_width: u32, pixel_height: u32, dpi: u32) -> MaxPrint {
    let w = f64::from(pixel_width) / f64::from(dpi);
    let h = f64::from(pixel_height) / f64::from(dpi);
    MaxPrint {
        inches: Extent::new(round_to(w, 2), round_to(h, 2)),
        cm: Extent::new(round_to(w * CM_PER_INCH, 2), round_to(h * CM_PER_INCH, 2)),
        at_dpi: dpi,
    }
}

fn dimensions(width_in: f64, height_in: f64) -> Dimensions {
    Dimensions {
        inches: Extent::new(round_to(width_in, 2), round_to(height_in, 2)),
        cm: Extent::new(round_to(width_in * CM_PER_INCH, 2), round_to(height_in * CM_PER_INCH, 2)),
        mm: Extent::new(round_to(width_in * MM_PER_INCH, 1), round_to(height_in * MM_PER_INCH, 1)),
    }
}

fn whole(dpi: f64) -> u32 {
    dpi.round() as u32
}

fn positive_pixels(field: &'static str, value: Option<u32>) -> Result<u32, InputError> {
    match value {
        None => Err(InputError::MissingValue { field }),
        Some(0) => Err(InputError::InvalidValue { field, value: 0.0 }),
        Some(v) => Ok(v),
    }
}

fn positive_inches(field: &'static str, value: Option<f64>) -> Result<f64, InputError> {
    match value {
        None => Err(InputError::MissingValue { field }),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(InputError::InvalidValue { field, value: v }),
    }
}
