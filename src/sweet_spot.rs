use crate::profiles;
use crate::scorer::{min_perceptible_dpi, required_pixels};
use crate::types::{Extent, SweetSpotResult};
use crate::units::group_thousands;

/// Closer viewing shows flaws sooner, so it gets the larger buffer.
fn safety_margin(viewing_inches: f64) -> f64 {
    if viewing_inches <= 24.0 {
        2.0
    } else if viewing_inches <= 60.0 {
        1.5
    } else {
        1.2
    }
}

/// Minimum DPI (and source pixels) for a print size, independent of any image.
///
/// The perceptual target is raised to the medium's minimum acceptable DPI
/// first, then capped at its recommended DPI.
pub fn sweet_spot(print_width_in: f64, print_height_in: f64, medium_key: &str, viewing_distance_key: &str) -> SweetSpotResult {
    let medium = profiles::medium(medium_key);
    let view = profiles::viewing_distance(viewing_distance_key);

    let min_perceptible = min_perceptible_dpi(view.inches);
    let margin = safety_margin(view.inches);
    let perceptual = (min_perceptible * margin).ceil() as u32;
    let dpi = perceptual.max(medium.min_acceptable_dpi).min(medium.recommended_dpi);

    let required = required_pixels(print_width_in, print_height_in, dpi, medium.maf);
    let interpretation = format!(
        "For {} at {}, you need {} DPI, requiring a {} × {} px image ({} MP).",
        medium.label,
        view.label.to_lowercase(),
        dpi,
        group_thousands(required.width),
        group_thousands(required.height),
        required.megapixels,
    );

    SweetSpotResult {
        print_size: Extent::new(print_width_in, print_height_in),
        medium: medium.label,
        viewing_distance: view.label,
        sweet_spot_dpi: dpi,
        safety_margin: margin,
        min_perceptible_dpi: min_perceptible.round() as u32,
        required_pixels: required,
        interpretation,
    }
}
