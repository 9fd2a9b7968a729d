use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profiles::{DEFAULT_MEDIUM, DEFAULT_UPSCALE, DEFAULT_VIEWING_DISTANCE};

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent<T> {
    pub w: T,
    pub h: T,
}

impl<T> Extent<T> {
    pub fn new(w: T, h: T) -> Self {
        Self { w, h }
    }
}

/// Everything `calculate` needs. Numeric fields are optional so that a
/// missing value surfaces as an `InputError` instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    #[serde(default)]
    pub pixel_width: Option<u32>,
    #[serde(default)]
    pub pixel_height: Option<u32>,
    #[serde(default)]
    pub target_width_in: Option<f64>,
    #[serde(default)]
    pub target_height_in: Option<f64>,
    #[serde(default = "default_medium")]
    pub medium: String,
    #[serde(default = "default_viewing_distance")]
    pub viewing_distance: String,
    #[serde(default = "default_upscale")]
    pub upscale: String,
}

fn default_medium() -> String { DEFAULT_MEDIUM.to_string() }
fn default_viewing_distance() -> String { DEFAULT_VIEWING_DISTANCE.to_string() }
fn default_upscale() -> String { DEFAULT_UPSCALE.to_string() }

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            pixel_width: None,
            pixel_height: None,
            target_width_in: None,
            target_height_in: None,
            medium: default_medium(),
            viewing_distance: default_viewing_distance(),
            upscale: default_upscale(),
        }
    }
}

impl CalculationInput {
    pub fn new(pixel_width: u32, pixel_height: u32, target_width_in: f64, target_height_in: f64) -> Self {
        Self {
            pixel_width: Some(pixel_width),
            pixel_height: Some(pixel_height),
            target_width_in: Some(target_width_in),
            target_height_in: Some(target_height_in),
            ..Self::default()
        }
    }

    pub fn medium(mut self, key: impl Into<String>) -> Self {
        self.medium = key.into();
        self
    }

    pub fn viewing_distance(mut self, key: impl Into<String>) -> Self {
        self.viewing_distance = key.into();
        self
    }

    pub fn upscale(mut self, key: impl Into<String>) -> Self {
        self.upscale = key.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEcho {
    pub pixels: Extent<u32>,
    pub megapixels: f64,
    pub target_print: Extent<f64>,
    pub medium_key: &'static str,
    pub medium: &'static str,
    pub viewing_distance_key: &'static str,
    pub viewing_distance: &'static str,
    pub upscale_key: &'static str,
    pub ai_upscaling: &'static str,
}

/// Intermediate densities, rounded to whole DPI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub raw_dpi: u32,
    pub ai_adjusted_raw_dpi: u32,
    pub effective_dpi: u32,
    pub min_perceptible_dpi: u32,
    pub quality_threshold: u32,
    pub medium_maf: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Outstanding,
    Excellent,
    Good,
    Marginal,
    Insufficient,
}

impl Rating {
    /// Inclusive lower bounds: 90, 75, 55, 35.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Outstanding,
            75.. => Self::Excellent,
            55.. => Self::Good,
            35.. => Self::Marginal,
            _ => Self::Insufficient,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Marginal => "Marginal",
            Self::Insufficient => "Insufficient",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Outstanding => "#00875A",
            Self::Excellent => "#36B37E",
            Self::Good => "#D97706",
            Self::Marginal => "#EA580C",
            Self::Insufficient => "#DC2626",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Outstanding => "✦",
            Self::Excellent => "✅",
            Self::Good => "⚠️",
            Self::Marginal => "🔶",
            Self::Insufficient => "❌",
        }
    }

    pub fn message(self, medium_label: &str) -> String {
        match self {
            Self::Outstanding => format!(
                "Excellent quality for {medium_label}. Comfortably exceeds the perceptual threshold, safe to print."
            ),
            Self::Excellent => "Professional-grade quality for this medium and viewing distance. This will print sharply.".to_string(),
            Self::Good => "Acceptable quality. Minor softness may be visible on very close inspection, but print will be usable.".to_string(),
            Self::Marginal => "Below recommended quality. Pixelation or softness is likely at this size. See suggestions below.".to_string(),
            Self::Insufficient => "Resolution is too low for this print size. The image will print visibly pixelated without upscaling.".to_string(),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Perceptual print quality score and its rating band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityScore {
    pub score: u8,
    pub rating: Rating,
    pub color: &'static str,
    pub icon: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimensions {
    pub inches: Extent<f64>,
    pub cm: Extent<f64>,
    pub mm: Extent<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxPrint {
    pub inches: Extent<f64>,
    pub cm: Extent<f64>,
    pub at_dpi: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPixels {
    pub width: u64,
    pub height: u64,
    pub megapixels: f64,
    pub at_dpi: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Confirm,
    Upscale,
    Source,
    Resize,
    Medium,
    Color,
}

/// Advisory urgency. Not a sort key: suggestions keep emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Positive,
    Critical,
    High,
    Medium,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub input: InputEcho,
    pub calculation: Calculation,
    pub ppqs: QualityScore,
    pub dimensions: Dimensions,
    pub max_print: MaxPrint,
    pub required_pixels: RequiredPixels,
    pub suggestions: Vec<Suggestion>,
    pub medium_note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweetSpotResult {
    pub print_size: Extent<f64>,
    pub medium: &'static str,
    pub viewing_distance: &'static str,
    pub sweet_spot_dpi: u32,
    pub safety_margin: f64,
    pub min_perceptible_dpi: u32,
    pub required_pixels: RequiredPixels,
    pub interpretation: String,
}

/// Which parser branch produced a resolution reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataSource {
    #[serde(rename = "JPEG EXIF")]
    JpegExif,
    #[serde(rename = "PNG pHYs")]
    PngPhys,
    #[serde(rename = "PNG pHYs (unit unknown)")]
    PngPhysUnknownUnit,
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JpegExif => write!(f, "JPEG EXIF"),
            Self::PngPhys => write!(f, "PNG pHYs"),
            Self::PngPhysUnknownUnit => write!(f, "PNG pHYs (unit unknown)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    pub x_dpi: u32,
    pub y_dpi: u32,
    pub source: MetadataSource,
}

impl ResolutionMetadata {
    /// Both axes positive and below `max_dpi`. Embedded values outside this
    /// range are usually placeholders rather than real print intent.
    pub fn is_plausible(&self, max_dpi: u32) -> bool {
        (1..max_dpi).contains(&self.x_dpi) && (1..max_dpi).contains(&self.y_dpi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConversion {
    pub inches: f64,
    pub cm: f64,
    pub mm: f64,
    pub pixels_at_300_dpi: i64,
}
